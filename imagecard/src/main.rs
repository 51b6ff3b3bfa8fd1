#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::{path::Path, sync::Arc};

use args::{Args, Command};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::Parser;
use imagecard_cards::{Controller, RelayClient};
use imagecard_client::RelayHttpClient;
use imagecard_config::Config;
use imagecard_core::Orientation;
use imagecard_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load_or_default(&args.config)?;

    // Initialize logging
    imagecard_telemetry::init(&config.telemetry)?;

    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&args.config, &config).await,
        Command::Generate {
            prompt,
            orientation,
            relay_url,
            output,
        } => generate(&relay_url, prompt, orientation, &output).await,
    }
}

async fn serve(config_path: &Path, config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        config_path = %config_path.display(),
        model = %config.imagegen.model,
        "starting imagecard"
    );

    let server = Server::new(config);

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("imagecard stopped");
    Ok(())
}

/// Drive a single card through one generation and save the result
async fn generate(relay_url: &str, prompt: String, orientation: Orientation, output: &Path) -> anyhow::Result<()> {
    let client = RelayHttpClient::new(relay_url)?;
    let mut controller = Controller::new(Arc::new(client) as Arc<dyn RelayClient>);

    let card = controller
        .deck()
        .ids()
        .next()
        .ok_or_else(|| anyhow::anyhow!("deck has no cards"))?;

    controller.change_input(card, prompt)?;
    controller.change_orientation(card, orientation)?;
    controller.submit(card)?;

    tracing::info!(%relay_url, size = %orientation, "waiting for image");
    controller.settle().await;

    let state = controller
        .card(card)
        .ok_or_else(|| anyhow::anyhow!("card {card} disappeared"))?;

    if let Some(error) = state.error() {
        anyhow::bail!("generation failed: {error}");
    }

    let encoded = state
        .image()
        .ok_or_else(|| anyhow::anyhow!("relay returned no image"))?;
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| anyhow::anyhow!("image is not valid base64: {e}"))?;

    tokio::fs::write(output, &bytes)
        .await
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", output.display()))?;

    tracing::info!(path = %output.display(), bytes = bytes.len(), "image saved");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
