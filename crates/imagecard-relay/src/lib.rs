#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Relay between browser cards and the image generation provider
//!
//! Exposes `POST /generate`: validates `{ prompt, size }`, makes one call to
//! the configured provider and answers `{ imageUrl }` or `{ error, details? }`.

mod error;
mod provider;
mod relay;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use imagecard_core::{GENERATE_PATH, GenerateResponse};

pub use error::{RelayError, Result};
pub use provider::ImageProvider;
pub use relay::Relay;
pub use types::{GenerateBody, ImageRequest, ProviderImage, ProviderResponse};

/// Build the relay from configuration
pub fn build_relay(config: &imagecard_config::Config) -> Arc<Relay> {
    Arc::new(Relay::from_config(&config.imagegen))
}

/// Create the endpoint router for the relay
pub fn endpoint_router() -> Router<Arc<Relay>> {
    Router::new().route(GENERATE_PATH, post(generate))
}

/// Handle `POST /generate`
async fn generate(
    State(relay): State<Arc<Relay>>,
    payload: std::result::Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<GenerateResponse>> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected generate request body");
        RelayError::InvalidRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    tracing::debug!(size = ?body.size, "generate handler called");

    match relay.generate(body).await {
        Ok(response) => {
            tracing::debug!("image generation complete");
            Ok(Json(response))
        }
        Err(e) => {
            if e.is_validation() {
                tracing::debug!(error = %e, "generate request failed validation");
            } else {
                tracing::warn!(error = %e, "image generation failed");
            }
            Err(e)
        }
    }
}
