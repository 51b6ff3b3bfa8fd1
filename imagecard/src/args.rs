use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};
use imagecard_core::Orientation;

/// Prompt-to-image card relay
#[derive(Debug, Parser)]
#[command(name = "imagecard", about = "Relay prompts to an image generation provider")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "imagecard.toml", env = "IMAGECARD_CONFIG", global = true)]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "IMAGECARD_LISTEN", global = true)]
    pub listen: Option<SocketAddr>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the relay server (default)
    Serve,

    /// Generate one image through a running relay
    Generate {
        /// Text description of the image
        #[arg(short, long)]
        prompt: String,

        /// square, portrait, landscape, or a size such as 1792x1024
        #[arg(long, default_value_t = Orientation::Square)]
        orientation: Orientation,

        /// Base URL of the relay
        #[arg(long, default_value = "http://127.0.0.1:3000", env = "IMAGECARD_RELAY_URL")]
        relay_url: String,

        /// File the decoded image is written to
        #[arg(short, long, default_value = "image.png")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_optional() {
        let args = Args::try_parse_from(["imagecard"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.config, PathBuf::from("imagecard.toml"));
    }

    #[test]
    fn listen_applies_to_serve() {
        let args = Args::try_parse_from(["imagecard", "serve", "--listen", "127.0.0.1:8080"]).unwrap();
        assert!(matches!(args.command, Some(Command::Serve)));
        assert_eq!(args.listen, Some(SocketAddr::from(([127, 0, 0, 1], 8080))));
    }

    #[test]
    fn generate_parses_orientation_label() {
        let args = Args::try_parse_from(["imagecard", "generate", "--prompt", "a red cube", "--orientation", "landscape"])
            .unwrap();

        let Some(Command::Generate { prompt, orientation, .. }) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(prompt, "a red cube");
        assert_eq!(orientation, Orientation::Landscape);
    }

    #[test]
    fn unknown_orientation_is_rejected() {
        let result = Args::try_parse_from(["imagecard", "generate", "--prompt", "x", "--orientation", "512x512"]);
        assert!(result.is_err());
    }
}
