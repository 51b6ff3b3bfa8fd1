use imagecard_core::GenerationFailure;
use serde_json::Value;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Message shown when the relay fails without saying why
pub const GENERIC_FAILURE: &str = "Failed to generate image.";

/// Errors from the relay client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure between the client and the relay
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay answered with a non-success status
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the relay's `error` field
        message: String,
        /// Diagnostic detail from the relay's `details` field
        details: Option<Value>,
    },

    /// Relay answered successfully but the body was unusable
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<ClientError> for GenerationFailure {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Api { message, details, .. } => Self { message, details },
            ClientError::Parse(_) => Self::new(GENERIC_FAILURE),
            other @ (ClientError::Http(_) | ClientError::Config(_)) => Self::new(other.to_string()),
        }
    }
}
