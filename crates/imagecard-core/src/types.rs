use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Orientation;

/// Body of a `POST /generate` request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationRequest {
    /// Text description of the desired image
    pub prompt: String,
    /// Requested dimensions
    pub size: Orientation,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, size: Orientation) -> Self {
        Self {
            prompt: prompt.into(),
            size,
        }
    }
}

/// Successful relay response
///
/// `imageUrl` holds a base64-encoded image, not a URL. The name is kept for
/// compatibility with existing front ends.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerateResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Error response body returned by the relay with a non-2xx status
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Optional diagnostic detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Failed generation as seen by a card
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct GenerationFailure {
    pub message: String,
    pub details: Option<Value>,
}

impl GenerationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }
}

impl From<ErrorBody> for GenerationFailure {
    fn from(body: ErrorBody) -> Self {
        Self {
            message: body.error,
            details: body.details,
        }
    }
}

/// Outcome of one generation: a base64 image payload or a failure
pub type GenerationResult = Result<String, GenerationFailure>;
