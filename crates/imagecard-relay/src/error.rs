use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use imagecard_core::ErrorBody;
use serde_json::{Value, json};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

/// Relay errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing or empty field, or a body that is not valid JSON
    #[error("{0}")]
    InvalidRequest(String),

    /// Size outside the configured set
    #[error("Unsupported size '{size}'")]
    UnsupportedSize { size: String, supported: Vec<String> },

    /// Provider answered with a non-success status
    #[error("{message}")]
    ProviderApiError { status: u16, message: String },

    /// Provider answered successfully but without an image payload
    #[error("No image returned")]
    EmptyResult { details: Value },

    /// Network or connection error talking to the provider
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Provider body could not be understood
    #[error("Malformed response from image provider: {0}")]
    MalformedResponse(String),

    /// Provider credentials or endpoint missing at request time
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RelayError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::UnsupportedSize { .. } => StatusCode::BAD_REQUEST,
            Self::ConnectionError(_) => StatusCode::BAD_GATEWAY,
            Self::ProviderApiError { .. }
            | Self::EmptyResult { .. }
            | Self::MalformedResponse(_)
            | Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Diagnostic detail attached to the response body, if any
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::UnsupportedSize { supported, .. } => Some(json!({ "supported": supported })),
            Self::ProviderApiError { status, .. } => Some(json!({ "status": status })),
            Self::EmptyResult { details } => Some(details.clone()),
            _ => None,
        }
    }

    /// Whether the error was detected before any outbound call
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::UnsupportedSize { .. })
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut body = ErrorBody::new(self.to_string());
        if let Some(details) = self.details() {
            body = body.with_details(details);
        }

        (status, Json(body)).into_response()
    }
}
