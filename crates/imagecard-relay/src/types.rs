use serde::Deserialize;
use serde_json::Value;

/// Incoming `POST /generate` body
///
/// Both fields are optional here so a missing field becomes a validation
/// error with a useful message instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

/// Request that passed validation and is ready to forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: String,
}

/// One image entry returned by a provider
#[derive(Debug, Clone, Default)]
pub struct ProviderImage {
    pub b64_json: Option<String>,
    pub url: Option<String>,
}

/// Successful provider reply
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub images: Vec<ProviderImage>,
    /// Body as received, kept for diagnostics
    pub raw: Value,
}
