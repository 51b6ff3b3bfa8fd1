use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ImageProvider;
use crate::{
    error::{RelayError, Result},
    types::{ImageRequest, ProviderImage, ProviderResponse},
};

/// Images requested per call
const IMAGE_COUNT: u32 = 1;

/// Response format asking for inline base64 image data
const RESPONSE_FORMAT: &str = "b64_json";

/// Message used when the provider gives no usable error text
const UNKNOWN_ERROR: &str = "Unknown error";

/// Provider speaking the `OpenAI` images API
///
/// Works against any compatible endpoint (`OpenAI`, Together, Black Forest
/// Labs gateways). Credentials are checked per request.
pub(crate) struct OpenAiImageProvider {
    client: Client,
    api_key: Option<SecretString>,
    base_url: Option<String>,
    model: String,
}

impl OpenAiImageProvider {
    pub fn new(api_key: Option<SecretString>, base_url: Option<String>, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> Result<String> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            RelayError::ConfigError("image provider base URL is not configured (set OPENAI_BASE_URL)".to_string())
        })?;

        Ok(format!("{}/images/generations", base_url.trim_end_matches('/')))
    }

    fn api_key(&self) -> Result<&SecretString> {
        self.api_key.as_ref().ok_or_else(|| {
            RelayError::ConfigError("image provider API key is not configured (set OPENAI_API_KEY)".to_string())
        })
    }
}

/// Wire format for the images API request
#[derive(Serialize)]
struct OpenAiImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'a str,
}

/// Wire format for the images API response
///
/// `data` and its entries may be `null`; both read as "no image".
#[derive(Deserialize)]
struct OpenAiImageResponse {
    #[serde(default)]
    data: Option<Vec<Option<OpenAiImageData>>>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    b64_json: Option<String>,
    url: Option<String>,
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, request: &ImageRequest) -> Result<ProviderResponse> {
        let url = self.endpoint()?;
        let api_key = self.api_key()?;

        let wire_request = OpenAiImageRequest {
            model: &self.model,
            prompt: &request.prompt,
            n: IMAGE_COUNT,
            size: &request.size,
            response_format: RESPONSE_FORMAT,
        };

        tracing::debug!(model = %self.model, size = %request.size, "sending image generation request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "image generation request failed");
                RelayError::ConnectionError(format!("failed to reach image provider: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read image provider response");
            RelayError::ConnectionError(format!("failed to read image provider response: {e}"))
        })?;

        if !status.is_success() {
            tracing::error!(status = %status, "image provider returned an error");

            return Err(RelayError::ProviderApiError {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let raw: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "image provider response is not JSON");
            RelayError::MalformedResponse(e.to_string())
        })?;

        let images = parse_images(&raw)?;

        tracing::debug!(images = images.len(), "image generation request complete");

        Ok(ProviderResponse { images, raw })
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Read the image entries of a successful reply, skipping `null` ones
fn parse_images(raw: &Value) -> Result<Vec<ProviderImage>> {
    let wire_response = OpenAiImageResponse::deserialize(raw).map_err(|e| {
        tracing::error!(error = %e, "unexpected image provider response shape");
        RelayError::MalformedResponse(e.to_string())
    })?;

    Ok(wire_response
        .data
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|d| ProviderImage {
            b64_json: d.b64_json,
            url: d.url,
        })
        .collect())
}

/// Pull a human-readable message out of an error body
///
/// Understands `{"error": {"message": ..}}`, `{"error": ".."}` and
/// `{"message": ".."}`; JSON without any of these is an unknown error and
/// anything that is not JSON is returned as trimmed text.
fn extract_error_message(body: &str) -> String {
    let message = match serde_json::from_str::<Value>(body) {
        Ok(json) => json["error"]["message"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .or_else(|| json["message"].as_str())
            .unwrap_or_default()
            .to_owned(),
        Err(_) => body.trim().to_owned(),
    };

    if message.is_empty() {
        UNKNOWN_ERROR.to_owned()
    } else {
        message
    }
}
