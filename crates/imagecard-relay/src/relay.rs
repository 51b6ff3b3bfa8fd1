use imagecard_config::ImageGenConfig;
use imagecard_core::GenerateResponse;

use crate::{
    error::{RelayError, Result},
    provider::{ImageProvider, openai::OpenAiImageProvider},
    types::{GenerateBody, ImageRequest},
};

/// Validates prompts and forwards them to the image provider
pub struct Relay {
    provider: Box<dyn ImageProvider>,
    sizes: Vec<String>,
}

impl Relay {
    /// Build a relay around an arbitrary provider
    pub fn new(provider: Box<dyn ImageProvider>, sizes: Vec<String>) -> Self {
        Self { provider, sizes }
    }

    /// Build a relay talking to the configured OpenAI-compatible endpoint
    pub fn from_config(config: &ImageGenConfig) -> Self {
        if config.api_key.is_none() || config.base_url.is_none() {
            tracing::warn!("image provider credentials incomplete, generation requests will fail until configured");
        }

        let provider = OpenAiImageProvider::new(config.api_key.clone(), config.base_url.clone(), config.model.clone());

        tracing::debug!(model = %config.model, sizes = ?config.sizes, "image relay initialized");

        Self::new(Box::new(provider), config.sizes.clone())
    }

    /// Check a request body without touching the network
    ///
    /// The prompt must be non-empty after trimming and the size must be one
    /// of the configured dimension strings. The prompt is forwarded as typed.
    pub fn validate(&self, body: GenerateBody) -> Result<ImageRequest> {
        let prompt = body
            .prompt
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| RelayError::InvalidRequest("Missing prompt".to_string()))?;

        let size = body
            .size
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| RelayError::InvalidRequest("Missing size".to_string()))?;

        if !self.sizes.contains(&size) {
            return Err(RelayError::UnsupportedSize {
                size,
                supported: self.sizes.clone(),
            });
        }

        Ok(ImageRequest { prompt, size })
    }

    /// Validate, make exactly one provider call, and return the first image
    pub async fn generate(&self, body: GenerateBody) -> Result<GenerateResponse> {
        let request = self.validate(body)?;

        let response = self.provider.generate(&request).await?;

        let first = response.images.into_iter().next().unwrap_or_default();

        match first.b64_json.filter(|b64| !b64.is_empty()) {
            Some(image_url) => Ok(GenerateResponse { image_url }),
            None => {
                if first.url.is_some() {
                    tracing::warn!(provider = %self.provider.name(), "provider returned a URL instead of base64 data");
                } else {
                    tracing::warn!(provider = %self.provider.name(), "provider returned no image");
                }

                Err(RelayError::EmptyResult { details: response.raw })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::types::{ProviderImage, ProviderResponse};

    /// Provider returning a canned reply and counting calls
    struct FakeProvider {
        calls: Arc<AtomicUsize>,
        reply: fn() -> Result<ProviderResponse>,
    }

    #[async_trait]
    impl ImageProvider for FakeProvider {
        async fn generate(&self, _request: &ImageRequest) -> Result<ProviderResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    fn relay_with(reply: fn() -> Result<ProviderResponse>) -> (Relay, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FakeProvider {
            calls: Arc::clone(&calls),
            reply,
        };
        let sizes = ImageGenConfig::default().sizes;

        (Relay::new(Box::new(provider), sizes), calls)
    }

    fn one_image() -> Result<ProviderResponse> {
        Ok(ProviderResponse {
            images: vec![
                ProviderImage {
                    b64_json: Some("iVBORw0".to_owned()),
                    url: None,
                },
                ProviderImage {
                    b64_json: Some("second".to_owned()),
                    url: None,
                },
            ],
            raw: Value::Null,
        })
    }

    fn no_images() -> Result<ProviderResponse> {
        Ok(ProviderResponse {
            images: Vec::new(),
            raw: json!({ "created": 1_700_000_000, "data": [] }),
        })
    }

    fn body(prompt: Option<&str>, size: Option<&str>) -> GenerateBody {
        GenerateBody {
            prompt: prompt.map(str::to_owned),
            size: size.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn blank_prompts_never_reach_the_provider() {
        let (relay, calls) = relay_with(one_image);

        for prompt in [None, Some(""), Some("   "), Some("\n\t")] {
            let err = relay.generate(body(prompt, Some("1024x1024"))).await.unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.to_string(), "Missing prompt");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_size_is_rejected() {
        let (relay, calls) = relay_with(one_image);

        let err = relay.generate(body(Some("a red cube"), None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing size");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsupported_size_is_rejected() {
        let (relay, calls) = relay_with(one_image);

        let err = relay.generate(body(Some("a red cube"), Some("512x512"))).await.unwrap_err();
        assert!(matches!(err, RelayError::UnsupportedSize { ref size, .. } if size == "512x512"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn returns_first_image() {
        let (relay, calls) = relay_with(one_image);

        let response = relay.generate(body(Some("a red cube"), Some("1024x1024"))).await.unwrap();
        assert_eq!(response.image_url, "iVBORw0");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_result_is_distinct_error() {
        let (relay, calls) = relay_with(no_images);

        let err = relay.generate(body(Some("a red cube"), Some("1792x1024"))).await.unwrap_err();
        assert_eq!(err.to_string(), "No image returned");
        assert_eq!(err.details().unwrap()["data"], json!([]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn url_only_reply_counts_as_empty() {
        fn url_only() -> Result<ProviderResponse> {
            Ok(ProviderResponse {
                images: vec![ProviderImage {
                    b64_json: None,
                    url: Some("https://cdn.example.com/1.png".to_owned()),
                }],
                raw: Value::Null,
            })
        }

        let (relay, _) = relay_with(url_only);

        let err = relay.generate(body(Some("a red cube"), Some("1024x1024"))).await.unwrap_err();
        assert!(matches!(err, RelayError::EmptyResult { .. }));
    }

    #[tokio::test]
    async fn provider_errors_pass_through_without_retry() {
        fn failing() -> Result<ProviderResponse> {
            Err(RelayError::ProviderApiError {
                status: 503,
                message: "model overloaded".to_owned(),
            })
        }

        let (relay, calls) = relay_with(failing);

        let err = relay.generate(body(Some("a red cube"), Some("1024x1024"))).await.unwrap_err();
        assert_eq!(err.to_string(), "model overloaded");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
