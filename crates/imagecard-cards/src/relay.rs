use async_trait::async_trait;
use imagecard_client::RelayHttpClient;
use imagecard_core::{GenerationFailure, GenerationRequest, GenerationResult};

/// Anything that can turn a request into an image payload
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Perform one generation; failures carry a user-facing message
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult;
}

#[async_trait]
impl RelayClient for RelayHttpClient {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        Self::generate(self, request)
            .await
            .map(|response| response.image_url)
            .map_err(GenerationFailure::from)
    }
}
