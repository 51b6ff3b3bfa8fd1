pub(crate) mod openai;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{ImageRequest, ProviderResponse},
};

/// Upstream image generation service
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Request a single base64-encoded image
    async fn generate(&self, request: &ImageRequest) -> Result<ProviderResponse>;

    /// Provider name used in logs
    fn name(&self) -> &str;
}
