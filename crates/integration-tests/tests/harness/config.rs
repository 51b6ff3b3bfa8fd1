//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use imagecard_config::{Config, CorsConfig, HealthConfig, ImageGenConfig, ServerConfig, TelemetryConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults and no provider credentials
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                imagegen: ImageGenConfig::default(),
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Point the relay at a mock provider
    pub fn with_provider(mut self, base_url: &str) -> Self {
        self.config.imagegen.api_key = Some(SecretString::from("test-key"));
        self.config.imagegen.base_url = Some(base_url.to_owned());
        self
    }

    /// Point the relay at a provider but leave the key unset
    pub fn with_provider_without_key(mut self, base_url: &str) -> Self {
        self.config.imagegen.base_url = Some(base_url.to_owned());
        self
    }

    /// Override the model sent upstream
    pub fn with_model(mut self, model: &str) -> Self {
        model.clone_into(&mut self.config.imagegen.model);
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
