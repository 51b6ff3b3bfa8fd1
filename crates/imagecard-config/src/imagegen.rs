use secrecy::SecretString;
use serde::Deserialize;

/// Environment variable consulted when `imagegen.api_key` is unset
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable consulted when `imagegen.base_url` is unset
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Model requested when none is configured
pub const DEFAULT_MODEL: &str = "black-forest-labs/FLUX.1-schnell";

/// Upstream image generation provider (OpenAI-compatible API)
///
/// Credentials may be absent; the relay reports the gap when a request
/// actually needs them.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenConfig {
    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL, e.g. `https://api.openai.com/v1`
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,
    /// Dimension strings the relay accepts
    #[serde(default = "default_sizes")]
    pub sizes: Vec<String>,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            sizes: default_sizes(),
        }
    }
}

impl ImageGenConfig {
    /// Fill unset credentials from `OPENAI_API_KEY` / `OPENAI_BASE_URL`
    ///
    /// Empty variables count as unset.
    pub fn apply_env(&mut self) {
        if self.api_key.is_none() {
            self.api_key = non_empty_var(API_KEY_ENV).map(SecretString::from);
        }

        if self.base_url.is_none() {
            self.base_url = non_empty_var(BASE_URL_ENV);
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_sizes() -> Vec<String> {
    ["1024x1024", "1024x1792", "1792x1024"]
        .into_iter()
        .map(String::from)
        .collect()
}
