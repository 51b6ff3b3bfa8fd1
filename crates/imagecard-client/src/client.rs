use imagecard_core::{ErrorBody, GENERATE_PATH, GenerateResponse, GenerationRequest};
use url::Url;

use crate::error::{ClientError, GENERIC_FAILURE, Result};

/// Typed client for the relay's `POST /generate`
///
/// No request timeout is applied; a hung relay leaves the call pending.
#[derive(Debug, Clone)]
pub struct RelayHttpClient {
    base_url: Url,
    http: reqwest::Client,
}

impl RelayHttpClient {
    /// Create a new client pointing at the relay's base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Ask the relay for one image
    ///
    /// Returns the base64 payload carried in `imageUrl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay is unreachable, answers with a
    /// non-success status, or answers without an image
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerateResponse> {
        let url = make_url(&self.base_url, GENERATE_PATH);

        let response = self.http.post(url.as_str()).json(request).send().await?;

        let body = handle_error(response).await?.text().await?;

        serde_json::from_str::<GenerateResponse>(&body)
            .map_err(|e| ClientError::Parse(e.to_string()))
            .and_then(|response| {
                if response.image_url.is_empty() {
                    Err(ClientError::Parse("empty imageUrl".to_owned()))
                } else {
                    Ok(response)
                }
            })
    }
}

/// Build a full URL from the base and an absolute path
fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    url.set_path(path);
    url
}

/// Check an HTTP response for errors
async fn handle_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let error = parse_error_body(&body);

    Err(ClientError::Api {
        status: status.as_u16(),
        message: error.error,
        details: error.details,
    })
}

/// Parse a relay error body, falling back to a generic message
fn parse_error_body(body: &str) -> ErrorBody {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) if !error.error.trim().is_empty() => error,
        Ok(error) => ErrorBody {
            error: GENERIC_FAILURE.to_owned(),
            ..error
        },
        Err(_) => ErrorBody::new(GENERIC_FAILURE),
    }
}
