use http::{HeaderName, HeaderValue, Method, header};
use imagecard_config::{AnyOrList, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// Only `POST` (the relay) and `GET` (health) are ever allowed.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]);

    layer = match &config.origins {
        AnyOrList::Any => layer.allow_origin(AllowOrigin::any()),
        AnyOrList::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(origins)
        }
    };

    layer = match &config.headers {
        AnyOrList::Any => layer.allow_headers(AllowHeaders::any()),
        AnyOrList::List(headers) => {
            let mut names: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            if !names.contains(&header::CONTENT_TYPE) {
                names.push(header::CONTENT_TYPE);
            }
            layer.allow_headers(names)
        }
    };

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}
