use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// CORS layer restricted to the configured browser origins
///
/// Methods and headers are mirrored from the preflight request so that
/// credentials can be allowed. Origins are validated by `RelayConfig`; a
/// wildcard or an unusable value reaching this point is skipped.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.len() != allowed_origins.len() {
        tracing::warn!(
            "{} of {} CORS origins ignored",
            allowed_origins.len() - origins.len(),
            allowed_origins.len()
        );
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
