//! Cross-origin resource sharing policy.
//!
//! Any origin, method and header is allowed, with credentials. Wildcards
//! are not valid alongside credentials, so each list mirrors the request.

use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// The service-wide CORS layer.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
