use tower_http::cors::{Any, CorsLayer};

/// The tracker has no browser sessions, so any origin may call it.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
