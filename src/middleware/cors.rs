use tower_http::cors::{Any, CorsLayer};

/// The API is consumed from whatever origin the SPA is hosted on, so CORS
/// stays wide open; access control happens at the token layer.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
