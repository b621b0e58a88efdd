//! CORS layer for the probe endpoint.

use http::{HeaderName, Method, header};
use tower_http::cors::CorsLayer;

use crate::config::CorsConfig;

/// Methods advertised to browsers.
pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::OPTIONS,
    Method::PUT,
    Method::DELETE,
    Method::HEAD,
];

const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Build the CORS layer for a configuration.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.to_header_values())
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::AUTHORIZATION,
            X_REQUESTED_WITH,
        ])
        .allow_credentials(config.allow_credentials)
        .max_age(config.max_age())
}
