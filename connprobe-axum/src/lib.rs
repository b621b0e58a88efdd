//! HTTP front end for connprobe.
//!
//! Exposes a single resource, `/hello`:
//!
//! | Method    | Behavior |
//! |-----------|----------|
//! | `GET`     | `200 {"message":"Hello, World!"}` |
//! | `POST`    | Validate a JSON descriptor. `200 {"message":"Connected to the database!"}`, `400 {"error":..}` for bad input, `502 {"error":..}` when the database refuses |
//! | `OPTIONS` | `200`, plus CORS preflight handling |
//!
//! # Example
//!
//! ```rust,no_run
//! use connprobe_axum::{AppState, CorsConfig, ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     serve(&ServerConfig::default(), &CorsConfig::default(), AppState::native()).await
//! }
//! ```

pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod state;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{CorsConfig, CorsConfigError, DEFAULT_ORIGIN, DEFAULT_PORT, ServerConfig};
pub use cors::create_cors_layer;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Path of the probe resource.
pub const HELLO_PATH: &str = "/hello";

/// Build the application router.
pub fn router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route(
            HELLO_PATH,
            get(handlers::hello)
                .post(handlers::validate)
                .options(handlers::options),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors)),
        )
        .with_state(state)
}

/// Bind the listener and serve until the process is stopped.
///
/// Fails with [`std::io::ErrorKind::InvalidInput`] when the CORS settings
/// do not pass [`CorsConfig::validate`].
pub async fn serve(server: &ServerConfig, cors: &CorsConfig, state: AppState) -> std::io::Result<()> {
    cors.validate()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let addr = server.addr();
    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        origins = ?cors.allowed_origins,
        "Server started"
    );
    axum::serve(listener, router(state, cors)).await
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiError, ApiResult, AppState, CorsConfig, HELLO_PATH, ServerConfig, router, serve,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum_test::TestServer;
    use connprobe_driver::{
        Connector, DriverError, DriverResult, ProbeConnection, ProbeRequest,
    };
    use http::{HeaderName, HeaderValue, Method, StatusCode, header};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[derive(Default)]
    struct Stub {
        reject: Option<&'static str>,
        connects: AtomicUsize,
        last_url: std::sync::Mutex<Option<String>>,
    }

    struct StubConnection;

    #[async_trait]
    impl ProbeConnection for StubConnection {
        fn driver(&self) -> &'static str {
            "stub"
        }

        async fn close(self: Box<Self>) -> DriverResult<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl Connector for Stub {
        async fn connect(&self, request: &ProbeRequest) -> DriverResult<Box<dyn ProbeConnection>> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            *self.last_url.lock().unwrap() = Some(request.url().to_string());
            match self.reject {
                Some(reason) => Err(DriverError::NoSuitableDriver(reason.to_string())),
                None => Ok(Box::new(StubConnection)),
            }
        }
    }

    fn server(stub: Arc<Stub>) -> TestServer {
        let app = router(AppState::new(stub), &CorsConfig::default());
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_get_hello() {
        let server = server(Arc::default());
        let response = server.get(HELLO_PATH).await;

        response.assert_status_ok();
        response.assert_json(&json!({"message": "Hello, World!"}));
        assert_eq!(
            response.header(header::CONTENT_TYPE),
            "application/json; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_post_connects() {
        let stub = Arc::new(Stub::default());
        let server = server(stub.clone());

        let response = server
            .post(HELLO_PATH)
            .json(&json!({
                "host": "h", "port": "5432", "databaseName": "d",
                "username": "u", "password": "p", "databaseType": "postgresql"
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({"message": "Connected to the database!"}));
        assert_eq!(stub.connects.load(Ordering::SeqCst), 1);
        assert_eq!(
            stub.last_url.lock().unwrap().as_deref(),
            Some("jdbc:postgresql://h:5432/d")
        );
    }

    #[tokio::test]
    async fn test_post_insufficient_details() {
        let stub = Arc::new(Stub::default());
        let server = server(stub.clone());

        let response = server
            .post(HELLO_PATH)
            .json(&json!({"databaseType": "postgresql"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "Insufficient details to build JDBC connection string."}));
        assert_eq!(stub.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_post_unsupported_type() {
        let server = server(Arc::default());

        let response = server
            .post(HELLO_PATH)
            .json(&json!({"host": "h", "port": "1", "databaseName": "d", "databaseType": "oracle9000"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "Unsupported database type: oracle9000"}));
    }

    #[tokio::test]
    async fn test_post_malformed_body() {
        let server = server(Arc::default());

        let response = server.post(HELLO_PATH).text("{not json").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Malformed request body:")
        );
    }

    #[tokio::test]
    async fn test_post_driver_rejected() {
        let stub = Arc::new(Stub {
            reject: Some("jdbc:custom://x"),
            ..Default::default()
        });
        let server = server(stub.clone());

        let response = server
            .post(HELLO_PATH)
            .json(&json!({"connectionString": "jdbc:custom://x"}))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        response.assert_json(&json!({"error": "No suitable driver found for jdbc:custom://x"}));
        assert_eq!(stub.connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_options_without_preflight() {
        let server = server(Arc::default());
        let response = server.method(Method::OPTIONS, HELLO_PATH).await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let server = server(Arc::default());

        let response = server
            .method(Method::OPTIONS, HELLO_PATH)
            .add_header(header::ORIGIN, HeaderValue::from_static(DEFAULT_ORIGIN))
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .add_header(
                header::ACCESS_CONTROL_REQUEST_HEADERS,
                HeaderValue::from_static("content-type"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            DEFAULT_ORIGIN
        );
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            "true"
        );

        let methods = response.header(header::ACCESS_CONTROL_ALLOW_METHODS);
        let methods = methods.to_str().unwrap();
        for method in ["GET", "POST", "OPTIONS", "PUT", "DELETE", "HEAD"] {
            assert!(methods.contains(method), "{}", methods);
        }

        let headers = response.header(header::ACCESS_CONTROL_ALLOW_HEADERS);
        let headers = headers.to_str().unwrap().to_lowercase();
        assert!(headers.contains("x-requested-with"), "{}", headers);
        assert!(headers.contains("authorization"), "{}", headers);
    }

    #[tokio::test]
    async fn test_cors_headers_on_simple_request() {
        let server = server(Arc::default());

        let response = server
            .get(HELLO_PATH)
            .add_header(header::ORIGIN, HeaderValue::from_static(DEFAULT_ORIGIN))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            DEFAULT_ORIGIN
        );
    }

    #[tokio::test]
    async fn test_foreign_origin_not_allowed() {
        let server = server(Arc::default());

        let response = server
            .get(HELLO_PATH)
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("https://evil.example.com"),
            )
            .await;

        response.assert_status_ok();
        assert!(
            response
                .maybe_header(HeaderName::from_static("access-control-allow-origin"))
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_wildcard_origin_does_not_panic_router() {
        let cors = CorsConfig {
            allowed_origins: vec!["*".into()],
            ..Default::default()
        };
        let server = TestServer::new(router(AppState::new(Arc::new(Stub::default())), &cors)).unwrap();

        let response = server
            .get(HELLO_PATH)
            .add_header(header::ORIGIN, HeaderValue::from_static(DEFAULT_ORIGIN))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            DEFAULT_ORIGIN
        );
    }

    #[tokio::test]
    async fn test_serve_refuses_wildcard_origin() {
        let cors = CorsConfig {
            allowed_origins: vec!["*".into()],
            ..Default::default()
        };
        let server_config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
        };

        let err = serve(&server_config, &cors, AppState::new(Arc::new(Stub::default())))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
