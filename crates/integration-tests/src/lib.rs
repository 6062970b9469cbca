//! Integration tests for Stockroom.
//!
//! The tests drive the full router in-process with `tower::ServiceExt::oneshot`,
//! so no server or port is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stockroom-integration-tests
//! ```

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use stockroom_web::{config::ServerConfig, state::AppState, store::ProductStore};
use tower::ServiceExt;

/// A router over a fresh, empty store.
pub struct TestContext {
    pub store: ProductStore,
    app: Router,
}

/// A fully buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of `name` as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Build the app around a new store.
    #[must_use]
    pub fn new() -> Self {
        let store = ProductStore::new();
        let state = AppState::new(ServerConfig::default(), store.clone());
        Self {
            store,
            app: stockroom_web::app(state),
        }
    }

    /// Send `request` through the router and buffer the response.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// `method path` with an empty body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    pub async fn request(&self, method: Method, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// `GET path`.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path).await
    }

    /// `POST /submit` with a url-encoded body built from `fields`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    pub async fn submit(&self, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/submit")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }
}

/// The fields of a valid submission.
#[must_use]
pub fn soap_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Soap"),
        ("category", "higiene"),
        ("quantity", "10"),
        ("price", "12,90"),
        ("promotion", "yes"),
    ]
}
