//! Request correlation IDs.
//!
//! Each request is tagged with an ID that shows up in the `http_request`
//! tracing span, on the Sentry scope, and in the `x-request-id` response
//! header. IDs handed in by an upstream proxy are reused when they look sane.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID that is passed through unchanged.
const MAX_UPSTREAM_LEN: usize = 128;

/// Tag the request with an ID and echo it on the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(accept_upstream)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// An upstream ID is kept only if it is short, non-empty, visible ASCII.
fn accept_upstream(id: &str) -> Option<&str> {
    let id = id.trim();
    let sane = !id.is_empty()
        && id.len() <= MAX_UPSTREAM_LEN
        && id.bytes().all(|b| b.is_ascii_graphic());
    sane.then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_ids() {
        assert_eq!(accept_upstream("abc-123"), Some("abc-123"));
        assert_eq!(accept_upstream(" abc "), Some("abc"));
    }

    #[test]
    fn test_rejects_empty_long_or_spaced_ids() {
        assert_eq!(accept_upstream(""), None);
        assert_eq!(accept_upstream("   "), None);
        assert_eq!(accept_upstream("a b"), None);
        assert_eq!(accept_upstream(&"x".repeat(MAX_UPSTREAM_LEN + 1)), None);
    }
}
