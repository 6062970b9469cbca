//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (binary only)
//! 2. `TraceLayer` with an `http_request` span
//! 3. Request ID
//! 4. Security headers, which also plants the per-request [`CspNonce`]

pub mod csp;
pub mod request_id;
pub mod security_headers;

pub use csp::CspNonce;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
