//! Unified error handling.
//!
//! Every `AppError` becomes a short plain-text response. Field validation
//! problems are not errors at this level: they are rendered back into the
//! form with a 200.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the web server.
#[derive(Debug, Error)]
pub enum AppError {
    /// No route for this method and path.
    #[error("Página não encontrada")]
    NotFound,

    /// The request body went over the buffering cap.
    #[error("Payload muito grande")]
    PayloadTooLarge {
        /// Cap in bytes.
        limit: usize,
    },

    /// The request body could not be read.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::BadRequest(reason) = &self {
            tracing::warn!(reason = %reason, "Request body could not be read");
        }

        let status = match &self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let mut response = (status, self.to_string()).into_response();

        // Oversized uploads are not drained; tell hyper to drop the connection.
        if matches!(self, Self::PayloadTooLarge { .. }) {
            response
                .headers_mut()
                .insert(header::CONNECTION, HeaderValue::from_static("close"));
        }

        response
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
