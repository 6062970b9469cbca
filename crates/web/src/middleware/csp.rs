//! Per-request nonce for the inline stylesheet.
//!
//! Every page carries its styles in one `<style nonce="...">` block; the CSP
//! built from the same nonce allows that block and no other inline style.

use axum::{extract::FromRequestParts, http::request::Parts};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;

/// 128 bits of randomness, base64-encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CspNonce(pub String);

impl CspNonce {
    /// Draw a fresh nonce from the thread RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        Self(STANDARD.encode(bytes))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// The `Content-Security-Policy` value that admits this nonce's stylesheet.
    ///
    /// ```text
    /// default-src 'none'; style-src 'nonce-<value>'; form-action 'self';
    /// base-uri 'none'; frame-ancestors 'none'
    /// ```
    #[must_use]
    pub fn policy(&self) -> String {
        let style_src = if self.0.is_empty() {
            "'none'".to_string()
        } else {
            format!("'nonce-{}'", self.0)
        };
        format!(
            "default-src 'none'; style-src {style_src}; form-action 'self'; \
             base-uri 'none'; frame-ancestors 'none'"
        )
    }
}

/// Handlers take the nonce planted by `security_headers_middleware`.
///
/// Outside that middleware the nonce is empty, which the policy treats as
/// "no inline styles".
impl<S> FromRequestParts<S> for CspNonce
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let nonce = parts.extensions.get::<Self>().cloned();
        if nonce.is_none() {
            tracing::warn!("No CSP nonce on request; is security_headers_middleware installed?");
        }
        Ok(nonce.unwrap_or_else(|| Self(String::new())))
    }
}
