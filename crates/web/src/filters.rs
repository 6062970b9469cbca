//! Custom Askama template filters.
//!
//! Templates are compiled with askama's own escaper turned off and route every
//! user-supplied value through [`escape_html`], which emits named entities
//! (`&lt;`, not `&#60;`).

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Escapes `&`, `<`, `>`, `"` and `'` for safe embedding in HTML text and
/// quoted attribute values.
///
/// Usage in templates: `{{ product.name|escape_html }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn escape_html(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(html_escape(&value.to_string()))
}

/// Replace the five HTML-significant characters with entities.
#[must_use]
pub fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
