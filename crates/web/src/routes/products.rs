//! Product registration route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use stockroom_core::{Category, Email, FieldErrors, Product, RawSubmission, Rejected, validate};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;

/// Largest form body accepted by `POST /submit`, in bytes.
pub const MAX_BODY_BYTES: usize = 1_000_000;

/// Placeholder shown for optional values that were left blank.
const BLANK: &str = "-";

// =============================================================================
// View Types
// =============================================================================

/// One `<option>` in the category select.
#[derive(Clone, Debug)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Per-field messages shown under the inputs.
#[derive(Clone, Debug, Default)]
pub struct FormErrorsView {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub expiry: Option<String>,
    pub supplier_email: Option<String>,
}

impl From<&FieldErrors> for FormErrorsView {
    fn from(errors: &FieldErrors) -> Self {
        let message = |field: &str| errors.get(field).map(ToString::to_string);
        Self {
            name: message("name"),
            category: message("category"),
            quantity: message("quantity"),
            price: message("price"),
            expiry: message("expiry"),
            supplier_email: message("supplierEmail"),
        }
    }
}

/// Values the form is pre-filled with.
#[derive(Clone, Debug)]
pub struct FormView {
    pub name: String,
    pub categories: Vec<CategoryOption>,
    pub quantity: String,
    pub price: String,
    pub expiry: String,
    pub supplier_email: String,
    pub description: String,
    pub promotion: bool,
    pub errors: FormErrorsView,
}

impl FormView {
    /// A blank form.
    #[must_use]
    pub fn empty() -> Self {
        Self::refill(&RawSubmission::default(), &FieldErrors::default())
    }

    /// The form as the user submitted it, with their errors attached.
    ///
    /// The promotion box is re-checked only for `"yes"`, the value it
    /// submits and the only value that validates to `true`.
    #[must_use]
    pub fn refill(values: &RawSubmission, errors: &FieldErrors) -> Self {
        let chosen = values.get("category");
        Self {
            name: values.get("name").to_string(),
            categories: Category::ALL
                .iter()
                .map(|category| CategoryOption {
                    value: category.as_str(),
                    label: category.label(),
                    selected: category.as_str() == chosen,
                })
                .collect(),
            quantity: values.get("quantity").to_string(),
            price: values.get("price").to_string(),
            expiry: values.get("expiry").to_string(),
            supplier_email: values.get("supplierEmail").to_string(),
            description: values.get("description").to_string(),
            promotion: values.get("promotion") == "yes",
            errors: FormErrorsView::from(errors),
        }
    }
}

/// A product formatted for display.
#[derive(Clone, Debug)]
pub struct ProductView {
    pub name: String,
    pub category: &'static str,
    pub quantity: u64,
    pub price: String,
    pub expiry: String,
    pub supplier_email: String,
    pub description: String,
    pub promotion: &'static str,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let details = &product.details;
        Self {
            name: details.name.clone(),
            category: details.category.as_str(),
            quantity: details.quantity,
            price: details.price.to_string(),
            expiry: or_blank(details.expiry.as_deref()),
            supplier_email: or_blank(details.supplier_email.as_ref().map(Email::as_str)),
            description: or_blank(Some(details.description.as_str())),
            promotion: if details.promotion { "Sim" } else { "Não" },
        }
    }
}

/// A listing row: a product plus its 1-based position.
#[derive(Clone, Debug)]
pub struct ProductRow {
    pub index: usize,
    pub name: String,
    pub category: &'static str,
    pub quantity: u64,
    pub price: String,
    pub expiry: String,
    pub supplier_email: String,
    pub promotion: &'static str,
}

impl ProductRow {
    fn new(index: usize, product: &Product) -> Self {
        let view = ProductView::from(product);
        Self {
            index,
            name: view.name,
            category: view.category,
            quantity: view.quantity,
            price: view.price,
            expiry: view.expiry,
            supplier_email: view.supplier_email,
            promotion: view.promotion,
        }
    }
}

fn or_blank(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(BLANK)
        .to_string()
}

// =============================================================================
// Templates
// =============================================================================

/// Registration form page.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html", escape = "none")]
pub struct ProductFormTemplate {
    pub nonce: String,
    pub form: FormView,
}

/// Product listing page.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html", escape = "none")]
pub struct ProductsIndexTemplate {
    pub nonce: String,
    pub total: usize,
    pub rows: Vec<ProductRow>,
}

/// Confirmation page for a stored product.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html", escape = "none")]
pub struct ProductShowTemplate {
    pub nonce: String,
    pub product: ProductView,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the empty registration form.
///
/// GET /
#[instrument(skip_all)]
pub async fn new_form(nonce: CspNonce) -> impl IntoResponse {
    ProductFormTemplate {
        nonce: nonce.0,
        form: FormView::empty(),
    }
}

/// Display every stored product, oldest first.
///
/// GET /products
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, nonce: CspNonce) -> impl IntoResponse {
    let products = state.store().list_all();
    let rows: Vec<_> = products
        .iter()
        .enumerate()
        .map(|(i, product)| ProductRow::new(i + 1, product))
        .collect();

    ProductsIndexTemplate {
        nonce: nonce.0,
        total: rows.len(),
        rows,
    }
}

/// Validate a submitted form and store the product.
///
/// POST /submit
///
/// Invalid submissions re-render the form with the user's values and a
/// message per failing field (200). Bodies over [`MAX_BODY_BYTES`] get a 413.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    nonce: CspNonce,
    headers: HeaderMap,
    body: Body,
) -> Result<Response> {
    if declared_length(&headers).is_some_and(|len| len > MAX_BODY_BYTES) {
        tracing::warn!(limit = MAX_BODY_BYTES, "Declared body length over limit");
        return Err(AppError::PayloadTooLarge {
            limit: MAX_BODY_BYTES,
        });
    }

    let bytes = read_capped(body, MAX_BODY_BYTES).await?;
    let raw: RawSubmission = url::form_urlencoded::parse(&bytes).collect();

    match validate(raw) {
        Ok(product) => {
            let stored = state.store().append(product);
            tracing::info!(
                name = %stored.details.name,
                category = %stored.details.category,
                total = state.store().count(),
                "Product registered"
            );
            Ok(ProductShowTemplate {
                nonce: nonce.0,
                product: ProductView::from(&stored),
            }
            .into_response())
        }
        Err(Rejected { errors, values }) => {
            tracing::debug!(invalid_fields = errors.len(), "Submission rejected");
            Ok(ProductFormTemplate {
                nonce: nonce.0,
                form: FormView::refill(&values, &errors),
            }
            .into_response())
        }
    }
}

// =============================================================================
// Body Helpers
// =============================================================================

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Buffer `body`, giving up as soon as it grows past `limit` bytes.
async fn read_capped(body: Body, limit: usize) -> Result<Vec<u8>> {
    let mut stream = body.into_data_stream();
    let mut buffered = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
        if buffered.len() + chunk.len() > limit {
            tracing::warn!(limit, "Streamed body over limit");
            return Err(AppError::PayloadTooLarge { limit });
        }
        buffered.extend_from_slice(&chunk);
    }

    Ok(buffered)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;
    use rust_decimal::Decimal;
    use stockroom_core::{NewProduct, Price};

    use super::*;

    fn soap() -> Product {
        Product::new(
            NewProduct {
                name: "Soap".to_string(),
                category: Category::Higiene,
                quantity: 10,
                price: Price::new(Decimal::from_str("12.9").unwrap()).unwrap(),
                expiry: None,
                supplier_email: None,
                description: String::new(),
                promotion: true,
            },
            Utc::now(),
        )
    }

    fn submission(pairs: &[(&str, &str)]) -> RawSubmission {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_product_view_formats_blanks_and_flags() {
        let view = ProductView::from(&soap());
        assert_eq!(view.price, "R$ 12.90");
        assert_eq!(view.category, "higiene");
        assert_eq!(view.expiry, "-");
        assert_eq!(view.supplier_email, "-");
        assert_eq!(view.description, "-");
        assert_eq!(view.promotion, "Sim");
    }

    #[test]
    fn test_product_view_keeps_optional_values() {
        let mut product = soap();
        product.details.expiry = Some("2025-12-31".to_string());
        product.details.supplier_email = Some(Email::parse("a@b.co").unwrap());
        product.details.promotion = false;

        let view = ProductView::from(&product);
        assert_eq!(view.expiry, "2025-12-31");
        assert_eq!(view.supplier_email, "a@b.co");
        assert_eq!(view.promotion, "Não");
    }

    #[test]
    fn test_refill_selects_category_and_promotion() {
        let form = FormView::refill(
            &submission(&[("category", "limpeza"), ("promotion", "yes"), ("name", "X")]),
            &FieldErrors::default(),
        );
        let selected: Vec<_> = form
            .categories
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, ["limpeza"]);
        assert!(form.promotion);
        assert_eq!(form.name, "X");
    }

    #[test]
    fn test_refill_promotion_only_for_yes() {
        for value in ["on", "true", "1", "YES"] {
            let form =
                FormView::refill(&submission(&[("promotion", value)]), &FieldErrors::default());
            assert!(!form.promotion, "{value}");
        }
    }

    #[test]
    fn test_empty_form_has_no_selection_or_errors() {
        let form = FormView::empty();
        assert_eq!(form.categories.len(), Category::ALL.len());
        assert!(form.categories.iter().all(|o| !o.selected));
        assert!(form.errors.name.is_none());
        assert!(!form.promotion);
    }

    #[test]
    fn test_rejected_submission_maps_messages() {
        let rejected = validate(submission(&[("name", "  ")])).unwrap_err();
        let errors = FormErrorsView::from(&rejected.errors);
        assert_eq!(
            errors.name.as_deref(),
            Some("O nome do produto é obrigatório.")
        );
        assert!(errors.category.is_some());
        assert!(errors.supplier_email.is_none());
    }

    #[test]
    fn test_form_render_escapes_user_values() {
        let form = FormView::refill(
            &submission(&[("name", "<script>x</script>")]),
            &FieldErrors::default(),
        );
        let html = ProductFormTemplate {
            nonce: "n".to_string(),
            form,
        }
        .render()
        .unwrap();
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>x"));
    }

    #[test]
    fn test_index_render_is_deterministic() {
        let rows = vec![ProductRow::new(1, &soap())];
        let render = || {
            ProductsIndexTemplate {
                nonce: "n".to_string(),
                total: rows.len(),
                rows: rows.clone(),
            }
            .render()
            .unwrap()
        };
        let first = render();
        assert_eq!(first, render());
        assert!(first.contains("R$ 12.90"));
        assert!(first.contains("Sim"));
    }

    #[test]
    fn test_empty_index_shows_placeholder() {
        let html = ProductsIndexTemplate {
            nonce: "n".to_string(),
            total: 0,
            rows: Vec::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Nenhum produto cadastrado ainda."));
        assert!(html.contains("<strong>0</strong>"));
    }

    #[tokio::test]
    async fn test_read_capped_accepts_body_at_limit() {
        let bytes = read_capped(Body::from(vec![b'a'; 16]), 16).await.unwrap();
        assert_eq!(bytes.len(), 16);
    }

    #[tokio::test]
    async fn test_read_capped_rejects_body_over_limit() {
        let err = read_capped(Body::from(vec![b'a'; 17]), 16).await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge { limit: 16 }));
    }

    #[test]
    fn test_declared_length() {
        let mut headers = HeaderMap::new();
        assert_eq!(declared_length(&headers), None);
        headers.insert(header::CONTENT_LENGTH, "42".parse().unwrap());
        assert_eq!(declared_length(&headers), Some(42));
    }
}
