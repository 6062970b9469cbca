//! Product submission validation.
//!
//! A submission is a bag of raw form strings. Each field is described once in
//! [`FIELDS`]: its wire name and a cleaning function that either writes the
//! cleaned value into a draft or reports a [`FieldError`]. Every field is
//! checked, so a rejected submission carries all of its errors at once.
//!
//! ```
//! use stockroom_core::{RawSubmission, validate};
//!
//! let raw: RawSubmission = [
//!     ("name", " Sabonete "),
//!     ("category", "higiene"),
//!     ("quantity", "10"),
//!     ("price", "12,90"),
//!     ("promotion", "yes"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let product = validate(raw).unwrap();
//! assert_eq!(product.name, "Sabonete");
//! assert_eq!(product.quantity, 10);
//! assert_eq!(product.price.to_string(), "R$ 12.90");
//! assert!(product.promotion);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::types::{Category, Email, NewProduct, Price, parse_number};

static EXPIRY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid regex"));

/// Raw form values keyed by field name.
///
/// Missing fields read as the empty string. When a key appears more than
/// once, the first value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubmission(HashMap<String, String>);

impl RawSubmission {
    /// The raw value of `field`, or `""` if it was not submitted.
    #[must_use]
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map_or("", String::as_str)
    }

    /// Whether `field` was submitted at all.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

impl<K, V> FromIterator<(K, V)> for RawSubmission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = HashMap::new();
        for (key, value) in iter {
            fields.entry(key.into()).or_insert_with(|| value.into());
        }
        Self(fields)
    }
}

/// A problem with a single submitted field.
///
/// The `Display` text is the message shown next to the field in the form.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("O nome do produto é obrigatório.")]
    NameRequired,
    #[error("Selecione uma categoria.")]
    CategoryRequired,
    #[error("Informe uma quantidade válida (número inteiro >= 0).")]
    InvalidQuantity,
    #[error("Informe um preço válido (ex: 12.90).")]
    InvalidPrice,
    #[error("Formato de data inválido.")]
    InvalidDate,
    #[error("E-mail do fornecedor inválido.")]
    InvalidEmail,
}

impl FieldError {
    /// Wire name of the field this error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::CategoryRequired => "category",
            Self::InvalidQuantity => "quantity",
            Self::InvalidPrice => "price",
            Self::InvalidDate => "expiry",
            Self::InvalidEmail => "supplierEmail",
        }
    }
}

/// Field errors keyed by wire field name, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, FieldError)>);

impl FieldErrors {
    fn insert(&mut self, error: FieldError) {
        if self.get(error.field()).is_none() {
            self.0.push((error.field(), error));
        }
    }

    /// The error for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, error)| error)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, error)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.0.iter().map(|(name, error)| (*name, error))
    }
}

/// A submission that failed validation.
///
/// Carries the raw values so the form can be shown again as the user typed it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("submission rejected with {} invalid field(s)", errors.len())]
pub struct Rejected {
    pub errors: FieldErrors,
    pub values: RawSubmission,
}

/// Cleaned values collected while walking [`FIELDS`].
#[derive(Debug, Default)]
struct Draft {
    name: Option<String>,
    category: Option<Category>,
    quantity: Option<u64>,
    price: Option<Price>,
    expiry: Option<String>,
    supplier_email: Option<Email>,
    description: String,
    promotion: bool,
}

impl Draft {
    fn finish(self) -> Result<NewProduct, FieldError> {
        Ok(NewProduct {
            name: self.name.ok_or(FieldError::NameRequired)?,
            category: self.category.ok_or(FieldError::CategoryRequired)?,
            quantity: self.quantity.ok_or(FieldError::InvalidQuantity)?,
            price: self.price.ok_or(FieldError::InvalidPrice)?,
            expiry: self.expiry,
            supplier_email: self.supplier_email,
            description: self.description,
            promotion: self.promotion,
        })
    }
}

/// One form field: its wire name and how to clean it.
pub struct FieldSpec {
    pub name: &'static str,
    clean: fn(&str, &mut Draft) -> Result<(), FieldError>,
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec").field("name", &self.name).finish()
    }
}

/// Every field of the product form, in display order.
pub static FIELDS: [FieldSpec; 8] = [
    FieldSpec {
        name: "name",
        clean: clean_name,
    },
    FieldSpec {
        name: "category",
        clean: clean_category,
    },
    FieldSpec {
        name: "quantity",
        clean: clean_quantity,
    },
    FieldSpec {
        name: "price",
        clean: clean_price,
    },
    FieldSpec {
        name: "expiry",
        clean: clean_expiry,
    },
    FieldSpec {
        name: "supplierEmail",
        clean: clean_supplier_email,
    },
    FieldSpec {
        name: "description",
        clean: clean_description,
    },
    FieldSpec {
        name: "promotion",
        clean: clean_promotion,
    },
];

/// Validate a raw submission.
///
/// # Errors
///
/// Returns [`Rejected`] with one entry per failing field, plus the original
/// raw values, if any field is invalid.
pub fn validate(raw: RawSubmission) -> Result<NewProduct, Rejected> {
    let mut draft = Draft::default();
    let mut errors = FieldErrors::default();

    for spec in &FIELDS {
        if let Err(error) = (spec.clean)(raw.get(spec.name), &mut draft) {
            errors.insert(error);
        }
    }

    if errors.is_empty() {
        match draft.finish() {
            Ok(product) => return Ok(product),
            Err(error) => errors.insert(error),
        }
    }

    Err(Rejected {
        errors,
        values: raw,
    })
}

fn clean_name(raw: &str, draft: &mut Draft) -> Result<(), FieldError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(FieldError::NameRequired);
    }
    draft.name = Some(name.to_string());
    Ok(())
}

fn clean_category(raw: &str, draft: &mut Draft) -> Result<(), FieldError> {
    let category = raw
        .parse::<Category>()
        .map_err(|_| FieldError::CategoryRequired)?;
    draft.category = Some(category);
    Ok(())
}

fn clean_quantity(raw: &str, draft: &mut Draft) -> Result<(), FieldError> {
    draft.quantity = Some(parse_quantity(raw).ok_or(FieldError::InvalidQuantity)?);
    Ok(())
}

/// Whole, non-negative number. `"10.0"` and `"1e2"` count as integers.
fn parse_quantity(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let number = parse_number(trimmed)?;
    if number < Decimal::ZERO || !number.fract().is_zero() {
        return None;
    }
    number.to_u64()
}

fn clean_price(raw: &str, draft: &mut Draft) -> Result<(), FieldError> {
    draft.price = Some(Price::parse(raw).map_err(|_| FieldError::InvalidPrice)?);
    Ok(())
}

fn clean_expiry(raw: &str, draft: &mut Draft) -> Result<(), FieldError> {
    if raw.is_empty() {
        return Ok(());
    }
    if !EXPIRY_SHAPE.is_match(raw) {
        return Err(FieldError::InvalidDate);
    }
    draft.expiry = Some(raw.to_string());
    Ok(())
}

fn clean_supplier_email(raw: &str, draft: &mut Draft) -> Result<(), FieldError> {
    if raw.is_empty() {
        return Ok(());
    }
    draft.supplier_email = Some(Email::parse(raw).map_err(|_| FieldError::InvalidEmail)?);
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // every cleaner shares one signature
fn clean_description(raw: &str, draft: &mut Draft) -> Result<(), FieldError> {
    draft.description = raw.trim().to_string();
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // every cleaner shares one signature
fn clean_promotion(raw: &str, draft: &mut Draft) -> Result<(), FieldError> {
    draft.promotion = raw == "yes";
    Ok(())
}
