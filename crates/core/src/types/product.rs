//! Product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Email, Price};

/// A validated product submission, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Trimmed, never empty.
    pub name: String,
    pub category: Category,
    pub quantity: u64,
    pub price: Price,
    /// `YYYY-MM-DD`-shaped expiry date, if one was given.
    pub expiry: Option<String>,
    pub supplier_email: Option<Email>,
    /// Trimmed free text; may be empty.
    pub description: String,
    pub promotion: bool,
}

/// A product held by the store.
///
/// Records are append-only: once created they are never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub details: NewProduct,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Stamp a validated submission with its insertion time.
    #[must_use]
    pub const fn new(details: NewProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            details,
            created_at,
        }
    }
}
