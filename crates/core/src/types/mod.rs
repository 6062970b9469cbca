//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for the product catalogue.

pub mod category;
pub mod email;
pub mod price;
pub mod product;

pub use category::{Category, CategoryError};
pub use email::{Email, EmailError};
pub use price::{Price, PriceError};
pub(crate) use price::parse_number;
pub use product::{NewProduct, Product};
