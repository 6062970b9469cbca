//! Stockroom Core - Domain types and validation.
//!
//! This crate provides the product catalogue model shared by the web server
//! and its tests:
//! - [`types`] - Newtype wrappers for categories, prices, supplier emails and
//!   stored product records
//! - [`validation`] - Turns a raw form submission into a [`NewProduct`] or a
//!   per-field error map
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no storage. This keeps validation trivially testable.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{FieldError, FieldErrors, RawSubmission, Rejected, validate};
