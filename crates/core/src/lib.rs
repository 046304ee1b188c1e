//! `bursar-core` — shared domain foundation.
//!
//! Typed identifiers and the domain error model used by every other crate in
//! the workspace. Pure types only (no IO, no HTTP).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CatalogItemId, CategoryId, LineId, PurchaseOrderId, PurposeId};
