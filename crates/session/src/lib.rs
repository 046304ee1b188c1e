//! The purchase-order authoring session.
//!
//! Owns the draft store, the catalog snapshot and the order header for one
//! operator working on one order, wires them to the REST collaborator, and
//! enforces the Editing/Submitting state machine and last-issued-wins
//! handling of asynchronous completions.

pub mod error;
pub mod header;
pub mod session;

pub use error::SessionError;
pub use header::{OrderHeaderDraft, PaymentPurpose};
pub use session::{
    ApplyOutcome, AuthoringSession, ReferenceData, ReloadTicket, SessionMode, SessionPhase,
};
