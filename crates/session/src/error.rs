//! Session-level error taxonomy.
//!
//! Every failure class an authoring session can surface has exactly one
//! variant here; nothing is swallowed, and nothing retries on its own.

use thiserror::Error;

use bursar_client::ClientError;
use bursar_core::DomainError;

/// Failure surfaced by an authoring-session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Client-detected, blocks submission, recovered locally; never sent to
    /// the backend.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Failed fetch of categories/items/purposes. The form stays usable in a
    /// degraded mode: pickers keep whatever was last successfully loaded.
    #[error("failed to load reference data: {0}")]
    ReferenceDataLoad(#[source] ClientError),

    /// Total bulk-import failure (no structured result). Deliberately one
    /// generic message; the draft set is untouched. Row-level diagnostics of
    /// a partial success travel in the report, not here.
    #[error("bulk import failed")]
    BulkImport(#[source] ClientError),

    /// The backend rejected a create/update. All entered draft state is
    /// preserved verbatim so the operator can retry.
    #[error("failed to save purchase order: {0}")]
    Persistence(#[source] ClientError),

    /// Programming-error class bubbled up from the domain layer.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The session ended (submitted or abandoned); the operation was dropped.
    #[error("authoring session has ended")]
    Closed,
}
