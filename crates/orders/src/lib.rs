//! Purchase-order line authoring domain.
//!
//! This crate contains the draft-line model and every pure operation over it:
//! the ordered draft store, the bulk-import merge policy, the submission
//! validator and the track-to-warehouse deriver. No IO, no HTTP, no storage —
//! asynchronous wiring lives in `bursar-session`.

pub mod bulk;
pub mod line;
pub mod store;
pub mod submit;

pub use bulk::{BulkImportReport, BulkImportResult, RowError, ROW_ERROR_DISPLAY_CAP};
pub use line::{LinePatch, LineVariant, OrderLineDraft};
pub use store::LineDraftStore;
pub use submit::{track_to_warehouse, validate};
