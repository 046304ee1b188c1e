//! Merge policy for backend-parsed bulk uploads.
//!
//! Parsing happens entirely on the backend; this module only decides what a
//! structured parse result does to the draft store and how its row
//! diagnostics are surfaced.

use serde::{Deserialize, Serialize};

use crate::line::OrderLineDraft;
use crate::store::LineDraftStore;

/// Maximum number of row errors rendered inline; the rest are summarized.
pub const ROW_ERROR_DISPLAY_CAP: usize = 5;

/// One per-row diagnostic from the backend parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row_number: u32,
    pub message: String,
}

/// The structured result of a backend parse, already mapped to draft lines.
///
/// The two lists are independent: a row may produce an error without
/// contributing a line, and vice versa, per the parser's own policy.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkImportResult {
    pub lines: Vec<OrderLineDraft>,
    pub row_errors: Vec<RowError>,
}

/// What a merge did, plus the full diagnostic set for downstream consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkImportReport {
    imported: usize,
    row_errors: Vec<RowError>,
}

impl BulkImportReport {
    /// Number of resolved lines that replaced the draft set (0 = untouched).
    pub fn imported(&self) -> usize {
        self.imported
    }

    /// Whether the merge replaced the draft set.
    pub fn replaced_draft_set(&self) -> bool {
        self.imported > 0
    }

    /// Every row error, uncapped.
    pub fn row_errors(&self) -> &[RowError] {
        &self.row_errors
    }

    /// The errors to render inline (first [`ROW_ERROR_DISPLAY_CAP`]).
    pub fn displayed_errors(&self) -> &[RowError] {
        let cap = self.row_errors.len().min(ROW_ERROR_DISPLAY_CAP);
        &self.row_errors[..cap]
    }

    /// How many errors the rendered list elides.
    pub fn hidden_error_count(&self) -> usize {
        self.row_errors.len().saturating_sub(ROW_ERROR_DISPLAY_CAP)
    }
}

/// Merge a structured parse result into the store.
///
/// A non-empty line set replaces the whole draft set (destructive to whatever
/// the operator had entered); an empty one leaves the store untouched and
/// only surfaces the row errors. A total upload failure never reaches this
/// function — the caller surfaces one generic error and performs no mutation.
pub fn apply(store: &mut LineDraftStore, result: BulkImportResult) -> BulkImportReport {
    let imported = result.lines.len();
    if imported > 0 {
        store.replace_all(result.lines);
    }

    BulkImportReport {
        imported,
        row_errors: result.row_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineVariant;

    fn row_error(row_number: u32, message: &str) -> RowError {
        RowError {
            row_number,
            message: message.to_string(),
        }
    }

    fn resolved_lines(count: usize) -> Vec<OrderLineDraft> {
        (0..count)
            .map(|i| {
                let mut line = OrderLineDraft::new(LineVariant::custom());
                line.description = format!("Imported line {i}");
                line
            })
            .collect()
    }

    #[test]
    fn non_empty_result_replaces_the_draft_set() {
        let mut store = LineDraftStore::new();
        store.add_line(LineVariant::custom());
        let lines = resolved_lines(2);

        let report = apply(
            &mut store,
            BulkImportResult {
                lines: lines.clone(),
                row_errors: Vec::new(),
            },
        );

        assert!(report.replaced_draft_set());
        assert_eq!(report.imported(), 2);
        assert_eq!(store.lines(), lines.as_slice());
    }

    #[test]
    fn empty_result_leaves_the_draft_set_untouched() {
        let mut store = LineDraftStore::new();
        store.add_line(LineVariant::custom());
        let before = store.clone();

        let report = apply(
            &mut store,
            BulkImportResult {
                lines: Vec::new(),
                row_errors: vec![row_error(3, "unknown item code")],
            },
        );

        assert!(!report.replaced_draft_set());
        assert_eq!(store, before);
        assert_eq!(report.row_errors().len(), 1);
    }

    #[test]
    fn report_caps_rendered_errors_and_counts_the_rest() {
        let mut store = LineDraftStore::new();
        let errors: Vec<RowError> = (1..=7)
            .map(|row| row_error(row, &format!("row {row} is bad")))
            .collect();

        let report = apply(
            &mut store,
            BulkImportResult {
                lines: resolved_lines(2),
                row_errors: errors.clone(),
            },
        );

        assert_eq!(store.len(), 2);
        assert_eq!(report.displayed_errors(), &errors[..5]);
        assert_eq!(report.hidden_error_count(), 2);
        // The full set stays available for downstream consumers.
        assert_eq!(report.row_errors(), errors.as_slice());
    }

    #[test]
    fn report_under_the_cap_hides_nothing() {
        let mut store = LineDraftStore::new();
        let errors = vec![row_error(1, "bad quantity"), row_error(2, "bad price")];

        let report = apply(
            &mut store,
            BulkImportResult {
                lines: Vec::new(),
                row_errors: errors.clone(),
            },
        );

        assert_eq!(report.displayed_errors(), errors.as_slice());
        assert_eq!(report.hidden_error_count(), 0);
    }
}
