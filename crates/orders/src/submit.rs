//! Read-side projections consulted at submit time.

use rust_decimal::Decimal;

use bursar_core::{DomainError, DomainResult};

use crate::line::OrderLineDraft;

/// Gate submission of the draft set.
///
/// Fails if the set is empty, or if any line has an empty/whitespace-only
/// description, a non-positive quantity, or a negative price. The failure is
/// one aggregated signal, not a per-line error list: the existing behavior
/// surfaces a single message and the operator inspects lines manually.
pub fn validate(lines: &[OrderLineDraft]) -> DomainResult<()> {
    if lines.is_empty() {
        return Err(DomainError::validation(
            "purchase order needs at least one line",
        ));
    }

    let all_complete = lines.iter().all(|line| {
        !line.description.trim().is_empty()
            && line.quantity_expected > 0
            && line.unit_price >= Decimal::ZERO
    });

    if !all_complete {
        return Err(DomainError::validation(
            "every line needs a description, a quantity above zero and a non-negative price",
        ));
    }

    Ok(())
}

/// Whether the order is expected to generate warehouse receipt activity.
///
/// True iff at least one line carries a resolved catalog reference; an order
/// of purely custom lines is not inventory-tracked. Recomputed on every read
/// and included verbatim in the submission payload — the operator cannot edit
/// it independently.
pub fn track_to_warehouse(lines: &[OrderLineDraft]) -> bool {
    lines.iter().any(|line| line.item_reference().is_some())
}
