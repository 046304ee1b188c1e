//! Ordered collection of draft lines — the unit of mutation for a session.

use bursar_core::{DomainError, DomainResult, LineId};

use crate::line::{LinePatch, LineVariant, OrderLineDraft};

/// The draft set of one authoring session.
///
/// A plain owned value handed to every operation by reference, never a
/// module-level singleton, so concurrent sessions (e.g. browser tabs) cannot
/// cross-contaminate.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDraftStore {
    lines: Vec<OrderLineDraft>,
}

impl LineDraftStore {
    /// Store for a new order: one blank catalog-reference line.
    pub fn new() -> Self {
        Self {
            lines: vec![OrderLineDraft::new(LineVariant::inventory())],
        }
    }

    /// Store hydrated from a persisted order's lines (edit mode).
    pub fn hydrate(lines: Vec<OrderLineDraft>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[OrderLineDraft] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, id: LineId) -> Option<&OrderLineDraft> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Append a new draft with variant-appropriate defaults; returns its id.
    pub fn add_line(&mut self, variant: LineVariant) -> LineId {
        let draft = OrderLineDraft::new(variant);
        let id = draft.id;
        self.lines.push(draft);
        id
    }

    /// Merge `patch` into the matching draft.
    ///
    /// An absent id is a programming error ([`DomainError::UnknownLine`]),
    /// not a user-facing condition: callers hold the ids they created.
    pub fn update_line(&mut self, id: LineId, patch: LinePatch) -> DomainResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or_else(|| DomainError::unknown_line(id))?;
        patch.apply_to(line);
        Ok(())
    }

    /// Remove the matching draft. Removing an absent id is a no-op.
    pub fn remove_line(&mut self, id: LineId) {
        self.lines.retain(|line| line.id != id);
    }

    /// Atomically swap the entire ordered set.
    ///
    /// The only operation bulk import uses, so a merge can never leave the
    /// store in a partial-list state.
    pub fn replace_all(&mut self, lines: Vec<OrderLineDraft>) {
        self.lines = lines;
    }
}

impl Default for LineDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_store_starts_with_one_blank_inventory_line() {
        let store = LineDraftStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.lines()[0].variant, LineVariant::inventory());
        assert_eq!(store.lines()[0].quantity_expected, 1);
    }

    #[test]
    fn add_line_appends_and_returns_a_live_id() {
        let mut store = LineDraftStore::new();
        let id = store.add_line(LineVariant::custom());

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(id).map(|l| &l.variant), Some(&LineVariant::Custom));
    }

    #[test]
    fn update_line_merges_partial_fields() {
        let mut store = LineDraftStore::new();
        let id = store.add_line(LineVariant::custom());

        store
            .update_line(
                id,
                LinePatch {
                    description: Some("Sports day medals".to_string()),
                    quantity_expected: Some(40),
                    ..LinePatch::default()
                },
            )
            .unwrap();

        let line = store.get(id).unwrap();
        assert_eq!(line.description, "Sports day medals");
        assert_eq!(line.quantity_expected, 40);
        assert_eq!(line.unit_price, dec!(0));
    }

    #[test]
    fn update_line_rejects_unknown_ids() {
        let mut store = LineDraftStore::new();
        let err = store
            .update_line(LineId::new(), LinePatch::default())
            .unwrap_err();
        match err {
            DomainError::UnknownLine(_) => {}
            _ => panic!("Expected UnknownLine error"),
        }
    }

    #[test]
    fn remove_line_is_a_no_op_for_absent_ids() {
        let mut store = LineDraftStore::new();
        let before = store.clone();

        store.remove_line(LineId::new());
        assert_eq!(store, before);
    }

    #[test]
    fn remove_line_drops_only_the_matching_draft() {
        let mut store = LineDraftStore::new();
        let keep = store.add_line(LineVariant::custom());
        let drop = store.add_line(LineVariant::new_item());

        store.remove_line(drop);

        assert_eq!(store.len(), 2);
        assert!(store.get(keep).is_some());
        assert!(store.get(drop).is_none());
    }

    #[test]
    fn replace_all_swaps_the_whole_ordered_set() {
        let mut store = LineDraftStore::new();
        store.add_line(LineVariant::custom());

        let replacement = vec![
            OrderLineDraft::new(LineVariant::custom()),
            OrderLineDraft::new(LineVariant::inventory()),
        ];
        store.replace_all(replacement.clone());

        assert_eq!(store.lines(), replacement.as_slice());
    }

    #[test]
    fn hydrated_store_keeps_the_given_order() {
        let first = OrderLineDraft::new(LineVariant::custom());
        let second = OrderLineDraft::new(LineVariant::inventory());
        let store = LineDraftStore::hydrate(vec![first.clone(), second.clone()]);

        assert_eq!(store.lines(), &[first, second]);
    }
}
