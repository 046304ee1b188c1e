//! Last-fetched view of the catalog, shared read-only across the session.

use serde::{Deserialize, Serialize};

use bursar_core::{CatalogItemId, CategoryId};

/// One catalog category as of the last fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub id: CategoryId,
    pub name: String,
}

/// One catalog item as of the last fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemSnapshot {
    pub id: CatalogItemId,
    pub name: String,
    pub sku_code: String,
    pub category_id: CategoryId,
}

/// The catalog view an authoring session works against.
///
/// Immutable per fetch: a reload replaces the whole snapshot, and the only
/// incremental mutation is appending an item the session itself just created
/// through the backend. Draft logic never edits existing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    categories: Vec<CategorySnapshot>,
    items: Vec<CatalogItemSnapshot>,
}

impl CatalogSnapshot {
    /// Empty snapshot, used before the first successful load.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(categories: Vec<CategorySnapshot>, items: Vec<CatalogItemSnapshot>) -> Self {
        Self { categories, items }
    }

    pub fn categories(&self) -> &[CategorySnapshot] {
        &self.categories
    }

    pub fn items(&self) -> &[CatalogItemSnapshot] {
        &self.items
    }

    pub fn category(&self, id: CategoryId) -> Option<&CategorySnapshot> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn item(&self, id: CatalogItemId) -> Option<&CatalogItemSnapshot> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Append an item created through the inline "create and assign" flow.
    pub fn append_item(&mut self, item: CatalogItemSnapshot) {
        self.items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_category(name: &str) -> CategorySnapshot {
        CategorySnapshot {
            id: CategoryId::new(),
            name: name.to_string(),
        }
    }

    fn test_item(name: &str, sku: &str, category_id: CategoryId) -> CatalogItemSnapshot {
        CatalogItemSnapshot {
            id: CatalogItemId::new(),
            name: name.to_string(),
            sku_code: sku.to_string(),
            category_id,
        }
    }

    #[test]
    fn lookups_find_loaded_entries() {
        let category = test_category("Stationery");
        let item = test_item("Ruled notebook", "STATIO-000001", category.id);
        let snapshot = CatalogSnapshot::new(vec![category.clone()], vec![item.clone()]);

        assert_eq!(snapshot.category(category.id), Some(&category));
        assert_eq!(snapshot.item(item.id), Some(&item));
        assert_eq!(snapshot.category(CategoryId::new()), None);
    }

    #[test]
    fn append_item_extends_without_touching_existing_entries() {
        let category = test_category("Stationery");
        let first = test_item("Ruled notebook", "STATIO-000001", category.id);
        let mut snapshot = CatalogSnapshot::new(vec![category.clone()], vec![first.clone()]);

        let created = test_item("Whiteboard marker", "STATIO-000002", category.id);
        snapshot.append_item(created.clone());

        assert_eq!(snapshot.items(), &[first, created]);
    }
}
