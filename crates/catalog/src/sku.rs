//! Deterministic product-code allocation for inline-created catalog items.

use crate::snapshot::{CatalogSnapshot, CategorySnapshot};

/// Prefix used when a category name contains no alphanumeric characters.
const FALLBACK_PREFIX: &str = "CAT";

/// Maximum length of a derived prefix.
const MAX_PREFIX_LEN: usize = 6;

/// Width of the zero-padded numeric suffix.
const SUFFIX_WIDTH: usize = 6;

/// Derive the code prefix for a category name.
///
/// Upper-cases the name, strips everything outside `[A-Z0-9]`, and truncates
/// to at most six characters. An empty result falls back to `CAT`.
pub fn prefix_for(category_name: &str) -> String {
    let prefix: String = category_name
        .chars()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .take(MAX_PREFIX_LEN)
        .collect();

    if prefix.is_empty() {
        FALLBACK_PREFIX.to_string()
    } else {
        prefix
    }
}

/// Allocate the next product code for `category` against `snapshot`.
///
/// Scans the snapshot for codes of the exact form `PREFIX-NNNNNN` (six-digit
/// zero-padded suffix) and returns `PREFIX-(max+1)`. Pure: the same snapshot
/// always yields the same code. Uniqueness holds only relative to the given
/// snapshot; concurrent sessions allocating against the same category can
/// collide, and only the backend's own uniqueness constraint would catch it.
pub fn allocate(category: &CategorySnapshot, snapshot: &CatalogSnapshot) -> String {
    let prefix = prefix_for(&category.name);
    let max_suffix = snapshot
        .items()
        .iter()
        .filter_map(|item| suffix_of(&item.sku_code, &prefix))
        .max()
        .unwrap_or(0);

    format!("{prefix}-{:0width$}", max_suffix + 1, width = SUFFIX_WIDTH)
}

/// Parse the numeric suffix of `code` if it matches `PREFIX-NNNNNN` exactly.
fn suffix_of(code: &str, prefix: &str) -> Option<u32> {
    let rest = code.strip_prefix(prefix)?.strip_prefix('-')?;
    if rest.len() != SUFFIX_WIDTH || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::CatalogItemSnapshot;
    use bursar_core::{CatalogItemId, CategoryId};

    fn test_category(name: &str) -> CategorySnapshot {
        CategorySnapshot {
            id: CategoryId::new(),
            name: name.to_string(),
        }
    }

    fn snapshot_with_codes(category: &CategorySnapshot, codes: &[&str]) -> CatalogSnapshot {
        let items = codes
            .iter()
            .map(|code| CatalogItemSnapshot {
                id: CatalogItemId::new(),
                name: format!("Item {code}"),
                sku_code: code.to_string(),
                category_id: category.id,
            })
            .collect();
        CatalogSnapshot::new(vec![category.clone()], items)
    }

    #[test]
    fn prefix_strips_and_truncates() {
        assert_eq!(prefix_for("School Uniforms"), "SCHOOL");
        assert_eq!(prefix_for("lab-equipment 2"), "LABEQU");
        assert_eq!(prefix_for("Art"), "ART");
    }

    #[test]
    fn prefix_falls_back_when_nothing_survives() {
        assert_eq!(prefix_for("!!!"), "CAT");
        assert_eq!(prefix_for(""), "CAT");
        assert_eq!(prefix_for("   "), "CAT");
    }

    #[test]
    fn allocates_one_past_the_maximum_observed_suffix() {
        let category = test_category("School Uniforms");
        let snapshot = snapshot_with_codes(&category, &["SCHOOL-000001", "SCHOOL-000002"]);

        assert_eq!(allocate(&category, &snapshot), "SCHOOL-000003");
    }

    #[test]
    fn first_allocation_for_fallback_prefix() {
        let category = test_category("!!!");
        let snapshot = snapshot_with_codes(&category, &[]);

        assert_eq!(allocate(&category, &snapshot), "CAT-000001");
    }

    #[test]
    fn ignores_codes_that_do_not_match_the_exact_form() {
        let category = test_category("School Uniforms");
        let snapshot = snapshot_with_codes(
            &category,
            &[
                "SCHOOL-000004",
                "SCHOOL-99",          // suffix too short
                "SCHOOL-0000055",     // suffix too long
                "SCHOOLX-000009",     // different prefix
                "SCHOOL-00000A",      // non-numeric suffix
                "ART-000007",         // unrelated prefix
            ],
        );

        assert_eq!(allocate(&category, &snapshot), "SCHOOL-000005");
    }

    #[test]
    fn gaps_do_not_get_refilled() {
        let category = test_category("Art");
        let snapshot = snapshot_with_codes(&category, &["ART-000001", "ART-000009"]);

        assert_eq!(allocate(&category, &snapshot), "ART-000010");
    }

    #[test]
    fn allocation_is_pure_against_an_unchanged_snapshot() {
        let category = test_category("Sports");
        let snapshot = snapshot_with_codes(&category, &["SPORTS-000002"]);

        let first = allocate(&category, &snapshot);
        let second = allocate(&category, &snapshot);
        assert_eq!(first, "SPORTS-000003");
        assert_eq!(first, second);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: derived prefixes are `[A-Z0-9]`, at most 6 chars, never empty.
            #[test]
            fn prefix_is_well_formed(name in "\\PC*") {
                let prefix = prefix_for(&name);
                prop_assert!(!prefix.is_empty());
                prop_assert!(prefix.len() <= 6);
                prop_assert!(prefix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            }

            /// Property: the allocated code parses back to max observed suffix + 1.
            #[test]
            fn allocated_suffix_is_max_plus_one(
                name in "[A-Za-z][A-Za-z0-9 ]{0,20}",
                suffixes in proptest::collection::vec(1u32..999_998, 0..8)
            ) {
                let category = test_category(&name);
                let prefix = prefix_for(&name);
                let codes: Vec<String> = suffixes
                    .iter()
                    .map(|n| format!("{prefix}-{n:06}"))
                    .collect();
                let code_refs: Vec<&str> = codes.iter().map(String::as_str).collect();
                let snapshot = snapshot_with_codes(&category, &code_refs);

                let allocated = allocate(&category, &snapshot);
                let expected = suffixes.iter().copied().max().unwrap_or(0) + 1;
                prop_assert_eq!(allocated, format!("{}-{:06}", prefix, expected));
            }
        }
    }
}
