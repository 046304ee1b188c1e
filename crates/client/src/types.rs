//! Wire types for the procurement backend (camelCase JSON).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bursar_core::{CatalogItemId, CategoryId, PurchaseOrderId, PurposeId};

/// The `{success, data}` envelope the backend wraps every JSON response in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: CategoryId,
    pub name: String,
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemDto {
    pub id: CatalogItemId,
    pub name: String,
    pub sku_code: String,
    pub category_id: CategoryId,
}

/// Query filter for the catalog item listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub item_type: Option<String>,
    pub active: Option<bool>,
}

impl ItemFilter {
    /// Query-string pairs in the backend's parameter names.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(item_type) = &self.item_type {
            pairs.push(("type", item_type.clone()));
        }
        if let Some(active) = self.active {
            pairs.push(("active", active.to_string()));
        }
        pairs
    }
}

/// A payment-purpose reference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPurposeDto {
    pub id: PurposeId,
    pub name: String,
}

/// Request body for creating a catalog item inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogItem {
    pub name: String,
    pub sku_code: String,
    pub category_id: CategoryId,
}

/// `{id}` payload returned by creation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created<Id> {
    pub id: Id,
}

/// One order line on the wire, in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    pub item_id: Option<CatalogItemId>,
    pub description: String,
    pub quantity_expected: i64,
    pub unit_price: Decimal,
}

/// Create/update body for a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderPayload {
    pub supplier_name: String,
    pub supplier_contact: String,
    pub purpose_id: Option<PurposeId>,
    pub order_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub track_to_warehouse: bool,
    pub notes: Option<String>,
    pub lines: Vec<OrderLinePayload>,
}

/// A persisted purchase order, fetched for edit-mode hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDto {
    pub id: PurchaseOrderId,
    pub supplier_name: String,
    pub supplier_contact: String,
    pub purpose_id: Option<PurposeId>,
    pub order_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub track_to_warehouse: bool,
    pub notes: Option<String>,
    pub lines: Vec<OrderLinePayload>,
}

/// One row diagnostic from the bulk parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowErrorDto {
    pub row: u32,
    pub message: String,
}

/// A resolved-line candidate from the bulk parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkLineDto {
    pub item_id: Option<CatalogItemId>,
    pub description: String,
    pub quantity_expected: i64,
    pub unit_price: Decimal,
}

/// The bulk parser's structured result. The two lists are independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUploadResponse {
    #[serde(default)]
    pub lines: Vec<BulkLineDto>,
    #[serde(default)]
    pub errors: Vec<RowErrorDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn envelope_tolerates_a_missing_data_field() {
        let envelope: ApiEnvelope<CategoryDto> =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn order_payload_serializes_camel_case() {
        let payload = PurchaseOrderPayload {
            supplier_name: "Springfield Supplies".to_string(),
            supplier_contact: "orders@springfield.example".to_string(),
            purpose_id: None,
            order_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            expected_delivery_date: None,
            track_to_warehouse: true,
            notes: None,
            lines: vec![OrderLinePayload {
                item_id: None,
                description: "Whiteboard markers".to_string(),
                quantity_expected: 12,
                unit_price: dec!(1.80),
            }],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["supplierName"], "Springfield Supplies");
        assert_eq!(json["trackToWarehouse"], true);
        assert_eq!(json["lines"][0]["quantityExpected"], 12);
        assert_eq!(json["lines"][0]["itemId"], serde_json::Value::Null);
    }

    #[test]
    fn bulk_response_defaults_missing_lists() {
        let response: BulkUploadResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.lines.is_empty());
        assert!(response.errors.is_empty());
    }

    #[test]
    fn item_filter_query_only_carries_set_fields() {
        assert!(ItemFilter::default().query().is_empty());

        let filter = ItemFilter {
            item_type: Some("consumable".to_string()),
            active: Some(true),
        };
        assert_eq!(
            filter.query(),
            vec![("type", "consumable".to_string()), ("active", "true".to_string())]
        );
    }
}
