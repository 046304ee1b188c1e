//! The non-line fields of the order under authoring.

use chrono::NaiveDate;

use bursar_client::PaymentPurposeDto;
use bursar_core::PurposeId;

/// A payment-purpose reference value as the session holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentPurpose {
    pub id: PurposeId,
    pub name: String,
}

impl From<PaymentPurposeDto> for PaymentPurpose {
    fn from(dto: PaymentPurposeDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

/// Order header draft, merged into the submission payload as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHeaderDraft {
    pub supplier_name: String,
    pub supplier_contact: String,
    pub purpose_id: Option<PurposeId>,
    pub order_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl OrderHeaderDraft {
    /// Blank header for a new order, dated `order_date`.
    pub fn blank(order_date: NaiveDate) -> Self {
        Self {
            supplier_name: String::new(),
            supplier_contact: String::new(),
            purpose_id: None,
            order_date,
            expected_delivery_date: None,
            notes: None,
        }
    }
}
