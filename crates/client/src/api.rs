//! The collaborator seam the session layer is written against.

use async_trait::async_trait;
use bytes::Bytes;

use bursar_core::{CatalogItemId, PurchaseOrderId};

use crate::error::ClientResult;
use crate::types::{
    BulkUploadResponse, CatalogItemDto, CategoryDto, ItemFilter, NewCatalogItem,
    PaymentPurposeDto, PurchaseOrderDto, PurchaseOrderPayload,
};

/// Everything the authoring core asks of the procurement backend.
///
/// Implemented by [`crate::HttpClient`] in production and by in-memory fakes
/// in session tests.
#[async_trait]
pub trait ProcurementApi: Send + Sync {
    async fn list_categories(&self) -> ClientResult<Vec<CategoryDto>>;

    async fn list_catalog_items(&self, filter: &ItemFilter) -> ClientResult<Vec<CatalogItemDto>>;

    async fn list_payment_purposes(&self) -> ClientResult<Vec<PaymentPurposeDto>>;

    async fn create_payment_purpose(&self, name: &str) -> ClientResult<PaymentPurposeDto>;

    async fn get_purchase_order(&self, id: PurchaseOrderId) -> ClientResult<PurchaseOrderDto>;

    async fn create_purchase_order(
        &self,
        payload: &PurchaseOrderPayload,
    ) -> ClientResult<PurchaseOrderId>;

    async fn update_purchase_order(
        &self,
        id: PurchaseOrderId,
        payload: &PurchaseOrderPayload,
    ) -> ClientResult<()>;

    async fn create_catalog_item(&self, item: &NewCatalogItem) -> ClientResult<CatalogItemId>;

    /// Opaque CSV template passthrough; the core never parses it.
    async fn download_line_template(&self) -> ClientResult<Bytes>;

    /// Hand an uploaded file to the backend parser.
    async fn upload_order_lines(
        &self,
        file_name: &str,
        contents: Bytes,
    ) -> ClientResult<BulkUploadResponse>;
}
