//! REST collaborator adapter for the procurement backend.
//!
//! Everything the authoring core needs from the backend, behind the
//! [`ProcurementApi`] trait so session logic can be exercised against fakes;
//! [`HttpClient`] is the production `reqwest` implementation decoding the
//! backend's `{success, data}` envelope.

pub mod api;
pub mod error;
pub mod http;
pub mod types;

pub use api::ProcurementApi;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use types::{
    ApiEnvelope, BulkLineDto, BulkUploadResponse, CatalogItemDto, CategoryDto, Created,
    ItemFilter, NewCatalogItem, OrderLinePayload, PaymentPurposeDto, PurchaseOrderDto,
    PurchaseOrderPayload, RowErrorDto,
};
