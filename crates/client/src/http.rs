//! HTTP implementation of the collaborator seam.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use bursar_core::{CatalogItemId, PurchaseOrderId};

use crate::api::ProcurementApi;
use crate::error::{ClientError, ClientResult};
use crate::types::{
    ApiEnvelope, BulkUploadResponse, CatalogItemDto, CategoryDto, Created, ItemFilter,
    NewCatalogItem, PaymentPurposeDto, PurchaseOrderDto, PurchaseOrderPayload,
};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `reqwest`-backed client for the procurement backend.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a client against `base_url`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Set the bearer token attached to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_enveloped<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path))).query(query);
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn post_enveloped<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path))).json(body);
        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Map a non-success status to its error class.
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::BadRequest(text),
            _ => ClientError::Internal(text),
        })
    }

    /// Unwrap the `{success, data}` envelope.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let envelope: ApiEnvelope<T> = response.json().await?;

        if !envelope.success {
            return Err(ClientError::Rejected);
        }
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("missing data field".to_string()))
    }

    /// Like [`Self::decode`], for endpoints whose success carries no data.
    async fn decode_ack(response: reqwest::Response) -> ClientResult<()> {
        let response = Self::check_status(response).await?;
        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;

        if !envelope.success {
            return Err(ClientError::Rejected);
        }
        Ok(())
    }
}

#[async_trait]
impl ProcurementApi for HttpClient {
    async fn list_categories(&self) -> ClientResult<Vec<CategoryDto>> {
        self.get_enveloped("/api/categories", &[]).await
    }

    async fn list_catalog_items(&self, filter: &ItemFilter) -> ClientResult<Vec<CatalogItemDto>> {
        self.get_enveloped("/api/catalog/items", &filter.query())
            .await
    }

    async fn list_payment_purposes(&self) -> ClientResult<Vec<PaymentPurposeDto>> {
        self.get_enveloped("/api/payment-purposes", &[]).await
    }

    async fn create_payment_purpose(&self, name: &str) -> ClientResult<PaymentPurposeDto> {
        let body = serde_json::json!({ "name": name });
        self.post_enveloped("/api/payment-purposes", &body).await
    }

    async fn get_purchase_order(&self, id: PurchaseOrderId) -> ClientResult<PurchaseOrderDto> {
        self.get_enveloped(&format!("/api/purchase-orders/{id}"), &[])
            .await
    }

    async fn create_purchase_order(
        &self,
        payload: &PurchaseOrderPayload,
    ) -> ClientResult<PurchaseOrderId> {
        let created: Created<PurchaseOrderId> =
            self.post_enveloped("/api/purchase-orders", payload).await?;
        Ok(created.id)
    }

    async fn update_purchase_order(
        &self,
        id: PurchaseOrderId,
        payload: &PurchaseOrderPayload,
    ) -> ClientResult<()> {
        let request = self
            .authorize(self.client.put(self.url(&format!("/api/purchase-orders/{id}"))))
            .json(payload);
        let response = request.send().await?;
        Self::decode_ack(response).await
    }

    async fn create_catalog_item(&self, item: &NewCatalogItem) -> ClientResult<CatalogItemId> {
        let created: Created<CatalogItemId> =
            self.post_enveloped("/api/catalog/items", item).await?;
        Ok(created.id)
    }

    async fn download_line_template(&self) -> ClientResult<Bytes> {
        let request = self.authorize(
            self.client
                .get(self.url("/api/purchase-orders/line-template")),
        );
        let response = Self::check_status(request.send().await?).await?;
        Ok(response.bytes().await?)
    }

    async fn upload_order_lines(
        &self,
        file_name: &str,
        contents: Bytes,
    ) -> ClientResult<BulkUploadResponse> {
        let part = Part::bytes(contents.to_vec()).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let request = self
            .authorize(self.client.post(self.url("/api/purchase-orders/line-imports")))
            .multipart(form);
        let response = request.send().await?;
        Self::decode(response).await
    }
}
