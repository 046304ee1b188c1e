//! One operator, one order: state, transitions and collaborator wiring.

use bytes::Bytes;
use chrono::Utc;
use rust_decimal::Decimal;

use bursar_catalog::{sku, CatalogItemSnapshot, CatalogSnapshot, CategorySnapshot};
use bursar_client::{
    ClientError, ItemFilter, NewCatalogItem, OrderLinePayload, ProcurementApi, PurchaseOrderDto,
    PurchaseOrderPayload,
};
use bursar_core::{CatalogItemId, DomainError, LineId, PurchaseOrderId, PurposeId};
use bursar_orders::{
    bulk, submit, BulkImportReport, BulkImportResult, LineDraftStore, LinePatch, LineVariant,
    OrderLineDraft, RowError,
};

use crate::error::SessionError;
use crate::header::{OrderHeaderDraft, PaymentPurpose};

/// Externally visible state of the session. There is no partial-submit or
/// multi-step wizard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Editing,
    Submitting,
}

/// Whether submission creates a new order or updates a persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Create,
    Edit(PurchaseOrderId),
}

/// Reference data one reload fetches as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub catalog: CatalogSnapshot,
    pub purposes: Vec<PaymentPurpose>,
}

/// Handle for one issued reference-data request.
///
/// Completions are applied through [`AuthoringSession::apply_reference_reload`],
/// which discards any ticket that is no longer the latest issued one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTicket {
    generation: u64,
}

/// What applying a completion did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The completion was for the latest issued request and took effect.
    Applied,
    /// A newer request was issued after this one; the result was dropped.
    DiscardedStale,
    /// The session ended before the completion arrived; the result was
    /// dropped.
    DiscardedClosed,
}

/// The authoring session for one purchase order.
///
/// A plain owned value: every operation goes through `&mut self`, so two
/// sessions (e.g. two tabs) can never share state, and no mutation can
/// interleave with another within one session.
#[derive(Debug)]
pub struct AuthoringSession {
    mode: SessionMode,
    phase: SessionPhase,
    closed: bool,
    store: LineDraftStore,
    catalog: CatalogSnapshot,
    purposes: Vec<PaymentPurpose>,
    header: OrderHeaderDraft,
    reference_generation: u64,
}

impl AuthoringSession {
    /// Session for a new order: one blank catalog-reference line, header
    /// dated today, empty catalog until the first reload.
    pub fn new() -> Self {
        Self {
            mode: SessionMode::Create,
            phase: SessionPhase::Editing,
            closed: false,
            store: LineDraftStore::new(),
            catalog: CatalogSnapshot::empty(),
            purposes: Vec::new(),
            header: OrderHeaderDraft::blank(Utc::now().date_naive()),
            reference_generation: 0,
        }
    }

    /// Session hydrated from a persisted order (edit mode).
    pub fn hydrate(order: PurchaseOrderDto) -> Self {
        let lines = order.lines.into_iter().map(draft_from_wire).collect();
        Self {
            mode: SessionMode::Edit(order.id),
            phase: SessionPhase::Editing,
            closed: false,
            store: LineDraftStore::hydrate(lines),
            catalog: CatalogSnapshot::empty(),
            purposes: Vec::new(),
            header: OrderHeaderDraft {
                supplier_name: order.supplier_name,
                supplier_contact: order.supplier_contact,
                purpose_id: order.purpose_id,
                order_date: order.order_date,
                expected_delivery_date: order.expected_delivery_date,
                notes: order.notes,
            },
            reference_generation: 0,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn store(&self) -> &LineDraftStore {
        &self.store
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn purposes(&self) -> &[PaymentPurpose] {
        &self.purposes
    }

    pub fn header(&self) -> &OrderHeaderDraft {
        &self.header
    }

    /// Track-to-warehouse as it would be submitted right now.
    pub fn track_to_warehouse(&self) -> bool {
        submit::track_to_warehouse(self.store.lines())
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        Ok(())
    }

    fn ensure_editing(&self) -> Result<(), SessionError> {
        self.ensure_open()?;
        if self.phase != SessionPhase::Editing {
            return Err(DomainError::invariant("a submission is already in flight").into());
        }
        Ok(())
    }

    // ----- draft line editing -------------------------------------------

    pub fn add_line(&mut self, variant: LineVariant) -> Result<LineId, SessionError> {
        self.ensure_editing()?;
        Ok(self.store.add_line(variant))
    }

    pub fn update_line(&mut self, id: LineId, patch: LinePatch) -> Result<(), SessionError> {
        self.ensure_editing()?;
        self.store.update_line(id, patch)?;
        Ok(())
    }

    pub fn remove_line(&mut self, id: LineId) -> Result<(), SessionError> {
        self.ensure_editing()?;
        self.store.remove_line(id);
        Ok(())
    }

    /// Mutable access to the header draft, gated on the editing phase.
    pub fn edit_header(&mut self) -> Result<&mut OrderHeaderDraft, SessionError> {
        self.ensure_editing()?;
        Ok(&mut self.header)
    }

    // ----- reference data ------------------------------------------------

    /// Issue a reference-data request; any previously issued ticket becomes
    /// stale immediately.
    pub fn begin_reference_reload(&mut self) -> ReloadTicket {
        self.reference_generation += 1;
        ReloadTicket {
            generation: self.reference_generation,
        }
    }

    /// Apply one completed reference-data request.
    ///
    /// Last *issued* wins: a completion whose ticket is not the latest issued
    /// one is dropped no matter when it lands, and nothing is applied after
    /// the session ends. A failed completion of the latest request surfaces
    /// as [`SessionError::ReferenceDataLoad`] and leaves the previously
    /// loaded data in place (degraded mode).
    pub fn apply_reference_reload(
        &mut self,
        ticket: ReloadTicket,
        result: Result<ReferenceData, ClientError>,
    ) -> Result<ApplyOutcome, SessionError> {
        if self.closed {
            tracing::debug!("reference reload completed after session end; dropped");
            return Ok(ApplyOutcome::DiscardedClosed);
        }
        if ticket.generation != self.reference_generation {
            tracing::debug!(
                issued = ticket.generation,
                latest = self.reference_generation,
                "stale reference reload dropped"
            );
            return Ok(ApplyOutcome::DiscardedStale);
        }

        match result {
            Ok(data) => {
                self.catalog = data.catalog;
                self.purposes = data.purposes;
                tracing::debug!(
                    categories = self.catalog.categories().len(),
                    items = self.catalog.items().len(),
                    purposes = self.purposes.len(),
                    "reference data reloaded"
                );
                Ok(ApplyOutcome::Applied)
            }
            Err(err) => Err(SessionError::ReferenceDataLoad(err)),
        }
    }

    /// Issue, await and apply one reference-data reload.
    pub async fn reload_reference_data<A: ProcurementApi>(
        &mut self,
        api: &A,
    ) -> Result<ApplyOutcome, SessionError> {
        let ticket = self.begin_reference_reload();
        let result = fetch_reference_data(api).await;
        self.apply_reference_reload(ticket, result)
    }

    /// Create a payment purpose and append it to the loaded reference values.
    pub async fn create_payment_purpose<A: ProcurementApi>(
        &mut self,
        api: &A,
        name: &str,
    ) -> Result<PurposeId, SessionError> {
        self.ensure_editing()?;
        let created = api
            .create_payment_purpose(name)
            .await
            .map_err(SessionError::Persistence)?;
        let purpose = PaymentPurpose::from(created);
        let id = purpose.id;
        self.purposes.push(purpose);
        Ok(id)
    }

    // ----- inline item creation -----------------------------------------

    /// Resolve a `NewItem` line: allocate a code from the current snapshot,
    /// create the item through the backend, append it to the snapshot and
    /// mark the line resolved.
    pub async fn resolve_new_item<A: ProcurementApi>(
        &mut self,
        api: &A,
        line_id: LineId,
    ) -> Result<CatalogItemId, SessionError> {
        self.ensure_editing()?;

        let line = self
            .store
            .get(line_id)
            .ok_or_else(|| DomainError::unknown_line(line_id))?;
        let (pending_name, pending_category_id) = match &line.variant {
            LineVariant::NewItem {
                resolved_item_id: Some(_),
                ..
            } => {
                return Err(DomainError::invariant("new-item line is already resolved").into());
            }
            LineVariant::NewItem {
                pending_name,
                pending_category_id,
                ..
            } => (pending_name.clone(), *pending_category_id),
            _ => return Err(DomainError::invariant("line is not a new-item draft").into()),
        };

        let name = pending_name.trim().to_string();
        if name.is_empty() {
            return Err(SessionError::Validation("new item needs a name".to_string()));
        }
        let category_id = pending_category_id
            .ok_or_else(|| SessionError::Validation("new item needs a category".to_string()))?;
        let category = self.catalog.category(category_id).ok_or_else(|| {
            SessionError::Validation("new item references an unknown category".to_string())
        })?;

        let sku_code = sku::allocate(category, &self.catalog);
        let request = NewCatalogItem {
            name: name.clone(),
            sku_code: sku_code.clone(),
            category_id,
        };
        let item_id = api
            .create_catalog_item(&request)
            .await
            .map_err(SessionError::Persistence)?;

        self.catalog.append_item(CatalogItemSnapshot {
            id: item_id,
            name,
            sku_code: sku_code.clone(),
            category_id,
        });
        self.store.update_line(
            line_id,
            LinePatch {
                variant: Some(LineVariant::NewItem {
                    pending_name,
                    pending_category_id: Some(category_id),
                    resolved_item_id: Some(item_id),
                }),
                ..LinePatch::default()
            },
        )?;
        tracing::info!(item = %item_id, code = %sku_code, "inline catalog item created");

        Ok(item_id)
    }

    // ----- bulk import ---------------------------------------------------

    /// Upload a file of candidate lines and merge the parsed result.
    ///
    /// A total failure surfaces one generic error and performs no mutation;
    /// a structured result goes through the merge policy of
    /// [`bursar_orders::bulk`].
    pub async fn import_lines<A: ProcurementApi>(
        &mut self,
        api: &A,
        file_name: &str,
        contents: Bytes,
    ) -> Result<BulkImportReport, SessionError> {
        self.ensure_editing()?;

        let response = api
            .upload_order_lines(file_name, contents)
            .await
            .map_err(SessionError::BulkImport)?;

        let result = BulkImportResult {
            lines: response
                .lines
                .into_iter()
                .map(|line| {
                    draft_with(
                        line.item_id,
                        line.description,
                        line.quantity_expected,
                        line.unit_price,
                    )
                })
                .collect(),
            row_errors: response
                .errors
                .into_iter()
                .map(|e| RowError {
                    row_number: e.row,
                    message: e.message,
                })
                .collect(),
        };

        let report = bulk::apply(&mut self.store, result);
        tracing::info!(
            imported = report.imported(),
            row_errors = report.row_errors().len(),
            "bulk import merged"
        );
        Ok(report)
    }

    // ----- submission ----------------------------------------------------

    /// Attempt submission.
    ///
    /// Enters `Submitting`; validation or persistence failure returns to
    /// `Editing` with all draft state preserved verbatim, success ends the
    /// session.
    pub async fn submit<A: ProcurementApi>(
        &mut self,
        api: &A,
    ) -> Result<PurchaseOrderId, SessionError> {
        self.ensure_editing()?;
        self.phase = SessionPhase::Submitting;

        if let Err(err) = submit::validate(self.store.lines()) {
            self.phase = SessionPhase::Editing;
            return Err(match err {
                DomainError::Validation(msg) => SessionError::Validation(msg),
                other => other.into(),
            });
        }

        let payload = self.build_payload();
        let outcome = match self.mode {
            SessionMode::Create => api.create_purchase_order(&payload).await,
            SessionMode::Edit(id) => api.update_purchase_order(id, &payload).await.map(|_| id),
        };

        match outcome {
            Ok(id) => {
                self.closed = true;
                tracing::info!(order = %id, "purchase order saved");
                Ok(id)
            }
            Err(err) => {
                self.phase = SessionPhase::Editing;
                Err(SessionError::Persistence(err))
            }
        }
    }

    /// End the session without submitting. Later completions of in-flight
    /// requests are dropped; the network calls themselves are not cancelled.
    pub fn abandon(&mut self) {
        self.closed = true;
        tracing::debug!("authoring session abandoned");
    }

    fn build_payload(&self) -> PurchaseOrderPayload {
        PurchaseOrderPayload {
            supplier_name: self.header.supplier_name.clone(),
            supplier_contact: self.header.supplier_contact.clone(),
            purpose_id: self.header.purpose_id,
            order_date: self.header.order_date,
            expected_delivery_date: self.header.expected_delivery_date,
            track_to_warehouse: submit::track_to_warehouse(self.store.lines()),
            notes: self.header.notes.clone(),
            lines: self.store.lines().iter().map(wire_from_draft).collect(),
        }
    }
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a persisted/parsed wire line to a draft. A present item reference
/// hydrates as a picked `Inventory` line; anything else is `Custom`.
fn draft_from_wire(line: OrderLinePayload) -> OrderLineDraft {
    draft_with(
        line.item_id,
        line.description,
        line.quantity_expected,
        line.unit_price,
    )
}

fn draft_with(
    item_id: Option<CatalogItemId>,
    description: String,
    quantity_expected: i64,
    unit_price: Decimal,
) -> OrderLineDraft {
    let variant = match item_id {
        Some(item_id) => LineVariant::Inventory {
            item_id: Some(item_id),
        },
        None => LineVariant::Custom,
    };
    let mut draft = OrderLineDraft::new(variant);
    draft.description = description;
    draft.quantity_expected = quantity_expected;
    draft.unit_price = unit_price;
    draft
}

fn wire_from_draft(line: &OrderLineDraft) -> OrderLinePayload {
    OrderLinePayload {
        item_id: line.item_reference(),
        description: line.description.clone(),
        quantity_expected: line.quantity_expected,
        unit_price: line.unit_price,
    }
}

async fn fetch_reference_data<A: ProcurementApi>(api: &A) -> Result<ReferenceData, ClientError> {
    let categories = api.list_categories().await?;
    let items = api
        .list_catalog_items(&ItemFilter {
            active: Some(true),
            ..ItemFilter::default()
        })
        .await?;
    let purposes = api.list_payment_purposes().await?;

    Ok(ReferenceData {
        catalog: CatalogSnapshot::new(
            categories
                .into_iter()
                .map(|c| CategorySnapshot {
                    id: c.id,
                    name: c.name,
                })
                .collect(),
            items
                .into_iter()
                .map(|i| CatalogItemSnapshot {
                    id: i.id,
                    name: i.name,
                    sku_code: i.sku_code,
                    category_id: i.category_id,
                })
                .collect(),
        ),
        purposes: purposes.into_iter().map(PaymentPurpose::from).collect(),
    })
}
