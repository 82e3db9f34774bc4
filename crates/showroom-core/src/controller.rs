// ── Resource controller ──
//
// One controller per admin screen, generic over the resource type.
// Owns the cached list, the operation state, the error banner, the edit
// form and the delete gate. The backend is the only source of truth:
// every mutation is followed by a full reload, never a local merge.
// Every fetch is numbered; a response that resolves after a newer one
// was applied is discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use showroom_api::ResourceClient;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{CoreError, ErrorKind};
use crate::gate::DeleteGate;
use crate::model::EntityId;
use crate::resource::{Draft, Resource, StatusResource};
use crate::store::{ResourceCollection, Snapshot};
use crate::stream::ListSubscription;

// ── Observable state ─────────────────────────────────────────────

/// Which mutation a `Submitting` state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Create,
    Update,
}

/// Operation state observable by consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationState {
    #[default]
    Idle,
    Listing,
    Submitting(SubmitKind),
    Deleting,
}

/// Result of a controller action. Errors never escape as `Err`: they
/// land in the banner and are summarized here by kind.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Dropped because another mutation was in flight, nothing to do, or
    /// a newer list load had already been applied.
    Skipped,
    Failed(ErrorKind),
}

impl Outcome {
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Dismissible error message shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&CoreError> for Banner {
    fn from(err: &CoreError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Create/edit form backing the modal of an admin screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormState<D> {
    #[default]
    Closed,
    Creating {
        draft: D,
    },
    Editing {
        id: EntityId,
        draft: D,
    },
}

impl<D> FormState<D> {
    pub fn draft(&self) -> Option<&D> {
        match self {
            Self::Closed => None,
            Self::Creating { draft } | Self::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

// ── ResourceController ───────────────────────────────────────────

/// CRUD controller for one resource list.
///
/// Cheaply cloneable via `Arc`. At most one mutating operation runs at
/// a time; a second one requested meanwhile returns
/// [`Outcome::Skipped`] without touching the network.
pub struct ResourceController<R: Resource> {
    inner: Arc<ControllerInner<R>>,
}

impl<R: Resource> Clone for ResourceController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<R: Resource> {
    client: ResourceClient,
    items: ResourceCollection<R>,
    query: watch::Sender<Vec<(&'static str, String)>>,
    state: watch::Sender<OperationState>,
    banner: watch::Sender<Option<Banner>>,
    form: watch::Sender<FormState<R::Draft>>,
    gate: watch::Sender<DeleteGate>,
    in_flight: AtomicBool,
    fetch_seq: AtomicU64,
}

/// Held for the duration of one mutation, reload included.
struct InFlight<'a, R: Resource> {
    inner: &'a ControllerInner<R>,
}

impl<R: Resource> Drop for InFlight<'_, R> {
    fn drop(&mut self) {
        self.inner.in_flight.store(false, Ordering::Release);
        self.inner.state.send_replace(OperationState::Idle);
    }
}

impl<R: Resource> ResourceController<R> {
    /// Create a controller over a shared client. Does NOT fetch --
    /// call [`load()`](Self::load) to populate the list.
    pub fn new(client: ResourceClient) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                client,
                items: ResourceCollection::new(),
                query: watch::channel(Vec::new()).0,
                state: watch::channel(OperationState::Idle).0,
                banner: watch::channel(None).0,
                form: watch::channel(FormState::Closed).0,
                gate: watch::channel(DeleteGate::Closed).0,
                in_flight: AtomicBool::new(false),
                fetch_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Restrict subsequent loads with query filters (e.g. `status`).
    pub fn set_query(&self, params: Vec<(&'static str, String)>) {
        self.inner.query.send_replace(params);
    }

    // ── Observation ──────────────────────────────────────────────

    pub fn items(&self) -> Snapshot<R> {
        self.inner.items.snapshot()
    }

    pub fn get(&self, id: EntityId) -> Option<Arc<R>> {
        self.inner.items.get(id)
    }

    /// Number of list replacements applied so far.
    pub fn revision(&self) -> u64 {
        self.inner.items.version()
    }

    /// Follow the list together with the state and the banner.
    pub fn subscribe(&self) -> ListSubscription<R> {
        ListSubscription::new(
            self.inner.items.subscribe(),
            self.inner.state.subscribe(),
            self.inner.banner.subscribe(),
        )
    }

    pub fn state(&self) -> OperationState {
        *self.inner.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<OperationState> {
        self.inner.state.subscribe()
    }

    pub fn banner(&self) -> Option<Banner> {
        self.inner.banner.borrow().clone()
    }

    pub fn watch_banner(&self) -> watch::Receiver<Option<Banner>> {
        self.inner.banner.subscribe()
    }

    pub fn dismiss_banner(&self) {
        self.inner.banner.send_replace(None);
    }

    pub fn gate(&self) -> DeleteGate {
        *self.inner.gate.borrow()
    }

    pub fn watch_gate(&self) -> watch::Receiver<DeleteGate> {
        self.inner.gate.subscribe()
    }

    pub fn form(&self) -> FormState<R::Draft> {
        self.inner.form.borrow().clone()
    }

    // ── Listing ──────────────────────────────────────────────────

    /// Fetch the list and replace local state. On failure the banner is
    /// set and the local list is emptied. A load overtaken by a newer one
    /// changes nothing and returns [`Outcome::Skipped`].
    pub async fn load(&self) -> Outcome {
        // Only show `Listing` when no mutation owns the state.
        let shown = self.inner.state.send_if_modified(|state| {
            let idle = *state == OperationState::Idle;
            if idle {
                *state = OperationState::Listing;
            }
            idle
        });

        let outcome = self.fetch().await;

        if shown {
            self.inner.state.send_if_modified(|state| {
                let listing = *state == OperationState::Listing;
                if listing {
                    *state = OperationState::Idle;
                }
                listing
            });
        }

        outcome
    }

    async fn fetch(&self) -> Outcome {
        let generation = self.inner.fetch_seq.fetch_add(1, Ordering::AcqRel) + 1;
        let query = self.inner.query.borrow().clone();

        match self.inner.client.list_with::<R>(&R::ENDPOINT, &query).await {
            Ok(listing) => {
                let count = listing.items.len();
                let rows = listing.items.into_iter().map(|r| (r.id(), r)).collect();
                if !self.inner.items.replace_all(generation, rows) {
                    debug!(resource = R::NAME, generation, "stale list discarded");
                    return Outcome::Skipped;
                }
                debug!(resource = R::NAME, count, generation, "list loaded");
                Outcome::Done
            }
            Err(e) => {
                let err = CoreError::from(e);
                if !self.inner.items.clear(generation) {
                    debug!(
                        resource = R::NAME,
                        generation,
                        error = %err,
                        "stale list failure ignored"
                    );
                    return Outcome::Skipped;
                }
                warn!(resource = R::NAME, error = %err, "list load failed");
                self.set_banner(&err);
                Outcome::Failed(err.kind())
            }
        }
    }

    // ── Create / update ──────────────────────────────────────────

    /// Validate locally, create, then reload.
    pub async fn submit_create(&self, draft: R::Draft) -> Outcome {
        let Some(guard) = self.try_begin(OperationState::Submitting(SubmitKind::Create)) else {
            return Outcome::Skipped;
        };

        if let Err(err) = draft.validate() {
            return self.refuse(&err);
        }

        let result = self
            .inner
            .client
            .create::<R, _>(&R::ENDPOINT, &draft)
            .await
            .map(|saved| debug!(resource = R::NAME, id = %saved.item.id(), "created"))
            .map_err(CoreError::from);

        self.finish(guard, "create", result).await
    }

    /// Validate locally, replace every field of row `id`, then reload.
    pub async fn submit_update(&self, id: i64, draft: R::Draft) -> Outcome {
        let Some(guard) = self.try_begin(OperationState::Submitting(SubmitKind::Update)) else {
            return Outcome::Skipped;
        };

        let id = match Self::checked_id(id) {
            Ok(id) => id,
            Err(err) => return self.refuse(&err),
        };
        if !self.inner.items.contains(id) {
            return self.finish(guard, "update", Err(Self::gone(id))).await;
        }
        if let Err(err) = draft.validate() {
            return self.refuse(&err);
        }

        let result = self
            .inner
            .client
            .update::<R, _>(&R::ENDPOINT, id.get(), &draft)
            .await
            .map(|_| ())
            .map_err(|e| Self::classify(id, e));

        self.finish(guard, "update", result).await
    }

    // ── Form helpers ─────────────────────────────────────────────

    /// Open an empty create form.
    pub fn open_create(&self) {
        self.inner.form.send_replace(FormState::Creating {
            draft: R::Draft::default(),
        });
    }

    /// Open the edit form prefilled from row `id`.
    pub async fn begin_edit(&self, id: i64) -> Outcome {
        let id = match Self::checked_id(id) {
            Ok(id) => id,
            Err(err) => return self.refuse(&err),
        };

        let Some(row) = self.inner.items.get(id) else {
            let err = Self::gone(id);
            let _ = self.load().await;
            return self.refuse(&err);
        };

        self.inner.form.send_replace(FormState::Editing {
            id,
            draft: row.to_draft(),
        });
        Outcome::Done
    }

    /// Mutate the open form's draft. Returns `false` if no form is open.
    pub fn edit_form(&self, f: impl FnOnce(&mut R::Draft)) -> bool {
        self.inner.form.send_if_modified(|form| match form {
            FormState::Closed => false,
            FormState::Creating { draft } | FormState::Editing { draft, .. } => {
                f(draft);
                true
            }
        })
    }

    pub fn cancel_form(&self) {
        self.inner.form.send_replace(FormState::Closed);
    }

    /// Submit the open form. The form closes only when the backend
    /// accepted the change.
    pub async fn submit_form(&self) -> Outcome {
        let outcome = match self.form() {
            FormState::Closed => return Outcome::Skipped,
            FormState::Creating { draft } => self.submit_create(draft).await,
            FormState::Editing { id, draft } => self.submit_update(id.get(), draft).await,
        };

        if outcome.is_done() {
            self.cancel_form();
        }
        outcome
    }

    // ── Delete confirmation ──────────────────────────────────────

    /// Ask for confirmation before deleting row `id`.
    pub async fn request_delete(&self, id: i64) -> Outcome {
        let id = match Self::checked_id(id) {
            Ok(id) => id,
            Err(err) => return self.refuse(&err),
        };

        if !self.inner.items.contains(id) {
            let err = Self::gone(id);
            let _ = self.load().await;
            return self.refuse(&err);
        }

        if self.inner.gate.send_if_modified(|gate| gate.open(id)) {
            Outcome::Done
        } else {
            Outcome::Skipped
        }
    }

    /// Delete the row awaiting confirmation, then reload. The gate ends
    /// `Closed` whatever the result.
    pub async fn confirm_delete(&self) -> Outcome {
        if !matches!(self.gate(), DeleteGate::AwaitingConfirmation { .. }) {
            return Outcome::Skipped;
        }
        let Some(guard) = self.try_begin(OperationState::Deleting) else {
            return Outcome::Skipped;
        };

        let mut confirmed = None;
        self.inner.gate.send_if_modified(|gate| {
            confirmed = gate.begin();
            confirmed.is_some()
        });
        let Some(id) = confirmed else {
            return Outcome::Skipped;
        };

        let result = if self.inner.items.contains(id) {
            self.inner
                .client
                .delete(&R::ENDPOINT, id.get())
                .await
                .map(|_| ())
                .map_err(|e| Self::classify(id, e))
        } else {
            Err(Self::gone(id))
        };

        self.inner.gate.send_if_modified(DeleteGate::close);
        self.finish(guard, "delete", result).await
    }

    /// Close the gate without side effects.
    pub fn cancel_delete(&self) {
        self.inner.gate.send_if_modified(DeleteGate::close);
    }

    // ── Bulk actions ─────────────────────────────────────────────

    /// Delete every selected row, then reload. Rows that were already
    /// gone are reported in the banner.
    pub async fn delete_selected(&self, ids: &[i64]) -> Outcome {
        if ids.is_empty() {
            return Outcome::Skipped;
        }
        let Some(guard) = self.try_begin(OperationState::Deleting) else {
            return Outcome::Skipped;
        };
        if let Err(err) = Self::checked_ids(ids) {
            return self.refuse(&err);
        }

        let result = self.inner.client.delete_many(&R::ENDPOINT, ids).await;
        self.finish_bulk(guard, "bulk delete", result).await
    }

    // ── Private helpers ──────────────────────────────────────────

    fn try_begin(&self, state: OperationState) -> Option<InFlight<'_, R>> {
        if self
            .inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(resource = R::NAME, ?state, "operation in flight, request dropped");
            return None;
        }

        self.inner.state.send_replace(state);
        self.inner.banner.send_replace(None);
        Some(InFlight { inner: &self.inner })
    }

    /// Reload, then report the mutation result over whatever the reload
    /// put in the banner.
    async fn finish(
        &self,
        guard: InFlight<'_, R>,
        action: &'static str,
        result: Result<(), CoreError>,
    ) -> Outcome {
        if !self.fetch().await.is_done() {
            debug!(resource = R::NAME, action, "reload after mutation not applied");
        }
        drop(guard);

        match result {
            Ok(()) => {
                info!(resource = R::NAME, action, "mutation applied");
                Outcome::Done
            }
            Err(err) => {
                warn!(resource = R::NAME, action, error = %err, "mutation failed");
                self.refuse(&err)
            }
        }
    }

    async fn finish_bulk(
        &self,
        guard: InFlight<'_, R>,
        action: &'static str,
        result: Result<showroom_api::BulkOutcome, showroom_api::Error>,
    ) -> Outcome {
        let (result, missing) = match result {
            Ok(outcome) => {
                debug!(
                    resource = R::NAME,
                    affected = outcome.affected.len(),
                    missing = outcome.missing.len(),
                    "bulk applied"
                );
                (Ok(()), outcome.missing)
            }
            Err(e) => (Err(CoreError::from(e)), Vec::new()),
        };

        let outcome = self.finish(guard, action, result).await;
        if outcome.is_done() && !missing.is_empty() {
            let message = format!(
                "{} {}(s) no longer existed: {missing:?}",
                missing.len(),
                R::NAME
            );
            self.set_banner(&CoreError::NotFound { message });
        }
        outcome
    }

    /// Surface a failure without touching the network.
    fn refuse(&self, err: &CoreError) -> Outcome {
        self.set_banner(err);
        Outcome::Failed(err.kind())
    }

    fn set_banner(&self, err: &CoreError) {
        self.inner.banner.send_replace(Some(Banner::from(err)));
    }

    fn checked_id(raw: i64) -> Result<EntityId, CoreError> {
        EntityId::try_from(raw).map_err(|e| CoreError::InvalidId { id: e.0 })
    }

    fn checked_ids(raw: &[i64]) -> Result<(), CoreError> {
        raw.iter().try_for_each(|&id| Self::checked_id(id).map(|_| ()))
    }

    fn gone(id: EntityId) -> CoreError {
        CoreError::NoLongerExists {
            resource: R::NAME,
            id: id.get(),
        }
    }

    /// 404 / 410 on a targeted row means it was deleted elsewhere.
    fn classify(id: EntityId, err: showroom_api::Error) -> CoreError {
        match CoreError::from(err) {
            e if e.is_not_found() => Self::gone(id),
            e => e,
        }
    }
}

impl<R: StatusResource> ResourceController<R> {
    /// Rows currently in `status`, in list order.
    pub fn items_with_status(&self, status: &R::Status) -> Vec<Arc<R>> {
        self.items()
            .iter()
            .filter(|row| row.status() == status)
            .cloned()
            .collect()
    }

    /// Move every selected row to `status`, then reload.
    pub async fn update_status_selected(&self, ids: &[i64], status: R::Status) -> Outcome {
        if ids.is_empty() {
            return Outcome::Skipped;
        }
        let Some(guard) = self.try_begin(OperationState::Submitting(SubmitKind::Update)) else {
            return Outcome::Skipped;
        };
        if let Err(err) = Self::checked_ids(ids) {
            return self.refuse(&err);
        }

        let result = self
            .inner
            .client
            .update_status_many(&R::ENDPOINT, ids, &status)
            .await;
        self.finish_bulk(guard, "bulk status change", result).await
    }
}
