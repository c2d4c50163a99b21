//! Synchronization controller for the gallery view.
//!
//! Coordinates the filter store, the photo fetcher and the mutation gateway
//! so the visible collection follows route changes, search input and edits.
//!
//! Ordering rules:
//! - Every fetch takes a ticket. Its result is applied only if no newer fetch
//!   was issued meanwhile, so the latest request wins regardless of the order
//!   in which responses arrive.
//! - Foreground fetches and mutations drive the page-level loading indicator.
//!   Filter refreshes only report `SyncPhase::Refreshing`.
//! - In-flight counters are released by drop guards, so a failed or
//!   abandoned call never leaves the indicator stuck.
//! - Once unmounted, operations return without touching the store or the
//!   remote until the next `mount`.

use crate::api::{MutationGateway, PhotoFetcher};
use crate::config::{ClientConfig, MutationPolicy};
use crate::error::{EditError, FetchError, UploadError};
use crate::model::{PhotoEdit, PhotoId, PhotoRecord, RgbVals, UploadData};
use crate::state::view::OpClass;
use crate::state::{NavigationState, SharedView, ViewSnapshot};
use crate::store::{FilterStore, normalize_term};
use crate::ui::Render;
use log::{debug, error, info};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

/// How a fetch ended from the caller's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The result replaced `photos`.
    Applied { count: usize },
    /// A newer fetch was issued first (whether it succeeded or failed), or
    /// the view is unmounted.
    Superseded,
    /// The fetch failed and `photos` was left as it was.
    Failed(FetchError),
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

/// Keeps the displayed photo collection in step with navigation, the
/// persisted filter and user mutations.
pub struct SyncController {
    config: ClientConfig,
    store: Rc<dyn FilterStore>,
    fetcher: Rc<dyn PhotoFetcher>,
    gateway: Rc<dyn MutationGateway>,
    navigation: RefCell<NavigationState>,
    view: SharedView,
}

impl SyncController {
    pub fn new(
        config: ClientConfig,
        store: Rc<dyn FilterStore>,
        fetcher: Rc<dyn PhotoFetcher>,
        gateway: Rc<dyn MutationGateway>,
    ) -> Self {
        let navigation = NavigationState::new(
            config.gallery_path.clone(),
            config.upload_path_prefix.clone(),
        );
        Self {
            config,
            store,
            fetcher,
            gateway,
            navigation: RefCell::new(navigation),
            view: SharedView::new(),
        }
    }

    /// Renders every state change to `surface`, starting with the current state.
    pub fn with_surface(self, surface: Rc<dyn Render>) -> Self {
        self.view.attach_surface(surface);
        self
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.view.snapshot()
    }

    pub fn current_path(&self) -> Option<String> {
        self.navigation.borrow().current_path().map(str::to_string)
    }

    /// Initial transitions when the view mounts at `path`: the route change
    /// and the initial read of the persisted filter.
    pub async fn mount(&self, path: &str) -> (Option<RefreshOutcome>, RefreshOutcome) {
        info!("Mounting gallery at {}", path);
        if !self.view.is_mounted() {
            self.view.reattach();
        }
        futures::join!(self.navigate(path), self.filter_changed())
    }

    /// Tears the view down. Results of in-flight calls are discarded.
    pub fn unmount(&self) {
        info!("Unmounting gallery view");
        self.view.detach();
        self.navigation.borrow_mut().reset();
    }

    /// Handles a route change.
    ///
    /// Leaving the upload area clears the persisted filter before anything
    /// else happens. Entering the gallery issues one unfiltered foreground
    /// fetch, whose outcome is returned.
    pub async fn navigate(&self, path: &str) -> Option<RefreshOutcome> {
        if !self.view.is_mounted() {
            debug!("Ignoring navigation to {} while unmounted", path);
            return None;
        }
        let effects = self.navigation.borrow_mut().enter(path);

        if effects.clear_filter {
            debug!("Left {}, clearing search term", self.config.upload_path_prefix);
            self.store.clear();
        }
        if !effects.foreground_fetch {
            return None;
        }

        info!("Entered gallery, loading all photos");
        Some(self.load(None, OpClass::Foreground).await)
    }

    /// Handles search input: persists `query`, then refreshes with it.
    pub async fn search(&self, query: &str) -> RefreshOutcome {
        if !self.view.is_mounted() {
            debug!("Ignoring search while unmounted");
            return RefreshOutcome::Superseded;
        }
        self.store.set(query);
        self.filter_changed().await
    }

    /// Refetches with whatever term the store holds, without the page-level
    /// loading indicator.
    pub async fn filter_changed(&self) -> RefreshOutcome {
        if !self.view.is_mounted() {
            return RefreshOutcome::Superseded;
        }
        let term = normalize_term(self.store.get());
        debug!("Filter changed, refreshing with {:?}", term);
        self.load(term, OpClass::Background).await
    }

    pub async fn upload(&self, data: UploadData) -> Option<PhotoRecord> {
        if !self.view.is_mounted() {
            debug!("Ignoring upload of {} while unmounted", data.file_name);
            return None;
        }
        let _loading = self.view.begin(OpClass::Mutation);
        info!("Uploading {}", data.file_name);

        match self
            .bounded(self.gateway.upload(data), UploadError::Timeout)
            .await
        {
            Ok(record) => {
                self.after_mutation(&record, true);
                Some(record)
            }
            Err(e) => {
                error!("Error uploading photo: {}", e);
                self.view.record_error(e.to_string());
                None
            }
        }
    }

    pub async fn edit_rgb(&self, photo_id: &PhotoId, rgb: RgbVals) -> Option<PhotoRecord> {
        self.edit(photo_id, PhotoEdit::Rgb(rgb)).await
    }

    pub async fn convert_to_grayscale(&self, photo_id: &PhotoId) -> Option<PhotoRecord> {
        self.edit(photo_id, PhotoEdit::Grayscale).await
    }

    pub async fn edit(&self, photo_id: &PhotoId, edit: PhotoEdit) -> Option<PhotoRecord> {
        if !self.view.is_mounted() {
            debug!("Ignoring edit of photo {} while unmounted", photo_id);
            return None;
        }
        let _loading = self.view.begin(OpClass::Mutation);
        info!("Editing photo {}: {:?}", photo_id, edit);

        match self
            .bounded(self.gateway.edit(photo_id, edit), EditError::Timeout)
            .await
        {
            Ok(record) => {
                self.after_mutation(&record, false);
                Some(record)
            }
            Err(e) => {
                error!("Error editing photo {}: {}", photo_id, e);
                self.view.record_error(e.to_string());
                None
            }
        }
    }

    /// Shared path for foreground and background fetches.
    async fn load(&self, filter: Option<String>, class: OpClass) -> RefreshOutcome {
        let _status = self.view.begin(class);
        let ticket = self.view.issue_ticket();

        let result = self
            .bounded(self.fetcher.fetch_all(filter.as_deref()), FetchError::Timeout)
            .await;

        match result {
            Ok(photos) => {
                let count = photos.len();
                if self.view.apply_photos(ticket, photos) {
                    debug!("Applied {} photos (fetch {})", count, ticket);
                    RefreshOutcome::Applied { count }
                } else {
                    RefreshOutcome::Superseded
                }
            }
            Err(e) => {
                error!("Error happened fetching photos ({:?}): {}", filter, e);
                if self.view.apply_error(ticket, e.to_string()) {
                    RefreshOutcome::Failed(e)
                } else {
                    RefreshOutcome::Superseded
                }
            }
        }
    }

    fn after_mutation(&self, record: &PhotoRecord, is_upload: bool) {
        if self.config.mutation_policy == MutationPolicy::Reconcile
            && self.view.reconcile(record.clone(), is_upload)
        {
            debug!("Reconciled photo {} into the collection", record.id);
        }
    }

    /// Applies the configured request timeout to a remote call.
    async fn bounded<T, E>(
        &self,
        operation: impl Future<Output = Result<T, E>>,
        on_timeout: impl FnOnce(Duration) -> E,
    ) -> Result<T, E> {
        match self.config.request_timeout() {
            Some(limit) => match async_std::future::timeout(limit, operation).await {
                Ok(result) => result,
                Err(_) => Err(on_timeout(limit)),
            },
            None => operation.await,
        }
    }
}
