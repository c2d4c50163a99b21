//! In-memory view state shared between the controller and the presentation surface.
//!
//! The controller writes through [`SharedView`]; every write re-renders the
//! attached surface with a fresh [`ViewSnapshot`] once the borrow is released.

use crate::model::PhotoRecord;
use crate::ui::Render;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Operation classes that own a separate in-flight counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    /// Gallery-entry fetch behind the page-level indicator.
    Foreground,
    /// Silent refetch after a filter change.
    Background,
    Mutation,
}

/// Externally visible phase. `Loading` takes priority over `Refreshing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Refreshing,
    Loading,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LoadStatus {
    foreground: usize,
    background: usize,
    mutations: usize,
}

impl LoadStatus {
    fn counter(&mut self, class: OpClass) -> &mut usize {
        match class {
            OpClass::Foreground => &mut self.foreground,
            OpClass::Background => &mut self.background,
            OpClass::Mutation => &mut self.mutations,
        }
    }

    fn begin(&mut self, class: OpClass) {
        *self.counter(class) += 1;
    }

    fn end(&mut self, class: OpClass) {
        let counter = self.counter(class);
        *counter = counter.saturating_sub(1);
    }

    fn phase(&self) -> SyncPhase {
        if self.foreground > 0 || self.mutations > 0 {
            SyncPhase::Loading
        } else if self.background > 0 {
            SyncPhase::Refreshing
        } else {
            SyncPhase::Idle
        }
    }
}

/// Immutable copy of the view handed to the presentation surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewSnapshot {
    pub photos: Vec<PhotoRecord>,
    pub phase: SyncPhase,
    /// Message of the most recent failed operation, cleared by the next applied fetch.
    pub last_error: Option<String>,
}

impl ViewSnapshot {
    pub fn is_loading(&self) -> bool {
        self.phase == SyncPhase::Loading
    }

    /// The list to draw, or `None` while the loading indicator owns the page.
    pub fn visible_photos(&self) -> Option<&[PhotoRecord]> {
        if self.is_loading() {
            None
        } else {
            Some(&self.photos)
        }
    }
}

/// Photo collection plus loading bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct ViewState {
    photos: Vec<PhotoRecord>,
    status: LoadStatus,
    last_error: Option<String>,
    /// Ticket of the most recently issued fetch.
    latest_ticket: u64,
    mounted: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            photos: Vec::new(),
            status: LoadStatus::default(),
            last_error: None,
            latest_ticket: 0,
            mounted: true,
        }
    }
}

impl ViewState {
    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            photos: self.photos.clone(),
            phase: self.status.phase(),
            last_error: self.last_error.clone(),
        }
    }

    fn issue_ticket(&mut self) -> u64 {
        self.latest_ticket += 1;
        self.latest_ticket
    }

    /// Whether a fetch holding `ticket` may still write to the view.
    fn is_current(&self, ticket: u64) -> bool {
        if !self.mounted || ticket != self.latest_ticket {
            debug!(
                "Dropping fetch result {} (latest {}, mounted {})",
                ticket, self.latest_ticket, self.mounted
            );
            return false;
        }
        true
    }

    /// Replaces the list if `ticket` is still the latest one issued.
    fn apply_photos(&mut self, ticket: u64, photos: Vec<PhotoRecord>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.photos = photos;
        self.last_error = None;
        true
    }

    /// Records a fetch failure under the same rule as [`Self::apply_photos`].
    fn apply_error(&mut self, ticket: u64, message: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.last_error = Some(message);
        true
    }

    /// Inserts or replaces `record` by id, keeping ids unique.
    fn reconcile(&mut self, record: PhotoRecord, append_missing: bool) -> bool {
        if !self.mounted {
            return false;
        }
        match self.photos.iter_mut().find(|p| p.id == record.id) {
            Some(existing) => {
                *existing = record;
                true
            }
            None if append_missing => {
                self.photos.push(record);
                true
            }
            None => false,
        }
    }
}

#[derive(Default)]
struct ViewInner {
    state: ViewState,
    surface: Option<Rc<dyn Render>>,
}

/// Shared handle to the view state.
#[derive(Clone, Default)]
pub struct SharedView {
    inner: Rc<RefCell<ViewInner>>,
}

impl SharedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_surface(&self, surface: Rc<dyn Render>) {
        self.inner.borrow_mut().surface = Some(surface);
        self.update(|_| ());
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.inner.borrow().state.snapshot()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().state.mounted
    }

    /// Applies `f` and renders the new state while mounted.
    fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let (result, rendered) = {
            let mut inner = self.inner.borrow_mut();
            let result = f(&mut inner.state);
            let rendered = inner
                .surface
                .clone()
                .filter(|_| inner.state.mounted)
                .map(|surface| (surface, inner.state.snapshot()));
            (result, rendered)
        };
        if let Some((surface, snapshot)) = rendered {
            surface.render(&snapshot);
        }
        result
    }

    pub(crate) fn issue_ticket(&self) -> u64 {
        self.inner.borrow_mut().state.issue_ticket()
    }

    pub(crate) fn apply_photos(&self, ticket: u64, photos: Vec<PhotoRecord>) -> bool {
        self.update(|state| state.apply_photos(ticket, photos))
    }

    pub(crate) fn reconcile(&self, record: PhotoRecord, append_missing: bool) -> bool {
        self.update(|state| state.reconcile(record, append_missing))
    }

    pub(crate) fn apply_error(&self, ticket: u64, message: String) -> bool {
        self.update(|state| state.apply_error(ticket, message))
    }

    pub(crate) fn record_error(&self, message: String) {
        self.update(|state| state.last_error = Some(message));
    }

    /// Invalidates in-flight fetches and stops rendering.
    pub(crate) fn detach(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.state.mounted = false;
        inner.state.issue_ticket();
    }

    /// Resumes rendering after [`Self::detach`]. The list and error are reset.
    pub(crate) fn reattach(&self) {
        self.update(|state| {
            state.mounted = true;
            state.photos.clear();
            state.last_error = None;
        });
    }

    pub(crate) fn begin(&self, class: OpClass) -> StatusGuard {
        self.update(|state| state.status.begin(class));
        StatusGuard {
            view: self.clone(),
            class,
        }
    }
}

/// Keeps an operation counted as in flight until dropped.
pub(crate) struct StatusGuard {
    view: SharedView,
    class: OpClass,
}

impl Drop for StatusGuard {
    fn drop(&mut self) {
        let class = self.class;
        self.view.update(|state| state.status.end(class));
    }
}
