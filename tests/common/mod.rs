#![allow(dead_code)]

use async_trait::async_trait;
use futures::channel::oneshot;
use pixly_client::api::{MemoryPhotoApi, MutationGateway, PhotoFetcher};
use pixly_client::error::{EditError, FetchError, UploadError};
use pixly_client::store::MemoryFilterStore;
use pixly_client::ui::Render;
use pixly_client::{ClientConfig, PhotoEdit, PhotoId, PhotoRecord, SyncController, UploadData, ViewSnapshot};
use std::cell::RefCell;
use std::rc::Rc;

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn photo(id: u64, author: &str) -> PhotoRecord {
    PhotoRecord::new(id, author)
}

/// Two photos; only the second one was shot at ISO 800.
pub fn gallery() -> Vec<PhotoRecord> {
    let mut first = photo(1, "ann");
    first.iso = Some(100);
    first.make = Some("Canon".to_string());
    let mut second = photo(2, "bo");
    second.iso = Some(800);
    second.make = Some("Nikon".to_string());
    vec![first, second]
}

/// Surface that keeps every snapshot it was asked to draw.
#[derive(Default)]
pub struct RecordingSurface {
    snapshots: RefCell<Vec<ViewSnapshot>>,
}

impl Render for RecordingSurface {
    fn render(&self, snapshot: &ViewSnapshot) {
        self.snapshots.borrow_mut().push(snapshot.clone());
    }
}

impl RecordingSurface {
    pub fn render_count(&self) -> usize {
        self.snapshots.borrow().len()
    }

    /// Loading flag per render with consecutive duplicates collapsed.
    pub fn loading_transitions(&self) -> Vec<bool> {
        let mut flags: Vec<bool> = self
            .snapshots
            .borrow()
            .iter()
            .map(ViewSnapshot::is_loading)
            .collect();
        flags.dedup();
        flags
    }

    pub fn ever_loading(&self) -> bool {
        self.snapshots.borrow().iter().any(ViewSnapshot::is_loading)
    }
}

type FetchReply = Result<Vec<PhotoRecord>, FetchError>;

/// Fetcher whose calls stay pending until the test resolves them.
#[derive(Default)]
pub struct GatedFetcher {
    calls: RefCell<Vec<Option<String>>>,
    gates: RefCell<Vec<Option<oneshot::Sender<FetchReply>>>>,
}

impl GatedFetcher {
    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.borrow().clone()
    }

    pub fn resolve(&self, index: usize, reply: FetchReply) {
        let gate = self.gates.borrow_mut()[index]
            .take()
            .expect("fetch already resolved");
        let _ = gate.send(reply);
    }
}

#[async_trait(?Send)]
impl PhotoFetcher for GatedFetcher {
    async fn fetch_all(&self, filter: Option<&str>) -> FetchReply {
        let (tx, rx) = oneshot::channel();
        self.calls.borrow_mut().push(filter.map(str::to_string));
        self.gates.borrow_mut().push(Some(tx));
        rx.await
            .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string())))
    }
}

/// Gateway whose calls stay pending until resolved; `None` resolves as a failure.
#[derive(Default)]
pub struct GatedGateway {
    gates: RefCell<Vec<Option<oneshot::Sender<Option<PhotoRecord>>>>>,
}

impl GatedGateway {
    pub fn pending(&self) -> usize {
        self.gates.borrow().iter().filter(|g| g.is_some()).count()
    }

    pub fn resolve(&self, index: usize, reply: Option<PhotoRecord>) {
        let gate = self.gates.borrow_mut()[index]
            .take()
            .expect("mutation already resolved");
        let _ = gate.send(reply);
    }

    async fn wait(&self) -> Option<PhotoRecord> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push(Some(tx));
        rx.await.ok().flatten()
    }
}

#[async_trait(?Send)]
impl MutationGateway for GatedGateway {
    async fn upload(&self, _data: UploadData) -> Result<PhotoRecord, UploadError> {
        self.wait()
            .await
            .ok_or_else(|| UploadError::Rejected("gated failure".to_string()))
    }

    async fn edit(&self, photo_id: &PhotoId, _edit: PhotoEdit) -> Result<PhotoRecord, EditError> {
        self.wait()
            .await
            .ok_or_else(|| EditError::NotFound(photo_id.clone()))
    }
}

pub struct Harness {
    pub controller: SyncController,
    pub store: Rc<MemoryFilterStore>,
    pub surface: Rc<RecordingSurface>,
}

pub fn harness(
    config: ClientConfig,
    store: MemoryFilterStore,
    fetcher: Rc<dyn PhotoFetcher>,
    gateway: Rc<dyn MutationGateway>,
) -> Harness {
    init();
    let store = Rc::new(store);
    let surface = Rc::new(RecordingSurface::default());
    let controller = SyncController::new(config, store.clone(), fetcher, gateway)
        .with_surface(surface.clone());
    Harness {
        controller,
        store,
        surface,
    }
}

/// Harness backed by one in-memory service for both reads and writes.
pub fn memory_harness(config: ClientConfig, store: MemoryFilterStore) -> (Harness, Rc<MemoryPhotoApi>) {
    let api = Rc::new(MemoryPhotoApi::new(gallery()));
    let harness = harness(config, store, api.clone(), api.clone());
    (harness, api)
}
