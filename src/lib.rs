//! Client-side synchronization core for the Pixly photo gallery.
//!
//! A [`SyncController`] keeps the displayed photo collection consistent with
//! the current route, the persisted search term and user mutations. The remote
//! service, durable storage and presentation surface are injected through the
//! traits in [`api`], [`store`] and [`ui`].

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod services;
pub mod state;
pub mod store;
pub mod ui;

pub use config::{ClientConfig, MutationPolicy};
pub use model::{PhotoEdit, PhotoId, PhotoRecord, RgbVals, UploadData};
pub use services::{RefreshOutcome, SyncController};
pub use state::{SyncPhase, ViewSnapshot};

/// Installs `env_logger`, at `Debug` level in debug builds.
///
/// Safe to call more than once. On wasm32 the host page installs its own logger.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut builder = env_logger::Builder::from_default_env();
        #[cfg(debug_assertions)]
        builder.filter_level(log::LevelFilter::Debug);
        let _ = builder.try_init();
    }
}
