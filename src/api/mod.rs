//! Contracts for the remote photo service and their implementations.
//!
//! Futures are `?Send`: the client runs on a single cooperative thread
//! (the browser event loop), and browser transports are not `Send`.

#[cfg(target_arch = "wasm32")]
pub mod http;
pub mod memory;
pub mod routes;

#[cfg(target_arch = "wasm32")]
pub use http::PixlyApi;
pub use memory::MemoryPhotoApi;

use crate::error::{EditError, FetchError, UploadError};
use crate::model::{PhotoEdit, PhotoId, PhotoRecord, UploadData};
use async_trait::async_trait;

/// Remote read of the photo collection.
#[async_trait(?Send)]
pub trait PhotoFetcher {
    /// Returns the full collection for `None` or an empty filter, otherwise
    /// the records the remote considers matching.
    async fn fetch_all(&self, filter: Option<&str>) -> Result<Vec<PhotoRecord>, FetchError>;
}

/// Remote writes for a single photo.
#[async_trait(?Send)]
pub trait MutationGateway {
    async fn upload(&self, data: UploadData) -> Result<PhotoRecord, UploadError>;

    /// Applies `edit` to `photo_id` and returns the replacement record.
    async fn edit(&self, photo_id: &PhotoId, edit: PhotoEdit) -> Result<PhotoRecord, EditError>;
}
