//! Callbacks handed to the presentation surface.
//!
//! Each callback starts the matching controller operation and returns its
//! future, so the surface can await the result or drop it. Failures have
//! already been logged by the controller and arrive as `None` or
//! `RefreshOutcome::Failed`.

use crate::model::{PhotoId, PhotoRecord, RgbVals, UploadData};
use crate::services::{RefreshOutcome, SyncController};
use futures::future::{FutureExt, LocalBoxFuture};
use std::rc::Rc;

type Callback<A, R> = Rc<dyn Fn(A) -> LocalBoxFuture<'static, R>>;
type Callback2<A, B, R> = Rc<dyn Fn(A, B) -> LocalBoxFuture<'static, R>>;

/// Fixed set of user-action callbacks for the gallery view.
#[derive(Clone)]
pub struct GalleryCallbacks {
    pub on_save: Callback<UploadData, Option<PhotoRecord>>,
    pub on_rgb_edit: Callback2<PhotoId, RgbVals, Option<PhotoRecord>>,
    pub on_convert_to_grayscale: Callback<PhotoId, Option<PhotoRecord>>,
    /// Search input, already debounced by the input widget.
    pub on_search: Callback<String, RefreshOutcome>,
    pub on_navigate: Callback<String, Option<RefreshOutcome>>,
}

/// Builds the callbacks for `controller`.
pub fn setup_callbacks(controller: &Rc<SyncController>) -> GalleryCallbacks {
    GalleryCallbacks {
        on_save: Rc::new({
            let controller = controller.clone();
            move |data: UploadData| {
                let controller = controller.clone();
                async move { controller.upload(data).await }.boxed_local()
            }
        }),
        on_rgb_edit: Rc::new({
            let controller = controller.clone();
            move |photo_id: PhotoId, rgb: RgbVals| {
                let controller = controller.clone();
                async move { controller.edit_rgb(&photo_id, rgb).await }.boxed_local()
            }
        }),
        on_convert_to_grayscale: Rc::new({
            let controller = controller.clone();
            move |photo_id: PhotoId| {
                let controller = controller.clone();
                async move { controller.convert_to_grayscale(&photo_id).await }.boxed_local()
            }
        }),
        on_search: Rc::new({
            let controller = controller.clone();
            move |query: String| {
                let controller = controller.clone();
                async move { controller.search(&query).await }.boxed_local()
            }
        }),
        on_navigate: Rc::new({
            let controller = controller.clone();
            move |path: String| {
                let controller = controller.clone();
                async move { controller.navigate(&path).await }.boxed_local()
            }
        }),
    }
}
