//! Presentation surface contract.
//!
//! The surface is stateless: it draws whatever [`ViewSnapshot`] it is handed
//! and reports user actions through [`GalleryCallbacks`].

pub mod handlers;
pub mod table;

pub use handlers::{GalleryCallbacks, setup_callbacks};
pub use table::{COLUMNS, PhotoRow};

use crate::state::ViewSnapshot;

/// Receives a snapshot after every view state change.
pub trait Render {
    fn render(&self, snapshot: &ViewSnapshot);
}
