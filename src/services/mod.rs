//! Service layer for business logic.
//!
//! Separates synchronization logic from the presentation callbacks for better testability.

pub mod sync_controller;

pub use sync_controller::{RefreshOutcome, SyncController};
