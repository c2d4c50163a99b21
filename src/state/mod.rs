//! State management for the gallery view.

pub mod navigation;
pub mod view;

pub use navigation::{NavigationState, RouteEffects};
pub use view::{SharedView, SyncPhase, ViewSnapshot};
