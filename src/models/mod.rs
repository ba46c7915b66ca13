//! Data models for the Fitroom application.
//!
//! - [`BodyParameters`] / [`BodyField`]: the body-shape snapshot and its
//!   per-field presentation metadata
//! - [`ClothingItem`] / [`BodyPreset`]: read-only records from the remote
//!   catalog store
//! - [`AppState`]: the central selection-state container
//!
//! # Architecture Note
//!
//! Snapshots are immutable values: every change to [`BodyParameters`] goes
//! through the pure merge [`BodyParameters::with_field`] and produces a new
//! complete snapshot. `AppState` is wrapped in `Arc<RwLock<>>` by
//! [`StateManager`](crate::state::StateManager) for thread-safe access.

pub mod app_state;
pub mod body;
pub mod catalog;

pub use app_state::AppState;
pub use body::{BodyField, BodyParameters};
pub use catalog::{ALL_CATEGORY, BodyPreset, ClothingItem};
