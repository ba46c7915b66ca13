//! Services module - catalog access and viewer synchronization.
//!
//! Framework-agnostic logic with no dependency on the UI layer:
//!
//! - [`CatalogClient`]: read-only async queries against the remote catalog
//!   store (`clothing_items` ordered by recency, `body_presets` with
//!   default-flagged entries first). Failures degrade to empty lists at the
//!   call site.
//! - [`RendererSync`] / [`RendererBridge`]: one-directional, fire-and-forget
//!   push of the body snapshot and the selected garment's model reference to
//!   the external viewer. No queueing, no retries, no inbound channel; a
//!   not-ready viewer is a defined no-op, not an error.
//!
//! # Design Philosophy
//!
//! - **Stateless**: all inputs are explicit parameters or injected
//!   capabilities
//! - **Async where it suspends**: only the catalog fetches await; bridge and
//!   persistence calls are synchronous and effectively instantaneous
//! - **Testable**: the viewer boundary is a trait, so tests substitute a
//!   recording double instead of touching a real viewer

pub mod catalog;
pub mod renderer;

pub use catalog::{CatalogClient, CatalogError};
pub use renderer::{ChannelRenderer, RendererBridge, RendererMessage, RendererSync};
