// Fitroom - Virtual fitting room configurator
//
// This is the library crate containing the data model, state management,
// persistence, and the catalog/renderer service boundaries. The binary crate
// (main.rs) provides the GUI entry point.

pub mod logging;
pub mod metrics;
pub mod models;
pub mod persistence;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use models::{AppState, BodyField, BodyParameters, BodyPreset, ClothingItem};
pub use persistence::{FileStore, KeyValueStore, ProfileStore};
pub use services::{CatalogClient, ChannelRenderer, RendererBridge, RendererSync};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
