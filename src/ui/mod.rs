// UI module - GUI logic and event loop bridge
//
// This module contains:
// - EventLoopBridge: coordinates between the tokio runtime and the Slint
//   event loop
// - GuiController: the composition root wiring the window to state,
//   persistence, catalog, and the viewer sync

pub mod bridge;
pub mod controller;

pub use bridge::EventLoopBridge;
pub use controller::GuiController;
