//! Fitroom - Virtual fitting room configurator
//!
//! Main entry point for the GUI application.
//!
//! # Overview
//!
//! This binary crate provides the Slint GUI frontend. It initializes:
//! - Logging infrastructure (file rotation + console output)
//! - Tokio async runtime (catalog fetches, viewer channel)
//! - State management ([`StateManager`])
//! - Local persistence ([`ProfileStore`] over a file-backed key-value store)
//! - The viewer bridge ([`ChannelRenderer`] + [`RendererSync`])
//! - GUI controller ([`GuiController`] - the composition root)
//!
//! The application uses a hybrid threading model:
//! - **Main thread**: runs the Slint event loop (blocking, synchronous)
//! - **Tokio workers**: handle the async catalog fetches
//! - **State listener**: background std::thread for reactive UI updates
//!
//! # Execution Flow
//!
//! 1. Initialize logging → logs/fitroom.<date>
//! 2. Create the tokio runtime
//! 3. Create the StateManager and load the saved snapshot (fallback: the
//!    fixed default baseline)
//! 4. Create the viewer channel; its receiver is the attachment point for an
//!    embedded viewer host, which also flips the readiness flag
//! 5. Create the GuiController and run the event loop until the window closes
//! 6. Log the metrics summary and shut the runtime down
//!
//! # Configuration
//!
//! - `FITROOM_CATALOG_URL` / `FITROOM_CATALOG_KEY`: remote catalog store
//! - `fitroom-data/`: local persistence directory, created on first use

use anyhow::Result;
use fitroom::services::renderer::ChannelRenderer;
use fitroom::ui::GuiController;
use fitroom::{
    APP_NAME, CatalogClient, FileStore, ProfileStore, RendererSync, StateManager, VERSION,
};
use std::sync::Arc;

fn main() -> Result<()> {
    // Setup logging with both file and console output
    let _log_guard = fitroom::logging::init("logs", "fitroom", false, true)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    // Tokio runtime for the async catalog fetches and the viewer channel
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("fitroom-worker")
        .build()?;

    let state = Arc::new(StateManager::new());

    // Local persistence: load the saved snapshot once at startup; absence or
    // a malformed value falls back to the default baseline already in state.
    let profile_store = Arc::new(ProfileStore::new(Arc::new(FileStore::new("fitroom-data")?)));
    if let Some(saved) = profile_store.load() {
        state.replace_parameters(saved);
    }

    // Viewer bridge. The receiver side is where an embedded viewer host
    // attaches; until a host flips the readiness flag, pushes are no-ops.
    let (renderer, mut viewer_rx) = ChannelRenderer::new(16);
    let renderer = Arc::new(renderer);
    runtime.spawn(async move {
        while let Some(message) = viewer_rx.recv().await {
            tracing::trace!(
                receiver = %message.receiver,
                method = %message.method,
                "Viewer message dispatched"
            );
        }
    });
    let renderer_sync = Arc::new(RendererSync::new(renderer.clone()));

    let catalog = Arc::new(CatalogClient::from_env());

    let controller = GuiController::new(
        state,
        profile_store,
        catalog,
        renderer_sync,
        runtime.handle().clone(),
    )?;

    tracing::info!("GUI controller initialized, launching window");

    // Blocks until the window is closed
    let result = controller.run();

    tracing::info!("GUI closed, shutting down");
    fitroom::metrics::global().log_summary();

    runtime.shutdown_timeout(std::time::Duration::from_secs(5));

    result.map_err(|e| {
        tracing::error!("GUI error: {}", e);
        anyhow::anyhow!("GUI error: {}", e)
    })
}
