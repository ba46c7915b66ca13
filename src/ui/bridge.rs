// EventLoopBridge - Coordinates between the tokio runtime and the Slint
// event loop
//
// Two event loops run concurrently: Slint's single-threaded GUI loop on the
// main thread and tokio's worker pool for catalog I/O. The bridge marshals
// UI updates from tokio tasks onto the Slint loop and spawns async work from
// Slint callbacks.

use slint::ComponentHandle;
use std::future::Future;
use tokio::sync::mpsc;

/// Marshals work between the tokio runtime and the Slint event loop.
///
/// Cloneable: every Slint callback that needs the bridge captures its own
/// clone. A background thread drains the update channel and queues each
/// closure onto the Slint loop via `upgrade_in_event_loop`.
pub struct EventLoopBridge<T: ComponentHandle> {
    tokio_handle: tokio::runtime::Handle,
    // Bounded so a lagging UI drops updates instead of growing without limit
    ui_update_tx: mpsc::Sender<Box<dyn FnOnce(&T) + Send>>,
}

impl<T: ComponentHandle> Clone for EventLoopBridge<T> {
    fn clone(&self) -> Self {
        Self {
            tokio_handle: self.tokio_handle.clone(),
            ui_update_tx: self.ui_update_tx.clone(),
        }
    }
}

impl<T: ComponentHandle + 'static> EventLoopBridge<T> {
    /// Create the bridge and start its handler thread.
    ///
    /// The handler thread exits when the update channel closes or the event
    /// loop stops accepting work.
    pub fn new(ui: &T, tokio_handle: tokio::runtime::Handle) -> Self {
        let ui_weak = ui.as_weak();
        let (ui_update_tx, mut ui_update_rx) = mpsc::channel::<Box<dyn FnOnce(&T) + Send>>(100);

        std::thread::spawn(move || {
            tracing::debug!("EventLoopBridge handler thread started");

            while let Some(update_fn) = ui_update_rx.blocking_recv() {
                let result = ui_weak.upgrade_in_event_loop(move |ui| {
                    update_fn(&ui);
                });

                if result.is_err() {
                    // Event loop has stopped; no more updates can land.
                    break;
                }
            }

            tracing::debug!("EventLoopBridge handler thread terminated");
        });

        Self {
            tokio_handle,
            ui_update_tx,
        }
    }

    /// Schedule a UI update from any thread.
    ///
    /// The closure runs on the Slint event loop thread with the live
    /// component. Dropped with a warning if the channel is full or closed.
    pub fn update_ui<F>(&self, update: F)
    where
        F: FnOnce(&T) + Send + 'static,
    {
        match self.ui_update_tx.try_send(Box::new(update)) {
            Ok(_) => {
                crate::metrics::global().record_ui_update();
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                crate::metrics::global().record_ui_channel_full();
                tracing::warn!("UI update channel full - skipping update");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("UI update handler thread has stopped - skipping update");
            }
        }
    }

    /// Spawn an async task on the tokio runtime from a Slint callback.
    pub fn spawn_async<F, Fut>(&self, future_factory: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.tokio_handle.spawn(async move {
            future_factory().await;
        });
    }
}
