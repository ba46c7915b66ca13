//! Synchronization bridge to the external 3D viewer.
//!
//! The viewer is an opaque renderer addressed by fixed logical receiver and
//! method names. Delivery is one-directional, best-effort, fire-and-forget:
//! when the viewer is not ready a push is silently dropped (counted and
//! logged at debug), nothing is queued or retried, and no acknowledgment is
//! consumed. Only the latest state at the time of a successful delivery
//! attempt reaches the viewer.

use crate::models::BodyParameters;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

/// Logical receiver handling body-shape updates inside the viewer.
pub const BODY_RECEIVER: &str = "BodyController";

/// Method on [`BODY_RECEIVER`] accepting the JSON-encoded snapshot.
pub const BODY_METHOD: &str = "UpdateBodyParameters";

/// Logical receiver handling garment loading inside the viewer.
pub const CLOTHING_RECEIVER: &str = "ClothingController";

/// Method on [`CLOTHING_RECEIVER`] accepting a model reference.
pub const CLOTHING_METHOD: &str = "LoadClothing";

/// Injected capability for talking to the viewer.
///
/// Abstracts the viewer's global readiness flag and send function so the
/// composition root never touches a global handle and tests can substitute a
/// recording double.
pub trait RendererBridge: Send + Sync {
    /// Whether the viewer has finished initializing.
    fn is_ready(&self) -> bool;

    /// Fire-and-forget message send. Implementations must not block.
    fn send(&self, receiver: &str, method: &str, payload: &str);
}

/// One outbound message addressed to a logical receiver in the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererMessage {
    pub receiver: String,
    pub method: String,
    pub payload: String,
}

/// Channel-backed [`RendererBridge`] implementation.
///
/// The receiver half of the channel is handed to whatever hosts the embedded
/// viewer; the host calls [`set_ready`](Self::set_ready) once the viewer has
/// initialized. Until then every send is skipped upstream by
/// [`RendererSync`].
pub struct ChannelRenderer {
    ready: AtomicBool,
    tx: mpsc::Sender<RendererMessage>,
}

impl ChannelRenderer {
    /// Create the bridge and the message receiver for the viewer host.
    ///
    /// The channel is bounded: if the host stops draining, messages are
    /// dropped with a warning rather than buffered without limit.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<RendererMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                ready: AtomicBool::new(false),
                tx,
            },
            rx,
        )
    }

    /// Mark the viewer ready (or not). Readiness only gates future pushes;
    /// nothing missed while unready is replayed.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }
}

impl RendererBridge for ChannelRenderer {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn send(&self, receiver: &str, method: &str, payload: &str) {
        let message = RendererMessage {
            receiver: receiver.to_string(),
            method: method.to_string(),
            payload: payload.to_string(),
        };

        match self.tx.try_send(message) {
            Ok(_) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!("Viewer channel full - dropping message");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("Viewer channel closed - dropping message");
            }
        }
    }
}

/// Push logic for the two outbound message kinds.
///
/// Sits between the composition root and a [`RendererBridge`]: serializes the
/// snapshot, checks readiness, and either delivers or skips.
pub struct RendererSync {
    bridge: Arc<dyn RendererBridge>,
}

impl RendererSync {
    pub fn new(bridge: Arc<dyn RendererBridge>) -> Self {
        Self { bridge }
    }

    /// Deliver the full snapshot to `(BodyController, UpdateBodyParameters)`.
    ///
    /// Skipped silently when the viewer is not ready; the change is lost
    /// until the next push.
    pub fn push_parameters(&self, parameters: &BodyParameters) {
        if !self.bridge.is_ready() {
            crate::metrics::global().record_renderer_skip();
            tracing::debug!("Viewer not ready - skipping body parameter push");
            return;
        }

        match serde_json::to_string(parameters) {
            Ok(payload) => {
                self.bridge.send(BODY_RECEIVER, BODY_METHOD, &payload);
                crate::metrics::global().record_renderer_push();
            }
            Err(e) => {
                tracing::error!("Failed to encode body parameters: {}", e);
            }
        }
    }

    /// Deliver a garment model reference to `(ClothingController, LoadClothing)`.
    pub fn push_garment(&self, model_path: &str) {
        if !self.bridge.is_ready() {
            crate::metrics::global().record_renderer_skip();
            tracing::debug!("Viewer not ready - skipping garment push");
            return;
        }

        self.bridge.send(CLOTHING_RECEIVER, CLOTHING_METHOD, model_path);
        crate::metrics::global().record_renderer_push();
    }
}
