// Performance metrics module
//
// Lightweight atomic counters for monitoring application activity

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Global activity metrics.
///
/// Uses atomic operations for thread-safe tracking without locks. Counters
/// are bumped throughout the application lifecycle and summarized on
/// shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Number of state updates applied through the StateManager
    pub state_updates: AtomicU64,

    /// Number of UI updates marshaled to the Slint event loop
    pub ui_updates: AtomicU64,

    /// Number of UI update channel full errors
    pub ui_update_channel_full: AtomicU64,

    /// Parameter/garment messages delivered to the renderer bridge
    pub renderer_pushes: AtomicU64,

    /// Messages skipped because the renderer was not ready
    pub renderer_skips: AtomicU64,

    /// Catalog list requests issued
    pub catalog_requests: AtomicU64,

    /// Catalog list requests that failed
    pub catalog_failures: AtomicU64,

    /// Application start time
    start_time: Instant,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Get the process-wide metrics instance.
pub fn global() -> &'static Metrics {
    METRICS.get_or_init(Metrics::new)
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            state_updates: AtomicU64::new(0),
            ui_updates: AtomicU64::new(0),
            ui_update_channel_full: AtomicU64::new(0),
            renderer_pushes: AtomicU64::new(0),
            renderer_skips: AtomicU64::new(0),
            catalog_requests: AtomicU64::new(0),
            catalog_failures: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_state_update(&self) {
        self.state_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ui_update(&self) {
        self.ui_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ui_channel_full(&self) {
        self.ui_update_channel_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_renderer_push(&self) {
        self.renderer_pushes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_renderer_skip(&self) {
        self.renderer_skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_catalog_request(&self) {
        self.catalog_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_catalog_failure(&self) {
        self.catalog_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log a metrics summary (called on shutdown).
    pub fn log_summary(&self) {
        tracing::info!("=== Activity Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "State updates: {}, UI updates: {} (channel full: {})",
            self.state_updates.load(Ordering::Relaxed),
            self.ui_updates.load(Ordering::Relaxed),
            self.ui_update_channel_full.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Renderer: {} pushed, {} skipped while not ready",
            self.renderer_pushes.load(Ordering::Relaxed),
            self.renderer_skips.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Catalog: {} requests, {} failures",
            self.catalog_requests.load(Ordering::Relaxed),
            self.catalog_failures.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
