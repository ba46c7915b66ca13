use crate::models::BodyParameters;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::sync::Arc;

/// Fixed key under which the body snapshot is persisted.
pub const PARAMETERS_KEY: &str = "body_parameters";

/// Opaque string-keyed durable store.
///
/// The persistence mechanism behind this trait is an external collaborator;
/// the adapter only assumes get/put/remove of whole string values. Mocked in
/// tests via `mockall`.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed [`KeyValueStore`]: one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: Utf8PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new<P: AsRef<Utf8Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create store directory: {}", dir))?;
        }
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Utf8PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stored value: {}", path))?;
        Ok(Some(value))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value)
            .with_context(|| format!("Failed to write stored value: {}", path))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stored value: {}", path))?;
        }
        Ok(())
    }
}

/// Local persistence adapter for the body snapshot.
///
/// Serializes the full [`BodyParameters`] snapshot as JSON under the fixed
/// [`PARAMETERS_KEY`]. A malformed or unreadable stored value is reported as
/// "not found" after logging; the caller then falls back to the default
/// snapshot. Save and clear surface store errors but no recovery is attempted
/// beyond logging at the call site.
#[derive(Clone)]
pub struct ProfileStore {
    store: Arc<dyn KeyValueStore>,
}

impl ProfileStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist the full snapshot under the fixed key.
    pub fn save(&self, parameters: &BodyParameters) -> Result<()> {
        let json = serde_json::to_string(parameters)
            .context("Failed to serialize body parameters")?;
        self.store.put(PARAMETERS_KEY, &json)?;
        tracing::info!("Saved body parameters");
        Ok(())
    }

    /// Load the persisted snapshot, or `None` when absent or unreadable.
    ///
    /// Never panics: store read errors and parse failures are logged and
    /// reported as "not found" so the application can fall back to the
    /// default snapshot.
    pub fn load(&self) -> Option<BodyParameters> {
        let stored = match self.store.get(PARAMETERS_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Failed to read saved body parameters: {:#}", e);
                return None;
            }
        };

        let json = stored?;
        match serde_json::from_str(&json) {
            Ok(parameters) => {
                tracing::info!("Loaded saved body parameters");
                Some(parameters)
            }
            Err(e) => {
                tracing::error!("Saved body parameters are malformed: {}", e);
                None
            }
        }
    }

    /// Remove the persisted snapshot.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(PARAMETERS_KEY)?;
        tracing::info!("Cleared saved body parameters");
        Ok(())
    }
}
