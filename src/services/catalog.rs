//! REST client for the remote catalog store.
//!
//! Wraps the two read-only queries the application needs (clothing items,
//! body presets) using [`reqwest`]. The desired ordering is expressed as a
//! query parameter so the store performs it; nothing is re-sorted
//! client-side. There is no caching, retrying, pagination, or timeout: each
//! UI mount issues exactly one request per list and callers degrade to an
//! empty list on failure.

use crate::models::{BodyPreset, ClothingItem};

/// Environment variable holding the catalog base URL.
pub const CATALOG_URL_ENV: &str = "FITROOM_CATALOG_URL";

/// Environment variable holding the catalog API key.
pub const CATALOG_KEY_ENV: &str = "FITROOM_CATALOG_KEY";

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store returned a non-2xx status code.
    #[error("catalog error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the catalog store's REST interface.
///
/// The collection names (`clothing_items`, `body_presets`) and the record
/// field names are part of the wire contract shared with the store.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CatalogClient {
    /// Create a client for the store at `base_url` (no trailing slash).
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Create a client from the `FITROOM_CATALOG_URL` / `FITROOM_CATALOG_KEY`
    /// environment variables. Missing variables leave the fields empty, which
    /// makes every request fail and the UI degrade to empty lists.
    pub fn from_env() -> Self {
        let base_url = std::env::var(CATALOG_URL_ENV).unwrap_or_default();
        let api_key = std::env::var(CATALOG_KEY_ENV).unwrap_or_default();
        if base_url.is_empty() {
            tracing::warn!(
                "{} is not set; catalog lists will be empty",
                CATALOG_URL_ENV
            );
        }
        Self::new(base_url, api_key)
    }

    /// URL for the clothing-items query, ordered by recency.
    ///
    /// The `order=created_at.desc` parameter is the ordering contract with
    /// the store.
    pub fn items_url(&self) -> String {
        format!(
            "{}/rest/v1/clothing_items?select=*&order=created_at.desc",
            self.base_url
        )
    }

    /// URL for the presets query, default-flagged entries first.
    ///
    /// The `order=is_default.desc` parameter is the ordering contract with
    /// the store; results are not re-sorted client-side.
    pub fn presets_url(&self) -> String {
        format!(
            "{}/rest/v1/body_presets?select=*&order=is_default.desc",
            self.base_url
        )
    }

    /// Fetch all clothing items, newest first.
    pub async fn list_clothing_items(&self) -> Result<Vec<ClothingItem>, CatalogError> {
        self.get_list(&self.items_url()).await
    }

    /// Fetch all body presets, default-flagged entries first.
    pub async fn list_presets(&self) -> Result<Vec<BodyPreset>, CatalogError> {
        self.get_list(&self.presets_url()).await
    }

    async fn get_list<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Vec<T>, CatalogError> {
        crate::metrics::global().record_catalog_request();

        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
