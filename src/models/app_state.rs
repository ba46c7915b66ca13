use crate::models::body::BodyParameters;
use crate::models::catalog::{self, BodyPreset, ClothingItem};

/// Single source of truth for all selection state.
///
/// Owned exclusively by the composition root through
/// [`StateManager`](crate::state::StateManager), which wraps it in
/// `Arc<RwLock<AppState>>`. Never mutate `AppState` directly; go through
/// [`StateManager::update()`](crate::state::StateManager::update) so change
/// events are emitted.
///
/// # Related Types
///
/// - [`crate::state::StateManager`]: thread-safe wrapper with event emission
/// - [`crate::state::StateChange`]: event types for state mutations
/// - [`crate::persistence::ProfileStore`]: loads/saves the parameter snapshot
#[derive(Clone, Debug)]
pub struct AppState {
    /// Current body snapshot. Replaced wholesale on every change.
    pub parameters: BodyParameters,

    /// Currently selected garment. `None` means no garment loaded.
    pub selected_item: Option<ClothingItem>,

    /// Visibility of the adjustment/preset panels. UI-only, never persisted.
    pub controls_visible: bool,

    // Catalog data (read-only copies of remote records)
    pub items: Vec<ClothingItem>,
    pub presets: Vec<BodyPreset>,

    // Loading indicators for the two catalog fetches
    pub items_loading: bool,
    pub presets_loading: bool,

    /// Client-side category filter. Free-form string; "all" selects everything.
    pub selected_category: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            parameters: BodyParameters::default(),
            selected_item: None,
            controls_visible: true,
            items: Vec::new(),
            presets: Vec::new(),
            items_loading: false,
            presets_loading: false,
            selected_category: catalog::ALL_CATEGORY.to_string(),
        }
    }
}

impl AppState {
    /// Items visible under the current category filter, in fetch order.
    pub fn visible_items(&self) -> Vec<ClothingItem> {
        catalog::filter_by_category(&self.items, &self.selected_category)
    }

    /// Category chips derived from the fetched items ("all" first).
    pub fn categories(&self) -> Vec<String> {
        catalog::derive_categories(&self.items)
    }

    /// Model reference of the selected garment, if any.
    pub fn selected_model_path(&self) -> Option<&str> {
        self.selected_item.as_ref().map(|item| item.model_path.as_str())
    }

    /// Restore the fixed default snapshot. Selection and catalog data are
    /// untouched; only the body parameters reset.
    pub fn reset_parameters(&mut self) {
        self.parameters = BodyParameters::default();
    }
}
