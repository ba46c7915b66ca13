// State management module
//
// Wraps AppState with thread-safe access behind Arc<RwLock<T>> and emits
// change events so the GUI and the renderer sync can react without polling.

use crate::models::{AppState, BodyField, BodyParameters, BodyPreset, ClothingItem};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is modified.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The body snapshot was replaced (field edit, preset, reset, or load).
    ParametersChanged { parameters: BodyParameters },

    /// A garment with a defined model reference was selected.
    GarmentSelected { model_path: String },

    /// The adjustment/preset panels were shown or hidden.
    ControlsToggled { visible: bool },

    /// The client-side category filter changed.
    CategoryChanged { category: String },

    /// Catalog lists or their loading indicators changed.
    CatalogUpdated {
        items: usize,
        presets: usize,
        items_loading: bool,
        presets_loading: bool,
    },
}

/// Thread-safe state manager with event emission.
///
/// The composition root's single source of truth:
/// - [`read()`](Self::read) for read access without long-held locks
/// - [`update()`](Self::update) for mutations with automatic change events
/// - [`subscribe()`](Self::subscribe) for listening to state changes
///
/// # Related Types
///
/// - [`crate::models::AppState`]: the underlying state structure
/// - [`StateChange`]: event types emitted on state mutations
/// - [`crate::ui::GuiController`]: primary consumer of state events
pub struct StateManager {
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for state change events; multiple subscribers allowed.
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state and a 100-event buffer.
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            state_tx,
        }
    }

    /// Get a read-only clone of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.read().unwrap().clone()
    }

    /// Execute a function with read access to the state.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Update the state and emit change events.
    ///
    /// Captures the old state, applies `update_fn`, diffs old against new,
    /// and broadcasts one event per detected change.
    ///
    /// # Returns
    /// The events that were emitted, in emission order.
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut AppState),
    {
        let mut state = self.state.write().unwrap();
        let old_state = state.clone();

        update_fn(&mut state);
        crate::metrics::global().record_state_update();

        let changes = self.detect_changes(&old_state, &state);
        for change in &changes {
            // Send errors just mean no one is listening yet.
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Diff two states into the events to broadcast.
    fn detect_changes(&self, old: &AppState, new: &AppState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.parameters != new.parameters {
            changes.push(StateChange::ParametersChanged {
                parameters: new.parameters,
            });
        }

        // Only a change *to* a defined model reference is a garment event;
        // deselection has no renderer-facing meaning.
        let old_path = old.selected_item.as_ref().map(|i| i.model_path.as_str());
        let new_path = new.selected_item.as_ref().map(|i| i.model_path.as_str());
        if old_path != new_path {
            if let Some(path) = new_path {
                changes.push(StateChange::GarmentSelected {
                    model_path: path.to_string(),
                });
            }
        }

        if old.controls_visible != new.controls_visible {
            changes.push(StateChange::ControlsToggled {
                visible: new.controls_visible,
            });
        }

        if old.selected_category != new.selected_category {
            changes.push(StateChange::CategoryChanged {
                category: new.selected_category.clone(),
            });
        }

        if old.items != new.items
            || old.presets != new.presets
            || old.items_loading != new.items_loading
            || old.presets_loading != new.presets_loading
        {
            changes.push(StateChange::CatalogUpdated {
                items: new.items.len(),
                presets: new.presets.len(),
                items_loading: new.items_loading,
                presets_loading: new.presets_loading,
            });
        }

        changes
    }

    // Convenience methods for the composition-root transitions

    /// Merge a single field change into a new complete snapshot.
    pub fn set_field(&self, field: BodyField, value: f64) -> Vec<StateChange> {
        self.update(|state| {
            state.parameters = state.parameters.with_field(field, value);
        })
    }

    /// Replace the snapshot wholesale (startup load).
    pub fn replace_parameters(&self, parameters: BodyParameters) -> Vec<StateChange> {
        self.update(|state| {
            state.parameters = parameters;
        })
    }

    /// Replace the snapshot wholesale with a preset's embedded parameters,
    /// discarding any unsaved slider adjustments.
    pub fn apply_preset(&self, preset: &BodyPreset) -> Vec<StateChange> {
        self.update(|state| {
            state.parameters = preset.parameters;
        })
    }

    /// Select a garment.
    pub fn select_item(&self, item: ClothingItem) -> Vec<StateChange> {
        self.update(|state| {
            state.selected_item = Some(item);
        })
    }

    /// Change the client-side category filter.
    pub fn set_category(&self, category: String) -> Vec<StateChange> {
        self.update(|state| {
            state.selected_category = category;
        })
    }

    /// Flip the controls-panel visibility flag. UI-only.
    pub fn toggle_controls(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.controls_visible = !state.controls_visible;
        })
    }

    /// Restore the fixed default snapshot.
    pub fn reset_parameters(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.reset_parameters();
        })
    }

    /// Mark the clothing-items fetch as in flight.
    pub fn start_items_fetch(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.items_loading = true;
        })
    }

    /// Store fetched items and clear the loading indicator. Called on both
    /// success and failure (failure passes an empty list).
    pub fn finish_items_fetch(&self, items: Vec<ClothingItem>) -> Vec<StateChange> {
        self.update(|state| {
            state.items = items;
            state.items_loading = false;
        })
    }

    /// Mark the presets fetch as in flight.
    pub fn start_presets_fetch(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.presets_loading = true;
        })
    }

    /// Store fetched presets and clear the loading indicator.
    pub fn finish_presets_fetch(&self, presets: Vec<BodyPreset>) -> Vec<StateChange> {
        self.update(|state| {
            state.presets = presets;
            state.presets_loading = false;
        })
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Cloneable for sharing across the UI thread, listener thread, and tokio tasks
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: &str) -> ClothingItem {
        ClothingItem {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: category.to_string(),
            model_path: format!("models/{}.glb", id),
            thumbnail_url: String::new(),
            sizes: Vec::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_new_state_manager() {
        let manager = StateManager::new();
        let state = manager.snapshot();

        assert_eq!(state.parameters, BodyParameters::default());
        assert!(state.selected_item.is_none());
    }

    #[test]
    fn test_set_field_emits_parameters_changed() {
        let manager = StateManager::new();

        let changes = manager.set_field(BodyField::Height, 185.0);

        assert_eq!(changes.len(), 1);
        assert!(matches!(
            &changes[0],
            StateChange::ParametersChanged { parameters } if parameters.height == 185.0
        ));
    }

    #[test]
    fn test_set_field_to_same_value_emits_nothing() {
        let manager = StateManager::new();
        manager.set_field(BodyField::Height, 185.0);

        let changes = manager.set_field(BodyField::Height, 185.0);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_select_item_emits_garment_selected() {
        let manager = StateManager::new();

        let changes = manager.select_item(item("1", "tops"));

        assert_eq!(changes.len(), 1);
        assert!(matches!(
            &changes[0],
            StateChange::GarmentSelected { model_path } if model_path == "models/1.glb"
        ));
    }

    #[test]
    fn test_reselecting_same_garment_emits_nothing() {
        let manager = StateManager::new();
        manager.select_item(item("1", "tops"));

        let changes = manager.select_item(item("1", "tops"));
        assert!(changes.is_empty());
    }

    #[test]
    fn test_apply_preset_replaces_wholesale() {
        let manager = StateManager::new();
        manager.set_field(BodyField::Waist, 110.0);

        let preset = BodyPreset {
            id: "p1".to_string(),
            name: "Athletic".to_string(),
            parameters: BodyParameters {
                height: 182.0,
                ..BodyParameters::default()
            },
            is_default: false,
            created_at: String::new(),
        };

        manager.apply_preset(&preset);

        let state = manager.snapshot();
        assert_eq!(state.parameters.height, 182.0);
        // Unsaved waist adjustment discarded by the wholesale replacement
        assert_eq!(state.parameters.waist, BodyParameters::default().waist);
    }

    #[test]
    fn test_toggle_controls() {
        let manager = StateManager::new();

        let changes = manager.toggle_controls();
        assert!(matches!(
            changes[0],
            StateChange::ControlsToggled { visible: false }
        ));

        let changes = manager.toggle_controls();
        assert!(matches!(
            changes[0],
            StateChange::ControlsToggled { visible: true }
        ));
    }

    #[test]
    fn test_category_change() {
        let manager = StateManager::new();

        let changes = manager.set_category("dresses".to_string());
        assert!(matches!(
            &changes[0],
            StateChange::CategoryChanged { category } if category == "dresses"
        ));
    }

    #[test]
    fn test_fetch_lifecycle_events() {
        let manager = StateManager::new();

        let changes = manager.start_items_fetch();
        assert!(matches!(
            changes[0],
            StateChange::CatalogUpdated {
                items_loading: true,
                ..
            }
        ));

        let changes = manager.finish_items_fetch(vec![item("1", "tops")]);
        assert!(matches!(
            changes[0],
            StateChange::CatalogUpdated {
                items: 1,
                items_loading: false,
                ..
            }
        ));
    }

    #[test]
    fn test_failed_fetch_clears_loading_with_empty_list() {
        let manager = StateManager::new();
        manager.start_presets_fetch();

        manager.finish_presets_fetch(Vec::new());

        let state = manager.snapshot();
        assert!(!state.presets_loading);
        assert!(state.presets.is_empty());
    }

    #[test]
    fn test_subscribe_receives_events() {
        let manager = StateManager::new();
        let mut rx = manager.subscribe();

        manager.set_field(BodyField::Chest, 100.0);

        let event = rx.try_recv().unwrap();
        assert!(matches!(event, StateChange::ParametersChanged { .. }));
    }

    #[test]
    fn test_clone_shares_state() {
        let manager1 = StateManager::new();
        let manager2 = manager1.clone();

        manager1.set_field(BodyField::Hips, 120.0);

        assert_eq!(manager2.snapshot().parameters.hips, 120.0);
    }
}
