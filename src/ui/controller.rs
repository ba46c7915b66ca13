// GUI Controller - Bridges the Slint UI with state, persistence, catalog,
// and the viewer sync
//
// This is the composition root. It:
// - Seeds the Slint window from the current state
// - Wires UI callbacks (sliders, preset/garment picks, save/reset/toggle)
//   to StateManager mutations, ProfileStore actions, and RendererSync pushes
// - Runs a background state-listener thread turning StateChange events into
//   UI model updates
// - Spawns exactly one catalog fetch per list on startup

use crate::models::{AppState, BodyField, BodyParameters, BodyPreset, ClothingItem};
use crate::persistence::ProfileStore;
use crate::services::catalog::CatalogClient;
use crate::services::renderer::RendererSync;
use crate::state::{StateChange, StateManager};
use crate::ui::bridge::EventLoopBridge;
use anyhow::{Context, Result};
use slint::{ComponentHandle, ModelRc, SharedString, VecModel};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

// Include the generated Slint code
slint::include_modules!();

/// GUI controller that wires the Slint window to the application core.
///
/// Lives for the duration of the page session: [`run()`](Self::run) blocks
/// until the window closes. All state flows through the shared
/// [`StateManager`]; the controller only translates between it, the Slint
/// models, and the outbound service boundaries.
pub struct GuiController {
    ui: MainWindow,
    _bridge: EventLoopBridge<MainWindow>,
}

impl GuiController {
    /// Create the controller: build the window, seed it from state, wire the
    /// callbacks, start the state listener, and kick off the catalog fetches.
    ///
    /// # Arguments
    /// * `state` - Shared selection-state manager
    /// * `profile_store` - Local persistence adapter for the body snapshot
    /// * `catalog` - Remote catalog client
    /// * `renderer` - Push-side of the viewer bridge
    /// * `tokio_handle` - Runtime handle for the async catalog fetches
    pub fn new(
        state: Arc<StateManager>,
        profile_store: Arc<ProfileStore>,
        catalog: Arc<CatalogClient>,
        renderer: Arc<RendererSync>,
        tokio_handle: tokio::runtime::Handle,
    ) -> Result<Self> {
        let ui = MainWindow::new().context("Failed to create Slint UI")?;
        let bridge = EventLoopBridge::new(&ui, tokio_handle);

        Self::sync_ui_with_state(&ui, &state.snapshot());

        Self::setup_callbacks(&ui, &state, &profile_store, &renderer);
        Self::setup_state_subscription(&bridge, &state);
        Self::spawn_catalog_fetches(&bridge, &state, &catalog);

        // The loaded (or default) snapshot is the first thing the viewer
        // should see. A no-op while the viewer is not ready.
        renderer.push_parameters(&state.read(|s| s.parameters));

        tracing::info!("GUI controller initialized");

        Ok(Self {
            ui,
            _bridge: bridge,
        })
    }

    /// Run the GUI (blocks until the window is closed).
    pub fn run(self) -> Result<(), slint::PlatformError> {
        tracing::info!("Starting GUI event loop");
        self.ui.run()
    }

    // -- UI model construction -----------------------------------------------

    fn slider_rows(parameters: &BodyParameters) -> ModelRc<SliderRow> {
        let rows: Vec<SliderRow> = BodyField::ALL
            .iter()
            .map(|field| SliderRow {
                label: SharedString::from(field.label()),
                unit: SharedString::from(field.unit()),
                minimum: field.min() as f32,
                maximum: field.max() as f32,
                value: parameters.get(*field) as f32,
            })
            .collect();
        ModelRc::new(VecModel::from(rows))
    }

    fn item_rows(items: &[ClothingItem], selected_id: Option<&str>) -> ModelRc<ItemRow> {
        let rows: Vec<ItemRow> = items
            .iter()
            .map(|item| ItemRow {
                name: SharedString::from(item.name.as_str()),
                category: SharedString::from(item.category.as_str()),
                description: SharedString::from(item.description.as_str()),
                selected: selected_id == Some(item.id.as_str()),
            })
            .collect();
        ModelRc::new(VecModel::from(rows))
    }

    fn preset_rows(presets: &[BodyPreset]) -> ModelRc<PresetRow> {
        let rows: Vec<PresetRow> = presets
            .iter()
            .map(|preset| PresetRow {
                name: SharedString::from(preset.name.as_str()),
                is_default: preset.is_default,
            })
            .collect();
        ModelRc::new(VecModel::from(rows))
    }

    fn category_rows(categories: &[String]) -> ModelRc<SharedString> {
        let rows: Vec<SharedString> = categories
            .iter()
            .map(|c| SharedString::from(c.as_str()))
            .collect();
        ModelRc::new(VecModel::from(rows))
    }

    /// Seed every UI property from a state snapshot.
    fn sync_ui_with_state(ui: &MainWindow, snapshot: &AppState) {
        ui.set_sliders(Self::slider_rows(&snapshot.parameters));
        ui.set_presets(Self::preset_rows(&snapshot.presets));
        ui.set_categories(Self::category_rows(&snapshot.categories()));
        ui.set_items(Self::item_rows(
            &snapshot.visible_items(),
            snapshot.selected_item.as_ref().map(|i| i.id.as_str()),
        ));
        ui.set_selected_category(SharedString::from(snapshot.selected_category.as_str()));
        ui.set_controls_visible(snapshot.controls_visible);
        ui.set_items_loading(snapshot.items_loading);
        ui.set_presets_loading(snapshot.presets_loading);
    }

    // -- Callbacks ------------------------------------------------------------

    /// Wire the Slint callbacks to state mutations and service pushes.
    ///
    /// Each callback runs on the Slint thread: the state update happens
    /// first, the re-render follows through the state subscription, and the
    /// bridge push goes out before the next user event is processed.
    fn setup_callbacks(
        ui: &MainWindow,
        state: &Arc<StateManager>,
        profile_store: &Arc<ProfileStore>,
        renderer: &Arc<RendererSync>,
    ) {
        // Per-field slider adjustment: pure merge, then push the new snapshot
        {
            let state = state.clone();
            let renderer = renderer.clone();
            ui.on_field_changed(move |field_index, value| {
                let Some(field) = BodyField::ALL.get(field_index as usize).copied() else {
                    tracing::warn!("Slider callback with unknown field index {}", field_index);
                    return;
                };
                state.set_field(field, value as f64);
                renderer.push_parameters(&state.read(|s| s.parameters));
            });
        }

        // Preset pick: wholesale snapshot replacement, then push
        {
            let state = state.clone();
            let renderer = renderer.clone();
            ui.on_preset_selected(move |preset_index| {
                let preset = state.read(|s| s.presets.get(preset_index as usize).cloned());
                let Some(preset) = preset else {
                    tracing::warn!("Preset callback with stale index {}", preset_index);
                    return;
                };
                tracing::info!("Applying preset '{}'", preset.name);
                state.apply_preset(&preset);
                renderer.push_parameters(&state.read(|s| s.parameters));
            });
        }

        // Garment pick: the index is into the currently filtered list
        {
            let state = state.clone();
            let renderer = renderer.clone();
            ui.on_item_selected(move |item_index| {
                let item = state.read(|s| s.visible_items().get(item_index as usize).cloned());
                let Some(item) = item else {
                    tracing::warn!("Item callback with stale index {}", item_index);
                    return;
                };
                tracing::info!("Selected garment '{}'", item.name);
                // Re-selecting the current garment emits no change and must
                // not re-send the model reference.
                for change in state.select_item(item) {
                    if let StateChange::GarmentSelected { model_path } = change {
                        renderer.push_garment(&model_path);
                    }
                }
            });
        }

        // Category chip: pure client-side filter, no remote query
        {
            let state = state.clone();
            ui.on_category_selected(move |category| {
                state.set_category(category.to_string());
            });
        }

        // Save: persist + success-only confirmation
        {
            let state = state.clone();
            let profile_store = profile_store.clone();
            let ui_weak = ui.as_weak();
            ui.on_save_clicked(move || {
                let parameters = state.read(|s| s.parameters);
                match profile_store.save(&parameters) {
                    Ok(()) => {
                        if let Some(ui) = ui_weak.upgrade() {
                            ui.set_status_text(SharedString::from("Body configuration saved"));
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to save body configuration: {:#}", e);
                    }
                }
            });
        }

        // Reset: restore the fixed default, clear persisted state, push
        {
            let state = state.clone();
            let profile_store = profile_store.clone();
            let renderer = renderer.clone();
            let ui_weak = ui.as_weak();
            ui.on_reset_clicked(move || {
                state.reset_parameters();
                if let Err(e) = profile_store.clear() {
                    tracing::error!("Failed to clear saved configuration: {:#}", e);
                }
                renderer.push_parameters(&state.read(|s| s.parameters));
                if let Some(ui) = ui_weak.upgrade() {
                    ui.set_status_text(SharedString::from(""));
                }
            });
        }

        // Toggle: UI-only flag, no persistence, no bridge push
        {
            let state = state.clone();
            ui.on_toggle_controls(move || {
                state.toggle_controls();
            });
        }
    }

    // -- State subscription ---------------------------------------------------

    /// Background thread that turns [`StateChange`] events into UI updates.
    fn setup_state_subscription(bridge: &EventLoopBridge<MainWindow>, state: &Arc<StateManager>) {
        let bridge = bridge.clone();
        let state = state.clone();
        let mut rx = state.subscribe();

        std::thread::spawn(move || {
            tracing::debug!("State listener thread started");

            loop {
                let change = match rx.blocking_recv() {
                    Ok(change) => change,
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(skipped)) => {
                        // Recoverable: the buffer overflowed while the UI was
                        // busy. The skipped events are stale by now, so resync
                        // the full snapshot and keep listening.
                        tracing::warn!("State listener lagged, skipped {} events", skipped);
                        let snapshot = state.snapshot();
                        bridge.update_ui(move |ui| {
                            Self::sync_ui_with_state(ui, &snapshot);
                        });
                        continue;
                    }
                };

                match change {
                    StateChange::ParametersChanged { parameters } => {
                        bridge.update_ui(move |ui| {
                            ui.set_sliders(Self::slider_rows(&parameters));
                        });
                    }

                    StateChange::GarmentSelected { .. } => {
                        let snapshot = state.snapshot();
                        bridge.update_ui(move |ui| {
                            let selected_id =
                                snapshot.selected_item.as_ref().map(|i| i.id.as_str());
                            ui.set_items(Self::item_rows(
                                &snapshot.visible_items(),
                                selected_id,
                            ));
                            if let Some(item) = &snapshot.selected_item {
                                ui.set_viewer_status(SharedString::from(
                                    format!("Garment: {}", item.name).as_str(),
                                ));
                            }
                        });
                    }

                    StateChange::ControlsToggled { visible } => {
                        bridge.update_ui(move |ui| {
                            ui.set_controls_visible(visible);
                        });
                    }

                    StateChange::CategoryChanged { category } => {
                        let snapshot = state.snapshot();
                        bridge.update_ui(move |ui| {
                            ui.set_selected_category(SharedString::from(category.as_str()));
                            ui.set_items(Self::item_rows(
                                &snapshot.visible_items(),
                                snapshot.selected_item.as_ref().map(|i| i.id.as_str()),
                            ));
                        });
                    }

                    StateChange::CatalogUpdated { .. } => {
                        let snapshot = state.snapshot();
                        bridge.update_ui(move |ui| {
                            ui.set_presets(Self::preset_rows(&snapshot.presets));
                            ui.set_categories(Self::category_rows(&snapshot.categories()));
                            ui.set_items(Self::item_rows(
                                &snapshot.visible_items(),
                                snapshot.selected_item.as_ref().map(|i| i.id.as_str()),
                            ));
                            ui.set_items_loading(snapshot.items_loading);
                            ui.set_presets_loading(snapshot.presets_loading);
                        });
                    }
                }
            }

            tracing::debug!("State listener thread terminated");
        });
    }

    // -- Catalog fetches ------------------------------------------------------

    /// Issue exactly one fetch per list. Failures are logged and degrade to
    /// an empty list; the loading indicator is always cleared when the fetch
    /// settles.
    fn spawn_catalog_fetches(
        bridge: &EventLoopBridge<MainWindow>,
        state: &Arc<StateManager>,
        catalog: &Arc<CatalogClient>,
    ) {
        {
            let state = state.clone();
            let catalog = catalog.clone();
            state.start_items_fetch();
            bridge.spawn_async(move || async move {
                let items = match catalog.list_clothing_items().await {
                    Ok(items) => {
                        tracing::info!("Fetched {} clothing items", items.len());
                        items
                    }
                    Err(e) => {
                        crate::metrics::global().record_catalog_failure();
                        tracing::error!("Failed to fetch clothing items: {}", e);
                        Vec::new()
                    }
                };
                state.finish_items_fetch(items);
            });
        }

        {
            let state = state.clone();
            let catalog = catalog.clone();
            state.start_presets_fetch();
            bridge.spawn_async(move || async move {
                let presets = match catalog.list_presets().await {
                    Ok(presets) => {
                        tracing::info!("Fetched {} body presets", presets.len());
                        presets
                    }
                    Err(e) => {
                        crate::metrics::global().record_catalog_failure();
                        tracing::error!("Failed to fetch body presets: {}", e);
                        Vec::new()
                    }
                };
                state.finish_presets_fetch(presets);
            });
        }
    }
}
