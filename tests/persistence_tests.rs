//! Integration tests for the local persistence adapter
//!
//! These tests verify:
//! - Save/load round-trips through a real file-backed store
//! - Malformed stored values degrade to "not found" instead of crashing
//! - Clear removes the persisted snapshot
//! - The save → reset → load flow the composition root performs

use camino::Utf8PathBuf;
use fitroom::{BodyField, BodyParameters, FileStore, KeyValueStore, ProfileStore, StateManager};
use std::sync::Arc;
use tempfile::TempDir;

fn store_in(temp_dir: &TempDir) -> ProfileStore {
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    ProfileStore::new(Arc::new(FileStore::new(dir).unwrap()))
}

#[test]
fn test_round_trip_preserves_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let params = BodyParameters::default()
        .with_field(BodyField::Height, 187.5)
        .with_field(BodyField::ArmLength, 66.0);

    store.save(&params).unwrap();
    assert_eq!(store.load(), Some(params));
}

#[test]
fn test_missing_snapshot_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    assert_eq!(store.load(), None);
}

#[test]
fn test_corrupted_snapshot_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let kv = Arc::new(FileStore::new(dir).unwrap());
    kv.put(fitroom::persistence::PARAMETERS_KEY, "][ not json ][")
        .unwrap();

    let store = ProfileStore::new(kv);

    // A parse failure reads as "not found"...
    assert_eq!(store.load(), None);

    // ...and the application-level fallback is the fixed default baseline.
    let state = StateManager::new();
    if let Some(saved) = store.load() {
        state.replace_parameters(saved);
    }
    let params = state.snapshot().parameters;
    assert_eq!(params.height, 170.0);
    assert_eq!(params.chest, 90.0);
    assert_eq!(params.waist, 75.0);
    assert_eq!(params.hips, 95.0);
    assert_eq!(params.shoulders, 40.0);
    assert_eq!(params.arm_length, 60.0);
    assert_eq!(params.leg_length, 85.0);
}

#[test]
fn test_partial_snapshot_is_rejected() {
    // All seven fields must be present; a truncated record is a parse
    // failure, not a partial load.
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let kv = Arc::new(FileStore::new(dir).unwrap());
    kv.put(
        fitroom::persistence::PARAMETERS_KEY,
        r#"{"height": 180, "chest": 95}"#,
    )
    .unwrap();

    let store = ProfileStore::new(kv);
    assert_eq!(store.load(), None);
}

#[test]
fn test_clear_removes_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.save(&BodyParameters::default()).unwrap();
    store.clear().unwrap();

    assert_eq!(store.load(), None);
}

#[test]
fn test_reset_flow_clears_persisted_state() {
    // Composition-root reset: restore the baseline and clear the store,
    // regardless of what was saved before.
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let state = StateManager::new();

    state.set_field(BodyField::Hips, 130.0);
    store.save(&state.snapshot().parameters).unwrap();

    state.reset_parameters();
    store.clear().unwrap();

    assert_eq!(state.snapshot().parameters, BodyParameters::default());
    assert_eq!(store.load(), None);
}

#[test]
fn test_save_overwrites_previous_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let first = BodyParameters::default().with_field(BodyField::Height, 160.0);
    let second = BodyParameters::default().with_field(BodyField::Height, 195.0);

    store.save(&first).unwrap();
    store.save(&second).unwrap();

    assert_eq!(store.load(), Some(second));
}

#[test]
fn test_out_of_range_snapshot_loads_unchanged() {
    // The adapter neither clamps nor validates ranges on load; the model is
    // permissive by design.
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let params = BodyParameters::default().with_field(BodyField::Height, 400.0);
    store.save(&params).unwrap();

    assert_eq!(store.load().unwrap().height, 400.0);
}
