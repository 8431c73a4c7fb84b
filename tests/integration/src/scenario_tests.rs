//! Scenario tests across schema loading, the engine and file persistence
//!
//! Each test plays one session of a practice tool: load its schema from
//! disk, edit through paths, autosave to a directory, and come back later.

use form_engine::{CollectionChange, EngineOptions, FormEngine, Path, PresetOutcome};
use form_schema::SchemaLoader;
use form_store::{FileStore, SnapshotStore};
use form_test_utils::schemas::{fixture_path, weights};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// A snapshot directory plus helpers to open tools against it
struct Session {
    dir: TempDir,
}

impl Session {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn store(&self) -> Arc<dyn SnapshotStore> {
        Arc::new(FileStore::new(self.dir.path().join("snapshots")))
    }

    /// Open the tool for `schema_file` with autosave under `key`.
    fn open(&self, schema_file: &str, key: &str) -> FormEngine {
        let schema = SchemaLoader::new().load(&fixture_path(schema_file)).unwrap();
        FormEngine::create(schema, self.store(), EngineOptions::with_autosave(key))
    }
}

// =============================================================================
// Chord match
// =============================================================================

#[test]
fn test_chord_session_survives_restart() {
    let session = Session::new();
    let chords = Path::parse("chords").unwrap();

    let mut tool = session.open("chord-match.json", "chord-match");
    assert_eq!(
        tool.apply_preset("chords", "Major Scale Triads"),
        PresetOutcome::Applied
    );
    assert_eq!(tool.remove_item(&chords, 2), CollectionChange::Removed { index: 2 });
    assert!(tool.edit_text(&Path::parse("chords[1].name").unwrap(), "ii"));
    assert!(tool.edit_text(&Path::parse("tempo").unwrap(), "72"));
    tool.save_preset("chords", "I and ii").unwrap();
    let before = tool.get_current_config();
    tool.teardown();

    let reopened = session.open("chord-match.json", "chord-match");
    assert_eq!(reopened.get_current_config(), before);
    assert_eq!(reopened.get_current_config()["chords"][1]["name"], json!("ii"));
    assert_eq!(
        reopened.presets().get("chords", "I and ii"),
        Some(&before["chords"])
    );
}

#[test]
fn test_chord_export_import_between_tools() {
    let session = Session::new();
    let mut source = session.open("chord-match.json", "desk");
    source.append_item(
        &Path::parse("chords").unwrap(),
        Some(&json!({"name": "sus4", "offsets": [0, 5, 7], "weights": weights(&[7])})),
    );
    let text = source.export_config().unwrap();

    let mut target = session.open("chord-match.json", "laptop");
    target.import_config(&text).unwrap();
    assert_eq!(target.get_current_config(), source.get_current_config());
    assert_eq!(target.item_count(&Path::parse("chords").unwrap()), Some(2));
}

// =============================================================================
// Pitch match
// =============================================================================

#[test]
fn test_pitch_session_with_interval_floor() {
    let session = Session::new();
    let intervals = Path::parse("intervalWeights").unwrap();
    let mut tool = session.open("pitch-match.json", "pitch-match");

    assert_eq!(
        tool.apply_preset("intervalWeights", "stepwise"),
        PresetOutcome::Applied
    );
    assert_eq!(tool.item_count(&intervals), Some(13));

    while tool.remove_last_item(&intervals).is_applied() {}
    assert_eq!(tool.item_count(&intervals), Some(1));
    assert_eq!(tool.get_current_config()["intervalWeights"], json!([400.0]));

    let reopened = session.open("pitch-match.json", "pitch-match");
    assert_eq!(reopened.item_count(&intervals), Some(1));
}

#[test]
fn test_tools_keep_separate_slots() {
    let session = Session::new();
    let mut chord = session.open("chord-match.json", "chord-match");
    let mut pitch = session.open("pitch-match.json", "pitch-match");
    chord.set_config(&json!({"tempo": 101}), false);
    pitch.set_config(&json!({"tempo": 55}), false);

    assert_eq!(
        session.open("chord-match.json", "chord-match").get_current_config()["tempo"],
        json!(101)
    );
    assert_eq!(
        session.open("pitch-match.json", "pitch-match").get_current_config()["tempo"],
        json!(55)
    );
}

// =============================================================================
// Schema formats and sharing
// =============================================================================

#[test]
fn test_yaml_schema_drives_engine() {
    let session = Session::new();
    let path = session.dir.path().join("drill.yaml");
    fs::write(
        &path,
        r#"
title: Drill
sections:
  - title: Settings
    controls:
      - type: int
        id: rounds
        default: 4
      - type: dynamicList
        id: notes
        minLength: 1
        removeType: eachAndLast
        itemType:
          type: struct
          fields:
            - type: int
              id: pitch
              default: 60
            - type: json
              id: tags
              default: []
"#,
    )
    .unwrap();

    let schema = SchemaLoader::new().load(&path).unwrap();
    let mut engine = FormEngine::create(schema, session.store(), EngineOptions::default());
    assert_eq!(
        engine.get_current_config(),
        json!({"rounds": 4, "notes": [{"pitch": 60, "tags": []}]})
    );

    engine.set_config(
        &json!({"notes": [{"pitch": 62}, {"pitch": 64, "tags": ["accent"]}]}),
        true,
    );
    assert_eq!(
        engine.get_current_config()["notes"],
        json!([{"pitch": 62, "tags": []}, {"pitch": 64, "tags": ["accent"]}])
    );
}

#[test]
fn test_engine_shared_behind_a_lock() {
    let session = Session::new();
    let engine = Arc::new(Mutex::new(session.open("chord-match.json", "shared")));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let mut engine = engine.lock().unwrap();
                engine.append_item(
                    &Path::parse("chords").unwrap(),
                    Some(&json!({"name": format!("chord {i}")})),
                );
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let engine = engine.lock().unwrap();
    assert_eq!(engine.item_count(&Path::parse("chords").unwrap()), Some(5));
}
