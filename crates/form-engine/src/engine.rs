//! The form engine API
//!
//! [`FormEngine`] binds one [`Schema`] to a live tree, owns that schema's
//! preset tables, and persists snapshots to a [`SnapshotStore`].
//!
//! Mutating methods take `&mut self`. An engine shared between threads must
//! sit behind a single lock, e.g. `Arc<Mutex<FormEngine>>`.

use crate::collection::{CollectionChange, RefusalReason};
use crate::live::LiveTree;
use crate::path::Path;
use crate::preset::{PresetOutcome, PresetTables, is_no_change};
use crate::{Error, Result};
use form_schema::{Schema, default_of};
use form_store::{Snapshot, SnapshotStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Engine behaviour chosen by the embedding tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    /// Store key written after every change; `None` disables autosave
    pub autosave_key: Option<String>,
    /// Restore from `autosave_key` at creation when a snapshot exists
    pub load_from_autosave: bool,
}

impl EngineOptions {
    pub fn with_autosave(key: impl Into<String>) -> Self {
        Self {
            autosave_key: Some(key.into()),
            load_from_autosave: true,
        }
    }
}

/// A live, editable configuration form
pub struct FormEngine {
    schema: Schema,
    tree: LiveTree,
    presets: PresetTables,
    store: Arc<dyn SnapshotStore>,
    options: EngineOptions,
}

impl std::fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormEngine")
            .field("title", &self.schema.title())
            .field("nodes", &self.tree.len())
            .field("store", &self.store.name())
            .field("options", &self.options)
            .finish()
    }
}

impl FormEngine {
    /// Build the live form for `schema`.
    ///
    /// With `load_from_autosave` set and a snapshot present under the
    /// autosave key, the snapshot is restored; otherwise defaults apply.
    pub fn create(schema: Schema, store: Arc<dyn SnapshotStore>, options: EngineOptions) -> Self {
        let tree = LiveTree::build(schema.root());
        let presets = PresetTables::from_schema(&schema);
        let mut engine = Self {
            schema,
            tree,
            presets,
            store,
            options,
        };

        let restored = match engine.options.autosave_key.clone() {
            Some(key) if engine.options.load_from_autosave => engine.load_snapshot(&key),
            _ => false,
        };
        if !restored {
            engine.reset_config();
        }
        engine
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn presets(&self) -> &PresetTables {
        &self.presets
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn is_torn_down(&self) -> bool {
        self.tree.is_torn_down()
    }

    /// Current configuration value; `null` after teardown.
    pub fn get_current_config(&self) -> Value {
        self.tree.serialize()
    }

    /// Write `value` onto the form. Fields absent from `value` keep their
    /// current values.
    pub fn set_config(&mut self, value: &Value, skip_autosave: bool) {
        if self.tree.is_torn_down() {
            tracing::debug!("Ignoring configuration write after teardown");
            return;
        }
        self.tree.deserialize(value);
        if !skip_autosave {
            self.autosave();
        }
    }

    /// Restore every field to its schema default.
    pub fn reset_config(&mut self) {
        let defaults = default_of(self.schema.root());
        self.set_config(&defaults, false);
    }

    /// Current configuration as pretty-printed JSON
    pub fn export_config(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(serde_json::to_string_pretty(&self.get_current_config())?)
    }

    /// Replace the configuration with exported JSON text.
    ///
    /// The text is fully parsed before anything is written; on failure the
    /// form is unchanged.
    pub fn import_config(&mut self, text: &str) -> Result<()> {
        self.ensure_live()?;
        let value: Value = serde_json::from_str(text).map_err(|e| Error::import(e.to_string()))?;
        if !value.is_object() {
            return Err(Error::import("expected a JSON object at the top level"));
        }
        self.set_config(&value, false);
        Ok(())
    }

    /// Save the current value of `field` as preset `name`.
    ///
    /// The name is trimmed; an existing preset of that name is replaced.
    pub fn save_preset(&mut self, field: &str, name: &str) -> Result<()> {
        self.ensure_live()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyPresetName);
        }
        let path = Path::parse(field)?;
        let value = self
            .value_at(&path)
            .ok_or_else(|| Error::field_not_found(&path))?;
        self.presets.insert(&path.to_string(), name, value);
        tracing::debug!("Saved preset '{}' for '{}'", name, path);
        self.autosave();
        Ok(())
    }

    /// Write preset `name` into `field` only.
    pub fn apply_preset(&mut self, field: &str, name: &str) -> PresetOutcome {
        let path = match Path::parse(field) {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("Preset '{}' not applied: {}", name, e);
                return PresetOutcome::Missing;
            }
        };
        let Some(value) = self.presets.get(&path.to_string(), name).cloned() else {
            tracing::debug!("No preset '{}' for '{}'", name, path);
            return PresetOutcome::Missing;
        };
        if is_no_change(&value) {
            return PresetOutcome::NoChange;
        }
        let Some(id) = self.tree.resolve(&path) else {
            return PresetOutcome::Missing;
        };
        self.tree.deserialize_node(id, &value);
        tracing::debug!("Applied preset '{}' to '{}'", name, path);
        self.autosave();
        PresetOutcome::Applied
    }

    /// Preset names available for `field`, in insertion order
    pub fn preset_names(&self, field: &str) -> Vec<String> {
        match Path::parse(field) {
            Ok(path) => self.presets.names(&path.to_string()),
            Err(_) => Vec::new(),
        }
    }

    /// Persist the configuration and preset tables under `key`.
    ///
    /// Store failures are logged and reported as `false`.
    pub fn save_snapshot(&self, key: &str) -> bool {
        match self.try_save_snapshot(key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Snapshot '{}' not saved: {}", key, e);
                false
            }
        }
    }

    /// Like [`save_snapshot`](Self::save_snapshot), but returns the failure.
    pub fn try_save_snapshot(&self, key: &str) -> Result<()> {
        self.ensure_live()?;
        let snapshot = Snapshot::new(self.get_current_config(), self.presets.to_map());
        self.store.write(key, &snapshot.to_json()?)?;
        tracing::debug!("Saved snapshot '{}' to {} store", key, self.store.name());
        Ok(())
    }

    /// Restore the snapshot stored under `key`, without autosaving it back.
    ///
    /// Returns `false` when the slot is empty, unreadable or malformed.
    pub fn load_snapshot(&mut self, key: &str) -> bool {
        if self.tree.is_torn_down() {
            return false;
        }
        let content = match self.store.read(key) {
            Ok(Some(content)) => content,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!("Snapshot '{}' not loaded: {}", key, e);
                return false;
            }
        };
        let Some(snapshot) = Snapshot::parse(&content) else {
            return false;
        };
        if !snapshot.config.is_object() {
            tracing::warn!("Snapshot '{}' does not hold a configuration object", key);
            return false;
        }
        self.presets.merge(&snapshot.presets);
        self.set_config(&snapshot.config, true);
        tracing::debug!("Loaded snapshot '{}'", key);
        true
    }

    /// Configuration value of the node at `path`
    pub fn value_at(&self, path: &Path) -> Option<Value> {
        let id = self.tree.resolve(path)?;
        Some(self.tree.serialize_node(id))
    }

    /// Write `value` onto the node at `path`. Returns false when absent.
    pub fn edit_value(&mut self, path: &Path, value: &Value) -> bool {
        let Some(id) = self.tree.resolve(path) else {
            return false;
        };
        self.tree.deserialize_node(id, value);
        self.autosave();
        true
    }

    /// Apply raw editor text to the primitive at `path`.
    ///
    /// Returns false when there is no primitive at `path`.
    pub fn edit_text(&mut self, path: &Path, text: &str) -> bool {
        let Some(id) = self.tree.resolve(path) else {
            return false;
        };
        if !self.tree.set_text(id, text) {
            return false;
        }
        self.autosave();
        true
    }

    /// Number of items of the collection at `path`
    pub fn item_count(&self, path: &Path) -> Option<usize> {
        self.tree.item_count(self.tree.resolve(path)?)
    }

    /// Append an item to the dynamic collection at `path`.
    pub fn append_item(&mut self, path: &Path, default: Option<&Value>) -> CollectionChange {
        let Some(id) = self.tree.resolve(path) else {
            return CollectionChange::Refused(RefusalReason::Missing);
        };
        let change = self.tree.append(id, default);
        self.after_change(change)
    }

    /// Remove item `k` of the dynamic collection at `path`.
    pub fn remove_item(&mut self, path: &Path, k: usize) -> CollectionChange {
        let Some(id) = self.tree.resolve(path) else {
            return CollectionChange::Refused(RefusalReason::Missing);
        };
        let change = self.tree.remove_at(id, k);
        self.after_change(change)
    }

    /// Remove the tail item of the dynamic collection at `path`.
    pub fn remove_last_item(&mut self, path: &Path) -> CollectionChange {
        let Some(id) = self.tree.resolve(path) else {
            return CollectionChange::Refused(RefusalReason::Missing);
        };
        let change = self.tree.remove_last(id);
        self.after_change(change)
    }

    /// Release the live tree. Later reads yield `null`, writes are ignored.
    pub fn teardown(&mut self) {
        self.tree.teardown();
    }

    fn after_change(&self, change: CollectionChange) -> CollectionChange {
        if change.is_applied() {
            self.autosave();
        }
        change
    }

    fn autosave(&self) {
        if let Some(key) = &self.options.autosave_key {
            tracing::debug!("Autosaving to '{}'", key);
            self.save_snapshot(key);
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.tree.is_torn_down() {
            Err(Error::TornDown)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_schema::{FieldDescriptor, PrimitiveType};
    use form_store::{MemoryStore, NullStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new(
            Some("Test".into()),
            vec![
                FieldDescriptor::primitive("tempo", PrimitiveType::Integer, Some(json!(80))),
                FieldDescriptor::dynamic_collection(
                    "names",
                    FieldDescriptor::primitive("", PrimitiveType::Text, None),
                    Some(vec![json!("a")]),
                ),
            ],
        )
        .unwrap()
    }

    fn engine_with(store: Arc<dyn SnapshotStore>, options: EngineOptions) -> FormEngine {
        FormEngine::create(schema(), store, options)
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<FormEngine>();
    }

    #[test]
    fn test_create_applies_defaults() {
        let engine = engine_with(Arc::new(MemoryStore::new()), EngineOptions::default());
        assert_eq!(engine.get_current_config(), json!({"tempo": 80, "names": ["a"]}));
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let options: EngineOptions =
            serde_json::from_str(r#"{"autosaveKey": "pitch", "loadFromAutosave": true}"#).unwrap();
        assert_eq!(options, EngineOptions::with_autosave("pitch"));
        let empty: EngineOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, EngineOptions::default());
    }

    #[test]
    fn test_export_is_pretty_json() {
        let engine = engine_with(Arc::new(MemoryStore::new()), EngineOptions::default());
        let text = engine.export_config().unwrap();
        assert!(text.contains("\n  \"tempo\": 80"));
    }

    #[test]
    fn test_import_rejects_non_objects() {
        let mut engine = engine_with(Arc::new(MemoryStore::new()), EngineOptions::default());
        assert!(matches!(engine.import_config("[1, 2]"), Err(Error::Import { .. })));
        assert!(matches!(engine.import_config("{tempo"), Err(Error::Import { .. })));
        assert_eq!(engine.get_current_config()["tempo"], json!(80));
    }

    #[test]
    fn test_unavailable_store_degrades() {
        let mut engine = engine_with(Arc::new(NullStore), EngineOptions::with_autosave("k"));
        engine.set_config(&json!({"tempo": 90}), false);
        assert_eq!(engine.get_current_config()["tempo"], json!(90));
        assert!(!engine.save_snapshot("k"));
        assert!(!engine.load_snapshot("k"));
        assert!(engine.try_save_snapshot("k").is_err());
    }

    #[test]
    fn test_teardown_blocks_further_use() {
        let mut engine = engine_with(Arc::new(MemoryStore::new()), EngineOptions::default());
        engine.teardown();
        engine.teardown();
        assert_eq!(engine.get_current_config(), Value::Null);
        assert!(matches!(engine.export_config(), Err(Error::TornDown)));
        assert!(matches!(engine.save_preset("tempo", "x"), Err(Error::TornDown)));
        assert_eq!(engine.apply_preset("tempo", "x"), PresetOutcome::Missing);
        assert_eq!(
            engine.append_item(&Path::parse("names").unwrap(), None),
            CollectionChange::Refused(RefusalReason::Missing)
        );
    }
}
