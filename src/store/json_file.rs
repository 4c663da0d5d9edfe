//! File-backed local store mirroring a browser's namespaced local storage.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use crate::dto::payload::GamePayload;
use crate::store::LocalStore;

/// File-backed [`LocalStore`]: one JSON document holding the puzzle-id →
/// payload mapping under a single namespace key, the durable analogue of a
/// browser's local storage entry. Other applications may keep their own
/// namespaces in the same document; reads ignore them and writes preserve
/// them.
///
/// All failure modes degrade to an empty store; a corrupted or unwritable
/// file only ever costs cached progress, never crashes the session.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    namespace: String,
}

type Record = IndexMap<Uuid, GamePayload>;

impl JsonFileStore {
    /// Create a store persisting to the given file under the given
    /// namespace key (see [`crate::config::EngineConfig::local_store_key`]).
    pub fn new(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: namespace.into(),
        }
    }

    /// Read the whole shared document, treating every failure as empty.
    fn read_document(&self) -> Map<String, Value> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Map::new(),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to read local store; treating as empty"
                );
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(document)) => document,
            Ok(_) => {
                warn!(
                    path = %self.path.display(),
                    "local store document is not a JSON object; treating as empty"
                );
                Map::new()
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "malformed local store document; treating as empty"
                );
                Map::new()
            }
        }
    }

    /// Deserialize this store's namespaced record out of the shared document.
    fn read_record(&self) -> Record {
        let document = self.read_document();
        let Some(record) = document.get(&self.namespace) else {
            return Record::new();
        };

        match serde_json::from_value(record.clone()) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    namespace = %self.namespace,
                    error = %err,
                    "malformed local store record; treating as empty"
                );
                Record::new()
            }
        }
    }

    /// Serialize the record back under the namespace key, leaving foreign
    /// namespaces in the document untouched; failures are logged and dropped.
    fn write_record(&self, record: &Record) {
        let value = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "failed to serialize local store record");
                return;
            }
        };

        let mut document = self.read_document();
        document.insert(self.namespace.clone(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!(
                        path = %self.path.display(),
                        error = %err,
                        "failed to create local store directory"
                    );
                    return;
                }
            }
        }

        if let Err(err) = fs::write(&self.path, Value::Object(document).to_string()) {
            warn!(
                path = %self.path.display(),
                error = %err,
                "failed to write local store; progress not cached"
            );
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalStore for JsonFileStore {
    fn load(&self, puzzle_id: Uuid) -> Option<GamePayload> {
        self.read_record().get(&puzzle_id).cloned()
    }

    fn save(&self, puzzle_id: Uuid, payload: &GamePayload) {
        let mut record = self.read_record();
        record.insert(puzzle_id, payload.clone());
        self.write_record(&record);
    }

    fn remove(&self, puzzle_id: Uuid) {
        let mut record = self.read_record();
        if record.shift_remove(&puzzle_id).is_some() {
            self.write_record(&record);
        }
    }
}
