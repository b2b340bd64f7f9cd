use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::MatchRecord;

pub const DEFAULT_DATA_FILE: &str = "the_champion_data.json";

const MATCHES_KEY: &str = "matches";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid JSON in data file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("data file {path} does not contain a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The root persisted structure: the typed match list plus any other
/// top-level keys, which ride along untouched so a foreign key in an existing
/// file survives a session round-trip verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub matches: Vec<MatchRecord>,
    pub extra: Map<String, Value>,
}

impl Document {
    /// Splits a parsed JSON root into the typed document. Returns `None` when
    /// the root is not an object. A missing `matches` key, or one that does
    /// not hold an array of match records, reinitializes that key to an empty
    /// list; every other key is preserved as-is.
    pub fn from_value(root: Value) -> Option<Document> {
        let Value::Object(mut map) = root else {
            return None;
        };
        let matches = match map.remove(MATCHES_KEY) {
            Some(value) => serde_json::from_value::<Vec<MatchRecord>>(value).unwrap_or_default(),
            None => Vec::new(),
        };
        Some(Document {
            matches,
            extra: map,
        })
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        // Typed matches go in last so a stray auxiliary `matches` key can
        // never shadow them.
        let mut map = self.extra.clone();
        map.insert(MATCHES_KEY.to_string(), serde_json::to_value(&self.matches)?);
        Ok(Value::Object(map))
    }
}

/// Owns the document and the optional persistence target. All other
/// components read and mutate match data through the typed accessors; the
/// file is only touched by `open` and `persist`.
#[derive(Debug)]
pub struct Store {
    doc: Document,
    path: Option<PathBuf>,
}

impl Store {
    /// A store with no persistence target; `persist` is a no-op and all data
    /// is lost at exit.
    pub fn in_memory() -> Self {
        Store {
            doc: Document::default(),
            path: None,
        }
    }

    /// Opens the document at `path`, creating an empty data file if none
    /// exists. A file that is not valid JSON is fatal.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            let store = Store {
                doc: Document::default(),
                path: Some(path),
            };
            store.persist()?;
            return Ok(store);
        }

        let raw = fs::read_to_string(&path)?;
        let root: Value = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;
        let Some(doc) = Document::from_value(root) else {
            return Err(StoreError::NotAnObject { path });
        };
        Ok(Store {
            doc,
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.doc.matches
    }

    pub fn matches_mut(&mut self) -> &mut Vec<MatchRecord> {
        &mut self.doc.matches
    }

    /// Looks up an auxiliary top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.extra.get(key)
    }

    /// Merges entries into the document's auxiliary top-level keys.
    pub fn set(&mut self, entries: Map<String, Value>) {
        for (key, value) in entries {
            self.doc.extra.insert(key, value);
        }
    }

    /// Deletes the leaf named by `key_path`, descending through nested
    /// objects for multi-segment paths. A missing intermediate key, or one
    /// that is not an object, is a silent no-op.
    pub fn delete(&mut self, key_path: &[&str]) {
        let Some((leaf, parents)) = key_path.split_last() else {
            return;
        };
        let mut current = &mut self.doc.extra;
        for key in parents {
            match current.get_mut(*key) {
                Some(Value::Object(next)) => current = next,
                _ => return,
            }
        }
        current.remove(*leaf);
    }

    /// Writes the whole document back to the configured path, atomically via
    /// a temp file. A store without a path does nothing.
    pub fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.doc.to_value()?)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
