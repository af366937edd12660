//! Key-value persistence for learner data.
//!
//! The quiz core never touches storage itself; the host loads and saves plain
//! JSON blobs through a `KeyValueStore`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use crate::error::StoreError;
use crate::progress::LearnerProgress;
use crate::stats::{SeenList, StatsBook};

pub const STATS_KEY: &str = "question_stats";
pub const SEEN_KEY: &str = "seen_ids";
pub const PROGRESS_KEY: &str = "learner_progress";

pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn save(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;
}

/// In-process store, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for JsonFileStore {
    /// Missing files are `None`. Files that are not valid JSON are logged and
    /// also read as `None`, so a corrupt blob never blocks a session.
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&text) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                warn!("{} is not valid JSON, ignoring it: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key);
        // Write next to the target and rename, so a crash mid-write leaves the old file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        debug!("saved {}", path.display());
        Ok(())
    }
}

/// Everything the host keeps about one learner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearnerData {
    pub stats: StatsBook,
    pub seen: SeenList,
    pub progress: LearnerProgress,
}

impl LearnerData {
    /// Load all learner blobs. Read failures and bad data fall back to empty values.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let fetch = |key: &str| match store.load(key) {
            Ok(v) => v,
            Err(e) => {
                warn!("could not load {}: {}", key, e);
                None
            }
        };
        Self {
            stats: StatsBook::from_json_lossy(fetch(STATS_KEY)),
            seen: SeenList::from_json_lossy(fetch(SEEN_KEY)),
            progress: LearnerProgress::from_json_lossy(fetch(PROGRESS_KEY)),
        }
    }

    /// Write-through after each answer.
    pub fn save_answers(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.save(STATS_KEY, &serde_json::to_value(&self.stats)?)?;
        store.save(SEEN_KEY, &serde_json::to_value(&self.seen)?)?;
        Ok(())
    }

    pub fn save_progress(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.save(PROGRESS_KEY, &serde_json::to_value(&self.progress)?)
    }

    /// Answers and progress together, e.g. when a session is cut short.
    pub fn save_all(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        self.save_answers(store)?;
        self.save_progress(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Category;
    use serde_json::json;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load("k").unwrap().is_none());
        store.save("k", &json!({"a": 1})).unwrap();
        assert_eq!(store.load("k").unwrap(), Some(json!({"a": 1})));
    }

    #[test]
    fn test_learner_data_roundtrip() {
        let mut store = MemoryStore::new();
        let mut data = LearnerData::default();
        data.stats.record("V2-0007", Category::Logic, false, 4.5, 99);
        data.seen.mark("V2-0007");
        data.save_answers(&mut store).unwrap();
        data.save_progress(&mut store).unwrap();

        let back = LearnerData::load(&store);
        assert_eq!(back, data);
    }

    #[test]
    fn test_corrupt_values_load_empty() {
        let mut store = MemoryStore::new();
        store.save(STATS_KEY, &json!([1, 2, 3])).unwrap();
        store.save(SEEN_KEY, &json!({"x": 1})).unwrap();
        let data = LearnerData::load(&store);
        assert!(data.stats.is_empty());
        assert!(data.seen.as_slice().is_empty());
    }
}
