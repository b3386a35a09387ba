//! Ordered exercise list with best-effort persistence

use tracing::{debug, info, warn};

use super::ExerciseRecord;
use crate::{
    error::{StorageError, StorageResult},
    storage::BlobStore,
    validation::{validate_name, ValidationRules},
};

/// Default blob key the list is stored under
pub const DEFAULT_STORAGE_KEY: &str = "exercises";

/// Largest id the store hands out or restores.
///
/// Ids stay exactly representable as JSON numbers, and the counter has room
/// to advance without wrapping.
pub const MAX_ID: u64 = (1 << 53) - 1;

/// Holds the ordered exercise list and the id counter.
///
/// Every mutation writes the full list back through the injected blob store.
/// Storage failures are logged and the in-memory list stays authoritative.
pub struct ExerciseStore {
    records: Vec<ExerciseRecord>,
    next_id: u64,
    blob: Box<dyn BlobStore>,
    key: String,
    rules: ValidationRules,
}

impl ExerciseStore {
    /// Create an empty store without reading the blob
    pub fn new(blob: Box<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            blob,
            key: key.into(),
            rules: ValidationRules::default(),
        }
    }

    /// Create a store and restore whatever the blob holds
    pub fn open(blob: Box<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self::open_with_rules(blob, key, ValidationRules::default())
    }

    /// Like `open`, checking restored durations against `rules`
    pub fn open_with_rules(
        blob: Box<dyn BlobStore>,
        key: impl Into<String>,
        rules: ValidationRules,
    ) -> Self {
        let mut store = Self::new(blob, key);
        store.rules = rules;
        store.load();
        store
    }

    /// Restore the list from the blob.
    ///
    /// A missing or malformed blob yields an empty list. Individual records
    /// that break the list's rules are dropped.
    pub fn load(&mut self) -> Vec<ExerciseRecord> {
        self.records = match self.read_blob() {
            Ok(Some(records)) => self.sanitize(records),
            Ok(None) => {
                debug!("No stored exercises under '{}'", self.key);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to load exercises, starting empty: {}", e);
                Vec::new()
            }
        };

        let max_id = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        match max_id.checked_add(1) {
            Some(next_id) => self.next_id = self.next_id.max(next_id),
            None => {
                warn!("Stored exercise ids exhausted the id space, starting empty");
                self.records.clear();
            }
        }

        info!(
            "Loaded {} exercises, next id {}",
            self.records.len(),
            self.next_id
        );
        self.records.clone()
    }

    /// Keep only records with a unique id in `1..=MAX_ID`, a valid name and
    /// an in-range duration
    fn sanitize(&self, records: Vec<ExerciseRecord>) -> Vec<ExerciseRecord> {
        let mut kept: Vec<ExerciseRecord> = Vec::with_capacity(records.len());
        for mut record in records {
            if let Err(e) = self.check_record(&record, &kept) {
                warn!("Dropping stored exercise {}: {}", record.id, e);
                continue;
            }
            record.name = record.name.trim().to_string();
            kept.push(record);
        }
        kept
    }

    fn check_record(&self, record: &ExerciseRecord, kept: &[ExerciseRecord]) -> StorageResult<()> {
        if record.id == 0 || record.id > MAX_ID {
            return Err(StorageError::InvalidRecord(format!("id {} out of range", record.id)));
        }
        if kept.iter().any(|r| r.id == record.id) {
            return Err(StorageError::InvalidRecord(format!("duplicate id {}", record.id)));
        }
        validate_name(&record.name).map_err(|e| StorageError::InvalidRecord(e.message))?;
        if let Some(seconds) = record.seconds {
            if !self.rules.accepts_seconds(seconds) {
                return Err(StorageError::InvalidRecord(format!(
                    "seconds {} outside {}..={}",
                    seconds, self.rules.min_seconds, self.rules.max_seconds
                )));
            }
        }
        Ok(())
    }

    fn read_blob(&self) -> StorageResult<Option<Vec<ExerciseRecord>>> {
        match self.blob.read(&self.key)? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    /// Write the full ordered list to the blob, returning whether it stuck
    pub fn save(&mut self) -> bool {
        let result: StorageResult<()> = serde_json::to_string(&self.records)
            .map_err(Into::into)
            .and_then(|contents| self.blob.write(&self.key, &contents));

        match result {
            Ok(()) => {
                debug!("Saved {} exercises", self.records.len());
                true
            }
            Err(e) => {
                warn!("Failed to save exercises, keeping changes in memory: {}", e);
                false
            }
        }
    }

    /// Append a new exercise under the next unused id
    pub fn add(&mut self, name: impl Into<String>, seconds: Option<f64>) -> ExerciseRecord {
        let record = ExerciseRecord::new(self.next_id, name, seconds);
        // Restored ids are capped at MAX_ID, so saturation is never reached
        self.next_id = self.next_id.saturating_add(1);
        self.records.push(record.clone());
        info!("Added exercise {} '{}'", record.id, record.name);
        self.save();
        record
    }

    /// Replace name and duration in place; `false` if the id is unknown
    pub fn update(&mut self, id: u64, name: impl Into<String>, seconds: Option<f64>) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            debug!("Update ignored, exercise {} not found", id);
            return false;
        };
        record.name = name.into();
        record.seconds = seconds;
        info!("Updated exercise {} '{}'", id, record.name);
        self.save();
        true
    }

    /// Delete an exercise; `false` if the id is unknown
    pub fn remove(&mut self, id: u64) -> bool {
        let initial_count = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == initial_count {
            debug!("Remove ignored, exercise {} not found", id);
            return false;
        }
        info!("Removed exercise {}", id);
        self.save();
        true
    }

    pub fn get(&self, id: u64) -> Option<&ExerciseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records in display order
    pub fn list(&self) -> &[ExerciseRecord] {
        &self.records
    }

    /// Id the next `add` will assign
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;

    fn store_with(blob: &MemoryBlobStore) -> ExerciseStore {
        ExerciseStore::open(Box::new(blob.clone()), DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn test_add_assigns_increasing_ids_and_persists() {
        let blob = MemoryBlobStore::new();
        let mut store = store_with(&blob);

        let first = store.add("Push-ups", Some(2.0));
        let second = store.add("Squats", None);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(
            blob.get(DEFAULT_STORAGE_KEY).unwrap(),
            r#"[{"id":1,"name":"Push-ups","seconds":2.0},{"id":2,"name":"Squats","seconds":null}]"#
        );
    }

    #[test]
    fn test_round_trip_through_blob() {
        let blob = MemoryBlobStore::new();
        let mut store = store_with(&blob);
        store.add("Push-ups", Some(2.0));
        store.add("Plank", Some(9.5));
        store.add("Burpees", None);

        let restored = store_with(&blob);
        assert_eq!(restored.list(), store.list());
    }

    #[test]
    fn test_ids_not_reused_after_removing_latest() {
        let blob = MemoryBlobStore::new();
        let mut store = store_with(&blob);
        store.add("a", None);
        let latest = store.add("b", None);
        assert!(store.remove(latest.id));

        let next = store.add("c", None);
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_counter_seeded_from_restored_ids() {
        let blob = MemoryBlobStore::with_blob(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":7,"name":"a","seconds":null},{"id":3,"name":"b","seconds":2}]"#,
        );
        let mut store = store_with(&blob);
        assert_eq!(store.next_id(), 8);
        assert_eq!(store.add("c", None).id, 8);
    }

    #[test]
    fn test_update_in_place_keeps_order() {
        let blob = MemoryBlobStore::new();
        let mut store = store_with(&blob);
        store.add("a", None);
        let b = store.add("b", None);
        store.add("c", None);

        assert!(store.update(b.id, "B", Some(4.0)));
        let names: Vec<_> = store.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "B", "c"]);
        assert_eq!(store.get(b.id).unwrap().seconds, Some(4.0));
    }

    #[test]
    fn test_unknown_ids_are_reported() {
        let blob = MemoryBlobStore::new();
        let mut store = store_with(&blob);
        store.add("a", None);
        let before = store.list().to_vec();

        assert!(!store.update(42, "x", None));
        assert!(!store.remove(42));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_malformed_blob_loads_empty() {
        let blob = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, "{not json");
        let mut store = store_with(&blob);
        assert!(store.is_empty());
        assert_eq!(store.add("a", None).id, 1);
    }

    #[test]
    fn test_id_at_top_of_range_does_not_overflow() {
        let blob = MemoryBlobStore::with_blob(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":18446744073709551615,"name":"a","seconds":2},{"id":4,"name":"b","seconds":2}]"#,
        );
        let mut store = store_with(&blob);
        let ids: Vec<_> = store.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, [4]);
        assert_eq!(store.add("c", None).id, 5);
    }

    #[test]
    fn test_largest_allowed_id_is_restored() {
        let blob = MemoryBlobStore::with_blob(
            DEFAULT_STORAGE_KEY,
            &format!(r#"[{{"id":{},"name":"a","seconds":null}}]"#, MAX_ID - 1),
        );
        let mut store = store_with(&blob);
        assert_eq!(store.len(), 1);
        assert_eq!(store.add("b", None).id, MAX_ID);
        assert_eq!(store_with(&blob).len(), 2);
    }

    #[test]
    fn test_duplicate_ids_keep_first_record() {
        let blob = MemoryBlobStore::with_blob(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":2,"name":"a","seconds":2},{"id":2,"name":"b","seconds":3}]"#,
        );
        let mut store = store_with(&blob);
        assert_eq!(store.list(), [ExerciseRecord::new(2, "a", Some(2.0))]);

        assert!(store.remove(2));
        assert!(store.is_empty());
    }

    #[test]
    fn test_records_breaking_rules_are_dropped() {
        let blob = MemoryBlobStore::with_blob(
            DEFAULT_STORAGE_KEY,
            r#"[
                {"id":1,"name":"","seconds":5},
                {"id":2,"name":"ok","seconds":500},
                {"id":0,"name":"zero","seconds":null},
                {"id":3,"name":"this name is far too long","seconds":null},
                {"id":4,"name":"  Plank ","seconds":2}
            ]"#,
        );
        let store = store_with(&blob);
        assert_eq!(store.list(), [ExerciseRecord::new(4, "Plank", Some(2.0))]);
        assert_eq!(store.next_id(), 5);
    }

    #[test]
    fn test_restored_durations_use_configured_range() {
        let contents = r#"[{"id":1,"name":"a","seconds":0.5}]"#;
        let strict = store_with(&MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, contents));
        assert!(strict.is_empty());

        let loose = ExerciseStore::open_with_rules(
            Box::new(MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, contents)),
            DEFAULT_STORAGE_KEY,
            ValidationRules::new(0.5, 10.0),
        );
        assert_eq!(loose.len(), 1);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let blob = MemoryBlobStore::new();
        let mut store = store_with(&blob);
        blob.set_fail_writes(true);

        let record = store.add("a", None);
        assert_eq!(store.get(record.id), Some(&record));
        assert!(blob.get(DEFAULT_STORAGE_KEY).is_none());

        blob.set_fail_writes(false);
        store.add("b", None);
        assert_eq!(store_with(&blob).len(), 2);
    }
}
