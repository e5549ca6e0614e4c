use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use super::types::{HistoryRecord, RecordKind, format_timestamp};
use crate::error::HistoryError;

/// Records kept after retention runs on each add.
pub const DEFAULT_CAPACITY: usize = 50;

/// Append-only, capacity-bounded log of generation/optimization events.
pub trait HistoryStore: Send + Sync {
    /// Append a record with a fresh id and the current time, then enforce
    /// retention.
    fn add(
        &self,
        kind: RecordKind,
        title: &str,
        content: &str,
        metadata: BTreeMap<String, String>,
    ) -> Result<HistoryRecord, HistoryError>;

    /// All records, most recent first. Fresh sequence on every call.
    fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError>;

    /// Remove the record with the matching id; unknown ids are a no-op.
    fn delete(&self, id: &str) -> Result<(), HistoryError>;

    /// Drop everything, leaving the canonical empty representation.
    fn clear(&self) -> Result<(), HistoryError>;

    fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.list()?.is_empty())
    }
}

/// History persisted as a single JSON array in one file.
///
/// The blob is the only state: every operation re-reads it, mutates, and
/// writes the whole array back. The mutex makes each mutation one atomic
/// read-modify-write; there is no in-memory cache to go stale.
pub struct JsonHistoryStore {
    path: PathBuf,
    capacity: usize,
    guard: Mutex<()>,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the blob. A missing file is an empty store; a malformed blob
    /// (bad JSON, or any entry failing the record schema) degrades to an
    /// empty list with a diagnostic rather than surfacing an error.
    fn read_records(&self) -> Vec<HistoryRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read history blob");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryRecord>>(&raw) {
            Ok(mut records) => {
                for record in &mut records {
                    record.repair_formatted_date();
                }
                records
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "malformed history blob, starting empty");
                Vec::new()
            }
        }
    }

    fn write_records(&self, records: &[HistoryRecord]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let blob = serde_json::to_string(records)?;
        fs::write(&self.path, blob)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, HistoryError> {
        self.guard.lock().map_err(|_| HistoryError::Lock)
    }
}

fn sort_most_recent_first(records: &mut [HistoryRecord]) {
    records.sort_by(|a, b| {
        b.timestamp
            .partial_cmp(&a.timestamp)
            .unwrap_or(Ordering::Equal)
    });
}

#[allow(clippy::cast_precision_loss)]
fn now_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

impl HistoryStore for JsonHistoryStore {
    fn add(
        &self,
        kind: RecordKind,
        title: &str,
        content: &str,
        metadata: BTreeMap<String, String>,
    ) -> Result<HistoryRecord, HistoryError> {
        let _guard = self.lock()?;

        let timestamp = now_seconds();
        let record = HistoryRecord {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.to_string(),
            content: content.to_string(),
            timestamp,
            formatted_date: format_timestamp(timestamp),
            metadata,
        };

        let mut records = self.read_records();
        records.push(record.clone());

        // Retention runs on every add; the blob has no other size bound.
        if records.len() > self.capacity {
            sort_most_recent_first(&mut records);
            records.truncate(self.capacity);
        }

        self.write_records(&records)?;
        Ok(record)
    }

    fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let _guard = self.lock()?;
        let mut records = self.read_records();
        sort_most_recent_first(&mut records);
        Ok(records)
    }

    fn delete(&self, id: &str) -> Result<(), HistoryError> {
        let _guard = self.lock()?;
        let mut records = self.read_records();
        records.retain(|record| record.id != id);
        self.write_records(&records)
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.lock()?;
        self.write_records(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonHistoryStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(dir.path().join("history.json"), DEFAULT_CAPACITY);
        (dir, store)
    }

    fn add_simple(store: &JsonHistoryStore, title: &str) -> HistoryRecord {
        store
            .add(RecordKind::Generated, title, "content", BTreeMap::new())
            .unwrap()
    }

    #[test]
    fn add_then_list_returns_the_record() {
        let (_dir, store) = store();
        let added = add_simple(&store, "Code: sort a list");

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], added);
        assert!(!added.id.is_empty());
        assert!(!added.formatted_date.is_empty());
    }

    #[test]
    fn list_is_most_recent_first() {
        let (_dir, store) = store();
        // Seed a blob with explicit, distinct timestamps.
        let records: Vec<HistoryRecord> = (1..=3)
            .map(|i| HistoryRecord {
                id: format!("id-{i}"),
                kind: RecordKind::Generated,
                title: format!("title {i}"),
                content: "c".into(),
                timestamp: f64::from(i),
                formatted_date: "d".into(),
                metadata: BTreeMap::new(),
            })
            .collect();
        store.write_records(&records).unwrap();

        let listed = store.list().unwrap();
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["id-3", "id-2", "id-1"]);
    }

    #[test]
    fn retention_keeps_the_fifty_most_recent() {
        let (_dir, store) = store();
        let old: Vec<HistoryRecord> = (1..=54)
            .map(|i| HistoryRecord {
                id: format!("id-{i}"),
                kind: RecordKind::Generated,
                title: format!("title {i}"),
                content: "c".into(),
                timestamp: f64::from(i),
                formatted_date: "d".into(),
                metadata: BTreeMap::new(),
            })
            .collect();
        store.write_records(&old).unwrap();

        let newest = add_simple(&store, "newest");

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), DEFAULT_CAPACITY);
        assert_eq!(listed[0].id, newest.id);
        // The five oldest seeded records are gone.
        for i in 1..=5 {
            assert!(listed.iter().all(|r| r.id != format!("id-{i}")));
        }
        assert!(listed.iter().any(|r| r.id == "id-6"));
    }

    #[test]
    fn many_adds_never_exceed_capacity() {
        let (_dir, store) = store();
        for i in 0..55 {
            add_simple(&store, &format!("title {i}"));
        }
        assert_eq!(store.list().unwrap().len(), DEFAULT_CAPACITY);
    }

    #[test]
    fn delete_unknown_id_leaves_store_unchanged() {
        let (_dir, store) = store();
        add_simple(&store, "a");
        add_simple(&store, "b");
        let before = store.list().unwrap();

        store.delete("not-a-real-id").unwrap();

        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn delete_removes_exactly_the_matching_record() {
        let (_dir, store) = store();
        let keep = add_simple(&store, "keep");
        let doomed = add_simple(&store, "doomed");

        store.delete(&doomed.id).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);
    }

    #[test]
    fn clear_leaves_canonical_empty_blob() {
        let (_dir, store) = store();
        add_simple(&store, "a");

        store.clear().unwrap();

        assert!(store.list().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn malformed_blob_degrades_to_empty() {
        let (_dir, store) = store();
        fs::write(store.path(), "not json at all {").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn entry_missing_required_field_degrades_to_empty() {
        let (_dir, store) = store();
        fs::write(
            store.path(),
            r#"[{"type":"generated","title":"t","content":"c","timestamp":1.0}]"#,
        )
        .unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn entry_missing_formatted_date_is_repaired_on_read() {
        let (_dir, store) = store();
        fs::write(
            store.path(),
            r#"[{"id":"x","type":"generated","title":"t","content":"c","timestamp":1700000000.0}]"#,
        )
        .unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].formatted_date.is_empty());
    }

    #[test]
    fn add_after_malformed_blob_starts_fresh() {
        let (_dir, store) = store();
        fs::write(store.path(), "garbage").unwrap();

        add_simple(&store, "fresh start");

        assert_eq!(store.list().unwrap().len(), 1);
    }
}
