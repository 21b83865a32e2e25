use crate::store::KeyValueStore;
use marquee_config::DEFAULT_WATCHLIST_KEY;
use marquee_models::DisplayRecord;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Result of adding a record to the watchlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A record with the same id is already listed; nothing was changed
    AlreadyPresent,
    /// The updated list could not be written (quota, I/O); logged at the write site
    NotPersisted,
}

/// The user's deduplicated watchlist, stored as one JSON array under one key.
///
/// Every read-modify-write runs under the store mutex, so concurrent `add`
/// calls sharing a `WatchlistStore` cannot lose each other's records. Two
/// processes writing the same backing file still race; last writer wins.
pub struct WatchlistStore<S> {
    store: Mutex<S>,
    key: String,
}

enum Loaded {
    Records(Vec<DisplayRecord>),
    Unreadable,
}

impl<S: KeyValueStore> WatchlistStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_WATCHLIST_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store: Mutex::new(store),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the list for modification, erasing a corrupt value
    fn load_for_update(&self, store: &mut S) -> Loaded {
        let raw = match store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Loaded::Records(Vec::new()),
            Err(e) => {
                warn!("Failed to read watchlist '{}': {}", self.key, e);
                return Loaded::Unreadable;
            }
        };

        match serde_json::from_str::<Vec<DisplayRecord>>(&raw) {
            Ok(records) => Loaded::Records(remove_duplicates_by_id(records)),
            Err(e) => {
                warn!("Watchlist '{}' is corrupt ({}), discarding it", self.key, e);
                if let Err(del_err) = store.delete(&self.key) {
                    warn!("Failed to delete corrupt watchlist '{}': {}", self.key, del_err);
                }
                Loaded::Records(Vec::new())
            }
        }
    }

    fn persist(&self, store: &mut S, records: &[DisplayRecord]) -> bool {
        let json = match serde_json::to_string(records) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize watchlist '{}': {}", self.key, e);
                return false;
            }
        };

        match store.set(&self.key, &json) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save watchlist '{}': {}", self.key, e);
                false
            }
        }
    }

    /// Append `record` unless a record with the same id is already listed.
    ///
    /// An existing entry is never replaced, even when the new record's fields
    /// differ.
    pub fn add(&self, record: DisplayRecord) -> AddOutcome {
        debug!("Adding {} ({}) to watchlist '{}'", record.id, record.title, self.key);
        let mut store = self.lock();

        let mut records = match self.load_for_update(&mut store) {
            Loaded::Records(records) => records,
            Loaded::Unreadable => return AddOutcome::NotPersisted,
        };

        if records.iter().any(|existing| existing.id == record.id) {
            info!("{} is already on the watchlist", record.id);
            return AddOutcome::AlreadyPresent;
        }

        let id = record.id;
        records.push(record);
        if !self.persist(&mut store, &records) {
            return AddOutcome::NotPersisted;
        }

        info!("Added {} to the watchlist ({} items)", id, records.len());
        AddOutcome::Added
    }

    /// Persisted records in insertion order; missing or unreadable state reads as empty
    pub fn list(&self) -> Vec<DisplayRecord> {
        let store = self.lock();
        match store.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<DisplayRecord>>(&raw) {
                Ok(records) => remove_duplicates_by_id(records),
                Err(e) => {
                    warn!("Error parsing watchlist '{}': {}", self.key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read watchlist '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.list().iter().any(|record| record.id == id)
    }

    /// Drop the record with `id`; true when it was listed and the change was saved
    pub fn remove(&self, id: u64) -> bool {
        let mut store = self.lock();

        let mut records = match self.load_for_update(&mut store) {
            Loaded::Records(records) => records,
            Loaded::Unreadable => return false,
        };

        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            debug!("{} is not on the watchlist", id);
            return false;
        }

        if !self.persist(&mut store, &records) {
            return false;
        }

        info!("Removed {} from the watchlist ({} items)", id, records.len());
        true
    }

    pub fn into_inner(self) -> S {
        self.store.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keep the first record for each id, preserving order
fn remove_duplicates_by_id(records: Vec<DisplayRecord>) -> Vec<DisplayRecord> {
    let mut seen = HashSet::new();
    let before = records.len();
    let deduped: Vec<DisplayRecord> = records.into_iter().filter(|record| seen.insert(record.id)).collect();
    if deduped.len() < before {
        warn!("Dropped {} duplicate watchlist entries", before - deduped.len());
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore, StoreError};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn record(id: u64, title: &str) -> DisplayRecord {
        DisplayRecord::project(id, title.to_string(), "https://image.tmdb.org/t/p/w500", Some(format!("/{}.jpg", id)))
    }

    /// Store whose reads always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            panic!("must not write after a failed read");
        }
        fn delete(&mut self, _key: &str) -> Result<(), StoreError> {
            panic!("must not delete after a failed read");
        }
    }

    #[test]
    fn test_add_to_empty_store() {
        let watchlist = WatchlistStore::new(MemoryStore::new());
        assert_eq!(watchlist.add(record(550, "Fight Club")), AddOutcome::Added);

        assert_eq!(watchlist.list(), vec![record(550, "Fight Club")]);
        assert!(watchlist.contains(550));
        assert!(!watchlist.contains(13));
    }

    #[test]
    fn test_add_same_id_is_noop() {
        let watchlist = WatchlistStore::new(MemoryStore::new());
        watchlist.add(record(550, "Fight Club"));
        let persisted = watchlist.lock().get("list").unwrap();

        assert_eq!(watchlist.add(record(550, "Renamed")), AddOutcome::AlreadyPresent);

        assert_eq!(watchlist.lock().get("list").unwrap(), persisted);
        let list = watchlist.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Fight Club");
    }

    #[test]
    fn test_ids_stay_unique_and_ordered() {
        let watchlist = WatchlistStore::new(MemoryStore::new());
        for id in [3, 1, 3, 2, 1, 4, 2] {
            watchlist.add(record(id, "x"));
        }

        let ids: Vec<u64> = watchlist.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_corrupt_value_is_replaced() {
        let mut store = MemoryStore::new();
        store.set("list", "{not json").unwrap();
        let watchlist = WatchlistStore::new(store);

        assert!(watchlist.list().is_empty());
        assert_eq!(watchlist.add(record(7, "Se7en")), AddOutcome::Added);
        assert_eq!(watchlist.list(), vec![record(7, "Se7en")]);
    }

    #[test]
    fn test_wrong_shape_counts_as_corrupt() {
        let mut store = MemoryStore::new();
        store.set("list", r#"{"id": 1}"#).unwrap();
        let watchlist = WatchlistStore::new(store);

        watchlist.add(record(2, "b"));
        assert_eq!(watchlist.list(), vec![record(2, "b")]);
    }

    #[test]
    fn test_legacy_title_and_name_entries_survive_add() {
        let mut store = MemoryStore::new();
        let stored = r#"[
            {"id": 1, "title": "Keep me", "name": "Keep me", "image": "https://image.tmdb.org/t/p/w500/1.jpg", "poster_path": "/1.jpg"},
            {"id": 2, "title": "Other", "image": "https://image.tmdb.org/t/p/w500/2.jpg", "poster_path": "/2.jpg"}
        ]"#;
        store.set("list", stored).unwrap();
        let watchlist = WatchlistStore::new(store);

        assert_eq!(watchlist.list().len(), 2);
        assert_eq!(watchlist.add(record(3, "New")), AddOutcome::Added);

        let ids: Vec<u64> = watchlist.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(watchlist.list()[0].title, "Keep me");
    }

    #[test]
    fn test_quota_failure_is_not_persisted() {
        let watchlist = WatchlistStore::new(MemoryStore::with_quota(16));

        assert_eq!(watchlist.add(record(1, "Too big to fit")), AddOutcome::NotPersisted);
        assert!(watchlist.list().is_empty());
    }

    #[test]
    fn test_read_failure_does_not_overwrite() {
        let watchlist = WatchlistStore::new(BrokenStore);
        assert_eq!(watchlist.add(record(1, "a")), AddOutcome::NotPersisted);
        assert!(watchlist.list().is_empty());
        assert!(!watchlist.remove(1));
    }

    #[test]
    fn test_list_drops_duplicate_ids() {
        let mut store = MemoryStore::new();
        let json = serde_json::to_string(&vec![record(1, "first"), record(1, "second"), record(2, "other")]).unwrap();
        store.set("list", &json).unwrap();
        let watchlist = WatchlistStore::new(store);

        let list = watchlist.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "first");
    }

    #[test]
    fn test_remove() {
        let watchlist = WatchlistStore::new(MemoryStore::new());
        watchlist.add(record(1, "a"));
        watchlist.add(record(2, "b"));

        assert!(watchlist.remove(1));
        assert!(!watchlist.remove(1));
        assert_eq!(watchlist.list(), vec![record(2, "b")]);
    }

    #[test]
    fn test_custom_key() {
        let watchlist = WatchlistStore::with_key(MemoryStore::new(), "favorites");
        watchlist.add(record(1, "a"));

        let store = watchlist.into_inner();
        assert!(store.get("favorites").unwrap().is_some());
        assert!(store.get("list").unwrap().is_none());
    }

    #[test]
    fn test_persisted_in_file_store() {
        let dir = TempDir::new().unwrap();
        let watchlist = WatchlistStore::new(FileStore::new(dir.path()));
        watchlist.add(record(1, "a"));
        watchlist.add(record(2, "b"));

        let reopened = WatchlistStore::new(FileStore::new(dir.path()));
        assert_eq!(reopened.list(), vec![record(1, "a"), record(2, "b")]);
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let watchlist = Arc::new(WatchlistStore::new(MemoryStore::new()));

        let handles: Vec<_> = (0..8)
            .map(|id| {
                let watchlist = Arc::clone(&watchlist);
                std::thread::spawn(move || watchlist.add(record(id, "t")))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), AddOutcome::Added);
        }

        assert_eq!(watchlist.list().len(), 8);
    }
}
