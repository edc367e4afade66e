//! Key-value storage port standing in for browser storage.
//!
//! # Design
//! Collections are stored whole under namespaced `sr_*` keys and rewritten
//! on every mutation: read, modify in memory, write back. Last writer wins;
//! there is no locking across writers and no conflict detection. A stored
//! value that fails to deserialize reads as the empty collection.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// Session-scope key holding the JSON-encoded logged-in user.
pub const SESSION_USER_KEY: &str = "sr_user";

/// Local-scope key holding the JSON array of appointment records.
pub const APPOINTMENTS_KEY: &str = "sr_citas";

/// Local-scope key holding one patient's clinical-history array.
pub fn history_key(patient_id: i64) -> String {
    format!("sr_historia_{patient_id}")
}

/// Minimal string key-value store, the shape browser storage exposes.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process store backing tests and the local backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

/// Read a whole stored collection; absent or unreadable values become empty.
pub(crate) fn read_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Vec<T> {
    store
        .get(key)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Serialize and write back a whole collection.
pub(crate) fn write_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), ApiError> {
    let raw = serde_json::to_string(items).map_err(|e| ApiError::Serialization(e.to_string()))?;
    store.set(key, &raw);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("sr_user").is_none());
        store.set("sr_user", "{}");
        assert_eq!(store.get("sr_user").as_deref(), Some("{}"));
        store.remove("sr_user");
        assert!(store.get("sr_user").is_none());
    }

    #[test]
    fn missing_collection_reads_as_empty() {
        let store = MemoryStore::new();
        let items: Vec<i64> = read_collection(&store, APPOINTMENTS_KEY);
        assert!(items.is_empty());
    }

    #[test]
    fn corrupt_collection_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(APPOINTMENTS_KEY, "{not json");
        let items: Vec<i64> = read_collection(&store, APPOINTMENTS_KEY);
        assert!(items.is_empty());
    }

    #[test]
    fn collection_roundtrips() {
        let store = MemoryStore::new();
        write_collection(&store, APPOINTMENTS_KEY, &[1i64, 2, 3]).unwrap();
        let items: Vec<i64> = read_collection(&store, APPOINTMENTS_KEY);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn history_keys_are_namespaced_per_patient() {
        assert_eq!(history_key(42), "sr_historia_42");
        assert_ne!(history_key(1), history_key(2));
    }
}
