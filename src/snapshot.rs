//! Per-session page state (sort and filter choices).
//!
//! Pages read and write their snapshot through a single [`SnapshotStore`]
//! port: `sessionStorage` in the browser, memory elsewhere.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gallery::{SortOrder, TypeFilter};

/// Current snapshot format version. Snapshots with another version are discarded.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Storage key of the gallery page snapshot.
pub const GALLERY_SNAPSHOT_KEY: &str = "atelier_gallery_view";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub version: u32,
    pub sort: SortOrder,
    pub filter: TypeFilter,
}

impl PageSnapshot {
    pub fn new(sort: SortOrder, filter: TypeFilter) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            sort,
            filter,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    /// Load the snapshot under `key`. Missing, unreadable or outdated
    /// snapshots yield `None`.
    pub fn load<S: SnapshotStore + ?Sized>(store: &S, key: &str) -> Option<Self> {
        let json = match store.read(key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::debug!("No snapshot stored under {key}");
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read snapshot {key}: {e}");
                return None;
            }
        };
        match Self::from_json(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("Discarding snapshot {key}: {e}");
                None
            }
        }
    }

    pub fn save<S: SnapshotStore + ?Sized>(
        &self,
        store: &mut S,
        key: &str,
    ) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        store.write(key, &json)
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Snapshot version {found} does not match {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Key/value storage for snapshots.
pub trait SnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), SnapshotError>;
}

/// In-memory store for native runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::default();
        let snapshot = PageSnapshot::new(SortOrder::Type, TypeFilter::Only("Upscale".into()));
        snapshot
            .save(&mut store, GALLERY_SNAPSHOT_KEY)
            .expect("memory store accepts writes");
        assert_eq!(
            PageSnapshot::load(&store, GALLERY_SNAPSHOT_KEY),
            Some(snapshot)
        );
    }

    #[test]
    fn test_missing_snapshot() {
        let store = MemoryStore::default();
        assert_eq!(PageSnapshot::load(&store, GALLERY_SNAPSHOT_KEY), None);
    }

    #[test]
    fn test_version_mismatch_discarded() {
        let mut store = MemoryStore::default();
        store
            .write(
                GALLERY_SNAPSHOT_KEY,
                r#"{"version": 0, "sort": "type", "filter": "all"}"#,
            )
            .expect("memory store accepts writes");
        assert_eq!(PageSnapshot::load(&store, GALLERY_SNAPSHOT_KEY), None);
        assert!(matches!(
            PageSnapshot::from_json(r#"{"version": 0, "sort": "type", "filter": "all"}"#),
            Err(SnapshotError::VersionMismatch { found: 0, .. })
        ));
    }

    #[test]
    fn test_wire_format() {
        let json = PageSnapshot::new(SortOrder::DateAsc, TypeFilter::All)
            .to_json()
            .expect("serializes");
        assert_eq!(json, r#"{"version":1,"sort":"date-asc","filter":"all"}"#);
    }

    #[test]
    fn test_unreadable_snapshot_discarded() {
        let mut store = MemoryStore::default();
        store
            .write(GALLERY_SNAPSHOT_KEY, "{")
            .expect("memory store accepts writes");
        assert_eq!(PageSnapshot::load(&store, GALLERY_SNAPSHOT_KEY), None);
    }
}
