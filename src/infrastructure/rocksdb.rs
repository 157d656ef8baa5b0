use crate::domain::ports::{PreferenceStore, PreferenceValue};
use crate::error::{CheckoutError, Result};
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Column Family holding one entry per settings key.
pub const CF_PREFERENCES: &str = "preferences";

/// Preferences persisted in RocksDB, values encoded as JSON.
///
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBPreferenceStore {
    db: Arc<DB>,
}

impl RocksDBPreferenceStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_preferences = ColumnFamilyDescriptor::new(CF_PREFERENCES, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_preferences])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn missing_cf() -> CheckoutError {
        CheckoutError::IoError(std::io::Error::other(
            "Preferences column family not found",
        ))
    }
}

impl PreferenceStore for RocksDBPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<PreferenceValue>> {
        let cf = self.db.cf_handle(CF_PREFERENCES).ok_or_else(Self::missing_cf)?;
        match self.db.get_cf(&cf, key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: PreferenceValue) -> Result<()> {
        let cf = self.db.cf_handle(CF_PREFERENCES).ok_or_else(Self::missing_cf)?;
        let bytes = serde_json::to_vec(&value)?;
        self.db.put_cf(&cf, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn all(&self) -> Result<BTreeMap<String, PreferenceValue>> {
        let cf = self.db.cf_handle(CF_PREFERENCES).ok_or_else(Self::missing_cf)?;
        let mut values = BTreeMap::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, value) = item?;
            let key = String::from_utf8_lossy(&key).into_owned();
            values.insert(key, serde_json::from_slice(&value)?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBPreferenceStore::open(dir.path()).expect("Failed to open RocksDB");
        assert!(store.db.cf_handle(CF_PREFERENCES).is_some());
    }

    #[test]
    fn test_rocksdb_preferences_persist() {
        let dir = tempdir().unwrap();
        {
            let store = RocksDBPreferenceStore::open(dir.path()).unwrap();
            store.put("fee", PreferenceValue::Float(2.5)).unwrap();
            store
                .put("amount", PreferenceValue::String("10.00".to_string()))
                .unwrap();
        }

        let store = RocksDBPreferenceStore::open(dir.path()).unwrap();
        assert_eq!(store.get_float("fee", 0.0).unwrap(), 2.5);
        assert_eq!(store.get_string("amount", "0").unwrap(), "10.00");
        assert!(store.get("missing").unwrap().is_none());
        assert_eq!(store.all().unwrap().len(), 2);
    }
}
