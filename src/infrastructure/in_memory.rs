use crate::domain::ports::{PreferenceStore, PreferenceValue};
use crate::error::{CheckoutError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A shareable in-memory preference store.
///
/// Uses `Arc<RwLock<BTreeMap<String, PreferenceValue>>>` so clones see the same values.
/// Ideal for tests and for runs where nothing needs to survive the process.
#[derive(Default, Clone)]
pub struct InMemoryPreferenceStore {
    values: Arc<RwLock<BTreeMap<String, PreferenceValue>>>,
}

impl InMemoryPreferenceStore {
    /// Creates a new, empty in-memory preference store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> CheckoutError {
    CheckoutError::IoError(std::io::Error::other("preference store lock poisoned"))
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<PreferenceValue>> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: PreferenceValue) -> Result<()> {
        let mut values = self.values.write().map_err(poisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn all(&self) -> Result<BTreeMap<String, PreferenceValue>> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_roundtrip() {
        let store = InMemoryPreferenceStore::new();
        store.put("fee", PreferenceValue::Float(1.5)).unwrap();

        assert_eq!(store.get("fee").unwrap(), Some(PreferenceValue::Float(1.5)));
        assert_eq!(store.get("missing").unwrap(), None);
        assert_eq!(store.get_float("fee", 0.0).unwrap(), 1.5);
        assert!(store.get_bool("missing", true).unwrap());
    }

    #[test]
    fn test_clones_share_values() {
        let store = InMemoryPreferenceStore::new();
        let shared = store.clone();
        shared.put("amount", PreferenceValue::String("10".into())).unwrap();

        assert_eq!(store.get_string("amount", "0").unwrap(), "10");
        assert_eq!(store.all().unwrap().len(), 1);
    }
}
