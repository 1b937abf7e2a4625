use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tripnav_core::error::{Result, TripError};
use tripnav_core::preferences::{PreferenceBatch, PreferenceStore};

/// In-memory preference store.
///
/// Clones share the same map, which lets tests simulate a process restart by
/// handing a clone to a fresh `SessionStore`.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `apply` calls fail without touching the map.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap_or_else(PoisonError::into_inner) = fail;
    }

    /// Snapshot of every stored value.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self, keys: &[&str]) -> Result<HashMap<String, String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(keys
            .iter()
            .filter_map(|key| values.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect())
    }

    async fn apply(&self, batch: PreferenceBatch) -> Result<()> {
        if *self.fail_writes.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(TripError::storage("writes disabled"));
        }
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        batch.apply_to(&mut values);
        Ok(())
    }
}
