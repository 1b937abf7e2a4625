//! File-backed preference store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tripnav_core::error::{Result, TripError};
use tripnav_core::preferences::{PreferenceBatch, PreferenceStore};

use super::atomic_toml::AtomicTomlFile;

/// On-disk shape of the preference file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PreferenceDocument {
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Preference store persisted as a flat TOML table.
///
/// ```toml
/// [values]
/// authToken = "..."
/// firstName = "Ada"
/// ```
///
/// Every batch is applied with a single locked read-modify-write followed by
/// an atomic rename, so a restarted process never sees half a sign-in.
#[derive(Clone)]
pub struct TomlPreferenceStore {
    file: Arc<AtomicTomlFile<PreferenceDocument>>,
    /// Serializes writers within this process.
    write_lock: Arc<Mutex<()>>,
}

impl TomlPreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl PreferenceStore for TomlPreferenceStore {
    async fn load(&self, keys: &[&str]) -> Result<HashMap<String, String>> {
        let file = self.file.clone();
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();

        tokio::task::spawn_blocking(move || -> Result<HashMap<String, String>> {
            let document = file.load()?.unwrap_or_default();
            Ok(keys
                .into_iter()
                .filter_map(|key| document.values.get(&key).cloned().map(|v| (key, v)))
                .collect())
        })
        .await
        .map_err(|e| TripError::internal(format!("preference load task failed: {}", e)))?
    }

    async fn apply(&self, batch: PreferenceBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        let file = self.file.clone();

        tracing::debug!(
            "[TomlPreferenceStore] Applying {} operation(s) to {}",
            batch.ops().len(),
            file.path().display()
        );

        tokio::task::spawn_blocking(move || {
            file.update(PreferenceDocument::default(), |document| {
                let mut values: HashMap<String, String> =
                    std::mem::take(&mut document.values).into_iter().collect();
                batch.apply_to(&mut values);
                document.values = values.into_iter().collect();
                Ok(())
            })
        })
        .await
        .map_err(|e| TripError::internal(format!("preference write task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_apply_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlPreferenceStore::new(temp_dir.path().join("session.toml"));

        store
            .apply(PreferenceBatch::new().set("authToken", "t1").set("firstName", "Ada"))
            .await
            .unwrap();

        let loaded = store.load(&["authToken", "firstName", "lastName"]).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["authToken"], "t1");
        assert_eq!(loaded["firstName"], "Ada");
    }

    #[tokio::test]
    async fn test_survives_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");

        TomlPreferenceStore::new(path.clone())
            .apply(PreferenceBatch::new().set("authToken", "t1"))
            .await
            .unwrap();

        let reopened = TomlPreferenceStore::new(path);
        let loaded = reopened.load(&["authToken"]).await.unwrap();
        assert_eq!(loaded["authToken"], "t1");
    }

    #[tokio::test]
    async fn test_remove_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlPreferenceStore::new(temp_dir.path().join("session.toml"));

        store
            .apply(PreferenceBatch::new().set("authToken", "t1").set("theme", "dark"))
            .await
            .unwrap();
        store
            .apply(PreferenceBatch::new().remove("authToken"))
            .await
            .unwrap();

        let loaded = store.load(&["authToken", "theme"]).await.unwrap();
        assert!(!loaded.contains_key("authToken"));
        assert_eq!(loaded["theme"], "dark");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlPreferenceStore::new(temp_dir.path().join("absent.toml"));
        assert!(store.load(&["authToken"]).await.unwrap().is_empty());
    }
}
