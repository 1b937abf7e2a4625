//! Atomic TOML file operations.
//!
//! Writes go to a sibling temp file which is fsynced and renamed over the
//! target, so readers never observe a partially written document.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tripnav_core::error::{Result, TripError};

/// A handle to a TOML document on disk with all-or-nothing writes.
///
/// `update` additionally holds an exclusive lock file for the duration of
/// the read-modify-write so two processes cannot interleave updates.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// Returns `Ok(None)` when the file does not exist or is blank.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes `data` and atomically replaces the file.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Locked read-modify-write.
    ///
    /// `f` receives the current document (or `default_value` if none exists).
    /// Nothing is written if `f` returns an error.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| {
                TripError::io(format!("{} has no parent directory", self.path.display()))
            })?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| TripError::io(format!("{} has no file name", self.path.display())))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock file guard, released on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| TripError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Best effort; the lock itself is released with the handle.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        values: BTreeMap<String, String>,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Prefs>::new(temp_dir.path().join("prefs.toml"));

        let mut prefs = Prefs::default();
        prefs.values.insert("authToken".into(), "abc".into());
        file.save(&prefs).unwrap();

        assert_eq!(file.load().unwrap(), Some(prefs));
    }

    #[test]
    fn test_load_missing_or_blank() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.toml");
        let file = AtomicTomlFile::<Prefs>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Prefs>::new(temp_dir.path().join("prefs.toml"));

        let result = file.update(Prefs::default(), |prefs| {
            prefs.values.insert("k".into(), "v".into());
            Err(TripError::internal("abort"))
        });

        assert!(result.is_err());
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_leaves_no_temp_or_lock_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("prefs.toml");
        let file = AtomicTomlFile::<Prefs>::new(path.clone());

        file.update(Prefs::default(), |prefs| {
            prefs.values.insert("k".into(), "v".into());
            Ok(())
        })
        .unwrap();

        assert!(path.exists());
        assert!(!path.with_file_name(".prefs.toml.tmp").exists());
        assert!(!path.with_extension("lock").exists());
        assert_eq!(file.load().unwrap().unwrap().values["k"], "v");
    }
}
