//! Preference store trait.
//!
//! A flat string key-value store used to persist the session across
//! process restarts.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;

/// One mutation inside a [`PreferenceBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceOp {
    Set { key: String, value: String },
    Remove { key: String },
}

/// A group of mutations that must be applied as a single unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceBatch {
    ops: Vec<PreferenceOp>,
}

impl PreferenceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ops.push(PreferenceOp::Set {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.ops.push(PreferenceOp::Remove { key: key.into() });
        self
    }

    /// Sets the key when `value` is present, removes it otherwise.
    pub fn set_or_remove(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self.remove(key),
        }
    }

    pub fn ops(&self) -> &[PreferenceOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Applies the batch to an in-memory map, in order.
    pub fn apply_to(&self, map: &mut HashMap<String, String>) {
        for op in &self.ops {
            match op {
                PreferenceOp::Set { key, value } => {
                    map.insert(key.clone(), value.clone());
                }
                PreferenceOp::Remove { key } => {
                    map.remove(key);
                }
            }
        }
    }
}

/// An abstract key-value store for persisted preferences.
///
/// # Implementation Notes
///
/// `apply` must be all-or-nothing: a reader (including a freshly started
/// process) either sees every operation of a batch or none of them.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Loads the values of the requested keys. Absent keys are omitted.
    async fn load(&self, keys: &[&str]) -> Result<HashMap<String, String>>;

    /// Applies all operations of the batch atomically.
    async fn apply(&self, batch: PreferenceBatch) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_applies_in_order() {
        let batch = PreferenceBatch::new()
            .set("a", "1")
            .set("b", "2")
            .remove("a")
            .set_or_remove("c", None)
            .set_or_remove("d", Some("4"));

        let mut map = HashMap::from([("c".to_string(), "old".to_string())]);
        batch.apply_to(&mut map);

        assert_eq!(map.get("a"), None);
        assert_eq!(map.get("b").map(String::as_str), Some("2"));
        assert_eq!(map.get("c"), None);
        assert_eq!(map.get("d").map(String::as_str), Some("4"));
        assert_eq!(batch.ops().len(), 5);
    }
}
