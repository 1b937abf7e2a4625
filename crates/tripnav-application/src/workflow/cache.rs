use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Identity-keyed cache of long-lived workflow contexts.
///
/// Exactly one context exists per identifier for the lifetime of the cache,
/// so repeated navigation into the same entity reuses the same instance and
/// its state. Nothing is evicted automatically: `evict` and `clear` exist
/// for callers that need them, but the default behaviour keeps every context
/// alive, which grows without bound over a long session.
pub struct WorkflowCache<K, T> {
    contexts: Arc<RwLock<HashMap<K, Arc<T>>>>,
}

impl<K, T> WorkflowCache<K, T>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new empty WorkflowCache.
    pub fn new() -> Self {
        Self {
            contexts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the context for `id`, constructing it with `factory` on first
    /// reference.
    ///
    /// The existence check and the insert happen under one write lock, so
    /// concurrent callers for the same id always receive the same instance
    /// and `factory` runs at most once per id.
    pub async fn get_or_create<F>(&self, id: K, factory: F) -> Arc<T>
    where
        F: FnOnce(&K) -> T,
    {
        if let Some(existing) = self.get(&id).await {
            return existing;
        }

        let mut contexts = self.contexts.write().await;
        contexts
            .entry(id)
            .or_insert_with_key(|id| Arc::new(factory(id)))
            .clone()
    }

    /// Gets a cached context by id.
    pub async fn get(&self, id: &K) -> Option<Arc<T>> {
        let contexts = self.contexts.read().await;
        contexts.get(id).cloned()
    }

    pub async fn contains(&self, id: &K) -> bool {
        self.contexts.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.contexts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.contexts.read().await.is_empty()
    }

    /// Removes the context for `id`. Holders of the `Arc` keep their copy;
    /// the next `get_or_create` builds a fresh one.
    pub async fn evict(&self, id: &K) -> Option<Arc<T>> {
        let mut contexts = self.contexts.write().await;
        contexts.remove(id)
    }

    /// Clears all cached contexts.
    pub async fn clear(&self) {
        let mut contexts = self.contexts.write().await;
        contexts.clear();
    }
}

impl<K, T> Default for WorkflowCache<K, T>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Clone for WorkflowCache<K, T> {
    fn clone(&self) -> Self {
        Self {
            contexts: self.contexts.clone(),
        }
    }
}
