//! Trip list workflow: the consumer of the needs-refresh signal.

use std::future::Future;
use tokio::sync::RwLock;
use tripnav_core::error::Result;
use tripnav_core::navigation::{Route, TripId};

use super::RefreshSignal;
use crate::navigation::Navigator;

/// Holds the user's trip list and re-fetches it when the shared
/// [`RefreshSignal`] is raised.
///
/// Generic over the summary type so the entity shape stays with the entity
/// store.
pub struct TripListWorkflow<T> {
    trips: RwLock<Vec<T>>,
    refresh: RefreshSignal,
    navigator: Navigator,
}

impl<T: Clone> TripListWorkflow<T> {
    pub fn new(refresh: RefreshSignal, navigator: Navigator) -> Self {
        Self {
            trips: RwLock::new(Vec::new()),
            refresh,
            navigator,
        }
    }

    pub async fn trips(&self) -> Vec<T> {
        self.trips.read().await.clone()
    }

    /// Unconditionally re-fetches the list.
    pub async fn reload<F, Fut>(&self, fetch: F) -> Result<usize>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let fetched = fetch().await?;
        let count = fetched.len();
        *self.trips.write().await = fetched;
        Ok(count)
    }

    /// Re-fetches only when the refresh signal is raised.
    ///
    /// The signal is acknowledged before the fetch starts, so a raise that
    /// arrives while the fetch is running stays set for the next call. If
    /// the fetch fails the signal is raised again so the next call retries.
    ///
    /// Returns whether a fetch happened.
    pub async fn refresh_if_needed<F, Fut>(&self, fetch: F) -> Result<bool>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        if !self.refresh.acknowledge() {
            return Ok(false);
        }

        match self.reload(fetch).await {
            Ok(count) => {
                tracing::debug!("[TripListWorkflow] Refreshed {} trip(s)", count);
                Ok(true)
            }
            Err(e) => {
                self.refresh.raise();
                tracing::warn!("[TripListWorkflow] Refresh failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn open_trip(&self, trip_id: TripId) -> bool {
        self.navigator.push(Route::TripTabs { trip_id })
    }

    pub fn create_trip(&self) -> bool {
        self.navigator.push(Route::CreateTrip)
    }
}
