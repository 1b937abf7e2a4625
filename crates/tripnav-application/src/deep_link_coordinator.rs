//! Deep-link join confirmation.
//!
//! ```text
//! Idle ──parse──▶ PendingConfirm(id) ──confirm──▶ Joining(id) ──ok──▶ Resolved(id) ──▶ Idle
//!                        │                              └──err──────────────────────▶ Idle
//!                        └──decline──────────────────────────────────────────────────▶ Idle
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tripnav_core::config::AppConfig;
use tripnav_core::deep_link::DeepLinkParser;
use tripnav_core::error::{Result, TripError};
use tripnav_core::navigation::TripId;
use tripnav_core::services::ParticipantService;

use crate::workflow::RefreshSignal;

/// State of the join confirmation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinState {
    Idle,
    PendingConfirm(TripId),
    Joining(TripId),
    Resolved(TripId),
}

impl JoinState {
    fn name(&self) -> &'static str {
        match self {
            JoinState::Idle => "Idle",
            JoinState::PendingConfirm(_) => "PendingConfirm",
            JoinState::Joining(_) => "Joining",
            JoinState::Resolved(_) => "Resolved",
        }
    }
}

/// Turns join links into confirmed join requests.
///
/// State lives behind a mutex that is never held across the network call,
/// so a new link can arrive while a join is outstanding. Such a link is
/// rejected with `Busy`; a link arriving while a confirmation is pending
/// replaces the pending trip.
pub struct DeepLinkCoordinator {
    parser: DeepLinkParser,
    participants: Arc<dyn ParticipantService>,
    refresh: RefreshSignal,
    join_timeout: Duration,
    state: Arc<Mutex<JoinState>>,
}

impl DeepLinkCoordinator {
    pub fn new(participants: Arc<dyn ParticipantService>, refresh: RefreshSignal) -> Self {
        Self::with_config(participants, refresh, &AppConfig::default())
    }

    pub fn with_config(
        participants: Arc<dyn ParticipantService>,
        refresh: RefreshSignal,
        config: &AppConfig,
    ) -> Self {
        Self {
            parser: DeepLinkParser::new(config.deep_link.clone()),
            participants,
            refresh,
            join_timeout: config.network.join_timeout(),
            state: Arc::new(Mutex::new(JoinState::Idle)),
        }
    }

    pub fn state(&self) -> JoinState {
        *self.lock_state()
    }

    /// Trip awaiting the user's decision, if any.
    pub fn pending_trip_id(&self) -> Option<TripId> {
        match self.state() {
            JoinState::PendingConfirm(trip_id) => Some(trip_id),
            _ => None,
        }
    }

    /// Parses `uri` and moves to `PendingConfirm`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedLink` / `InvalidParameter` for malformed links; state is
    ///   unchanged
    /// - `Busy` while a join is in flight
    pub fn parse(&self, uri: &str) -> Result<TripId> {
        let trip_id = self.parser.parse(uri)?.trip_id();

        let mut state = self.lock_state();
        match *state {
            JoinState::Joining(current) => {
                tracing::info!(
                    "[DeepLink] Rejecting link for trip {} while joining trip {}",
                    trip_id,
                    current
                );
                return Err(TripError::busy(format!("joining trip {}", current)));
            }
            JoinState::PendingConfirm(previous) if previous != trip_id => {
                tracing::info!(
                    "[DeepLink] Replacing pending trip {} with {}",
                    previous,
                    trip_id
                );
            }
            _ => {}
        }

        *state = JoinState::PendingConfirm(trip_id);
        tracing::debug!("[DeepLink] PendingConfirm({})", trip_id);
        Ok(trip_id)
    }

    /// Entry point for links delivered by the platform.
    ///
    /// Malformed links are logged and discarded; nothing is shown to the user.
    pub fn handle_link(&self, uri: &str) -> Option<TripId> {
        match self.parse(uri) {
            Ok(trip_id) => Some(trip_id),
            Err(e) if e.is_link_error() => {
                tracing::warn!("[DeepLink] Discarding link: {}", e);
                None
            }
            Err(e) => {
                tracing::info!("[DeepLink] Link not accepted: {}", e);
                None
            }
        }
    }

    /// Accepts the pending join and calls the participant service.
    ///
    /// On success the shared refresh signal is raised and the state returns
    /// to `Idle`. On failure the pending trip is discarded (no retry) and the
    /// state also returns to `Idle`.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if nothing is pending
    /// - `JoinFailure` if the service fails or times out
    pub async fn confirm(&self) -> Result<TripId> {
        let trip_id = {
            let mut state = self.lock_state();
            match *state {
                JoinState::PendingConfirm(trip_id) => {
                    *state = JoinState::Joining(trip_id);
                    trip_id
                }
                other => {
                    return Err(TripError::InvalidState {
                        expected: "PendingConfirm".to_string(),
                        actual: other.name().to_string(),
                    });
                }
            }
        };
        tracing::debug!("[DeepLink] Joining({})", trip_id);

        let _guard = JoiningGuard {
            state: self.state.clone(),
            trip_id,
        };

        let join = self.participants.join(trip_id);
        let outcome = match tokio::time::timeout(self.join_timeout, join).await {
            Ok(result) => result,
            Err(_) => Err(TripError::timeout("join", self.join_timeout.as_secs())),
        };

        let mut state = self.lock_state();
        let still_joining = *state == JoinState::Joining(trip_id);

        let result = match outcome {
            Ok(()) => {
                self.refresh.raise();
                if still_joining {
                    *state = JoinState::Resolved(trip_id);
                    tracing::debug!("[DeepLink] Resolved({})", trip_id);
                }
                tracing::info!("[DeepLink] Joined trip {}", trip_id);
                Ok(trip_id)
            }
            Err(e) => {
                tracing::error!("[DeepLink] Failed to join trip {}: {}", trip_id, e);
                Err(TripError::JoinFailure {
                    trip_id: trip_id.0,
                    message: e.to_string(),
                })
            }
        };

        if still_joining {
            *state = JoinState::Idle;
        }
        drop(state);
        result
    }

    /// Discards the pending join without contacting the service.
    ///
    /// # Errors
    ///
    /// `InvalidState` if nothing is pending.
    pub fn decline(&self) -> Result<TripId> {
        let mut state = self.lock_state();
        match *state {
            JoinState::PendingConfirm(trip_id) => {
                *state = JoinState::Idle;
                tracing::debug!("[DeepLink] Declined trip {}", trip_id);
                Ok(trip_id)
            }
            other => Err(TripError::InvalidState {
                expected: "PendingConfirm".to_string(),
                actual: other.name().to_string(),
            }),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, JoinState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the flow to `Idle` if `confirm` is dropped mid-join.
struct JoiningGuard {
    state: Arc<Mutex<JoinState>>,
    trip_id: TripId,
}

impl Drop for JoiningGuard {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == JoinState::Joining(self.trip_id) {
            tracing::warn!("[DeepLink] Join of trip {} abandoned", self.trip_id);
            *state = JoinState::Idle;
        }
    }
}
