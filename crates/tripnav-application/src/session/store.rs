use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, broadcast};
use tripnav_core::error::{Result, TripError};
use tripnav_core::preferences::{PreferenceBatch, PreferenceStore};
use tripnav_core::session::{Session, SessionEvent, SignIn, keys};

const EVENT_CAPACITY: usize = 16;

/// Process-wide authentication session.
///
/// `SessionStore` is responsible for:
/// - Restoring the session from the preference store at startup
/// - Persisting sign-in and sign-out as single all-or-nothing updates
/// - Publishing `SessionEvent`s to subscribers
///
/// Persistence happens before the in-memory swap. If the preference store
/// rejects a write, neither the persisted nor the in-memory session changes
/// and no event is emitted.
pub struct SessionStore {
    store: Arc<dyn PreferenceStore>,
    session: RwLock<Session>,
    /// Serializes sign-in/sign-out so persisted and in-memory state are
    /// always updated in the same order.
    update_lock: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Creates a logged-out store backed by `store`. Call
    /// [`restore`](Self::restore) to load the persisted session.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            session: RwLock::new(Session::logged_out()),
            update_lock: Mutex::new(()),
            events,
        }
    }

    /// Loads the persisted session.
    ///
    /// Never fails: a missing token is the normal logged-out outcome, and an
    /// unreadable store is logged and treated the same way.
    pub async fn restore(&self) -> Session {
        let _guard = self.update_lock.lock().await;

        let restored = match self.store.load(&keys::ALL).await {
            Ok(values) => session_from_values(values),
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read persisted session: {}", e);
                Session::logged_out()
            }
        };

        tracing::info!(
            "[SessionStore] Restored session (authenticated: {})",
            restored.is_authenticated()
        );

        *self.session.write().await = restored.clone();
        restored
    }

    /// Persists and activates a new session.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the token is empty; nothing is persisted
    /// - the preference store error if persisting fails; the previous
    ///   session stays in effect
    pub async fn sign_in(&self, sign_in: SignIn) -> Result<Session> {
        let session: Session = sign_in.into();
        if !session.is_authenticated() {
            return Err(TripError::invalid_parameter("token", "empty"));
        }

        let _guard = self.update_lock.lock().await;

        let batch = PreferenceBatch::new()
            .set_or_remove(keys::AUTH_TOKEN, session.token.as_deref())
            .set_or_remove(keys::FIRST_NAME, session.first_name.as_deref())
            .set_or_remove(keys::LAST_NAME, session.last_name.as_deref())
            .set_or_remove(keys::USERNAME, session.username.as_deref())
            .set_or_remove(keys::USER_EMAIL, session.email.as_deref());
        self.store.apply(batch).await?;

        *self.session.write().await = session.clone();
        tracing::info!("[SessionStore] Signed in as {}", session.display_name());

        // No subscribers is fine.
        let _ = self.events.send(SessionEvent::Changed {
            session: session.clone(),
        });
        Ok(session)
    }

    /// Clears the persisted and in-memory session and emits `LoggedOut`.
    ///
    /// # Errors
    ///
    /// Returns the preference store error if clearing fails; the user stays
    /// signed in rather than being signed in again on the next launch.
    pub async fn sign_out(&self) -> Result<()> {
        let _guard = self.update_lock.lock().await;

        let batch = keys::ALL
            .iter()
            .fold(PreferenceBatch::new(), |batch, key| batch.remove(*key));
        self.store.apply(batch).await?;

        *self.session.write().await = Session::logged_out();
        tracing::info!("[SessionStore] Signed out");

        let _ = self.events.send(SessionEvent::LoggedOut);
        Ok(())
    }

    /// Snapshot of the current session.
    pub async fn current(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

fn session_from_values(mut values: HashMap<String, String>) -> Session {
    let mut take = |key: &str| values.remove(key).filter(|value| !value.is_empty());
    Session {
        token: take(keys::AUTH_TOKEN),
        first_name: take(keys::FIRST_NAME),
        last_name: take(keys::LAST_NAME),
        username: take(keys::USERNAME),
        email: take(keys::USER_EMAIL),
    }
}
