use serde::{Deserialize, Serialize};

use super::Session;

/// Events published by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new session was signed in. Carries the full snapshot.
    Changed { session: Session },
    /// The session was cleared; navigation should return to the root.
    LoggedOut,
}
