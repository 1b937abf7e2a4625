//! Session domain model.

use serde::{Deserialize, Serialize};

/// Placeholder shown when the user has not provided any name yet.
pub const DISPLAY_NAME_PLACEHOLDER: &str = "Traveler";

/// The authenticated user session.
///
/// All fields are optional; the session is authenticated exactly when a
/// token is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Session {
    /// Creates an empty, logged-out session.
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Name to greet the user with.
    ///
    /// Prefers "First Last", then whichever of the two is present, then the
    /// username, then [`DISPLAY_NAME_PLACEHOLDER`].
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full.is_empty() {
            return full;
        }

        match self.username.as_deref().map(str::trim) {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => DISPLAY_NAME_PLACEHOLDER.to_string(),
        }
    }
}

/// Credentials and profile fields delivered by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    pub token: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl SignIn {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            first_name: None,
            last_name: None,
            username: None,
            email: None,
        }
    }

    pub fn with_name(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Blank fields become absent, matching how a persisted session is read back.
impl From<SignIn> for Session {
    fn from(sign_in: SignIn) -> Self {
        Self {
            token: non_blank(Some(sign_in.token)),
            first_name: non_blank(sign_in.first_name),
            last_name: non_blank(sign_in.last_name),
            username: non_blank(sign_in.username),
            email: non_blank(sign_in.email),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
