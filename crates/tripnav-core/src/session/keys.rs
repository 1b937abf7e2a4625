//! Keys under which the session is persisted in the preference store.

pub const AUTH_TOKEN: &str = "authToken";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const USERNAME: &str = "username";
pub const USER_EMAIL: &str = "userEmail";

/// Every persisted session key, in a stable order.
pub const ALL: [&str; 5] = [AUTH_TOKEN, FIRST_NAME, LAST_NAME, USERNAME, USER_EMAIL];
