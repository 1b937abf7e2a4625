//! Domain layer for the Tripnav client core.
//!
//! Typed routes, the session model, deep-link parsing, asset references and
//! the traits of the remote collaborators the coordinators depend on.

pub mod asset;
pub mod config;
pub mod deep_link;
pub mod error;
pub mod navigation;
pub mod preferences;
pub mod services;
pub mod session;

// Re-export common error type
pub use error::{Result, TripError};
