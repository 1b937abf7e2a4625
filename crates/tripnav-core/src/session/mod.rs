//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Core session model (`Session`, `SignIn`)
//! - `event`: Change notifications (`SessionEvent`)
//! - `keys`: Persisted preference keys
//!
//! # Usage
//!
//! ```ignore
//! use tripnav_core::session::{Session, SessionEvent, SignIn};
//! ```

mod event;
pub mod keys;
mod model;

pub use event::SessionEvent;
pub use model::{DISPLAY_NAME_PLACEHOLDER, Session, SignIn};
