//! Navigation domain module.
//!
//! Typed destinations and the identifiers they carry.

mod route;

pub use route::{ActivityId, Route, TripDayId, TripId};
