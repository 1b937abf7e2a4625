//! Long-lived, entity-scoped workflow contexts.
//!
//! - `cache`: identity-keyed get-or-create cache (`WorkflowCache`)
//! - `refresh`: level-triggered needs-refresh flag (`RefreshSignal`)
//! - `trip`: per-trip context (`TripWorkflow`)
//! - `trip_list`: trip list that consumes the refresh flag (`TripListWorkflow`)

mod cache;
mod refresh;
mod trip;
mod trip_list;

pub use cache::WorkflowCache;
pub use refresh::RefreshSignal;
pub use trip::TripWorkflow;
pub use trip_list::TripListWorkflow;
