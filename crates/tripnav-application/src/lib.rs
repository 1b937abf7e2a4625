//! Application layer for Tripnav.
//!
//! Coordinates the domain types in `tripnav-core` into the client's
//! long-lived services: the navigation shell, the session store, workflow
//! contexts, the deep-link join flow and image asset replacement.

pub mod asset_replacement;
pub mod deep_link_coordinator;
pub mod navigation;
pub mod session;
pub mod workflow;

pub use asset_replacement::{AssetReplacementOrchestrator, ReplacementPhase};
pub use deep_link_coordinator::{DeepLinkCoordinator, JoinState};
pub use navigation::{NavigationCommand, NavigationShell, Navigator, RouteStack};
pub use session::SessionStore;
pub use workflow::{RefreshSignal, TripListWorkflow, TripWorkflow, WorkflowCache};
