//! Navigation: the route stack and the shell that owns it.

mod route_stack;
mod shell;

pub use route_stack::RouteStack;
pub use shell::{NavigationCommand, NavigationShell, Navigator};
