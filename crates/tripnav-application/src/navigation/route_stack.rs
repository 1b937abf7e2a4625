use tripnav_core::error::{Result, TripError};
use tripnav_core::navigation::Route;

/// Ordered stack of navigation destinations.
///
/// An empty stack means the root screen is showing; it is not an error
/// state. Only `push`, `pop` and `reset_to_root` mutate the stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteStack {
    routes: Vec<Route>,
}

impl RouteStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `route`, making it the current destination.
    pub fn push(&mut self, route: Route) {
        tracing::debug!("[RouteStack] push {}", route.name());
        self.routes.push(route);
    }

    /// Removes and returns the current destination.
    ///
    /// # Errors
    ///
    /// Returns `EmptyStack` when already at the root. The stack is left
    /// untouched in that case.
    pub fn pop(&mut self) -> Result<Route> {
        let route = self.routes.pop().ok_or(TripError::EmptyStack)?;
        tracing::debug!("[RouteStack] pop {}", route.name());
        Ok(route)
    }

    /// Clears the stack, returning to the root screen.
    pub fn reset_to_root(&mut self) {
        if !self.routes.is_empty() {
            tracing::debug!("[RouteStack] reset to root ({} route(s) dropped)", self.routes.len());
        }
        self.routes.clear();
    }

    /// The destination currently shown; `None` means the root screen.
    pub fn current(&self) -> Option<&Route> {
        self.routes.last()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All routes, bottom first.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripnav_core::navigation::TripId;

    #[test]
    fn test_new_stack_is_root() {
        let stack = RouteStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.current(), None);
    }

    #[test]
    fn test_push_then_pop_restores_previous_top() {
        let mut stack = RouteStack::new();
        stack.push(Route::Home);
        stack.push(Route::TripList);

        let before_top = stack.current().cloned();
        let before_len = stack.len();

        stack.push(Route::TripDetail { trip_id: TripId(5) });
        assert_eq!(stack.current(), Some(&Route::TripDetail { trip_id: TripId(5) }));

        let popped = stack.pop().unwrap();
        assert_eq!(popped, Route::TripDetail { trip_id: TripId(5) });
        assert_eq!(stack.current().cloned(), before_top);
        assert_eq!(stack.len(), before_len);
    }

    #[test]
    fn test_pop_on_empty_is_error_not_panic() {
        let mut stack = RouteStack::new();
        assert_eq!(stack.pop(), Err(TripError::EmptyStack));
        assert!(stack.is_empty());

        stack.push(Route::Home);
        stack.pop().unwrap();
        assert!(stack.pop().unwrap_err().is_empty_stack());
    }

    #[test]
    fn test_reset_to_root() {
        let mut stack = RouteStack::new();
        stack.push(Route::Home);
        stack.push(Route::TripTabs { trip_id: TripId(1) });
        stack.reset_to_root();
        assert!(stack.is_empty());

        // Idempotent on an empty stack.
        stack.reset_to_root();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_routes_order() {
        let mut stack = RouteStack::new();
        stack.push(Route::SignIn);
        stack.push(Route::VerifyEmail);
        assert_eq!(stack.routes(), &[Route::SignIn, Route::VerifyEmail]);
    }
}
