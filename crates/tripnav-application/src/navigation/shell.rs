//! Single-writer owner of the route stack.
//!
//! Workflow contexts never hold the shell itself. They receive a cloneable
//! [`Navigator`] and send [`NavigationCommand`]s, which the shell applies in
//! arrival order. The shell also listens for `SessionEvent::LoggedOut` and
//! resets to the root screen when it sees one.

use tokio::sync::{broadcast, mpsc, watch};
use tripnav_core::error::Result;
use tripnav_core::navigation::Route;
use tripnav_core::session::SessionEvent;

use super::RouteStack;

/// A request to mutate the route stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCommand {
    Push(Route),
    Pop,
    ResetToRoot,
}

/// Cloneable handle used to request navigation.
#[derive(Debug, Clone)]
pub struct Navigator {
    sender: mpsc::UnboundedSender<NavigationCommand>,
}

impl Navigator {
    /// Requests `route` to be pushed. Returns `false` if the shell has stopped.
    pub fn push(&self, route: Route) -> bool {
        self.send(NavigationCommand::Push(route))
    }

    pub fn pop(&self) -> bool {
        self.send(NavigationCommand::Pop)
    }

    pub fn reset_to_root(&self) -> bool {
        self.send(NavigationCommand::ResetToRoot)
    }

    fn send(&self, command: NavigationCommand) -> bool {
        self.sender.send(command).is_ok()
    }
}

/// Owns the [`RouteStack`] and publishes the current destination.
pub struct NavigationShell {
    stack: RouteStack,
    commands: mpsc::UnboundedReceiver<NavigationCommand>,
    session_events: Option<broadcast::Receiver<SessionEvent>>,
    current: watch::Sender<Option<Route>>,
}

impl NavigationShell {
    /// Creates a shell at the root screen and the navigator that drives it.
    pub fn new() -> (Self, Navigator) {
        let (sender, commands) = mpsc::unbounded_channel();
        let (current, _) = watch::channel(None);
        let shell = Self {
            stack: RouteStack::new(),
            commands,
            session_events: None,
            current,
        };
        (shell, Navigator { sender })
    }

    /// Subscribes the shell to session events so logout resets navigation.
    pub fn with_session_events(mut self, events: broadcast::Receiver<SessionEvent>) -> Self {
        self.session_events = Some(events);
        self
    }

    /// Receiver of the current destination (`None` is the root screen).
    pub fn subscribe(&self) -> watch::Receiver<Option<Route>> {
        self.current.subscribe()
    }

    pub fn stack(&self) -> &RouteStack {
        &self.stack
    }

    /// Applies one command and publishes the resulting destination.
    ///
    /// # Errors
    ///
    /// `EmptyStack` for a pop at the root; the stack is unchanged.
    pub fn apply(&mut self, command: NavigationCommand) -> Result<()> {
        match command {
            NavigationCommand::Push(route) => self.stack.push(route),
            NavigationCommand::Pop => {
                self.stack.pop()?;
            }
            NavigationCommand::ResetToRoot => self.stack.reset_to_root(),
        }
        self.publish();
        Ok(())
    }

    /// Reacts to a session event.
    pub fn handle_session_event(&mut self, event: &SessionEvent) {
        if let SessionEvent::LoggedOut = event {
            tracing::info!("[NavigationShell] Logged out, resetting to root");
            self.stack.reset_to_root();
            self.publish();
        }
    }

    /// Processes commands and session events until every [`Navigator`] has
    /// been dropped. Returns the final stack.
    pub async fn run(mut self) -> RouteStack {
        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else { break };
                    if let Err(e) = self.apply(command) {
                        tracing::debug!("[NavigationShell] Ignoring command: {}", e);
                    }
                }
                event = next_session_event(&mut self.session_events) => {
                    match event {
                        Ok(event) => self.handle_session_event(&event),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!("[NavigationShell] Missed {} session event(s)", skipped);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            self.session_events = None;
                        }
                    }
                }
            }
        }

        tracing::debug!("[NavigationShell] All navigators dropped, stopping");
        self.stack
    }

    fn publish(&self) {
        let current = self.stack.current().cloned();
        self.current.send_if_modified(|value| {
            if *value != current {
                *value = current;
                true
            } else {
                false
            }
        });
    }
}

async fn next_session_event(
    events: &mut Option<broadcast::Receiver<SessionEvent>>,
) -> std::result::Result<SessionEvent, broadcast::error::RecvError> {
    match events {
        Some(events) => events.recv().await,
        None => std::future::pending().await,
    }
}
