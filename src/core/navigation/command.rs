//! Reusable navigation commands for binding menu items and buttons

use std::cell::Cell;
use std::fmt;

use super::service::{NavigationResult, NavigationService};
use crate::core::routing::ViewType;

/// What a command navigates to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTarget {
    /// A route path
    Path(String),
    /// The route registered for a view type
    View(ViewType),
}

impl fmt::Display for CommandTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{path}"),
            Self::View(view_type) => write!(f, "{view_type}"),
        }
    }
}

/// A bound navigation action that can be triggered any number of times
#[derive(Debug, Clone)]
pub struct NavigationCommand {
    target: CommandTarget,
    executions: Cell<usize>,
}

impl NavigationCommand {
    /// Command navigating to `path`
    #[must_use]
    pub fn to_path(path: &str) -> Self {
        Self::new(CommandTarget::Path(path.to_string()))
    }

    /// Command navigating to the route of `view_type`
    #[must_use]
    pub const fn to_view(view_type: ViewType) -> Self {
        Self::new(CommandTarget::View(view_type))
    }

    const fn new(target: CommandTarget) -> Self {
        Self {
            target,
            executions: Cell::new(0),
        }
    }

    /// Navigation target
    #[must_use]
    pub const fn target(&self) -> &CommandTarget {
        &self.target
    }

    /// Whether the service is initialized and the target is registered
    #[must_use]
    pub fn can_execute(&self, service: &NavigationService) -> bool {
        service.is_initialized()
            && match &self.target {
                CommandTarget::Path(path) => service.registry().contains_path(path),
                CommandTarget::View(view_type) => {
                    service.registry().get_by_type(*view_type).is_some()
                }
            }
    }

    /// Trigger the navigation
    ///
    /// # Errors
    /// Whatever the underlying `navigate_to` call reports.
    pub fn execute(&self, service: &NavigationService) -> NavigationResult {
        self.executions.set(self.executions.get() + 1);
        match &self.target {
            CommandTarget::Path(path) => service.navigate_to(path),
            CommandTarget::View(view_type) => service.navigate_to_view(*view_type),
        }
    }

    /// How many times the command has been triggered
    #[must_use]
    pub fn executions(&self) -> usize {
        self.executions.get()
    }
}
