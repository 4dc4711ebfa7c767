//! Error types for route registration and navigation

use thiserror::Error;

use super::routing::ViewType;

/// Failures raised while building the route table.
///
/// These are programming errors in the route declarations and abort startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two declarations share a path (compared case-insensitively)
    #[error("Duplicate route path '{path}': already registered by {existing}, attempted by {attempted}")]
    DuplicateRoute {
        /// Path as written by the rejected declaration
        path: String,
        /// View type that owns the path
        existing: ViewType,
        /// View type whose declaration was rejected
        attempted: ViewType,
    },
    /// The same view type was declared twice
    #[error("View type {view_type} declares more than one route")]
    DuplicateViewType {
        /// Offending view type
        view_type: ViewType,
    },
    /// A declaration had an empty or blank path
    #[error("Route declared by {view_type} has an empty path")]
    EmptyPath {
        /// Offending view type
        view_type: ViewType,
    },
}

/// Failures of a single navigation call.
///
/// All of these are recoverable: the navigation stack is left as it was
/// before the call (except for the documented clear in `navigate_and_reset`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// A navigation call was made before `initialize`
    #[error("Navigation service has not been initialized")]
    NotInitialized,
    /// `initialize` was called a second time
    #[error("Navigation service is already initialized")]
    AlreadyInitialized,
    /// No route is registered under the requested path
    #[error("No route registered for path '{path}'")]
    RouteNotFound {
        /// Requested path
        path: String,
    },
    /// No route is registered for the requested view type
    #[error("No route registered for view type {view_type}")]
    ViewTypeNotRegistered {
        /// Requested view type
        view_type: ViewType,
    },
    /// The view-model factory could not construct the target
    #[error("Could not create view model {view_type}: {reason}")]
    ViewModelResolution {
        /// Target view type
        view_type: ViewType,
        /// Factory-supplied reason
        reason: String,
    },
    /// `go_back` with one or zero entries on the stack
    #[error("No navigation history to go back to")]
    NoHistory,
    /// The stack was borrowed for reading while the call needed to change it
    #[error("Navigation to '{requested}' rejected: the navigation stack is being read")]
    StackBusy {
        /// Path or view type of the rejected request
        requested: String,
    },
    /// Another navigation was still resolving when this one was issued
    #[error("Navigation to '{requested}' rejected: another navigation is in progress")]
    NavigationInProgress {
        /// Path or view type of the rejected request
        requested: String,
    },
}
