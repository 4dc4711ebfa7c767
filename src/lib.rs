//! Navigation and routing engine for a multi-view campus management application
//!
//! Screens declare their routes once; the [`RouteRegistry`] indexes them, the
//! [`NavigationService`] moves between them on a history stack, and the
//! [`MenuProjector`] turns the registry into role-filtered menus.

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::error::{NavigationError, RegistryError};
pub use crate::core::get_version;
pub use crate::core::menu::{MenuFormat, MenuGroup, MenuItem, MenuProjection, MenuProjector};
pub use crate::core::navigation::{
    ActivatedView, NavigationCommand, NavigationEvent, NavigationResult, NavigationService,
    NavigationStack, ViewModel, ViewModelFactory, ViewTable,
};
pub use crate::core::routing::{
    RegistryBuilder, RoleSet, Routable, RouteDeclaration, RouteDescriptor, RouteRegistry,
    RouteSource, ViewType,
};
