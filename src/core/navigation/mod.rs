//! Navigation stack, view-model factory and the navigation service

pub mod command;
pub mod factory;
pub mod service;
pub mod stack;

pub use command::{CommandTarget, NavigationCommand};
pub use factory::{ViewModel, ViewModelFactory, ViewTable};
pub use service::{
    ActivatedView, NavigationEvent, NavigationResult, NavigationService, DEFAULT_HOME_ROUTE,
};
pub use stack::{NavigationStack, StackState};
