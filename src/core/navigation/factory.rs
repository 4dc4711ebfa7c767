//! View-model contract and the lookup-table factory

use std::collections::HashMap;
use std::fmt;

use crate::core::routing::{Routable, ViewType};

/// An activated screen's state object.
///
/// Resources a view model owns are released by `Drop` when its stack entry
/// is popped or cleared; [`on_deactivated`](Self::on_deactivated) runs first.
pub trait ViewModel {
    /// Type tag this instance was created for
    fn view_type(&self) -> ViewType;

    /// Screen title
    fn title(&self) -> &str;

    /// Called once when the entry leaves the navigation stack
    fn on_deactivated(&mut self) {}
}

impl fmt::Debug for dyn ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModel")
            .field("view_type", &self.view_type())
            .field("title", &self.title())
            .finish()
    }
}

/// Constructs view models for a target type.
///
/// Implementations report failure as a reason string; the navigation service
/// wraps it into a resolution error.
pub trait ViewModelFactory {
    /// Build a fresh instance of `view_type`
    ///
    /// # Errors
    /// Returns a human-readable reason when the instance cannot be built.
    fn create(&self, view_type: ViewType) -> Result<Box<dyn ViewModel>, String>;
}

type Constructor = Box<dyn Fn() -> Result<Box<dyn ViewModel>, String>>;

/// Factory backed by a table of constructors keyed by view type.
///
/// Built at the same time as the route registry so every routable type has
/// a matching constructor.
#[derive(Default)]
pub struct ViewTable {
    constructors: HashMap<ViewType, Constructor>,
}

impl ViewTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` with its `Default` constructor
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Routable + ViewModel + Default + 'static,
    {
        self.register_with(T::VIEW_TYPE, || Ok(Box::new(T::default())))
    }

    /// Register a custom constructor for `view_type`
    ///
    /// A later registration replaces an earlier one for the same type.
    pub fn register_with<F>(&mut self, view_type: ViewType, constructor: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn ViewModel>, String> + 'static,
    {
        self.constructors.insert(view_type, Box::new(constructor));
        self
    }

    /// Whether a constructor exists for `view_type`
    #[must_use]
    pub fn contains(&self, view_type: ViewType) -> bool {
        self.constructors.contains_key(&view_type)
    }

    /// Number of registered constructors
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Check if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl ViewModelFactory for ViewTable {
    fn create(&self, view_type: ViewType) -> Result<Box<dyn ViewModel>, String> {
        let constructor = self
            .constructors
            .get(&view_type)
            .ok_or_else(|| format!("no constructor registered for {view_type}"))?;
        constructor()
    }
}

impl fmt::Debug for ViewTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&ViewType> = self.constructors.keys().collect();
        types.sort();
        f.debug_struct("ViewTable").field("types", &types).finish()
    }
}
