//! Navigation service: the only writer of the navigation stack
//!
//! The service resolves a path (or view type) through the route registry,
//! builds the target view model through the injected factory, and only then
//! pushes it. Every navigation failure is caught here, logged with the
//! attempted target, and returned as a [`NavigationError`] value; the stack
//! is left as it was, except for the documented clear in
//! [`NavigationService::navigate_and_reset`].
//!
//! Navigation is single-flight: a call issued while another is still
//! resolving (for example from inside a view-model constructor) is rejected
//! with [`NavigationError::NavigationInProgress`]. A call made while a
//! [`NavigationService::stack`] guard is still alive is rejected with
//! [`NavigationError::StackBusy`] before the factory runs.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::command::NavigationCommand;
use super::factory::{ViewModel, ViewModelFactory};
use super::stack::NavigationStack;
use crate::core::error::NavigationError;
use crate::core::routing::{RouteDescriptor, RouteRegistry, Routable, ViewType};
use crate::{debug, warn};

/// Result of one navigation call
pub type NavigationResult = Result<(), NavigationError>;

/// Path used by [`NavigationService::navigate_home`] unless configured
pub const DEFAULT_HOME_ROUTE: &str = "home";

/// A view model bound to the route it was activated for
pub struct ActivatedView {
    path: String,
    display_name: String,
    view_model: Box<dyn ViewModel>,
}

impl ActivatedView {
    fn new(route: &RouteDescriptor, view_model: Box<dyn ViewModel>) -> Self {
        Self {
            path: route.path().to_string(),
            display_name: route.display_name().to_string(),
            view_model,
        }
    }

    /// Path of the route this entry was activated for
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Display name of the route
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Target view type
    #[must_use]
    pub fn view_type(&self) -> ViewType {
        self.view_model.view_type()
    }

    /// The live view model
    #[must_use]
    pub fn view_model(&self) -> &dyn ViewModel {
        self.view_model.as_ref()
    }
}

impl Drop for ActivatedView {
    fn drop(&mut self) {
        self.view_model.on_deactivated();
    }
}

impl fmt::Debug for ActivatedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivatedView")
            .field("path", &self.path)
            .field("view_type", &self.view_type())
            .finish()
    }
}

/// Notification sent to subscribers after each successful stack change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A new entry was pushed
    Navigated {
        /// Path now on screen
        path: String,
        /// Stack depth after the push
        depth: usize,
    },
    /// The top entry was popped
    WentBack {
        /// Path now on screen
        path: String,
        /// Stack depth after the pop
        depth: usize,
    },
    /// The stack was cleared by `navigate_and_reset`
    Reset,
}

type Observer = Box<dyn Fn(&NavigationEvent)>;

/// Resets the in-flight flag even if the guarded operation unwinds
struct FlightGuard<'a>(&'a Cell<bool>);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Orchestrates route lookup, view-model construction and the history stack
pub struct NavigationService {
    registry: Rc<RouteRegistry>,
    factory: Rc<dyn ViewModelFactory>,
    stack: RefCell<Option<NavigationStack<ActivatedView>>>,
    in_flight: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
    /// Subscribed while `observers` was being notified
    pending_observers: RefCell<Vec<Observer>>,
    home_route: String,
}

impl NavigationService {
    /// Create an uninitialized service
    #[must_use]
    pub fn new(registry: Rc<RouteRegistry>, factory: Rc<dyn ViewModelFactory>) -> Self {
        Self {
            registry,
            factory,
            stack: RefCell::new(None),
            in_flight: Cell::new(false),
            observers: RefCell::new(Vec::new()),
            pending_observers: RefCell::new(Vec::new()),
            home_route: DEFAULT_HOME_ROUTE.to_string(),
        }
    }

    /// Override the path used by [`navigate_home`](Self::navigate_home)
    #[must_use]
    pub fn with_home_route(mut self, path: impl Into<String>) -> Self {
        self.home_route = path.into();
        self
    }

    /// Bind the service to its stack; must happen exactly once before navigating
    ///
    /// # Errors
    /// Returns [`NavigationError::AlreadyInitialized`] on a second call; the
    /// originally bound stack is kept. A live [`stack`](Self::stack) guard
    /// implies a bound stack and gets the same error.
    pub fn initialize(&self, stack: NavigationStack<ActivatedView>) -> NavigationResult {
        let Ok(mut slot) = self.stack.try_borrow_mut() else {
            warn!("Ignoring initialize while the navigation stack is borrowed");
            return Err(NavigationError::AlreadyInitialized);
        };
        if slot.is_some() {
            warn!("Ignoring second initialize of the navigation service");
            return Err(NavigationError::AlreadyInitialized);
        }
        *slot = Some(stack);
        debug!("Navigation service initialized");
        Ok(())
    }

    /// Whether `initialize` has been called
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        // Only a bound stack is ever borrowed mutably across a call
        self.stack.try_borrow().map_or(true, |slot| slot.is_some())
    }

    /// The registry this service resolves against
    #[must_use]
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Configured home route
    #[must_use]
    pub fn home_route(&self) -> &str {
        &self.home_route
    }

    /// Read access to the stack, `None` before `initialize`
    ///
    /// While the guard is alive every navigation call fails with
    /// [`NavigationError::StackBusy`] and leaves the stack as it was.
    #[must_use]
    pub fn stack(&self) -> Option<Ref<'_, NavigationStack<ActivatedView>>> {
        Ref::filter_map(self.stack.try_borrow().ok()?, Option::as_ref).ok()
    }

    /// Navigate to the route registered under `path`
    ///
    /// # Errors
    /// `NotInitialized`, `NavigationInProgress`, `StackBusy`, `RouteNotFound` or
    /// `ViewModelResolution`; the stack is unchanged on any of them.
    pub fn navigate_to(&self, path: &str) -> NavigationResult {
        self.exclusive(path, || {
            let route = self.lookup_path(path)?;
            self.activate(route)
        })
    }

    /// Navigate to the route declared by `T`
    ///
    /// # Errors
    /// Same as [`navigate_to`](Self::navigate_to), with `ViewTypeNotRegistered`
    /// in place of `RouteNotFound`.
    pub fn navigate_to_type<T: Routable>(&self) -> NavigationResult {
        self.navigate_to_view(T::VIEW_TYPE)
    }

    /// Navigate to the route registered for `view_type`
    ///
    /// # Errors
    /// Same as [`navigate_to_type`](Self::navigate_to_type).
    pub fn navigate_to_view(&self, view_type: ViewType) -> NavigationResult {
        self.exclusive(view_type.name(), || {
            let route = self
                .registry
                .get_by_type(view_type)
                .ok_or(NavigationError::ViewTypeNotRegistered { view_type })?;
            self.activate(route)
        })
    }

    /// Clear the stack, then navigate to `path`
    ///
    /// If the navigation after the clear fails, the stack stays empty. This
    /// is not rolled back.
    ///
    /// # Errors
    /// Same as [`navigate_to`](Self::navigate_to).
    pub fn navigate_and_reset(&self, path: &str) -> NavigationResult {
        self.exclusive(path, || {
            self.reset_stack(path)?;
            let route = self.lookup_path(path)?;
            self.activate(route)
        })
    }

    /// Reset to the configured home route
    ///
    /// # Errors
    /// Same as [`navigate_and_reset`](Self::navigate_and_reset).
    pub fn navigate_home(&self) -> NavigationResult {
        self.navigate_and_reset(&self.home_route)
    }

    /// Pop the current entry
    ///
    /// # Errors
    /// `NotInitialized`, `NavigationInProgress`, `StackBusy`, or `NoHistory`
    /// when `can_go_back` is false.
    pub fn go_back(&self) -> NavigationResult {
        self.exclusive("back", || {
            let (removed, event) = {
                let mut stack = self.stack_mut("back")?;
                let removed = stack.go_back()?;
                let event = NavigationEvent::WentBack {
                    path: stack
                        .current()
                        .map(|entry| entry.path().to_string())
                        .unwrap_or_default(),
                    depth: stack.count(),
                };
                (removed, event)
            };
            debug!("Left '{}'", removed.path());
            drop(removed);
            self.notify(&event);
            Ok(())
        })
    }

    /// Whether a back navigation would succeed
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.stack().is_some_and(|stack| stack.can_go_back())
    }

    /// Number of entries on the stack
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack().map_or(0, |stack| stack.count())
    }

    /// Path on screen
    #[must_use]
    pub fn current_path(&self) -> Option<String> {
        self.stack()?
            .current()
            .map(|entry| entry.path().to_string())
    }

    /// Paths from the bottom of the stack to the top
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<String> {
        self.stack().map_or_else(Vec::new, |stack| {
            stack.iter().map(|entry| entry.path().to_string()).collect()
        })
    }

    /// Reusable command that navigates to `path`
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn create_navigation_command(&self, path: &str) -> NavigationCommand {
        NavigationCommand::to_path(path)
    }

    /// Reusable command that navigates to the route declared by `T`
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn create_navigation_command_for<T: Routable>(&self) -> NavigationCommand {
        NavigationCommand::to_view(T::VIEW_TYPE)
    }

    /// Call `observer` after every successful stack change
    ///
    /// An observer added from inside a notification starts with the next
    /// event.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&NavigationEvent) + 'static,
    {
        match self.observers.try_borrow_mut() {
            Ok(mut observers) => observers.push(Box::new(observer)),
            Err(_) => {
                debug!("Observer subscribed during a notification; queued");
                self.pending_observers.borrow_mut().push(Box::new(observer));
            }
        }
    }

    /// Run `op` under the initialization check and single-flight guard,
    /// logging any failure with the requested target
    fn exclusive<F>(&self, requested: &str, op: F) -> NavigationResult
    where
        F: FnOnce() -> NavigationResult,
    {
        let result = if !self.is_initialized() {
            Err(NavigationError::NotInitialized)
        } else if self.in_flight.get() {
            Err(NavigationError::NavigationInProgress {
                requested: requested.to_string(),
            })
        } else if self.stack.try_borrow_mut().is_err() {
            // A caller still holds a `stack()` guard; refuse before the factory runs
            Err(NavigationError::StackBusy {
                requested: requested.to_string(),
            })
        } else {
            self.in_flight.set(true);
            let _guard = FlightGuard(&self.in_flight);
            op()
        };

        if let Err(err) = &result {
            warn!("Navigation to '{requested}' failed: {err}");
        }
        result
    }

    fn lookup_path(&self, path: &str) -> Result<&RouteDescriptor, NavigationError> {
        self.registry
            .get_by_path(path)
            .ok_or_else(|| NavigationError::RouteNotFound {
                path: path.to_string(),
            })
    }

    /// Build the view model first; the stack is only touched on success
    fn activate(&self, route: &RouteDescriptor) -> NavigationResult {
        let view_type = route.view_type();
        let view_model =
            self.factory
                .create(view_type)
                .map_err(|reason| NavigationError::ViewModelResolution { view_type, reason })?;

        let depth = {
            let mut stack = self.stack_mut(route.path())?;
            stack.push(ActivatedView::new(route, view_model));
            stack.count()
        };

        debug!("Navigated to '{}' (depth {depth})", route.path());
        self.notify(&NavigationEvent::Navigated {
            path: route.path().to_string(),
            depth,
        });
        Ok(())
    }

    fn reset_stack(&self, requested: &str) -> NavigationResult {
        let removed = self.stack_mut(requested)?.clear();
        debug!("Navigation stack cleared ({} entries released)", removed.len());
        drop(removed);
        self.notify(&NavigationEvent::Reset);
        Ok(())
    }

    /// Write access to the bound stack for the call that asked for `requested`
    fn stack_mut(
        &self,
        requested: &str,
    ) -> Result<RefMut<'_, NavigationStack<ActivatedView>>, NavigationError> {
        let slot = self
            .stack
            .try_borrow_mut()
            .map_err(|_| NavigationError::StackBusy {
                requested: requested.to_string(),
            })?;
        RefMut::filter_map(slot, Option::as_mut).map_err(|_| NavigationError::NotInitialized)
    }

    fn notify(&self, event: &NavigationEvent) {
        if let Ok(observers) = self.observers.try_borrow() {
            for observer in observers.iter() {
                observer(event);
            }
        }
        let pending = std::mem::take(&mut *self.pending_observers.borrow_mut());
        if !pending.is_empty() {
            self.observers.borrow_mut().extend(pending);
        }
    }
}

impl fmt::Debug for NavigationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationService")
            .field("routes", &self.registry.len())
            .field("initialized", &self.is_initialized())
            .field("breadcrumbs", &self.breadcrumbs())
            .field("home_route", &self.home_route)
            .finish_non_exhaustive()
    }
}
