//! Navigate command handler
//!
//! Replays navigation steps against a live service over the built-in catalog.

use std::rc::Rc;

use campus_nav::config::Config;
use campus_nav::{
    verbose, NavigationError, NavigationEvent, NavigationService, NavigationStack, RoleSet,
    RouteRegistry, ViewTable,
};
use thiserror::Error;

/// Why a step did not change the stack
#[derive(Debug, Error)]
pub enum StepError {
    /// The route exists but the caller's roles do not grant it
    #[error("'{path}' is not available to {roles}")]
    Denied {
        /// Requested path
        path: String,
        /// Roles the caller holds
        roles: RoleSet,
    },
    /// The service refused the navigation
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// One parsed navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Push the route at this path
    To(String),
    /// Pop the current entry
    Back,
    /// Reset to the configured home route
    Home,
    /// Clear the stack, then push this path
    Reset(String),
}

impl Step {
    /// Parse `back`, `reset`, `reset:PATH`, or a plain path
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("back") {
            Self::Back
        } else if raw.eq_ignore_ascii_case("reset") {
            Self::Home
        } else if let Some(path) = strip_prefix_ignore_case(raw, RESET_PREFIX) {
            Self::Reset(path.trim().to_string())
        } else {
            Self::To(raw.to_string())
        }
    }
}

const RESET_PREFIX: &str = "reset:";

fn strip_prefix_ignore_case<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    let head = raw.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &raw[prefix.len()..])
}

/// Run `steps` in order and print the stack after each
pub fn run(
    registry: RouteRegistry,
    views: ViewTable,
    roles: &RoleSet,
    steps: &[String],
    config: &Config,
    verbose: bool,
) {
    let service = build_service(registry, views, config);
    if verbose {
        service.subscribe(|event| match event {
            NavigationEvent::Navigated { path, depth } => {
                verbose!("navigated to '{path}' (depth {depth})");
            }
            NavigationEvent::WentBack { path, depth } => {
                verbose!("back on '{path}' (depth {depth})");
            }
            NavigationEvent::Reset => verbose!("stack cleared"),
        });
    }

    let mut failures = 0usize;
    for (index, raw) in steps.iter().enumerate() {
        let step = Step::parse(raw);
        let outcome = execute(&service, &step, roles);
        match &outcome {
            Ok(()) => println!("{:>2}. ✓ {raw}", index + 1),
            Err(e) => {
                failures += 1;
                println!("{:>2}. ✗ {raw}: {e}", index + 1);
            }
        }
        print_stack(&service);
    }

    let trail = service.breadcrumbs();
    println!(
        "\nBreadcrumbs: {}",
        if trail.is_empty() {
            "(empty)".to_string()
        } else {
            trail.join(" > ")
        }
    );
    if failures > 0 {
        println!("{failures} of {} step(s) failed", steps.len());
    }
}

fn build_service(registry: RouteRegistry, views: ViewTable, config: &Config) -> NavigationService {
    let mut service = NavigationService::new(Rc::new(registry), Rc::new(views));
    let home = config.navigation.home_route.trim();
    if !home.is_empty() {
        service = service.with_home_route(home);
    }
    service
        .initialize(NavigationStack::new())
        .expect("fresh service has no stack bound");
    service
}

/// Run one step; routes the caller cannot access are refused before the
/// service is asked
fn execute(service: &NavigationService, step: &Step, roles: &RoleSet) -> Result<(), StepError> {
    match step {
        Step::Back => service.go_back()?,
        Step::Home => {
            check_access(service, service.home_route(), roles)?;
            service.navigate_home()?;
        }
        Step::To(path) => {
            check_access(service, path, roles)?;
            service.navigate_to(path)?;
        }
        Step::Reset(path) => {
            check_access(service, path, roles)?;
            service.navigate_and_reset(path)?;
        }
    }
    Ok(())
}

fn check_access(service: &NavigationService, path: &str, roles: &RoleSet) -> Result<(), StepError> {
    match service.registry().get_by_path(path) {
        Some(route) if !route.is_accessible_to(roles) => Err(StepError::Denied {
            path: path.to_string(),
            roles: roles.clone(),
        }),
        _ => Ok(()),
    }
}

fn print_stack(service: &NavigationService) {
    let Some(stack) = service.stack() else {
        return;
    };
    if stack.count() == 0 {
        println!("    (stack empty)");
        return;
    }
    for (depth, entry) in stack.iter().enumerate().rev() {
        let marker = if depth + 1 == stack.count() { "→" } else { " " };
        println!(
            "    {marker} [{}] {:<18} {}",
            depth + 1,
            entry.path(),
            entry.view_model().title()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_nav::core::catalog;

    fn service() -> NavigationService {
        let (registry, views) = catalog::discover().unwrap();
        build_service(registry, views, &Config::from_defaults())
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(Step::parse("BACK"), Step::Back);
        assert_eq!(Step::parse("reset"), Step::Home);
        assert_eq!(Step::parse("home"), Step::To("home".to_string()));
        assert_eq!(Step::parse("reset: courses"), Step::Reset("courses".to_string()));
        assert_eq!(Step::parse("RESET:courses"), Step::Reset("courses".to_string()));
        assert_eq!(Step::parse("Reset:Grades"), Step::Reset("Grades".to_string()));
        assert_eq!(Step::parse("resets"), Step::To("resets".to_string()));
        assert_eq!(Step::parse(" grades "), Step::To("grades".to_string()));
    }

    #[test]
    fn test_built_service_is_ready() {
        let service = service();
        assert!(service.is_initialized());
        assert_eq!(service.home_route(), "home");
        assert_eq!(
            service.initialize(NavigationStack::new()),
            Err(NavigationError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_steps_drive_the_stack() {
        let service = service();
        let teacher = RoleSet::parse("Teacher");

        execute(&service, &Step::To("home".to_string()), &teacher).unwrap();
        execute(&service, &Step::To("students".to_string()), &teacher).unwrap();
        assert_eq!(service.depth(), 2);

        execute(&service, &Step::Back, &teacher).unwrap();
        assert_eq!(service.current_path().as_deref(), Some("home"));

        execute(&service, &Step::Reset("courses".to_string()), &teacher).unwrap();
        assert_eq!(service.breadcrumbs(), vec!["courses"]);
    }

    #[test]
    fn test_inaccessible_route_is_refused() {
        let service = service();
        let student = RoleSet::parse("Student");

        let err = execute(&service, &Step::To("admin".to_string()), &student).unwrap_err();
        assert!(matches!(err, StepError::Denied { .. }));
        assert_eq!(service.depth(), 0);

        let err = execute(&service, &Step::To("nowhere".to_string()), &student).unwrap_err();
        assert!(matches!(
            err,
            StepError::Navigation(NavigationError::RouteNotFound { .. })
        ));
    }
}
