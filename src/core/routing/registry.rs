//! Route registry: the authoritative, read-only table of route descriptors
//!
//! Routes are collected once at startup through a [`RegistryBuilder`] (or
//! [`RouteRegistry::discover`] over a list of [`RouteSource`]s). Duplicate
//! paths are rejected at registration time. After `build` the registry is
//! never mutated; it is shared by reference with the navigation service and
//! the menu projector.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::descriptor::{
    names_match, route_key, RouteDeclaration, RouteDescriptor, Routable, ViewType,
};
use super::roles::RoleSet;
use crate::core::error::RegistryError;
use crate::core::navigation::ViewTable;
use crate::{debug, info};

/// A module that contributes route declarations (a feature area of the app)
///
/// Each route a source declares should get its constructor in `views`, so
/// the registry and the view table are filled in the same pass.
pub trait RouteSource {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Append this module's declarations to `builder` and its constructors to `views`
    fn declare(&self, builder: &mut RegistryBuilder, views: &mut ViewTable);
}

/// Explicit registration list, validated on [`build`](Self::build)
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    pending: Vec<(ViewType, RouteDeclaration)>,
}

impl RegistryBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the route declared by `T`
    pub fn declare<T: Routable>(&mut self) -> &mut Self {
        self.declare_raw(T::VIEW_TYPE, T::route())
    }

    /// Queue a declaration for an arbitrary view type
    pub fn declare_raw(&mut self, view_type: ViewType, declaration: RouteDeclaration) -> &mut Self {
        self.pending.push((view_type, declaration));
        self
    }

    /// Queue everything a source declares, registering its constructors in `views`
    pub fn extend(&mut self, source: &dyn RouteSource, views: &mut ViewTable) -> &mut Self {
        let before = self.pending.len();
        source.declare(self, views);
        debug!(
            "Route source '{}' declared {} route(s)",
            source.name(),
            self.pending.len() - before
        );
        self
    }

    /// Number of queued declarations
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing has been declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Register every queued declaration in order
    ///
    /// # Errors
    /// Returns the first registration failure (duplicate path, duplicate view
    /// type, or empty path).
    pub fn build(self) -> Result<RouteRegistry, RegistryError> {
        let mut registry = RouteRegistry::new();
        for (view_type, declaration) in self.pending {
            registry.register(view_type, declaration)?;
        }
        info!("Route registry built with {} route(s)", registry.len());
        Ok(registry)
    }
}

/// Read-only table of route descriptors.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    /// Descriptors in registration order
    routes: Vec<RouteDescriptor>,
    /// Lowercase path -> index into `routes`
    by_path: HashMap<String, usize>,
    /// View type -> index into `routes`
    by_type: HashMap<ViewType, usize>,
}

impl RouteRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an explicit registration list
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Run the single discovery pass over `sources`, returning the registry
    /// together with the constructor table the sources filled
    ///
    /// # Errors
    /// Returns the first registration failure. A failure here is a
    /// programming error in the route declarations.
    pub fn discover(sources: &[&dyn RouteSource]) -> Result<(Self, ViewTable), RegistryError> {
        let mut builder = RegistryBuilder::new();
        let mut views = ViewTable::new();
        for source in sources {
            builder.extend(*source, &mut views);
        }
        Ok((builder.build()?, views))
    }

    /// Validate and insert one declaration
    ///
    /// The existing entry is left untouched when registration fails.
    ///
    /// # Errors
    /// - [`RegistryError::EmptyPath`] for a blank path
    /// - [`RegistryError::DuplicateRoute`] when the path (case-insensitive) is taken
    /// - [`RegistryError::DuplicateViewType`] when the type already has a route
    pub fn register(
        &mut self,
        view_type: ViewType,
        declaration: RouteDeclaration,
    ) -> Result<&RouteDescriptor, RegistryError> {
        let descriptor = RouteDescriptor::from_declaration(view_type, declaration)?;

        if let Some(&index) = self.by_path.get(descriptor.key()) {
            return Err(RegistryError::DuplicateRoute {
                path: descriptor.path().to_string(),
                existing: self.routes[index].view_type(),
                attempted: view_type,
            });
        }
        if self.by_type.contains_key(&view_type) {
            return Err(RegistryError::DuplicateViewType { view_type });
        }

        let index = self.routes.len();
        self.by_path.insert(descriptor.key().to_string(), index);
        self.by_type.insert(view_type, index);
        debug!(
            "Registered route '{}' -> {}",
            descriptor.path(),
            descriptor.view_type()
        );
        self.routes.push(descriptor);
        Ok(&self.routes[index])
    }

    /// Case-insensitive lookup by path
    #[must_use]
    pub fn get_by_path(&self, path: &str) -> Option<&RouteDescriptor> {
        self.by_path
            .get(&route_key(path))
            .map(|&index| &self.routes[index])
    }

    /// Lookup by target view type
    #[must_use]
    pub fn get_by_type(&self, view_type: ViewType) -> Option<&RouteDescriptor> {
        self.by_type
            .get(&view_type)
            .map(|&index| &self.routes[index])
    }

    /// Whether a path is registered
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.by_path.contains_key(&route_key(path))
    }

    /// All descriptors in registration order
    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if no routes are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Menu-eligible routes visible to `roles`, sorted by `(order, display name)`
    #[must_use]
    pub fn get_menu_routes(&self, roles: &RoleSet) -> Vec<&RouteDescriptor> {
        self.visible(roles, |_| true)
    }

    /// Menu routes whose parent is `parent_path`
    #[must_use]
    pub fn get_child_routes(&self, parent_path: &str, roles: &RoleSet) -> Vec<&RouteDescriptor> {
        let parent_key = route_key(parent_path);
        self.visible(roles, |route| {
            route
                .parent_route()
                .is_some_and(|parent| route_key(parent) == parent_key)
        })
    }

    /// Menu routes in the named group (case-insensitive)
    #[must_use]
    pub fn get_routes_by_group(&self, group: &str, roles: &RoleSet) -> Vec<&RouteDescriptor> {
        self.visible(roles, |route| route.group().is_some_and(|g| names_match(g, group)))
    }

    /// Menu routes carrying at least one of `tags`
    #[must_use]
    pub fn get_routes_by_tags<S: AsRef<str>>(
        &self,
        tags: &[S],
        roles: &RoleSet,
    ) -> Vec<&RouteDescriptor> {
        self.visible(roles, |route| {
            tags.iter().any(|tag| route.has_tag(tag.as_ref()))
        })
    }

    /// Shared filter/sort discipline for every menu query
    fn visible<F>(&self, roles: &RoleSet, predicate: F) -> Vec<&RouteDescriptor>
    where
        F: Fn(&RouteDescriptor) -> bool,
    {
        let mut routes: Vec<&RouteDescriptor> = self
            .routes
            .iter()
            .filter(|route| route.show_in_menu() && route.is_accessible_to(roles))
            .filter(|route| predicate(*route))
            .collect();
        routes.sort_by(|a, b| menu_order(a, b));
        routes
    }
}

/// `(order asc, display name asc)`; display names compare case-insensitively
/// first, then exactly, then by path so the result is total.
pub(crate) fn menu_order(a: &RouteDescriptor, b: &RouteDescriptor) -> Ordering {
    a.order()
        .cmp(&b.order())
        .then_with(|| {
            a.display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase())
        })
        .then_with(|| a.display_name().cmp(b.display_name()))
        .then_with(|| a.key().cmp(b.key()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(routes: Vec<(&'static str, RouteDeclaration)>) -> RouteRegistry {
        let mut builder = RegistryBuilder::new();
        for (name, declaration) in routes {
            builder.declare_raw(ViewType::new(name), declaration);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = registry_with(vec![(
            "StudentListViewModel",
            RouteDeclaration::new("Students"),
        )]);

        assert!(registry.get_by_path("students").is_some());
        assert!(registry.get_by_path("STUDENTS").is_some());
        assert!(registry.get_by_path(" Students ").is_some());
        assert!(registry.get_by_path("student").is_none());
    }

    #[test]
    fn test_get_by_type() {
        let registry = registry_with(vec![("HomeViewModel", RouteDeclaration::new("home"))]);
        let route = registry.get_by_type(ViewType::new("HomeViewModel")).unwrap();
        assert_eq!(route.path(), "home");
        assert!(registry.get_by_type(ViewType::new("Missing")).is_none());
    }

    #[test]
    fn test_duplicate_path_rejected_and_original_kept() {
        let mut registry = RouteRegistry::new();
        registry
            .register(
                ViewType::new("HomeViewModel"),
                RouteDeclaration::new("home").order(1),
            )
            .unwrap();

        let err = registry
            .register(
                ViewType::new("DashboardViewModel"),
                RouteDeclaration::new("HOME").order(5),
            )
            .unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateRoute { .. }));
        assert_eq!(registry.len(), 1);
        let kept = registry.get_by_path("home").unwrap();
        assert_eq!(kept.view_type(), ViewType::new("HomeViewModel"));
        assert_eq!(kept.order(), 1);
        assert!(registry
            .get_by_type(ViewType::new("DashboardViewModel"))
            .is_none());
    }

    #[test]
    fn test_duplicate_view_type_rejected() {
        let mut builder = RegistryBuilder::new();
        builder
            .declare_raw(ViewType::new("HomeViewModel"), RouteDeclaration::new("home"))
            .declare_raw(ViewType::new("HomeViewModel"), RouteDeclaration::new("start"));

        assert_eq!(
            builder.build().unwrap_err(),
            RegistryError::DuplicateViewType {
                view_type: ViewType::new("HomeViewModel")
            }
        );
    }

    #[test]
    fn test_menu_sort_tie_breaks_on_display_name() {
        let registry = registry_with(vec![
            ("CViewModel", RouteDeclaration::new("c").order(5).display_name("Zeta")),
            ("AViewModel", RouteDeclaration::new("a").order(5).display_name("alpha")),
            ("BViewModel", RouteDeclaration::new("b").order(1).display_name("Omega")),
        ]);

        let paths: Vec<&str> = registry
            .get_menu_routes(&RoleSet::anonymous())
            .iter()
            .map(|r| r.path())
            .collect();
        assert_eq!(paths, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_hidden_routes_excluded_from_menu() {
        let registry = registry_with(vec![
            ("LoginViewModel", RouteDeclaration::new("login").hidden()),
            ("HomeViewModel", RouteDeclaration::new("home")),
        ]);

        let menu = registry.get_menu_routes(&RoleSet::anonymous());
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].path(), "home");
        assert!(registry.contains_path("login"));
    }

    #[test]
    fn test_child_group_and_tag_queries() {
        let registry = registry_with(vec![
            (
                "GradeBookViewModel",
                RouteDeclaration::new("grades").group("Academics").order(2),
            ),
            (
                "GradeReportViewModel",
                RouteDeclaration::new("grades/reports")
                    .group("Academics")
                    .parent("Grades")
                    .tag("reports")
                    .order(3),
            ),
            (
                "AuditLogViewModel",
                RouteDeclaration::new("audit")
                    .group("System")
                    .parent("grades")
                    .role("SystemAdmin")
                    .tag("Reports"),
            ),
        ]);
        let teacher = RoleSet::parse("Teacher");

        let children = registry.get_child_routes("GRADES", &teacher);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].path(), "grades/reports");

        let academics = registry.get_routes_by_group("academics", &teacher);
        assert_eq!(academics.len(), 2);

        let admin = RoleSet::parse("SystemAdmin");
        let reports = registry.get_routes_by_tags(&["REPORTS"], &admin);
        let paths: Vec<&str> = reports.iter().map(|r| r.path()).collect();
        assert_eq!(paths, vec!["audit", "grades/reports"]);
    }

    struct AcademicRoutes;

    impl RouteSource for AcademicRoutes {
        fn name(&self) -> &str {
            "academics"
        }

        fn declare(&self, builder: &mut RegistryBuilder, views: &mut ViewTable) {
            for (name, path) in [("CourseListViewModel", "courses"), ("GradeBookViewModel", "grades")] {
                let view_type = ViewType::new(name);
                builder.declare_raw(view_type, RouteDeclaration::new(path));
                views.register_with(view_type, move || Err(format!("{view_type} is a stub")));
            }
        }
    }

    struct DuplicateCourses;

    impl RouteSource for DuplicateCourses {
        fn name(&self) -> &str {
            "duplicates"
        }

        fn declare(&self, builder: &mut RegistryBuilder, _views: &mut ViewTable) {
            builder.declare_raw(
                ViewType::new("CourseCatalogViewModel"),
                RouteDeclaration::new("Courses"),
            );
        }
    }

    #[test]
    fn test_discover_over_sources() {
        let (registry, views) = RouteRegistry::discover(&[&AcademicRoutes]).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(views.len(), 2);
        assert!(views.contains(ViewType::new("GradeBookViewModel")));

        let err = RouteRegistry::discover(&[&AcademicRoutes, &DuplicateCourses]).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateRoute { ref path, .. } if path == "Courses"
        ));
    }
}
