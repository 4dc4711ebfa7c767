//! Menu projection
//!
//! Derives role-filtered, grouped and ordered menu structures from the route
//! registry. The projector holds no role state: every projection is a pure
//! function of the registry and the role set passed in, so callers simply
//! project again after login or logout.

pub mod render;

pub use render::MenuFormat;

use crate::core::navigation::NavigationCommand;
use crate::core::routing::{names_match, RoleSet, RouteDescriptor, RouteRegistry};

/// Section name for routes that declare no group
pub const DEFAULT_GROUP: &str = "General";

/// One clickable menu entry
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Route path
    pub path: String,
    /// Label
    pub display_name: String,
    /// Icon resource key
    pub icon_key: Option<String>,
    /// Tooltip text
    pub description: Option<String>,
    /// Keyboard shortcut label
    pub shortcut: Option<String>,
    /// Sort precedence
    pub order: i32,
    /// Beta badge
    pub is_beta: bool,
    /// Presentation should confirm before navigating
    pub requires_confirmation: bool,
    /// At least one visible child route exists
    pub has_children: bool,
    /// Bound navigation action
    pub command: NavigationCommand,
}

impl MenuItem {
    fn from_route(route: &RouteDescriptor, has_children: bool) -> Self {
        Self {
            path: route.path().to_string(),
            display_name: route.display_name().to_string(),
            icon_key: route.icon_key().map(str::to_string),
            description: route.description().map(str::to_string),
            shortcut: route.shortcut().map(str::to_string),
            order: route.order(),
            is_beta: route.is_beta(),
            requires_confirmation: route.requires_confirmation(),
            has_children,
            command: NavigationCommand::to_path(route.path()),
        }
    }
}

/// A named menu section
#[derive(Debug, Clone)]
pub struct MenuGroup {
    /// Section name
    pub name: String,
    /// Items ordered by `(order, display name)`
    pub items: Vec<MenuItem>,
}

impl MenuGroup {
    /// Smallest `order` among the items
    #[must_use]
    pub fn min_order(&self) -> i32 {
        self.items.iter().map(|item| item.order).min().unwrap_or(i32::MAX)
    }
}

/// The full menu for one role set
#[derive(Debug, Clone, Default)]
pub struct MenuProjection {
    /// Groups ordered by their smallest item order
    pub groups: Vec<MenuGroup>,
}

impl MenuProjection {
    /// Total number of items across groups
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    /// Check if no items are visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.items.is_empty())
    }

    /// Find a group by name (case-insensitive)
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&MenuGroup> {
        self.groups
            .iter()
            .find(|group| names_match(&group.name, name))
    }

    /// All item paths in display order
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter().map(|item| item.path.as_str()))
            .collect()
    }
}

/// Builds menus from a registry without mutating it
#[derive(Debug, Clone, Copy)]
pub struct MenuProjector<'r> {
    registry: &'r RouteRegistry,
    default_group: &'r str,
}

impl<'r> MenuProjector<'r> {
    /// Projector using [`DEFAULT_GROUP`] for ungrouped routes
    #[must_use]
    pub const fn new(registry: &'r RouteRegistry) -> Self {
        Self {
            registry,
            default_group: DEFAULT_GROUP,
        }
    }

    /// Use a different section name for ungrouped routes
    #[must_use]
    pub const fn with_default_group(mut self, name: &'r str) -> Self {
        self.default_group = name;
        self
    }

    /// Group the menu routes visible to `roles`
    ///
    /// Groups are ordered by the minimum `order` of their members, ties broken
    /// by group name; members keep the registry's `(order, display name)` order.
    #[must_use]
    pub fn project_menu(&self, roles: &RoleSet) -> MenuProjection {
        let mut groups: Vec<MenuGroup> = Vec::new();

        for route in self.registry.get_menu_routes(roles) {
            let name = route.group().unwrap_or(self.default_group);
            let item = MenuItem::from_route(route, self.has_children(route, roles));
            match groups.iter_mut().find(|group| names_match(&group.name, name)) {
                Some(group) => group.items.push(item),
                None => groups.push(MenuGroup {
                    name: name.to_string(),
                    items: vec![item],
                }),
            }
        }

        groups.sort_by(|a, b| {
            a.min_order()
                .cmp(&b.min_order())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        MenuProjection { groups }
    }

    /// Submenu items under `parent_path`
    #[must_use]
    pub fn children(&self, parent_path: &str, roles: &RoleSet) -> Vec<MenuItem> {
        self.registry
            .get_child_routes(parent_path, roles)
            .into_iter()
            .map(|route| MenuItem::from_route(route, self.has_children(route, roles)))
            .collect()
    }

    fn has_children(&self, route: &RouteDescriptor, roles: &RoleSet) -> bool {
        !self
            .registry
            .get_child_routes(route.path(), roles)
            .is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routing::{RegistryBuilder, RouteDeclaration, ViewType};

    fn registry() -> RouteRegistry {
        let mut builder = RegistryBuilder::new();
        builder
            .declare_raw(
                ViewType::new("ProfileViewModel"),
                RouteDeclaration::new("profile").order(10).group("System"),
            )
            .declare_raw(
                ViewType::new("HomeViewModel"),
                RouteDeclaration::new("home").order(1).group("Main"),
            )
            .declare_raw(
                ViewType::new("LibraryViewModel"),
                RouteDeclaration::new("library").order(5),
            )
            .declare_raw(
                ViewType::new("SettingsViewModel"),
                RouteDeclaration::new("settings").order(0).group("system"),
            )
            .declare_raw(
                ViewType::new("UserAdminViewModel"),
                RouteDeclaration::new("admin")
                    .order(20)
                    .group("System")
                    .role("SystemAdmin"),
            )
            .declare_raw(
                ViewType::new("AuditLogViewModel"),
                RouteDeclaration::new("admin/audit")
                    .order(21)
                    .group("System")
                    .parent("admin")
                    .role("SystemAdmin"),
            );
        builder.build().unwrap()
    }

    #[test]
    fn test_groups_ordered_by_min_member_order() {
        let registry = registry();
        let menu = MenuProjector::new(&registry).project_menu(&RoleSet::anonymous());

        let names: Vec<&str> = menu.groups.iter().map(|g| g.name.as_str()).collect();
        // "system" group wins with settings at order 0
        assert_eq!(names, vec!["system", "Main", "General"]);
        assert_eq!(menu.paths(), vec!["settings", "profile", "home", "library"]);
    }

    #[test]
    fn test_default_group_override() {
        let registry = registry();
        let menu = MenuProjector::new(&registry)
            .with_default_group("Other")
            .project_menu(&RoleSet::anonymous());
        assert!(menu.group("other").is_some());
        assert!(menu.group("General").is_none());
    }

    #[test]
    fn test_projection_follows_roles() {
        let registry = registry();
        let projector = MenuProjector::new(&registry);

        let anonymous = projector.project_menu(&RoleSet::anonymous());
        assert!(!anonymous.paths().contains(&"admin"));

        let admin = projector.project_menu(&RoleSet::parse("SystemAdmin"));
        let system = admin.group("System").unwrap();
        let admin_item = system.items.iter().find(|i| i.path == "admin").unwrap();
        assert!(admin_item.has_children);
        assert_eq!(admin.item_count(), anonymous.item_count() + 2);
    }

    #[test]
    fn test_children() {
        let registry = registry();
        let projector = MenuProjector::new(&registry);

        assert!(projector
            .children("admin", &RoleSet::parse("Student"))
            .is_empty());
        let children = projector.children("ADMIN", &RoleSet::parse("SystemAdmin"));
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].path, "admin/audit");
        assert!(!children[0].has_children);
    }
}
