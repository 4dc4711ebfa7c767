//! Route declarations and the immutable descriptors built from them

use std::collections::BTreeSet;
use std::fmt;

use super::roles::RoleSet;
use crate::core::error::RegistryError;

/// Stable identifier of a view-model type.
///
/// Used as the key of the view-model lookup table and of type-based
/// navigation. The name is also the source for derived display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewType(&'static str);

impl ViewType {
    /// Create a view type tag
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Type name (e.g. `StudentListViewModel`)
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A view-model type that declares itself navigable.
///
/// Each implementor declares exactly one route; its path is the stable
/// external identifier of the view.
pub trait Routable {
    /// Type tag registered with the route
    const VIEW_TYPE: ViewType;

    /// The route declaration for this type
    fn route() -> RouteDeclaration;
}

/// Route metadata as written by a view-model type.
///
/// Optional fields are filled in when the declaration is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDeclaration {
    path: String,
    display_name: Option<String>,
    icon_key: Option<String>,
    description: Option<String>,
    shortcut: Option<String>,
    order: i32,
    group: Option<String>,
    required_roles: BTreeSet<String>,
    show_in_menu: bool,
    parent_route: Option<String>,
    tags: BTreeSet<String>,
    is_beta: bool,
    requires_confirmation: bool,
}

impl RouteDeclaration {
    /// Start a declaration for `path` with every optional field at its default
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: None,
            icon_key: None,
            description: None,
            shortcut: None,
            order: 0,
            group: None,
            required_roles: BTreeSet::new(),
            show_in_menu: true,
            parent_route: None,
            tags: BTreeSet::new(),
            is_beta: false,
            requires_confirmation: false,
        }
    }

    /// Menu label; derived from the type name when omitted
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Icon resource key
    #[must_use]
    pub fn icon(mut self, key: impl Into<String>) -> Self {
        self.icon_key = Some(key.into());
        self
    }

    /// Tooltip / description text
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Keyboard shortcut label (e.g. `Ctrl+H`)
    #[must_use]
    pub fn shortcut(mut self, keys: impl Into<String>) -> Self {
        self.shortcut = Some(keys.into());
        self
    }

    /// Sort precedence, ascending
    #[must_use]
    pub const fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Menu section name
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Require `role` (any one of the required roles grants access)
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.required_roles.insert(role.into());
        self
    }

    /// Keep the route out of menus (still navigable by path)
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.show_in_menu = false;
        self
    }

    /// Parent route path for hierarchical menus
    #[must_use]
    pub fn parent(mut self, path: impl Into<String>) -> Self {
        self.parent_route = Some(path.into());
        self
    }

    /// Add a search / grouping tag
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Mark as beta
    #[must_use]
    pub const fn beta(mut self) -> Self {
        self.is_beta = true;
        self
    }

    /// Ask the presentation layer to confirm before opening
    #[must_use]
    pub const fn confirm(mut self) -> Self {
        self.requires_confirmation = true;
        self
    }
}

/// Immutable metadata for one navigable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    path: String,
    key: String,
    view_type: ViewType,
    display_name: String,
    icon_key: Option<String>,
    description: Option<String>,
    shortcut: Option<String>,
    order: i32,
    group: Option<String>,
    required_roles: BTreeSet<String>,
    show_in_menu: bool,
    parent_route: Option<String>,
    tags: BTreeSet<String>,
    is_beta: bool,
    requires_confirmation: bool,
}

impl RouteDescriptor {
    /// Validate a declaration and fill in derived fields
    ///
    /// # Errors
    /// Returns [`RegistryError::EmptyPath`] when the path is blank.
    pub fn from_declaration(
        view_type: ViewType,
        declaration: RouteDeclaration,
    ) -> Result<Self, RegistryError> {
        let path = declaration.path.trim().to_string();
        if path.is_empty() {
            return Err(RegistryError::EmptyPath { view_type });
        }

        let display_name = declaration
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| derive_display_name(view_type.name()));

        let group = declaration.group.filter(|g| !g.trim().is_empty());
        let parent_route = declaration
            .parent_route
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            key: route_key(&path),
            path,
            view_type,
            display_name,
            icon_key: declaration.icon_key,
            description: declaration.description,
            shortcut: declaration.shortcut,
            order: declaration.order,
            group,
            required_roles: declaration.required_roles,
            show_in_menu: declaration.show_in_menu,
            parent_route,
            tags: declaration.tags,
            is_beta: declaration.is_beta,
            requires_confirmation: declaration.requires_confirmation,
        })
    }

    /// Route path as declared
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Normalized lookup key (lowercase path)
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Target view-model type
    #[must_use]
    pub const fn view_type(&self) -> ViewType {
        self.view_type
    }

    /// Menu label
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Icon resource key
    #[must_use]
    pub fn icon_key(&self) -> Option<&str> {
        self.icon_key.as_deref()
    }

    /// Description text
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Keyboard shortcut label
    #[must_use]
    pub fn shortcut(&self) -> Option<&str> {
        self.shortcut.as_deref()
    }

    /// Sort precedence
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Menu section, `None` for the default section
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Roles granting access; empty for a public route
    #[must_use]
    pub const fn required_roles(&self) -> &BTreeSet<String> {
        &self.required_roles
    }

    /// Whether the route appears in menus
    #[must_use]
    pub const fn show_in_menu(&self) -> bool {
        self.show_in_menu
    }

    /// Parent route path
    #[must_use]
    pub fn parent_route(&self) -> Option<&str> {
        self.parent_route.as_deref()
    }

    /// Search / grouping tags
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Beta flag
    #[must_use]
    pub const fn is_beta(&self) -> bool {
        self.is_beta
    }

    /// Confirmation flag
    #[must_use]
    pub const fn requires_confirmation(&self) -> bool {
        self.requires_confirmation
    }

    /// Route has no role requirement
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.required_roles.is_empty()
    }

    /// Public, or the caller holds one of the required roles
    #[must_use]
    pub fn is_accessible_to(&self, roles: &RoleSet) -> bool {
        self.is_public() || roles.intersects(&self.required_roles)
    }

    /// Case-insensitive tag membership
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| names_match(t, tag))
    }
}

/// Normalize a path for case-insensitive comparison
#[must_use]
pub fn route_key(path: &str) -> String {
    path.trim().to_lowercase()
}

/// Compare group or tag names with the same folding as [`route_key`]
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    route_key(a) == route_key(b)
}

const TYPE_SUFFIXES: [&str; 3] = ["ViewModel", "Page", "View"];

/// Derive a menu label from a type name.
///
/// Strips one trailing `ViewModel`/`Page`/`View` suffix and splits camel case
/// into words: `StudentListViewModel` becomes `Student List`.
#[must_use]
pub fn derive_display_name(type_name: &str) -> String {
    let base = TYPE_SUFFIXES
        .iter()
        .find_map(|suffix| {
            type_name
                .strip_suffix(suffix)
                .filter(|rest| !rest.is_empty())
        })
        .unwrap_or(type_name);

    let chars: Vec<char> = base.chars().collect();
    let mut words = String::with_capacity(base.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(' ');
            }
        }
        words.push(ch);
    }
    words
}
