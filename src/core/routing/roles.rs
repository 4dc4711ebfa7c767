//! Role sets supplied by the caller for menu filtering

use std::collections::BTreeSet;
use std::fmt;

/// The active user's roles, compared case-insensitively.
///
/// An empty set is the anonymous caller: only public routes are visible to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeSet<String>,
}

impl RoleSet {
    /// The anonymous (logged-out) role set
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            roles: BTreeSet::new(),
        }
    }

    /// Parse a comma-separated role list (e.g. `"Student, Teacher"`)
    ///
    /// Blank entries are skipped.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        list.split(',').collect()
    }

    /// Add a role; blank names are ignored
    pub fn insert(&mut self, role: &str) {
        let role = role.trim();
        if !role.is_empty() {
            self.roles.insert(role.to_lowercase());
        }
    }

    /// Whether the caller holds `role`
    #[must_use]
    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains(&role.trim().to_lowercase())
    }

    /// Whether the caller holds at least one of `required`
    #[must_use]
    pub fn intersects<'a, I>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        required.into_iter().any(|role| self.contains(role))
    }

    /// Check if no roles are held
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.roles.is_empty()
    }

    /// Number of distinct roles
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::anonymous();
        for role in iter {
            set.insert(role.as_ref());
        }
        set
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.roles.is_empty() {
            return write!(f, "anonymous");
        }
        let joined: Vec<&str> = self.roles.iter().map(String::as_str).collect();
        write!(f, "{}", joined.join(", "))
    }
}
