//! CLI command handlers for `campusnav`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod menu;
pub mod navigate;
pub mod routes;

use campus_nav::config::Config;
use campus_nav::RoleSet;

/// Roles from `--role` flags, or `session.roles` from config when none were given
pub fn resolve_roles(flags: &[String], config: &Config) -> RoleSet {
    if flags.is_empty() {
        config.session_roles()
    } else {
        flags.iter().flat_map(|flag| flag.split(',')).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_win_over_session() {
        let mut config = Config::from_defaults();
        config.session.roles = "Student".to_string();

        let roles = resolve_roles(&["Teacher,Librarian".to_string()], &config);
        assert!(roles.contains("teacher"));
        assert!(roles.contains("librarian"));
        assert!(!roles.contains("student"));

        let fallback = resolve_roles(&[], &config);
        assert!(fallback.contains("Student"));
    }
}
