//! Config command handler
//!
//! `home_route` is checked against the built-in catalog and `roles` is
//! stored in its normalized form, so a saved config always resolves when
//! the navigate and menu commands read it back.

use crate::args::ConfigSubcommand;
use campus_nav::config::Config;
use campus_nav::core::catalog;
use campus_nav::{warn, RoleSet, RouteRegistry};
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) {
    if let Some(k) = key {
        match config.get(&k) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{k}'"),
        }
        return;
    }

    println!("\n=== Configuration ===\n");
    print!("{config}");
    println!("\nSession roles: {}", config.session_roles());
    if let Ok((registry, _)) = catalog::discover() {
        if let Err(e) = normalize_home_route(&registry, &config.navigation.home_route) {
            println!("⚠ {e}");
        }
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) {
    let value = match normalize_value(key, value) {
        Ok(value) => value,
        Err(e) => {
            warn!("Rejected config value for '{key}': {e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.set(key, &value) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = config.save() {
        eprintln!("Failed to save config: {e}");
        std::process::exit(1);
    }

    println!("✓ Set {key} = {value}");
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) {
    if let Err(e) = config.unset(key, defaults) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = config.save() {
        eprintln!("Failed to save config: {e}");
        std::process::exit(1);
    }

    println!(
        "✓ Reset {key} to default ({})",
        config.get(key).unwrap_or_default()
    );
}

/// Handle the config reset subcommand
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Reset navigation settings and session roles to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if is_confirmation(&response) {
        if let Err(e) = Config::reset() {
            eprintln!("Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}

/// Value to store for `key`, checked against the catalog where it names routes or roles
fn normalize_value(key: &str, value: &str) -> Result<String, String> {
    match key {
        "home_route" | "home-route" => {
            let (registry, _) = catalog::discover().map_err(|e| e.to_string())?;
            normalize_home_route(&registry, value)
        }
        "roles" => normalize_roles(value),
        _ => Ok(value.to_string()),
    }
}

/// The registered path for `value`, in the casing it was declared with
fn normalize_home_route(registry: &RouteRegistry, value: &str) -> Result<String, String> {
    let path = value.trim();
    if path.is_empty() {
        return Err("'home_route' cannot be empty".to_string());
    }
    registry
        .get_by_path(path)
        .map(|route| route.path().to_string())
        .ok_or_else(|| format!("home_route '{path}' is not a registered route"))
}

/// Comma-separated role list; blank means an anonymous session
fn normalize_roles(value: &str) -> Result<String, String> {
    let roles = RoleSet::parse(value);
    if roles.is_empty() {
        if value.trim().is_empty() {
            return Ok(String::new());
        }
        return Err(format!("'{value}' does not name any role"));
    }
    Ok(roles.to_string().replace(", ", ","))
}

fn is_confirmation(response: &str) -> bool {
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}
