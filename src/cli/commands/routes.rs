//! Routes command handler

use campus_nav::{RoleSet, RouteDescriptor, RouteRegistry};

/// List registry entries, optionally narrowed to a group and/or tags
pub fn run(registry: &RouteRegistry, group: Option<&str>, tags: &[String], roles: &RoleSet) {
    let routes = select(registry, group, tags, roles);

    if routes.is_empty() {
        println!("No routes match for {roles}");
        return;
    }

    println!("\n=== Routes ({}) ===\n", routes.len());
    println!("{:<18} {:<22} {:<11} {:>5}  ROLES", "PATH", "NAME", "GROUP", "ORDER");
    for route in routes {
        println!("{}", describe(route, roles));
    }
}

/// Without filters every route is listed; filters imply menu visibility
fn select<'r>(
    registry: &'r RouteRegistry,
    group: Option<&str>,
    tags: &[String],
    roles: &RoleSet,
) -> Vec<&'r RouteDescriptor> {
    match (group, tags.is_empty()) {
        (None, true) => registry.routes().iter().collect(),
        (None, false) => registry.get_routes_by_tags(tags, roles),
        (Some(group), true) => registry.get_routes_by_group(group, roles),
        (Some(group), false) => registry
            .get_routes_by_group(group, roles)
            .into_iter()
            .filter(|route| tags.iter().any(|tag| route.has_tag(tag)))
            .collect(),
    }
}

fn describe(route: &RouteDescriptor, roles: &RoleSet) -> String {
    let required = if route.is_public() {
        "-".to_string()
    } else {
        route
            .required_roles()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    };

    let mut flags = Vec::new();
    if !route.show_in_menu() {
        flags.push("hidden");
    }
    if !route.is_accessible_to(roles) {
        flags.push("denied");
    }
    if route.is_beta() {
        flags.push("beta");
    }

    let mut line = format!(
        "{:<18} {:<22} {:<11} {:>5}  {required}",
        route.path(),
        route.display_name(),
        route.group().unwrap_or("-"),
        route.order()
    );
    if !flags.is_empty() {
        line.push_str(&format!("  [{}]", flags.join(", ")));
    }
    line
}
