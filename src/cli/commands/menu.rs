//! Menu command handler

use std::fs;
use std::path::{Path, PathBuf};

use campus_nav::config::Config;
use campus_nav::{info, MenuFormat, MenuProjector, RoleSet, RouteRegistry};

/// Render the menu for `roles` to stdout or a file
pub fn run(
    registry: &RouteRegistry,
    roles: &RoleSet,
    format: MenuFormat,
    output: Option<&Path>,
    config: &Config,
) {
    let projection = MenuProjector::new(registry)
        .with_default_group(default_group(config))
        .project_menu(roles);
    info!(
        "Projected {} menu item(s) in {} group(s) for {roles}",
        projection.item_count(),
        projection.groups.len()
    );

    let rendered = projection.render(format, roles);

    let Some(output) = output else {
        println!("{rendered}");
        return;
    };

    let path = resolve_output(output, format, config);
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("✗ Failed to create directory {}: {e}", parent.display());
            std::process::exit(1);
        }
    }
    match fs::write(&path, rendered) {
        Ok(()) => println!("✓ Menu written: {}", path.display()),
        Err(e) => {
            eprintln!("✗ Failed to write {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn default_group(config: &Config) -> &str {
    let group = config.navigation.default_group.trim();
    if group.is_empty() {
        campus_nav::core::menu::DEFAULT_GROUP
    } else {
        group
    }
}

/// Relative paths land under `paths.exports_dir`; a missing extension is
/// filled in from the format
fn resolve_output(output: &Path, format: MenuFormat, config: &Config) -> PathBuf {
    let mut path = if output.is_absolute() || config.paths.exports_dir.is_empty() {
        output.to_path_buf()
    } else {
        PathBuf::from(&config.paths.exports_dir).join(output)
    };
    if path.extension().is_none() {
        path.set_extension(format.extension());
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_output_goes_under_exports_dir() {
        let mut config = Config::from_defaults();
        config.paths.exports_dir = "/srv/exports".to_string();

        let path = resolve_output(Path::new("teacher"), MenuFormat::Markdown, &config);
        assert_eq!(path, PathBuf::from("/srv/exports/teacher.md"));

        let absolute = resolve_output(Path::new("/tmp/menu.txt"), MenuFormat::Markdown, &config);
        assert_eq!(absolute, PathBuf::from("/tmp/menu.txt"));
    }

    #[test]
    fn test_blank_default_group_falls_back() {
        let mut config = Config::from_defaults();
        config.navigation.default_group = "  ".to_string();
        assert_eq!(default_group(&config), "General");
    }
}
