//! Command-line interface entry point for `campusnav`

mod args;
mod commands;

use args::{Cli, Command};
use campus_nav::config::Config;
use campus_nav::core::catalog;
use campus_nav::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use campus_nav::{error, info, RouteRegistry, ViewTable};
use clap::Parser;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // --log-file wins, otherwise logging.file when set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Routes { group, tags, roles } => {
            let (registry, _) = discover_or_exit();
            let roles = commands::resolve_roles(&roles, &config);
            commands::routes::run(&registry, group.as_deref(), &tags, &roles);
        }
        Command::Menu {
            roles,
            format,
            output,
        } => {
            let (registry, _) = discover_or_exit();
            let roles = commands::resolve_roles(&roles, &config);
            commands::menu::run(&registry, &roles, format.into(), output.as_deref(), &config);
        }
        Command::Navigate { roles, steps } => {
            let (registry, views) = discover_or_exit();
            let roles = commands::resolve_roles(&roles, &config);
            commands::navigate::run(registry, views, &roles, &steps, &config, verbose);
        }
    }
}

/// Build the catalog routes; duplicate routes are a programming error and abort startup
fn discover_or_exit() -> (RouteRegistry, ViewTable) {
    match catalog::discover() {
        Ok(discovered) => discovered,
        Err(e) => {
            error!("Route registration failed: {e}");
            eprintln!("✗ Route registration failed: {e}");
            std::process::exit(1);
        }
    }
}
