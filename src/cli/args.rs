//! CLI argument definitions for `campusnav`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use campus_nav::config::ConfigOverrides;
use campus_nav::logger::Level;
use campus_nav::MenuFormat;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to
/// `campus_nav::logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// CLI menu format argument
#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum MenuFormatArg {
    /// Plain text
    #[default]
    Text,
    /// Markdown tables
    #[value(alias = "md")]
    Markdown,
}

impl From<MenuFormatArg> for MenuFormat {
    fn from(arg: MenuFormatArg) -> Self {
        match arg {
            MenuFormatArg::Text => Self::Text,
            MenuFormatArg::Markdown => Self::Markdown,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `home_route`, `roles`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List registered routes.
    ///
    /// Without filters every route is listed, hidden ones included. With
    /// `--group` or `--tag` only menu routes visible to the roles are shown.
    Routes {
        /// Only routes in this menu group
        #[arg(long, value_name = "GROUP")]
        group: Option<String>,

        /// Only routes carrying any of these tags
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Roles of the current user (defaults to `session.roles`)
        #[arg(long = "role", value_name = "ROLE")]
        roles: Vec<String>,
    },
    /// Render the menu visible to a role set.
    Menu {
        /// Roles of the current user (defaults to `session.roles`)
        #[arg(long = "role", value_name = "ROLE")]
        roles: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = MenuFormatArg::Text)]
        format: MenuFormatArg,

        /// Write to a file instead of stdout (relative paths go under `paths.exports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Replay a sequence of navigation steps.
    ///
    /// A step is a route path, `back`, `reset` (back to the home route), or
    /// `reset:PATH`.
    Navigate {
        /// Roles of the current user (defaults to `session.roles`)
        #[arg(long = "role", value_name = "ROLE")]
        roles: Vec<String>,

        /// Steps to run in order
        #[arg(value_name = "STEPS", num_args = 1..)]
        steps: Vec<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "campusnav",
    about = "Campus navigation engine command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the home route
    #[arg(long = "home-route", value_name = "PATH")]
    pub home_route: Option<String>,

    /// Override the menu group used for ungrouped routes
    #[arg(long = "default-group", value_name = "NAME")]
    pub default_group: Option<String>,

    /// Override session roles (comma separated)
    #[arg(long = "session-roles", value_name = "ROLES")]
    pub session_roles: Option<String>,

    /// Override config exports directory
    #[arg(long = "config-exports-dir", value_name = "DIR")]
    pub config_exports_dir: Option<PathBuf>,

    /// Override config exports directory (short form)
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--exports-dir` takes precedence over `--config-exports-dir` when both
    /// are given. `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            home_route: self.home_route.clone(),
            default_group: self.default_group.clone(),
            roles: self.session_roles.clone(),
            exports_dir: self
                .exports_dir
                .as_ref()
                .or(self.config_exports_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            home_route: None,
            default_group: None,
            session_roles: None,
            config_exports_dir: None,
            exports_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.home_route.is_none());
        assert!(overrides.roles.is_none());
        assert!(overrides.exports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_level = Some(LogLevelArg::Debug);
        args.config_log_file = Some(PathBuf::from("/tmp/nav.log"));
        args.config_verbose = Some(true);
        args.home_route = Some("dashboard".to_string());
        args.session_roles = Some("Teacher".to_string());

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.level.as_deref(), Some("debug"));
        assert_eq!(overrides.file.as_deref(), Some("/tmp/nav.log"));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.home_route.as_deref(), Some("dashboard"));
        assert_eq!(overrides.roles.as_deref(), Some("Teacher"));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_exports_dir = Some(PathBuf::from("/long/out"));
        args.exports_dir = Some(PathBuf::from("/short/out"));
        assert_eq!(
            args.to_config_overrides().exports_dir.as_deref(),
            Some("/short/out")
        );

        args.exports_dir = None;
        assert_eq!(
            args.to_config_overrides().exports_dir.as_deref(),
            Some("/long/out")
        );
    }

    #[test]
    fn test_parse_navigate_steps() {
        let args = Cli::parse_from([
            "campusnav",
            "navigate",
            "--role",
            "Teacher",
            "home",
            "students",
            "back",
        ]);
        match args.command {
            Command::Navigate { roles, steps } => {
                assert_eq!(roles, vec!["Teacher"]);
                assert_eq!(steps, vec!["home", "students", "back"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_menu_format_alias() {
        let args = Cli::parse_from(["campusnav", "menu", "--format", "md"]);
        match args.command {
            Command::Menu { format, .. } => assert_eq!(format, MenuFormatArg::Markdown),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
