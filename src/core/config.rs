//! Configuration module for `campus_nav`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::routing::RoleSet;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in string values
const DIR_VARIABLE: &str = "$CAMPUS_NAV";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Navigation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Route opened at startup and by "home"
    #[serde(default)]
    pub home_route: String,
    /// Menu section for routes that declare no group
    #[serde(default)]
    pub default_group: String,
}

/// Session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Comma-separated roles used when none are given on the command line
    #[serde(default)]
    pub roles: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for exported menus
    #[serde(default)]
    pub exports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Navigation settings
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// Session settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override home route
    pub home_route: Option<String>,
    /// Override default menu group
    pub default_group: Option<String>,
    /// Override session roles
    pub roles: Option<String>,
    /// Override exports directory
    pub exports_dir: Option<String>,
}

impl Config {
    /// Get the `$CAMPUS_NAV` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/campusnav`
    /// - macOS: `~/Library/Application Support/campusnav`
    /// - Windows: `%APPDATA%\campusnav`
    #[must_use]
    pub fn get_campusnav_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("campusnav")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` change, so
    /// upgrading adds new settings without touching customized ones.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        let pairs = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.navigation.home_route, &defaults.navigation.home_route),
            (
                &mut self.navigation.default_group,
                &defaults.navigation.default_group,
            ),
            (&mut self.paths.exports_dir, &defaults.paths.exports_dir),
        ];
        for (value, default) in pairs {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; they are not saved. Only non-`None`
    /// values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(home_route) = &overrides.home_route {
            self.navigation.home_route.clone_from(home_route);
        }
        if let Some(default_group) = &overrides.default_group {
            self.navigation.default_group.clone_from(default_group);
        }

        if let Some(roles) = &overrides.roles {
            self.session.roles.clone_from(roles);
        }

        if let Some(exports_dir) = &overrides.exports_dir {
            self.paths.exports_dir.clone_from(exports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, in
    /// the directory returned by [`get_campusnav_dir`](Self::get_campusnav_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_campusnav_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CAMPUS_NAV` to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_campusnav_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$CAMPUS_NAV` is expanded in
    /// path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.exports_dir = Self::expand_variables(&config.paths.exports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the compiled-in default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - File exists: load it, merge newly added default fields, re-save if changed
    /// - First run: create the directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Roles from `session.roles`
    #[must_use]
    pub fn session_roles(&self) -> RoleSet {
        RoleSet::parse(&self.session.roles)
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `home_route`,
    /// `default_group`, `roles`, `exports_dir` (dashes accepted for
    /// underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "home_route" | "home-route" => Some(self.navigation.home_route.clone()),
            "default_group" | "default-group" => Some(self.navigation.default_group.clone()),
            "roles" => Some(self.session.roles.clone()),
            "exports_dir" | "exports-dir" => Some(self.paths.exports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value is invalid
    /// (an unknown log level, a non-boolean `verbose`, a blank `home_route`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value
                    .parse::<crate::logger::Level>()
                    .map_err(|e| format!("Invalid value for 'level': {e}"))?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "home_route" | "home-route" => {
                if value.trim().is_empty() {
                    return Err("'home_route' cannot be empty".to_string());
                }
                self.navigation.home_route = value.trim().to_string();
            }
            "default_group" | "default-group" => {
                self.navigation.default_group = value.to_string();
            }
            "roles" => self.session.roles = value.to_string(),
            "exports_dir" | "exports-dir" => self.paths.exports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "home_route" | "home-route" => self
                .navigation
                .home_route
                .clone_from(&defaults.navigation.home_route),
            "default_group" | "default-group" => self
                .navigation
                .default_group
                .clone_from(&defaults.navigation.default_group),
            "roles" => self.session.roles.clone_from(&defaults.session.roles),
            "exports_dir" | "exports-dir" => self
                .paths
                .exports_dir
                .clone_from(&defaults.paths.exports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the config file so the next [`load()`](Config::load) recreates it
    ///
    /// Succeeds without doing anything if no file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[navigation]")?;
        writeln!(f, "  home_route = \"{}\"", self.navigation.home_route)?;
        writeln!(f, "  default_group = \"{}\"", self.navigation.default_group)?;

        writeln!(f, "\n[session]")?;
        writeln!(f, "  roles = \"{}\"", self.session.roles)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  exports_dir = \"{}\"", self.paths.exports_dir)?;

        Ok(())
    }
}
