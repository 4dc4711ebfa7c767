//! Core navigation engine shared by the library and the CLI

pub mod catalog;
pub mod config;
pub mod error;
pub mod menu;
pub mod navigation;
pub mod routing;

/// Returns the current version of the `campus_nav` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
