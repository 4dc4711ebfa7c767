//! Text and Markdown rendering of a menu projection
//!
//! Uses embedded templates with `{{placeholder}}` substitution.

use std::fmt::{self, Write};
use std::str::FromStr;

use super::{MenuGroup, MenuItem, MenuProjection};
use crate::core::routing::RoleSet;

/// Embedded plain-text menu template
const TEXT_TEMPLATE: &str = include_str!("templates/menu.txt");

/// Embedded Markdown menu template
const MARKDOWN_TEMPLATE: &str = include_str!("templates/menu.md");

/// Supported menu output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuFormat {
    /// Indented plain text for terminals
    #[default]
    Text,
    /// Markdown with one section per group
    Markdown,
}

impl MenuFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }
}

impl FromStr for MenuFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown menu format: {s}")),
        }
    }
}

impl fmt::Display for MenuFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl MenuProjection {
    /// Render for display or export
    #[must_use]
    pub fn render(&self, format: MenuFormat, roles: &RoleSet) -> String {
        let (template, groups) = match format {
            MenuFormat::Text => (TEXT_TEMPLATE, self.text_groups()),
            MenuFormat::Markdown => (MARKDOWN_TEMPLATE, self.markdown_groups()),
        };

        let mut output = template.to_string();
        output = output.replace("{{roles}}", &roles.to_string());
        output = output.replace("{{item_count}}", &self.item_count().to_string());
        output = output.replace("{{group_count}}", &self.groups.len().to_string());
        output = output.replace("{{groups}}", groups.trim_end());
        output
    }

    fn text_groups(&self) -> String {
        let mut out = String::new();
        for group in &self.groups {
            let _ = writeln!(out, "\n{}", group.name);
            for item in &group.items {
                let _ = writeln!(out, "  {}", text_line(item));
            }
        }
        out
    }

    fn markdown_groups(&self) -> String {
        let mut out = String::new();
        for MenuGroup { name, items } in &self.groups {
            let _ = writeln!(out, "## {name}\n");
            out.push_str("| Item | Path | Shortcut | Notes |\n");
            out.push_str("|------|------|----------|-------|\n");
            for item in items {
                let _ = writeln!(
                    out,
                    "| {} | `{}` | {} | {} |",
                    item.display_name,
                    item.path,
                    item.shortcut.as_deref().unwrap_or("-"),
                    badges(item).join(", ")
                );
            }
            out.push('\n');
        }
        out
    }
}

fn text_line(item: &MenuItem) -> String {
    let mut line = format!("{:<28} /{}", item.display_name, item.path);
    if let Some(shortcut) = &item.shortcut {
        let _ = write!(line, "  [{shortcut}]");
    }
    let badges = badges(item);
    if !badges.is_empty() {
        let _ = write!(line, "  ({})", badges.join(", "));
    }
    line
}

fn badges(item: &MenuItem) -> Vec<&'static str> {
    let mut badges = Vec::new();
    if item.is_beta {
        badges.push("beta");
    }
    if item.requires_confirmation {
        badges.push("confirm");
    }
    if item.has_children {
        badges.push("submenu");
    }
    badges
}
