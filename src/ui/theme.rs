//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. Colors are
//! dropped when `NO_COLOR` is set.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styles for different semantic elements.
pub struct Style;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint<T: Display>(text: T, styled: impl FnOnce(&T) -> String) -> String {
    if colors_enabled() {
        styled(&text)
    } else {
        text.to_string()
    }
}

impl Style {
    /// Style for section headers (e.g., "Current settings")
    pub fn header<T: Display>(text: T) -> String {
        paint(text, |t| t.bold().to_string())
    }

    /// Style for labels/keys (e.g., "endpoint", "api_key")
    pub fn label<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }

    /// Style for primary values
    pub fn value<T: Display>(text: T) -> String {
        paint(text, |t| t.cyan().to_string())
    }

    /// Style for secondary/supplementary info (e.g., paths, language names)
    pub fn secondary<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }

    pub fn success<T: Display>(text: T) -> String {
        paint(text, |t| t.green().to_string())
    }

    pub fn error<T: Display>(text: T) -> String {
        paint(text, |t| t.red().bold().to_string())
    }

    pub fn warning<T: Display>(text: T) -> String {
        paint(text, |t| t.yellow().to_string())
    }

    /// Style for language codes
    pub fn code<T: Display>(text: T) -> String {
        paint(text, |t| t.yellow().to_string())
    }
}
