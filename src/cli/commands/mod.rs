//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Translation command handler.
pub mod translate;
