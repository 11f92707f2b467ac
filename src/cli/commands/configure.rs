//! Configure command handler for editing default settings.

use anyhow::Result;
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};

use crate::config::{ConfigFile, ConfigManager};
use crate::credentials::DEFAULT_API_KEY_ENV;
use crate::translation::{AUTO_DETECT, DEFAULT_ENDPOINT, SUPPORTED_LANGUAGES};
use crate::ui::Style;

/// Runs the configure command.
///
/// With `show`, prints the current settings. Otherwise asks for the default
/// languages and the API key and saves them. Leaving a prompt with Escape or
/// Ctrl+C abandons the edit without saving and is not an error.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;

    if show {
        let config = manager.load_or_default()?;
        print_current_settings(&manager, &config);
        return Ok(());
    }

    match run_configure_inner(&manager) {
        Err(err) if is_prompt_cancelled(&err) => {
            println!();
            Ok(())
        }
        result => result,
    }
}

fn is_prompt_cancelled(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

fn run_configure_inner(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_or_default()?;

    print_current_settings(manager, &config);

    let from = select_language("Default source language:", config.ytr.from.as_deref(), true)?;
    let to = select_language("Default target language:", config.ytr.to.as_deref(), false)?;

    let api_key_env = Text::new("API key environment variable:")
        .with_default(config.api.api_key_env_name())
        .prompt()?;

    let api_key = Password::new("API key (leave empty to keep the current one):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message(&format!(
            "The ${} environment variable takes priority over this value",
            api_key_env.trim()
        ))
        .prompt()?;

    config.ytr.from = Some(from);
    config.ytr.to = Some(to);
    config.api.api_key_env = Some(api_key_env.trim().to_string())
        .filter(|name| !name.is_empty() && name != DEFAULT_API_KEY_ENV);
    if !api_key.trim().is_empty() {
        config.api.api_key = Some(api_key.trim().to_string());
    }

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_settings(manager: &ConfigManager, config: &ConfigFile) {
    let not_set = || Style::secondary("(not set)");
    let credentials = config.api.credentials();

    println!("{}", Style::header("Current settings"));
    println!(
        "  {}      {}",
        Style::label("from"),
        config.ytr.from.as_deref().map_or_else(
            || Style::secondary(format!("{AUTO_DETECT} (default)")),
            Style::value
        )
    );
    println!(
        "  {}        {}",
        Style::label("to"),
        config.ytr.to.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("endpoint"),
        Style::value(config.api.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))
    );
    println!(
        "  {}   {}",
        Style::label("api_key"),
        if credentials.is_set() {
            Style::value("(set)")
        } else {
            Style::warning(format!("(not set, export {})", config.api.api_key_env_name()))
        }
    );
    println!(
        "  {}      {}",
        Style::label("file"),
        Style::secondary(manager.config_path().display())
    );
    println!();
}

fn select_language(prompt: &str, default: Option<&str>, allow_auto: bool) -> Result<String> {
    let mut codes: Vec<&str> = Vec::with_capacity(SUPPORTED_LANGUAGES.len() + 1);
    let mut options: Vec<String> = Vec::with_capacity(SUPPORTED_LANGUAGES.len() + 1);

    if allow_auto {
        codes.push(AUTO_DETECT);
        options.push(format!("{AUTO_DETECT} - Detect source language"));
    }
    for (code, name) in SUPPORTED_LANGUAGES {
        codes.push(*code);
        options.push(format!("{code} - {name}"));
    }

    let default_index = default
        .and_then(|d| codes.iter().position(|code| *code == d))
        .unwrap_or(0);

    let selection = Select::new(prompt, options)
        .with_starting_cursor(default_index)
        .raw_prompt()?;

    Ok(codes[selection.index].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_and_ctrl_c_count_as_cancel() {
        assert!(is_prompt_cancelled(&InquireError::OperationCanceled.into()));
        assert!(is_prompt_cancelled(&InquireError::OperationInterrupted.into()));
    }

    #[test]
    fn test_other_errors_are_not_cancel() {
        assert!(!is_prompt_cancelled(&anyhow::anyhow!("config is read-only")));
        assert!(!is_prompt_cancelled(
            &InquireError::InvalidConfiguration("no options".to_string()).into()
        ));
    }
}
