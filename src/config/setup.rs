//! Interactive setup wizard for first-time configuration
//!
//! Prompts for the image API endpoint and key when scatch is run for the
//! first time.

use super::ScatchConfig;
use config::ConfigError;
use dialoguer::{Input, Password, theme::ColorfulTheme};

/// Interactive first-time setup
///
/// 1. Prompts for the API endpoint (default: the public Pexels API)
/// 2. Prompts for the API key (hidden input, may be left empty)
/// 3. Saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup() -> Result<ScatchConfig, ConfigError> {
    println!("Welcome to scatch! Let's connect to an image API.\n");

    let mut config = ScatchConfig::default();

    config.api_endpoint = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("API endpoint")
        .default(config.api_endpoint.clone())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    config.api_key = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("API key (leave empty to set later)")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    config.save()?;

    println!("\nConfiguration saved to {}", ScatchConfig::config_path()?.display());
    if !config.has_api_key() {
        println!("Set a key later with: scatch config set api_key <KEY>");
    }
    Ok(config)
}
