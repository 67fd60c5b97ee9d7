//! Config command - read and write settings

use crate::{
    ScatchError,
    cli::ConfigCommands,
    config::{KEYS, ScatchConfig},
    output,
};

type Result<T> = std::result::Result<T, ScatchError>;

/// Execute the config command
///
/// # Errors
/// Returns an error for unknown keys, unparsable values, or a failed save.
pub fn execute(mut config: ScatchConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Get { key: Some(key) } => {
            let value = config
                .get(key)
                .ok_or_else(|| ScatchError::InvalidInput(format!("Unknown config key '{key}'")))?;
            println!("{value}");
        }
        ConfigCommands::Get { key: None } => {
            for key in KEYS {
                if let Some(value) = config.get(key) {
                    println!("{key} = {value}");
                }
            }
        }
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting)?;
            config.set(key, value)?;
            config.save()?;
            if !quiet {
                let shown = config.get(key).unwrap_or_default();
                println!("{}", output::success(&format!("{key} = {shown}")));
            }
        }
        ConfigCommands::Path => {
            println!("{}", ScatchConfig::config_path()?.display());
        }
    }
    Ok(())
}

/// Split `KEY=VALUE`
///
/// # Errors
/// Returns `ScatchError::InvalidInput` if there is no `=` or the key is empty.
pub fn parse_setting(setting: &str) -> Result<(&str, &str)> {
    match setting.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ScatchError::InvalidInput(format!(
            "Expected KEY=VALUE, got '{setting}'"
        ))),
    }
}
