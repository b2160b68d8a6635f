//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::config::{ChatDefaults, ConfigFile, ConfigManager};
use crate::conversation::{DEFAULT_MAX_RETRIES, DEFAULT_TEMPERATURE, parse_temperature};
use crate::gemini::{DEFAULT_MODEL, SUPPORTED_MODELS};
use crate::ui::{Style, unless_cancelled};

/// Runs the configure command.
///
/// With `show`, prints the current defaults and exits. Otherwise prompts for
/// the default model, temperature and retry count and saves them.
pub fn run_configure(show: bool) -> Result<()> {
    if show {
        let manager = ConfigManager::new()?;
        let config = manager.load_or_default()?;
        print_current_defaults(&config, &manager);
        return Ok(());
    }

    unless_cancelled("Configuration unchanged.", run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config, &manager);

    let model = select_model(config.chat.model.as_deref())?;
    let temperature = input_temperature(config.chat.temperature)?;
    let max_retries = input_max_retries(config.chat.max_retries)?;

    config.chat = ChatDefaults {
        model: Some(model),
        temperature: Some(temperature),
        max_retries: Some(max_retries),
        endpoint: config.chat.endpoint.take(),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile, manager: &ConfigManager) {
    let not_set = || Style::secondary("(not set)");

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}        {}",
        Style::label("model"),
        config.chat.model.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("temperature"),
        config.chat.temperature.map_or_else(not_set, Style::temperature)
    );
    println!(
        "  {}  {}",
        Style::label("max_retries"),
        config.chat.max_retries.map_or_else(not_set, Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("endpoint"),
        config.chat.endpoint.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}         {}",
        Style::label("file"),
        Style::secondary(manager.config_path().display().to_string())
    );
    println!();
}

fn select_model(default: Option<&str>) -> Result<String> {
    let names: Vec<&str> = SUPPORTED_MODELS.iter().map(|(name, _)| *name).collect();
    let default_index = names
        .iter()
        .position(|name| *name == default.unwrap_or(DEFAULT_MODEL))
        .unwrap_or(0);

    let selection = Select::new("Default model:", names)
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection.to_string())
}

fn input_temperature(default: Option<f64>) -> Result<f64> {
    let default = default.unwrap_or(DEFAULT_TEMPERATURE);
    let input = Text::new("Default temperature:")
        .with_default(&default.to_string())
        .with_help_message("0 is focused and deterministic, 1 is more varied")
        .prompt()?;

    Ok(parse_temperature(&input, default)?)
}

fn input_max_retries(default: Option<u32>) -> Result<u32> {
    let default = default.unwrap_or(DEFAULT_MAX_RETRIES);
    let input = Text::new("Delivery attempts per message:")
        .with_default(&default.to_string())
        .prompt()?;

    match input.trim().parse::<u32>() {
        Ok(0) => bail!("Delivery attempts must be at least 1"),
        Ok(n) => Ok(n),
        Err(_) => bail!("'{}' is not a whole number", input.trim()),
    }
}
