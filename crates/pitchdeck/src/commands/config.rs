use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let defaults = config.defaults.clone().unwrap_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    println!("{}", "defaults".bold());
    print_value("theme", defaults.theme.as_deref(), "dark");
    print_value("transition", defaults.transition.as_deref(), "fade");
    let preview = defaults.max_preview_slides.map(|n| n.to_string());
    print_value("max_preview_slides", preview.as_deref(), "3");
    print_value("start_mode", defaults.start_mode.as_deref(), "first");

    println!("{}", "access".bold());
    let passphrase = match config.access.as_ref().and_then(|a| a.passphrase.as_ref()) {
        Some(_) => "********".green().to_string(),
        None if config.resolve_passphrase().is_some() => {
            "******** (from PITCHDECK_PASSPHRASE)".green().to_string()
        }
        None => "not set (sign-in disabled)".dimmed().to_string(),
    };
    println!("  {:<20} {passphrase}", "passphrase");
    let fullscreen = config.allow_fullscreen().to_string();
    print_value(
        "allow_fullscreen",
        config
            .access
            .as_ref()
            .and_then(|a| a.allow_fullscreen)
            .map(|_| fullscreen.as_str()),
        "true",
    );
    Ok(())
}

fn print_value(key: &str, value: Option<&str>, default: &str) {
    match value {
        Some(v) => println!("  {key:<20} {}", v.green()),
        None => println!("  {key:<20} {}", format!("{default} (default)").dimmed()),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    let shown = if key == "access.passphrase" { "********" } else { value };
    println!("{} {key} = {}", "Set".green().bold(), shown);
    println!("{} {}", "Saved to".dimmed(), path.display());
    Ok(())
}
