use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use weather_core::{LookupError, Settings, fetch_current_weather};

const UNIT_CHOICES: &[&str] = &["metric", "imperial", "standard"];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Read settings from this file instead of the platform config directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store API key, endpoint and units in the config file.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London" or "Rio de Janeiro".
        city: String,
    },
}

/// Process exit codes for `weather show`. Configuration errors end the
/// process through `main` returning `Err`, which exits with 1.
pub mod exit {
    pub const OK: u8 = 0;
    pub const INVALID_INPUT: u8 = 2;
    pub const REMOTE: u8 = 3;
    pub const PARSE: u8 = 4;
    pub const TRANSPORT: u8 = 5;
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure(self.config)?;
                Ok(ExitCode::from(exit::OK))
            }
            Command::Show { city } => {
                let settings = load_settings(self.config.as_deref())?;
                Ok(ExitCode::from(show(&city, &settings).await))
            }
        }
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

async fn show(city: &str, settings: &Settings) -> u8 {
    if let Err(msg) = validate_city(city) {
        eprintln!("Invalid city: {msg}");
        return exit::INVALID_INPUT;
    }

    match fetch_current_weather(city, settings).await {
        Ok(summary) => {
            println!("{summary}");
            exit::OK
        }
        Err(err) => {
            tracing::error!(error = %err, "weather lookup failed");
            eprintln!("Error: {err}");
            exit_code(&err)
        }
    }
}

/// Shell-side rule: letters (any script), spaces and hyphens only.
pub fn validate_city(city: &str) -> Result<(), String> {
    if city.trim().is_empty() {
        return Err("city name must not be empty".to_string());
    }

    if let Some(bad) = city.chars().find(|c| !(c.is_alphabetic() || *c == ' ' || *c == '-')) {
        return Err(format!(
            "unexpected character {bad:?}; only letters, spaces and hyphens are allowed"
        ));
    }

    Ok(())
}

pub fn exit_code(err: &LookupError) -> u8 {
    match err {
        LookupError::InvalidInput => exit::INVALID_INPUT,
        LookupError::Remote { .. } => exit::REMOTE,
        LookupError::Parse(_) => exit::PARSE,
        LookupError::Transport(_) => exit::TRANSPORT,
    }
}

fn configure(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p,
        None => Settings::config_file_path()?,
    };
    let current = stored_settings(&path);

    let api_key = Password::new("OpenWeather API key (blank keeps the current one):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("API base URL:")
        .with_default(&current.base_url)
        .prompt()
        .context("Failed to read base URL")?;

    let start = UNIT_CHOICES
        .iter()
        .position(|u| u.eq_ignore_ascii_case(&current.units))
        .unwrap_or(0);
    let units = Select::new("Units:", UNIT_CHOICES.to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read units")?;

    let settings = apply_answers(current, &api_key, &base_url, units);
    settings.validate()?;

    settings.save_to(&path)?;
    println!("Saved settings to {}", path.display());

    Ok(())
}

/// Prompt defaults: the file as stored, without env overrides or
/// validation. An unreadable file falls back to defaults.
fn stored_settings(path: &Path) -> Settings {
    Settings::load_file_or_default(path).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring unreadable config file");
        eprintln!("Warning: {err:#}; starting from defaults");
        Settings::default()
    })
}

fn apply_answers(current: Settings, api_key: &str, base_url: &str, units: &str) -> Settings {
    let api_key = match api_key.trim() {
        "" => current.api_key.clone(),
        key => key.to_string(),
    };

    Settings {
        api_key,
        base_url: base_url.trim().to_string(),
        units: units.to_string(),
        ..current
    }
}
