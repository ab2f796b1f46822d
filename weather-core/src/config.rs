use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_UNITS: &str = "metric";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_KEY: &str = "WEATHER_API_KEY";
pub const ENV_BASE_URL: &str = "WEATHER_BASE_URL";
pub const ENV_UNITS: &str = "WEATHER_UNITS";
pub const ENV_TIMEOUT_SECS: &str = "WEATHER_TIMEOUT_SECS";

/// Everything a lookup needs to build its request.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
/// units = "metric"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    /// Passed through to the API as `units`, e.g. "metric" or "imperial".
    pub units: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            units: DEFAULT_UNITS.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from the default config file (if any), then apply
    /// `WEATHER_*` environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let settings = if path.exists() {
            Self::read_file(&path)?
        } else {
            // First run: nothing configured yet.
            Self::default()
        };

        let settings = settings.with_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Same as [`Settings::load`], but the file must exist at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = Self::read_file(path)?.with_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    /// What is stored at `path`, or defaults if there is no file yet.
    ///
    /// No environment overrides and no validation: this is the view used to
    /// edit the file, so a broken file can still be repaired.
    pub fn load_file_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::read_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse settings TOML")
    }

    fn read_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source; absent keys leave the
    /// current value untouched.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.api_key = api_key;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(units) = lookup(ENV_UNITS) {
            self.units = units;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"))?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn is_metric(&self) -> bool {
        self.units.eq_ignore_ascii_case(DEFAULT_UNITS)
    }

    /// Save settings to the default config file.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
