//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Settings loading (config file + environment)
//! - The current-weather lookup and its typed errors
//! - The provider abstraction and the OpenWeather implementation
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::Settings;
pub use error::LookupError;
pub use lookup::{describe_current_weather, fetch_current_weather};
pub use model::{CityQuery, WeatherResult};
pub use provider::{OpenWeatherProvider, WeatherProvider};
