use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    config::Settings,
    error::LookupError,
    model::{CityQuery, WeatherResult},
};

use super::WeatherProvider;

/// Client for the OpenWeather "current weather" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    settings: Settings,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(settings: Settings) -> Result<Self, LookupError> {
        if !settings.is_metric() {
            warn!(
                units = %settings.units,
                "non-metric units configured; summaries still carry a °C suffix"
            );
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `{base_url}?q={city}&appid={api_key}&units={units}`, every value
    /// percent-encoded.
    pub fn request_url(&self, city: &CityQuery) -> String {
        format!(
            "{}?q={}&appid={}&units={}",
            self.settings.base_url,
            urlencoding::encode(city.as_str()),
            urlencoding::encode(&self.settings.api_key),
            urlencoding::encode(&self.settings.units),
        )
    }

    fn redacted_url(&self, city: &CityQuery) -> String {
        format!(
            "{}?q={}&appid=***&units={}",
            self.settings.base_url,
            urlencoding::encode(city.as_str()),
            urlencoding::encode(&self.settings.units),
        )
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

/// Parse a current-weather body into a [`WeatherResult`].
pub fn parse_current(body: &str) -> Result<WeatherResult, LookupError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::parse(format!("invalid current weather JSON: {e}")))?;

    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| LookupError::parse("response has no weather entries"))?;

    Ok(WeatherResult {
        city_name: parsed.name,
        description,
        temperature: parsed.main.temp,
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &CityQuery) -> Result<WeatherResult, LookupError> {
        info!(url = %self.redacted_url(city), "requesting current weather");

        let res = self.http.get(self.request_url(city)).send().await?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "weather API returned an error status");
            return Err(LookupError::remote(status));
        }

        let body = res.text().await?;
        info!(%body, "weather API response");

        let result = parse_current(&body)?;
        debug!(?result, "parsed current weather");

        Ok(result)
    }
}
