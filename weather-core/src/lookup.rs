use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

use tracing::{info, instrument};

use crate::{
    config::Settings,
    error::LookupError,
    model::CityQuery,
    provider::{OpenWeatherProvider, WeatherProvider},
};

/// Look up current weather for `city` and format it as
/// `"{name}: {description}, {temp}°C"`.
///
/// Blank cities fail with [`LookupError::InvalidInput`] before any request is
/// sent. Each call issues exactly one HTTP request; responses are never
/// cached and failures are not retried. The HTTP client is built once per
/// distinct `Settings` and reused.
pub async fn fetch_current_weather(city: &str, settings: &Settings) -> Result<String, LookupError> {
    let city = CityQuery::new(city)?;
    let provider = provider_for(settings)?;
    summarize(&*provider, &city).await
}

static PROVIDERS: LazyLock<Mutex<HashMap<Settings, Arc<OpenWeatherProvider>>>> =
    LazyLock::new(Default::default);

fn provider_for(settings: &Settings) -> Result<Arc<OpenWeatherProvider>, LookupError> {
    let mut providers = PROVIDERS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(provider) = providers.get(settings) {
        return Ok(Arc::clone(provider));
    }

    let provider = Arc::new(OpenWeatherProvider::new(settings.clone())?);
    providers.insert(settings.clone(), Arc::clone(&provider));
    Ok(provider)
}

/// Same as [`fetch_current_weather`], against any provider.
pub async fn describe_current_weather(
    provider: &dyn WeatherProvider,
    city: &str,
) -> Result<String, LookupError> {
    let city = CityQuery::new(city)?;
    summarize(provider, &city).await
}

#[instrument(skip_all, fields(city = %city))]
async fn summarize(provider: &dyn WeatherProvider, city: &CityQuery) -> Result<String, LookupError> {
    let result = provider.current_weather(city).await?;
    let summary = result.to_string();
    info!(%summary, "current weather");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeatherResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for CountingProvider {
        async fn current_weather(&self, city: &CityQuery) -> Result<WeatherResult, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(WeatherResult {
                city_name: city.as_str().to_string(),
                description: "overcast clouds".into(),
                temperature: 12.5,
            })
        }
    }

    #[tokio::test]
    async fn blank_city_never_reaches_provider() {
        let provider = CountingProvider::default();

        for city in ["", "   ", "\t\n"] {
            let err = describe_current_weather(&provider, city).await.unwrap_err();
            assert!(matches!(err, LookupError::InvalidInput));
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn formats_provider_result() {
        let provider = CountingProvider::default();

        let summary = describe_current_weather(&provider, "Berlin").await.unwrap();
        assert_eq!(summary, "Berlin: overcast clouds, 12.5°C");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn provider_is_built_once_per_settings() {
        let settings = Settings {
            base_url: "http://127.0.0.1:9/provider-reuse".into(),
            units: "imperial".into(),
            ..Settings::default()
        };

        let first = provider_for(&settings).unwrap();
        let second = provider_for(&settings.clone()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let metric = Settings {
            units: "metric".into(),
            ..settings
        };
        let third = provider_for(&metric).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third.settings(), &metric);
    }

    #[tokio::test]
    async fn fetch_rejects_blank_city_without_network() {
        // Port 9 (discard) would fail the request if one were made.
        let settings = Settings {
            base_url: "http://127.0.0.1:9/weather".into(),
            ..Settings::default()
        };

        let err = fetch_current_weather("  ", &settings).await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidInput));
    }
}
