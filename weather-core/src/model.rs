use std::fmt;

use crate::error::LookupError;

/// A city name that is known to be non-blank.
///
/// The original text is kept as given (no trimming) so it reaches the API
/// exactly as the caller typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(city: impl Into<String>) -> Result<Self, LookupError> {
        let city = city.into();
        if city.trim().is_empty() {
            return Err(LookupError::InvalidInput);
        }
        Ok(Self(city))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for one city, as reported by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResult {
    pub city_name: String,
    pub description: String,
    /// In whatever unit system the request asked for.
    pub temperature: f64,
}

impl fmt::Display for WeatherResult {
    // The suffix stays `°C` even for non-metric units.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}, {}°C", self.city_name, self.description, self.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, description: &str, temperature: f64) -> WeatherResult {
        WeatherResult {
            city_name: name.to_string(),
            description: description.to_string(),
            temperature,
        }
    }

    #[test]
    fn blank_city_is_rejected() {
        for city in ["", " ", "\t", "  \n  "] {
            let err = CityQuery::new(city).unwrap_err();
            assert!(matches!(err, LookupError::InvalidInput), "{city:?}");
        }
    }

    #[test]
    fn city_is_kept_verbatim() {
        let city = CityQuery::new(" New York ").expect("non-blank city");
        assert_eq!(city.as_str(), " New York ");
    }

    #[test]
    fn whole_temperature_has_no_fraction() {
        assert_eq!(result("London", "clear sky", 20.0).to_string(), "London: clear sky, 20°C");
    }

    #[test]
    fn fractional_and_negative_temperatures() {
        assert_eq!(result("München-Paris", "rainy", 10.1).to_string(), "München-Paris: rainy, 10.1°C");
        assert_eq!(result("Oslo", "snow", -3.5).to_string(), "Oslo: snow, -3.5°C");
    }

    #[test]
    fn long_names_are_not_truncated() {
        let name = "a".repeat(300);
        let line = result(&name, "fog", 1.0).to_string();
        assert!(line.starts_with(&format!("{name}: ")));
        assert_eq!(line, format!("{name}: fog, 1°C"));
    }
}
