use crate::{Config, QueryError, WeatherResult, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current weather for a named city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Look up `city`. Implementations reject blank names with
    /// [`QueryError::EmptyCityName`] before touching the network.
    async fn query(&self, city: &str) -> Result<WeatherResult, QueryError>;
}

/// Trim `city` and reject it if nothing is left.
pub fn validate_city(city: &str) -> Result<&str, QueryError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        Err(QueryError::EmptyCityName)
    } else {
        Ok(trimmed)
    }
}

/// Construct the OpenWeather provider from config.
///
/// Fails when no API key is configured; that is a startup misconfiguration.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.require_api_key()?;
    Ok(OpenWeatherProvider::new(api_key.to_owned()).with_base_url(config.base_url()))
}
