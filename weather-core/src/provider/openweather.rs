use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use crate::{
    config::DEFAULT_BASE_URL,
    error::QueryError,
    icon::ConditionIcon,
    model::WeatherResult,
    provider::{WeatherProvider, validate_city},
};

const UNITS: &str = "metric";
const TRANSPORT_FAILURE: &str = "Error in fetching weather data";
const UNEXPECTED_RESPONSE: &str = "Unexpected response from weather service";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the provider at another API root (a proxy or a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url.trim_end_matches('/'))
    }

    fn forecast_request(&self, city: &str) -> RequestBuilder {
        self.http.get(self.forecast_url()).query(&[
            ("q", city),
            ("units", UNITS),
            ("appid", self.api_key.as_str()),
        ])
    }

    async fn fetch_forecast(&self, city: &str) -> Result<WeatherResult, QueryError> {
        tracing::debug!(%city, url = %self.forecast_url(), "sending forecast request");

        let res = self.forecast_request(city).send().await.map_err(|err| {
            tracing::warn!(%city, error = %loggable(err), "forecast request failed");
            QueryError::failed(TRANSPORT_FAILURE)
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            tracing::warn!(%city, error = %loggable(err), "failed to read forecast response body");
            QueryError::failed(TRANSPORT_FAILURE)
        })?;

        if !status.is_success() {
            let message = api_error_message(&body).unwrap_or_else(|| {
                format!("Weather service request failed with status {status}")
            });
            tracing::warn!(%city, %status, body = %truncate_body(&body), "weather service returned an error");
            return Err(QueryError::QueryFailed(message));
        }

        parse_forecast(&body).ok_or_else(|| {
            tracing::warn!(%city, body = %truncate_body(&body), "unexpected forecast response shape");
            QueryError::failed(UNEXPECTED_RESPONSE)
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn query(&self, city: &str) -> Result<WeatherResult, QueryError> {
        let city = validate_city(city)?;
        self.fetch_forecast(city).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

/// Map a 2xx forecast body; `None` when the body is not the expected shape.
fn parse_forecast(body: &str) -> Option<WeatherResult> {
    let parsed: OwForecastResponse = serde_json::from_str(body).ok()?;
    let entry = parsed.list.into_iter().next()?;
    let condition_code = entry.weather.into_iter().next()?.icon;

    Some(WeatherResult {
        // `as` saturates on out-of-range floats and truncates toward zero.
        temperature: entry.main.temp.trunc() as i32,
        humidity: entry.main.humidity,
        wind_speed: entry.wind.speed,
        location: parsed.city.name,
        icon: ConditionIcon::from_code(&condition_code),
        condition_code,
        timezone_offset_secs: parsed.city.timezone,
    })
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()?
        .message
        .filter(|m| !m.is_empty())
}

/// Error text without the request URL, whose query string carries the API key.
fn loggable(err: reqwest::Error) -> String {
    err.without_url().to_string()
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
