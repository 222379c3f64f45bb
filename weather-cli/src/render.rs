//! Plain-text rendering of the widget.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use weather_core::{GradientAngle, QueryState, WeatherResult, WidgetStore};

const NO_DATA: &str = "Please enter a city name";

/// The widget card: last good result (or the no-data prompt) plus the gradient.
pub fn card(store: &WidgetStore, now: DateTime<Utc>) -> String {
    let angle = store.angle();
    let body = match store.displayed() {
        Some(result) => weather_lines(result, now),
        None => NO_DATA.to_string(),
    };

    format!("{body}\nBackground: {angle} ({})", angle.css())
}

/// Short line describing the current query state.
pub fn status_line(store: &WidgetStore) -> String {
    match store.state() {
        QueryState::Idle => "Idle".to_string(),
        QueryState::InFlight => "Searching...".to_string(),
        QueryState::Succeeded(result) => format!("Updated: {}", result.location),
        QueryState::Failed(message) => format!("Alert: {message}"),
    }
}

/// What to print after a resolution lands: an alert line on failure, then the card.
pub fn update(store: &WidgetStore, now: DateTime<Utc>) -> String {
    match store.state() {
        QueryState::Failed(_) => format!("{}\n{}", status_line(store), card(store, now)),
        _ => card(store, now),
    }
}

/// Machine-readable view of the displayed result, for `show --json`.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    #[serde(flatten)]
    pub weather: &'a WeatherResult,
    pub gradient_angle: GradientAngle,
    pub gradient_css: String,
    pub observed_at: DateTime<Utc>,
}

/// `None` while nothing has been displayed yet.
pub fn snapshot(store: &WidgetStore, now: DateTime<Utc>) -> Option<Snapshot<'_>> {
    let weather = store.displayed()?;
    let angle = store.angle();
    Some(Snapshot {
        weather,
        gradient_angle: angle,
        gradient_css: angle.css(),
        observed_at: now,
    })
}

fn weather_lines(result: &WeatherResult, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "[{}] {}°c\n{}\nHumidity: {}%   Wind Speed: {} Km/h",
        result.icon, result.temperature, result.location, result.humidity, result.wind_speed,
    );

    if let Some(local) = local_time(result.timezone_offset_secs, now) {
        out.push_str(&format!("\nLocal time: {}", local.format("%H:%M")));
    }

    out
}

fn local_time(offset_secs: i64, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    now.checked_add_signed(TimeDelta::try_seconds(offset_secs)?)
}
