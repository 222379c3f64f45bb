use serde::Serialize;

use crate::icon::ConditionIcon;

/// Normalized result of one successful forecast query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherResult {
    /// Degrees Celsius, truncated toward zero.
    pub temperature: i32,
    pub humidity: u8,
    /// Passed through from the API unconverted; displayed as km/h.
    pub wind_speed: f64,
    pub location: String,
    pub condition_code: String,
    pub icon: ConditionIcon,
    /// Seconds east of UTC for the queried city.
    pub timezone_offset_secs: i64,
}
