//! Core library for the `weather-widget` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather forecast query and its condition icon table
//! - The time-of-day gradient clock
//! - Widget state and the search session that drives it
//!
//! It is used by `weather-widget`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod gradient;
pub mod icon;
pub mod model;
pub mod provider;
pub mod session;
pub mod state;

pub use config::Config;
pub use error::QueryError;
pub use gradient::{GradientAngle, angle_for_offset};
pub use icon::ConditionIcon;
pub use model::WeatherResult;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use session::{Resolution, SearchSession};
pub use state::{QueryState, WidgetStore};
