use chrono::{DateTime, Utc};

use crate::{
    error::QueryError,
    gradient::{GradientAngle, angle_for_offset},
    model::WeatherResult,
};

/// Lifecycle of the most recent search.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    InFlight,
    Succeeded(WeatherResult),
    Failed(String),
}

/// Everything the widget renders from, owned in one place.
///
/// The gradient angle and the displayed result only change on success; a
/// failure updates `state` and nothing else.
#[derive(Debug, Clone, Default)]
pub struct WidgetStore {
    state: QueryState,
    last_good: Option<WeatherResult>,
    angle: GradientAngle,
}

impl WidgetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_search(&mut self) {
        self.state = QueryState::InFlight;
    }

    /// Apply one resolved query; `now` is the wall clock used for the angle.
    pub fn apply(&mut self, outcome: Result<WeatherResult, QueryError>, now: DateTime<Utc>) {
        match outcome {
            Ok(result) => {
                self.angle = angle_for_offset(result.timezone_offset_secs, now);
                self.last_good = Some(result.clone());
                self.state = QueryState::Succeeded(result);
            }
            Err(err) => {
                self.state = QueryState::Failed(err.to_string());
            }
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Last successful result; `None` means the "no data" view.
    pub fn displayed(&self) -> Option<&WeatherResult> {
        self.last_good.as_ref()
    }

    pub fn angle(&self) -> GradientAngle {
        self.angle
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::InFlight)
    }
}
