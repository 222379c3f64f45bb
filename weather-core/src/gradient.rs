//! Local time of day to background gradient angle.
//!
//! Noon maps to 0°, midnight to 180°, with two linear 15°-per-hour segments
//! meeting at those points. The angle uses the integer local hour, so it stays
//! constant for the whole of each hour.

use chrono::{DateTime, Utc};
use serde::Serialize;

const SECS_PER_DAY: i128 = 86_400;
const SECS_PER_HOUR: i128 = 3_600;
const DEGREES_PER_HOUR: f64 = 15.0;

/// Gradient angle in degrees, always in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct GradientAngle(f64);

impl GradientAngle {
    /// Angle shown before any query has succeeded.
    pub const INITIAL: GradientAngle = GradientAngle(180.0);

    pub fn degrees(self) -> f64 {
        self.0
    }

    /// CSS background the widget paints with this angle.
    pub fn css(self) -> String {
        format!("linear-gradient({}deg, #000000, #134980, #f18719)", self.0)
    }
}

impl Default for GradientAngle {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl std::fmt::Display for GradientAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Local hour of day in `[0, 24)` at `now` shifted by `offset_secs`.
pub fn local_hour(offset_secs: i64, now: DateTime<Utc>) -> u32 {
    // i128 keeps the sum exact for any offset.
    let local = i128::from(now.timestamp()) + i128::from(offset_secs);
    let hour = local.rem_euclid(SECS_PER_DAY) / SECS_PER_HOUR;
    hour as u32
}

/// Gradient angle for a city `offset_secs` east of UTC, evaluated at `now`.
pub fn angle_for_offset(offset_secs: i64, now: DateTime<Utc>) -> GradientAngle {
    angle_for_hour(local_hour(offset_secs, now))
}

fn angle_for_hour(hour: u32) -> GradientAngle {
    let h = f64::from(hour % 24);
    if hour >= 12 {
        GradientAngle((h - 12.0) * DEGREES_PER_HOUR)
    } else {
        GradientAngle(180.0 + h * DEGREES_PER_HOUR)
    }
}
