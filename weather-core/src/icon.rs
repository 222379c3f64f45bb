use serde::Serialize;

/// Display icon for an OpenWeather condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionIcon {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl ConditionIcon {
    /// Map a condition code such as `"01d"` through the fixed icon table.
    /// Unknown codes fall back to [`ConditionIcon::Clear`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "01d" | "01n" => Self::Clear,
            "02d" | "02n" | "03d" | "03n" => Self::Cloud,
            "04d" | "04n" => Self::Drizzle,
            "09d" | "09n" | "10d" | "10n" => Self::Rain,
            "13d" | "13n" => Self::Snow,
            _ => Self::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloud => "cloud",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
        }
    }

    pub const fn all() -> &'static [ConditionIcon] {
        &[Self::Clear, Self::Cloud, Self::Drizzle, Self::Rain, Self::Snow]
    }
}

impl std::fmt::Display for ConditionIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
