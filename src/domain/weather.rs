pub mod format;
pub mod projection;

use chrono::{DateTime, Utc};

/// Measurement system requested from the upstream API and used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter.
    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    #[must_use]
    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    #[must_use]
    pub fn wind_speed_suffix(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

/// Normalized current-conditions reading for the resolved location.
///
/// Readings the upstream may omit stay `Option` all the way to the
/// formatters, which render the placeholder instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: Option<String>,
    pub temperature: Option<f32>,
    pub feels_like: Option<f32>,
    pub humidity: Option<f32>,
    pub wind_speed: Option<f32>,
    pub pressure_hpa: Option<f32>,
    pub visibility_m: Option<f32>,
    pub cloud_cover: Option<f32>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub utc_offset_secs: i32,
    pub description: String,
    pub icon: String,
}

impl CurrentConditions {
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.location_name, country),
            None => self.location_name.clone(),
        }
    }
}

/// One raw 3-hour forecast bucket. `precipitation_probability` is 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub precipitation_probability: Option<f32>,
}

/// Chronological forecast entries plus the UTC offset of their location.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub entries: Vec<ForecastEntry>,
    pub utc_offset_secs: i32,
}

/// Result of one settled fetch cycle. Current conditions and the forecast
/// travel together so the session commits them atomically.
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub current: CurrentConditions,
    pub forecast: ForecastSeries,
    pub fetched_at: DateTime<Utc>,
}
