use chrono::{DateTime, Local, Utc};

use super::Units;

/// Rendered wherever a reading is absent or unusable.
pub const PLACEHOLDER: &str = "--";

/// Rounds to the nearest whole degree and appends the unit glyph.
#[must_use]
pub fn format_temperature(value: Option<f32>, units: Units) -> String {
    match value {
        Some(v) if v.is_finite() => {
            format!("{}{}", v.round() as i32, units.temperature_suffix())
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// One-decimal speed with the unit label for the measurement system.
#[must_use]
pub fn format_wind_speed(value: Option<f32>, units: Units) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1} {}", units.wind_speed_suffix()),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Meters to kilometers, one decimal.
#[must_use]
pub fn format_visibility(meters: Option<f32>) -> String {
    match meters {
        Some(m) if m.is_finite() => format!("{:.1} km", m / 1000.0),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Renders a sunrise/sunset instant as a 24-hour `HH:MM` wall-clock string.
///
/// The location's UTC offset is added to the epoch timestamp and the sum is
/// rendered as UTC, so the host timezone never shifts it a second time.
/// A zero timestamp means the upstream had no reading.
#[must_use]
pub fn format_sun_event(timestamp_secs: Option<i64>, utc_offset_secs: i32) -> String {
    match timestamp_secs {
        Some(ts) if ts != 0 => ts
            .checked_add(i64::from(utc_offset_secs))
            .and_then(|shifted| DateTime::<Utc>::from_timestamp(shifted, 0))
            .map(|clock| clock.format("%H:%M").to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Local-time `HH:MM:SS` of the last successful cycle, `None` passthrough.
#[must_use]
pub fn format_updated_at(instant: Option<DateTime<Utc>>) -> Option<String> {
    instant.map(|ts| ts.with_timezone(&Local).format("%H:%M:%S").to_string())
}
