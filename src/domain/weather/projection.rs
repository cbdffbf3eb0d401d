use chrono::{DateTime, Utc};

use super::ForecastSeries;
use super::format::PLACEHOLDER;

/// How many raw entries survive projection.
pub const MAX_POINTS: usize = 8;
/// Chart collaborators consume at most this many points.
pub const CHART_POINTS: usize = 8;
/// Chip rows consume at most this many points.
pub const CHIP_POINTS: usize = 4;

/// Display-ready forecast bucket: labelled, unit-agnostic, chart-friendly.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub label: String,
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub precipitation_pct: u8,
}

/// Projects a raw series into at most [`MAX_POINTS`] points in source order.
/// An absent or empty series is "no data yet" and yields an empty sequence.
#[must_use]
pub fn project_forecast(series: Option<&ForecastSeries>) -> Vec<ForecastPoint> {
    let Some(series) = series else {
        return Vec::new();
    };

    series
        .entries
        .iter()
        .take(MAX_POINTS)
        .map(|entry| ForecastPoint {
            label: bucket_label(entry.timestamp, series.utc_offset_secs),
            temperature: entry.temperature,
            humidity: entry.humidity,
            precipitation_pct: precipitation_pct(entry.precipitation_probability),
        })
        .collect()
}

#[must_use]
pub fn chart_points(points: &[ForecastPoint]) -> &[ForecastPoint] {
    &points[..points.len().min(CHART_POINTS)]
}

#[must_use]
pub fn chip_points(points: &[ForecastPoint]) -> &[ForecastPoint] {
    &points[..points.len().min(CHIP_POINTS)]
}

/// Weekday abbreviation + 24h time at the location's offset, rendered as
/// UTC so the host timezone cannot shift it again.
fn bucket_label(timestamp: i64, utc_offset_secs: i32) -> String {
    timestamp
        .checked_add(i64::from(utc_offset_secs))
        .and_then(|shifted| DateTime::<Utc>::from_timestamp(shifted, 0))
        .map(|clock| clock.format("%a %H:%M").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn precipitation_pct(pop: Option<f32>) -> u8 {
    let fraction = pop.unwrap_or(0.0);
    if !fraction.is_finite() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}
