use crate::app::session::SessionState;
use crate::domain::weather::format::{
    PLACEHOLDER, format_sun_event, format_temperature, format_updated_at, format_visibility,
    format_wind_speed,
};
use crate::domain::weather::projection::{ForecastPoint, project_forecast};
use crate::domain::weather::{CurrentConditions, Units};
use crate::error::SessionError;

/// One row of the metrics panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

/// Everything the presentation collaborator receives. Plain display data,
/// no core internals.
#[derive(Debug, Clone)]
pub struct ViewFrame {
    pub metrics: Vec<Metric>,
    pub location_label: String,
    pub background_key: String,
    pub forecast_points: Vec<ForecastPoint>,
    pub units: Units,
    pub loading: bool,
    pub error: Option<SessionError>,
    pub last_updated_at: Option<String>,
}

/// Pure re-derivation of the display payload from raw session state, run
/// after every committed mutation.
#[must_use]
pub fn derive_view(state: &SessionState) -> ViewFrame {
    let forecast_points = project_forecast(state.forecast.as_ref());
    ViewFrame {
        metrics: metrics(state, &forecast_points),
        location_label: location_label(state),
        background_key: background_key(state),
        units: state.units,
        loading: state.loading,
        error: state.error.clone(),
        last_updated_at: format_updated_at(state.last_updated_at),
        forecast_points,
    }
}

/// Fixed ordered metric set; empty until a cycle has committed conditions.
fn metrics(state: &SessionState, points: &[ForecastPoint]) -> Vec<Metric> {
    let Some(current) = state.current.as_ref() else {
        return Vec::new();
    };

    vec![
        Metric {
            label: "Feels like",
            value: format_temperature(current.feels_like, state.units),
        },
        Metric {
            label: "Humidity",
            value: humidity_value(current, points),
        },
        Metric {
            label: "Wind",
            value: format_wind_speed(current.wind_speed, state.units),
        },
        Metric {
            label: "Pressure",
            value: rounded_suffix(current.pressure_hpa, " hPa"),
        },
        Metric {
            label: "Visibility",
            value: format_visibility(current.visibility_m),
        },
        Metric {
            label: "Cloud cover",
            value: rounded_suffix(current.cloud_cover, "%"),
        },
        Metric {
            label: "Sunrise",
            value: format_sun_event(current.sunrise, current.utc_offset_secs),
        },
        Metric {
            label: "Sunset",
            value: format_sun_event(current.sunset, current.utc_offset_secs),
        },
    ]
}

/// Humidity reading annotated with the next forecast period's
/// precipitation probability when one is available.
fn humidity_value(current: &CurrentConditions, points: &[ForecastPoint]) -> String {
    let base = rounded_suffix(current.humidity, "%");
    if base == PLACEHOLDER {
        return base;
    }
    match points.first() {
        Some(next) => format!("{base} ({}% precip)", next.precipitation_pct),
        None => base,
    }
}

fn rounded_suffix(value: Option<f32>, suffix: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}{suffix}", v.round() as i32),
        _ => PLACEHOLDER.to_string(),
    }
}

fn location_label(state: &SessionState) -> String {
    state
        .current
        .as_ref()
        .map(CurrentConditions::display_name)
        .unwrap_or_else(|| state.city.clone())
}

/// Key for the external background-art collaborator: resolved location
/// name once a fetch has landed, committed city before that.
fn background_key(state: &SessionState) -> String {
    let name = state
        .current
        .as_ref()
        .map_or(state.city.as_str(), |c| c.location_name.as_str());
    name.trim().to_lowercase()
}
