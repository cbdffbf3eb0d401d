use std::io::Write;

use crate::app::view::ViewFrame;
use crate::domain::weather::format::{PLACEHOLDER, format_temperature};
use crate::domain::weather::projection::chart_points;

/// Stateless text renderer for the derived view. An error banner replaces
/// the weather content; everything else is the metrics panel followed by
/// the forecast table.
pub fn render(out: &mut impl Write, frame: &ViewFrame) -> std::io::Result<()> {
    if let Some(error) = &frame.error {
        writeln!(out, "! {error}")?;
        return Ok(());
    }

    if frame.loading && frame.metrics.is_empty() {
        writeln!(out, "{}: fetching weather...", frame.location_label)?;
        return Ok(());
    }

    if frame.metrics.is_empty() {
        writeln!(out, "{}: no data yet", frame.location_label)?;
        return Ok(());
    }

    writeln!(out, "== {} ==", frame.location_label)?;
    for metric in &frame.metrics {
        writeln!(out, "  {:<12} {}", metric.label, metric.value)?;
    }

    if !frame.forecast_points.is_empty() {
        writeln!(out, "  forecast:")?;
        for point in chart_points(&frame.forecast_points) {
            writeln!(
                out,
                "    {:<10} {:>6}  {:>5}  {:>3}%",
                point.label,
                format_temperature(point.temperature, frame.units),
                humidity_cell(point.humidity),
                point.precipitation_pct
            )?;
        }
    }

    if let Some(updated) = &frame.last_updated_at {
        writeln!(out, "  updated {updated}")?;
    }

    Ok(())
}

fn humidity_cell(value: Option<f32>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}%", v.round() as i32),
        _ => PLACEHOLDER.to_string(),
    }
}
