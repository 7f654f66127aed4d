//! Plain-text rendering of readings and the forecast chart.

use chrono_tz::Tz;
use uvindex_core::{Weather, protection::{UV_INDEX_MAX, chart_level}};

/// Forecast timezone, UTC when the provider sent something we don't know.
pub fn parse_timezone(timezone: &str) -> Tz {
    timezone.parse().unwrap_or_else(|_| {
        tracing::debug!(timezone, "unknown timezone, showing UTC");
        Tz::UTC
    })
}

pub fn headline(weather: &Weather) -> String {
    format!("UV index: {} / {}", chart_level(weather.uv_index), UV_INDEX_MAX)
}

/// One line per hour: local time, a bar of `chart_level` cells and the raw reading.
pub fn forecast_rows(forecast: &[Weather], timezone: &str) -> Vec<String> {
    let tz = parse_timezone(timezone);
    let width = usize::from(UV_INDEX_MAX);

    forecast
        .iter()
        .map(|w| {
            let bar = "█".repeat(usize::from(chart_level(w.uv_index)));
            format!(
                "{}  {:<width$}  {:>4.1}",
                w.datetime.with_timezone(&tz).format("%H:%M"),
                bar,
                w.uv_index,
            )
        })
        .collect()
}
