//! Picking the reading to show as "current".

use chrono::{DateTime, Utc};

use crate::model::Weather;

/// Entry whose timestamp is closest to `now`. The first of several equidistant entries wins.
///
/// Returns `None` only for an empty slice.
pub fn select_closest(forecast: &[Weather], now: DateTime<Utc>) -> Option<&Weather> {
    forecast
        .iter()
        .min_by_key(|w| (w.datetime - now).num_milliseconds().abs())
}

/// Stable ascending sort by timestamp, as the chart expects.
pub fn sort_chronologically(mut forecast: Vec<Weather>) -> Vec<Weather> {
    forecast.sort_by_key(|w| w.datetime);
    forecast
}
