use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single hourly UV reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub datetime: DateTime<Utc>,
    pub uv_index: f64,
}

impl Weather {
    pub fn new(datetime: DateTime<Utc>, uv_index: f64) -> Self {
        Self { datetime, uv_index }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub language: Option<String>,
    pub units: Option<String>,
    /// Number of hourly data points to request.
    pub hours: u32,
}

/// Successful answer of a provider. `forecast` is in whatever order the API returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub forecast: Vec<Weather>,
    pub timezone: String,
    pub city_name: String,
    pub country_code: String,
}

/// A place picked from the manual address search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub latitude: f64,
    pub longitude: f64,
    pub admin_area: Option<String>,
    pub country_name: Option<String>,
}

impl Address {
    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// "adminArea, countryName" with blank parts dropped.
    pub fn display_name(&self) -> String {
        join_non_blank(&[self.admin_area.as_deref(), self.country_name.as_deref()])
    }
}

/// Outcome of the manual address search flow.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressSelection {
    Selected(Address),
    Cancelled,
}

/// Address line shown after a fetch, e.g. "Istanbul, TR".
///
/// Providers that do not report a place leave both parts blank; the coordinates are shown instead.
pub fn format_location(city_name: &str, country_code: &str, location: LatLng) -> String {
    let joined = join_non_blank(&[Some(city_name), Some(country_code)]);
    if joined.is_empty() {
        format!("{:.4}, {:.4}", location.latitude, location.longitude)
    } else {
        joined
    }
}

fn join_non_blank(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
