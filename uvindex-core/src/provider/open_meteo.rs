use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{ForecastRequest, ForecastResponse, Weather};

use super::{WeatherProvider, truncate_body, unix_to_utc};

const BASE_URL: &str = "https://api.open-meteo.com";

/// Open-Meteo forecast API. Free, no key, but reports no place name.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<i64>,
    uv_index: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    timezone: String,
    hourly: OmHourly,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn get_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        let url = format!("{}/v1/forecast", self.base_url);

        tracing::debug!(
            lat = request.latitude,
            lon = request.longitude,
            hours = request.hours,
            "requesting Open-Meteo forecast"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", request.latitude.to_string()),
                ("longitude", request.longitude.to_string()),
                ("hourly", "uv_index".to_string()),
                ("forecast_hours", request.hours.to_string()),
                ("timezone", "auto".to_string()),
                ("timeformat", "unixtime".to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (hourly forecast)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read Open-Meteo forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OmForecastResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        if parsed.hourly.time.len() != parsed.hourly.uv_index.len() {
            return Err(anyhow!(
                "Open-Meteo returned {} timestamps but {} UV readings",
                parsed.hourly.time.len(),
                parsed.hourly.uv_index.len()
            ));
        }

        let mut forecast = Vec::with_capacity(parsed.hourly.time.len());
        for (ts, uv) in parsed.hourly.time.iter().zip(&parsed.hourly.uv_index) {
            let datetime = unix_to_utc(*ts)
                .ok_or_else(|| anyhow!("Open-Meteo returned an invalid timestamp: {ts}"))?;
            // Hours without a reading come back as null.
            if let Some(uv) = uv {
                forecast.push(Weather::new(datetime, *uv));
            }
        }

        Ok(ForecastResponse {
            forecast,
            timezone: parsed.timezone,
            city_name: String::new(),
            country_code: String::new(),
        })
    }
}
