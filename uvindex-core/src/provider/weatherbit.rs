use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{ForecastRequest, ForecastResponse, Weather};

use super::{WeatherProvider, truncate_body, unix_to_utc};

const BASE_URL: &str = "https://api.weatherbit.io/v2.0";

/// Weatherbit hourly forecast API; needs an API key.
#[derive(Debug, Clone)]
pub struct WeatherbitProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherbitProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WbHour {
    ts: i64,
    uv: f64,
}

#[derive(Debug, Deserialize)]
struct WbForecastResponse {
    #[serde(default)]
    data: Vec<WbHour>,
    timezone: String,
    #[serde(default)]
    city_name: String,
    #[serde(default)]
    country_code: String,
}

#[async_trait]
impl WeatherProvider for WeatherbitProvider {
    async fn get_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        let url = format!("{}/forecast/hourly", self.base_url);

        let mut query = vec![
            ("lat", request.latitude.to_string()),
            ("lon", request.longitude.to_string()),
            ("key", self.api_key.clone()),
            ("hours", request.hours.to_string()),
        ];
        if let Some(lang) = &request.language {
            query.push(("lang", lang.clone()));
        }
        if let Some(units) = &request.units {
            query.push(("units", units.clone()));
        }

        tracing::debug!(
            lat = request.latitude,
            lon = request.longitude,
            hours = request.hours,
            "requesting Weatherbit forecast"
        );

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .context("Failed to send request to Weatherbit (hourly forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Weatherbit forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Weatherbit forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        // Weatherbit answers 204 with an empty body when it has no data for the location.
        if body.trim().is_empty() {
            tracing::debug!(%status, "Weatherbit returned no forecast data");
            return Ok(ForecastResponse {
                forecast: Vec::new(),
                timezone: String::new(),
                city_name: String::new(),
                country_code: String::new(),
            });
        }

        let parsed: WbForecastResponse =
            serde_json::from_str(&body).context("Failed to parse Weatherbit forecast JSON")?;

        let forecast = parsed
            .data
            .iter()
            .map(|h| {
                unix_to_utc(h.ts)
                    .map(|datetime| Weather::new(datetime, h.uv))
                    .ok_or_else(|| anyhow!("Weatherbit returned an invalid timestamp: {}", h.ts))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ForecastResponse {
            forecast,
            timezone: parsed.timezone,
            city_name: parsed.city_name,
            country_code: parsed.country_code,
        })
    }
}
