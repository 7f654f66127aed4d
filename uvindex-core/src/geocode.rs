//! Forward geocoding for the manual address search.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{model::Address, provider::truncate_body};

const BASE_URL: &str = "https://geocoding-api.open-meteo.com";

/// Number of candidate places offered to the user.
pub const DEFAULT_MAX_RESULTS: usize = 5;

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        language: Option<&str>,
    ) -> Result<Vec<Address>>;
}

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    base_url: String,
    http: Client,
}

impl Default for OpenMeteoGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoGeocoder {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    // absent when nothing matched
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        language: Option<&str>,
    ) -> Result<Vec<Address>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/v1/search", self.base_url);
        let mut params = vec![
            ("name", query.to_string()),
            ("count", max_results.to_string()),
            ("format", "json".to_string()),
        ];
        if let Some(lang) = language {
            params.push(("language", lang.to_string()));
        }

        tracing::debug!(query, max_results, "searching places");

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("Failed to send request to Open-Meteo geocoding")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GeoResponse =
            serde_json::from_str(&body).context("Failed to parse geocoding JSON")?;

        let addresses: Vec<Address> = parsed
            .results
            .into_iter()
            .take(max_results)
            .map(|r| Address {
                latitude: r.latitude,
                longitude: r.longitude,
                admin_area: r.admin1,
                country_name: r.country,
            })
            .collect();

        tracing::debug!(query, found = addresses.len(), "places received");
        Ok(addresses)
    }
}
