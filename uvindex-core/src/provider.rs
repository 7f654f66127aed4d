use crate::{
    Config, ForecastRequest, ForecastResponse,
    provider::{open_meteo::OpenMeteoProvider, weatherbit::WeatherbitProvider},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{convert::TryFrom, fmt::Debug};

pub mod open_meteo;
pub mod weatherbit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Weatherbit,
    OpenMeteo,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Weatherbit => "weatherbit",
            ProviderId::OpenMeteo => "openmeteo",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Weatherbit, ProviderId::OpenMeteo]
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderId::Weatherbit)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "weatherbit" => Ok(ProviderId::Weatherbit),
            "openmeteo" | "open-meteo" => Ok(ProviderId::OpenMeteo),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: weatherbit, openmeteo."
            )),
        }
    }
}

/// Source of hourly UV index forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_forecast(&self, request: &ForecastRequest) -> anyhow::Result<ForecastResponse>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::Weatherbit => {
            let api_key = config.provider_api_key(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                     Hint: run `uvindex configure {id}` and enter your API key."
                )
            })?;
            Box::new(WeatherbitProvider::new(api_key.to_owned()))
        }
        ProviderId::OpenMeteo => Box::new(OpenMeteoProvider::new()),
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

pub(crate) fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn provider_id_parsing_is_case_insensitive() {
        assert_eq!(ProviderId::try_from("WeatherBit").unwrap(), ProviderId::Weatherbit);
        assert_eq!(ProviderId::try_from("Open-Meteo").unwrap(), ProviderId::OpenMeteo);
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(ProviderId::Weatherbit, &cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider"));
    }

    #[test]
    fn open_meteo_needs_no_api_key() {
        let cfg = Config::default();
        assert!(!ProviderId::OpenMeteo.requires_api_key());
        assert!(provider_from_config(ProviderId::OpenMeteo, &cfg).is_ok());
    }

    #[test]
    fn default_provider_from_config_falls_back_to_open_meteo() {
        let cfg = Config::default();
        assert!(default_provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn default_provider_from_config_works_when_set_and_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::Weatherbit, "KEY".to_string());

        let provider = default_provider_from_config(&cfg);
        assert!(provider.is_ok());
    }

    #[test]
    fn truncate_body_limits_long_bodies() {
        let long = "é".repeat(250);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}
