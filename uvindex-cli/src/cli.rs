use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Select};
use std::{fmt, path::Path, process::ExitCode, sync::Arc};
use uvindex_core::{
    Address, AddressSelection, Config, DateProvider, FixedDateProvider, Geocoder, LatLng,
    OpenMeteoGeocoder, ProviderId, QueryError, QueryPresenter, QueryViewState,
    SystemDateProvider,
    geocode::DEFAULT_MAX_RESULTS,
    provider::{default_provider_from_config, provider_from_config},
};

use crate::view::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "uvindex", version, about = "UV index forecast for a location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Forecast provider to use instead of the configured default.
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Language passed to the provider, e.g. "tr".
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Unit system passed to the provider, e.g. "M".
    #[arg(long, global = true)]
    pub units: Option<String>,

    /// Pretend the current time is this RFC 3339 instant.
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Do not remember the result for `uvindex last`.
    #[arg(long, global = true)]
    pub no_save: bool,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure a forecast provider (API key, default provider).
    Configure {
        /// Provider short name, e.g. "weatherbit" or "openmeteo".
        provider: String,
    },

    /// Show the UV index for coordinates, as a location fix would.
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Search for a place by name and show its UV index.
    Search {
        /// Place name, e.g. "Fresno".
        query: String,
    },

    /// Show the last forecast again.
    Last,

    /// About this tool.
    About,

    /// How to install this tool.
    Install,
}

/// Wrapper so addresses can be listed in the picker.
struct PlaceOption(Address);

impl fmt::Display for PlaceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.4}, {:.4})",
            self.0.display_name(),
            self.0.latitude,
            self.0.longitude
        )
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let Cli { command, provider, lang, units, now, no_save, .. } = self;

        if let Command::Configure { provider } = &command {
            configure(provider)?;
            return Ok(ExitCode::SUCCESS);
        }

        let config = Config::load()?;
        let language = lang.or_else(|| config.language.clone());
        let units = units.or_else(|| config.units.clone());
        let presenter =
            build_presenter(&config, provider.as_deref(), now.as_deref())?
                .with_locale(language.clone(), units);
        let view = TerminalView;

        let state_path = QueryViewState::default_state_path()?;
        presenter.restore_state(load_saved_state(&state_path));

        let result = match command {
            Command::Locate { lat, lon } => {
                if !presenter.request_location_updates() {
                    tracing::debug!("location updates already requested");
                }
                presenter.on_location_received(&view, LatLng::new(lat, lon)).await.map(|_| ())
            }
            Command::Search { query } => {
                presenter.user_clicked_text_input_button(&view);
                match pick_place(&query, language.as_deref()).await {
                    Ok(selection) => presenter.on_address_selected(&view, selection).await.map(|_| ()),
                    Err(e) => {
                        tracing::warn!("place search failed: {e:#}");
                        Err(presenter.get_place_auto_complete_failed(&view))
                    }
                }
            }
            Command::Last => {
                if !presenter.render_state(&view) {
                    println!("No saved forecast yet. Run `uvindex locate` or `uvindex search` first.");
                }
                Ok(())
            }
            Command::About => {
                presenter.user_clicked_about_button(&view);
                Ok(())
            }
            Command::Install => {
                presenter.user_clicked_install_button(&view);
                Ok(())
            }
            // handled before the presenter is built
            Command::Configure { .. } => Ok(()),
        };

        if !no_save {
            presenter.state().save_to(&state_path)?;
        }

        Ok(exit_code(result))
    }
}

fn build_presenter(
    config: &Config,
    provider: Option<&str>,
    now: Option<&str>,
) -> anyhow::Result<QueryPresenter> {
    tracing::debug!(requested = ?provider, "building forecast provider");
    let provider = match provider {
        Some(name) => provider_from_config(ProviderId::try_from(name)?, config)?,
        None => default_provider_from_config(config)?,
    };

    let date_provider: Arc<dyn DateProvider> = match now {
        Some(now) => Arc::new(FixedDateProvider(parse_now(now)?)),
        None => Arc::new(SystemDateProvider),
    };

    Ok(QueryPresenter::new(Arc::from(provider), date_provider))
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    if id.requires_api_key() {
        let message = if config.is_provider_configured(id) {
            format!("New {id} API key (replaces the stored one):")
        } else {
            format!("{id} API key:")
        };
        let api_key = Password::new(&message)
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(anyhow!("API key must not be empty"));
        }
        config.upsert_provider_api_key(id, api_key);
    } else {
        println!("{id} needs no API key.");
    }

    if config.default_provider_id()? != id {
        let make_default = Confirm::new(&format!("Use {id} by default?"))
            .with_default(true)
            .prompt()
            .context("Failed to read answer")?;
        if make_default {
            config.set_default_provider(id);
        }
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Geocode `query` and let the user pick one of the matches; escape cancels.
async fn pick_place(query: &str, language: Option<&str>) -> anyhow::Result<AddressSelection> {
    let geocoder = OpenMeteoGeocoder::new();
    let addresses = geocoder.search(query, DEFAULT_MAX_RESULTS, language).await?;

    if addresses.is_empty() {
        return Err(anyhow!("No place found for '{query}'"));
    }

    let options = addresses.into_iter().map(PlaceOption).collect();
    let picked = Select::new("Pick a place:", options)
        .prompt_skippable()
        .context("Failed to read place selection")?;

    Ok(match picked {
        Some(PlaceOption(address)) => AddressSelection::Selected(address),
        None => AddressSelection::Cancelled,
    })
}

/// A missing or unreadable saved state only costs the `last` command its data.
fn load_saved_state(path: &Path) -> QueryViewState {
    QueryViewState::load_from(path).unwrap_or_else(|e| {
        tracing::warn!("ignoring saved view state: {e:#}");
        QueryViewState::default()
    })
}

fn parse_now(value: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid --now value '{value}', expected RFC 3339"))
}

/// The view already told the user what went wrong; only the exit status is left.
fn exit_code(result: Result<(), QueryError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("query ended with: {e}");
            ExitCode::FAILURE
        }
    }
}
