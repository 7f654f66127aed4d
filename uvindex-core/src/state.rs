use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::model::{LatLng, Weather};

/// Where the location subscription currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSearchState {
    #[default]
    Idle,
    SearchingLocation,
    /// Waiting for the user to resolve location settings.
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationEvent {
    UpdatesRequested,
    LocationReceived,
    SettingsResolutionPending,
    Resumed,
    SettingsDeclined,
}

impl LocationSearchState {
    /// State after `event`, or `None` when the event is not valid here.
    pub fn next(self, event: LocationEvent) -> Option<Self> {
        use LocationEvent::*;
        use LocationSearchState::*;

        match (self, event) {
            (Idle, UpdatesRequested) => Some(SearchingLocation),
            (SearchingLocation, LocationReceived) => Some(Idle),
            (SearchingLocation, SettingsResolutionPending) => Some(Paused),
            (Paused, Resumed) => Some(SearchingLocation),
            (Paused | SearchingLocation, SettingsDeclined) => Some(Idle),
            _ => None,
        }
    }
}

/// Everything the query screen needs to redraw itself after a restart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryViewState {
    pub timezone: String,
    pub current_uv_index: Option<Weather>,
    pub uv_index_forecast: Vec<Weather>,
    pub address: Option<String>,
    pub location: Option<LatLng>,
    pub location_search_state: LocationSearchState,
}

impl QueryViewState {
    /// Apply `event` to the search state. Returns false and leaves the state untouched if rejected.
    pub fn apply(&mut self, event: LocationEvent) -> bool {
        match self.location_search_state.next(event) {
            Some(next) => {
                tracing::debug!(from = ?self.location_search_state, to = ?next, ?event, "location search state");
                self.location_search_state = next;
                true
            }
            None => {
                tracing::debug!(state = ?self.location_search_state, ?event, "ignored location event");
                false
            }
        }
    }

    pub fn set_forecast(
        &mut self,
        timezone: String,
        current: Weather,
        forecast: Vec<Weather>,
        address: String,
    ) {
        self.timezone = timezone;
        self.current_uv_index = Some(current);
        self.uv_index_forecast = forecast;
        self.address = Some(address);
    }

    /// Load a saved state, or return an empty default if none was saved yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read view state: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse view state: {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize view state")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write view state: {}", path.display()))?;

        Ok(())
    }

    pub fn default_state_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("net", "epictimes", "uvindex")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("query_state.json"))
    }
}
