//! Orchestration of the query screen: location and address events in, view directives out.

use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    clock::DateProvider,
    error::QueryError,
    model::{AddressSelection, ForecastRequest, LatLng, Weather, format_location},
    protection::ProtectionBand,
    provider::WeatherProvider,
    selection::{select_closest, sort_chronologically},
    state::{LocationEvent, LocationSearchState, QueryViewState},
    view::{INSTALL_FROM_QUERY_FEATURE, QueryView, REFERRER_FROM_QUERY_FEATURE},
};

/// Forecast horizon requested from the provider, in hours.
pub const FORECAST_HOUR: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The forecast was stored and shown; carries the reading picked as current.
    Displayed(Weather),
    /// A newer request was issued while this one was in flight; its response was dropped.
    Superseded,
}

/// Presenter of the query screen.
///
/// Methods take `&self` so several fetches may be in flight at once. Each fetch takes a
/// ticket from a generation counter and only the holder of the newest ticket may touch the
/// view state or the view. Responses are applied one at a time under `render`; the state
/// lock is never held across an await or a view call.
#[derive(Debug)]
pub struct QueryPresenter {
    provider: Arc<dyn WeatherProvider>,
    date_provider: Arc<dyn DateProvider>,
    language: Option<String>,
    units: Option<String>,
    generation: AtomicU64,
    render: Mutex<()>,
    state: Mutex<QueryViewState>,
}

impl QueryPresenter {
    pub fn new(provider: Arc<dyn WeatherProvider>, date_provider: Arc<dyn DateProvider>) -> Self {
        Self {
            provider,
            date_provider,
            language: None,
            units: None,
            generation: AtomicU64::new(0),
            render: Mutex::new(()),
            state: Mutex::new(QueryViewState::default()),
        }
    }

    /// Language and units used for fetches triggered by location or address events.
    pub fn with_locale(mut self, language: Option<String>, units: Option<String>) -> Self {
        self.language = language;
        self.units = units;
        self
    }

    pub async fn get_forecast_uv_index(
        &self,
        view: &dyn QueryView,
        latitude: f64,
        longitude: f64,
        language: Option<&str>,
        units: Option<&str>,
    ) -> Result<FetchOutcome, QueryError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let request = ForecastRequest {
            latitude,
            longitude,
            language: language.map(str::to_string),
            units: units.map(str::to_string),
            hours: FORECAST_HOUR,
        };

        let result = self.provider.get_forecast(&request).await;

        let prepared = result.map(|response| {
            let sorted = sort_chronologically(response.forecast);
            let current = select_closest(&sorted, self.date_provider.now()).copied();
            let address = format_location(
                &response.city_name,
                &response.country_code,
                LatLng::new(latitude, longitude),
            );
            (current, sorted, response.timezone, address)
        });

        // Check and apply as one step; a newer fetch either fails our check or renders after us.
        let _render = self.render.lock();
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, latitude, longitude, "dropping superseded forecast response");
            return Ok(FetchOutcome::Superseded);
        }

        let (current, sorted, timezone, address) = match prepared {
            Ok((Some(current), sorted, timezone, address)) => (current, sorted, timezone, address),
            Ok((None, ..)) => {
                tracing::warn!(latitude, longitude, "provider returned an empty forecast");
                view.display_get_uv_index_error();
                return Err(QueryError::EmptyForecast);
            }
            Err(e) => {
                tracing::warn!(latitude, longitude, "failed to get forecast: {e:#}");
                view.display_get_uv_index_error();
                return Err(QueryError::FetchFailure(Some(format!("{e:#}"))));
            }
        };

        tracing::info!(
            %address,
            uv_index = current.uv_index,
            at = %current.datetime,
            entries = sorted.len(),
            "forecast received"
        );

        self.state.lock().set_forecast(timezone.clone(), current, sorted.clone(), address.clone());

        view.display_uv_index(&current);
        view.display_uv_index_forecast(&sorted, &timezone);
        view.display_user_address(&address);
        view.display_protection_info(ProtectionBand::from_uv_index(current.uv_index));

        Ok(FetchOutcome::Displayed(current))
    }

    /// A location fix arrived: unsubscribe and fetch for the new coordinates.
    pub async fn on_location_received(
        &self,
        view: &dyn QueryView,
        lat_lng: LatLng,
    ) -> Result<FetchOutcome, QueryError> {
        self.state.lock().location = Some(lat_lng);
        self.stop_location_updates(view);

        self.get_forecast_uv_index(
            view,
            lat_lng.latitude,
            lat_lng.longitude,
            self.language.as_deref(),
            self.units.as_deref(),
        )
        .await
    }

    /// Result of the manual address search. `None` when the user cancelled.
    pub async fn on_address_selected(
        &self,
        view: &dyn QueryView,
        selection: AddressSelection,
    ) -> Result<Option<FetchOutcome>, QueryError> {
        let address = match selection {
            AddressSelection::Selected(address) => address,
            AddressSelection::Cancelled => {
                tracing::info!("the user canceled the place search operation");
                return Ok(None);
            }
        };

        self.stop_location_updates(view);
        {
            let mut state = self.state.lock();
            state.location = Some(address.lat_lng());
            state.location_search_state = LocationSearchState::Idle;
        }

        tracing::info!(place = %address.display_name(), "place search operation succeeded");

        self.get_forecast_uv_index(
            view,
            address.latitude,
            address.longitude,
            self.language.as_deref(),
            self.units.as_deref(),
        )
        .await
        .map(Some)
    }

    /// Returns true when the host should subscribe to location updates.
    pub fn request_location_updates(&self) -> bool {
        self.state.lock().apply(LocationEvent::UpdatesRequested)
    }

    /// Location settings must be changed by the user before updates can start.
    pub fn location_settings_need_resolution(&self) -> bool {
        self.state.lock().apply(LocationEvent::SettingsResolutionPending)
    }

    /// Returns true when a paused search should be resubscribed.
    pub fn resume(&self) -> bool {
        self.state.lock().apply(LocationEvent::Resumed)
    }

    /// Host went to the background: unsubscribe but keep the search state as it is.
    pub fn pause(&self, view: &dyn QueryView) {
        let current = self.state.lock().location_search_state;
        if current != LocationSearchState::SearchingLocation {
            tracing::debug!(?current, "pause: no active location updates");
            return;
        }
        view.stop_location_updates(current);
    }

    pub fn user_did_not_want_to_change_location_settings(&self, view: &dyn QueryView) -> QueryError {
        self.state.lock().apply(LocationEvent::SettingsDeclined);
        view.display_cant_detect_location_error();
        QueryError::LocationSettingsDeclined
    }

    pub fn user_clicked_install_button(&self, view: &dyn QueryView) {
        view.display_install_prompt(INSTALL_FROM_QUERY_FEATURE, REFERRER_FROM_QUERY_FEATURE);
    }

    pub fn user_clicked_about_button(&self, view: &dyn QueryView) {
        view.display_about_ui();
    }

    pub fn user_clicked_text_input_button(&self, view: &dyn QueryView) {
        view.start_places_auto_complete_ui();
    }

    pub fn get_place_auto_complete_failed(&self, view: &dyn QueryView) -> QueryError {
        view.display_get_auto_complete_place_error();
        QueryError::AutoCompleteFailure
    }

    pub fn state(&self) -> QueryViewState {
        self.state.lock().clone()
    }

    pub fn restore_state(&self, state: QueryViewState) {
        *self.state.lock() = state;
    }

    /// Redraw a restored state. Returns false when there is nothing to show.
    pub fn render_state(&self, view: &dyn QueryView) -> bool {
        let state = self.state();
        let Some(current) = state.current_uv_index else {
            return false;
        };

        view.display_uv_index(&current);
        view.display_uv_index_forecast(&state.uv_index_forecast, &state.timezone);
        if let Some(address) = &state.address {
            view.display_user_address(address);
        }
        view.display_protection_info(ProtectionBand::from_uv_index(current.uv_index));
        true
    }

    fn stop_location_updates(&self, view: &dyn QueryView) {
        let searching =
            self.state.lock().location_search_state == LocationSearchState::SearchingLocation;
        if !searching {
            tracing::debug!("stop_location_updates: updates never requested, no-op");
            return;
        }

        view.stop_location_updates(LocationSearchState::Idle);
        self.state.lock().apply(LocationEvent::LocationReceived);
    }
}
