use crate::{model::Weather, protection::ProtectionBand, state::LocationSearchState};

/// Request code passed along with the install prompt from the query screen.
pub const INSTALL_FROM_QUERY_FEATURE: i32 = 2;
/// Referrer reported by the install prompt from the query screen.
pub const REFERRER_FROM_QUERY_FEATURE: &str = "from_query_feature";

/// Rendering side of the query screen.
///
/// Every method is a one-way directive issued by [`crate::QueryPresenter`].
pub trait QueryView: Send + Sync {
    fn display_uv_index(&self, weather: &Weather);

    /// `forecast` is sorted chronologically; `timezone` is the IANA name reported by the provider.
    fn display_uv_index_forecast(&self, forecast: &[Weather], timezone: &str);

    fn display_user_address(&self, address: &str);

    fn display_protection_info(&self, band: ProtectionBand);

    fn display_get_uv_index_error(&self);

    fn display_about_ui(&self);

    fn start_places_auto_complete_ui(&self);

    fn display_install_prompt(&self, request_code: i32, referrer: &str);

    fn display_cant_detect_location_error(&self);

    fn display_get_auto_complete_place_error(&self);

    /// Unsubscribe from location updates; the search state becomes `new_state` afterwards.
    fn stop_location_updates(&self, new_state: LocationSearchState);
}
