use uvindex_core::{LocationSearchState, ProtectionBand, QueryView, Weather};

use crate::render;

/// Writes view directives to the terminal. Results go to stdout, notifications to stderr.
#[derive(Debug, Default)]
pub struct TerminalView;

impl QueryView for TerminalView {
    fn display_uv_index(&self, weather: &Weather) {
        println!("{}", render::headline(weather));
    }

    fn display_uv_index_forecast(&self, forecast: &[Weather], timezone: &str) {
        println!();
        println!("Next {} hours ({timezone}):", forecast.len());
        for row in render::forecast_rows(forecast, timezone) {
            println!("  {row}");
        }
        println!();
    }

    fn display_user_address(&self, address: &str) {
        println!("Location: {address}");
    }

    fn display_protection_info(&self, band: ProtectionBand) {
        println!("{}: {}", band.label(), band.recommended_protection());
        println!("{}", band.info());
    }

    fn display_get_uv_index_error(&self) {
        eprintln!("Could not get the UV index. Please try again later.");
    }

    fn display_about_ui(&self) {
        println!(
            "{} {}\n{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION")
        );
    }

    fn start_places_auto_complete_ui(&self) {
        eprintln!("Looking up places...");
    }

    fn display_install_prompt(&self, request_code: i32, referrer: &str) {
        tracing::debug!(request_code, referrer, "install prompt");
        println!("Install the command permanently with: cargo install uvindex-cli");
    }

    fn display_cant_detect_location_error(&self) {
        eprintln!("Can't detect your location. Try searching for a place instead.");
    }

    fn display_get_auto_complete_place_error(&self) {
        eprintln!("Could not find a matching place.");
    }

    fn stop_location_updates(&self, new_state: LocationSearchState) {
        tracing::debug!(?new_state, "location updates stopped");
    }
}
