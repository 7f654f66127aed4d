//! Core library for the `uvindex` app.
//!
//! This crate defines:
//! - Forecast models and closest-to-now selection
//! - The query presenter, its view contract and persisted view state
//! - Abstraction over UV forecast providers and the place search geocoder
//! - Configuration handling
//!
//! It is used by `uvindex-cli`, but any frontend able to implement [`QueryView`] can drive it.

pub mod clock;
pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod presenter;
pub mod protection;
pub mod provider;
pub mod selection;
pub mod state;
pub mod view;

pub use clock::{DateProvider, FixedDateProvider, SystemDateProvider};
pub use config::{Config, ProviderConfig};
pub use error::QueryError;
pub use geocode::{Geocoder, OpenMeteoGeocoder};
pub use model::{Address, AddressSelection, ForecastRequest, ForecastResponse, LatLng, Weather};
pub use presenter::{FetchOutcome, QueryPresenter};
pub use protection::ProtectionBand;
pub use provider::{ProviderId, WeatherProvider};
pub use state::{LocationSearchState, QueryViewState};
pub use view::QueryView;
