use thiserror::Error;

/// Ways a query can end without showing a forecast.
///
/// Every variant is terminal for the request that produced it and is surfaced to
/// the user as a single transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("the forecast contained no UV index data")]
    EmptyForecast,

    #[error("failed to get the UV index forecast{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    FetchFailure(Option<String>),

    #[error("location settings were not changed, the location can not be detected")]
    LocationSettingsDeclined,

    #[error("failed to get a place from the address search")]
    AutoCompleteFailure,
}
