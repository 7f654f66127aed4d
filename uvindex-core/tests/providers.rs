//! Integration tests for the forecast providers using wiremock.

use uvindex_core::{
    ForecastRequest, WeatherProvider,
    provider::{open_meteo::OpenMeteoProvider, weatherbit::WeatherbitProvider},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(language: Option<&str>, units: Option<&str>) -> ForecastRequest {
    ForecastRequest {
        latitude: 41.0,
        longitude: 29.0,
        language: language.map(str::to_string),
        units: units.map(str::to_string),
        hours: 24,
    }
}

#[tokio::test]
async fn weatherbit_maps_hourly_forecast() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast/hourly"))
        .and(query_param("key", "SECRET"))
        .and(query_param("hours", "24"))
        .and(query_param("lang", "tr"))
        .and(query_param("units", "M"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city_name": "Istanbul",
            "country_code": "TR",
            "timezone": "Europe/Istanbul",
            "lat": 41.0,
            "lon": 29.0,
            "data": [
                { "ts": 1718971200, "uv": 5.2, "timestamp_utc": "2024-06-21T12:00:00" },
                { "ts": 1718967600, "uv": 4.1, "timestamp_utc": "2024-06-21T11:00:00" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let provider = WeatherbitProvider::with_base_url("SECRET".into(), mock_server.uri());
    let response = provider.get_forecast(&request(Some("tr"), Some("M"))).await.unwrap();

    assert_eq!(response.city_name, "Istanbul");
    assert_eq!(response.country_code, "TR");
    assert_eq!(response.timezone, "Europe/Istanbul");
    assert_eq!(response.forecast.len(), 2);
    // provider order is preserved; sorting is the presenter's job
    assert_eq!(response.forecast[0].datetime.timestamp(), 1718971200);
    assert_eq!(response.forecast[0].uv_index, 5.2);
    assert_eq!(response.forecast[1].uv_index, 4.1);
}

#[tokio::test]
async fn weatherbit_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast/hourly"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"error":"API key not valid"}"#))
        .mount(&mock_server)
        .await;

    let provider = WeatherbitProvider::with_base_url("BAD".into(), mock_server.uri());
    let err = provider.get_forecast(&request(None, None)).await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("403"), "{msg}");
    assert!(msg.contains("API key not valid"), "{msg}");
}

#[tokio::test]
async fn weatherbit_no_content_is_an_empty_forecast() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast/hourly"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let provider = WeatherbitProvider::with_base_url("KEY".into(), mock_server.uri());
    let response = provider.get_forecast(&request(None, None)).await.unwrap();
    assert!(response.forecast.is_empty());
}

#[tokio::test]
async fn open_meteo_skips_missing_readings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("hourly", "uv_index"))
        .and(query_param("forecast_hours", "24"))
        .and(query_param("timeformat", "unixtime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 41.0,
            "longitude": 29.0,
            "timezone": "Europe/Istanbul",
            "hourly": {
                "time": [1718967600, 1718971200, 1718974800],
                "uv_index": [4.1, null, 6.3]
            }
        })))
        .mount(&mock_server)
        .await;

    let provider = OpenMeteoProvider::with_base_url(mock_server.uri());
    let response = provider.get_forecast(&request(None, None)).await.unwrap();

    assert_eq!(response.timezone, "Europe/Istanbul");
    assert!(response.city_name.is_empty());
    assert_eq!(response.forecast.len(), 2);
    assert_eq!(response.forecast[1].uv_index, 6.3);
    assert_eq!(response.forecast[1].datetime.timestamp(), 1718974800);
}

#[tokio::test]
async fn open_meteo_malformed_json_is_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"hourly\": 3}"))
        .mount(&mock_server)
        .await;

    let provider = OpenMeteoProvider::with_base_url(mock_server.uri());
    let err = provider.get_forecast(&request(None, None)).await.unwrap_err();
    assert!(err.to_string().contains("Failed to parse Open-Meteo forecast JSON"));
}

#[tokio::test]
async fn open_meteo_invalid_timestamp_is_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "timezone": "UTC",
            "hourly": {
                "time": [1718967600, i64::MAX],
                "uv_index": [4.1, null]
            }
        })))
        .mount(&mock_server)
        .await;

    let provider = OpenMeteoProvider::with_base_url(mock_server.uri());
    let err = provider.get_forecast(&request(None, None)).await.unwrap_err();
    assert!(err.to_string().contains("invalid timestamp"), "{err}");
}
