//! Integration tests for the place search geocoder using wiremock.

use uvindex_core::{Geocoder, OpenMeteoGeocoder, geocode::DEFAULT_MAX_RESULTS};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn search_maps_results_to_addresses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Fresno"))
        .and(query_param("count", "5"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {
                    "id": 5350937,
                    "name": "Fresno",
                    "latitude": 36.74773,
                    "longitude": -119.77237,
                    "country_code": "US",
                    "admin1": "California",
                    "country": "United States"
                },
                {
                    "id": 3687925,
                    "name": "Fresno",
                    "latitude": 4.15,
                    "longitude": -75.04,
                    "country": "Colombia"
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let geocoder = OpenMeteoGeocoder::with_base_url(mock_server.uri());
    let found = geocoder.search("Fresno", DEFAULT_MAX_RESULTS, Some("en")).await.unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].display_name(), "California, United States");
    assert_eq!(found[0].latitude, 36.74773);
    assert_eq!(found[1].admin_area, None);
    assert_eq!(found[1].display_name(), "Colombia");
}

#[tokio::test]
async fn search_without_results_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "generationtime_ms": 0.5
        })))
        .mount(&mock_server)
        .await;

    let geocoder = OpenMeteoGeocoder::with_base_url(mock_server.uri());
    let found = geocoder.search("Nowhereville", DEFAULT_MAX_RESULTS, None).await.unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn search_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Parameter count must be between 1 and 100."
        })))
        .mount(&mock_server)
        .await;

    let geocoder = OpenMeteoGeocoder::with_base_url(mock_server.uri());
    let err = geocoder.search("Fresno", 0, None).await.unwrap_err();

    assert!(err.to_string().contains("400"));
}
