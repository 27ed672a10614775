//! Integration tests for the OpenWeather client against a mock server.

use skyscope_core::{WeatherError, WeatherProvider, provider::openweather::OpenWeatherProvider};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn provider_for(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("test-key".to_string(), "metric".to_string(), server.uri())
}

fn current_body(city: &str) -> serde_json::Value {
    json!({
        "name": city,
        "dt": 1_717_200_000,
        "main": {
            "temp": 21.4,
            "feels_like": 19.2,
            "humidity": 40,
            "pressure": 1013
        },
        "weather": [
            { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
        ],
        "wind": { "speed": 4.1, "deg": 230 }
    })
}

fn forecast_body(steps: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..steps)
        .map(|i| {
            json!({
                "dt": 1_717_200_000_i64 + (i as i64) * 10_800,
                "dt_txt": "2024-06-01 00:00:00",
                "main": { "temp": i as f64 },
                "weather": [ { "main": "Clouds", "icon": "03d" } ]
            })
        })
        .collect();

    json!({ "cod": "200", "cnt": steps, "list": list })
}

#[tokio::test]
async fn search_city_parses_suggestions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Lon"))
        .and(query_param("limit", "5"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "London", "country": "GB", "lat": 51.5074, "lon": -0.1278 },
            { "name": "London", "state": "Ontario", "country": "CA", "lat": 42.98, "lon": -81.24 }
        ])))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let suggestions = provider.search_city("Lon").await.expect("lookup should succeed");

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].label(), "London, GB");
    assert_eq!(suggestions[1].label(), "London, Ontario, CA");
}

#[tokio::test]
async fn current_parses_conditions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Paris")))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let current = provider.current("Paris").await.expect("fetch should succeed");

    assert_eq!(current.city, "Paris");
    assert_eq!(current.temperature_c, 21.4);
    assert_eq!(current.feels_like_c, 19.2);
    assert_eq!(current.humidity_pct, 40);
    assert_eq!(current.pressure_hpa, 1013);
    assert_eq!(current.condition, "Clear");
    assert_eq!(current.description, "clear sky");
    assert_eq!(current.icon, "01d");
    assert_eq!(current.wind_speed_mps, 4.1);
}

#[tokio::test]
async fn current_non_success_maps_to_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.current("Qwxyz").await.unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound));
    assert_eq!(err.user_message(), "City not found");
}

#[tokio::test]
async fn forecast_parses_all_entries_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(40)))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let forecast = provider.forecast("Paris").await.expect("fetch should succeed");

    assert_eq!(forecast.entries.len(), 40);
    assert!(forecast.entries.windows(2).all(|w| w[0].timestamp < w[1].timestamp));

    let daily: Vec<f64> = forecast.daily_view().iter().map(|e| e.temperature_c).collect();
    assert_eq!(daily, vec![0.0, 8.0, 16.0, 24.0, 32.0]);
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.current("Paris").await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
    assert_eq!(err.user_message(), "Failed to fetch weather data");
}
