use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{CitySuggestion, CurrentConditions, Forecast, ForecastEntry},
};

use super::WeatherProvider;

/// Production OpenWeather endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Result cap passed to the geocoding endpoint.
const SUGGESTION_LIMIT: u32 = 5;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    units: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, units: String) -> Self {
        Self::with_base_url(api_key, units, DEFAULT_BASE_URL.to_string())
    }

    /// Same provider against a different endpoint root, e.g. a mock server.
    pub fn with_base_url(api_key: String, units: String, base_url: String) -> Self {
        Self {
            api_key,
            units,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_suggestions(&self, query: &str) -> Result<Vec<CitySuggestion>, WeatherError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let limit = SUGGESTION_LIMIT.to_string();

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "geocoding request rejected");
            return Err(WeatherError::CityNotFound);
        }

        let parsed: Vec<GeoDirectEntry> = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("geocoding JSON: {e}")))?;

        Ok(parsed.into_iter().map(CitySuggestion::from).collect())
    }

    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "current conditions request rejected");
            return Err(WeatherError::CityNotFound);
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("current conditions JSON: {e}")))?;

        let (condition, description, icon) = match parsed.weather.into_iter().next() {
            Some(w) => (w.main, w.description, w.icon),
            None => ("Unknown".to_string(), "Unknown".to_string(), String::new()),
        };

        Ok(CurrentConditions {
            city: parsed.name,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            condition,
            description,
            icon,
            wind_speed_mps: parsed.wind.speed,
        })
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "forecast request rejected");
            return Err(WeatherError::CityNotFound);
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("forecast JSON: {e}")))?;

        let entries = parsed
            .list
            .into_iter()
            .map(|e| {
                let (condition, icon) = match e.weather.into_iter().next() {
                    Some(w) => (w.main, w.icon),
                    None => ("Unknown".to_string(), String::new()),
                };

                ForecastEntry {
                    timestamp: unix_to_utc(e.dt).unwrap_or_else(Utc::now),
                    temperature_c: e.main.temp,
                    condition,
                    icon,
                }
            })
            .collect();

        Ok(Forecast { entries })
    }
}

#[derive(Debug, Deserialize)]
struct GeoDirectEntry {
    name: String,
    state: Option<String>,
    country: String,
    lat: f64,
    lon: f64,
}

impl From<GeoDirectEntry> for CitySuggestion {
    fn from(e: GeoDirectEntry) -> Self {
        CitySuggestion {
            name: e.name,
            state: e.state,
            country: e.country,
            lat: e.lat,
            lon: e.lon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastWeather {
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn search_city(&self, query: &str) -> Result<Vec<CitySuggestion>, WeatherError> {
        self.fetch_suggestions(query).await
    }

    async fn current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        self.fetch_current(city).await
    }

    async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        self.fetch_forecast(city).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
