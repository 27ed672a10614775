use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate location returned by the geocoding lookup.
///
/// Ephemeral: discarded once the user selects one or edits the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl CitySuggestion {
    /// Display label, also used as the query string when selected:
    /// "name, state, country" when a region is present, "name, country" otherwise.
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

/// Present-moment weather snapshot for a resolved location.
///
/// Replaced wholesale on each successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub wind_speed_mps: f64,
}

/// One forecast step at 3-hour granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub condition: String,
    pub icon: String,
}

/// Time-ordered forecast at 3-hour steps, replaced wholesale on each fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    const DAILY_STEP: usize = 8;
    const DAILY_DAYS: usize = 5;

    /// Sample every 8th entry (~24h apart) to produce the 5-day view.
    pub fn daily_view(&self) -> Vec<&ForecastEntry> {
        self.entries
            .iter()
            .step_by(Self::DAILY_STEP)
            .take(Self::DAILY_DAYS)
            .collect()
    }
}

/// Current conditions and forecast fetched together; neither is ever
/// exposed without the other.
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub current: CurrentConditions,
    pub forecast: Forecast,
}
