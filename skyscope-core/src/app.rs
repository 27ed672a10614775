//! Application root state.
//!
//! Holds everything the render layer reads: the latest committed conditions
//! and forecast, the last error, the recent searches and the theme flag.
//! State changes only through the operations below.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    model::{CurrentConditions, Forecast},
    provider::{self, WeatherProvider},
    recent::RecentSearches,
};

/// Render theme flag. Dark is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

pub struct App {
    provider: Arc<dyn WeatherProvider>,
    conditions: Option<CurrentConditions>,
    forecast: Option<Forecast>,
    error: Option<String>,
    last_city: Option<String>,
    recents: RecentSearches,
    theme: Theme,
    loading: bool,
}

impl App {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            conditions: None,
            forecast: None,
            error: None,
            last_city: None,
            recents: RecentSearches::new(),
            theme: Theme::default(),
            loading: false,
        }
    }

    pub fn provider(&self) -> Arc<dyn WeatherProvider> {
        Arc::clone(&self.provider)
    }

    /// Fetch current conditions and forecast for a city.
    ///
    /// Commits both results together on success and records the city in the
    /// recent searches. On failure only the error message changes; previously
    /// committed conditions and forecast stay visible.
    pub async fn fetch_weather(&mut self, city: &str) {
        self.loading = true;
        self.error = None;

        debug!(%city, "fetching weather");
        match provider::fetch_weather(self.provider.as_ref(), city).await {
            Ok(bundle) => {
                info!(city = %bundle.current.city, "weather updated");
                self.conditions = Some(bundle.current);
                self.forecast = Some(bundle.forecast);
                self.last_city = Some(city.to_string());
                self.recents.record(city);
            }
            Err(e) => {
                debug!(%city, error = %e, "weather fetch failed");
                self.error = Some(e.user_message().to_string());
            }
        }

        self.loading = false;
    }

    /// Re-run the fetch for the last successfully searched city, if any.
    pub async fn refresh(&mut self) {
        if let Some(city) = self.last_city.clone() {
            self.fetch_weather(&city).await;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn conditions(&self) -> Option<&CurrentConditions> {
        self.conditions.as_ref()
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    pub fn recents(&self) -> &RecentSearches {
        &self.recents
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
