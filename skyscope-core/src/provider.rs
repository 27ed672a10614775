use crate::{
    Config,
    error::WeatherError,
    model::{CitySuggestion, CurrentConditions, Forecast, WeatherBundle},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Up to 5 candidate locations for a partial city name.
    async fn search_city(&self, query: &str) -> Result<Vec<CitySuggestion>, WeatherError>;

    /// Current conditions for a resolved city string.
    async fn current(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// 5-day/3-hour forecast for a resolved city string.
    async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError>;
}

/// Fetch current conditions and the forecast concurrently.
///
/// Both requests must succeed for the fetch to succeed; if either fails the
/// whole operation fails and neither partial result is exposed.
pub async fn fetch_weather(
    provider: &dyn WeatherProvider,
    city: &str,
) -> Result<WeatherBundle, WeatherError> {
    let (current, forecast) = tokio::try_join!(provider.current(city), provider.forecast(city))?;

    Ok(WeatherBundle { current, forecast })
}

/// Construct the OpenWeather-backed provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.resolved_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skyscope configure` and enter your OpenWeather API key, \
             or set the OPENWEATHER_API_KEY environment variable."
        )
    })?;

    Ok(Arc::new(OpenWeatherProvider::new(api_key, config.units().to_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
