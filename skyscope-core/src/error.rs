//! Error types shared across the SkyScope core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("City not found")]
    CityNotFound,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WeatherError {
    /// User-facing message for display in the render layer.
    ///
    /// Every failure collapses into one of two strings: a non-success
    /// response from the weather endpoints reads as "City not found",
    /// everything else as the generic fetch error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CityNotFound => "City not found",
            Self::Network(_) | Self::Parse(_) | Self::Config(_) => "Failed to fetch weather data",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_not_found_has_specific_message() {
        assert_eq!(WeatherError::CityNotFound.user_message(), "City not found");
    }

    #[test]
    fn other_errors_collapse_to_generic_message() {
        let parse = WeatherError::Parse("bad json".into());
        assert_eq!(parse.user_message(), "Failed to fetch weather data");

        let config = WeatherError::Config("no key".into());
        assert_eq!(config.user_message(), "Failed to fetch weather data");
    }
}
