use std::sync::Arc;

use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use tracing::debug;

use skyscope_core::{App, CitySuggestion, Config, SuggestionService, provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyscope", version, about = "SkyScope weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current conditions and the 5-day forecast for a city, then exit.
    Show {
        /// City name, e.g. "Paris" or "Springfield, Illinois, US".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show_once(&city).await,
            None => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show_once(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let mut app = App::new(provider);

    println!("Loading weather data...");
    app.fetch_weather(city).await;
    render::render_app(&app);

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut app = App::new(Arc::clone(&provider));
    let mut search = SuggestionService::new(provider);

    println!("{}! Check the weather anywhere.", render::greeting(chrono::Local::now()));

    loop {
        if !app.recents().is_empty() {
            println!("{}", render::recent_line(app.recents()));
        }

        let input = match Text::new("City:")
            .with_help_message("city name (min 3 chars) · r refresh · t theme · q quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };
        let input = input.trim().to_string();

        match input.as_str() {
            "" => continue,
            "q" => break,
            "t" => {
                app.toggle_theme();
                continue;
            }
            "r" => {
                if app.last_city().is_none() {
                    println!("Nothing to refresh yet.");
                    continue;
                }
                println!("Loading weather data...");
                app.refresh().await;
                render::render_app(&app);
                continue;
            }
            _ => {}
        }

        // One prompt submission is one input event for the debounced lookup.
        search.on_input(&input);
        let candidates = search.settled().await;

        let city = if candidates.is_empty() {
            input
        } else {
            match pick_city(&input, &candidates)? {
                Some(city) => city,
                None => continue,
            }
        };
        debug!(%city, "city selected");

        println!("Loading weather data...");
        app.fetch_weather(&city).await;
        render::render_app(&app);
    }

    Ok(())
}

/// Offer the geocoding candidates, plus searching the typed text as-is.
/// Returns `None` when the user backs out of the selection.
fn pick_city(typed: &str, candidates: &[CitySuggestion]) -> anyhow::Result<Option<String>> {
    let mut options: Vec<String> = candidates.iter().map(CitySuggestion::label).collect();
    options.push(format!("Search \"{typed}\" as typed"));
    let as_typed = options.len() - 1;

    match Select::new("Did you mean:", options).raw_prompt() {
        Ok(selection) if selection.index == as_typed => Ok(Some(typed.to_string())),
        Ok(selection) => Ok(Some(selection.value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
