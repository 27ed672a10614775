//! Terminal rendering of the application state.
//!
//! Purely reactive: everything printed here is derived from [`App`] fields.

use chrono::{DateTime, Local, Timelike};

use skyscope_core::{App, CurrentConditions, Forecast, RecentSearches, Theme};

pub fn greeting(now: DateTime<Local>) -> &'static str {
    match now.hour() {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=19 => "Good evening",
        _ => "Good night",
    }
}

/// Glyph for an OpenWeather condition category. Clear skies follow the
/// theme, mirroring the sun/moon split of the app's two looks.
pub fn condition_glyph(condition: &str, theme: Theme) -> &'static str {
    match condition {
        "Clear" => match theme {
            Theme::Dark => "☾",
            Theme::Light => "☀",
        },
        "Clouds" => "☁",
        "Rain" | "Drizzle" => "🌧",
        "Thunderstorm" => "⛈",
        "Snow" => "❄",
        "Mist" | "Fog" | "Haze" | "Smoke" => "🌫",
        _ => "·",
    }
}

pub fn render_current(current: &CurrentConditions, theme: Theme) -> String {
    let glyph = condition_glyph(&current.condition, theme);

    format!(
        "{glyph}  {city} — {description}\n   {temp:.0}°C  (feels like {feels:.0}°C)\n   \
         Humidity {humidity}% · Wind {wind:.1} m/s · Pressure {pressure} hPa",
        city = current.city,
        description = current.description,
        temp = current.temperature_c,
        feels = current.feels_like_c,
        humidity = current.humidity_pct,
        wind = current.wind_speed_mps,
        pressure = current.pressure_hpa,
    )
}

pub fn render_forecast(forecast: &Forecast, theme: Theme) -> String {
    let mut out = String::from("5-Day Forecast");

    for entry in forecast.daily_view() {
        let glyph = condition_glyph(&entry.condition, theme);
        out.push_str(&format!(
            "\n   {day}  {glyph}  {temp:.0}°C  {condition}",
            day = entry.timestamp.format("%a"),
            temp = entry.temperature_c,
            condition = entry.condition,
        ));
    }

    out
}

pub fn recent_line(recents: &RecentSearches) -> String {
    let cities: Vec<&str> = recents.iter().collect();
    format!("Recent: {}", cities.join(" · "))
}

pub fn render_app(app: &App) {
    if let Some(error) = app.error() {
        println!("⚠ {error}");
        return;
    }

    let theme = app.theme();
    if let Some(current) = app.conditions() {
        println!("{}", render_current(current, theme));
    }
    if let Some(forecast) = app.forecast() {
        println!("{}", render_forecast(forecast, theme));
    }
}
