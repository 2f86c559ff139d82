//! Plain-text rendering of suggestions and the weather card.

use std::fmt::{self, Write};

use chrono::NaiveDateTime;
use serde::Serialize;
use weather_lookup_core::{
    AppState, Classification, IconCategory, LocationOption, SearchOutcome, WeatherSnapshot,
    scenery,
};

pub const LOADING: &str = "Scanning atmosphere...";
pub const NO_SELECTION: &str = "No location selected. Search for a city to begin.";

pub fn icon_glyph(icon: IconCategory) -> &'static str {
    match icon {
        IconCategory::Sun => "☀",
        IconCategory::Moon => "☾",
        IconCategory::Cloud => "☁",
        IconCategory::Fog => "🌫",
        IconCategory::Drizzle => "🌦",
        IconCategory::Rain => "🌧",
        IconCategory::Snow => "❄",
        IconCategory::Thunderstorm => "⛈",
    }
}

/// Round to whole degrees, halves going up.
pub fn whole_degrees(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

fn observed(t: &NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

pub fn error_line(msg: &str) -> String {
    format!("⚠ {msg}")
}

pub fn suggestions(outcome: &SearchOutcome) -> Result<String, fmt::Error> {
    let opts = match outcome {
        SearchOutcome::Inactive => {
            return Ok("Type part of a country or capital name to search.\n".to_string());
        }
        SearchOutcome::Matches(opts) if opts.is_empty() => {
            return Ok("No location found.\n".to_string());
        }
        SearchOutcome::Matches(opts) => opts,
    };

    let mut out = String::new();
    for opt in opts {
        let sub = opt.sub_label.as_deref().unwrap_or_default();
        writeln!(out, "{:<32} {sub:<32} [{}]", opt.display_name, opt.coord)?;
    }
    Ok(out)
}

/// Card for the current state: loading, empty, or the selected location's weather.
pub fn card(state: &AppState) -> Result<String, fmt::Error> {
    if state.is_loading_weather() {
        return Ok(format!("{LOADING}\n"));
    }

    match (state.selection(), state.weather(), state.classification()) {
        (Some(location), Some(weather), Some(class)) => {
            let mut out = String::new();
            write_weather_card(&mut out, location, weather, class)?;
            Ok(out)
        }
        _ => Ok(format!("{NO_SELECTION}\n")),
    }
}

fn write_weather_card(
    out: &mut impl Write,
    location: &LocationOption,
    w: &WeatherSnapshot,
    class: Classification,
) -> fmt::Result {
    writeln!(out, "{}", location.display_name)?;
    if let Some(sub) = &location.sub_label {
        writeln!(out, "  {}", sub.to_uppercase())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {}  {}°  {}",
        icon_glyph(class.icon),
        whole_degrees(w.temperature_c),
        class.description.to_uppercase()
    )?;
    writeln!(out, "  Feels like {}°", whole_degrees(w.apparent_temperature_c))?;
    writeln!(out)?;
    writeln!(out, "  {:<14} {} %", "Humidity", w.humidity_pct)?;
    writeln!(out, "  {:<14} {} km/h", "Wind", w.wind_kph)?;
    writeln!(out, "  {:<14} {} mm", "Precipitation", w.precipitation_mm)?;
    if let Some(t) = &w.observed_at {
        writeln!(out, "  {:<14} {}", "Observed", observed(t))?;
    }
    if let Some(url) = scenery::image_url(location) {
        writeln!(out, "  {:<14} {url}", "Scenery")?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct CardJson<'a> {
    location: &'a LocationOption,
    weather: &'a WeatherSnapshot,
    classification: Classification,
}

pub fn json(state: &AppState) -> anyhow::Result<String> {
    let (Some(location), Some(weather), Some(classification)) =
        (state.selection(), state.weather(), state.classification())
    else {
        anyhow::bail!("No weather available for the current selection");
    };

    let body = CardJson { location, weather, classification };
    Ok(serde_json::to_string_pretty(&body)?)
}
