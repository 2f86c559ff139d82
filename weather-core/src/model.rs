use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// One country's reference entry, as loaded from the country dataset.
///
/// Records are immutable once loaded; the whole set is held for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub country_name: String,
    pub official_name: Option<String>,
    pub country_code: Option<String>,
    /// Primary capital, if the country has one.
    pub capital: Option<String>,
    /// Geometric centroid of the country.
    pub country_coord: Coordinates,
    /// Precise capital location, when the dataset knows it.
    pub capital_coord: Option<Coordinates>,
    pub flag_url: String,
}

impl LocationRecord {
    /// Coordinates used for the capital: its own location if known, otherwise the
    /// country centroid.
    pub fn capital_or_centroid(&self) -> Coordinates {
        self.capital_coord.unwrap_or(self.country_coord)
    }
}

/// A user-selectable search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationOption {
    pub display_name: String,
    pub sub_label: Option<String>,
    pub coord: Coordinates,
    pub flag_url: String,
}

impl fmt::Display for LocationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_label {
            Some(sub) => write!(f, "{} ({sub})", self.display_name),
            None => f.write_str(&self.display_name),
        }
    }
}

/// Current conditions at one coordinate, at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_kph: f64,
    pub precipitation_mm: f64,
    pub weather_code: i64,
    pub is_day: bool,
    pub cloud_cover_pct: Option<f64>,
    pub rain_mm: Option<f64>,
    pub showers_mm: Option<f64>,
    pub snowfall_cm: Option<f64>,
    /// Local observation time reported by the provider.
    pub observed_at: Option<NaiveDateTime>,
}
