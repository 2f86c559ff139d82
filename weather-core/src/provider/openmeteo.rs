use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::FetchError,
    model::{Coordinates, WeatherSnapshot},
};

use super::{WeatherSource, get_json};

const ENDPOINT: &str = "open-meteo";

/// Current-condition fields requested on every call.
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,\
precipitation,rain,showers,snowfall,weather_code,cloud_cover,wind_speed_10m";

/// Current weather from Open-Meteo. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoProvider {
    #[instrument(skip(self), fields(lat = coord.lat, lng = coord.lng))]
    async fn fetch_current(&self, coord: Coordinates) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/forecast", self.base_url.trim_end_matches('/'));
        let request = self.http.get(url).query(&[
            ("latitude", coord.lat.to_string()),
            ("longitude", coord.lng.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
        ]);

        let parsed: OmResponse = get_json(ENDPOINT, request).await?;
        debug!(code = parsed.current.weather_code, "current weather decoded");

        Ok(parsed.current.into_snapshot())
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: Option<String>,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    is_day: u8,
    precipitation: f64,
    rain: Option<f64>,
    showers: Option<f64>,
    snowfall: Option<f64>,
    weather_code: i64,
    cloud_cover: Option<f64>,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: OmCurrent,
}

fn parse_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

impl OmCurrent {
    fn into_snapshot(self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: self.temperature_2m,
            apparent_temperature_c: self.apparent_temperature,
            humidity_pct: self.relative_humidity_2m,
            wind_kph: self.wind_speed_10m,
            precipitation_mm: self.precipitation,
            weather_code: self.weather_code,
            is_day: self.is_day != 0,
            cloud_cover_pct: self.cloud_cover,
            rain_mm: self.rain,
            showers_mm: self.showers,
            snowfall_cm: self.snowfall,
            observed_at: self.time.as_deref().and_then(parse_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_fields_cover_consumed_ones() {
        for field in [
            "temperature_2m",
            "apparent_temperature",
            "relative_humidity_2m",
            "wind_speed_10m",
            "precipitation",
            "weather_code",
            "is_day",
        ] {
            assert!(CURRENT_FIELDS.split(',').any(|f| f == field), "{field} missing");
        }
        assert_eq!(CURRENT_FIELDS.split(',').count(), 11);
    }

    #[test]
    fn current_block_maps_to_snapshot() {
        let raw: OmResponse = serde_json::from_value(serde_json::json!({
            "latitude": 48.86,
            "longitude": 2.35,
            "current": {
                "time": "2024-06-01T21:15",
                "interval": 900,
                "temperature_2m": 17.4,
                "relative_humidity_2m": 68,
                "apparent_temperature": 16.9,
                "is_day": 0,
                "precipitation": 0.2,
                "rain": 0.2,
                "showers": 0.0,
                "snowfall": 0.0,
                "weather_code": 61,
                "cloud_cover": 90,
                "wind_speed_10m": 11.3
            }
        }))
        .expect("valid payload");

        let snap = raw.current.into_snapshot();
        assert_eq!(snap.temperature_c, 17.4);
        assert_eq!(snap.humidity_pct, 68.0);
        assert_eq!(snap.weather_code, 61);
        assert!(!snap.is_day);
        assert_eq!(snap.cloud_cover_pct, Some(90.0));
        assert_eq!(snap.observed_at, parse_time("2024-06-01T21:15"));
        assert!(snap.observed_at.is_some());
    }

    #[test]
    fn unparseable_time_is_dropped() {
        assert_eq!(parse_time("yesterday"), None);
        assert!(parse_time("2024-06-01T21:15:30").is_some());
    }
}
