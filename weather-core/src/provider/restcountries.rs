use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    error::FetchError,
    model::{Coordinates, LocationRecord},
};

use super::{LocationSource, get_json};

const ENDPOINT: &str = "restcountries";
const FIELDS: &str = "name,latlng,cca2,flags,capital,capitalInfo";

/// Country reference dataset from REST Countries (v3.1).
#[derive(Debug, Clone)]
pub struct RestCountriesProvider {
    base_url: String,
    http: Client,
}

impl RestCountriesProvider {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[async_trait]
impl LocationSource for RestCountriesProvider {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, FetchError> {
        let url = format!("{}/all", self.base_url.trim_end_matches('/'));
        let request = self.http.get(url).query(&[("fields", FIELDS)]);

        let raw: Vec<serde_json::Value> = get_json(ENDPOINT, request).await?;
        let total = raw.len();
        let records = decode_dataset(raw);

        info!(total, kept = records.len(), "location dataset loaded");
        Ok(records)
    }
}

/// Decode each entry on its own so one malformed country cannot sink the
/// whole dataset.
fn decode_dataset(raw: Vec<serde_json::Value>) -> Vec<LocationRecord> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<RcCountry>(value) {
            Ok(country) => country.into_record(),
            Err(err) => {
                warn!(index, error = %err, "skipping undecodable country entry");
                None
            }
        })
        .collect()
}

// Any upstream field may be absent or `null`.

#[derive(Debug, Default, Deserialize)]
struct RcName {
    common: Option<String>,
    official: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RcFlags {
    svg: Option<String>,
    png: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RcCapitalInfo {
    latlng: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RcCountry {
    name: Option<RcName>,
    cca2: Option<String>,
    latlng: Option<Vec<f64>>,
    flags: Option<RcFlags>,
    capital: Option<Vec<Option<String>>>,
    capital_info: Option<RcCapitalInfo>,
}

fn pair(v: Option<&[f64]>) -> Option<Coordinates> {
    match v? {
        [lat, lng] => Some(Coordinates::new(*lat, *lng)),
        _ => None,
    }
}

impl RcCountry {
    fn into_record(self) -> Option<LocationRecord> {
        let name = self.name.unwrap_or_default();
        let country_name = name.common.as_deref().unwrap_or_default().trim().to_string();
        if country_name.is_empty() {
            warn!(cca2 = ?self.cca2, "skipping country without a common name");
            return None;
        }

        let Some(country_coord) = pair(self.latlng.as_deref()) else {
            warn!(country = %country_name, "skipping country without centroid coordinates");
            return None;
        };

        let capital = self
            .capital
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|c| c.trim().to_string())
            .find(|c| !c.is_empty());
        let capital_coord = match &capital {
            Some(_) => self.capital_info.and_then(|info| pair(info.latlng.as_deref())),
            None => None,
        };

        let flags = self.flags.unwrap_or_default();
        let flag_url = flags.svg.or(flags.png).unwrap_or_default();

        Some(LocationRecord {
            country_name,
            official_name: name.official,
            country_code: self.cca2,
            capital,
            country_coord,
            capital_coord,
            flag_url,
        })
    }
}
