use crate::{
    Config,
    error::{FetchError, truncate_body},
    model::{Coordinates, LocationRecord, WeatherSnapshot},
    provider::{openmeteo::OpenMeteoProvider, restcountries::RestCountriesProvider},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, sync::Arc, time::Duration};
use tracing::debug;

pub mod openmeteo;
pub mod restcountries;

/// Source of the full location dataset, loaded once per session.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, FetchError>;
}

/// Source of current weather conditions for a coordinate.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, coord: Coordinates) -> Result<WeatherSnapshot, FetchError>;
}

/// Send `request`, require a 2xx status and decode the body as JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(
    endpoint: &'static str,
    request: RequestBuilder,
) -> Result<T, FetchError> {
    let res = request.send().await.map_err(|source| FetchError::Request { endpoint, source })?;

    let status = res.status();
    let body = res.text().await.map_err(|source| FetchError::Request { endpoint, source })?;
    debug!(endpoint, %status, bytes = body.len(), "response received");

    if !status.is_success() {
        return Err(FetchError::Status { endpoint, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|source| FetchError::Decode { endpoint, source })
}

/// Build the shared HTTP client from config.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("weather-lookup/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Construct both data sources from config, sharing one HTTP client.
pub fn sources_from_config(
    config: &Config,
) -> anyhow::Result<(Arc<dyn LocationSource>, Arc<dyn WeatherSource>)> {
    config.validate()?;
    let http = http_client(config)?;

    let locations = RestCountriesProvider::new(config.countries_url.clone(), http.clone());
    let weather = OpenMeteoProvider::new(config.weather_url.clone(), http);

    Ok((Arc::new(locations), Arc::new(weather)))
}
