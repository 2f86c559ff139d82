//! Core library for the `weather-lookup` CLI.
//!
//! This crate defines:
//! - Shared domain models (location records and options, weather snapshots)
//! - Weather code classification and location suggestion matching
//! - The selection/fetch state machine and the session that drives it
//! - Data sources for the country dataset and current weather
//! - Configuration handling
//!
//! It is used by `weather-lookup-cli`, but has no terminal dependencies of its own.

pub mod classify;
pub mod config;
pub mod error;
pub mod matcher;
pub mod model;
pub mod provider;
pub mod scenery;
pub mod session;
pub mod state;

pub use classify::{Classification, IconCategory, classify};
pub use config::Config;
pub use error::FetchError;
pub use matcher::{DEFAULT_SUGGESTION_LIMIT, SearchOutcome, match_locations};
pub use model::{Coordinates, LocationOption, LocationRecord, WeatherSnapshot};
pub use provider::{LocationSource, WeatherSource, sources_from_config};
pub use session::{Session, WeatherFetch};
pub use state::{AppState, Event, LocationsState, SelectionTicket, WeatherState};
