//! Application state and its single update function.
//!
//! Two independent machines live side by side:
//! - locations: `Idle -> Loading -> Ready | Failed`, run once per session;
//! - weather: `NoSelection -> Loading -> Ready | Failed`, re-entered on every selection.
//!
//! Every selection gets a fresh [`SelectionTicket`]. A weather result is applied
//! only when its ticket is the one of the current selection; anything else is a
//! response for a superseded selection and is dropped.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    classify::{Classification, classify},
    error::FetchError,
    matcher::{SearchOutcome, match_locations},
    model::{LocationOption, LocationRecord, WeatherSnapshot},
};

pub const LOCATIONS_FAILED_MESSAGE: &str = "Failed to load global location database.";
pub const WEATHER_FAILED_MESSAGE: &str =
    "Unable to establish connection with local weather sensors.";

/// Identifies one selection. Strictly increasing within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionTicket(u64);

#[derive(Debug, Clone, Default)]
pub enum LocationsState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<[LocationRecord]>),
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WeatherState {
    #[default]
    NoSelection,
    Loading,
    Ready(WeatherSnapshot),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub ticket: SelectionTicket,
    pub option: LocationOption,
}

#[derive(Debug)]
pub enum Event {
    LocationsRequested,
    LocationsLoaded(Result<Vec<LocationRecord>, FetchError>),
    LocationSelected(LocationOption),
    WeatherLoaded { ticket: SelectionTicket, result: Result<WeatherSnapshot, FetchError> },
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    locations: LocationsState,
    selection: Option<Selection>,
    weather: WeatherState,
    error: Option<&'static str>,
    last_ticket: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state by one event.
    pub fn apply(mut self, event: Event) -> Self {
        match event {
            Event::LocationsRequested => {
                self.locations = LocationsState::Loading;
            }
            Event::LocationsLoaded(Ok(records)) => {
                info!(count = records.len(), "locations ready");
                self.locations = LocationsState::Ready(records.into());
                if self.error == Some(LOCATIONS_FAILED_MESSAGE) {
                    self.error = None;
                }
            }
            Event::LocationsLoaded(Err(err)) => {
                warn!(error = %err, "location dataset load failed");
                self.locations = LocationsState::Failed;
                self.error = Some(LOCATIONS_FAILED_MESSAGE);
            }
            Event::LocationSelected(option) => {
                return self.select(option).0;
            }
            Event::WeatherLoaded { ticket, result } => {
                if self.current_ticket() != Some(ticket) {
                    debug!(
                        ?ticket,
                        current = ?self.current_ticket(),
                        "discarding stale weather response"
                    );
                    return self;
                }
                match result {
                    Ok(snapshot) => {
                        self.weather = WeatherState::Ready(snapshot);
                    }
                    Err(err) => {
                        warn!(error = %err, "weather fetch failed");
                        self.weather = WeatherState::Failed;
                        self.error = Some(WEATHER_FAILED_MESSAGE);
                    }
                }
            }
        }
        self
    }

    /// Make `option` the current selection, dropping any previous weather and
    /// error, and return the ticket its weather response must carry.
    pub fn select(mut self, option: LocationOption) -> (Self, SelectionTicket) {
        self.last_ticket += 1;
        let ticket = SelectionTicket(self.last_ticket);
        debug!(?ticket, location = %option, "location selected");
        self.selection = Some(Selection { ticket, option });
        self.weather = WeatherState::Loading;
        self.error = None;
        (self, ticket)
    }

    pub fn current_ticket(&self) -> Option<SelectionTicket> {
        self.selection.as_ref().map(|s| s.ticket)
    }

    pub fn locations(&self) -> &LocationsState {
        &self.locations
    }

    /// Loaded dataset, or an empty slice before it is ready.
    pub fn dataset(&self) -> &[LocationRecord] {
        match &self.locations {
            LocationsState::Ready(records) => records,
            _ => &[],
        }
    }

    pub fn suggestions(&self, query: &str, limit: usize) -> SearchOutcome {
        match_locations(query, self.dataset(), limit)
    }

    pub fn selection(&self) -> Option<&LocationOption> {
        self.selection.as_ref().map(|s| &s.option)
    }

    pub fn weather_state(&self) -> &WeatherState {
        &self.weather
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        match &self.weather {
            WeatherState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn classification(&self) -> Option<Classification> {
        self.weather().map(|w| classify(w.weather_code, w.is_day))
    }

    pub fn is_loading_locations(&self) -> bool {
        matches!(self.locations, LocationsState::Loading)
    }

    pub fn is_loading_weather(&self) -> bool {
        matches!(self.weather, WeatherState::Loading)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }
}
