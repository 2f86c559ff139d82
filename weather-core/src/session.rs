//! Drives [`AppState`] against the remote data sources.

use std::sync::Arc;

use tracing::debug;

use crate::{
    matcher::SearchOutcome,
    model::{Coordinates, LocationOption},
    provider::{LocationSource, WeatherSource},
    state::{AppState, Event, SelectionTicket},
};

#[derive(Debug)]
pub struct Session {
    state: AppState,
    locations: Arc<dyn LocationSource>,
    weather: Arc<dyn WeatherSource>,
    suggestion_limit: usize,
}

/// A weather request for one selection, detached from the session so several
/// may be in flight at once.
#[derive(Debug)]
pub struct WeatherFetch {
    ticket: SelectionTicket,
    coord: Coordinates,
    source: Arc<dyn WeatherSource>,
}

impl WeatherFetch {
    pub fn ticket(&self) -> SelectionTicket {
        self.ticket
    }

    /// Perform the request. The resulting event must be fed back through
    /// [`Session::apply`].
    pub async fn run(self) -> Event {
        debug!(ticket = ?self.ticket, coord = %self.coord, "fetching weather");
        let result = self.source.fetch_current(self.coord).await;
        Event::WeatherLoaded { ticket: self.ticket, result }
    }
}

impl Session {
    pub fn new(
        locations: Arc<dyn LocationSource>,
        weather: Arc<dyn WeatherSource>,
        suggestion_limit: usize,
    ) -> Self {
        Self { state: AppState::new(), locations, weather, suggestion_limit }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn apply(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }

    /// One-shot startup load of the location dataset. Never retried.
    pub async fn load_locations(&mut self) {
        self.apply(Event::LocationsRequested);
        let result = self.locations.fetch_locations().await;
        self.apply(Event::LocationsLoaded(result));
    }

    pub fn search(&self, query: &str) -> SearchOutcome {
        self.state.suggestions(query, self.suggestion_limit)
    }

    /// Make `option` the current selection and hand back its weather request.
    pub fn select(&mut self, option: LocationOption) -> WeatherFetch {
        let coord = option.coord;
        let (state, ticket) = std::mem::take(&mut self.state).select(option);
        self.state = state;

        WeatherFetch { ticket, coord, source: Arc::clone(&self.weather) }
    }

    /// Select and wait for the result in one step.
    pub async fn select_and_fetch(&mut self, option: LocationOption) {
        let fetch = self.select(option);
        let event = fetch.run().await;
        self.apply(event);
    }
}
