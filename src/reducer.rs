//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! All four data panels share one lifecycle: a fetch round marks each
//! resource as fetching, and each completion replaces exactly one resource
//! with Loaded or Failed. The generic helpers below are the single code
//! path for every panel kind.

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, PANEL_COUNT};

/// Move a resource into its fetching state. Loaded data is kept on screen
/// while the replacement request is in flight; anything else becomes
/// Loading. Returns true when data was kept (a refresh, not a first load).
fn begin_fetch<T>(resource: &mut DataResource<T>) -> bool {
    if resource.is_loaded() {
        true
    } else {
        *resource = DataResource::Loading;
        false
    }
}

/// Replace a resource with the outcome of its fetch. The previous state is
/// dropped atomically - results are never merged.
fn complete_fetch<T>(resource: &mut DataResource<T>, outcome: Result<T, String>) {
    *resource = match outcome {
        Ok(data) => DataResource::Loaded(data),
        Err(message) => DataResource::Failed(message),
    };
}

/// Account for one completed fetch out of the current round.
fn finish_one(state: &mut AppState) {
    state.pending_fetches = state.pending_fetches.saturating_sub(1);
    if state.pending_fetches == 0 {
        state.is_refreshing = false;
    }
}

fn fetch_round_effects(lat: f64, lon: f64) -> Vec<Effect> {
    vec![
        Effect::FetchWeather { lat, lon },
        Effect::FetchAirQuality { lat, lon },
        Effect::FetchTraffic { lat, lon },
        Effect::FetchAlerts { lat, lon },
    ]
}

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Fetch round =====
        Action::FetchAll => {
            let kept_weather = begin_fetch(&mut state.weather);
            let kept_air = begin_fetch(&mut state.air_quality);
            let kept_traffic = begin_fetch(&mut state.traffic);
            let kept_alerts = begin_fetch(&mut state.alerts);
            state.is_refreshing = kept_weather || kept_air || kept_traffic || kept_alerts;
            state.pending_fetches = PANEL_COUNT;

            let loc = state.current_location();
            DispatchResult::changed_with_many(fetch_round_effects(loc.lat, loc.lon))
        }

        // ===== Per-panel completions =====
        Action::WeatherDidLoad(report) => {
            complete_fetch(&mut state.weather, Ok(report));
            finish_one(state);
            DispatchResult::changed()
        }

        Action::WeatherDidError(message) => {
            complete_fetch(&mut state.weather, Err(message));
            finish_one(state);
            DispatchResult::changed()
        }

        Action::AirDidLoad(air) => {
            complete_fetch(&mut state.air_quality, Ok(air));
            finish_one(state);
            DispatchResult::changed()
        }

        Action::AirDidError(message) => {
            complete_fetch(&mut state.air_quality, Err(message));
            finish_one(state);
            DispatchResult::changed()
        }

        Action::TrafficDidLoad(incidents) => {
            complete_fetch(&mut state.traffic, Ok(incidents));
            finish_one(state);
            DispatchResult::changed()
        }

        Action::TrafficDidError(message) => {
            complete_fetch(&mut state.traffic, Err(message));
            finish_one(state);
            DispatchResult::changed()
        }

        Action::AlertsDidLoad(alerts) => {
            complete_fetch(&mut state.alerts, Ok(alerts));
            finish_one(state);
            DispatchResult::changed()
        }

        Action::AlertsDidError(message) => {
            complete_fetch(&mut state.alerts, Err(message));
            finish_one(state);
            DispatchResult::changed()
        }

        // ===== City search =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_query.clear();
            state.search_results.clear();
            state.search_error = None;
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.search_query.clear();
            state.search_results.clear();
            state.search_error = None;
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            state.search_selected = 0;
            state.search_error = None;
            DispatchResult::changed_with(Effect::SearchCities {
                query: state.search_query.clone(),
            })
        }

        Action::SearchQuerySubmit(query) => {
            let query = query.trim().to_string();
            state.search_query = query.clone();
            state.search_selected = 0;
            state.search_error = None;
            if query.is_empty() {
                state.search_results.clear();
            }
            DispatchResult::changed_with(Effect::SearchCities { query })
        }

        Action::SearchDidLoad(results) => {
            state.search_results = results;
            state.search_error = None;
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchDidError(message) => {
            state.search_results.clear();
            state.search_error = Some(message);
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchSelect(index) => {
            if index < state.search_results.len() && index != state.search_selected {
                state.search_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SearchConfirm => {
            let Some(location) = state.search_results.get(state.search_selected).cloned() else {
                return DispatchResult::unchanged();
            };

            let (lat, lon) = (location.lat, location.lon);
            state.location = location;

            // Coordinate change: every panel starts over from Loading
            state.weather = DataResource::Loading;
            state.air_quality = DataResource::Loading;
            state.traffic = DataResource::Loading;
            state.alerts = DataResource::Loading;
            state.is_refreshing = false;
            state.pending_fetches = PANEL_COUNT;

            state.search_mode = false;
            state.search_query.clear();
            state.search_results.clear();
            state.search_error = None;
            state.search_selected = 0;

            DispatchResult::changed_with_many(fetch_round_effects(lat, lon))
        }

        // ===== UI =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global =====
        Action::Tick => {
            if state.any_fetch_in_flight() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
