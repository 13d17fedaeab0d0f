//! Actions with automatic category inference

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{AirQuality, Location, TrafficIncident, WeatherAlert, WeatherReport};

/// Application actions
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Fetch round =====
    /// Intent: refresh every panel for the current coordinate
    FetchAll,

    // ===== Per-panel completions =====
    /// Result: weather loaded
    WeatherDidLoad(WeatherReport),

    /// Result: weather fetch failed
    WeatherDidError(String),

    /// Result: air quality loaded
    AirDidLoad(AirQuality),

    /// Result: air quality fetch failed
    AirDidError(String),

    /// Result: traffic incidents loaded (possibly none)
    TrafficDidLoad(Vec<TrafficIncident>),

    /// Result: traffic fetch failed
    TrafficDidError(String),

    /// Result: alerts loaded (possibly none)
    AlertsDidLoad(Vec<WeatherAlert>),

    /// Result: alerts fetch failed
    AlertsDidError(String),

    // ===== City search =====
    /// Open the city search overlay
    SearchOpen,

    /// Close the search overlay (cancel)
    SearchClose,

    /// Search query text changed
    SearchQueryChange(String),

    /// Submit search query (explicit trigger)
    SearchQuerySubmit(String),

    /// Result: cities found from geocoding
    SearchDidLoad(Vec<Location>),

    /// Result: search failed
    SearchDidError(String),

    /// Select a result in the list (by index)
    SearchSelect(usize),

    /// Confirm selection - switch every panel to the selected city
    SearchConfirm,

    // ===== UI =====
    /// Toggle between Celsius and Fahrenheit
    UiToggleUnits,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the fetch spinner
    Tick,

    /// Exit the application
    Quit,
}
