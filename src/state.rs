//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Current conditions from the OpenWeatherMap weather endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub temperature_c: f32,
    pub humidity_pct: u8,
    pub wind_speed_ms: f32,
    pub condition: String,
}

/// Air Quality Index from the OpenWeatherMap air-pollution endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AirQuality {
    /// 1 (good) to 5 (very poor)
    pub aqi: u8,
}

impl AirQuality {
    pub fn label(&self) -> &'static str {
        match self.aqi {
            1 => "Good",
            2 => "Fair",
            3 => "Moderate",
            4 => "Poor",
            5 => "Very Poor",
            _ => "Unknown",
        }
    }
}

/// One incident from the TomTom incident-details endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrafficIncident {
    pub kind: String,
    pub delay_seconds: Option<u32>,
    pub lat: f64,
    pub lon: f64,
}

/// Severe-weather alert from the OpenWeatherMap onecall endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherAlert {
    pub event: String,
    pub description: String,
}

/// A geographic location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    pub fn format(&self, celsius: f32) -> String {
        match self {
            TempUnit::Celsius => format!("{:.1}°C", celsius),
            TempUnit::Fahrenheit => format!("{:.1}°F", celsius * 9.0 / 5.0 + 32.0),
        }
    }
}

/// Spinner timing for in-flight fetches.
pub const SPINNER_TICK_MS: u64 = 120;

/// Number of data panels refreshed by one FetchAll round.
pub const PANEL_COUNT: u8 = 4;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// The single city all panels are scoped to
    #[debug(section = "Location", label = "City", debug_fmt)]
    pub location: Location,

    /// Weather lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Panels", label = "Weather", debug_fmt)]
    pub weather: DataResource<WeatherReport>,

    /// Air quality lifecycle
    #[debug(section = "Panels", label = "Air quality", debug_fmt)]
    pub air_quality: DataResource<AirQuality>,

    /// Traffic incidents lifecycle
    #[debug(section = "Panels", label = "Traffic", debug_fmt)]
    pub traffic: DataResource<Vec<TrafficIncident>>,

    /// Severe-weather alerts lifecycle
    #[debug(section = "Panels", label = "Alerts", debug_fmt)]
    pub alerts: DataResource<Vec<WeatherAlert>>,

    /// Whether a refresh round is keeping stale panels on screen
    #[debug(section = "Panels", label = "Refreshing")]
    pub is_refreshing: bool,

    /// Temperature unit preference
    #[debug(section = "Panels", label = "Unit", debug_fmt)]
    pub unit: TempUnit,

    // --- Fetch round bookkeeping (skipped) ---
    /// Completions still expected from the current fetch round
    #[debug(skip)]
    pub pending_fetches: u8,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,

    // --- City search (skipped) ---
    /// Whether the search overlay is open
    #[debug(skip)]
    pub search_mode: bool,

    /// Current search query
    #[debug(skip)]
    pub search_query: String,

    /// Geocoding results for the query
    #[debug(skip)]
    pub search_results: Vec<Location>,

    /// Search error message
    #[debug(skip)]
    pub search_error: Option<String>,

    /// Selected index in search results
    #[debug(skip)]
    pub search_selected: usize,
}

impl AppState {
    /// Create state with the given location
    pub fn new(location: Location) -> Self {
        Self {
            location,
            weather: DataResource::Empty,
            air_quality: DataResource::Empty,
            traffic: DataResource::Empty,
            alerts: DataResource::Empty,
            is_refreshing: false,
            unit: TempUnit::default(),
            pending_fetches: 0,
            tick_count: 0,
            search_mode: false,
            search_query: String::new(),
            search_results: Vec::new(),
            search_error: None,
            search_selected: 0,
        }
    }

    /// Get current location
    pub fn current_location(&self) -> &Location {
        &self.location
    }

    /// True while any panel is waiting on the network
    pub fn any_fetch_in_flight(&self) -> bool {
        self.weather.is_loading()
            || self.air_quality.is_loading()
            || self.traffic.is_loading()
            || self.alerts.is_loading()
            || self.is_refreshing
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Location {
            name: "Delhi, IN".into(),
            lat: 28.7041,
            lon: 77.1025,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aqi_labels_cover_scale() {
        assert_eq!(AirQuality { aqi: 1 }.label(), "Good");
        assert_eq!(AirQuality { aqi: 3 }.label(), "Moderate");
        assert_eq!(AirQuality { aqi: 5 }.label(), "Very Poor");
        assert_eq!(AirQuality { aqi: 0 }.label(), "Unknown");
        assert_eq!(AirQuality { aqi: 9 }.label(), "Unknown");
    }

    #[test]
    fn temp_unit_formatting() {
        assert_eq!(TempUnit::Celsius.format(25.3), "25.3°C");
        assert_eq!(TempUnit::Fahrenheit.format(0.0), "32.0°F");
    }

    #[test]
    fn fetch_in_flight_tracks_loading_panels() {
        let mut state = AppState::default();
        assert!(!state.any_fetch_in_flight());

        state.traffic = DataResource::Loading;
        assert!(state.any_fetch_in_flight());

        state.traffic = DataResource::Loaded(Vec::new());
        assert!(!state.any_fetch_in_flight());

        state.is_refreshing = true;
        assert!(state.any_fetch_in_flight());
    }
}
