//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch current weather for the coordinate
    FetchWeather { lat: f64, lon: f64 },
    /// Fetch the air quality index for the coordinate
    FetchAirQuality { lat: f64, lon: f64 },
    /// Fetch traffic incidents around the coordinate
    FetchTraffic { lat: f64, lon: f64 },
    /// Fetch severe-weather alerts for the coordinate
    FetchAlerts { lat: f64, lon: f64 },
    /// Search for cities matching the query
    SearchCities { query: String },
}
