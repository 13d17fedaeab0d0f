//! Provider API clients: OpenWeatherMap (weather, air pollution, alerts,
//! geocoding) and TomTom (traffic incidents).
//!
//! Each operation is one outbound GET with no retries or caching; raw
//! responses are narrowed to the handful of fields the dashboard consumes.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::state::{AirQuality, Location, TrafficIncident, WeatherAlert, WeatherReport};

const OPENWEATHER_BASE: &str = "https://api.openweathermap.org";
const TOMTOM_BASE: &str = "https://api.tomtom.com";

// ============================================================================
// Errors
// ============================================================================

/// Fetch error taxonomy, caught at this boundary and surfaced to panels
/// as a Failed state - never propagated as a panic or crash.
#[derive(Debug)]
pub enum FetchError {
    /// Network, DNS, or transport-level timeout
    Transport(reqwest::Error),
    /// Non-2xx response from the provider
    Status(u16),
    /// Body did not deserialize into the expected shape
    Decode(reqwest::Error),
    /// Body deserialized but the consumed field was absent
    MissingData(&'static str),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "request failed: {}", e),
            FetchError::Status(code) => write!(f, "provider returned HTTP {}", code),
            FetchError::Decode(e) => write!(f, "unexpected response body: {}", e),
            FetchError::MissingData(field) => write!(f, "response missing {}", field),
        }
    }
}

impl std::error::Error for FetchError {}

/// GET a URL and deserialize the JSON body.
async fn get_json<T: DeserializeOwned>(url: String) -> Result<T, FetchError> {
    let response = reqwest::get(&url).await.map_err(FetchError::Transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    response.json().await.map_err(FetchError::Decode)
}

// ============================================================================
// Weather
// ============================================================================

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
    wind: WeatherWind,
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WeatherWind {
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

fn report_from_response(data: WeatherResponse) -> Result<WeatherReport, FetchError> {
    let condition = data
        .weather
        .into_iter()
        .next()
        .ok_or(FetchError::MissingData("weather[0]"))?;
    Ok(WeatherReport {
        temperature_c: data.main.temp,
        humidity_pct: data.main.humidity,
        wind_speed_ms: data.wind.speed,
        condition: condition.description,
    })
}

/// Fetch current weather in metric units
pub async fn fetch_weather(appid: &str, lat: f64, lon: f64) -> Result<WeatherReport, FetchError> {
    let url = format!(
        "{}/data/2.5/weather?lat={}&lon={}&units=metric&appid={}",
        OPENWEATHER_BASE, lat, lon, appid
    );
    report_from_response(get_json(url).await?)
}

// ============================================================================
// Air quality
// ============================================================================

#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionEntry {
    main: AirPollutionMain,
}

#[derive(Debug, Deserialize)]
struct AirPollutionMain {
    aqi: u8,
}

fn air_quality_from_response(data: AirPollutionResponse) -> Result<AirQuality, FetchError> {
    data.list
        .into_iter()
        .next()
        .map(|entry| AirQuality {
            aqi: entry.main.aqi,
        })
        .ok_or(FetchError::MissingData("list[0]"))
}

/// Fetch the current Air Quality Index (1-5)
pub async fn fetch_air_quality(appid: &str, lat: f64, lon: f64) -> Result<AirQuality, FetchError> {
    let url = format!(
        "{}/data/2.5/air_pollution?lat={}&lon={}&appid={}",
        OPENWEATHER_BASE, lat, lon, appid
    );
    air_quality_from_response(get_json(url).await?)
}

// ============================================================================
// Severe-weather alerts
// ============================================================================

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    /// Absent when the provider reports no active alerts
    #[serde(default)]
    alerts: Vec<AlertEntry>,
}

#[derive(Debug, Deserialize)]
struct AlertEntry {
    event: String,
    description: String,
}

fn alerts_from_response(data: OneCallResponse) -> Vec<WeatherAlert> {
    data.alerts
        .into_iter()
        .map(|alert| WeatherAlert {
            event: alert.event,
            description: alert.description,
        })
        .collect()
}

/// Fetch active severe-weather alerts; the forecast blocks are excluded
/// so only the alerts array comes back
pub async fn fetch_alerts(appid: &str, lat: f64, lon: f64) -> Result<Vec<WeatherAlert>, FetchError> {
    let url = format!(
        "{}/data/2.5/onecall?lat={}&lon={}&exclude=current,minutely,hourly,daily&appid={}",
        OPENWEATHER_BASE, lat, lon, appid
    );
    Ok(alerts_from_response(get_json(url).await?))
}

// ============================================================================
// Traffic incidents
// ============================================================================

#[derive(Debug, Deserialize)]
struct IncidentDetailsResponse {
    #[serde(default)]
    incidents: Vec<IncidentEntry>,
}

#[derive(Debug, Deserialize)]
struct IncidentEntry {
    latitude: f64,
    longitude: f64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "delaySeconds")]
    delay_seconds: Option<u32>,
}

fn incidents_from_response(data: IncidentDetailsResponse) -> Vec<TrafficIncident> {
    data.incidents
        .into_iter()
        .map(|incident| TrafficIncident {
            kind: incident.kind,
            delay_seconds: incident.delay_seconds,
            lat: incident.latitude,
            lon: incident.longitude,
        })
        .collect()
}

/// Fetch traffic incidents within a bounding radius (km) of the coordinate.
/// An empty array is a legitimate "no incidents" result, not a failure.
pub async fn fetch_traffic(
    key: &str,
    lat: f64,
    lon: f64,
    radius_km: u32,
) -> Result<Vec<TrafficIncident>, FetchError> {
    let url = format!(
        "{}/traffic/services/4/incidentDetails/s3/{},{},{}/0/json?key={}",
        TOMTOM_BASE, lon, lat, radius_km, key
    );
    Ok(incidents_from_response(get_json(url).await?))
}

// ============================================================================
// Geocoding
// ============================================================================

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
}

/// Geocoding error type
#[derive(Debug)]
pub enum GeocodeError {
    Fetch(FetchError),
    NotFound(String),
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeError::Fetch(e) => write!(f, "geocoding request failed: {}", e),
            GeocodeError::NotFound(city) => write!(f, "city not found: {}", city),
        }
    }
}

impl std::error::Error for GeocodeError {}

fn location_from_entry(entry: GeocodeEntry) -> Location {
    let name = match &entry.country {
        Some(country) => format!("{}, {}", entry.name, country),
        None => entry.name,
    };
    Location {
        name,
        lat: entry.lat,
        lon: entry.lon,
    }
}

/// Resolve a city name to coordinates via the OpenWeatherMap geocoding API
pub async fn geocode_city(appid: &str, city: &str) -> Result<Location, GeocodeError> {
    let url = format!(
        "{}/geo/1.0/direct?q={}&limit=1&appid={}",
        OPENWEATHER_BASE,
        urlencoding::encode(city),
        appid
    );

    let entries: Vec<GeocodeEntry> = get_json(url).await.map_err(GeocodeError::Fetch)?;

    entries
        .into_iter()
        .next()
        .map(location_from_entry)
        .ok_or_else(|| GeocodeError::NotFound(city.to_string()))
}

/// Search for cities matching a query
pub async fn search_cities(appid: &str, query: &str) -> Result<Vec<Location>, FetchError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let url = format!(
        "{}/geo/1.0/direct?q={}&limit=10&appid={}",
        OPENWEATHER_BASE,
        urlencoding::encode(query),
        appid
    );

    let entries: Vec<GeocodeEntry> = get_json(url).await?;
    Ok(entries.into_iter().map(location_from_entry).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_body_parses_consumed_fields() {
        let body = r#"{
            "main": {"temp": 25.3, "humidity": 60, "pressure": 1012},
            "wind": {"speed": 3.1, "deg": 220},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
            "visibility": 10000
        }"#;

        let parsed: WeatherResponse = serde_json::from_str(body).unwrap();
        let report = report_from_response(parsed).unwrap();

        assert_eq!(report.temperature_c, 25.3);
        assert_eq!(report.humidity_pct, 60);
        assert_eq!(report.wind_speed_ms, 3.1);
        assert_eq!(report.condition, "clear sky");
    }

    #[test]
    fn weather_body_without_conditions_is_missing_data() {
        let body = r#"{"main": {"temp": 10.0, "humidity": 50}, "wind": {"speed": 1.0}, "weather": []}"#;

        let parsed: WeatherResponse = serde_json::from_str(body).unwrap();
        let err = report_from_response(parsed).unwrap_err();

        assert!(matches!(err, FetchError::MissingData("weather[0]")));
    }

    #[test]
    fn air_quality_body_parses_aqi() {
        let body = r#"{"list": [{"main": {"aqi": 3}, "components": {"co": 250.3}}]}"#;

        let parsed: AirPollutionResponse = serde_json::from_str(body).unwrap();
        let air = air_quality_from_response(parsed).unwrap();

        assert_eq!(air.aqi, 3);
    }

    #[test]
    fn air_quality_empty_list_is_missing_data() {
        let parsed: AirPollutionResponse = serde_json::from_str(r#"{"list": []}"#).unwrap();
        let err = air_quality_from_response(parsed).unwrap_err();

        assert!(matches!(err, FetchError::MissingData("list[0]")));
    }

    #[test]
    fn onecall_without_alerts_means_none_active() {
        let body = r#"{"lat": 28.7041, "lon": 77.1025, "timezone": "Asia/Kolkata"}"#;

        let parsed: OneCallResponse = serde_json::from_str(body).unwrap();
        assert!(alerts_from_response(parsed).is_empty());
    }

    #[test]
    fn onecall_alerts_parse_event_and_description() {
        let body = r#"{"alerts": [
            {"sender_name": "IMD", "event": "Heat Wave", "description": "Severe heat expected", "start": 1}
        ]}"#;

        let parsed: OneCallResponse = serde_json::from_str(body).unwrap();
        let alerts = alerts_from_response(parsed);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].event, "Heat Wave");
        assert_eq!(alerts[0].description, "Severe heat expected");
    }

    #[test]
    fn traffic_body_parses_incidents() {
        let body = r#"{"incidents": [
            {"latitude": 28.71, "longitude": 77.10, "type": "ACCIDENT", "delaySeconds": 420},
            {"latitude": 28.69, "longitude": 77.12, "type": "ROADWORKS"}
        ]}"#;

        let parsed: IncidentDetailsResponse = serde_json::from_str(body).unwrap();
        let incidents = incidents_from_response(parsed);

        assert_eq!(incidents.len(), 2);
        assert_eq!(incidents[0].kind, "ACCIDENT");
        assert_eq!(incidents[0].delay_seconds, Some(420));
        assert_eq!(incidents[0].lat, 28.71);
        assert_eq!(incidents[1].delay_seconds, None);
    }

    #[test]
    fn traffic_empty_incidents_is_a_valid_result() {
        let parsed: IncidentDetailsResponse = serde_json::from_str(r#"{"incidents": []}"#).unwrap();
        assert!(incidents_from_response(parsed).is_empty());

        // The incidents key itself may be absent
        let parsed: IncidentDetailsResponse = serde_json::from_str("{}").unwrap();
        assert!(incidents_from_response(parsed).is_empty());
    }

    #[test]
    fn geocode_entry_includes_country_in_name() {
        let body = r#"[{"name": "Delhi", "lat": 28.7041, "lon": 77.1025, "country": "IN"}]"#;

        let entries: Vec<GeocodeEntry> = serde_json::from_str(body).unwrap();
        let location = location_from_entry(entries.into_iter().next().unwrap());

        assert_eq!(location.name, "Delhi, IN");
        assert_eq!(location.lat, 28.7041);
        assert_eq!(location.lon, 77.1025);
    }
}
