pub mod air_quality_panel;
pub mod alerts_panel;
pub mod city_search;
pub mod dashboard;
pub mod location_header;
mod panel;
pub mod traffic_panel;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use air_quality_panel::{AirQualityPanel, AirQualityPanelProps};
pub use alerts_panel::{AlertsPanel, AlertsPanelProps, WARN_ICON};
pub use city_search::{CitySearchOverlay, CitySearchOverlayProps};
pub use dashboard::{Dashboard, DashboardProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use traffic_panel::{TrafficPanel, TrafficPanelProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};
