//! Full-flow tests using EffectStoreTestHarness: dispatch an intent, drain
//! the declared effects, then feed the completions a fetch would have
//! produced and assert the resulting panel states.

use citydash::{
    action::Action,
    components::{Component, Dashboard, DashboardProps},
    effect::Effect,
    reducer::reducer,
    state::{AirQuality, AppState, TrafficIncident, WeatherAlert, WeatherReport},
};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, NumericComponentId};

/// Mocked weather body, already narrowed to its payload
fn mock_report() -> WeatherReport {
    WeatherReport {
        temperature_c: 25.3,
        humidity_pct: 60,
        wind_speed_ms: 3.1,
        condition: "clear sky".into(),
    }
}

fn state_with_report() -> AppState {
    AppState {
        weather: DataResource::Loaded(mock_report()),
        ..Default::default()
    }
}

// ============================================================================
// Fetch round flows
// ============================================================================

#[test]
fn test_fetch_round_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Trigger a round - every panel goes to loading, four effects fan out
    harness.dispatch_collect(Action::FetchAll);
    harness.assert_state(|s| s.weather.is_loading());
    harness.assert_state(|s| s.alerts.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(4);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchWeather { .. }));

    // Simulate the four async completions
    harness.complete_action(Action::WeatherDidLoad(mock_report()));
    harness.complete_action(Action::AirDidLoad(AirQuality { aqi: 3 }));
    harness.complete_action(Action::TrafficDidLoad(Vec::new()));
    harness.complete_action(Action::AlertsDidLoad(Vec::new()));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 4, "Should have processed 4 actions");
    assert_eq!(changed, 4, "Every completion should change state");

    harness.assert_state(|s| s.weather.data() == Some(&mock_report()));
    harness.assert_state(|s| s.air_quality.data() == Some(&AirQuality { aqi: 3 }));
    harness.assert_state(|s| s.traffic.is_loaded());
    harness.assert_state(|s| s.alerts.is_loaded());
    harness.assert_state(|s| !s.is_refreshing && s.pending_fetches == 0);
}

#[test]
fn test_transport_failure_becomes_failed_state() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::FetchAll);
    harness.assert_state(|s| s.weather.is_loading());

    // Connection refused surfaces as Failed, never as a panic or a
    // perpetual loading placeholder
    harness.complete_action(Action::WeatherDidError("request failed: connection refused".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.weather.is_failed());
    harness.assert_state(|s| {
        s.weather.error() == Some("request failed: connection refused")
    });
}

#[test]
fn test_all_panel_kinds_fail_uniformly() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::FetchAll);
    harness.complete_action(Action::WeatherDidError("HTTP 500".into()));
    harness.complete_action(Action::AirDidError("HTTP 500".into()));
    harness.complete_action(Action::TrafficDidError("HTTP 500".into()));
    harness.complete_action(Action::AlertsDidError("HTTP 500".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.weather.is_failed());
    harness.assert_state(|s| s.air_quality.is_failed());
    harness.assert_state(|s| s.traffic.is_failed());
    harness.assert_state(|s| s.alerts.is_failed());
}

#[test]
fn test_empty_traffic_response_is_loaded() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::FetchAll);
    harness.complete_action(Action::TrafficDidLoad(Vec::new()));
    harness.process_emitted();

    // {"incidents": []} is a result, not a failure
    harness.assert_state(|s| s.traffic.is_loaded());
    harness.assert_state(|s| s.traffic.data().map(Vec::len) == Some(0));
}

#[test]
fn test_duplicate_rounds_converge() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Two rounds before any completion: the keyed task layer cancels the
    // first round's requests, so one set of completions lands
    harness.dispatch_collect(Action::FetchAll);
    harness.dispatch_collect(Action::FetchAll);

    let effects = harness.drain_effects();
    effects.effects_count(8);

    harness.complete_action(Action::WeatherDidLoad(mock_report()));
    harness.complete_action(Action::AirDidLoad(AirQuality { aqi: 2 }));
    harness.complete_action(Action::TrafficDidLoad(vec![TrafficIncident {
        kind: "ACCIDENT".into(),
        delay_seconds: Some(420),
        lat: 28.71,
        lon: 77.10,
    }]));
    harness.complete_action(Action::AlertsDidLoad(vec![WeatherAlert {
        event: "Heat Wave".into(),
        description: "Severe heat expected".into(),
    }]));
    harness.process_emitted();

    harness.assert_state(|s| s.weather.data() == Some(&mock_report()));
    harness.assert_state(|s| s.pending_fetches == 0 && !s.is_refreshing);
}

#[test]
fn test_refresh_keeps_stale_data_until_completion() {
    let mut harness = EffectStoreTestHarness::new(state_with_report(), reducer);

    harness.dispatch_collect(Action::FetchAll);

    // The loaded panel keeps its data during the refresh round
    harness.assert_state(|s| s.weather.data() == Some(&mock_report()));
    harness.assert_state(|s| s.is_refreshing);

    let updated = WeatherReport {
        temperature_c: 31.0,
        ..mock_report()
    };
    harness.complete_action(Action::WeatherDidLoad(updated.clone()));
    harness.process_emitted();

    harness.assert_state(|s| s.weather.data() == Some(&updated));
}

// ============================================================================
// Component + store integration
// ============================================================================

#[test]
fn test_keyboard_triggers_fetch_round() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = Dashboard::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::FetchAll);

    harness.dispatch_collect(Action::FetchAll);
    harness.assert_state(|s| s.weather.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(4);
    effects.effects_none_match(|e| matches!(e, Effect::SearchCities { .. }));
}

#[test]
fn test_search_triggers_effect() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.dispatch_collect(Action::SearchQuerySubmit("Mumbai".into()));

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::SearchCities { query } if query == "Mumbai"),
    );
}

// ============================================================================
// Render through the harness
// ============================================================================

#[test]
fn test_render_loaded_dashboard() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = Dashboard::default();

    harness.dispatch_collect(Action::FetchAll);
    harness.complete_action(Action::WeatherDidLoad(mock_report()));
    harness.complete_action(Action::AirDidLoad(AirQuality { aqi: 3 }));
    harness.complete_action(Action::TrafficDidLoad(Vec::new()));
    harness.complete_action(Action::AlertsDidLoad(Vec::new()));
    harness.process_emitted();

    let output = harness.render_plain(90, 32, |frame, area, state| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(output.contains("clear sky"), "weather condition visible:\n{}", output);
    assert!(output.contains("Moderate"), "AQI label visible:\n{}", output);
    assert!(output.contains("No incidents reported"), "traffic empty text:\n{}", output);
    assert!(output.contains("No active alerts"), "alerts empty text:\n{}", output);
}

#[test]
fn test_render_unit_toggle_changes_display() {
    let mut harness = EffectStoreTestHarness::new(state_with_report(), reducer);
    let mut component = Dashboard::default();

    let celsius_output = harness.render_plain(90, 32, |frame, area, state| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    harness.dispatch_collect(Action::UiToggleUnits);

    let fahrenheit_output = harness.render_plain(90, 32, |frame, area, state| {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert_ne!(
        celsius_output, fahrenheit_output,
        "Celsius and Fahrenheit renders should differ"
    );
}
