use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    AirQualityPanel, AirQualityPanelProps, AlertsPanel, AlertsPanelProps, Component,
    LocationHeader, LocationHeaderProps, TrafficPanel, TrafficPanelProps, WeatherPanel,
    WeatherPanelProps,
};
use crate::action::Action;
use crate::state::AppState;

/// Props for Dashboard - read-only view of state
pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The dashboard composer: holds no data of its own, it arranges the
/// header and the four data panels over one AppState.
#[derive(Default)]
pub struct Dashboard {
    header: LocationHeader,
    weather: WeatherPanel,
    air_quality: AirQualityPanel,
    traffic: TrafficPanel,
    alerts: AlertsPanel,
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::FetchAll),
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Char('u') => Some(Action::UiToggleUnits),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(5), // Location header
            Constraint::Min(8),    // Panel grid
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        self.header.render(
            frame,
            chunks[0],
            LocationHeaderProps {
                location: state.current_location(),
                temperature_c: state.weather.data().map(|w| w.temperature_c),
                fetching: state.any_fetch_in_flight(),
                tick_count: state.tick_count,
            },
        );

        let rows = Layout::vertical([Constraint::Fill(3), Constraint::Fill(2)]).split(chunks[1]);
        let top = Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).split(rows[0]);
        let bottom = Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).split(rows[1]);

        self.weather.render(
            frame,
            top[0],
            WeatherPanelProps {
                resource: &state.weather,
                unit: state.unit,
                tick_count: state.tick_count,
            },
        );
        self.air_quality.render(
            frame,
            top[1],
            AirQualityPanelProps {
                resource: &state.air_quality,
                tick_count: state.tick_count,
            },
        );
        self.traffic.render(
            frame,
            bottom[0],
            TrafficPanelProps {
                resource: &state.traffic,
                tick_count: state.tick_count,
            },
        );
        self.alerts.render(
            frame,
            bottom[1],
            AlertsPanelProps {
                resource: &state.alerts,
                tick_count: state.tick_count,
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("/", "city"),
                    StatusBarHint::new("u", "units"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
