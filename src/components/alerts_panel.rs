use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::DataResource;

use super::Component;
use super::panel::{TEXT_DIM, render_panel};
use crate::action::Action;
use crate::state::WeatherAlert;

pub const WARN_ICON: &str = "\u{26a0}";

#[derive(Default)]
pub struct AlertsPanel;

pub struct AlertsPanelProps<'a> {
    pub resource: &'a DataResource<Vec<WeatherAlert>>,
    pub tick_count: u32,
}

fn panel_title(resource: &DataResource<Vec<WeatherAlert>>) -> String {
    match resource.data() {
        Some(alerts) if !alerts.is_empty() => format!("Alerts · {}", alerts.len()),
        _ => "Alerts".into(),
    }
}

impl Component<Action> for AlertsPanel {
    type Props<'a> = AlertsPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        render_panel(
            frame,
            area,
            panel_title(props.resource),
            props.resource,
            props.tick_count,
            render_alerts,
        );
    }
}

fn render_alerts(frame: &mut Frame, area: Rect, alerts: &Vec<WeatherAlert>) {
    if alerts.is_empty() {
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    "No active alerts",
                    Style::default().fg(TEXT_DIM),
                ))
                .centered(),
            ),
            area,
        );
        return;
    }

    let lines: Vec<Line> = alerts
        .iter()
        .map(|alert| {
            Line::from(vec![
                Span::styled(
                    format!("{} {}", WARN_ICON, alert.event),
                    Style::default().fg(Color::Yellow).bold(),
                ),
                Span::styled(
                    format!(": {}", alert.description),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_counts_active_alerts() {
        let none: DataResource<Vec<WeatherAlert>> = DataResource::Loaded(Vec::new());
        assert_eq!(panel_title(&none), "Alerts");

        let one = DataResource::Loaded(vec![WeatherAlert {
            event: "Heat Wave".into(),
            description: "Severe heat expected".into(),
        }]);
        assert_eq!(panel_title(&one), "Alerts · 1");
    }
}
