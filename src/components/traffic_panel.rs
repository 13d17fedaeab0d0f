use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::Component;
use super::panel::{TEXT_DIM, render_panel};
use crate::action::Action;
use crate::state::TrafficIncident;

#[derive(Default)]
pub struct TrafficPanel;

pub struct TrafficPanelProps<'a> {
    pub resource: &'a DataResource<Vec<TrafficIncident>>,
    pub tick_count: u32,
}

fn panel_title(resource: &DataResource<Vec<TrafficIncident>>) -> String {
    match resource.data() {
        Some(incidents) if !incidents.is_empty() => {
            format!("Traffic · {} incidents", incidents.len())
        }
        _ => "Traffic".into(),
    }
}

fn incident_line(incident: &TrafficIncident) -> Line<'static> {
    let delay = match incident.delay_seconds {
        Some(seconds) => format!("+{}s", seconds),
        None => "no delay data".into(),
    };
    Line::from(vec![
        Span::styled("▸ ", Style::default().fg(Color::Yellow)),
        Span::raw(incident.kind.clone()),
        Span::styled(format!("  {}", delay), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("  {:.3}, {:.3}", incident.lat, incident.lon),
            Style::default().fg(TEXT_DIM),
        ),
    ])
}

impl Component<Action> for TrafficPanel {
    type Props<'a> = TrafficPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        render_panel(
            frame,
            area,
            panel_title(props.resource),
            props.resource,
            props.tick_count,
            render_incidents,
        );
    }
}

fn render_incidents(frame: &mut Frame, area: Rect, incidents: &Vec<TrafficIncident>) {
    if incidents.is_empty() {
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    "No incidents reported",
                    Style::default().fg(TEXT_DIM),
                ))
                .centered(),
            ),
            area,
        );
        return;
    }

    let visible = area.height as usize;
    let mut lines: Vec<Line> = incidents.iter().take(visible).map(incident_line).collect();
    if incidents.len() > visible {
        let hidden = incidents.len() - visible + 1;
        lines.truncate(visible.saturating_sub(1));
        lines.push(Line::from(Span::styled(
            format!("… {} more", hidden),
            Style::default().fg(TEXT_DIM),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_counts_loaded_incidents() {
        let empty: DataResource<Vec<TrafficIncident>> = DataResource::Loaded(Vec::new());
        assert_eq!(panel_title(&empty), "Traffic");

        let loaded = DataResource::Loaded(vec![
            TrafficIncident {
                kind: "ACCIDENT".into(),
                delay_seconds: Some(420),
                lat: 28.71,
                lon: 77.10,
            },
            TrafficIncident {
                kind: "ROADWORKS".into(),
                delay_seconds: None,
                lat: 28.69,
                lon: 77.12,
            },
        ]);
        assert_eq!(panel_title(&loaded), "Traffic · 2 incidents");

        let loading: DataResource<Vec<TrafficIncident>> = DataResource::Loading;
        assert_eq!(panel_title(&loading), "Traffic");
    }

    #[test]
    fn incident_lines_spell_out_missing_delay() {
        let incident = TrafficIncident {
            kind: "ROADWORKS".into(),
            delay_seconds: None,
            lat: 28.69,
            lon: 77.12,
        };
        let rendered = incident_line(&incident).to_string();
        assert!(rendered.contains("ROADWORKS"));
        assert!(rendered.contains("no delay data"));
    }
}
