use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::Component;
use super::panel::{TEXT_DIM, render_panel};
use crate::action::Action;
use crate::state::{TempUnit, WeatherReport};

#[derive(Default)]
pub struct WeatherPanel;

pub struct WeatherPanelProps<'a> {
    pub resource: &'a DataResource<WeatherReport>,
    pub unit: TempUnit,
    pub tick_count: u32,
}

fn temperature_fill(celsius: f32) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t < 28.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        t if t < 38.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let unit = props.unit;
        render_panel(
            frame,
            area,
            "Weather".into(),
            props.resource,
            props.tick_count,
            |frame, inner, report| render_report(frame, inner, report, unit),
        );
    }
}

fn render_report(frame: &mut Frame, area: Rect, report: &WeatherReport, unit: TempUnit) {
    let chunks = Layout::vertical([
        Constraint::Max(5),    // FIGlet temperature
        Constraint::Length(1), // Condition
        Constraint::Length(1), // Humidity / wind
    ])
    .flex(Flex::Center)
    .split(area);

    let temp_text = unit.format(report.temperature_c);
    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_fill(report.temperature_c));
    frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[0]);

    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                report.condition.clone(),
                Style::default().fg(Color::Gray),
            ))
            .centered(),
        ),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                format!(
                    "humidity {}%   wind {:.1} m/s",
                    report.humidity_pct, report.wind_speed_ms
                ),
                Style::default().fg(TEXT_DIM),
            ))
            .centered(),
        ),
        chunks[2],
    );
}
