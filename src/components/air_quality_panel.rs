use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::Component;
use super::panel::{TEXT_DIM, render_panel};
use crate::action::Action;
use crate::state::AirQuality;

#[derive(Default)]
pub struct AirQualityPanel;

pub struct AirQualityPanelProps<'a> {
    pub resource: &'a DataResource<AirQuality>,
    pub tick_count: u32,
}

/// Severity color for the 1 (good) to 5 (very poor) scale
fn aqi_color(aqi: u8) -> Color {
    match aqi {
        1 => Color::Rgb(110, 210, 120),
        2 => Color::Rgb(180, 210, 110),
        3 => Color::Rgb(235, 200, 90),
        4 => Color::Rgb(240, 140, 80),
        _ => Color::Rgb(235, 85, 80),
    }
}

fn aqi_fill(aqi: u8) -> Fill {
    let (start, end) = match aqi {
        1 => (ArtColor::rgb(110, 210, 120), ArtColor::rgb(160, 230, 150)),
        2 => (ArtColor::rgb(180, 210, 110), ArtColor::rgb(210, 225, 130)),
        3 => (ArtColor::rgb(235, 200, 90), ArtColor::rgb(240, 215, 130)),
        4 => (ArtColor::rgb(240, 140, 80), ArtColor::rgb(245, 170, 110)),
        _ => (ArtColor::rgb(235, 85, 80), ArtColor::rgb(245, 120, 110)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

impl Component<Action> for AirQualityPanel {
    type Props<'a> = AirQualityPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        render_panel(
            frame,
            area,
            "Air Quality".into(),
            props.resource,
            props.tick_count,
            render_aqi,
        );
    }
}

fn render_aqi(frame: &mut Frame, area: Rect, air: &AirQuality) {
    let chunks = Layout::vertical([
        Constraint::Max(5),    // FIGlet AQI digit
        Constraint::Length(1), // Label
        Constraint::Length(1), // Scale hint
    ])
    .flex(Flex::Center)
    .split(area);

    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(aqi_fill(air.aqi));
    frame.render_widget(ArtBox::new(&renderer, &air.aqi.to_string()), chunks[0]);

    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                air.label(),
                Style::default().fg(aqi_color(air.aqi)).bold(),
            ))
            .centered(),
        ),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                "1 good · 5 very poor",
                Style::default().fg(TEXT_DIM),
            ))
            .centered(),
        ),
        chunks[2],
    );
}
