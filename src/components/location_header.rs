use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use super::panel::{ACCENT, TEXT_DIM, spinner_frame};
use crate::action::Action;
use crate::state::Location;

#[derive(Default)]
pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub location: &'a Location,
    pub temperature_c: Option<f32>,
    pub fetching: bool,
    pub tick_count: u32,
}

/// FIGlet gradient keyed to the current temperature; neutral gray before
/// any data has arrived.
fn header_gradient(temperature_c: Option<f32>) -> Fill {
    let (start, end) = match temperature_c {
        Some(t) if t < 10.0 => (ArtColor::rgb(120, 190, 255), ArtColor::rgb(170, 225, 235)),
        Some(t) if t < 28.0 => (ArtColor::rgb(120, 205, 160), ArtColor::rgb(235, 215, 120)),
        Some(_) => (ArtColor::rgb(250, 160, 90), ArtColor::rgb(245, 95, 80)),
        None => (ArtColor::rgb(170, 170, 170), ArtColor::rgb(215, 215, 215)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

fn coords_text(location: &Location) -> String {
    let ns = if location.lat >= 0.0 { 'N' } else { 'S' };
    let ew = if location.lon >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.2}°{}, {:.2}°{}",
        location.lat.abs(),
        ns,
        location.lon.abs(),
        ew
    )
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet city name
            Constraint::Length(1), // Coordinates
        ])
        .split(area);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(header_gradient(props.temperature_c));
        frame.render_widget(ArtBox::new(&renderer, &props.location.name), chunks[0]);

        let mut coords = vec![Span::styled(
            coords_text(props.location),
            Style::default().fg(TEXT_DIM),
        )];
        if props.fetching {
            coords.push(Span::raw("  "));
            coords.push(Span::styled(
                spinner_frame(props.tick_count),
                Style::default().fg(ACCENT),
            ));
            coords.push(Span::styled(" refreshing", Style::default().fg(Color::Gray)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(coords).centered()),
            chunks[1],
        );
    }
}
