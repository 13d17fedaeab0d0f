//! Shared panel chrome: bordered block, title, and the per-state bodies
//! every data panel renders the same way.
//!
//! Loading, Failed, and Empty are handled here so all four panel kinds
//! surface the same lifecycle uniformly; only the Loaded body differs.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::DataResource;

pub(crate) const TEXT_DIM: Color = Color::DarkGray;
pub(crate) const ACCENT: Color = Color::Cyan;
pub(crate) const ERROR_FG: Color = Color::Rgb(220, 110, 110);
const BORDER_FG: Color = Color::Rgb(90, 100, 110);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) fn spinner_frame(tick_count: u32) -> &'static str {
    SPINNER_FRAMES[tick_count as usize % SPINNER_FRAMES.len()]
}

fn panel_block(title: String, busy: Option<u32>) -> Block<'static> {
    let mut title_line = vec![Span::raw(" "), Span::styled(title, Style::default().bold())];
    if let Some(tick) = busy {
        title_line.push(Span::raw(" "));
        title_line.push(Span::styled(spinner_frame(tick), Style::default().fg(ACCENT)));
    }
    title_line.push(Span::raw(" "));

    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_FG))
        .title(Line::from(title_line))
}

fn centered_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let [middle] = Layout::vertical([Constraint::Length(lines.len() as u16)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(lines).centered(), middle);
}

/// Render a panel for one data resource. The chrome and the non-Loaded
/// states are shared; `render_loaded` draws the kind-specific body.
pub(crate) fn render_panel<T>(
    frame: &mut Frame,
    area: Rect,
    title: String,
    resource: &DataResource<T>,
    tick_count: u32,
    render_loaded: impl FnOnce(&mut Frame, Rect, &T),
) {
    let busy = resource.is_loading().then_some(tick_count);
    let block = panel_block(title, busy);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width < 2 || inner.height < 1 {
        return;
    }

    match resource {
        DataResource::Loaded(data) => render_loaded(frame, inner, data),
        DataResource::Loading => {
            centered_message(
                frame,
                inner,
                vec![Line::from(Span::styled(
                    "Loading...",
                    Style::default().fg(TEXT_DIM),
                ))],
            );
        }
        DataResource::Failed(message) => {
            centered_message(
                frame,
                inner,
                vec![
                    Line::from(Span::styled(
                        "unavailable",
                        Style::default().fg(Color::Red).bold(),
                    )),
                    Line::from(Span::styled(
                        message.clone(),
                        Style::default().fg(ERROR_FG),
                    )),
                    Line::from(vec![
                        Span::styled("press ", Style::default().fg(TEXT_DIM)),
                        Span::styled("r", Style::default().fg(ACCENT).bold()),
                        Span::styled(" to retry", Style::default().fg(TEXT_DIM)),
                    ]),
                ],
            );
        }
        DataResource::Empty => {
            centered_message(
                frame,
                inner,
                vec![Line::from(vec![
                    Span::styled("press ", Style::default().fg(TEXT_DIM)),
                    Span::styled("r", Style::default().fg(ACCENT).bold()),
                    Span::styled(" to fetch", Style::default().fg(TEXT_DIM)),
                ])],
            );
        }
    }
}
