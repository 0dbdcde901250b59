//! Layout components (tab bar, status bar)

use crate::app::App;
use crate::state::Screen;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::ACCENT;

/// Create the main layout: screen content above the bottom tab bar,
/// with the last line reserved for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Per-screen cells of the tab bar, shared with mouse hit-testing
pub fn tab_cells(area: Rect) -> Vec<(Screen, Rect)> {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    Screen::ALL
        .iter()
        .copied()
        .zip(chunks.iter().copied())
        .collect()
}

/// Screen under a tab bar click
pub fn tab_hit(area: Rect, column: u16, row: u16) -> Option<Screen> {
    tab_cells(area)
        .into_iter()
        .find(|(_, cell)| cell.contains(Position::new(column, row)))
        .map(|(screen, _)| screen)
}

/// Draw the bottom tab bar
pub fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    for (screen, cell) in tab_cells(area) {
        let style = if app.state.current_screen == screen {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let label = Paragraph::new(Line::from(Span::styled(screen.label(), style)))
            .alignment(Alignment::Center);
        frame.render_widget(label, cell);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    let hints = get_screen_hints(&app.state.current_screen);
    spans.push(Span::styled(
        format!(" {hints}"),
        Style::default().fg(Color::Gray),
    ));

    // Transient feedback message
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " q:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current screen
fn get_screen_hints(screen: &Screen) -> String {
    match screen {
        Screen::Calendar => {
            "h/l:page  t:toggle  Tab:record  [/]:day  Home:today  1-4:screens".to_string()
        }
        Screen::MyPage => "s:save defaults  1-4:screens".to_string(),
        Screen::Home | Screen::Library => "1-4:screens".to_string(),
    }
}
