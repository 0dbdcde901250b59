//! Daily record tab panel under the calendar grid

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use super::ACCENT;
use crate::app::App;
use crate::state::RecordTab;

/// Per-tab cells of the tab row, shared with mouse hit-testing
pub fn tab_segments(panel: Rect) -> Vec<(RecordTab, Rect)> {
    let mut segments = Vec::new();
    if panel.height < 2 {
        return segments;
    }
    let mut x = panel.x + 1;
    for tab in RecordTab::ALL {
        let width = tab.label().len() as u16 + 4;
        if x + width > panel.x + panel.width {
            break;
        }
        segments.push((
            tab,
            Rect {
                x,
                y: panel.y + 1,
                width,
                height: 1,
            },
        ));
        x += width + 1;
    }
    segments
}

/// The add-record button cell, shared with mouse hit-testing
pub fn add_button_rect(panel: Rect) -> Rect {
    Rect {
        x: panel.x + panel.width.saturating_sub(5),
        y: panel.y + panel.height.saturating_sub(2),
        width: 3,
        height: 1,
    }
}

/// Draw the record tabs, the empty-state line and the add button
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    for (tab, cell) in tab_segments(area) {
        let style = if app.state.records.selected == tab {
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        // Counts arrive with record storage; everything reads zero now
        let label = Paragraph::new(Span::styled(format!("{} 0", tab.label()), style))
            .alignment(Alignment::Center);
        frame.render_widget(label, cell);
    }

    if area.height >= 4 {
        let hint_area = Rect {
            x: area.x,
            y: area.y + 3,
            width: area.width,
            height: 1,
        };
        let tab = app.state.records.selected;
        let hint = Paragraph::new(Span::styled(
            format!("Press + to record your {}.", tab.label().to_lowercase()),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);
    }

    if area.height >= 3 {
        let button = Paragraph::new(Span::styled(
            " + ",
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(button, add_button_rect(area));
    }
}
