//! Placeholder screens around the calendar

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::ACCENT;
use crate::app::App;
use crate::state::{RecordTab, Screen, ViewMode};

/// Draw a non-calendar screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App, screen: Screen) {
    let content = match screen {
        Screen::Home => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Today at a glance will appear here.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        Screen::Library => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Saved meals and routines will appear here.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        Screen::MyPage => my_page_lines(app),
        Screen::Calendar => return,
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(format!(" {} ", screen.label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn my_page_lines(app: &App) -> Vec<Line<'_>> {
    let view = match app.config.default_view_mode.unwrap_or_default() {
        ViewMode::Month => "month",
        ViewMode::Week => "week",
    };
    let tab = match app.config.default_record_tab.unwrap_or_default() {
        RecordTab::Diet => "diet",
        RecordTab::Exercise => "exercise",
        RecordTab::Body => "body",
    };
    let animations = if app.config.animations.unwrap_or(true) {
        "on"
    } else {
        "off"
    };

    vec![
        Line::from(""),
        Line::from(Span::styled(
            "Preferences",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Default view: ", Style::default().fg(Color::DarkGray)),
            Span::raw(view),
        ]),
        Line::from(vec![
            Span::styled("Default record tab: ", Style::default().fg(Color::DarkGray)),
            Span::raw(tab),
        ]),
        Line::from(vec![
            Span::styled("Animations: ", Style::default().fg(Color::DarkGray)),
            Span::raw(animations),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press s to save the current calendar view and tab as defaults.",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}
