//! UI module for rendering the TUI

mod calendar;
mod layout;
mod placeholder;
mod record_tabs;

use crate::app::App;
use crate::state::Screen;
use ratatui::style::Color;
use ratatui::Frame;

pub use calendar::CalendarLayout;
pub use layout::{create_layout, tab_hit};
pub use record_tabs::{add_button_rect, tab_segments};

/// Interface accent used across screens
pub const ACCENT: Color = Color::Rgb(0x73, 0xda, 0xe9);

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (content_area, tab_area) = layout::create_layout(area);

    // Draw the active screen
    match app.state.current_screen {
        Screen::Calendar => calendar::draw(frame, content_area, app),
        screen => placeholder::draw(frame, content_area, app, screen),
    }

    layout::draw_tab_bar(frame, tab_area, app);
    layout::draw_status_bar(frame, app);
}
