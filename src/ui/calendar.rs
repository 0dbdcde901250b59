//! Calendar screen: header, weekday labels, paged date grid, record panel
//!
//! The grid strip draws the two pages that overlap the viewport at the
//! current fractional position. During a month/week morph the grid
//! region follows the animated height while rows are lifted, shifted
//! and faded per the row choreography; the anchor row paints last so it
//! stays on top of its fading neighbors.

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use super::{record_tabs, ACCENT};
use crate::app::App;
use crate::date_grid::{same_day, DAYS_PER_WEEK, WEEKDAY_LABELS};
use crate::state::{
    anchor_date, anchor_row_index, content_lift, eased_progress, grid_rows, row_transform, Page,
    PX_PER_ROW, ROW_HEIGHT,
};

/// Weekday header tint for Sunday
const SUNDAY: Color = Color::Rgb(0xc6, 0x28, 0x28);
/// Weekday header tint for Saturday
const SATURDAY: Color = Color::Rgb(0x15, 0x65, 0xc0);
/// Day number foreground
const DAY_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xea);
/// Days outside the page's month
const DAY_DIM: Color = Color::Rgb(0x6e, 0x6e, 0x73);
/// Selected day background
const SELECTED_BG: Color = Color::Rgb(0x69, 0x8d, 0xa9);
/// Selected day number foreground
const SELECTED_TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);

/// Calendar screen regions, shared by drawing and mouse hit-testing
pub struct CalendarLayout {
    pub prev_button: Rect,
    pub title: Rect,
    pub next_button: Rect,
    pub weekday_row: Rect,
    pub grid: Rect,
    pub panel: Rect,
}

impl CalendarLayout {
    pub fn compute(content: Rect, grid_height_rows: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                // Header
                Constraint::Length(1),                // Weekday labels
                Constraint::Length(grid_height_rows), // Date grid
                Constraint::Min(0),                   // Record panel
            ])
            .split(content);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(5), // Prev chevron
                Constraint::Min(0),    // Title
                Constraint::Length(5), // Next chevron
            ])
            .split(chunks[0]);

        Self {
            prev_button: header[0],
            title: header[1],
            next_button: header[2],
            weekday_row: chunks[1],
            grid: chunks[2],
            panel: chunks[3],
        }
    }
}

/// Draw the calendar screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let layout = CalendarLayout::compute(area, grid_rows(app.transition.grid_height()));

    draw_header(frame, &layout, app);
    draw_weekday_labels(frame, layout.weekday_row);
    draw_grid(frame, layout.grid, app);
    record_tabs::draw(frame, layout.panel, app);
}

fn draw_header(frame: &mut Frame, layout: &CalendarLayout, app: &App) {
    let chevron = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Span::styled("<", chevron)).alignment(Alignment::Center),
        layout.prev_button,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(">", chevron)).alignment(Alignment::Center),
        layout.next_button,
    );

    let title = Paragraph::new(Span::styled(
        app.state.calendar.title_label(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, layout.title);
}

fn draw_weekday_labels(frame: &mut Frame, area: Rect) {
    let col_w = area.width / DAYS_PER_WEEK as u16;
    if col_w == 0 {
        return;
    }
    for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
        let style = match i {
            0 => Style::default().fg(SUNDAY),
            6 => Style::default().fg(SATURDAY),
            _ => Style::default().fg(Color::DarkGray),
        };
        let cell = Rect {
            x: area.x + i as u16 * col_w,
            y: area.y,
            width: col_w,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(*label, style)).alignment(Alignment::Center),
            cell,
        );
    }
}

fn draw_grid(frame: &mut Frame, grid: Rect, app: &App) {
    if grid.width == 0 || grid.height == 0 {
        return;
    }
    let cal = &app.state.calendar;
    let mode = cal.view_mode;
    let len = app.pager.window(mode).len();
    let position = app.viewport.position();

    // The strip shows at most two pages at a fractional position
    let first = position.floor().max(0.0) as usize;
    let last = (first + 1).min(len.saturating_sub(1));
    for index in first..=last {
        let Some(page) = app.pager.page_at(mode, index, cal) else {
            continue;
        };
        let x_off = ((index as f32 - position) * grid.width as f32).round() as i32;
        draw_page(frame, grid, x_off, &page, app);
    }
}

fn draw_page(frame: &mut Frame, grid: Rect, x_off: i32, page: &Page, app: &App) {
    if x_off.unsigned_abs() >= grid.width as u32 {
        return;
    }
    let col_w = grid.width / DAYS_PER_WEEK as u16;
    if col_w == 0 {
        return;
    }

    let cal = &app.state.calendar;
    let phase = app.transition.phase();
    let eased = eased_progress(app.transition.progress());
    let anchor = anchor_date(phase, cal.selected_date, cal.week_anchor);
    let anchor_row = anchor.and_then(|date| anchor_row_index(&page.days, date));
    let lift = content_lift(phase, anchor_row, eased);
    let dim_outside = page.days.len() > DAYS_PER_WEEK;

    let row_count = page.days.len() / DAYS_PER_WEEK;
    // Anchor row paints last so it covers its fading neighbors
    let mut order: Vec<usize> = (0..row_count).collect();
    if let Some(anchor_row) = anchor_row {
        order.retain(|r| *r != anchor_row);
        order.push(anchor_row);
    }

    for row in order {
        let transform = row_transform(phase, anchor_row == Some(row), eased);
        if transform.opacity <= 0.0 {
            continue;
        }
        let y_px = row as f32 * ROW_HEIGHT + lift + transform.shift_y;
        let y_rel = (y_px / PX_PER_ROW).round() as i32;
        if y_rel < 0 || y_rel >= grid.height as i32 {
            continue;
        }
        let y = grid.y + y_rel as u16;

        let days = &page.days[row * DAYS_PER_WEEK..(row + 1) * DAYS_PER_WEEK];
        for (col, date) in days.iter().enumerate() {
            let x = grid.x as i32 + x_off + (col as u16 * col_w) as i32;
            if x < grid.x as i32 || x + col_w as i32 > grid.x as i32 + grid.width as i32 {
                continue;
            }
            let cell = Rect {
                x: x as u16,
                y,
                width: col_w,
                height: 1,
            };
            let in_month = !dim_outside || date.month0() == page.month0;
            draw_day_cell(
                frame,
                cell,
                *date,
                in_month,
                transform.opacity,
                cal.selected_date,
                cal.today,
            );
        }
    }
}

fn draw_day_cell(
    frame: &mut Frame,
    cell: Rect,
    date: NaiveDate,
    in_month: bool,
    opacity: f32,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) {
    let style = if same_day(Some(date), selected) {
        Style::default()
            .fg(fade(SELECTED_TEXT, opacity))
            .bg(fade(SELECTED_BG, opacity))
            .add_modifier(Modifier::BOLD)
    } else if !in_month {
        Style::default().fg(fade(DAY_DIM, opacity))
    } else if date == today {
        Style::default().fg(fade(ACCENT, opacity))
    } else {
        Style::default().fg(fade(DAY_TEXT, opacity))
    };

    let number = Paragraph::new(Span::styled(format!("{:>2}", date.day()), style))
        .alignment(Alignment::Center);
    frame.render_widget(number, cell);
}

/// Scale a color toward the (dark) terminal background
fn fade(color: Color, opacity: f32) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };
    let k = opacity.clamp(0.0, 1.0);
    Color::Rgb(
        (r as f32 * k) as u8,
        (g as f32 * k) as u8,
        (b as f32 * k) as u8,
    )
}
