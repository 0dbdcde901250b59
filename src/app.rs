//! Application state and core logic

use crate::config::TuiConfig;
use crate::date_grid::{week_start, YearMonth, DAYS_PER_WEEK};
use crate::state::{
    day_column_at, day_row_at, grid_rows, AppState, DragAxis, DragGesture, DragOutcome, DragUpdate,
    DragUpdateOutcome, InfinitePager, PagerViewport, ReleaseOutcome, Screen, SettleOutcome,
    TransitionController, ViewMode, MONTH_GRID_H, PX_PER_COL, PX_PER_ROW, WEEK_GRID_H,
};
use crate::ui::{self, CalendarLayout};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// State flips that must land on the tick after the one that queued
/// them, so frames drawn in between observe a consistent mode and phase
#[derive(Debug, Clone, Copy)]
enum Deferred {
    SetIdle,
    ResetProgress,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Month and week paging windows
    pub pager: InfinitePager,
    /// Scroll position of the horizontal pager
    pub viewport: PagerViewport,
    /// Month/week grid morph driver
    pub transition: TransitionController,
    /// Pointer arbitration for the calendar body
    gesture: DragGesture,
    /// Queued end-of-batch state flips
    deferred: Vec<Deferred>,
    /// User configuration
    pub config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
    /// Status feedback message
    pub status_message: Option<String>,
    /// Terminal size for mouse hit-testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance with configuration loaded from disk
    pub fn new(today: NaiveDate) -> Self {
        let config = TuiConfig::load().unwrap_or_else(|err| {
            tracing::warn!("Failed to load config, using defaults: {err}");
            TuiConfig::default()
        });
        Self::with_config(today, config)
    }

    pub fn with_config(today: NaiveDate, config: TuiConfig) -> Self {
        let mut state = AppState::new(today);
        state.calendar.view_mode = config.default_view_mode.unwrap_or_default();
        state.records.selected = config.default_record_tab.unwrap_or_default();

        let initial_height = match state.calendar.view_mode {
            ViewMode::Month => MONTH_GRID_H,
            ViewMode::Week => WEEK_GRID_H,
        };
        let mut transition = TransitionController::new(initial_height);
        let mut viewport = PagerViewport::new();
        if config.animations == Some(false) {
            transition.set_snap_duration(Duration::ZERO);
            viewport.set_settle_duration(Duration::ZERO);
        }

        // Land the pager on the starting mode's center page
        let mut pager = InfinitePager::new();
        pager.request_scroll(pager.current_index(state.calendar.view_mode), false);

        Self {
            state,
            pager,
            viewport,
            transition,
            gesture: DragGesture::new(),
            deferred: Vec::new(),
            config,
            quit: false,
            status_message: None,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether anything is mid-flight and the event loop should poll at
    /// frame rate
    pub fn is_animating(&self) -> bool {
        self.transition.is_animating() || self.viewport.is_animating()
    }

    /// Advance animations and run queued effects. Called once per frame,
    /// after input handling and before drawing.
    pub fn tick(&mut self, now: Instant) {
        for deferred in std::mem::take(&mut self.deferred) {
            match deferred {
                Deferred::SetIdle => self.transition.set_idle(),
                Deferred::ResetProgress => self.transition.reset_progress(),
            }
        }

        if let Some(settle) = self.transition.tick(now) {
            self.apply_settle(settle, now);
        }

        // Mode is re-read after the settle above may have switched it
        if let Some(index) = self.viewport.tick(now) {
            let mode = self.state.calendar.view_mode;
            self.pager
                .on_page_momentum_end(mode, index, &mut self.state.calendar);
        }

        self.serve_scroll_request(now);
    }

    /// Hand the pending pager scroll to the viewport. An index the
    /// window has not laid out yet is retried clamped, without
    /// animation.
    fn serve_scroll_request(&mut self, now: Instant) {
        let Some(req) = self.pager.scroll_request() else {
            return;
        };
        let len = self.pager.window(self.state.calendar.view_mode).len();
        if let Err(err) = self.viewport.apply_request(req, len, now) {
            tracing::warn!("Pager scroll failed, retrying: {err}");
            self.pager
                .request_scroll(req.index.min(len.saturating_sub(1)), false);
        }
    }

    /// Run the application half of a settled grid snap
    fn apply_settle(&mut self, settle: SettleOutcome, now: Instant) {
        match settle {
            SettleOutcome::CommitToWeek => {
                self.switch_to_week(now);
                self.deferred.push(Deferred::SetIdle);
            }
            SettleOutcome::CommitToMonth => {
                self.transition.end_drag_preview();
                self.deferred.push(Deferred::SetIdle);
            }
            SettleOutcome::CancelToWeek { revert_mode } => {
                if revert_mode {
                    self.set_view_mode(ViewMode::Week, now);
                }
                self.transition.end_drag_preview();
                self.deferred.push(Deferred::SetIdle);
            }
            SettleOutcome::ToggleToWeekDone => {
                self.switch_to_week(now);
                self.transition.set_idle();
                self.transition.reset_progress();
            }
            SettleOutcome::ToggleToMonthDone => {
                self.transition.end_drag_preview();
                self.transition.set_idle();
            }
        }
    }

    /// Change the view mode and run the mode-change effects: re-center
    /// the pager in the new mode's window and converge the grid height
    /// on the mode's resting shape. The height snap is skipped while a
    /// drag preview owns the height.
    fn set_view_mode(&mut self, mode: ViewMode, now: Instant) {
        if self.state.calendar.view_mode == mode {
            return;
        }
        self.state.calendar.view_mode = mode;
        self.pager
            .request_scroll(self.pager.current_index(mode), false);
        match mode {
            ViewMode::Month => {
                if !self.transition.is_drag_preview() {
                    self.transition.animate_height_to_month(now);
                }
            }
            ViewMode::Week => {
                self.transition.animate_height_to_week(now);
                self.deferred.push(Deferred::ResetProgress);
            }
        }
    }

    /// Discrete switch to week mode, anchoring the week at the selection
    fn switch_to_week(&mut self, now: Instant) {
        let cal = &mut self.state.calendar;
        cal.week_anchor = cal.selected_date.unwrap_or(cal.today);
        self.set_view_mode(ViewMode::Week, now);
    }

    /// Discrete switch to month mode, showing the week anchor's month
    fn switch_to_month(&mut self, now: Instant) {
        let cal = &mut self.state.calendar;
        cal.ym = YearMonth::containing(cal.week_anchor);
        self.set_view_mode(ViewMode::Month, now);
    }

    /// Animate to the opposite view mode. The week-to-month direction
    /// switches the discrete mode first so the expanding grid already
    /// shows month content.
    fn handle_toggle(&mut self, now: Instant) {
        match self.state.calendar.view_mode {
            ViewMode::Month => self.transition.begin_toggle_to_week(now),
            ViewMode::Week => {
                self.transition.begin_month_preview_for_toggle();
                self.switch_to_month(now);
                self.transition.start_toggle_to_month(now);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        // Clear any status message on key press
        self.status_message = None;

        // Global shortcuts
        if key.code == KeyCode::Char('q')
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.quit = true;
            return Ok(());
        }
        if let KeyCode::Char(c) = key.code {
            if let Some(screen) = c.to_digit(10).and_then(Screen::from_digit) {
                self.state.current_screen = screen;
                return Ok(());
            }
        }

        match self.state.current_screen {
            Screen::Calendar => self.handle_calendar_key(key, now),
            Screen::MyPage => self.handle_my_page_key(key),
            Screen::Home | Screen::Library => {}
        }
        Ok(())
    }

    fn handle_calendar_key(&mut self, key: KeyEvent, now: Instant) {
        let mode = self.state.calendar.view_mode;
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.pager.on_press_prev(mode),
            KeyCode::Char('l') | KeyCode::Right => self.pager.on_press_next(mode),
            KeyCode::Char('t') => self.handle_toggle(now),
            KeyCode::Tab => self.state.records.next_tab(),
            KeyCode::Char('[') => self.nudge_selection(-1),
            KeyCode::Char(']') => self.nudge_selection(1),
            KeyCode::Home => self.jump_to_today(),
            _ => {}
        }
    }

    fn handle_my_page_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('s') {
            self.config.default_view_mode = Some(self.state.calendar.view_mode);
            self.config.default_record_tab = Some(self.state.records.selected);
            self.status_message = Some(match self.config.save() {
                Ok(()) => "Preferences saved".to_string(),
                Err(err) => format!("Failed to save preferences: {err}"),
            });
        }
    }

    /// Step the selection one day, paging when it leaves the visible
    /// month or week
    fn nudge_selection(&mut self, delta: i32) {
        let cal = &self.state.calendar;
        let current = cal.selected_date.unwrap_or(cal.today);
        let next = if delta < 0 {
            current.pred_opt()
        } else {
            current.succ_opt()
        };
        let Some(next) = next else {
            return;
        };

        // The anchor date and displayed month follow through the pager's
        // momentum path rather than directly, so the page change animates
        let mode = self.state.calendar.view_mode;
        self.state.calendar.selected_date = Some(next);
        let page_changed = match mode {
            ViewMode::Month => YearMonth::containing(next) != self.state.calendar.ym,
            ViewMode::Week => week_start(next) != week_start(self.state.calendar.week_anchor),
        };
        if page_changed {
            if delta < 0 {
                self.pager.on_press_prev(mode);
            } else {
                self.pager.on_press_next(mode);
            }
        }
    }

    /// Bring the calendar back to today in the current mode
    fn jump_to_today(&mut self) {
        let cal = &mut self.state.calendar;
        let today = cal.today;
        cal.selected_date = Some(today);
        cal.week_anchor = today;
        cal.ym = YearMonth::containing(today);
        let mode = cal.view_mode;
        self.pager
            .request_scroll(self.pager.current_index(mode), false);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> Result<()> {
        // Clear any status message on click
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            self.status_message = None;
        }

        let Some((content, tab_bar)) = self.screen_areas() else {
            return Ok(());
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(screen) = ui::tab_hit(tab_bar, mouse.column, mouse.row) {
                    self.state.current_screen = screen;
                    return Ok(());
                }
                if self.state.current_screen == Screen::Calendar {
                    self.handle_calendar_press(mouse.column, mouse.row, content, now);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (x, y) = pixel_point(mouse.column, mouse.row);
                if let Some(update) = self.gesture.on_move(x, y, now) {
                    self.handle_drag_update(update, content, now);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x, y) = pixel_point(mouse.column, mouse.row);
                if let Some(outcome) = self.gesture.on_up(x, y, now) {
                    self.handle_drag_outcome(outcome, mouse.column, mouse.row, content, now);
                }
            }
            MouseEventKind::ScrollUp => {
                if self.state.current_screen == Screen::Calendar
                    && hit(content, mouse.column, mouse.row)
                {
                    self.pager.on_press_prev(self.state.calendar.view_mode);
                }
            }
            MouseEventKind::ScrollDown => {
                if self.state.current_screen == Screen::Calendar
                    && hit(content, mouse.column, mouse.row)
                {
                    self.pager.on_press_next(self.state.calendar.view_mode);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Route a left press on the calendar screen. A press on the grid
    /// starts a pointer track; everything else is an immediate control.
    fn handle_calendar_press(&mut self, column: u16, row: u16, content: Rect, now: Instant) {
        let layout = self.calendar_layout(content);
        if hit(layout.grid, column, row) {
            let (x, y) = pixel_point(column, row);
            self.gesture.on_down(x, y, now);
            self.transition.on_drag_begin();
            return;
        }
        if hit(layout.prev_button, column, row) {
            self.pager.on_press_prev(self.state.calendar.view_mode);
            return;
        }
        if hit(layout.next_button, column, row) {
            self.pager.on_press_next(self.state.calendar.view_mode);
            return;
        }
        if hit(layout.title, column, row) {
            self.handle_toggle(now);
            return;
        }
        for (tab, area) in ui::tab_segments(layout.panel) {
            if hit(area, column, row) {
                self.state.records.select(tab);
                return;
            }
        }
        if hit(ui::add_button_rect(layout.panel), column, row) {
            self.status_message = Some("Records cannot be added yet".to_string());
        }
    }

    fn handle_drag_update(&mut self, update: DragUpdate, content: Rect, now: Instant) {
        match update.axis {
            DragAxis::Vertical => {
                if self.transition.on_drag_update(update.dx, update.dy)
                    == DragUpdateOutcome::MonthPreviewBegan
                {
                    self.switch_to_month(now);
                }
            }
            DragAxis::Horizontal => {
                if update.just_claimed {
                    self.viewport.begin_drag(update.dx);
                }
                let layout = self.calendar_layout(content);
                let page_w = layout.grid.width as f32 * PX_PER_COL;
                let len = self.pager.window(self.state.calendar.view_mode).len();
                self.viewport.drag_to(update.dx, page_w, len);
            }
        }
    }

    fn handle_drag_outcome(
        &mut self,
        outcome: DragOutcome,
        column: u16,
        row: u16,
        content: Rect,
        now: Instant,
    ) {
        match outcome {
            DragOutcome::Tap { .. } => {
                let layout = self.calendar_layout(content);
                self.select_day_at(column, row, layout.grid);
            }
            DragOutcome::Release {
                axis: DragAxis::Vertical,
                dy,
                vy,
                ..
            } => {
                if self.transition.on_drag_end(dy, vy, now) == ReleaseOutcome::SettlingIdleQueued {
                    self.deferred.push(Deferred::SetIdle);
                }
            }
            DragOutcome::Release {
                axis: DragAxis::Horizontal,
                vx,
                ..
            } => {
                let len = self.pager.window(self.state.calendar.view_mode).len();
                self.viewport.end_drag(vx, len, now);
            }
        }
    }

    /// Resolve a tap on the grid into a date selection
    fn select_day_at(&mut self, column: u16, row: u16, grid: Rect) {
        let Some(col) = day_column_at(column, grid.x, grid.width) else {
            return;
        };
        let Some(day_row) = day_row_at(row, grid.y) else {
            return;
        };
        let mode = self.state.calendar.view_mode;
        let index = self.viewport.position().round().max(0.0) as usize;
        let Some(page) = self.pager.page_at(mode, index, &self.state.calendar) else {
            return;
        };
        let Some(date) = page.days.get(day_row * DAYS_PER_WEEK + col).copied() else {
            return;
        };
        self.state.calendar.select_date(date);
    }

    /// Layout rectangles for the stored terminal size
    fn screen_areas(&self) -> Option<(Rect, Rect)> {
        let (height, width) = self.terminal_size?;
        Some(ui::create_layout(Rect::new(0, 0, width, height)))
    }

    fn calendar_layout(&self, content: Rect) -> CalendarLayout {
        CalendarLayout::compute(content, grid_rows(self.transition.grid_height()))
    }
}

fn hit(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

/// Terminal cell coordinates mapped into gesture pixels
fn pixel_point(column: u16, row: u16) -> (f32, f32) {
    (column as f32 * PX_PER_COL, row as f32 * PX_PER_ROW)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RecordTab;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn after(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// App on a 28x30 terminal with today pinned and no config file
    fn app_at(today: NaiveDate) -> App {
        app_with(today, TuiConfig::default())
    }

    fn app_with(today: NaiveDate, config: TuiConfig) -> App {
        let mut app = App::with_config(today, config);
        app.terminal_size = Some((30, 28));
        app
    }

    fn week_config() -> TuiConfig {
        TuiConfig {
            default_view_mode: Some(ViewMode::Week),
            ..Default::default()
        }
    }

    mod setup_tests {
        use super::*;

        #[test]
        fn test_starts_centered_in_month_mode() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));

            assert_eq!(app.state.calendar.view_mode, ViewMode::Month);
            assert_eq!(app.transition.grid_height(), MONTH_GRID_H);
            assert_eq!(app.state.calendar.title_label(), "August 2026");

            app.tick(t0);
            assert_eq!(app.viewport.position(), 24.0);
        }

        #[test]
        fn test_config_defaults_apply() {
            let t0 = Instant::now();
            let mut app = app_with(
                date(2026, 8, 21),
                TuiConfig {
                    default_view_mode: Some(ViewMode::Week),
                    default_record_tab: Some(RecordTab::Body),
                    animations: None,
                },
            );

            assert_eq!(app.state.calendar.view_mode, ViewMode::Week);
            assert_eq!(app.transition.grid_height(), WEEK_GRID_H);
            assert_eq!(app.state.records.selected, RecordTab::Body);

            app.tick(t0);
            assert_eq!(app.viewport.position(), 26.0);
        }

        #[test]
        fn test_disabled_animations_toggle_in_one_tick() {
            let t0 = Instant::now();
            let mut app = app_with(
                date(2026, 8, 21),
                TuiConfig {
                    animations: Some(false),
                    ..Default::default()
                },
            );
            app.tick(t0);

            app.handle_key(key(KeyCode::Char('t')), t0).unwrap();
            app.tick(t0);

            assert_eq!(app.state.calendar.view_mode, ViewMode::Week);
            assert_eq!(app.transition.grid_height(), WEEK_GRID_H);
            assert_eq!(app.viewport.position(), 26.0);
        }
    }

    mod key_tests {
        use super::*;

        #[test]
        fn test_quit_keys() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Char('q')), t0).unwrap();
            assert!(app.should_quit());

            let mut app = app_at(date(2026, 8, 21));
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), t0)
                .unwrap();
            assert!(app.should_quit());
        }

        #[test]
        fn test_number_keys_switch_screens() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));

            app.handle_key(key(KeyCode::Char('3')), t0).unwrap();
            assert_eq!(app.state.current_screen, Screen::Library);
            app.handle_key(key(KeyCode::Char('2')), t0).unwrap();
            assert_eq!(app.state.current_screen, Screen::Calendar);
        }

        #[test]
        fn test_calendar_keys_ignored_on_other_screens() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            app.handle_key(key(KeyCode::Char('1')), t0).unwrap();
            app.handle_key(key(KeyCode::Char('l')), t0).unwrap();
            app.tick(t0);
            app.tick(after(t0, 400));

            assert_eq!(app.state.calendar.ym, YearMonth::new(2026, 7));
            assert_eq!(app.viewport.position(), 24.0);
        }

        #[test]
        fn test_chevron_key_pages_to_next_month() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            app.handle_key(key(KeyCode::Char('l')), t0).unwrap();
            app.tick(t0);
            app.tick(after(t0, 300));

            assert_eq!(app.state.calendar.ym, YearMonth::new(2026, 8));
            assert_eq!(app.viewport.position(), 25.0);
        }

        #[test]
        fn test_three_nexts_land_on_january() {
            let t0 = Instant::now();
            let mut app = app_at(date(2024, 10, 15));
            app.tick(t0);

            let mut now = t0;
            for _ in 0..3 {
                app.handle_key(key(KeyCode::Char('l')), now).unwrap();
                app.tick(now);
                now = after(now, 300);
                app.tick(now);
            }

            assert_eq!(app.state.calendar.ym, YearMonth::new(2025, 0));
            // Center at 27 is still clear of the edge buffer, so the
            // window has not grown
            assert_eq!(app.pager.window(ViewMode::Month).len(), 49);
            assert_eq!(app.pager.current_index(ViewMode::Month), 27);
        }

        #[test]
        fn test_record_tab_key_cycles() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));

            app.handle_key(key(KeyCode::Tab), t0).unwrap();
            assert_eq!(app.state.records.selected, RecordTab::Exercise);
        }

        #[test]
        fn test_day_nudge_pages_when_leaving_the_week() {
            let t0 = Instant::now();
            // 2026-08-21 is a Friday; its week runs Aug 16 .. Aug 22
            let mut app = app_with(date(2026, 8, 21), week_config());
            app.tick(t0);

            app.handle_key(key(KeyCode::Char(']')), t0).unwrap();
            assert_eq!(app.state.calendar.selected_date, Some(date(2026, 8, 22)));
            assert_eq!(app.state.calendar.week_anchor, date(2026, 8, 21));

            app.handle_key(key(KeyCode::Char(']')), t0).unwrap();
            app.tick(t0);
            app.tick(after(t0, 300));

            assert_eq!(app.state.calendar.selected_date, Some(date(2026, 8, 23)));
            assert_eq!(app.state.calendar.week_anchor, date(2026, 8, 23));
            assert_eq!(app.pager.current_index(ViewMode::Week), 27);
        }

        #[test]
        fn test_day_nudge_pages_when_leaving_the_month() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 31));
            app.tick(t0);

            app.handle_key(key(KeyCode::Char(']')), t0).unwrap();
            app.tick(t0);
            app.tick(after(t0, 300));

            assert_eq!(app.state.calendar.selected_date, Some(date(2026, 9, 1)));
            assert_eq!(app.state.calendar.ym, YearMonth::new(2026, 8));
        }

        #[test]
        fn test_home_key_returns_to_today() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            let mut now = t0;
            for _ in 0..2 {
                app.handle_key(key(KeyCode::Char('l')), now).unwrap();
                app.tick(now);
                now = after(now, 300);
                app.tick(now);
            }
            assert_eq!(app.state.calendar.ym, YearMonth::new(2026, 9));

            app.handle_key(key(KeyCode::Home), now).unwrap();
            app.tick(now);

            assert_eq!(app.state.calendar.ym, YearMonth::new(2026, 7));
            assert_eq!(app.state.calendar.selected_date, Some(date(2026, 8, 21)));
            assert_eq!(app.state.calendar.week_anchor, date(2026, 8, 21));
        }
    }

    mod toggle_tests {
        use super::*;
        use crate::state::TransitionPhase;

        #[test]
        fn test_toggle_key_to_week() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            app.handle_key(key(KeyCode::Char('t')), t0).unwrap();
            assert_eq!(app.state.calendar.view_mode, ViewMode::Month);

            app.tick(after(t0, 300));
            app.tick(after(t0, 320));

            assert_eq!(app.state.calendar.view_mode, ViewMode::Week);
            assert_eq!(app.transition.grid_height(), WEEK_GRID_H);
            assert_eq!(app.transition.phase(), TransitionPhase::Idle);
            assert_eq!(app.transition.progress(), 0.0);
            assert_eq!(app.state.calendar.week_anchor, date(2026, 8, 21));
            assert_eq!(app.viewport.position(), 26.0);
        }

        #[test]
        fn test_toggle_key_back_to_month_switches_immediately() {
            let t0 = Instant::now();
            let mut app = app_with(date(2026, 8, 21), week_config());
            app.tick(t0);

            app.handle_key(key(KeyCode::Char('t')), t0).unwrap();
            // Mode flips before the expand animation so the month grid
            // is the one fading in under the motion
            assert_eq!(app.state.calendar.view_mode, ViewMode::Month);
            assert!(app.transition.is_drag_preview());
            assert_eq!(app.transition.grid_height(), WEEK_GRID_H);

            app.tick(t0);
            app.tick(after(t0, 300));
            app.tick(after(t0, 320));

            assert_eq!(app.transition.grid_height(), MONTH_GRID_H);
            assert!(!app.transition.is_drag_preview());
            assert_eq!(app.transition.phase(), TransitionPhase::Idle);
            assert_eq!(app.viewport.position(), 24.0);
        }
    }

    mod drag_tests {
        use super::*;
        use crate::state::TransitionPhase;

        fn press(app: &mut App, column: u16, row: u16, at: Instant) {
            app.handle_mouse(
                mouse(MouseEventKind::Down(MouseButton::Left), column, row),
                at,
            )
            .unwrap();
        }

        fn drag(app: &mut App, column: u16, row: u16, at: Instant) {
            app.handle_mouse(
                mouse(MouseEventKind::Drag(MouseButton::Left), column, row),
                at,
            )
            .unwrap();
        }

        fn release(app: &mut App, column: u16, row: u16, at: Instant) {
            app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), column, row), at)
                .unwrap();
        }

        #[test]
        fn test_drag_up_commits_to_week() {
            let t0 = Instant::now();
            // 2024-03-15 sits on row 2 of a grid starting Sunday Feb 25
            let mut app = app_at(date(2024, 3, 15));
            app.tick(t0);

            press(&mut app, 14, 12, after(t0, 10));
            drag(&mut app, 14, 8, after(t0, 60));
            release(&mut app, 14, 8, after(t0, 110));

            app.tick(after(t0, 400));
            app.tick(after(t0, 420));

            assert_eq!(app.state.calendar.view_mode, ViewMode::Week);
            assert_eq!(app.transition.grid_height(), WEEK_GRID_H);
            assert_eq!(app.transition.phase(), TransitionPhase::Idle);
            assert_eq!(app.state.calendar.week_anchor, date(2024, 3, 15));
            assert_eq!(
                week_start(app.state.calendar.week_anchor),
                date(2024, 3, 10)
            );
        }

        #[test]
        fn test_short_drag_snaps_back() {
            let t0 = Instant::now();
            let mut app = app_at(date(2024, 3, 15));
            app.tick(t0);

            press(&mut app, 14, 12, after(t0, 10));
            drag(&mut app, 14, 10, after(t0, 60));
            release(&mut app, 14, 10, after(t0, 110));

            app.tick(after(t0, 200));
            app.tick(after(t0, 400));

            assert_eq!(app.state.calendar.view_mode, ViewMode::Month);
            assert_eq!(app.transition.grid_height(), MONTH_GRID_H);
            assert_eq!(app.transition.phase(), TransitionPhase::Idle);
        }

        #[test]
        fn test_fling_up_commits_by_velocity() {
            let t0 = Instant::now();
            let mut app = app_at(date(2024, 3, 15));
            app.tick(t0);

            press(&mut app, 14, 12, after(t0, 10));
            drag(&mut app, 14, 9, after(t0, 20));
            release(&mut app, 14, 9, after(t0, 30));

            app.tick(after(t0, 300));
            app.tick(after(t0, 320));

            assert_eq!(app.state.calendar.view_mode, ViewMode::Week);
        }

        #[test]
        fn test_preview_switches_mode_mid_drag_and_commits() {
            let t0 = Instant::now();
            let mut app = app_with(date(2026, 8, 21), week_config());
            app.tick(t0);

            press(&mut app, 14, 2, after(t0, 10));
            drag(&mut app, 14, 7, after(t0, 60));

            // The month grid is already previewing under the finger
            assert_eq!(app.state.calendar.view_mode, ViewMode::Month);
            assert!(app.transition.is_drag_preview());
            assert_eq!(app.state.calendar.ym, YearMonth::new(2026, 7));

            release(&mut app, 14, 7, after(t0, 110));
            app.tick(after(t0, 200));
            app.tick(after(t0, 400));
            app.tick(after(t0, 420));

            assert_eq!(app.state.calendar.view_mode, ViewMode::Month);
            assert!(!app.transition.is_drag_preview());
            assert_eq!(app.transition.grid_height(), MONTH_GRID_H);
            assert_eq!(app.transition.phase(), TransitionPhase::Idle);
            assert_eq!(app.viewport.position(), 24.0);
        }

        #[test]
        fn test_preview_cancel_reverts_to_week() {
            let t0 = Instant::now();
            let mut app = app_with(date(2026, 8, 21), week_config());
            app.tick(t0);

            press(&mut app, 14, 2, after(t0, 10));
            drag(&mut app, 14, 4, after(t0, 60));
            assert_eq!(app.state.calendar.view_mode, ViewMode::Month);

            release(&mut app, 14, 4, after(t0, 110));
            app.tick(after(t0, 400));
            app.tick(after(t0, 420));

            // The revert leaves the anchor dates exactly as they were
            assert_eq!(app.state.calendar.view_mode, ViewMode::Week);
            assert_eq!(app.state.calendar.week_anchor, date(2026, 8, 21));
            assert_eq!(app.state.calendar.selected_date, Some(date(2026, 8, 21)));
            assert_eq!(app.transition.grid_height(), WEEK_GRID_H);
            assert_eq!(app.transition.phase(), TransitionPhase::Idle);
            assert!(!app.transition.is_drag_preview());
        }

        #[test]
        fn test_horizontal_fling_pages_to_next_month() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            press(&mut app, 24, 8, after(t0, 10));
            drag(&mut app, 21, 8, after(t0, 60));
            drag(&mut app, 3, 8, after(t0, 110));
            release(&mut app, 3, 8, after(t0, 160));

            app.tick(after(t0, 500));

            assert_eq!(app.state.calendar.ym, YearMonth::new(2026, 8));
            assert_eq!(app.viewport.position(), 25.0);
        }

        #[test]
        fn test_tap_selects_day() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 5));
            app.tick(t0);

            press(&mut app, 21, 8, after(t0, 10));
            release(&mut app, 21, 8, after(t0, 50));

            assert_eq!(app.state.calendar.selected_date, Some(date(2026, 8, 21)));
        }

        #[test]
        fn test_scroll_wheel_pages() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            app.handle_mouse(mouse(MouseEventKind::ScrollDown, 14, 8), after(t0, 10))
                .unwrap();
            app.tick(after(t0, 20));
            app.tick(after(t0, 400));

            assert_eq!(app.state.calendar.ym, YearMonth::new(2026, 8));
        }
    }

    mod mouse_nav_tests {
        use super::*;
        use crate::state::TransitionPhase;

        #[test]
        fn test_tab_bar_click_switches_screen() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));

            app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 22, 28), t0)
                .unwrap();
            assert_eq!(app.state.current_screen, Screen::MyPage);

            app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 3, 28), t0)
                .unwrap();
            assert_eq!(app.state.current_screen, Screen::Home);
        }

        #[test]
        fn test_chevron_click_pages_back() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            app.handle_mouse(
                mouse(MouseEventKind::Down(MouseButton::Left), 2, 0),
                after(t0, 10),
            )
            .unwrap();
            app.tick(after(t0, 20));
            app.tick(after(t0, 400));

            assert_eq!(app.state.calendar.ym, YearMonth::new(2026, 6));
            assert_eq!(app.viewport.position(), 23.0);
        }

        #[test]
        fn test_title_click_toggles() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            app.handle_mouse(
                mouse(MouseEventKind::Down(MouseButton::Left), 14, 0),
                after(t0, 10),
            )
            .unwrap();
            assert_eq!(app.transition.phase(), TransitionPhase::ToWeek);

            app.tick(after(t0, 300));
            app.tick(after(t0, 320));
            assert_eq!(app.state.calendar.view_mode, ViewMode::Week);
        }

        #[test]
        fn test_record_tab_click_selects() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            app.handle_mouse(
                mouse(MouseEventKind::Down(MouseButton::Left), 12, 14),
                after(t0, 10),
            )
            .unwrap();

            assert_eq!(app.state.records.selected, RecordTab::Exercise);
        }

        #[test]
        fn test_add_button_shows_status() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            app.handle_mouse(
                mouse(MouseEventKind::Down(MouseButton::Left), 24, 26),
                after(t0, 10),
            )
            .unwrap();

            assert!(app.status_message.is_some());
        }
    }

    mod retry_tests {
        use super::*;

        #[test]
        fn test_out_of_range_scroll_retries_clamped() {
            let t0 = Instant::now();
            let mut app = app_at(date(2026, 8, 21));
            app.tick(t0);

            app.pager.request_scroll(99, false);
            app.tick(after(t0, 10));
            app.tick(after(t0, 20));

            assert_eq!(app.viewport.position(), 48.0);
        }
    }
}
