//! Calendar view state
//!
//! The month window is positioned by `ym`, the week window by
//! `week_anchor`; paging and the month/week morph both read and move
//! these through the methods here.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date_grid::{week_start, YearMonth};

/// Grid shape the calendar rests in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub view_mode: ViewMode,
    pub today: NaiveDate,
    /// Month shown on the month window's center page
    pub ym: YearMonth,
    /// Last tapped date, if any
    pub selected_date: Option<NaiveDate>,
    /// Date anchoring the week window's center page
    pub week_anchor: NaiveDate,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view_mode: ViewMode::Month,
            today,
            ym: YearMonth::containing(today),
            selected_date: Some(today),
            week_anchor: today,
        }
    }

    /// Move the centered month by whole months
    pub fn shift_month(&mut self, delta: i32) {
        self.ym = self.ym.add_months(delta);
    }

    /// Move the anchored week by whole weeks, normalizing the anchor to
    /// the start of its week
    pub fn shift_week(&mut self, delta: i32) {
        self.week_anchor = week_start(self.week_anchor) + Duration::days(7 * delta as i64);
    }

    /// Select a date; in week mode the selection re-anchors the week
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
        if self.view_mode == ViewMode::Week {
            self.week_anchor = date;
        }
    }

    /// Header title: the centered month, or the month containing the
    /// visible week's first day
    pub fn title_label(&self) -> String {
        match self.view_mode {
            ViewMode::Month => self.ym.title(),
            ViewMode::Week => YearMonth::containing(week_start(self.week_anchor)).title(),
        }
    }
}
