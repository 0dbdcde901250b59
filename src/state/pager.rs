//! Infinite horizontal paging over month and week windows
//!
//! Each view mode pages across a window of integer offsets relative to a
//! base position held in `CalendarState`. Settling on a page applies the
//! paged distance to the base and re-centers the window on the landing
//! index; settling near either edge grows the window by a chunk. Growth
//! at the start shifts every index, so it re-centers and requests a
//! non-animated scroll that keeps the same page visible.

use chrono::{Datelike, Duration, NaiveDate};

use crate::date_grid::{month_matrix, week_days, week_start};

use super::calendar_state::{CalendarState, ViewMode};

/// Offsets added per extension of the month window
pub const MONTH_CHUNK: usize = 24;
/// Offsets added per extension of the week window
pub const WEEK_CHUNK: usize = 26;
/// Settling within this many pages of an edge extends the window
pub const EDGE_BUFFER: usize = 6;

/// Contiguous run of page offsets with a distinguished center index
#[derive(Debug, Clone)]
pub struct OffsetWindow {
    offsets: Vec<i32>,
    center: usize,
}

impl OffsetWindow {
    fn new(chunk: usize) -> Self {
        let half = chunk as i32;
        Self {
            offsets: (-half..=half).collect(),
            center: chunk,
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn center(&self) -> usize {
        self.center
    }

    pub fn offset_at(&self, index: usize) -> Option<i32> {
        self.offsets.get(index).copied()
    }

    fn extend_end(&mut self, chunk: usize) {
        let last = self.offsets.last().copied().unwrap_or(0);
        self.offsets.extend(last + 1..=last + chunk as i32);
    }

    /// Prepend a chunk; the center index shifts with the insertion
    fn extend_start(&mut self, chunk: usize) {
        let first = self.offsets.first().copied().unwrap_or(0);
        let mut grown: Vec<i32> = (first - chunk as i32..first).collect();
        grown.extend_from_slice(&self.offsets);
        self.offsets = grown;
        self.center += chunk;
    }
}

/// One rendered page of the horizontal pager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Identity that stays stable across window extensions
    pub key: String,
    pub days: Vec<NaiveDate>,
    /// 0-based month the page belongs to, for outside-day dimming
    pub month0: u32,
}

/// Programmatic scroll; a newer request replaces an unserved one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub index: usize,
    pub animated: bool,
    pub seq: u64,
}

/// Month and week offset windows plus the pending scroll slot
#[derive(Debug)]
pub struct InfinitePager {
    months: OffsetWindow,
    weeks: OffsetWindow,
    scroll_req: Option<ScrollRequest>,
    next_seq: u64,
}

impl Default for InfinitePager {
    fn default() -> Self {
        Self::new()
    }
}

impl InfinitePager {
    pub fn new() -> Self {
        Self {
            months: OffsetWindow::new(MONTH_CHUNK),
            weeks: OffsetWindow::new(WEEK_CHUNK),
            scroll_req: None,
            next_seq: 1,
        }
    }

    pub fn window(&self, mode: ViewMode) -> &OffsetWindow {
        match mode {
            ViewMode::Month => &self.months,
            ViewMode::Week => &self.weeks,
        }
    }

    /// Index of the page the base position corresponds to
    pub fn current_index(&self, mode: ViewMode) -> usize {
        self.window(mode).center()
    }

    /// Queue a programmatic scroll, replacing any unserved request
    pub fn request_scroll(&mut self, index: usize, animated: bool) {
        self.scroll_req = Some(ScrollRequest {
            index,
            animated,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    pub fn scroll_request(&self) -> Option<ScrollRequest> {
        self.scroll_req
    }

    /// Build the page at `index` against the current base position
    pub fn page_at(&self, mode: ViewMode, index: usize, cal: &CalendarState) -> Option<Page> {
        let window = self.window(mode);
        let offset = window.offset_at(index)?;
        let rel = offset - window.offset_at(window.center())?;
        match mode {
            ViewMode::Month => {
                let ym = cal.ym.add_months(rel);
                Some(Page {
                    key: format!("m-{offset}"),
                    days: month_matrix(ym),
                    month0: ym.month0,
                })
            }
            ViewMode::Week => {
                let start = week_start(cal.week_anchor) + Duration::days(7 * rel as i64);
                Some(Page {
                    key: format!("w-{offset}"),
                    days: week_days(start),
                    month0: start.month0(),
                })
            }
        }
    }

    /// A swipe settled on `next_index`: apply the paged distance to the
    /// base position, then grow the window when the landing is near an
    /// edge.
    pub fn on_page_momentum_end(
        &mut self,
        mode: ViewMode,
        next_index: usize,
        cal: &mut CalendarState,
    ) {
        let chunk = match mode {
            ViewMode::Month => MONTH_CHUNK,
            ViewMode::Week => WEEK_CHUNK,
        };

        let mut recenter_to = None;
        {
            let window = match mode {
                ViewMode::Month => &mut self.months,
                ViewMode::Week => &mut self.weeks,
            };
            if next_index >= window.len() {
                return;
            }

            let prev = window.center;
            if next_index != prev {
                let delta = window.offsets[next_index] - window.offsets[prev];
                match mode {
                    ViewMode::Month => cal.shift_month(delta),
                    ViewMode::Week => cal.shift_week(delta),
                }
                window.center = next_index;
            }

            let len = window.len();
            if next_index + EDGE_BUFFER >= len {
                window.extend_end(chunk);
            } else if next_index <= EDGE_BUFFER {
                window.extend_start(chunk);
                recenter_to = Some(window.center);
            }
        }

        if let Some(index) = recenter_to {
            self.request_scroll(index, false);
        }
    }

    /// Header chevron: one page back
    pub fn on_press_prev(&mut self, mode: ViewMode) {
        let index = self.current_index(mode).saturating_sub(1);
        self.request_scroll(index, true);
    }

    /// Header chevron: one page forward
    pub fn on_press_next(&mut self, mode: ViewMode) {
        let index = (self.current_index(mode) + 1).min(self.window(mode).len() - 1);
        self.request_scroll(index, true);
    }
}
