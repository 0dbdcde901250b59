//! Pure date arithmetic for the calendar grids
//!
//! Month and week pages are laid out as Sunday-first rows. Everything in
//! this module is a pure function of its inputs so page content can be
//! regenerated from scratch whenever the paging window moves.

use chrono::{Datelike, Duration, NaiveDate};

/// Number of columns in every calendar grid
pub const DAYS_PER_WEEK: usize = 7;

/// Weekday column headers, Sunday first
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A calendar month identified by year and zero-based month index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// Zero-based month index (0 = January)
    pub month0: u32,
}

impl YearMonth {
    pub fn new(year: i32, month0: u32) -> Self {
        Self { year, month0 }.add_months(0)
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Offset this month by `delta` months, normalizing across year boundaries
    pub fn add_months(self, delta: i32) -> Self {
        let total = self.year * 12 + self.month0 as i32 + delta;
        Self {
            year: total.div_euclid(12),
            month0: total.rem_euclid(12) as u32,
        }
    }

    /// First day of the month
    pub fn first_day(self) -> NaiveDate {
        // month0 is normalized on construction; only a year outside
        // chrono's supported range can make this fall back
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month
    pub fn num_days(self) -> i64 {
        (self.add_months(1).first_day() - self.first_day()).num_days()
    }

    /// Header label for this month, e.g. "March 2026"
    pub fn title(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// Build the cells of a month page, padded to whole Sunday-first weeks.
///
/// Leading cells spill in from the previous month and trailing cells from
/// the next month, so the result length is always a multiple of seven
/// (28, 35, or 42 cells depending on how the month falls).
pub fn month_matrix(ym: YearMonth) -> Vec<NaiveDate> {
    let first = ym.first_day();
    let lead = first.weekday().num_days_from_sunday() as i64;
    let total = (lead + ym.num_days() + 6) / 7 * 7;
    (0..total).map(|i| first + Duration::days(i - lead)).collect()
}

/// The Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// The seven days of the week beginning at `start`
pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    (0..DAYS_PER_WEEK as i64)
        .map(|i| start + Duration::days(i))
        .collect()
}

/// True only when both dates are present and fall on the same calendar day
pub fn same_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
