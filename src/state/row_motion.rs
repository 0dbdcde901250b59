//! Per-row choreography for the month/week grid morph
//!
//! While the grid height morphs, the row holding the anchor date slides
//! toward the top of the grid and the remaining rows fade out with a
//! small upward shift. The anchor row stays fully opaque and unshifted
//! so it is the one row left when the week shape lands.

use chrono::NaiveDate;

use crate::date_grid::DAYS_PER_WEEK;

use super::grid_layout::ROW_HEIGHT;
use super::transition::TransitionPhase;

/// Upward shift applied to fading rows at full progress (px)
pub const ROW_SHIFT: f32 = 10.0;

/// Opacity and vertical shift for one grid row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowTransform {
    pub opacity: f32,
    pub shift_y: f32,
}

impl RowTransform {
    const STATIC: Self = Self {
        opacity: 1.0,
        shift_y: 0.0,
    };
}

/// Transition progress mapped through the snap easing
pub fn eased_progress(progress: f32) -> f32 {
    simple_easing::cubic_out(progress.clamp(0.0, 1.0))
}

/// The date the morph centers on: the week anchor while expanding back
/// to month, the selected date (if any) while collapsing to week
pub fn anchor_date(
    phase: TransitionPhase,
    selected_date: Option<NaiveDate>,
    week_anchor: NaiveDate,
) -> Option<NaiveDate> {
    match phase {
        TransitionPhase::ToMonth => Some(week_anchor),
        _ => selected_date,
    }
}

/// Index of the grid row containing the anchor date, if visible
pub fn anchor_row_index(cells: &[NaiveDate], anchor: NaiveDate) -> Option<usize> {
    cells
        .iter()
        .position(|cell| *cell == anchor)
        .map(|i| i / DAYS_PER_WEEK)
}

/// Vertical offset of the whole grid content (px). Lifts the anchor row
/// to the top edge as the week shape takes over; a page without the
/// anchor stays put.
pub fn content_lift(phase: TransitionPhase, anchor_row: Option<usize>, eased: f32) -> f32 {
    let Some(row) = anchor_row else {
        return 0.0;
    };
    let full = -(row as f32 * ROW_HEIGHT);
    match phase {
        TransitionPhase::ToWeek => full * eased,
        TransitionPhase::ToMonth => full * (1.0 - eased),
        TransitionPhase::Idle => 0.0,
    }
}

/// Fade and shift for one row at the given eased progress
pub fn row_transform(phase: TransitionPhase, is_anchor: bool, eased: f32) -> RowTransform {
    if is_anchor {
        return RowTransform::STATIC;
    }
    match phase {
        TransitionPhase::ToWeek => RowTransform {
            opacity: 1.0 - eased,
            shift_y: -ROW_SHIFT * eased,
        },
        TransitionPhase::ToMonth => RowTransform {
            opacity: eased,
            shift_y: -ROW_SHIFT * (1.0 - eased),
        },
        TransitionPhase::Idle => RowTransform::STATIC,
    }
}
