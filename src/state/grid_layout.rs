//! Terminal geometry for the calendar grids
//!
//! Drag and animation math runs in virtual pixels so thresholds stay
//! independent of font metrics; rendering and hit testing map pixels onto
//! terminal cells at a fixed scale.

/// Horizontal pixels spanned by one terminal column
pub const PX_PER_COL: f32 = 8.0;
/// Vertical pixels spanned by one terminal row
pub const PX_PER_ROW: f32 = 16.0;

/// Height of one date row (px)
pub const CELL_H: f32 = 16.0;
/// Spacer between consecutive date rows (px)
pub const ROW_GAP: f32 = 16.0;
/// Vertical stride from one date row to the next (px)
pub const ROW_HEIGHT: f32 = CELL_H + ROW_GAP;

/// Date rows in a fully expanded month grid
pub const MONTH_ROWS: usize = 6;
/// Grid height in the month shape: six date rows with five spacers (px)
pub const MONTH_GRID_H: f32 = CELL_H * MONTH_ROWS as f32 + ROW_GAP * (MONTH_ROWS - 1) as f32;
/// Grid height in the week shape: a single date row (px)
pub const WEEK_GRID_H: f32 = CELL_H;

/// Terminal rows covered by a grid of the given pixel height
pub fn grid_rows(height_px: f32) -> u16 {
    (height_px / PX_PER_ROW).round().max(0.0) as u16
}

/// Weekday column under terminal column `x`, if it falls on the grid.
///
/// The grid divides its width into seven equal columns; trailing columns
/// left over from integer division are dead space.
pub fn day_column_at(x: u16, grid_x: u16, grid_width: u16) -> Option<usize> {
    let col_w = grid_width / 7;
    if col_w == 0 {
        return None;
    }
    let rel = x.checked_sub(grid_x)?;
    if rel >= col_w * 7 {
        return None;
    }
    Some((rel / col_w) as usize)
}

/// Date-row index under terminal row `y`.
///
/// Date rows occupy every other terminal row; odd offsets land on the
/// spacer rows between them.
pub fn day_row_at(y: u16, grid_y: u16) -> Option<usize> {
    let rel = y.checked_sub(grid_y)?;
    if rel % 2 != 0 {
        return None;
    }
    Some((rel / 2) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod heights {
        use super::*;

        #[test]
        fn test_month_shape_spans_eleven_rows() {
            assert_eq!(grid_rows(MONTH_GRID_H), 11);
        }

        #[test]
        fn test_week_shape_spans_one_row() {
            assert_eq!(grid_rows(WEEK_GRID_H), 1);
        }

        #[test]
        fn test_shape_heights_count_rows_and_gaps() {
            assert_eq!(MONTH_GRID_H, 176.0);
            assert_eq!(WEEK_GRID_H, 16.0);
        }

        #[test]
        fn test_intermediate_heights_round_to_rows() {
            assert_eq!(grid_rows(100.0), 6);
            assert_eq!(grid_rows(0.0), 0);
        }
    }

    mod hit_testing {
        use super::*;

        #[test]
        fn test_day_column_within_grid() {
            // 28 columns wide: four terminal columns per weekday
            assert_eq!(day_column_at(10, 10, 28), Some(0));
            assert_eq!(day_column_at(13, 10, 28), Some(0));
            assert_eq!(day_column_at(14, 10, 28), Some(1));
            assert_eq!(day_column_at(37, 10, 28), Some(6));
        }

        #[test]
        fn test_day_column_outside_grid() {
            assert_eq!(day_column_at(5, 10, 28), None);
            assert_eq!(day_column_at(38, 10, 28), None);
        }

        #[test]
        fn test_day_column_dead_space_past_seven_columns() {
            // 30 wide leaves two dead columns after the seventh weekday
            assert_eq!(day_column_at(37, 10, 30), Some(6));
            assert_eq!(day_column_at(38, 10, 30), None);
        }

        #[test]
        fn test_day_row_on_date_rows() {
            assert_eq!(day_row_at(4, 4), Some(0));
            assert_eq!(day_row_at(6, 4), Some(1));
            assert_eq!(day_row_at(14, 4), Some(5));
        }

        #[test]
        fn test_day_row_on_spacer_is_none() {
            assert_eq!(day_row_at(5, 4), None);
            assert_eq!(day_row_at(7, 4), None);
        }

        #[test]
        fn test_day_row_above_grid_is_none() {
            assert_eq!(day_row_at(3, 4), None);
        }
    }
}
