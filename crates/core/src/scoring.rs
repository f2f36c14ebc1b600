//! Scoring module - line-clear points, level progression, gravity speed
//!
//! Points for a clear are the table value for the number of rows times the
//! current level. Level is one plus the number of completed ten-line groups.
//! Drop speed comes from a fixed descending table, clamped at its fastest tier.

use crate::types::{DROP_INTERVALS, LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows at `level`.
///
/// Only 1 to 4 rows score; anything else (impossible with a four-cell piece)
/// yields nothing.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Level reached after `total_lines` cleared rows (starts at 1).
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Auto-drop period for `level`, in milliseconds.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let index = (level.max(1) - 1) as usize;
    DROP_INTERVALS[index.min(DROP_INTERVALS.len() - 1)]
}
