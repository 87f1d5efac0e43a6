//! Scoring module - line-clear points, drop points, level and gravity curves
//!
//! Classic table scoring multiplied by the 1-based level. Level rises every
//! ten cumulative lines. Two gravity curves exist: one applied when a game
//! starts and a gentler one recomputed on level-up.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, HARD_DROP_POINTS_PER_CELL, LEVEL_SPEED_STEP_MS,
    LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS, START_SPEED_STEP_MS,
};

/// Calculate line clear score
/// lines: number of rows cleared simultaneously (0-4)
/// level: level in effect before any level-up caused by this clear (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS_PER_CELL)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level implied by a cumulative line count
/// Level increases every 10 lines cleared, starting from 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval set when a game starts at `level`
///
/// `max(100, 1000 - (level - 1) * 100)`
pub fn start_drop_interval_ms(level: u32) -> u32 {
    drop_interval_with_step(level, START_SPEED_STEP_MS)
}

/// Gravity interval recomputed when the level rises to `level`
///
/// `max(100, 1000 - (level - 1) * 50)`
pub fn level_up_drop_interval_ms(level: u32) -> u32 {
    drop_interval_with_step(level, LEVEL_SPEED_STEP_MS)
}

fn drop_interval_with_step(level: u32, step: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(step);
    BASE_DROP_MS
        .saturating_sub(reduction)
        .max(DROP_INTERVAL_MIN_MS)
}
