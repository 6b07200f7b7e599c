//! Scoring module - points, levels and the turn timer curve
//!
//! - A clear is worth `lines x blocks x 10 x multiplier`.
//! - Level is `score / 1000`.
//! - The turn timer starts at 12s, loses 0.5s per level and floors at 2.5s.

use crate::types::{
    BASE_TIMER_MS, POINTS_PER_BLOCK, SCORE_PER_LEVEL, TIMER_FLOOR_MS, TIMER_STEP_MS,
};

/// Points for one clear pass.
///
/// `lines`: rows + columns cleared; `blocks`: distinct cells cleared;
/// `multiplier`: the multiplier before this turn's increment.
pub fn calculate_clear_score(lines: u32, blocks: u32, multiplier: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    lines
        .saturating_mul(blocks)
        .saturating_mul(POINTS_PER_BLOCK)
        .saturating_mul(multiplier)
}

/// Level management
/// Level increases every 1000 points
pub fn calculate_level(score: u32) -> u32 {
    score / SCORE_PER_LEVEL
}

/// Turn timer delay for a level (in milliseconds)
pub fn get_timer_delay_ms(level: u32) -> u32 {
    BASE_TIMER_MS
        .saturating_sub(TIMER_STEP_MS.saturating_mul(level))
        .max(TIMER_FLOOR_MS)
}
