//! Scoring module - line-clear points, level progression and gravity speed
//!
//! All three are pure functions of the session's running totals:
//! - points for a lock are `cleared * 100 * level`, using the level in effect
//!   before the lock is counted
//! - level is `lines / 10 + start_level`
//! - drop interval is `max(base(mode) - (level - start_level) * 50, 100)` ms

use std::time::Duration;

use crate::types::{
    Mode, DROP_INTERVAL_MIN_MS, LINES_PER_LEVEL, POINTS_PER_LINE, SPEEDUP_PER_LEVEL_MS,
};

/// Points awarded for clearing `cleared` rows at `level`.
pub fn line_clear_score(cleared: u32, level: u32) -> u32 {
    cleared
        .saturating_mul(POINTS_PER_LINE)
        .saturating_mul(level)
}

/// Level reached after `total_lines` cleared lines.
pub fn level_for(total_lines: u32, start_level: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + start_level
}

/// Gravity interval in milliseconds.
pub fn drop_interval_ms(mode: Mode, level: u32, start_level: u32) -> u32 {
    let gained = level.saturating_sub(start_level);
    mode.base_drop_ms()
        .saturating_sub(gained.saturating_mul(SPEEDUP_PER_LEVEL_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

/// Gravity interval as a [`Duration`].
pub fn drop_interval(mode: Mode, level: u32, start_level: u32) -> Duration {
    Duration::from_millis(drop_interval_ms(mode, level, start_level) as u64)
}

/// Running score/level/lines totals for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    start_level: u32,
}

/// What a single lock contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub gained: u32,
    pub level_changed: bool,
}

impl Progress {
    pub fn new(start_level: u32) -> Self {
        Self {
            score: 0,
            level: start_level,
            lines: 0,
            start_level,
        }
    }

    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    /// Account for one lock that cleared `cleared` rows (possibly zero).
    pub fn record_clear(&mut self, cleared: u32) -> ScoreResult {
        let gained = line_clear_score(cleared, self.level);
        let previous_level = self.level;

        self.score = self.score.saturating_add(gained);
        self.lines = self.lines.saturating_add(cleared);
        self.level = level_for(self.lines, self.start_level);

        ScoreResult {
            gained,
            level_changed: self.level != previous_level,
        }
    }

    pub fn drop_interval(&self, mode: Mode) -> Duration {
        drop_interval(mode, self.level, self.start_level)
    }
}
