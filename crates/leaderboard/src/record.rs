//! One leaderboard entry.
//!
//! Field names match the on-disk format:
//! `{timestamp, name, mode, level, score, lines}`. The timestamp is kept as
//! the string found in the file so older entries with any ISO-8601 flavor
//! load unchanged.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::GameResult;
use crate::types::Mode;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub timestamp: String,
    pub name: String,
    pub mode: Mode,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub lines: u32,
}

impl Record {
    /// New record stamped with the current local time.
    pub fn new(name: impl Into<String>, mode: Mode, level: u32, score: u32, lines: u32) -> Self {
        Self {
            timestamp: Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string(),
            name: name.into(),
            mode,
            level,
            score,
            lines,
        }
    }

    pub fn from_result(name: impl Into<String>, result: &GameResult) -> Self {
        Self::new(name, result.mode, result.level, result.score, result.lines)
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Parsed timestamp, if it is a local ISO-8601 date-time.
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}
