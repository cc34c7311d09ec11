//! Command-line and environment configuration.
//!
//! Environment variables provide defaults; arguments override them:
//!
//! | Variable | Argument | Meaning |
//! |----------|----------|---------|
//! | `TETRIS_MODE` | `--mode` | easy, normal or hard (case-insensitive) |
//! | `TETRIS_START_LEVEL` | `--level` | starting level, 1-30 |
//! | `TETRIS_SCORES_PATH` | `--scores` | leaderboard file (default `scores.json`) |
//! | `TETRIS_LOG_PATH` | `--log` | JSON-lines session event log |
//! | `TETRIS_SEED` | `--seed` | piece sequence seed (default: clock) |
//!
//! `tetris-ladder scores [--mode M|all] [--top N]` prints the ranking and exits.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::SessionConfig;
use crate::leaderboard::{DEFAULT_PATH, DEFAULT_TOP_N};
use crate::types::{Mode, MAX_START_LEVEL, MIN_START_LEVEL};

pub const USAGE: &str = "\
Usage:
  tetris-ladder [--mode easy|normal|hard] [--level 1-30] [--scores PATH] [--log PATH] [--seed N]
  tetris-ladder scores [--mode easy|normal|hard|all] [--top N] [--scores PATH]

Keys:
  arrows / hjkl / wasd   move, rotate (up), soft drop (down)
  space                  hard drop
  enter                  start        p  pause/resume
  r                      restart      tab  ranking filter
  q / ctrl-c             quit
";

/// Settings for an interactive game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: Mode,
    pub start_level: u32,
    pub scores_path: PathBuf,
    pub log_path: Option<PathBuf>,
    pub seed: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            start_level: MIN_START_LEVEL,
            scores_path: PathBuf::from(DEFAULT_PATH),
            log_path: None,
            seed: None,
        }
    }
}

/// Settings for the `scores` subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoresQuery {
    pub mode: Option<Mode>,
    pub top: usize,
    pub scores_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(AppConfig),
    Scores(ScoresQuery),
    Help,
}

impl AppConfig {
    /// Read defaults through `lookup` (environment-shaped key/value source).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();
        if let Some(v) = var("TETRIS_MODE") {
            config.mode = parse_mode(&v).map_err(|e| anyhow!("TETRIS_MODE: {}", e))?;
        }
        if let Some(v) = var("TETRIS_START_LEVEL") {
            config.start_level =
                parse_level(&v).map_err(|e| anyhow!("TETRIS_START_LEVEL: {}", e))?;
        }
        if let Some(v) = var("TETRIS_SCORES_PATH") {
            config.scores_path = PathBuf::from(v);
        }
        if let Some(v) = var("TETRIS_LOG_PATH") {
            config.log_path = Some(PathBuf::from(v));
        }
        if let Some(v) = var("TETRIS_SEED") {
            config.seed = Some(parse_seed(&v).map_err(|e| anyhow!("TETRIS_SEED: {}", e))?);
        }
        Ok(config)
    }

    /// Apply `--flag value` overrides.
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--mode" => self.mode = parse_mode(flag_value(args, &mut i, flag)?)?,
                "--level" => self.start_level = parse_level(flag_value(args, &mut i, flag)?)?,
                "--scores" => self.scores_path = PathBuf::from(flag_value(args, &mut i, flag)?),
                "--log" => self.log_path = Some(PathBuf::from(flag_value(args, &mut i, flag)?)),
                "--seed" => self.seed = Some(parse_seed(flag_value(args, &mut i, flag)?)?),
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.mode, self.start_level)
    }

    /// The configured seed, or one derived from the clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos();
            (nanos as u32) ^ ((nanos >> 32) as u32)
        })
    }
}

/// Parse the full argument list (program name excluded).
pub fn parse_command(
    args: &[String],
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Command> {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(Command::Help);
    }

    let base = AppConfig::from_lookup(lookup)?;

    if args.first().map(String::as_str) == Some("scores") {
        let mut query = ScoresQuery {
            mode: None,
            top: DEFAULT_TOP_N,
            scores_path: base.scores_path,
        };
        let mut i = 1usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--mode" => {
                    let v = flag_value(args, &mut i, flag)?;
                    query.mode = if v.eq_ignore_ascii_case("all") {
                        None
                    } else {
                        Some(parse_mode(v)?)
                    };
                }
                "--top" => {
                    let v = flag_value(args, &mut i, flag)?;
                    query.top = v
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| anyhow!("scores: invalid --top value: {}", v))?;
                }
                "--scores" => query.scores_path = PathBuf::from(flag_value(args, &mut i, flag)?),
                other => return Err(anyhow!("scores: unknown argument: {}", other)),
            }
            i += 1;
        }
        return Ok(Command::Scores(query));
    }

    let mut config = base;
    config.apply_args(args)?;
    Ok(Command::Play(config))
}

fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn parse_mode(s: &str) -> Result<Mode> {
    Mode::from_str(s).ok_or_else(|| anyhow!("unknown mode: {} (expected easy, normal or hard)", s))
}

fn parse_level(s: &str) -> Result<u32> {
    s.trim()
        .parse::<u32>()
        .ok()
        .filter(|l| (MIN_START_LEVEL..=MAX_START_LEVEL).contains(l))
        .ok_or_else(|| {
            anyhow!(
                "invalid level: {} (expected {}-{})",
                s,
                MIN_START_LEVEL,
                MAX_START_LEVEL
            )
        })
}

fn parse_seed(s: &str) -> Result<u32> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| anyhow!("invalid seed: {}", s))
}
