//! JSON-lines session event log.
//!
//! Events are stamped on the caller's side and handed to a background tokio
//! task through an unbounded channel; the task serializes each one with
//! serde_json and appends it to the log file, one object per line.

use std::path::PathBuf;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{GameResult, LockEvent};
use crate::types::Mode;

/// Session lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Started {
        mode: Mode,
        start_level: u32,
    },
    Paused,
    Resumed,
    Locked {
        cleared: u32,
        score_gained: u32,
        score: u32,
        level: u32,
        lines: u32,
    },
    LevelUp {
        level: u32,
        drop_interval_ms: u32,
    },
    GameOver {
        mode: Mode,
        score: u32,
        level: u32,
        lines: u32,
    },
    Restarted,
}

impl SessionEvent {
    pub fn locked(event: &LockEvent) -> Self {
        SessionEvent::Locked {
            cleared: event.cleared,
            score_gained: event.score_gained,
            score: event.score,
            level: event.level,
            lines: event.lines,
        }
    }

    pub fn game_over(result: &GameResult) -> Self {
        SessionEvent::GameOver {
            mode: result.mode,
            score: result.score,
            level: result.level,
            lines: result.lines,
        }
    }
}

#[derive(Debug, Serialize)]
struct LogLine<'a> {
    ts_ms: u64,
    #[serde(flatten)]
    event: &'a SessionEvent,
}

/// Handle to the background writer.
#[derive(Debug)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<(u64, SessionEvent)>,
    task: JoinHandle<()>,
}

impl EventLog {
    /// Spawn the writer task appending to `path`. Must be called inside a
    /// tokio runtime.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<(u64, SessionEvent)>();

        let task = tokio::spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("[EventLog] cannot open {}: {}", path.display(), e);
                    return;
                }
            };

            let mut buf: Vec<u8> = Vec::with_capacity(256);

            while let Some((ts_ms, event)) = rx.recv().await {
                buf.clear();
                let line = LogLine {
                    ts_ms,
                    event: &event,
                };
                if serde_json::to_writer(&mut buf, &line).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if let Err(e) = file.write_all(&buf).await {
                    eprintln!("[EventLog] write failed: {}", e);
                    break;
                }
            }

            let _ = file.flush().await;
        });

        Self { tx, task }
    }

    pub fn record(&self, event: SessionEvent) {
        let _ = self.tx.send((current_timestamp_ms(), event));
    }

    /// Stop accepting events and wait until everything queued is written.
    pub async fn close(self) {
        drop(self.tx);
        let _ = self.task.await;
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
