//! Session: one game plus its gravity clock.
//!
//! The session is the only owner of the [`GameState`]. Input actions and
//! gravity ticks both go through it, so they are serialized. After every
//! action the tick scheduler is brought back in line with the phase:
//! running means exactly one pending tick, anything else means none.

use tokio::time::Instant;

use crate::core::{GameResult, GameSnapshot, GameState};
use crate::event_log::{EventLog, SessionEvent};
use crate::scheduler::{TickScheduler, TickToken};
use crate::types::{GameAction, Phase};

pub struct Session {
    state: GameState,
    scheduler: TickScheduler,
    log: Option<EventLog>,
    /// Set when the game ends; taken by the driver.
    finished: Option<GameResult>,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            scheduler: TickScheduler::new(),
            log: None,
            finished: None,
        }
    }

    pub fn with_event_log(mut self, log: Option<EventLog>) -> Self {
        self.log = log;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// The pending tick, if any.
    pub fn next_tick(&self) -> Option<(Instant, TickToken)> {
        self.scheduler.pending()
    }

    /// Apply one input action. Returns whether the game state changed.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let before = self.state.phase();

        if action == GameAction::Restart {
            // Drop the in-flight tick before the state it belongs to.
            self.scheduler.cancel();
        }

        let changed = self.state.apply_action(action);
        if !changed {
            return false;
        }

        let after = self.state.phase();
        match (before, after) {
            _ if action == GameAction::Restart => self.record(SessionEvent::Restarted),
            (Phase::Idle, Phase::Running | Phase::GameOver) => {
                let config = *self.state.config();
                self.record(SessionEvent::Started {
                    mode: config.mode,
                    start_level: config.start_level,
                });
            }
            (Phase::Running, Phase::Paused) => self.record(SessionEvent::Paused),
            (Phase::Paused, Phase::Running) => self.record(SessionEvent::Resumed),
            _ => {}
        }

        // A hard drop locks immediately; give the next piece a full interval.
        let locked = self.after_lock(before);
        if locked && self.state.is_running() {
            self.scheduler.arm(self.state.drop_interval());
        }

        self.sync_scheduler();
        true
    }

    /// Run the tick identified by `token`.
    ///
    /// Stale tokens are ignored. Returns the final result when this tick
    /// ended the game.
    pub fn fire(&mut self, token: TickToken) -> Option<GameResult> {
        if !self.scheduler.accept(token) {
            return None;
        }

        let before = self.state.phase();
        self.state.tick();
        self.after_lock(before);

        if self.state.is_running() {
            self.scheduler.arm(self.state.drop_interval());
        }
        self.finished.take()
    }

    /// Result of a game that ended during [`Session::apply`].
    pub fn take_game_over(&mut self) -> Option<GameResult> {
        self.finished.take()
    }

    /// Log the last lock (if any) and detect the transition to game over.
    fn after_lock(&mut self, before: Phase) -> bool {
        let lock = self.state.take_last_lock();
        if let Some(event) = lock {
            self.record(SessionEvent::locked(&event));
            if event.level_changed {
                self.record(SessionEvent::LevelUp {
                    level: event.level,
                    drop_interval_ms: self.state.drop_interval().as_millis() as u32,
                });
            }
        }

        if before != Phase::GameOver && self.state.phase() == Phase::GameOver {
            if let Some(result) = self.state.result() {
                self.record(SessionEvent::game_over(&result));
                self.finished = Some(result);
            }
        }
        lock.is_some()
    }

    fn sync_scheduler(&mut self) {
        if self.state.is_running() {
            if !self.scheduler.is_armed() {
                self.scheduler.arm(self.state.drop_interval());
            }
        } else if self.scheduler.is_armed() {
            self.scheduler.cancel();
        }
    }

    fn record(&self, event: SessionEvent) {
        if let Some(log) = &self.log {
            log.record(event);
        }
    }

    /// Flush and close the event log, if one is attached.
    pub async fn shutdown(mut self) {
        if let Some(log) = self.log.take() {
            log.close().await;
        }
    }
}
