//! Async session driver.
//!
//! A single task owns the [`Session`] and waits on two sources at once: the
//! input channel and the pending gravity tick. Whichever is ready first is
//! applied, then the presenter sees a fresh snapshot.
//!
//! [`run_session`] is the headless entry point: anything that only produces
//! [`GameAction`]s (scripted input, a network peer, tests) can drive a game
//! through it. The terminal binary builds the same loop from [`Session`] and
//! [`wait_for`] because its event stream also carries events that are not
//! game actions (name entry, ranking filter, resize).

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::core::{GameResult, GameSnapshot};
use crate::scheduler::TickToken;
use crate::session::Session;
use crate::types::GameAction;

/// Receives state for display.
pub trait Presenter {
    fn present(&mut self, snapshot: &GameSnapshot);

    fn game_over(&mut self, result: &GameResult);
}

/// Sleep until the pending tick fires; pend forever when nothing is armed.
pub async fn wait_for(next: Option<(Instant, TickToken)>) -> TickToken {
    match next {
        Some((deadline, token)) => {
            tokio::time::sleep_until(deadline).await;
            token
        }
        None => std::future::pending().await,
    }
}

/// Drive `session` until the input channel closes, then hand it back.
pub async fn run_session<P: Presenter>(
    mut session: Session,
    mut inputs: mpsc::Receiver<GameAction>,
    presenter: &mut P,
) -> Session {
    let mut snapshot = GameSnapshot::default();
    session.snapshot_into(&mut snapshot);
    presenter.present(&snapshot);

    loop {
        let next = session.next_tick();

        tokio::select! {
            maybe = inputs.recv() => {
                let Some(action) = maybe else {
                    break;
                };
                if session.apply(action) {
                    session.snapshot_into(&mut snapshot);
                    presenter.present(&snapshot);
                }
                if let Some(result) = session.take_game_over() {
                    presenter.game_over(&result);
                }
            }
            token = wait_for(next) => {
                let ended = session.fire(token);
                session.snapshot_into(&mut snapshot);
                presenter.present(&snapshot);
                if let Some(result) = ended {
                    presenter.game_over(&result);
                }
            }
        }
    }

    session
}
