//! End-to-end game flows through the public API

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use tetris_ladder::core::{
    Board, GameResult, GameSnapshot, GameState, SequencePieces, SessionConfig, TickOutcome,
};
use tetris_ladder::engine::{run_session, EventLog, Presenter, Session};
use tetris_ladder::input::handle_key_event;
use tetris_ladder::types::{GameAction, Mode, Phase, PieceKind};

mod common;
use common::TempDir;

fn only_o(config: SessionConfig) -> GameState {
    GameState::with_source(config, Box::new(SequencePieces::new(vec![PieceKind::O])))
}

/// Two O pieces side by side on a 4-wide board clear two rows.
fn clear_two_rows(apply: &mut impl FnMut(GameAction) -> bool) {
    apply(GameAction::MoveLeft);
    apply(GameAction::HardDrop);
    apply(GameAction::MoveRight);
    apply(GameAction::HardDrop);
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(SessionConfig::new(Mode::Easy, 3), 12345);
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.active().is_none());

    assert!(state.apply_action(GameAction::Start));
    assert_eq!(state.phase(), Phase::Running);
    assert!(state.active().is_some());
    assert!(state.next().is_some());
    assert_eq!(state.level(), 3);
    assert_eq!(state.drop_interval(), Duration::from_millis(800));

    assert!(state.apply_action(GameAction::Pause));
    assert_eq!(state.phase(), Phase::Paused);
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert_eq!(state.tick(), TickOutcome::Idle);

    assert!(state.apply_action(GameAction::Pause));
    assert_eq!(state.phase(), Phase::Running);

    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_ten_lines_reach_next_level() {
    let config = SessionConfig::new(Mode::Normal, 1).with_board_size(4, 8);
    let mut state = only_o(config);
    state.apply_action(GameAction::Start);

    for _ in 0..5 {
        clear_two_rows(&mut |a: GameAction| state.apply_action(a));
    }

    assert_eq!(state.lines(), 10);
    assert_eq!(state.level(), 2);
    assert_eq!(state.score(), 1000);
    assert_eq!(state.drop_interval(), Duration::from_millis(450));
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(state.phase(), Phase::Running);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut state = only_o(SessionConfig::default());
    state.apply_action(GameAction::Start);

    // Ten O pieces fill columns 4-5 to the ceiling.
    for n in 1..=10 {
        assert!(state.apply_action(GameAction::HardDrop));
        if n < 10 {
            assert_eq!(state.phase(), Phase::Running, "after drop {}", n);
        }
    }

    assert_eq!(state.phase(), Phase::GameOver);
    let result = state.result().unwrap();
    assert_eq!((result.score, result.lines, result.level), (0, 0, 1));
    assert_eq!(result.mode, Mode::Normal);

    // Totals are frozen.
    assert!(!state.apply_action(GameAction::HardDrop));
    assert_eq!(state.tick(), TickOutcome::Idle);
    assert_eq!(state.result(), Some(result));

    let snap = state.snapshot();
    assert!(snap.game_over());
    assert_eq!(snap.ghost_y, None);
}

#[test]
fn test_blocked_spawn_on_prepared_board() {
    let mut board = Board::new();
    board.set(5, 1, Some(tetris_ladder::types::Color::rgb(90, 90, 90)));
    let mut state = GameState::with_board(
        SessionConfig::default(),
        board,
        Box::new(SequencePieces::new(vec![PieceKind::O])),
    );

    assert!(state.apply_action(GameAction::Start));
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.result().map(|r| r.score), Some(0));
}

#[tokio::test(start_paused = true)]
async fn test_session_gravity_follows_level_speed() {
    let config = SessionConfig::new(Mode::Hard, 1).with_board_size(4, 8);
    let mut session = Session::new(only_o(config));
    assert!(session.next_tick().is_none());

    session.apply(GameAction::Start);
    let (deadline, token) = session.next_tick().unwrap();
    let now = tokio::time::Instant::now();
    assert_eq!(deadline - now, Duration::from_millis(300));

    tokio::time::sleep_until(deadline).await;
    assert!(session.fire(token).is_none());
    assert_eq!(session.state().active().map(|p| p.y), Some(1));

    // Stale tokens do nothing.
    assert!(session.fire(token).is_none());
    assert_eq!(session.state().active().map(|p| p.y), Some(1));

    session.apply(GameAction::Pause);
    assert!(session.next_tick().is_none());
    session.apply(GameAction::Pause);
    assert!(session.next_tick().is_some());
}

#[tokio::test]
async fn test_session_writes_event_log() {
    let dir = TempDir::new("events");
    let path = dir.file("session.jsonl");

    let config = SessionConfig::new(Mode::Normal, 1).with_board_size(4, 8);
    let mut session = Session::new(only_o(config)).with_event_log(Some(EventLog::open(&path)));

    session.apply(GameAction::Start);
    for _ in 0..5 {
        clear_two_rows(&mut |a: GameAction| session.apply(a));
    }
    session.apply(GameAction::Pause);
    session.apply(GameAction::Restart);
    session.shutdown().await;

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let kinds: Vec<&str> = lines.iter().map(|v| v["event"].as_str().unwrap()).collect();

    assert_eq!(kinds.first(), Some(&"started"));
    assert_eq!(kinds.iter().filter(|k| **k == "locked").count(), 10);
    assert_eq!(kinds[kinds.len() - 2..], ["paused", "restarted"]);
    assert!(lines.iter().all(|v| v["ts_ms"].as_u64().is_some()));

    let level_up = lines.iter().find(|v| v["event"] == "level_up").unwrap();
    assert_eq!(level_up["level"], 2);
    assert_eq!(level_up["drop_interval_ms"], 450);
}

#[test]
fn test_wait_for_pends_without_a_pending_tick() {
    let mut idle = tokio_test::task::spawn(tetris_ladder::engine::wait_for(None));
    tokio_test::assert_pending!(idle.poll());
    tokio_test::assert_pending!(idle.poll());
}

#[derive(Default)]
struct Recorder {
    frames: usize,
    last: Option<GameSnapshot>,
    results: Vec<GameResult>,
}

impl Presenter for Recorder {
    fn present(&mut self, snapshot: &GameSnapshot) {
        self.frames += 1;
        self.last = Some(snapshot.clone());
    }

    fn game_over(&mut self, result: &GameResult) {
        self.results.push(*result);
    }
}

#[tokio::test(start_paused = true)]
async fn test_headless_session_from_key_presses() {
    let (tx, rx) = mpsc::channel(4);
    let session = Session::new(only_o(SessionConfig::default()));

    let handle = tokio::spawn(async move {
        let mut recorder = Recorder::default();
        let session = run_session(session, rx, &mut recorder).await;
        (session, recorder)
    });

    let mut keys = vec![KeyCode::Enter];
    keys.extend([KeyCode::Char(' '); 10]);
    // Dropped once the game is over.
    keys.push(KeyCode::Left);
    for code in keys {
        let action = handle_key_event(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        tx.send(action).await.unwrap();
    }
    drop(tx);

    let (session, recorder) = handle.await.unwrap();
    assert_eq!(session.state().phase(), Phase::GameOver);
    assert!(session.next_tick().is_none());
    assert_eq!(recorder.results.len(), 1);
    assert_eq!(recorder.results[0].score, 0);
    // initial + start + ten drops, plus any gravity ticks in between
    assert!(recorder.frames >= 12);
    assert!(recorder.last.unwrap().game_over());
}
