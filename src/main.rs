//! Terminal runner (default binary).
//!
//! One tokio task owns the session and waits on terminal events and the
//! pending gravity tick. A blocking thread forwards crossterm events into a
//! channel. After a game ends the player can type a name to record the score.

use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use tetris_ladder::config::{parse_command, AppConfig, Command, USAGE};
use tetris_ladder::core::{GameResult, GameSnapshot, GameState};
use tetris_ladder::engine::{wait_for, EventLog, Presenter, Session};
use tetris_ladder::input::{handle_key_event, is_ranking_cycle, should_quit, NameEdit, NameEntry};
use tetris_ladder::leaderboard::{Leaderboard, Record, DEFAULT_TOP_N};
use tetris_ladder::term::{
    ranking_table, FrameBuffer, GameView, NamePrompt, Panels, RankingPanel, TerminalRenderer,
    Viewport,
};
use tetris_ladder::types::{GameAction, Mode};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_command(&args, |key| std::env::var(key).ok())? {
        Command::Help => {
            print!("{}", USAGE);
            Ok(())
        }
        Command::Scores(query) => {
            let mut board = open_leaderboard(&query.scores_path);
            if board.skipped() > 0 {
                eprintln!(
                    "[Leaderboard] skipped {} unreadable entries in {}",
                    board.skipped(),
                    board.path().display()
                );
            }
            print!(
                "{}",
                ranking_table(query.mode, &board.top_n(query.mode, query.top))
            );
            Ok(())
        }
        Command::Play(config) => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start tokio runtime")?;
            rt.block_on(play(config))
        }
    }
}

async fn play(config: AppConfig) -> Result<()> {
    let state = GameState::new(config.session_config(), config.seed_or_clock());
    let log = config.log_path.as_ref().map(EventLog::open);
    let mut session = Session::new(state).with_event_log(log);

    // Report load failures before the alternate screen hides stderr.
    let mut app = App::new(open_leaderboard(&config.scores_path));
    app.term.enter()?;

    let (tx, mut events) = mpsc::unbounded_channel();
    spawn_event_reader(tx);

    let result = app.run(&mut session, &mut events).await;

    let _ = app.term.exit();
    session.shutdown().await;
    result
}

fn open_leaderboard(path: &Path) -> Leaderboard {
    let mut board = Leaderboard::open(path);
    if let Some(e) = board.take_load_error() {
        eprintln!("[Leaderboard] {}; starting with an empty history", e);
    }
    board
}

/// Forward terminal events until the receiver is gone or reading fails.
fn spawn_event_reader(tx: mpsc::UnboundedSender<Event>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(e) => {
                eprintln!("[Input] terminal read failed: {}", e);
                break;
            }
        }
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A finished game waiting for the player's name.
struct PendingScore {
    result: GameResult,
    entry: NameEntry,
}

struct App {
    term: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    snapshot: GameSnapshot,
    leaderboard: Leaderboard,
    filter: Option<Mode>,
    pending: Option<PendingScore>,
    notice: Option<String>,
    dirty: bool,
}

impl App {
    fn new(leaderboard: Leaderboard) -> Self {
        Self {
            term: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            snapshot: GameSnapshot::default(),
            leaderboard,
            filter: None,
            pending: None,
            notice: None,
            dirty: true,
        }
    }

    async fn run(
        &mut self,
        session: &mut Session,
        events: &mut mpsc::UnboundedReceiver<Event>,
    ) -> Result<()> {
        let mut snapshot = GameSnapshot::default();
        session.snapshot_into(&mut snapshot);
        self.present(&snapshot);
        self.draw()?;

        loop {
            let next = session.next_tick();

            tokio::select! {
                maybe = events.recv() => {
                    let Some(ev) = maybe else {
                        break;
                    };
                    match ev {
                        Event::Resize(..) => {
                            self.term.invalidate();
                            self.dirty = true;
                        }
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            if self.on_key(session, key, &mut snapshot) == Flow::Quit {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                token = wait_for(next) => {
                    let ended = session.fire(token);
                    session.snapshot_into(&mut snapshot);
                    self.present(&snapshot);
                    if let Some(result) = ended {
                        self.game_over(&result);
                    }
                }
            }

            if self.dirty {
                self.draw()?;
            }
        }
        Ok(())
    }

    fn on_key(
        &mut self,
        session: &mut Session,
        key: KeyEvent,
        snapshot: &mut GameSnapshot,
    ) -> Flow {
        if self.pending.is_some() {
            return self.on_name_key(key);
        }

        if should_quit(key) {
            return Flow::Quit;
        }
        if is_ranking_cycle(key) {
            self.filter = cycle_filter(self.filter, key.code == KeyCode::BackTab);
            self.dirty = true;
            return Flow::Continue;
        }

        let Some(action) = handle_key_event(key) else {
            return Flow::Continue;
        };
        let starts = matches!(action, GameAction::Start | GameAction::Restart);
        if starts && self.notice.take().is_some() {
            self.dirty = true;
        }
        if session.apply(action) {
            session.snapshot_into(snapshot);
            self.present(snapshot);
        }
        if let Some(result) = session.take_game_over() {
            self.game_over(&result);
        }
        Flow::Continue
    }

    fn on_name_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        let Some(pending) = self.pending.as_mut() else {
            return Flow::Continue;
        };

        match pending.entry.handle_key(key) {
            NameEdit::Ignored => return Flow::Continue,
            NameEdit::Edited => {}
            NameEdit::Cancel => {
                self.pending = None;
                self.notice = Some("Score not recorded. R to play again".to_string());
            }
            NameEdit::Submit(name) => {
                match self
                    .leaderboard
                    .append(Record::from_result(name, &pending.result))
                {
                    Ok(()) => {
                        self.pending = None;
                        self.notice = Some(match self.leaderboard.take_load_error() {
                            Some(_) => format!(
                                "Score saved. Damaged score file kept as {}",
                                self.leaderboard.backup_path().display()
                            ),
                            None => "Score saved. R to play again".to_string(),
                        });
                    }
                    Err(e) if e.is_invalid_record() => {
                        pending.entry.set_message("Please enter a name");
                    }
                    Err(e) => {
                        self.pending = None;
                        self.notice = Some(format!("Could not save score: {}", e));
                    }
                }
            }
        }
        self.dirty = true;
        Flow::Continue
    }

    fn draw(&mut self) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let ranked = self.leaderboard.top_n(self.filter, DEFAULT_TOP_N);
        let panels = Panels {
            ranking: Some(RankingPanel {
                filter: self.filter,
                records: &ranked,
            }),
            prompt: self.pending.as_ref().map(|p| NamePrompt {
                text: p.entry.text(),
                message: p.entry.message(),
            }),
            notice: self.notice.as_deref(),
        };
        self.view
            .render_into(&self.snapshot, &panels, Viewport::new(w, h), &mut self.fb);
        self.term.draw_swap(&mut self.fb)?;
        self.dirty = false;
        Ok(())
    }
}

impl Presenter for App {
    fn present(&mut self, snapshot: &GameSnapshot) {
        self.snapshot.clone_from(snapshot);
        self.dirty = true;
    }

    fn game_over(&mut self, result: &GameResult) {
        self.notice = None;
        self.pending = Some(PendingScore {
            result: *result,
            entry: NameEntry::new(),
        });
        self.dirty = true;
    }
}

/// All -> Easy -> Normal -> Hard -> All (reversed for Shift-Tab).
fn cycle_filter(filter: Option<Mode>, backwards: bool) -> Option<Mode> {
    let order = [None, Some(Mode::Easy), Some(Mode::Normal), Some(Mode::Hard)];
    let pos = order.iter().position(|f| *f == filter).unwrap_or(0);
    let step = if backwards { order.len() - 1 } else { 1 };
    order[(pos + step) % order.len()]
}
