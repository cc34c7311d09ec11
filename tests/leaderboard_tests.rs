//! Finished games recorded to disk and ranked back

use tetris_ladder::core::{GameState, SequencePieces, SessionConfig};
use tetris_ladder::leaderboard::{Leaderboard, Record, DEFAULT_TOP_N};
use tetris_ladder::term::ranking_table;
use tetris_ladder::types::{GameAction, Mode, PieceKind};

mod common;
use common::TempDir;

#[test]
fn test_finished_game_is_ranked() {
    let dir = TempDir::new("ladder");
    let path = dir.file("scores.json");

    let mut state = GameState::with_source(
        SessionConfig::new(Mode::Hard, 4),
        Box::new(SequencePieces::new(vec![PieceKind::O])),
    );
    state.apply_action(GameAction::Start);
    while state.apply_action(GameAction::HardDrop) {}
    let result = state.result().expect("game over");

    let mut board = Leaderboard::open(&path);
    board
        .append(Record::new("ana", Mode::Hard, 6, 5400, 22))
        .unwrap();
    board.append(Record::from_result("bo", &result)).unwrap();
    board
        .append(Record::new("cy", Mode::Easy, 1, 9000, 30))
        .unwrap();

    let reopened = Leaderboard::open(&path);
    assert_eq!(reopened.len(), 3);

    let hard: Vec<(&str, u32)> = reopened
        .top_n(Some(Mode::Hard), DEFAULT_TOP_N)
        .iter()
        .map(|r| (r.name.as_str(), r.level))
        .collect();
    assert_eq!(hard, [("ana", 6), ("bo", 4)]);

    let bo = &reopened.records()[1];
    assert!(bo.recorded_at().is_some());
    assert_eq!(bo.score, 0);

    let table = ranking_table(None, &reopened.top_n(None, 2));
    assert!(table.starts_with("Ranking: All modes"));
    assert!(table.contains("cy"));
    assert!(table.contains("ana"));
    assert!(!table.contains("bo "));
}

#[test]
fn test_reads_entries_written_elsewhere() {
    let dir = TempDir::new("ladder");
    let path = dir.file("scores.json");
    std::fs::write(
        &path,
        concat!(
            "[\n",
            r#"  {"timestamp": "2023-11-02T19:01:44.120003", "name": "old", "mode": "Normal","#,
            r#" "level": 2, "score": 1200, "lines": 14},"#,
            "\n",
            r#"  {"name": "sparse", "mode": "Easy"}"#,
            "\n]",
        ),
    )
    .unwrap();

    let board = Leaderboard::open(&path);
    assert_eq!(board.len(), 2);
    assert_eq!(board.records()[1].score, 0);
    assert!(board.records()[1].timestamp.is_empty());
    assert_eq!(
        board.top_n(Some(Mode::Normal), 5)[0].recorded_at().map(|t| t.to_string()),
        Some("2023-11-02 19:01:44.120003".to_string())
    );
}

#[test]
fn test_rejected_name_leaves_file_untouched() {
    let dir = TempDir::new("ladder");
    let path = dir.file("scores.json");
    let mut board = Leaderboard::open(&path);

    let err = board
        .append(Record::new("   ", Mode::Normal, 1, 100, 1))
        .unwrap_err();
    assert!(err.is_invalid_record());
    assert!(!path.exists());
}
