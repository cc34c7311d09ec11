use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_ladder::core::{can_place, get_shape, Board, GameSnapshot, GameState, SessionConfig};
use tetris_ladder::types::{Color, GameAction, PieceKind};

const GRAY: Color = Color::rgb(90, 90, 90);

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(SessionConfig::default(), 12345);
    state.start();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if !state.is_running() {
                state.restart();
                state.start();
            }
            black_box(state.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(GRAY));
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_can_place(c: &mut Criterion) {
    let mut board = Board::new();
    for x in 0..9 {
        board.set(x, 19, Some(GRAY));
    }

    c.bench_function("can_place_all_states", |b| {
        b.iter(|| {
            let mut fits = 0;
            for kind in PieceKind::ALL {
                for rotation in 0..4 {
                    let shape = get_shape(kind, rotation);
                    if can_place(&board, &shape, black_box(4), black_box(17)) {
                        fits += 1;
                    }
                }
            }
            fits
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(SessionConfig::default(), 12345);
    state.start();
    state.apply_action(GameAction::SoftDrop);
    state.apply_action(GameAction::SoftDrop);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(state.apply_action(GameAction::RotateCw));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(SessionConfig::default(), 12345);
    state.start();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(snap.score);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_can_place,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
