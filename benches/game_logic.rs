use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{ActivePiece, Board, GameState};
use blockfall::engine::{EngineConfig, Session};
use blockfall::types::{GameAction, PieceColor, PieceId, SettledCell, ShapeKind};

fn bench_gravity_step(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("gravity_step", |b| {
        b.iter(|| {
            black_box(state.gravity_step());
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    let filler = SettledCell {
        color: PieceColor::Cyan,
        piece_id: PieceId(1),
    };
    let mut rows = vec![".........."; 16];
    rows.extend(vec!["##########"; 4]);
    let full = Board::from_rows(&rows, filler);

    c.bench_function("sweep_4_rows", |b| {
        b.iter(|| {
            let mut board = full.clone();
            black_box(board.sweep());
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    let board = Board::new();
    let piece = ActivePiece {
        x: 4,
        y: 8,
        ..ActivePiece::new(ShapeKind::Triangle, PieceId(1))
    };

    c.bench_function("validate", |b| {
        b.iter(|| black_box(board.validate(black_box(&piece))))
    });
}

fn bench_apply_action(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("apply_action_shuffle", |b| {
        b.iter(|| {
            state.apply_action(GameAction::MoveRight);
            state.apply_action(GameAction::MoveLeft);
        })
    });
}

fn bench_session_second(c: &mut Criterion) {
    c.bench_function("session_one_second", |b| {
        b.iter(|| {
            let mut session = Session::new(EngineConfig::default().with_tick_ms(16));
            session.start();
            session.push_action(GameAction::Rotate);
            session.advance(black_box(1000));
            session.take_events().len()
        })
    });
}

criterion_group!(
    benches,
    bench_gravity_step,
    bench_sweep,
    bench_validate,
    bench_apply_action,
    bench_session_second
);
criterion_main!(benches);
