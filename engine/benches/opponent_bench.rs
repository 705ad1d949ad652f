use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use tictactoe_engine::games::tictactoe::{Board, evaluate, select_move};
use tictactoe_engine::{Position, Session, SessionRng, SessionSettings, Symbol};

fn mid_game_board(size: usize) -> Board {
    let mut board = Board::new(size).unwrap();
    let mut symbol = Symbol::X;
    // scattered marks that complete no line
    for i in 0..size {
        let pos = Position::new(i, (i * 2 + 1) % size);
        if board.get(pos).unwrap().is_empty() {
            board.set(pos, symbol).unwrap();
            symbol = if symbol == Symbol::X { Symbol::O } else { Symbol::X };
        }
    }
    board
}

fn bench_heuristic_session(rounds: u32) {
    let settings = SessionSettings::new(5, Symbol::X, Symbol::O, 30, true);
    let mut session = Session::new(settings, SessionRng::new(7)).unwrap();

    for _ in 0..rounds {
        while session.round_result().is_none() {
            if session.is_heuristic_turn() {
                session.request_heuristic_move().unwrap();
            } else {
                let pos = session.board().empty_cells().next().unwrap();
                session.submit_move(pos, Duration::ZERO).unwrap();
            }
        }
        session.start_new_round();
    }
    black_box(session.finish());
}

fn opponent_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("opponent");

    for size in [3usize, 7, 15] {
        let board = mid_game_board(size);
        group.bench_function(format!("select_move_{}x{}", size, size), |b| {
            let mut rng = SessionRng::new(42);
            b.iter(|| select_move(black_box(&board), Symbol::O, Symbol::X, &mut rng))
        });
        group.bench_function(format!("evaluate_{}x{}", size, size), |b| {
            b.iter(|| evaluate(black_box(&board)))
        });
    }

    group.bench_function("session_10_rounds_5x5", |b| {
        b.iter(|| bench_heuristic_session(10))
    });

    group.finish();
}

criterion_group!(benches, opponent_bench);
criterion_main!(benches);
