use crate::games::SessionRng;
use super::board::Board;
use super::types::{Position, RoundResult, Symbol};
use super::win_detector::evaluate;

/// What the heuristic needs from a round. `board` is a private copy, so the
/// hypothetical placements below never touch the real board.
pub struct BotInput {
    pub board: Board,
    pub own_symbol: Symbol,
    pub opponent_symbol: Symbol,
}

impl BotInput {
    pub fn new(board: &Board, own_symbol: Symbol, opponent_symbol: Symbol) -> Self {
        Self {
            board: board.clone(),
            own_symbol,
            opponent_symbol,
        }
    }
}

/// Win if possible, otherwise block the opponent's immediate win, otherwise
/// play a random empty cell. Returns `None` only on a full board.
pub fn select_move(
    board: &Board,
    own_symbol: Symbol,
    opponent_symbol: Symbol,
    rng: &mut SessionRng,
) -> Option<Position> {
    calculate_move(BotInput::new(board, own_symbol, opponent_symbol), rng)
}

pub fn calculate_move(input: BotInput, rng: &mut SessionRng) -> Option<Position> {
    let BotInput {
        mut board,
        own_symbol,
        opponent_symbol,
    } = input;

    let available_moves: Vec<Position> = board.empty_cells().collect();
    if available_moves.is_empty() {
        return None;
    }

    if let Some(pos) = find_winning_move(&mut board, own_symbol, &available_moves) {
        return Some(pos);
    }

    if let Some(pos) = find_winning_move(&mut board, opponent_symbol, &available_moves) {
        return Some(pos);
    }

    Some(calculate_random_move(&available_moves, rng))
}

/// First move in `moves` order that completes a line for `symbol`.
/// Each placement is reverted before the next one is tried.
pub fn find_winning_move(board: &mut Board, symbol: Symbol, moves: &[Position]) -> Option<Position> {
    for &pos in moves {
        if board.set(pos, symbol).is_err() {
            continue;
        }
        let result = evaluate(board);
        let _ = board.clear(pos);

        if matches!(result, RoundResult::Win { symbol: winner, .. } if winner == symbol) {
            return Some(pos);
        }
    }
    None
}

fn calculate_random_move(available_moves: &[Position], rng: &mut SessionRng) -> Position {
    let idx = rng.random_range(0..available_moves.len());
    available_moves[idx]
}
