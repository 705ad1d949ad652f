use super::board::Board;
use super::types::{Cell, Line, LineKind, RoundResult, Symbol};

/// Full rescan of the board. Lines are checked rows first, then columns,
/// the main diagonal and the anti-diagonal; the first complete one wins.
pub fn evaluate(board: &Board) -> RoundResult {
    if let Some((symbol, line)) = find_winning_line(board) {
        return RoundResult::Win { symbol, line };
    }

    if board.is_full() {
        return RoundResult::Draw;
    }

    RoundResult::InProgress
}

pub fn find_winning_line(board: &Board) -> Option<(Symbol, Line)> {
    let size = board.size();

    let rows = (0..size).map(LineKind::Row);
    let columns = (0..size).map(LineKind::Column);
    let diagonals = [LineKind::MainDiagonal, LineKind::AntiDiagonal];

    rows.chain(columns)
        .chain(diagonals)
        .find_map(|kind| check_line(board, kind).map(|symbol| (symbol, Line::new(kind, size))))
}

pub fn check_win(board: &Board) -> Option<Symbol> {
    find_winning_line(board).map(|(symbol, _)| symbol)
}

fn check_line(board: &Board, kind: LineKind) -> Option<Symbol> {
    let mut positions = kind.positions(board.size()).into_iter();

    let first = positions.next()?;
    let symbol = match board.get(first) {
        Ok(Cell::Occupied(symbol)) => symbol,
        _ => return None,
    };

    for pos in positions {
        if board.get(pos) != Ok(Cell::Occupied(symbol)) {
            return None;
        }
    }

    Some(symbol)
}
