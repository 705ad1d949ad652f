use crate::error::{EngineError, Result};
use super::board::Board;
use super::types::{Cell, Position};

/// A move is legal when it is on the board and the cell is empty.
pub fn validate_move(board: &Board, pos: Position) -> Result<()> {
    match board.get(pos)? {
        Cell::Empty => Ok(()),
        Cell::Occupied(occupant) => Err(EngineError::CellOccupied {
            position: pos,
            occupant,
        }),
    }
}

pub fn is_valid_move(board: &Board, pos: Position) -> bool {
    validate_move(board, pos).is_ok()
}
