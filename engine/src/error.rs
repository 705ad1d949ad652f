use thiserror::Error;

use crate::games::tictactoe::{Position, Symbol};
use crate::identifiers::SessionId;

/// Errors reported by the engine. Every variant except `InvalidSize`,
/// `InvalidSymbols`, `InvalidTimeLimit` and `Config` is recoverable: the
/// caller re-prompts and no state has changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Board size must be at least {min}, got {size}")]
    InvalidSize { size: usize, min: usize },

    #[error("Invalid symbols '{first}' and '{second}': symbols must be distinct and visible")]
    InvalidSymbols { first: char, second: char },

    #[error("Move time limit must be greater than zero")]
    InvalidTimeLimit,

    #[error("Position {position} is outside a {size}x{size} board")]
    OutOfBounds { position: Position, size: usize },

    #[error("Cell {position} is already taken by '{occupant}'")]
    CellOccupied { position: Position, occupant: Symbol },

    #[error("There is no move to undo")]
    NothingToUndo,

    #[error("Undo was already used this turn")]
    UndoAlreadyUsedThisTurn,

    #[error("The round is already over")]
    RoundOver,

    #[error("It is the heuristic opponent's turn ('{0}')")]
    HeuristicTurn(Symbol),

    #[error("It is not the heuristic opponent's turn")]
    NotHeuristicTurn,

    #[error("Session {0} not found")]
    SessionNotFound(SessionId),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
