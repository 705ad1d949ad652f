pub mod config;
pub mod error;
pub mod games;
pub mod id_generator;
pub mod identifiers;
pub mod logger;
pub mod session_host;

pub use error::{EngineError, Result};
pub use games::SessionRng;
pub use games::tictactoe::{
    Board, Cell, FinalScores, GameConfig, Line, LineKind, Move, MoveOutcome, OpponentMode,
    Position, RoundResult, Session, SessionDriver, SessionSettings, Symbol, TurnController,
    TurnState,
};
pub use identifiers::SessionId;
pub use session_host::SessionHost;
