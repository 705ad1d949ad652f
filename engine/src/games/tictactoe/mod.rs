mod board;
mod bot_controller;
mod session;
mod settings;
mod turn_controller;
mod types;
mod validate;
mod win_detector;

pub use board::{Board, MIN_BOARD_SIZE};
pub use bot_controller::{BotInput, calculate_move, find_winning_move, select_move};
pub use session::{FinalScores, Session, SessionDriver};
pub use settings::{
    DEFAULT_TIME_LIMIT_SECS, GameConfig, SessionSettings, get_config_manager, load_game_config,
};
pub use turn_controller::{TurnController, TurnState};
pub use types::{Cell, Line, LineKind, Move, MoveOutcome, OpponentMode, Position, RoundResult, Symbol};
pub use validate::{is_valid_move, validate_move};
pub use win_detector::{check_win, evaluate, find_winning_line};
