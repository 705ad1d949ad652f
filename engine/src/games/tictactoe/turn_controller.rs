use std::time::{Duration, Instant};

use crate::error::{EngineError, Result};
use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::bot_controller::select_move;
use super::settings::SessionSettings;
use super::types::{Move, MoveOutcome, Position, RoundResult, Symbol};
use super::validate::validate_move;
use super::win_detector::evaluate;

/// A timed-out move never leaves the controller in a waiting state of its
/// own: it is reported as `MoveOutcome::TimedOut` and the controller is
/// already `AwaitingMove` for the other symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    AwaitingMove(Symbol),
    RoundOver(RoundResult),
}

/// Runs one round: owns the board, alternates the two symbols, applies
/// validated moves and detects the end of the round.
#[derive(Debug)]
pub struct TurnController {
    board: Board,
    symbols: [Symbol; 2],
    heuristic_symbol: Option<Symbol>,
    time_limit: Duration,
    state: TurnState,
    last_move: Option<Move>,
    undo_used_by: Option<Symbol>,
    turn_started: Instant,
    moves_played: usize,
}

impl TurnController {
    pub fn new(settings: &SessionSettings) -> Result<Self> {
        let board = Board::new(settings.board_size)?;
        Ok(Self::with_board(board, settings))
    }

    /// Starts from an arbitrary position; the first symbol moves next.
    pub fn with_board(board: Board, settings: &SessionSettings) -> Self {
        Self {
            board,
            symbols: [settings.first_symbol, settings.second_symbol],
            heuristic_symbol: settings.heuristic_symbol(),
            time_limit: settings.time_limit,
            state: TurnState::AwaitingMove(settings.first_symbol),
            last_move: None,
            undo_used_by: None,
            turn_started: Instant::now(),
            moves_played: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn active_symbol(&self) -> Option<Symbol> {
        match self.state {
            TurnState::AwaitingMove(symbol) => Some(symbol),
            TurnState::RoundOver(_) => None,
        }
    }

    pub fn result(&self) -> Option<&RoundResult> {
        match &self.state {
            TurnState::RoundOver(result) => Some(result),
            TurnState::AwaitingMove(_) => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, TurnState::RoundOver(_))
    }

    pub fn is_heuristic_turn(&self) -> bool {
        self.active_symbol().is_some() && self.active_symbol() == self.heuristic_symbol
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn turn_elapsed(&self) -> Duration {
        self.turn_started.elapsed()
    }

    pub fn time_remaining(&self) -> Duration {
        self.time_limit.saturating_sub(self.turn_elapsed())
    }

    /// Call when the active player is actually prompted. Rejected attempts
    /// within the same turn must not call this.
    pub fn restart_turn_clock(&mut self) {
        self.turn_started = Instant::now();
    }

    pub fn other_symbol(&self, symbol: Symbol) -> Symbol {
        if symbol == self.symbols[0] {
            self.symbols[1]
        } else {
            self.symbols[0]
        }
    }

    fn awaiting(&self) -> Result<Symbol> {
        self.active_symbol().ok_or(EngineError::RoundOver)
    }

    /// Human move, `elapsed` measured by the caller from the start of the
    /// turn (not from the latest retry).
    pub fn submit_move(&mut self, pos: Position, elapsed: Duration) -> Result<MoveOutcome> {
        let active = self.awaiting()?;
        if self.heuristic_symbol == Some(active) {
            return Err(EngineError::HeuristicTurn(active));
        }

        if elapsed > self.time_limit {
            log!(
                "'{}' ran out of time ({:.1}s > {}s), turn forfeited",
                active,
                elapsed.as_secs_f64(),
                self.time_limit.as_secs()
            );
            self.last_move = None;
            self.clear_undo_unless(active);
            self.pass_turn(active);
            return Ok(MoveOutcome::TimedOut {
                forfeited_by: active,
                elapsed,
            });
        }

        validate_move(&self.board, pos)?;
        let result = self.apply(pos, active)?;
        self.last_move = Some(Move::new(pos, active));

        Ok(MoveOutcome::Applied {
            position: pos,
            result,
        })
    }

    /// Same as `submit_move`, timed by the controller's own turn clock.
    pub fn submit_timed_move(&mut self, pos: Position) -> Result<MoveOutcome> {
        let elapsed = self.turn_elapsed();
        self.submit_move(pos, elapsed)
    }

    /// Resolves the heuristic opponent's turn. No time limit, no undo.
    pub fn play_heuristic_move(&mut self, rng: &mut SessionRng) -> Result<Position> {
        let active = self.awaiting()?;
        if self.heuristic_symbol != Some(active) {
            return Err(EngineError::NotHeuristicTurn);
        }

        let opponent = self.other_symbol(active);
        let pos = select_move(&self.board, active, opponent, rng).ok_or(EngineError::RoundOver)?;
        validate_move(&self.board, pos)?;
        self.apply(pos, active)?;
        self.last_move = None;

        Ok(pos)
    }

    /// Takes back the human mover's move made immediately before. The turn
    /// goes back to that mover. One undo per turn.
    pub fn undo_last_move(&mut self) -> Result<Position> {
        let active = self.awaiting()?;

        let last_move = match self.last_move.take() {
            Some(last_move) if self.undo_used_by == Some(last_move.symbol) => {
                self.last_move = Some(last_move);
                return Err(EngineError::UndoAlreadyUsedThisTurn);
            }
            Some(last_move) => last_move,
            None if self.undo_used_by == Some(active) => {
                return Err(EngineError::UndoAlreadyUsedThisTurn);
            }
            None => return Err(EngineError::NothingToUndo),
        };

        self.board.clear(last_move.position)?;
        self.moves_played -= 1;
        self.undo_used_by = Some(last_move.symbol);
        self.state = TurnState::AwaitingMove(last_move.symbol);
        self.restart_turn_clock();

        log!("'{}' took back {}", last_move.symbol, last_move.position);
        Ok(last_move.position)
    }

    fn apply(&mut self, pos: Position, symbol: Symbol) -> Result<RoundResult> {
        self.board.set(pos, symbol)?;
        self.moves_played += 1;
        self.clear_undo_unless(symbol);

        let result = evaluate(&self.board);
        if result.is_terminal() {
            self.state = TurnState::RoundOver(result.clone());
        } else {
            self.pass_turn(symbol);
        }
        Ok(result)
    }

    fn clear_undo_unless(&mut self, symbol: Symbol) {
        if self.undo_used_by != Some(symbol) {
            self.undo_used_by = None;
        }
    }

    fn pass_turn(&mut self, from: Symbol) {
        self.state = TurnState::AwaitingMove(self.other_symbol(from));
        self.restart_turn_clock();
    }
}
