use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::settings::{GameConfig, SessionSettings};
use super::turn_controller::{TurnController, TurnState};
use super::types::{Cell, MoveOutcome, Position, RoundResult, Symbol};

/// The presentation layer's side of a session run by `Session::run`.
/// Moves arrive already parsed; rendering and prompting stay outside.
pub trait SessionDriver {
    /// Next human move for `symbol`. Time spent here counts against the
    /// turn's limit, including earlier rejected attempts.
    fn request_move(&mut self, board: &Board, symbol: Symbol) -> Position;

    /// Offered right after each of the human's own moves.
    fn wants_undo(&mut self, _board: &Board, _symbol: Symbol) -> bool {
        false
    }

    fn move_rejected(&mut self, _symbol: Symbol, _error: &EngineError) {}

    fn move_timed_out(&mut self, _symbol: Symbol) {}

    fn heuristic_moved(&mut self, _board: &Board, _symbol: Symbol, _position: Position) {}

    fn round_finished(&mut self, _board: &Board, _result: &RoundResult, _scores: &HashMap<Symbol, u32>) {}

    fn play_again(&mut self, scores: &HashMap<Symbol, u32>) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalScores {
    /// In play order: first symbol, then second.
    pub scores: Vec<(Symbol, u32)>,
    pub draws: u32,
    pub rounds_played: u32,
}

impl FinalScores {
    pub fn score_of(&self, symbol: Symbol) -> u32 {
        self.scores
            .iter()
            .find(|(s, _)| *s == symbol)
            .map_or(0, |(_, score)| *score)
    }

    /// `None` on a tie.
    pub fn leader(&self) -> Option<Symbol> {
        match self.scores.as_slice() {
            [(first, a), (second, b)] => match a.cmp(b) {
                Ordering::Greater => Some(*first),
                Ordering::Less => Some(*second),
                Ordering::Equal => None,
            },
            _ => None,
        }
    }
}

/// Consecutive rounds between the same two symbols with accumulated scores.
#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    scores: HashMap<Symbol, u32>,
    draws: u32,
    rounds_played: u32,
    round: TurnController,
    round_recorded: bool,
    blank_board: Board,
    rng: SessionRng,
}

impl Session {
    pub fn new(settings: SessionSettings, rng: SessionRng) -> Result<Self> {
        settings.validate()?;
        let blank_board = Board::new(settings.board_size)?;
        let round = TurnController::with_board(blank_board.clone(), &settings);
        let scores = settings.symbols().into_iter().map(|s| (s, 0)).collect();

        log!(
            "New session: {}x{} board, '{}' vs '{}' ({:?}), {}s per move, seed {}",
            settings.board_size,
            settings.board_size,
            settings.first_symbol,
            settings.second_symbol,
            settings.opponent,
            settings.time_limit.as_secs(),
            rng.seed()
        );

        Ok(Self {
            settings,
            scores,
            draws: 0,
            rounds_played: 0,
            round,
            round_recorded: false,
            blank_board,
            rng,
        })
    }

    /// A configured seed makes the heuristic's random fallback reproducible.
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        let rng = config
            .seed
            .map_or_else(SessionRng::from_random, SessionRng::new);
        Self::new(SessionSettings::from(config), rng)
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn scores(&self) -> &HashMap<Symbol, u32> {
        &self.scores
    }

    pub fn score_of(&self, symbol: Symbol) -> u32 {
        self.scores.get(&symbol).copied().unwrap_or(0)
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn round(&self) -> &TurnController {
        &self.round
    }

    pub fn board(&self) -> &Board {
        self.round.board()
    }

    pub fn board_snapshot(&self) -> Vec<Vec<Cell>> {
        self.round.board().snapshot()
    }

    pub fn state(&self) -> &TurnState {
        self.round.state()
    }

    pub fn active_symbol(&self) -> Option<Symbol> {
        self.round.active_symbol()
    }

    pub fn round_result(&self) -> Option<&RoundResult> {
        self.round.result()
    }

    pub fn is_heuristic_turn(&self) -> bool {
        self.round.is_heuristic_turn()
    }

    pub fn submit_move(&mut self, pos: Position, elapsed: Duration) -> Result<MoveOutcome> {
        let outcome = self.round.submit_move(pos, elapsed)?;
        self.record_round_result();
        Ok(outcome)
    }

    pub fn submit_timed_move(&mut self, pos: Position) -> Result<MoveOutcome> {
        let outcome = self.round.submit_timed_move(pos)?;
        self.record_round_result();
        Ok(outcome)
    }

    /// Selects and applies the heuristic opponent's move.
    pub fn request_heuristic_move(&mut self) -> Result<Position> {
        let pos = self.round.play_heuristic_move(&mut self.rng)?;
        self.record_round_result();
        Ok(pos)
    }

    pub fn undo_last_move(&mut self) -> Result<Position> {
        self.round.undo_last_move()
    }

    /// Fresh board, scores kept. An unfinished round is abandoned unscored.
    pub fn start_new_round(&mut self) {
        if !self.round.is_over() {
            log!("Abandoning round after {} moves", self.round.moves_played());
        }
        self.round = TurnController::with_board(self.blank_board.clone(), &self.settings);
        self.round_recorded = false;
        log!("Round {} started", self.rounds_played + 1);
    }

    fn record_round_result(&mut self) {
        if self.round_recorded {
            return;
        }
        let Some(result) = self.round.result() else {
            return;
        };

        match result {
            RoundResult::Win { symbol, line } => {
                *self.scores.entry(*symbol).or_insert(0) += 1;
                log!("'{}' wins the round on {:?}", symbol, line.kind);
            }
            RoundResult::Draw => {
                self.draws += 1;
                log!("Round drawn");
            }
            RoundResult::InProgress => return,
        }
        self.rounds_played += 1;
        self.round_recorded = true;
    }

    pub fn final_scores(&self) -> FinalScores {
        FinalScores {
            scores: self
                .settings
                .symbols()
                .into_iter()
                .map(|s| (s, self.score_of(s)))
                .collect(),
            draws: self.draws,
            rounds_played: self.rounds_played,
        }
    }

    pub fn finish(self) -> FinalScores {
        let final_scores = self.final_scores();
        log!(
            "Session over after {} rounds: {:?}, {} draws",
            final_scores.rounds_played,
            final_scores.scores,
            final_scores.draws
        );
        final_scores
    }

    /// Plays rounds until the driver declines another one.
    pub fn run<D: SessionDriver>(mut self, driver: &mut D) -> FinalScores {
        loop {
            self.play_round(driver);

            if let Some(result) = self.round.result() {
                driver.round_finished(self.round.board(), result, &self.scores);
            }
            if !driver.play_again(&self.scores) {
                break;
            }
            self.start_new_round();
        }
        self.finish()
    }

    fn play_round<D: SessionDriver>(&mut self, driver: &mut D) {
        self.round.restart_turn_clock();

        while let Some(symbol) = self.active_symbol() {
            if self.is_heuristic_turn() {
                match self.request_heuristic_move() {
                    Ok(pos) => driver.heuristic_moved(self.round.board(), symbol, pos),
                    Err(e) => {
                        log!("Heuristic move failed: {}", e);
                        return;
                    }
                }
                self.round.restart_turn_clock();
                continue;
            }

            let pos = driver.request_move(self.round.board(), symbol);
            match self.submit_timed_move(pos) {
                Ok(MoveOutcome::Applied { .. }) => {
                    if !self.round.is_over()
                        && driver.wants_undo(self.round.board(), symbol)
                        && let Err(e) = self.undo_last_move()
                    {
                        driver.move_rejected(symbol, &e);
                    }
                    self.round.restart_turn_clock();
                }
                Ok(MoveOutcome::TimedOut { .. }) => {
                    driver.move_timed_out(symbol);
                    self.round.restart_turn_clock();
                }
                Err(e) => driver.move_rejected(symbol, &e),
            }
        }
    }
}
