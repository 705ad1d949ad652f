use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The mark a participant places. Any visible character works; the two
/// symbols of a session must differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(char);

impl Symbol {
    pub const X: Symbol = Symbol('X');
    pub const O: Symbol = Symbol('O');

    pub const fn new(ch: char) -> Self {
        Self(ch)
    }

    pub fn as_char(&self) -> char {
        self.0
    }

    pub fn is_visible(&self) -> bool {
        !self.0.is_whitespace() && !self.0.is_control()
    }
}

impl From<char> for Symbol {
    fn from(ch: char) -> Self {
        Self(ch)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Symbol),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(symbol) => Some(*symbol),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    MainDiagonal,
    AntiDiagonal,
}

impl LineKind {
    /// The N positions this line covers, in ascending row order
    /// (ascending column order for a row).
    pub fn positions(&self, size: usize) -> Vec<Position> {
        match *self {
            LineKind::Row(row) => (0..size).map(|col| Position::new(row, col)).collect(),
            LineKind::Column(col) => (0..size).map(|row| Position::new(row, col)).collect(),
            LineKind::MainDiagonal => (0..size).map(|i| Position::new(i, i)).collect(),
            LineKind::AntiDiagonal => (0..size).map(|i| Position::new(i, size - 1 - i)).collect(),
        }
    }
}

/// N positions all holding the same symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub positions: Vec<Position>,
}

impl Line {
    pub fn new(kind: LineKind, size: usize) -> Self {
        Self {
            kind,
            positions: kind.positions(size),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundResult {
    InProgress,
    Draw,
    Win { symbol: Symbol, line: Line },
}

impl RoundResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundResult::InProgress)
    }

    pub fn winner(&self) -> Option<Symbol> {
        match self {
            RoundResult::Win { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<&Line> {
        match self {
            RoundResult::Win { line, .. } => Some(line),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub position: Position,
    pub symbol: Symbol,
    pub submitted_at: DateTime<Local>,
}

impl Move {
    pub fn new(position: Position, symbol: Symbol) -> Self {
        Self {
            position,
            symbol,
            submitted_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied { position: Position, result: RoundResult },
    /// The move arrived after the time limit and was discarded; the turn
    /// passed to the other symbol.
    TimedOut { forfeited_by: Symbol, elapsed: Duration },
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, MoveOutcome::TimedOut { .. })
    }

    pub fn result(&self) -> Option<&RoundResult> {
        match self {
            MoveOutcome::Applied { result, .. } => Some(result),
            MoveOutcome::TimedOut { .. } => None,
        }
    }
}

/// Who controls the second participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentMode {
    Human,
    Heuristic,
}
