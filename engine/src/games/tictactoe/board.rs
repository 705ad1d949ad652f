use crate::error::{EngineError, Result};
use super::types::{Cell, Position, Symbol};

pub const MIN_BOARD_SIZE: usize = 3;

/// N×N grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_BOARD_SIZE {
            return Err(EngineError::InvalidSize {
                size,
                min: MIN_BOARD_SIZE,
            });
        }

        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Builds a board from one string per row: `.` or space is empty, any
    /// other character is that symbol.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut board = Self::new(size).expect("test board too small");
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            assert_eq!(chars.len(), size, "row {} has wrong length", row);
            for (col, ch) in chars.into_iter().enumerate() {
                if ch != '.' && ch != ' ' {
                    board.cells[row * size + col] = Cell::Occupied(Symbol::new(ch));
                }
            }
        }
        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Position) -> Result<usize> {
        if !self.contains(pos) {
            return Err(EngineError::OutOfBounds {
                position: pos,
                size: self.size,
            });
        }
        Ok(pos.row * self.size + pos.col)
    }

    pub fn get(&self, pos: Position) -> Result<Cell> {
        let index = self.index(pos)?;
        Ok(self.cells[index])
    }

    /// Writes without checking occupancy and returns what was there before.
    /// Run `validate_move` first when applying a real move.
    pub fn set(&mut self, pos: Position, symbol: Symbol) -> Result<Cell> {
        let index = self.index(pos)?;
        Ok(std::mem::replace(&mut self.cells[index], Cell::Occupied(symbol)))
    }

    pub fn clear(&mut self, pos: Position) -> Result<Cell> {
        let index = self.index(pos)?;
        Ok(std::mem::take(&mut self.cells[index]))
    }

    /// Empty positions, row by row, left to right.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(move |(i, _)| Position::new(i / size, i % size))
    }

    pub fn is_full(&self) -> bool {
        self.empty_cells().next().is_none()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_small_sizes() {
        for size in 0..MIN_BOARD_SIZE {
            assert_eq!(
                Board::new(size),
                Err(EngineError::InvalidSize { size, min: MIN_BOARD_SIZE })
            );
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        for size in 3..=8 {
            let board = Board::new(size).unwrap();
            assert_eq!(board.empty_cells().count(), size * size);
            assert_eq!(board.occupied_count(), 0);
            assert!(!board.is_full());
        }
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new(3).unwrap();
        assert!(matches!(
            board.get(Position::new(3, 0)),
            Err(EngineError::OutOfBounds { .. })
        ));
        assert!(matches!(
            board.get(Position::new(0, 3)),
            Err(EngineError::OutOfBounds { .. })
        ));
        assert_eq!(board.get(Position::new(2, 2)), Ok(Cell::Empty));
    }

    #[test]
    fn test_set_overwrites_and_returns_previous() {
        let mut board = Board::new(3).unwrap();
        let pos = Position::new(1, 1);
        assert_eq!(board.set(pos, Symbol::X), Ok(Cell::Empty));
        assert_eq!(board.set(pos, Symbol::O), Ok(Cell::Occupied(Symbol::X)));
        assert_eq!(board.get(pos), Ok(Cell::Occupied(Symbol::O)));
        assert_eq!(board.clear(pos), Ok(Cell::Occupied(Symbol::O)));
        assert_eq!(board.get(pos), Ok(Cell::Empty));
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board = Board::from_rows(&[
            "X.O",
            ".X.",
            "OO.",
        ]);
        let empty: Vec<Position> = board.empty_cells().collect();
        assert_eq!(
            empty,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_is_full() {
        let board = Board::from_rows(&[
            "XOX",
            "XOO",
            "OXX",
        ]);
        assert!(board.is_full());
        assert_eq!(board.occupied_count(), 9);
    }

    #[test]
    fn test_snapshot_matches_cells() {
        let board = Board::from_rows(&[
            "X..",
            ".O.",
            "...",
        ]);
        let snapshot = board.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0][0], Cell::Occupied(Symbol::X));
        assert_eq!(snapshot[1][1], Cell::Occupied(Symbol::O));
        assert_eq!(snapshot[2], vec![Cell::Empty; 3]);
        assert_eq!(board.row(1), &snapshot[1][..]);
    }
}
