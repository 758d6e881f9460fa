//! Grid coordinates and board dimensions.

use super::SetupError;
use serde::{Deserialize, Serialize};

/// A cell on the board, addressed by zero-based row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: usize,
    column: usize,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Zero-based row.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Zero-based column.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, column): (usize, usize)) -> Self {
        Self::new(row, column)
    }
}

/// Row and column counts of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    rows: usize,
    columns: usize,
}

impl Dimensions {
    /// Creates dimensions without validating them.
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Creates dimensions that can hold a whole number of pairs.
    pub fn paired(rows: usize, columns: usize) -> Result<Self, SetupError> {
        match rows.checked_mul(columns) {
            Some(cells) if cells > 0 && cells % 2 == 0 => Ok(Self { rows, columns }),
            _ => Err(SetupError::InvalidBoardSize { rows, columns }),
        }
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Number of pairs a full board holds.
    pub fn pair_count(&self) -> usize {
        self.cell_count() / 2
    }

    /// Returns true if the position lies on the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.column < self.columns
    }

    /// Row-major index of a position, if it lies on the grid.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.columns + pos.column)
    }

    /// Position at a row-major index, if the index is on the grid.
    pub fn position_at(&self, index: usize) -> Option<Position> {
        (index < self.cell_count()).then(|| Position::new(index / self.columns, index % self.columns))
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| Position::new(row, column)))
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_rejects_odd_and_empty() {
        assert!(Dimensions::paired(3, 3).is_err());
        assert!(Dimensions::paired(0, 4).is_err());
        assert!(Dimensions::paired(usize::MAX, 2).is_err());
        assert!(Dimensions::paired(3, 4).is_ok());
    }

    #[test]
    fn test_row_major_indexing() {
        let dims = Dimensions::new(2, 3);
        assert_eq!(dims.index_of(Position::new(1, 0)), Some(3));
        assert_eq!(dims.index_of(Position::new(0, 3)), None);
        assert_eq!(dims.position_at(5), Some(Position::new(1, 2)));
        assert_eq!(dims.position_at(6), None);
    }

    #[test]
    fn test_positions_iterate_row_major() {
        let dims = Dimensions::new(2, 2);
        let all: Vec<Position> = dims.positions().collect();
        assert_eq!(
            all,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }
}
