use core::fmt;
use smallvec::SmallVec;

/// A grid location addressed by `(row, col)`. Ordering is lexicographic, row first.
///
/// Coordinates are signed so that neighbours of border cells can be represented and then
/// rejected by a bounds check instead of wrapping around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

/// Row and column offsets of the von Neumann neighbourhood: up, down, left, right.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Cell {
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// `|Δrow| + |Δcol|`, the number of axis-aligned moves between two cells on an empty grid.
    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The four axis-aligned neighbours in the order up, down, left, right. No bounds checking
    /// is done here.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Cell; 4]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|&(dr, dc)| Cell::new(self.row + dr, self.col + dc))
            .collect()
    }

    /// Whether `other` can be reached from this cell in exactly one move.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
