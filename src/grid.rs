use crate::cell::Cell;
use crate::error::{GridError, GridResult};
use core::fmt;
use core::str::FromStr;
use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Largest number of rows or columns of a [Grid], so that every cell fits in [Cell] coordinates.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// [Grid] stores the blocked ([true]) or free ([false]) state of every cell in row-major order and
/// maintains 4-connected components of the free cells in a [UnionFind] structure, so that
/// unreachable goals can be rejected without flood-filling.
///
/// The components are kept sound across edits: freeing a cell unions it with its free neighbours
/// right away, while blocking a cell only marks the components as dirty. Dirty components may
/// merge regions that are actually separated, but they never split regions that are connected, so
/// [Grid::unreachable] can be trusted at all times. [Grid::update] makes them exact again.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    blocked: Vec<bool>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(0, 0, false)
    }
}

impl Grid {
    /// Creates a `rows` by `cols` grid where every cell has the given blocked state.
    ///
    /// # Panics
    ///
    /// If `rows` or `cols` exceeds [MAX_DIMENSION]. Use [Grid::try_new] to handle this as an error.
    pub fn new(rows: usize, cols: usize, blocked: bool) -> Grid {
        match Grid::try_new(rows, cols, blocked) {
            Ok(grid) => grid,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a `rows` by `cols` grid, failing if a dimension exceeds [MAX_DIMENSION].
    pub fn try_new(rows: usize, cols: usize, blocked: bool) -> GridResult<Grid> {
        check_dimensions(rows, cols)?;
        let mut grid = Grid {
            rows,
            cols,
            blocked: vec![blocked; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Row-major index of an in-bounds cell.
    fn ix(&self, cell: &Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.row as usize * self.cols + cell.col as usize
    }

    /// Whether a cell is blocked. Cells outside of the grid count as blocked.
    pub fn is_blocked(&self, cell: &Cell) -> bool {
        !self.in_bounds(cell) || self.blocked[self.ix(cell)]
    }

    /// Whether an agent may stand on this cell: in bounds and not blocked.
    pub fn can_move_to(&self, cell: &Cell) -> bool {
        !self.is_blocked(cell)
    }

    /// Checks that a cell is a valid start or goal, i.e. in bounds and free.
    pub fn check_free(&self, cell: &Cell) -> GridResult<()> {
        if !self.in_bounds(cell) {
            Err(GridError::OutOfBounds {
                cell: *cell,
                rows: self.rows,
                cols: self.cols,
            })
        } else if self.blocked[self.ix(cell)] {
            Err(GridError::Blocked { cell: *cell })
        } else {
            Ok(())
        }
    }

    /// The axis-aligned neighbours of a cell that are in bounds and free, in the order up, down,
    /// left, right.
    pub fn neighborhood(&self, cell: &Cell) -> SmallVec<[Cell; 4]> {
        let mut neighbours = cell.neumann_neighborhood();
        neighbours.retain(|n| self.can_move_to(n));
        neighbours
    }

    /// All cells of the grid in row-major order. Dimensions are at most [MAX_DIMENSION], so the
    /// casts to coordinates are lossless.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        iproduct!(0..self.rows as i32, 0..self.cols as i32).map(|(row, col)| Cell::new(row, col))
    }

    /// All free cells of the grid in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |c| !self.blocked[self.ix(c)])
    }

    /// Updates a cell. Joins newly connected components and flags the components as dirty if
    /// they are (potentially) broken apart into multiple.
    pub fn set(&mut self, cell: Cell, blocked: bool) -> GridResult<()> {
        if !self.in_bounds(&cell) {
            return Err(GridError::OutOfBounds {
                cell,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let ix = self.ix(&cell);
        if blocked {
            if !self.blocked[ix] {
                self.components_dirty = true;
            }
        } else {
            for n in self.neighborhood(&cell) {
                let n_ix = self.ix(&n);
                self.components.union(ix, n_ix);
            }
        }
        self.blocked[ix] = blocked;
        Ok(())
    }

    /// Flips a cell between free and blocked, returning the new blocked state.
    pub fn toggle(&mut self, cell: Cell) -> GridResult<bool> {
        let blocked = !self.is_blocked(&cell);
        self.set(cell, blocked)?;
        Ok(blocked)
    }

    /// Retrieves the component id of a [Cell], or [None] if it lies outside of the grid.
    pub fn get_component(&self, cell: &Cell) -> Option<usize> {
        self.in_bounds(cell).then(|| self.components.find(self.ix(cell)))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Cells outside of the grid are
    /// unreachable from everywhere.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            !self.components.equiv(self.ix(start), self.ix(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours to the same components.
    /// Only the cells below and to the right need to be joined for every free cell.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for cell in self.cells() {
            if self.is_blocked(&cell) {
                continue;
            }
            let parent_ix = self.ix(&cell);
            for n in [
                Cell::new(cell.row + 1, cell.col),
                Cell::new(cell.row, cell.col + 1),
            ] {
                if self.can_move_to(&n) {
                    let ix = self.ix(&n);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

fn check_dimensions(rows: usize, cols: usize) -> GridResult<()> {
    if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
        return Err(GridError::TooLarge {
            rows,
            cols,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}

/// Parses an ASCII map with one line per row. `.`, `S` and `G` are free, every other character
/// is blocked. Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Grid, GridError> {
        let lines: Vec<(usize, &str)> = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();
        let Some(&(_, first)) = lines.first() else {
            return Err(GridError::Parse {
                line: 1,
                reason: "map is empty".to_owned(),
            });
        };
        let cols = first.chars().count();
        let mut blocked = Vec::with_capacity(lines.len() * cols);
        for &(line, l) in &lines {
            let width = l.chars().count();
            if width != cols {
                return Err(GridError::Parse {
                    line,
                    reason: format!("expected {cols} columns, found {width}"),
                });
            }
            blocked.extend(l.chars().map(|c| !matches!(c, '.' | 'S' | 'G')));
        }
        check_dimensions(lines.len(), cols)?;
        let mut grid = Grid {
            rows: lines.len(),
            cols,
            blocked,
            components: UnionFind::new(0),
            components_dirty: true,
        };
        grid.generate_components();
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows as i32 {
            let line: String = (0..self.cols as i32)
                .map(|col| {
                    if self.is_blocked(&Cell::new(row, col)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
