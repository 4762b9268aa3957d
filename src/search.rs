use crate::astar::{astar, FxIndexSet, TieBreak};
use crate::cell::Cell;
use crate::error::GridResult;
use crate::grid::Grid;
use crate::N_SMALLVEC_SIZE;
use fxhash::FxHashSet;
use log::{debug, info};
use smallvec::SmallVec;

/// Cells reserved by agents that were planned earlier in the same request. Every cell of an
/// accepted path is claimed for the rest of the request, regardless of when the agent passes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimedSet {
    cells: FxHashSet<Cell>,
}

impl ClaimedSet {
    pub fn new() -> ClaimedSet {
        ClaimedSet::default()
    }
    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }
    /// Claims every cell of a path.
    pub fn claim_path(&mut self, path: &[Cell]) {
        self.cells.extend(path.iter().copied());
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl FromIterator<Cell> for ClaimedSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> ClaimedSet {
        ClaimedSet {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for ClaimedSet {
    fn extend<T: IntoIterator<Item = Cell>>(&mut self, iter: T) {
        self.cells.extend(iter)
    }
}

/// Outcome of a single-agent search. `path` runs from start to goal inclusive and is [None] if
/// the goal could not be reached; this is distinct from the single-cell path of a search whose
/// start is its goal. `visited` holds every cell the search closed, in closing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub path: Option<Vec<Cell>>,
    pub visited: FxIndexSet<Cell>,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
    /// Number of moves along the path, one less than the number of cells on it. [None] if there
    /// is no path or the path is empty.
    pub fn moves(&self) -> Option<usize> {
        self.path.as_ref().and_then(|p| p.len().checked_sub(1))
    }
}

/// Axis-aligned moves of unit cost into cells that are free in the grid and not claimed.
fn successors(
    grid: &Grid,
    blocked: &ClaimedSet,
    cell: &Cell,
) -> SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]> {
    grid.neighborhood(cell)
        .into_iter()
        .filter(|n| !blocked.contains(n))
        .map(|n| (n, 1))
        .collect()
}

/// Computes a shortest 4-connected path from `start` to `goal` avoiding both the obstacles of
/// the grid and the `blocked` cells. The heuristic is the
/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), which never
/// overestimates the remaining moves, so the path is optimal in the number of moves.
///
/// A start or goal inside `blocked` cannot be used, which yields "no path" with an empty visited
/// set. Fails with a [GridError](crate::GridError) if start or goal lies outside of the grid or on
/// an obstacle.
pub(crate) fn search_grid(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    blocked: &ClaimedSet,
    tie_break: TieBreak,
    prune_unreachable: bool,
) -> GridResult<SearchResult> {
    grid.check_free(&start)?;
    grid.check_free(&goal)?;
    if blocked.contains(&start) || blocked.contains(&goal) {
        info!("Start {} or goal {} is already claimed", start, goal);
        return Ok(SearchResult::default());
    }
    // Components never separate connected cells, so this only skips hopeless searches.
    if prune_unreachable && grid.unreachable(&start, &goal) {
        info!("{} is not reachable from {}", goal, start);
        return Ok(SearchResult::default());
    }
    let outcome = astar(
        &start,
        |cell| successors(grid, blocked, cell),
        |cell| cell.manhattan_distance(&goal),
        |cell| *cell == goal,
        tie_break,
    );
    debug!(
        "Search {} -> {} closed {} cells, path length {:?}",
        start,
        goal,
        outcome.closed.len(),
        outcome.path.as_ref().map(|(p, _)| p.len())
    );
    Ok(SearchResult {
        path: outcome.path.map(|(path, _cost)| path),
        visited: outcome.closed,
    })
}
