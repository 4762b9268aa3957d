use crate::agent::AgentId;
use crate::astar::{FxIndexMap, FxIndexSet};
use crate::cell::Cell;
use crate::error::EmptyPath;
use crate::grid::Grid;
use crate::search::SearchResult;
use itertools::Itertools;

/// The route of one successfully planned agent together with the cells its search closed.
///
/// `path` is never empty. Deserialization goes through [SearchResult] and rejects plans without
/// a path, so the accessors below cannot fail on data received from elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SearchResult"))]
pub struct AgentPlan {
    pub path: Vec<Cell>,
    pub visited: FxIndexSet<Cell>,
}

impl AgentPlan {
    pub fn start(&self) -> Cell {
        self.path[0]
    }
    pub fn goal(&self) -> Cell {
        self.path[self.path.len() - 1]
    }
    pub fn moves(&self) -> usize {
        self.path.len() - 1
    }
    /// Where the agent stands after `step` moves. Agents wait on their goal once they reach it.
    pub fn position_at(&self, step: usize) -> Cell {
        self.path[step.min(self.path.len() - 1)]
    }
}

impl From<AgentPlan> for SearchResult {
    fn from(plan: AgentPlan) -> SearchResult {
        SearchResult {
            path: Some(plan.path),
            visited: plan.visited,
        }
    }
}

impl TryFrom<SearchResult> for AgentPlan {
    type Error = EmptyPath;

    fn try_from(result: SearchResult) -> Result<AgentPlan, EmptyPath> {
        match result.path {
            Some(path) if !path.is_empty() => Ok(AgentPlan {
                path,
                visited: result.visited,
            }),
            _ => Err(EmptyPath),
        }
    }
}

/// Plans of every agent of a successful request, in planning order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanningOutcome {
    plans: FxIndexMap<AgentId, AgentPlan>,
}

impl PlanningOutcome {
    pub(crate) fn insert(&mut self, id: AgentId, plan: AgentPlan) {
        self.plans.insert(id, plan);
    }

    pub fn get(&self, id: &str) -> Option<&AgentPlan> {
        self.plans.get(id)
    }
    pub fn len(&self) -> usize {
        self.plans.len()
    }
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &AgentPlan)> {
        self.plans.iter()
    }
    pub fn into_plans(self) -> FxIndexMap<AgentId, AgentPlan> {
        self.plans
    }

    /// Length of the longest path, i.e. the number of steps needed to show every agent moving.
    pub fn makespan(&self) -> usize {
        self.plans.values().map(|p| p.path.len()).max().unwrap_or(0)
    }

    /// Sum of the moves of all agents.
    pub fn total_moves(&self) -> usize {
        self.plans.values().map(AgentPlan::moves).sum()
    }

    /// The cell of every agent after `step` moves, in planning order.
    pub fn positions_at(&self, step: usize) -> Vec<(&AgentId, Cell)> {
        self.plans
            .iter()
            .map(|(id, plan)| (id, plan.position_at(step)))
            .collect()
    }

    /// Draws the grid with one character per cell: `#` for obstacles, `.` for free cells, `:` for
    /// cells visited by a search, the first letter of the agent id for cells on its path and `*`
    /// for goals. Agents planned later are drawn over earlier ones.
    pub fn render(&self, grid: &Grid) -> String {
        let mut canvas: Vec<Vec<char>> = (0..grid.rows() as i32)
            .map(|row| {
                (0..grid.cols() as i32)
                    .map(|col| {
                        if grid.is_blocked(&Cell::new(row, col)) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect();
        let mut paint = |cell: &Cell, c: char| {
            if grid.in_bounds(cell) {
                canvas[cell.row as usize][cell.col as usize] = c;
            }
        };
        for plan in self.plans.values() {
            plan.visited.iter().for_each(|cell| paint(cell, ':'));
        }
        for (id, plan) in &self.plans {
            let mark = id.as_str().chars().next().unwrap_or('?');
            plan.path.iter().for_each(|cell| paint(cell, mark));
        }
        for goal in self.plans.values().filter_map(|plan| plan.path.last()) {
            paint(goal, '*');
        }
        canvas
            .into_iter()
            .map(|line| line.into_iter().collect::<String>())
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(path: Vec<Cell>) -> AgentPlan {
        AgentPlan {
            visited: path.iter().copied().collect(),
            path,
        }
    }

    fn outcome() -> PlanningOutcome {
        let mut outcome = PlanningOutcome::default();
        outcome.insert(
            "A".into(),
            plan(vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]),
        );
        outcome.insert("B".into(), plan(vec![Cell::new(1, 2)]));
        outcome
    }

    #[test]
    fn stepping_clamps_to_goal() {
        let outcome = outcome();
        assert_eq!(outcome.makespan(), 3);
        assert_eq!(outcome.total_moves(), 2);
        let ids_and_cells = |step| {
            outcome
                .positions_at(step)
                .into_iter()
                .map(|(id, c)| (id.as_str().to_owned(), c))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            ids_and_cells(1),
            vec![
                ("A".to_owned(), Cell::new(0, 1)),
                ("B".to_owned(), Cell::new(1, 2))
            ]
        );
        assert_eq!(ids_and_cells(10)[0].1, Cell::new(0, 2));
    }

    #[test]
    fn plan_accessors() {
        let outcome = outcome();
        let a = outcome.get("A").unwrap();
        assert_eq!((a.start(), a.goal(), a.moves()), (Cell::new(0, 0), Cell::new(0, 2), 2));
        assert!(outcome.get("C").is_none());
        let result: SearchResult = a.clone().into();
        assert_eq!(result.moves(), Some(2));
        let ids: Vec<&str> = outcome.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn plans_need_a_path() {
        let found = SearchResult {
            path: Some(vec![Cell::new(1, 1)]),
            visited: FxIndexSet::default(),
        };
        let plan = AgentPlan::try_from(found).unwrap();
        assert_eq!(plan.goal(), Cell::new(1, 1));
        assert_eq!(AgentPlan::try_from(SearchResult::default()), Err(EmptyPath));
        let empty = SearchResult {
            path: Some(Vec::new()),
            visited: FxIndexSet::default(),
        };
        assert_eq!(empty.moves(), None);
        assert_eq!(AgentPlan::try_from(empty), Err(EmptyPath));
    }

    #[test]
    fn render_marks_paths_and_goals() {
        let grid: Grid = "...\n#..".parse().unwrap();
        assert_eq!(outcome().render(&grid), "AA*\n#.*");
    }
}
