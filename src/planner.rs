use crate::agent::{AgentId, AgentSpec};
use crate::astar::TieBreak;
use crate::cell::Cell;
use crate::error::{GridResult, PlanningError, PlanningResult};
use crate::grid::Grid;
use crate::outcome::{AgentPlan, PlanningOutcome};
use crate::search::{search_grid, ClaimedSet, SearchResult};
use fxhash::FxHashSet;
use log::{info, warn};

/// Settings shared by every search a [Planner] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Ordering of queue entries with equal estimated cost. Decides which of several shortest
    /// paths is returned and which cells end up visited.
    pub tie_break: TieBreak,
    /// Skip the search when start and goal are on different grid components. The result is then
    /// "no path" with an empty visited set.
    pub prune_unreachable: bool,
}

impl Default for PlannerConfig {
    fn default() -> PlannerConfig {
        PlannerConfig {
            tie_break: TieBreak::FewestMoves,
            prune_unreachable: true,
        }
    }
}

/// Routes agents one after another on a grid. Each agent is planned with A* against the grid
/// obstacles plus every cell on the paths of the agents before it; no agent is ever re-planned
/// and the order is never changed, so an early agent can make a later one unroutable.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    pub config: PlannerConfig,
}

impl Planner {
    pub fn new() -> Planner {
        Planner::default()
    }

    pub fn with_config(config: PlannerConfig) -> Planner {
        Planner { config }
    }

    /// Single-agent search from `start` to `goal`, treating `blocked` as extra obstacles.
    pub fn search(
        &self,
        grid: &Grid,
        start: Cell,
        goal: Cell,
        blocked: &ClaimedSet,
    ) -> GridResult<SearchResult> {
        search_grid(
            grid,
            start,
            goal,
            blocked,
            self.config.tie_break,
            self.config.prune_unreachable,
        )
    }

    /// Plans all agents in the given order. The request is all-or-nothing: the first agent that
    /// is invalid or cannot be routed aborts it and no plan is returned for any agent.
    pub fn plan_all(&self, grid: &Grid, agents: &[AgentSpec]) -> PlanningResult<PlanningOutcome> {
        info!(
            "Planning {} agents on a {}x{} grid",
            agents.len(),
            grid.rows(),
            grid.cols()
        );
        validate(grid, agents)?;

        let mut claimed = ClaimedSet::new();
        let mut outcome = PlanningOutcome::default();
        for agent in agents {
            let result = self
                .search(grid, agent.start, agent.goal, &claimed)
                .map_err(|source| PlanningError::InvalidInput {
                    agent: agent.id.clone(),
                    source,
                })?;
            let Some(path) = result.path else {
                warn!("No path found for agent {}", agent);
                return Err(PlanningError::NoPathFound {
                    agent: agent.id.clone(),
                });
            };
            info!("Agent {} routed in {} moves", agent, path.len() - 1);
            claimed.claim_path(&path);
            outcome.insert(
                agent.id.clone(),
                AgentPlan {
                    path,
                    visited: result.visited,
                },
            );
        }
        Ok(outcome)
    }
}

/// Checks ids for uniqueness and start and goal cells for being in bounds and free.
fn validate(grid: &Grid, agents: &[AgentSpec]) -> PlanningResult<()> {
    let mut seen: FxHashSet<&AgentId> = FxHashSet::default();
    for agent in agents {
        if !seen.insert(&agent.id) {
            return Err(PlanningError::DuplicateAgent {
                agent: agent.id.clone(),
            });
        }
        grid.check_free(&agent.start)
            .and_then(|_| grid.check_free(&agent.goal))
            .map_err(|source| PlanningError::InvalidInput {
                agent: agent.id.clone(),
                source,
            })?;
    }
    Ok(())
}

/// [Planner::search] with the default configuration.
pub fn search(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    blocked: &ClaimedSet,
) -> GridResult<SearchResult> {
    Planner::new().search(grid, start, goal, blocked)
}

/// [Planner::plan_all] with the default configuration.
pub fn plan_all(grid: &Grid, agents: &[AgentSpec]) -> PlanningResult<PlanningOutcome> {
    Planner::new().plan_all(grid, agents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn parallel_rows() {
        let grid = Grid::new(5, 5, false);
        let agents = [
            AgentSpec::new("A", (0, 0), (0, 4)),
            AgentSpec::new("B", (4, 0), (4, 4)),
        ];
        let outcome = plan_all(&grid, &agents).unwrap();
        assert_eq!(outcome.len(), 2);
        let a = outcome.get("A").unwrap();
        let b = outcome.get("B").unwrap();
        assert_eq!(a.path, (0..5).map(|c| Cell::new(0, c)).collect::<Vec<_>>());
        assert_eq!(b.path, (0..5).map(|c| Cell::new(4, c)).collect::<Vec<_>>());
    }

    #[test]
    fn later_agent_detours() {
        // A crosses the middle row, B has to go around through row 2
        let grid = Grid::new(3, 3, false);
        let agents = [
            AgentSpec::new("A", (1, 0), (1, 1)),
            AgentSpec::new("B", (0, 1), (2, 1)),
        ];
        let outcome = plan_all(&grid, &agents).unwrap();
        let b = &outcome.get("B").unwrap().path;
        assert_eq!(b.len(), 5);
        assert!(!b.contains(&Cell::new(1, 0)) && !b.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn all_or_nothing() {
        // Single corridor: A claims the middle cell B needs
        let grid: Grid = "...".parse().unwrap();
        let agents = [
            AgentSpec::new("A", (0, 1), (0, 1)),
            AgentSpec::new("B", (0, 0), (0, 2)),
        ];
        let err = plan_all(&grid, &agents).unwrap_err();
        assert_eq!(
            err,
            PlanningError::NoPathFound {
                agent: AgentId::from("B")
            }
        );
        assert_eq!(err.agent().as_str(), "B");
    }

    #[test]
    fn invalid_agents_fail_before_search() {
        let grid: Grid = "..#".parse().unwrap();
        let agents = [
            AgentSpec::new("A", (0, 0), (0, 1)),
            AgentSpec::new("B", (0, 0), (0, 2)),
        ];
        assert_eq!(
            plan_all(&grid, &agents),
            Err(PlanningError::InvalidInput {
                agent: "B".into(),
                source: GridError::Blocked {
                    cell: Cell::new(0, 2)
                }
            })
        );

        let agents = [
            AgentSpec::new("A", (0, 0), (0, 1)),
            AgentSpec::new("A", (0, 1), (0, 0)),
        ];
        assert!(matches!(
            plan_all(&grid, &agents),
            Err(PlanningError::DuplicateAgent { .. })
        ));
    }

    #[test]
    fn empty_request() {
        let outcome = plan_all(&Grid::new(2, 2, false), &[]).unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.makespan(), 0);
    }

    #[test]
    fn config_is_respected() {
        let grid: Grid = ".#.".parse().unwrap();
        let planner = Planner::with_config(PlannerConfig {
            tie_break: TieBreak::MostMoves,
            prune_unreachable: false,
        });
        let result = planner
            .search(&grid, Cell::new(0, 0), Cell::new(0, 2), &ClaimedSet::new())
            .unwrap();
        assert!(!result.found());
        assert_eq!(result.visited.len(), 1);
    }
}
