//! # grid_reservation
//!
//! Multi-agent pathfinding on a 4-connected grid. Every agent is routed with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic, so each
//! individual path is as short as possible given the cells still available to it. Agents are
//! planned one after another and every cell of an accepted path is reserved for the rest of the
//! request: later agents route around the complete paths of earlier ones. Reservations are made
//! on cells, not on cells at a point in time, and a request either routes every agent or fails
//! on the first one that cannot be routed.
//!
//! Free cells are grouped into
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) so that
//! searches towards goals that cannot be reached at all are skipped.
//!
//! ```
//! use grid_reservation::{plan_all, AgentSpec, Grid};
//!
//! let grid: Grid = "....\n.##.\n....".parse().unwrap();
//! let agents = [
//!     AgentSpec::new("A", (0, 0), (0, 3)),
//!     AgentSpec::new("B", (2, 0), (2, 3)),
//! ];
//! let outcome = plan_all(&grid, &agents).unwrap();
//! assert_eq!(outcome.get("A").unwrap().path.len(), 4);
//! ```
pub mod agent;
pub mod astar;
pub mod cell;
pub mod error;
pub mod grid;
pub mod outcome;
pub mod planner;
pub mod search;

pub use agent::{AgentId, AgentSpec};
pub use astar::TieBreak;
pub use cell::Cell;
pub use error::{EmptyPath, GridError, GridResult, PlanningError, PlanningResult};
pub use grid::{Grid, MAX_DIMENSION};
pub use outcome::{AgentPlan, PlanningOutcome};
pub use planner::{plan_all, search, Planner, PlannerConfig};
pub use search::{ClaimedSet, SearchResult};

/// Inline capacity of successor lists, the size of the von Neumann neighbourhood.
const N_SMALLVEC_SIZE: usize = 4;
