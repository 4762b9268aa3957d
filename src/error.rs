use crate::agent::AgentId;
use crate::cell::Cell;
use thiserror::Error;

/// Errors raised by the grid itself: bad coordinates for a query, or a malformed map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {cell} is outside of the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("cell {cell} is blocked")]
    Blocked { cell: Cell },

    #[error("could not parse map at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("a {rows}x{cols} grid exceeds the largest supported dimension {max}")]
    TooLarge { rows: usize, cols: usize, max: usize },
}

/// An [AgentPlan](crate::AgentPlan) was built from a result without a path, or with an empty one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("an agent plan needs a path of at least one cell")]
pub struct EmptyPath;

/// Failure of a multi-agent planning request. The request is all-or-nothing, so every variant
/// names the single agent that caused it to stop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    #[error("no path found for agent {agent}")]
    NoPathFound { agent: AgentId },

    #[error("invalid input for agent {agent}: {source}")]
    InvalidInput {
        agent: AgentId,
        #[source]
        source: GridError,
    },

    #[error("agent {agent} appears more than once in the request")]
    DuplicateAgent { agent: AgentId },
}

impl PlanningError {
    /// The agent the request failed on.
    pub fn agent(&self) -> &AgentId {
        match self {
            PlanningError::NoPathFound { agent }
            | PlanningError::InvalidInput { agent, .. }
            | PlanningError::DuplicateAgent { agent } => agent,
        }
    }
}

pub type GridResult<T> = Result<T, GridError>;
pub type PlanningResult<T> = Result<T, PlanningError>;
