use crate::cell::Cell;
use core::borrow::Borrow;
use core::fmt;

/// Name of an agent within a planning request.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentId(String);

impl AgentId {
    pub fn new(name: impl Into<String>) -> AgentId {
        AgentId(name.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AgentId {
    fn from(name: &str) -> AgentId {
        AgentId::new(name)
    }
}

impl From<String> for AgentId {
    fn from(name: String) -> AgentId {
        AgentId(name)
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An agent to be routed from `start` to `goal`. `start == goal` is allowed and yields a
/// single-cell path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    pub id: AgentId,
    pub start: Cell,
    pub goal: Cell,
}

impl AgentSpec {
    pub fn new(id: impl Into<AgentId>, start: impl Into<Cell>, goal: impl Into<Cell>) -> AgentSpec {
        AgentSpec {
            id: id.into(),
            start: start.into(),
            goal: goal.into(),
        }
    }
}

impl fmt::Display for AgentSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.id, self.start, self.goal)
    }
}
