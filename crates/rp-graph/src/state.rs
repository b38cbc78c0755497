//! Search states: one safe interval at one location.

use std::fmt;

use rp_core::{AgentId, Location, SafeInterval, Time};

/// Agents adjacent to a node's safe interval on its resource.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeNeighbours {
    /// Agent occupying the resource right before the interval.
    pub before: AgentId,
    /// Agent occupying the resource right after the interval.
    pub after: AgentId,
    /// Buffer the agent after can cede.
    pub buffer_after: Time,
}

impl NodeNeighbours {
    pub const NONE: NodeNeighbours = NodeNeighbours {
        before: AgentId::INVALID,
        after: AgentId::INVALID,
        buffer_after: 0.0,
    };
}

impl Default for NodeNeighbours {
    fn default() -> Self {
        Self::NONE
    }
}

/// Location × safe interval.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    pub location: Location,
    pub interval: SafeInterval,
    pub neighbours: NodeNeighbours,
}

impl State {
    pub fn new(location: impl Into<Location>, interval: SafeInterval) -> Self {
        Self { location: location.into(), interval, neighbours: NodeNeighbours::NONE }
    }

    pub fn with_neighbours(mut self, neighbours: NodeNeighbours) -> Self {
        self.neighbours = neighbours;
        self
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.location, self.interval)
    }
}
