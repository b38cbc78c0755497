//! Per-agent buffer consumption carried along a partial path.
//!
//! A [`Gamma`] is indexed by [`AgentId`].  Entry `k` records how much delay
//! the path imposes on agent `k`:
//!
//! - `max`: the delay actually allocated (what `k` must absorb),
//! - `min`: the part of it the departures seen so far really needed.
//!
//! The gap between the two is slack that a later leading-buffer step may
//! hand back.  Two partial paths reaching the same node with different
//! gammas are different search states, so `Gamma` implements `Eq + Hash`
//! over the `(min, max)` pairs only; provenance fields do not take part,
//! and a missing entry equals an all-zero one.

use std::fmt;
use std::hash::{Hash, Hasher};

use rp_core::{AgentId, NodeId, SnapshotId, Time};

/// Buffer use for one neighbouring agent.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GammaItem {
    pub min: Time,
    pub max: Time,
    /// Graph node at which the allocation was made.
    pub origin: Option<NodeId>,
    /// History entry recorded for the allocation, if any.
    pub snapshot: Option<SnapshotId>,
}

impl GammaItem {
    pub const ZERO: GammaItem = GammaItem { min: 0.0, max: 0.0, origin: None, snapshot: None };

    pub fn new(min: Time, max: Time) -> Self {
        Self { min, max, origin: None, snapshot: None }
    }

    pub fn with_origin(mut self, origin: NodeId, snapshot: Option<SnapshotId>) -> Self {
        self.origin = Some(origin);
        self.snapshot = snapshot;
        self
    }

    /// Slack that has been allocated but not needed.
    #[inline]
    pub fn slack(&self) -> Time {
        self.max - self.min
    }

    #[inline]
    fn key(&self) -> (u64, u64) {
        (canonical_bits(self.min), canonical_bits(self.max))
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.key() == GammaItem::ZERO.key()
    }
}

impl Default for GammaItem {
    fn default() -> Self {
        Self::ZERO
    }
}

/// `-0.0` and `0.0` hash alike.
#[inline]
fn canonical_bits(t: Time) -> u64 {
    (t + 0.0).to_bits()
}

static ZERO_ITEM: GammaItem = GammaItem::ZERO;

/// Buffer consumption vector, one [`GammaItem`] per agent.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gamma {
    items: Vec<GammaItem>,
}

impl Gamma {
    /// All-zero vector sized for `agent_count` agents.
    pub fn new(agent_count: usize) -> Self {
        Self { items: vec![GammaItem::ZERO; agent_count] }
    }

    /// Entry for `agent`; the zero item if the agent is absent or invalid.
    pub fn get(&self, agent: AgentId) -> &GammaItem {
        if !agent.is_valid() {
            return &ZERO_ITEM;
        }
        self.items.get(agent.index()).unwrap_or(&ZERO_ITEM)
    }

    /// Delay imposed on `agent` (the allocated `max`).
    #[inline]
    pub fn consumed(&self, agent: AgentId) -> Time {
        self.get(agent).max
    }

    /// A copy with `agent`'s entry replaced, growing the vector if needed.
    pub fn with_item(&self, agent: AgentId, item: GammaItem) -> Gamma {
        let mut next = self.clone();
        if !agent.is_valid() {
            return next;
        }
        let i = agent.index();
        if i >= next.items.len() {
            next.items.resize(i + 1, GammaItem::ZERO);
        }
        next.items[i] = item;
        next
    }

    /// Total delay imposed on other agents.
    pub fn sum_of_delays(&self) -> Time {
        self.items.iter().map(|g| g.max).sum()
    }

    /// Total delay the departures actually needed.
    pub fn sum_of_minimum_delays(&self) -> Time {
        self.items.iter().map(|g| g.min).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &GammaItem)> {
        self.items.iter().enumerate().map(|(i, g)| (AgentId(i as u32), g))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PartialEq for Gamma {
    fn eq(&self, other: &Self) -> bool {
        let n = self.items.len().max(other.items.len());
        (0..n).all(|i| {
            let a = self.items.get(i).unwrap_or(&ZERO_ITEM);
            let b = other.items.get(i).unwrap_or(&ZERO_ITEM);
            a.key() == b.key()
        })
    }
}

impl Eq for Gamma {}

impl Hash for Gamma {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (i, item) in self.items.iter().enumerate() {
            if !item.is_zero() {
                i.hash(state);
                item.key().hash(state);
            }
        }
    }
}

impl fmt::Display for Gamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut first = true;
        for (agent, item) in self.iter().filter(|(_, g)| !g.is_zero()) {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}:{}..{}", agent.0, item.min, item.max)?;
        }
        f.write_str("]")
    }
}
