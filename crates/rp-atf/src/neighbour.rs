//! Agents adjacent to a safe interval on a shared resource.

use std::fmt;

use rp_core::{AgentId, EPSILON, Time};

/// The agent immediately ahead of (or behind) a safe interval on the same
/// resource, and how much of its own slack it can give up.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighbouringAgent {
    /// Index into a [`Gamma`](crate::Gamma) vector; `AgentId::INVALID` if
    /// there is no neighbour.
    pub id: AgentId,
    /// Delay this agent can absorb without breaking its own schedule.
    pub max_buffer_time: Time,
    /// Length of the unsafe zone that follows the safe interval.  Delaying
    /// this agent by that much opens the zone to us.
    pub length_unsafe: Time,
}

impl NeighbouringAgent {
    /// No neighbour: nothing to consume, nothing to validate.
    pub const NONE: NeighbouringAgent = NeighbouringAgent {
        id: AgentId::INVALID,
        max_buffer_time: 0.0,
        length_unsafe: 0.0,
    };

    pub fn new(id: AgentId, max_buffer_time: Time, length_unsafe: Time) -> Self {
        Self { id, max_buffer_time, length_unsafe }
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.id.is_valid()
    }

    /// Delays that can be imposed on this agent to open the zone trailing
    /// the interval: its unsafe length when that fits strictly inside its
    /// buffer, then its whole (finite) buffer.  Empty when no neighbour is
    /// present.
    pub fn trailing_allocations(&self) -> impl Iterator<Item = Time> {
        let present = self.is_present();
        let zone = (self.length_unsafe > 0.0 && self.length_unsafe < self.max_buffer_time)
            .then_some(self.length_unsafe);
        let full = (self.max_buffer_time > 0.0 && self.max_buffer_time.is_finite())
            .then_some(self.max_buffer_time);
        [zone, full].into_iter().flatten().filter(move |_| present)
    }

    /// Whether `consumed` units of delay are within this agent's capacity.
    pub fn admits(&self, consumed: Time) -> bool {
        !self.is_present() || (consumed >= 0.0 && consumed <= self.max_buffer_time + EPSILON)
    }
}

impl Default for NeighbouringAgent {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for NeighbouringAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_present() {
            return f.write_str("-");
        }
        write!(f, "{}[buf={},unsafe={}]", self.id.0, self.max_buffer_time, self.length_unsafe)
    }
}
