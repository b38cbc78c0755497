//! Buffer-allocation policies tried for every edge.
//!
//! | Policy            | Neighbour | Effect                                        |
//! |-------------------|-----------|-----------------------------------------------|
//! | `Standard`        | -         | gamma unchanged                               |
//! | `ConsumeTrailing` | after     | delay it by its unsafe length, extends beta   |
//! | `ConsumeBuffer`   | after     | delay it by its whole buffer, extends beta    |
//! | `ConsumeLeading`  | before    | hand back unneeded delay, lowers alpha        |
//!
//! The two trailing policies fire when the agent after the edge is present
//! and the allocation exceeds what the path already holds for it.  Their
//! candidates carry a pending [`BufferSnapshot`]; it is recorded in the
//! history only if the candidate enters the open list.
//!
//! Leading fires only when all of these hold: the agent before the edge is
//! present, the path holds an allocation for it with a recorded snapshot,
//! that allocation has slack above epsilon, and without the revision the
//! path would depart before the edge window opens
//! (`cur.alpha < edge.alpha - cur.delta + held.max`).  The delay is revised
//! down to the largest value that keeps the window open at `cur.alpha`:
//!
//! ```text
//! d = clamp(cur.alpha - (edge.alpha - cur.delta), held.min, min(held.max, capacity))
//! ```
//!
//! Handing back delay shrinks every window the allocation extended, so beta
//! is bounded by `beta_base + d` over the agent's snapshot chain.

use rp_atf::{EdgeAtf, GammaItem};
use rp_core::Time;
use rp_graph::GraphEdge;

use crate::{BufferHistory, BufferSnapshot, SearchConfig};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BufferPolicy {
    Standard,
    ConsumeTrailing,
    ConsumeBuffer,
    ConsumeLeading,
}

#[derive(Clone, Debug)]
pub struct Candidate {
    pub policy: BufferPolicy,
    pub atf: EdgeAtf,
    /// Allocation to record once the candidate is admitted.
    pub snapshot: Option<BufferSnapshot>,
}

/// Candidate extensions of `cur` by `edge`, standard first.
///
/// Candidates may be collapsed; the caller prunes them.
pub fn candidates(cur: &EdgeAtf, edge: &GraphEdge, history: &BufferHistory, config: &SearchConfig) -> Vec<Candidate> {
    let (before, after) = (&edge.agent_before, &edge.agent_after);
    let standard = cur.compose(&edge.atf, before, after, cur.gamma().clone());
    let mut out = Vec::with_capacity(4);

    if config.trailing_buffer {
        let held_max = cur.gamma().get(after.id).max;
        for alloc in after.trailing_allocations().filter(|&a| a > held_max) {
            let policy = if alloc < after.max_buffer_time {
                BufferPolicy::ConsumeTrailing
            } else {
                BufferPolicy::ConsumeBuffer
            };
            out.push(consume_trailing(cur, &standard, edge, alloc, policy, config));
        }
    }
    if config.leading_buffer {
        if let Some(atf) = consume_leading(cur, edge, history, config) {
            out.push(Candidate { policy: BufferPolicy::ConsumeLeading, atf, snapshot: None });
        }
    }
    out.insert(0, Candidate { policy: BufferPolicy::Standard, atf: standard, snapshot: None });
    out
}

fn consume_trailing(
    cur: &EdgeAtf,
    standard: &EdgeAtf,
    edge: &GraphEdge,
    alloc: Time,
    policy: BufferPolicy,
    config: &SearchConfig,
) -> Candidate {
    let (before, after) = (&edge.agent_before, &edge.agent_after);
    let held = *cur.gamma().get(after.id);

    let beta_base = edge.atf.beta() - cur.delta();
    let needed = standard.alpha() - beta_base;
    let min = if needed > 0.0 {
        held.min.max((needed + config.epsilon).min(alloc))
    } else {
        held.min
    };
    let item = GammaItem { min, max: alloc, origin: Some(edge.to), snapshot: None };
    let atf = cur.compose(&edge.atf, before, after, cur.gamma().with_item(after.id, item));
    let snapshot = BufferSnapshot { agent: after.id, node: edge.to, beta_base, previous: held.snapshot };
    Candidate { policy, atf, snapshot: Some(snapshot) }
}

fn consume_leading(
    cur: &EdgeAtf,
    edge: &GraphEdge,
    history: &BufferHistory,
    config: &SearchConfig,
) -> Option<EdgeAtf> {
    let before = &edge.agent_before;
    if !before.is_present() {
        return None;
    }
    let held = *cur.gamma().get(before.id);
    let snapshot = held.snapshot?;
    let opens_at = edge.atf.alpha() - cur.delta();
    if held.slack() <= config.epsilon || cur.alpha() >= opens_at + held.max {
        return None;
    }

    let delay = (cur.alpha() - opens_at)
        .min(held.max)
        .min(before.max_buffer_time)
        .max(held.min);
    let gamma = cur.gamma().with_item(before.id, GammaItem { max: delay, ..held });
    let bound = history
        .chain(snapshot)
        .filter(|s| s.agent == before.id)
        .map(|s| s.beta_base + delay)
        .fold(f64::INFINITY, f64::min);
    Some(cur.compose(&edge.atf, before, &edge.agent_after, gamma).restrict_beta(bound))
}
