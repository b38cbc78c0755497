//! Search observer trait for diagnostics and data collection.

use rp_atf::EdgeAtf;
use rp_core::{NodeId, Time};
use tracing::{debug, trace};

use crate::{BufferPolicy, CandidateOutcome};

/// Callbacks invoked by the search and the RePEAT driver.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: candidate counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct TrailingCounter(usize);
///
/// impl SearchObserver for TrailingCounter {
///     fn on_candidate(&mut self, _: NodeId, policy: BufferPolicy, _: &EdgeAtf, outcome: CandidateOutcome) {
///         if policy == BufferPolicy::ConsumeTrailing && outcome.is_admitted() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SearchObserver {
    /// A single search starts from reference time `t_ref`.
    fn on_search_start(&mut self, _t_ref: Time) {}

    /// `node` was popped with accumulated ATF `g` and is being expanded.
    fn on_expand(&mut self, _node: NodeId, _g: &EdgeAtf) {}

    /// A candidate for `node` was produced by `policy` and classified.
    fn on_candidate(&mut self, _node: NodeId, _policy: BufferPolicy, _g: &EdgeAtf, _outcome: CandidateOutcome) {}

    /// The goal was reached along `path`.
    fn on_goal(&mut self, _path: &[NodeId], _g: &EdgeAtf) {}

    /// The open list emptied before reaching the goal.
    fn on_exhausted(&mut self) {}

    /// The driver moved to a new reference time.
    fn on_reference_time(&mut self, _t_ref: Time) {}
}

/// A [`SearchObserver`] that does nothing.
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Forwards every event to `tracing`: per-node events at `trace`, per-search
/// events at `debug`.
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_search_start(&mut self, t_ref: Time) {
        debug!(t_ref, "search start");
    }

    fn on_expand(&mut self, node: NodeId, g: &EdgeAtf) {
        trace!(%node, atf = %g, "expand");
    }

    fn on_candidate(&mut self, node: NodeId, policy: BufferPolicy, g: &EdgeAtf, outcome: CandidateOutcome) {
        trace!(%node, ?policy, ?outcome, atf = %g, "candidate");
    }

    fn on_goal(&mut self, path: &[NodeId], g: &EdgeAtf) {
        debug!(hops = path.len(), eat = g.earliest_arrival_time(), atf = %g, "goal reached");
    }

    fn on_exhausted(&mut self) {
        debug!("open list exhausted");
    }

    fn on_reference_time(&mut self, t_ref: Time) {
        debug!(t_ref, "reference time");
    }
}
