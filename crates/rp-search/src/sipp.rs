//! Augmented SIPP: one search over the safe-interval graph from a fixed
//! reference time.
//!
//! # Loop
//!
//! ```text
//! push identity ATF [-inf, t_ref, +inf, 0] at the source
//! while let Some(best) = open.peek():
//!     best at goal location -> done (best stays open for the driver)
//!     pop best, expand:
//!         for each out edge, for each buffer policy candidate:
//!             collapsed or over capacity      -> prune
//!             (to, gamma) finalized           -> skip
//!             (to, gamma) open and not better -> skip
//!             (to, gamma) open and better     -> decrease key
//!             otherwise                       -> push
//! ```
//!
//! "Better" means a strictly earlier arrival, or an equal arrival over a
//! wider domain.

use rp_atf::{EdgeAtf, Gamma, GammaItem};
use rp_core::{Location, NodeId, SearchNodeId, Time};
use rp_graph::{Graph, GraphEdge};

use crate::open::{OpenKey, OpenList, SearchNode};
use crate::policy::{Candidate, candidates};
use crate::{BufferHistory, SearchConfig, SearchError, SearchObserver, SearchResult, SearchStats};

/// Result of a single search.  "No path" is an empty path with the
/// unreachable ATF, not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub path: Vec<NodeId>,
    pub atf: EdgeAtf,
}

impl SearchOutcome {
    pub fn not_found() -> Self {
        Self { path: Vec::new(), atf: EdgeAtf::unreachable() }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// What happened to one candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// `beta <= alpha`.
    Collapsed,
    /// Consumed buffer outside a neighbour's capacity.
    OverCapacity,
    Finalized,
    /// An open state with the same key is at least as good.
    Dominated,
    Decreased(SearchNodeId),
    Generated,
}

impl CandidateOutcome {
    pub fn is_admitted(self) -> bool {
        matches!(self, CandidateOutcome::Decreased(_) | CandidateOutcome::Generated)
    }
}

/// Borrowed state shared by the searches of one profile.
pub(crate) struct SearchContext<'a, O: SearchObserver + ?Sized> {
    pub graph: &'a Graph,
    pub config: &'a SearchConfig,
    pub history: &'a mut BufferHistory,
    pub stats: &'a mut SearchStats,
    pub observer: &'a mut O,
}

impl<O: SearchObserver + ?Sized> SearchContext<'_, O> {
    /// Seed `open` at `source` and search for `goal`.  On success the goal
    /// node is returned and left open, together with the rest of the
    /// frontier.
    pub fn search(
        &mut self,
        open: &mut OpenList,
        source: NodeId,
        goal: &Location,
        t_ref: Time,
        gamma: Gamma,
    ) -> SearchResult<Option<SearchNodeId>> {
        self.stats.searches += 1;
        self.observer.on_search_start(t_ref);

        let g = EdgeAtf::identity(t_ref, gamma);
        let f = g.earliest_arrival_time();
        open.push(SearchNode { g, f, node: source, parent: None });

        let mut expanded: u64 = 0;
        while let Some(best) = open.peek() {
            let node = open.node(best).node;
            if self.graph.node(node).state.location == *goal {
                let path = open.path_to(best);
                self.observer.on_goal(&path, &open.node(best).g);
                return Ok(Some(best));
            }
            if let Some(budget) = self.config.node_budget {
                if expanded >= budget {
                    return Err(SearchError::BudgetExhausted { expanded, budget });
                }
            }
            open.pop();
            expanded += 1;
            self.expand(open, best);
        }

        self.observer.on_exhausted();
        Ok(None)
    }

    fn expand(&mut self, open: &mut OpenList, id: SearchNodeId) {
        let (cur, at) = {
            let n = open.node(id);
            (n.g.clone(), n.node)
        };
        self.stats.expanded += 1;
        self.observer.on_expand(at, &cur);

        let graph = self.graph;
        for e in graph.out_edges(at) {
            let edge = graph.edge(e);
            for candidate in candidates(&cur, edge, &*self.history, self.config) {
                self.admit(open, id, edge, candidate);
            }
        }
    }

    fn admit(&mut self, open: &mut OpenList, parent: SearchNodeId, edge: &GraphEdge, candidate: Candidate) {
        let Candidate { policy, atf, snapshot } = candidate;
        let outcome = classify(open, edge, &atf);
        self.observer.on_candidate(edge.to, policy, &atf, outcome);

        // Only allocations that enter the open list get a history entry.
        let atf = match snapshot {
            Some(snap) if outcome.is_admitted() => {
                let id = self.history.record(snap);
                let item = GammaItem { snapshot: Some(id), ..*atf.gamma().get(snap.agent) };
                atf.with_gamma_item(snap.agent, item)
            }
            _ => atf,
        };

        let f = atf.earliest_arrival_time() + edge.heuristic;
        match outcome {
            CandidateOutcome::Collapsed | CandidateOutcome::OverCapacity => self.stats.pruned += 1,
            CandidateOutcome::Finalized | CandidateOutcome::Dominated => {}
            CandidateOutcome::Decreased(handle) => {
                open.decrease_key(handle, atf, f, parent);
                self.stats.decreased += 1;
            }
            CandidateOutcome::Generated => {
                open.push(SearchNode { g: atf, f, node: edge.to, parent: Some(parent) });
                self.stats.generated += 1;
            }
        }
    }
}

fn classify(open: &OpenList, edge: &GraphEdge, atf: &EdgeAtf) -> CandidateOutcome {
    if atf.is_collapsed() {
        return CandidateOutcome::Collapsed;
    }
    let gamma = atf.gamma();
    let (before, after) = (&edge.agent_before, &edge.agent_after);
    if !before.admits(gamma.consumed(before.id)) || !after.admits(gamma.consumed(after.id)) {
        return CandidateOutcome::OverCapacity;
    }

    let key = OpenKey { node: edge.to, gamma: gamma.clone() };
    if open.is_finalized(&key) {
        return CandidateOutcome::Finalized;
    }
    match open.handle(&key) {
        None => CandidateOutcome::Generated,
        Some(handle) => {
            let old = &open.node(handle).g;
            let (new_eat, old_eat) = (atf.earliest_arrival_time(), old.earliest_arrival_time());
            if new_eat < old_eat || (new_eat == old_eat && atf.beta() > old.beta()) {
                CandidateOutcome::Decreased(handle)
            } else {
                CandidateOutcome::Dominated
            }
        }
    }
}
