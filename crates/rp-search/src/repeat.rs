//! RePEAT: repeated searches with an advancing reference time, merged into
//! one profile over the source's safe interval.
//!
//! Each search answers "best path departing no earlier than `t_ref`".  Its
//! ATF is valid over `[-inf, beta)`; the leftover frontier tells where a
//! different path could start to win.  The next `t_ref` is
//!
//! ```text
//! upper = max(alpha, beta)
//! pop frontier nodes; candidate = f - path.delta
//!   first candidate > alpha + eps -> min(candidate, upper) + eps
//! frontier empty                  -> upper + eps   (upper finite)
//!                                    +inf          (otherwise)
//! ```
//!
//! so the reference times strictly increase and the merged profile tiles
//! `[start_time, end of source interval)` without gaps.

use rp_atf::{CompoundAtf, EdgeAtf, Gamma};
use rp_core::{Location, NodeId, SafeInterval, Time};
use rp_graph::{Graph, GraphError};
use tracing::{debug, warn};

use crate::open::OpenList;
use crate::sipp::{SearchContext, SearchOutcome};
use crate::{BufferHistory, NoopObserver, SearchConfig, SearchError, SearchObserver, SearchResult, SearchStats};

/// One profile query.
#[derive(Clone, Debug)]
pub struct Query {
    pub source: NodeId,
    pub goal: Location,
    pub start_time: Time,
    /// Initial buffer consumption, one entry per agent.
    pub gamma: Gamma,
}

impl Query {
    pub fn new(source: NodeId, goal: impl Into<Location>, start_time: Time, gamma: Gamma) -> Self {
        Self { source, goal: goal.into(), start_time, gamma }
    }

    /// Resolve `source` to the safe interval at that location which
    /// contains `start_time` and starts earliest, with an all-zero gamma.
    pub fn resolve(
        graph: &Graph,
        source: &Location,
        goal: impl Into<Location>,
        start_time: Time,
    ) -> SearchResult<Query> {
        let goal = goal.into();
        for loc in [source, &goal] {
            if !graph.has_location(loc) {
                return Err(SearchError::UnknownLocation(loc.clone()));
            }
        }
        let node = graph
            .find_earliest(source, start_time)
            .ok_or_else(|| SearchError::NoSafeStart { location: source.clone(), time: start_time })?;
        Ok(Query::new(node, goal, start_time, Gamma::new(graph.agent_count())))
    }
}

/// A profile with its bookkeeping.
#[derive(Clone, Debug)]
pub struct Plan {
    /// Best ATF for every departure in `[start_time, end of source
    /// interval)`; payloads are node paths.
    pub profile: CompoundAtf<Vec<NodeId>>,
    pub stats: SearchStats,
    /// Reference time of every search, in order.
    pub reference_times: Vec<Time>,
    pub history: BufferHistory,
}

/// Runs single searches and RePEAT profiles with one configuration.
#[derive(Clone, Debug)]
pub struct RepeatPlanner {
    config: SearchConfig,
}

impl RepeatPlanner {
    pub fn new(config: SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// One search departing no earlier than `query.start_time`.
    pub fn search_once(&self, graph: &Graph, query: &Query) -> SearchResult<(SearchOutcome, SearchStats)> {
        self.search_once_observed(graph, query, &mut NoopObserver)
    }

    pub fn search_once_observed<O: SearchObserver + ?Sized>(
        &self,
        graph: &Graph,
        query: &Query,
        observer: &mut O,
    ) -> SearchResult<(SearchOutcome, SearchStats)> {
        check_query(graph, query)?;
        let mut stats = SearchStats::default();
        let mut history = BufferHistory::new();
        let mut open = OpenList::new();
        let mut ctx = SearchContext {
            graph,
            config: &self.config,
            history: &mut history,
            stats: &mut stats,
            observer,
        };
        let found = ctx.search(&mut open, query.source, &query.goal, query.start_time, query.gamma.clone())?;
        let outcome = match found {
            Some(id) => SearchOutcome { path: open.path_to(id), atf: open.node(id).g.clone() },
            None => SearchOutcome::not_found(),
        };
        Ok((outcome, stats))
    }

    /// The full profile for `query`.
    pub fn plan(&self, graph: &Graph, query: &Query) -> SearchResult<Plan> {
        self.plan_observed(graph, query, &mut NoopObserver)
    }

    pub fn plan_observed<O: SearchObserver + ?Sized>(
        &self,
        graph: &Graph,
        query: &Query,
        observer: &mut O,
    ) -> SearchResult<Plan> {
        check_query(graph, query)?;
        let source_end = graph.node(query.source).state.interval.end;
        let window = SafeInterval::new(query.start_time, source_end);

        let mut profile = CompoundAtf::new(window, Vec::new());
        let mut stats = SearchStats::default();
        let mut history = BufferHistory::new();
        let mut reference_times = Vec::new();
        let mut t_ref = query.start_time;

        while t_ref < window.end {
            if let Some(max) = self.config.max_iterations {
                if reference_times.len() >= max {
                    warn!(max_iterations = max, t_ref, "iteration limit reached, profile is partial");
                    break;
                }
            }
            reference_times.push(t_ref);
            observer.on_reference_time(t_ref);

            let mut open = OpenList::new();
            let mut ctx = SearchContext {
                graph,
                config: &self.config,
                history: &mut history,
                stats: &mut stats,
                observer: &mut *observer,
            };
            let Some(goal) = ctx.search(&mut open, query.source, &query.goal, t_ref, query.gamma.clone())? else {
                debug!(t_ref, "no path, profile complete");
                break;
            };

            let atf = open.node(goal).g.clone();
            let path = open.path_to(goal);
            let next = update_reference_time(&mut open, &atf, self.config.epsilon);
            debug!(t_ref, next, eat = atf.earliest_arrival_time(), hops = path.len(), atf = %atf, "profile piece");
            profile.add(atf, path);
            t_ref = next;
        }

        debug!(searches = stats.searches, segments = profile.segments().len(), %stats, "profile built");
        Ok(Plan { profile, stats, reference_times, history })
    }
}

fn check_query(graph: &Graph, query: &Query) -> SearchResult<()> {
    if query.source.index() >= graph.node_count() {
        return Err(GraphError::NodeOutOfRange { node: query.source, count: graph.node_count() }.into());
    }
    if !graph.has_location(&query.goal) {
        return Err(SearchError::UnknownLocation(query.goal.clone()));
    }
    Ok(())
}

/// Next reference time after a search found `path`, consuming the
/// remaining frontier.
pub(crate) fn update_reference_time(open: &mut OpenList, path: &EdgeAtf, epsilon: Time) -> Time {
    let alpha = path.alpha();
    let upper = alpha.max(path.beta());
    while let Some(id) = open.pop() {
        let candidate = open.node(id).f - path.delta();
        if candidate > alpha + epsilon {
            return candidate.min(upper) + epsilon;
        }
    }
    if upper.is_finite() { upper + epsilon } else { f64::INFINITY }
}
