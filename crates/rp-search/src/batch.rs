//! Independent profile queries over one shared graph.

use rp_graph::Graph;

use crate::{Plan, Query, RepeatPlanner, SearchResult};

/// Plan every query, preserving order.
///
/// Queries share nothing but the read-only graph, so with the `parallel`
/// feature they run on Rayon's thread pool; results are identical either
/// way.
pub fn plan_batch(planner: &RepeatPlanner, graph: &Graph, queries: &[Query]) -> Vec<SearchResult<Plan>> {
    #[cfg(not(feature = "parallel"))]
    {
        queries.iter().map(|q| planner.plan(graph, q)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        queries.par_iter().map(|q| planner.plan(graph, q)).collect()
    }
}
