//! Safe-interval graph and builder.
//!
//! # Data layout
//!
//! Nodes and edges live in two arenas addressed by `NodeId` / `EdgeId`.
//! Outgoing edges use **Compressed Sparse Row (CSR)** format: the edges of
//! node `n` occupy
//!
//! ```text
//! edges[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! and within that slice are ordered by ascending earliest arrival time,
//! so expansion order is deterministic.
//!
//! # Location index
//!
//! A hash map from `Location` to the node ids at that location (ascending)
//! answers [`Graph::find_earliest`] and [`Graph::nodes_at`] without a scan.
//!
//! The graph is immutable after [`GraphBuilder::build`], so a shared
//! reference can be handed to any number of concurrent queries.

use rustc_hash::FxHashMap;

use rp_atf::{EdgeAtf, NeighbouringAgent};
use rp_core::{EdgeId, Location, NodeId, Time};

use crate::{GraphError, GraphResult, State};

/// One safe interval of one location.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphNode {
    pub state: State,
}

/// Directed move between two safe intervals.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub atf: EdgeAtf,
    /// Agent ahead on the destination resource; delaying it opens the
    /// window later.
    pub agent_before: NeighbouringAgent,
    /// Agent behind on the destination resource; delaying it closes the
    /// window later.
    pub agent_after: NeighbouringAgent,
    /// Lower bound on the remaining travel time from `to` to the goal.
    pub heuristic: Time,
}

/// Read-only safe-interval graph.
///
/// Do not construct directly; use [`GraphBuilder`].
#[derive(Debug)]
pub struct Graph {
    /// Indexed by `NodeId`.
    pub nodes: Vec<GraphNode>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Sorted by source node, then by earliest arrival time.  Indexed by
    /// `EdgeId`.
    pub edges: Vec<GraphEdge>,

    /// Size of every gamma vector used against this graph.
    agent_count: usize,

    by_location: FxHashMap<Location, Vec<NodeId>>,
}

impl Graph {
    /// A graph with no nodes or edges.
    pub fn empty() -> Self {
        GraphBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &GraphEdge {
        &self.edges[id.index()]
    }

    /// `EdgeId`s of all outgoing edges of `node`, a contiguous range.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// All nodes at `location`, ascending by id.
    pub fn nodes_at(&self, location: &Location) -> &[NodeId] {
        self.by_location.get(location).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_location(&self, location: &Location) -> bool {
        self.by_location.contains_key(location)
    }

    /// The node at `location` whose safe interval contains `t` and starts
    /// earliest; ties go to the lowest id.
    pub fn find_earliest(&self, location: &Location, t: Time) -> Option<NodeId> {
        self.nodes_at(location)
            .iter()
            .copied()
            .filter(|&n| self.node(n).state.interval.contains(t))
            .min_by(|&a, &b| {
                let (ia, ib) = (self.node(a).state.interval, self.node(b).state.interval);
                ia.begin.total_cmp(&ib.begin).then(a.cmp(&b))
            })
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rp_atf::{EdgeAtf, NeighbouringAgent};
/// use rp_core::SafeInterval;
/// use rp_graph::{GraphBuilder, State};
///
/// let mut b = GraphBuilder::new();
/// let s = b.add_node(State::new("S", SafeInterval::new(0.0, 100.0)));
/// let g = b.add_node(State::new("G", SafeInterval::new(5.0, 50.0)));
/// b.add_edge(s, g, EdgeAtf::new(0.0, 0.0, 100.0, 5.0),
///            NeighbouringAgent::NONE, NeighbouringAgent::NONE, 0.0).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.out_degree(s), 1);
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    agent_count: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            agent_count: 0,
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, state: State) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(GraphNode { state });
        id
    }

    /// Add a directed edge.  Both endpoints must already exist.  Agent ids
    /// seen here raise the agent count as needed.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        atf: EdgeAtf,
        agent_before: NeighbouringAgent,
        agent_after: NeighbouringAgent,
        heuristic: Time,
    ) -> GraphResult<()> {
        for node in [from, to] {
            if node.index() >= self.nodes.len() {
                return Err(GraphError::NodeOutOfRange { node, count: self.nodes.len() });
            }
        }
        for agent in [agent_before.id, agent_after.id] {
            if agent.is_valid() {
                self.agent_count = self.agent_count.max(agent.index() + 1);
            }
        }
        self.edges.push(GraphEdge { from, to, atf, agent_before, agent_after, heuristic });
        Ok(())
    }

    /// Raise the agent count to at least `count`.
    pub fn set_agent_count(&mut self, count: usize) {
        self.agent_count = self.agent_count.max(count);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// O(E log E) for the edge sort plus O(N) for the CSR and location index.
    pub fn build(self) -> Graph {
        let node_count = self.nodes.len();

        let mut edges = self.edges;
        edges.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.atf.cmp_by_earliest(&b.atf)));

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &edges {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edges.len());

        let mut by_location: FxHashMap<Location, Vec<NodeId>> = FxHashMap::default();
        for (i, n) in self.nodes.iter().enumerate() {
            by_location.entry(n.state.location.clone()).or_default().push(NodeId(i as u32));
        }

        Graph {
            nodes: self.nodes,
            node_out_start,
            edges,
            agent_count: self.agent_count,
            by_location,
        }
    }
}
