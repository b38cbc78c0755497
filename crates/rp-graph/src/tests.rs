//! Unit tests for rp-graph.
//!
//! All tests use hand-crafted graphs or inline text.

#[cfg(test)]
mod helpers {
    use rp_atf::{EdgeAtf, NeighbouringAgent};
    use rp_core::{NodeId, SafeInterval};

    use crate::{Graph, GraphBuilder, State};

    /// Two intervals at `M`, one before and one after a passing train:
    ///
    /// ```text
    ///   S[0,100) ──► M[0,30)  ──► G[0,inf)
    ///            └─► M[40,100) ─┘
    /// ```
    pub fn fork() -> (Graph, [NodeId; 4]) {
        let mut b = GraphBuilder::new();
        let s = b.add_node(State::new("S", SafeInterval::new(0.0, 100.0)));
        let m1 = b.add_node(State::new("M", SafeInterval::new(0.0, 30.0)));
        let m2 = b.add_node(State::new("M", SafeInterval::new(40.0, 100.0)));
        let g = b.add_node(State::new("G", SafeInterval::starting_at(0.0)));
        let none = NeighbouringAgent::NONE;
        // Added late-first to check the CSR ordering.
        b.add_edge(s, m2, EdgeAtf::new(30.0, 30.0, 100.0, 10.0), none, none, 5.0).unwrap();
        b.add_edge(s, m1, EdgeAtf::new(0.0, 0.0, 20.0, 5.0), none, none, 5.0).unwrap();
        b.add_edge(m1, g, EdgeAtf::new(5.0, 5.0, 30.0, 5.0), none, none, 0.0).unwrap();
        b.add_edge(m2, g, EdgeAtf::new(40.0, 40.0, 110.0, 5.0), none, none, 0.0).unwrap();
        (b.build(), [s, m1, m2, g])
    }
}

// ── Builder & structure ───────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rp_atf::{EdgeAtf, NeighbouringAgent};
    use rp_core::{AgentId, NodeId, SafeInterval};

    use crate::{Graph, GraphBuilder, GraphError, State};

    #[test]
    fn empty_build() {
        let g = Graph::empty();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn csr_out_edges() {
        let (g, [s, m1, m2, goal]) = super::helpers::fork();
        assert_eq!(g.out_degree(s), 2);
        assert_eq!(g.out_degree(m1), 1);
        assert_eq!(g.out_degree(m2), 1);
        assert_eq!(g.out_degree(goal), 0);
        for e in g.out_edges(s) {
            assert_eq!(g.edge(e).from, s);
        }
    }

    #[test]
    fn out_edges_sorted_by_earliest_arrival() {
        let (g, [s, m1, m2, _]) = super::helpers::fork();
        let targets: Vec<NodeId> = g.out_edges(s).map(|e| g.edge(e).to).collect();
        assert_eq!(targets, vec![m1, m2]);
    }

    #[test]
    fn edge_to_missing_node_rejected() {
        let mut b = GraphBuilder::new();
        let s = b.add_node(State::new("S", SafeInterval::new(0.0, 1.0)));
        let none = NeighbouringAgent::NONE;
        let err = b.add_edge(s, NodeId(5), EdgeAtf::new(0.0, 0.0, 1.0, 1.0), none, none, 0.0);
        assert!(matches!(err, Err(GraphError::NodeOutOfRange { count: 1, .. })));
    }

    #[test]
    fn agent_count_follows_edges() {
        let mut b = GraphBuilder::new();
        let s = b.add_node(State::new("S", SafeInterval::new(0.0, 1.0)));
        let t = b.add_node(State::new("T", SafeInterval::new(0.0, 1.0)));
        let after = NeighbouringAgent::new(AgentId(3), 10.0, 4.0);
        b.add_edge(s, t, EdgeAtf::new(0.0, 0.0, 1.0, 1.0), NeighbouringAgent::NONE, after, 0.0)
            .unwrap();
        b.set_agent_count(2);
        assert_eq!(b.build().agent_count(), 4);
    }
}

// ── Location queries ──────────────────────────────────────────────────────────

#[cfg(test)]
mod find_earliest {
    use rp_core::{Location, SafeInterval};

    use crate::{GraphBuilder, State};

    #[test]
    fn picks_interval_containing_time() {
        let (g, [s, m1, m2, _]) = super::helpers::fork();
        let m = Location::from("M");
        assert_eq!(g.find_earliest(&m, 10.0), Some(m1));
        assert_eq!(g.find_earliest(&m, 50.0), Some(m2));
        assert_eq!(g.find_earliest(&m, 35.0), None);
        assert_eq!(g.find_earliest(&Location::from("S"), 0.0), Some(s));
        assert_eq!(g.find_earliest(&Location::from("nowhere"), 0.0), None);
        assert_eq!(g.nodes_at(&m).len(), 2);
    }

    #[test]
    fn overlapping_intervals_prefer_earliest_begin() {
        let mut b = GraphBuilder::new();
        let late = b.add_node(State::new("X", SafeInterval::new(10.0, 50.0)));
        let early = b.add_node(State::new("X", SafeInterval::new(0.0, 50.0)));
        let g = b.build();
        let x = Location::from("X");
        assert_eq!(g.find_earliest(&x, 20.0), Some(early));
        assert_eq!(g.find_earliest(&x, 5.0), Some(early));
        assert_ne!(g.find_earliest(&x, 20.0), Some(late));
    }

    #[test]
    fn half_open_end() {
        let (g, _) = super::helpers::fork();
        assert_eq!(g.find_earliest(&Location::from("S"), 100.0), None);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use rp_core::{AgentId, Location, NodeId};

    use crate::{GraphError, load_graph, load_graph_reader};

    const SAMPLE: &str = "\
vertex count: 3
edge count: 2
S 0 100 -1 -1 0
G 5 50 -1 1 10
G 60 inf 1 -1 0

0 1 0 0 20 5 -1 0 1 10 4 2.5
0 2 0  60 inf 5 1 3 -1 0 0
num_trains 1
";

    #[test]
    fn loads_nodes_edges_and_agents() {
        let g = load_graph_reader(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.agent_count(), 2);

        let n1 = &g.node(NodeId(1)).state;
        assert_eq!(n1.location, Location::from("G"));
        assert_eq!(n1.neighbours.after, AgentId(1));
        assert_eq!(n1.neighbours.buffer_after, 10.0);
        assert!(!n1.neighbours.before.is_valid());
        assert_eq!(g.node(NodeId(2)).state.interval.end, f64::INFINITY);
    }

    #[test]
    fn edge_fields() {
        let g = load_graph_reader(Cursor::new(SAMPLE)).unwrap();
        let first = g.edge(g.out_edges(NodeId(0)).next().unwrap());
        assert_eq!(first.to, NodeId(1));
        assert_eq!(first.atf.beta(), 20.0);
        assert_eq!(first.atf.delta(), 5.0);
        assert_eq!(first.heuristic, 2.5);
        assert!(!first.agent_before.is_present());
        assert_eq!(first.agent_after.id, AgentId(1));
        assert_eq!(first.agent_after.max_buffer_time, 10.0);
        assert_eq!(first.agent_after.length_unsafe, 4.0);

        let second = g.edge(g.out_edges(NodeId(0)).nth(1).unwrap());
        assert_eq!(second.heuristic, 0.0, "heuristic column is optional");
        assert_eq!(second.agent_before.max_buffer_time, f64::INFINITY);
        assert_eq!(second.agent_before.length_unsafe, 3.0);
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        let g = load_graph(f.path()).unwrap();
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_graph(std::path::Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }

    #[test]
    fn bad_header_reports_line() {
        let err = load_graph_reader(Cursor::new("vertices: 2\n")).unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 1, .. }), "{err}");
    }

    #[test]
    fn bad_number_reports_line() {
        let text = "vertex count: 1\nedge count: 0\nS 0 abc -1 -1 0\n";
        let err = load_graph_reader(Cursor::new(text)).unwrap_err();
        match err {
            GraphError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("end"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn inverted_interval_rejected() {
        let text = "vertex count: 1\nedge count: 0\nS 10 5 -1 -1 0\n";
        let err = load_graph_reader(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidInterval(_)));
    }

    #[test]
    fn truncated_input() {
        let text = "vertex count: 2\nedge count: 0\nS 0 1 -1 -1 0\n";
        let err = load_graph_reader(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }));
    }

    #[test]
    fn edge_endpoint_out_of_range() {
        let text = "vertex count: 1\nedge count: 1\nS 0 1 -1 -1 0\n0 4 0 0 1 1 -1 0 -1 0 0 0\n";
        let err = load_graph_reader(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, GraphError::NodeOutOfRange { .. }));
    }
}
