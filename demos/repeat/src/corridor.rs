//! Built-in single-track corridor used when no graph file is given.
//!
//! ```text
//!   Depot ──► Loop ──► Junction ──► Terminal
//! ```
//!
//! Agent 1 runs ahead on the main line and can be held back by up to 6;
//! agent 2 occupies the junction between its two safe intervals.  Early
//! departures squeeze in before agent 2, late ones wait for it to clear.

use rp_atf::{EdgeAtf, NeighbouringAgent};
use rp_core::{AgentId, SafeInterval};
use rp_graph::{Graph, GraphBuilder, GraphResult, NodeNeighbours, State};

const NONE: NeighbouringAgent = NeighbouringAgent::NONE;

pub const SOURCE: &str = "Depot";
pub const GOAL: &str = "Terminal";

/// Build the corridor.  Only fails if an edge names a missing node, which
/// would be a bug in this file.
pub fn build_corridor() -> GraphResult<Graph> {
    let mut b = GraphBuilder::with_capacity(6, 6);

    let main = AgentId(1);
    let crossing = AgentId(2);

    let depot = b.add_node(State::new(SOURCE, SafeInterval::new(0.0, 120.0)));
    let loop_early = b.add_node(
        State::new("Loop", SafeInterval::new(0.0, 40.0)).with_neighbours(NodeNeighbours {
            before: AgentId::INVALID,
            after: main,
            buffer_after: 6.0,
        }),
    );
    let loop_late = b.add_node(State::new("Loop", SafeInterval::new(52.0, 140.0)));
    let junction_early = b.add_node(
        State::new("Junction", SafeInterval::new(0.0, 60.0)).with_neighbours(NodeNeighbours {
            before: AgentId::INVALID,
            after: crossing,
            buffer_after: 0.0,
        }),
    );
    let junction_late = b.add_node(
        State::new("Junction", SafeInterval::new(75.0, 160.0)).with_neighbours(NodeNeighbours {
            before: crossing,
            after: AgentId::INVALID,
            buffer_after: 0.0,
        }),
    );
    let terminal = b.add_node(State::new(GOAL, SafeInterval::starting_at(0.0)));

    // Depot -> Loop: the early window closes when agent 1 enters, unless it
    // is held back.
    b.add_edge(depot, loop_early, EdgeAtf::new(0.0, 0.0, 34.0, 8.0), NONE, NeighbouringAgent::new(main, 6.0, 3.0), 8.0)?;
    b.add_edge(depot, loop_late, EdgeAtf::new(44.0, 44.0, 132.0, 8.0), NONE, NONE, 8.0)?;

    // Loop -> Junction.
    b.add_edge(loop_early, junction_early, EdgeAtf::new(8.0, 8.0, 40.0, 12.0), NONE, NONE, 4.0)?;
    b.add_edge(
        loop_late,
        junction_late,
        EdgeAtf::new(63.0, 63.0, 140.0, 12.0),
        NeighbouringAgent::new(crossing, f64::INFINITY, 0.0),
        NONE,
        4.0,
    )?;

    // Junction -> Terminal.
    b.add_edge(junction_early, terminal, EdgeAtf::new(20.0, 20.0, 60.0, 4.0), NONE, NONE, 0.0)?;
    b.add_edge(junction_late, terminal, EdgeAtf::new(75.0, 75.0, 160.0, 4.0), NONE, NONE, 0.0)?;

    b.set_agent_count(3);
    Ok(b.build())
}
