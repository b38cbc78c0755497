//! `rp-graph`: the safe-interval graph searched by `rp-search`.
//!
//! Every node is one safe interval of one location; every edge carries the
//! arrival time function of moving between two such intervals and the two
//! agents whose buffer that move may consume.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`state`]   | `State`, `NodeNeighbours`                                   |
//! | [`graph`]   | `Graph` (CSR arena), `GraphNode`, `GraphEdge`, `GraphBuilder` |
//! | [`loader`]  | `load_graph`, `load_graph_reader` (text format)             |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod graph;
pub mod loader;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{Graph, GraphBuilder, GraphEdge, GraphNode};
pub use loader::{load_graph, load_graph_reader};
pub use state::{NodeNeighbours, State};
