//! `rp-core`: foundational types for the `repeat` profile search workspace.
//!
//! This crate is a dependency of every other `rp-*` crate.  It intentionally
//! has no `rp-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `AgentId`, `AtfId`, `SnapshotId`, `SearchNodeId` |
//! | [`time`]        | `Time`, `EPSILON`, `SafeInterval`                          |
//! | [`location`]    | `Location`                                                 |
//! | [`rng`]         | `QueryRng` (per-query, deterministic)                      |
//! | [`error`]       | `RpError`, `RpResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod location;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RpError, RpResult};
pub use ids::{AgentId, AtfId, EdgeId, NodeId, SearchNodeId, SnapshotId};
pub use location::Location;
pub use rng::QueryRng;
pub use time::{EPSILON, SafeInterval, Time};
