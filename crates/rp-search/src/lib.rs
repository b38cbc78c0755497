//! `rp-search`: conflict-aware profile search over a safe-interval graph.
//!
//! # Two levels
//!
//! ```text
//! RepeatPlanner::plan(query)
//!   t_ref = start_time
//!   while t_ref < end of source interval:
//!     ① Search  : augmented SIPP from t_ref with a fresh open list
//!                 (standard / trailing / leading buffer policies).
//!     ② Stop    : no path from t_ref.
//!     ③ Advance : next t_ref from the leftover frontier.
//!     ④ Merge   : add the path's ATF to the CompoundAtf profile.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`config`]   | `SearchConfig`                                            |
//! | [`open`]     | `OpenList`, `SearchNode`, `OpenKey`                       |
//! | [`history`]  | `BufferHistory`, `BufferSnapshot`                         |
//! | [`policy`]   | `BufferPolicy`, candidate generation                      |
//! | [`sipp`]     | single search, `SearchOutcome`, `CandidateOutcome`        |
//! | [`repeat`]   | `RepeatPlanner`, `Query`, `Plan`                          |
//! | [`batch`]    | `plan_batch`                                              |
//! | [`observer`] | `SearchObserver`, `NoopObserver`, `TracingObserver`       |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `plan_batch` runs queries on Rayon's thread pool.      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config and stats. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rp_core::Location;
//! use rp_search::{Query, RepeatPlanner, SearchConfig};
//!
//! let graph = rp_graph::load_graph(path)?;
//! let query = Query::resolve(&graph, &Location::from("A"), "B", 0.0)?;
//! let plan = RepeatPlanner::new(SearchConfig::default())?.plan(&graph, &query)?;
//! println!("{}", plan.profile);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod history;
pub mod observer;
pub mod open;
pub mod policy;
pub mod repeat;
pub mod sipp;
pub mod stats;


pub use batch::plan_batch;
pub use config::SearchConfig;
pub use error::{SearchError, SearchResult};
pub use history::{BufferHistory, BufferSnapshot};
pub use observer::{NoopObserver, SearchObserver, TracingObserver};
pub use open::{OpenKey, OpenList, SearchNode};
pub use policy::{BufferPolicy, Candidate};
pub use repeat::{Plan, Query, RepeatPlanner};
pub use sipp::{CandidateOutcome, SearchOutcome};
pub use stats::SearchStats;
