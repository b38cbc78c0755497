use rp_core::{Location, Time};
use rp_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no safe interval at {location} contains t={time}")]
    NoSafeStart { location: Location, time: Time },

    #[error("unknown location {0}")]
    UnknownLocation(Location),

    #[error("node budget exhausted after {expanded} expansions (budget {budget})")]
    BudgetExhausted { expanded: u64, budget: u64 },

    #[error("search configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type SearchResult<T> = Result<T, SearchError>;
