//! Graph error type.

use thiserror::Error;

use rp_core::{NodeId, RpError};

/// Errors produced by `rp-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("node {node} out of range (graph has {count} nodes)")]
    NodeOutOfRange { node: NodeId, count: usize },

    #[error(transparent)]
    InvalidInterval(#[from] RpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
