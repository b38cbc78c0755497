//! Workspace error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `SearchError`) and
//! wrap `RpError` as one variant where they surface core failures.

use thiserror::Error;

use crate::Time;

/// The base error type for `rp-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RpError {
    #[error("invalid interval <{begin},{end}>: begin must not exceed end")]
    InvalidInterval { begin: Time, end: Time },
}

/// Shorthand result type for all `rp-*` crates.
pub type RpResult<T> = Result<T, RpError>;
