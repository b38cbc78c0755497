//! Search and driver configuration.

use rp_core::{EPSILON, Time};

use crate::{SearchError, SearchResult};

/// Knobs for [`RepeatPlanner`](crate::RepeatPlanner).
///
/// With the `serde` feature, missing fields take their default values, so a
/// JSON file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SearchConfig {
    /// Tolerance for advancing the reference time and for the minimum
    /// buffer a departure needs.
    pub epsilon: Time,

    /// Maximum expansions in a single search.  `None` = unbounded.
    pub node_budget: Option<u64>,

    /// Maximum searches per profile.  Reaching it returns the profile built
    /// so far.  `None` = until the source interval is covered.
    pub max_iterations: Option<usize>,

    /// Allow consuming buffer of the agent after a safe interval.
    pub trailing_buffer: bool,

    /// Allow handing back unneeded buffer of the agent before a safe
    /// interval.
    pub leading_buffer: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            node_budget: None,
            max_iterations: None,
            trailing_buffer: true,
            leading_buffer: true,
        }
    }
}

impl SearchConfig {
    /// Only the standard policy: plain SIPP over the interval graph.
    pub fn without_buffers() -> Self {
        Self { trailing_buffer: false, leading_buffer: false, ..Self::default() }
    }

    pub fn validate(&self) -> SearchResult<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SearchError::Config(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }
        if self.node_budget == Some(0) {
            return Err(SearchError::Config("node_budget must be at least 1".into()));
        }
        if self.max_iterations == Some(0) {
            return Err(SearchError::Config("max_iterations must be at least 1".into()));
        }
        Ok(())
    }
}
