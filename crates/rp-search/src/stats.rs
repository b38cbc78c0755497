use std::fmt;
use std::ops::AddAssign;

/// Search counters.  Observability only; nothing reads them back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Candidates pushed onto an open list.
    pub generated: u64,
    /// Nodes popped and expanded.
    pub expanded: u64,
    /// Decrease-key operations.
    pub decreased: u64,
    /// Candidates discarded for a collapsed domain or an exceeded buffer.
    pub pruned: u64,
    /// Single searches run.
    pub searches: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.generated += rhs.generated;
        self.expanded += rhs.expanded;
        self.decreased += rhs.decreased;
        self.pruned += rhs.pruned;
        self.searches += rhs.searches;
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "searches={} generated={} expanded={} decreased={} pruned={}",
            self.searches, self.generated, self.expanded, self.decreased, self.pruned
        )
    }
}
