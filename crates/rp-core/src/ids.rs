//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Every owning structure in the
//! workspace is an arena (`Vec`) addressed by one of these ids, so graph
//! nodes, edges, search nodes and history snapshots never hold references to
//! each other.  Callers should prefer the `.index()` helpers over `id.0`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `true` unless this is the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a safe-interval graph node (one location × one safe interval).
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed graph edge in CSR order.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index of a neighbouring agent; doubles as the slot in a gamma vector.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of an entry in a compound arrival time function.
    pub struct AtfId(u32);
}

typed_id! {
    /// Index of a buffer-allocation snapshot in the history arena.
    pub struct SnapshotId(u32);
}

typed_id! {
    /// Handle of a node in one search's open-list arena.
    pub struct SearchNodeId(u32);
}
