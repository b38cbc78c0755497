//! Append-only record of buffer allocations.
//!
//! When a search consumes trailing buffer of agent `k`, it records where the
//! allocation happened and the unextended window end.  A later leading-buffer
//! step that hands part of that buffer back walks the chain of `k`'s
//! snapshots to shrink every window the allocation had extended.
//!
//! Snapshots are never mutated or removed, so a `SnapshotId` stored in a
//! [`GammaItem`](rp_atf::GammaItem) stays valid for the lifetime of the
//! history, including after the search that recorded it has finished.

use std::iter;

use rp_core::{AgentId, NodeId, SnapshotId, Time};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferSnapshot {
    pub agent: AgentId,
    /// Node whose window the allocation extended.
    pub node: NodeId,
    /// End of that window, in departure time, before the extension.
    pub beta_base: Time,
    /// Earlier allocation for the same agent along the same path.
    pub previous: Option<SnapshotId>,
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferHistory {
    snapshots: Vec<BufferSnapshot>,
}

impl BufferHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, snapshot: BufferSnapshot) -> SnapshotId {
        let id = SnapshotId(self.snapshots.len() as u32);
        self.snapshots.push(snapshot);
        id
    }

    #[inline]
    pub fn get(&self, id: SnapshotId) -> &BufferSnapshot {
        &self.snapshots[id.index()]
    }

    /// `id` and every snapshot reachable through `previous`, newest first.
    pub fn chain(&self, id: SnapshotId) -> impl Iterator<Item = &BufferSnapshot> {
        iter::successors(Some(id), |&s| self.get(s).previous).map(|s| self.get(s))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BufferSnapshot> {
        self.snapshots.iter()
    }
}
