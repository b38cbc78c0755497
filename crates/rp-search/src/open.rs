//! Open list with decrease-key over a binary heap.
//!
//! # Identity
//!
//! A search state is `(graph node, gamma)`: the same safe interval reached
//! under two different buffer allocations is two states.  Each state has at
//! most one open handle and, once popped, is finalized and never reopened.
//!
//! # Decrease-key
//!
//! `std::collections::BinaryHeap` has no decrease-key, so every node
//! carries a generation counter.  Decreasing a key bumps the generation and
//! pushes a fresh heap entry; entries with an old generation (or for a
//! closed node) are discarded when they reach the top.
//!
//! # Order
//!
//! `f` ascending, then earliest arrival ascending, then total imposed delay
//! ascending, then `beta` descending, then creation order.  This is a total
//! order, so a search is reproducible run to run.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use rp_atf::{EdgeAtf, Gamma};
use rp_core::{NodeId, SearchNodeId, Time};

/// One entry of the search arena.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Accumulated ATF from the source to `node`.
    pub g: EdgeAtf,
    /// `g.earliest_arrival_time()` plus the heuristic of the last edge.
    pub f: Time,
    pub node: NodeId,
    pub parent: Option<SearchNodeId>,
}

impl SearchNode {
    fn key(&self) -> OpenKey {
        OpenKey { node: self.node, gamma: self.g.gamma().clone() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpenKey {
    pub node: NodeId,
    pub gamma: Gamma,
}

#[derive(Copy, Clone, Debug)]
struct HeapEntry {
    f: Time,
    eat: Time,
    delays: Time,
    beta: Time,
    id: SearchNodeId,
    generation: u32,
}

impl HeapEntry {
    fn of(id: SearchNodeId, node: &SearchNode, generation: u32) -> Self {
        HeapEntry {
            f: node.f,
            eat: node.g.earliest_arrival_time(),
            delays: node.g.gamma().sum_of_delays(),
            beta: node.g.beta(),
            id,
            generation,
        }
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.eat.total_cmp(&other.eat))
            .then_with(|| self.delays.total_cmp(&other.delays))
            .then_with(|| other.beta.total_cmp(&self.beta))
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.generation.cmp(&other.generation))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

/// Open list plus closed set of one search.
#[derive(Default)]
pub struct OpenList {
    nodes: Vec<SearchNode>,
    generation: Vec<u32>,
    closed: Vec<bool>,
    // Reverse makes BinaryHeap (max) behave as min-heap.
    heap: BinaryHeap<Reverse<HeapEntry>>,
    handles: FxHashMap<OpenKey, SearchNodeId>,
    finalized: FxHashMap<OpenKey, Time>,
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new state.  Its key must not be open or finalized already.
    pub fn push(&mut self, node: SearchNode) -> SearchNodeId {
        let id = SearchNodeId(self.nodes.len() as u32);
        self.heap.push(Reverse(HeapEntry::of(id, &node, 0)));
        self.handles.insert(node.key(), id);
        self.nodes.push(node);
        self.generation.push(0);
        self.closed.push(false);
        id
    }

    /// Replace the ATF, cost and parent of open node `id`.  The key is
    /// unchanged.
    pub fn decrease_key(&mut self, id: SearchNodeId, g: EdgeAtf, f: Time, parent: SearchNodeId) {
        let i = id.index();
        debug_assert!(!self.closed[i], "decrease_key on finalized node {id}");
        let node = &mut self.nodes[i];
        node.g = g;
        node.f = f;
        node.parent = Some(parent);
        self.generation[i] += 1;
        self.heap.push(Reverse(HeapEntry::of(id, &self.nodes[i], self.generation[i])));
    }

    /// The open node for `key`, if any.
    pub fn handle(&self, key: &OpenKey) -> Option<SearchNodeId> {
        self.handles.get(key).copied()
    }

    pub fn is_finalized(&self, key: &OpenKey) -> bool {
        self.finalized.contains_key(key)
    }

    /// Arrival time recorded when `key` was finalized.
    pub fn finalized_arrival(&self, key: &OpenKey) -> Option<Time> {
        self.finalized.get(key).copied()
    }

    /// Best open node without removing it.
    pub fn peek(&mut self) -> Option<SearchNodeId> {
        while let Some(&Reverse(top)) = self.heap.peek() {
            let i = top.id.index();
            if self.closed[i] || self.generation[i] != top.generation {
                self.heap.pop();
                continue;
            }
            return Some(top.id);
        }
        None
    }

    /// Remove the best open node and finalize its key.
    pub fn pop(&mut self) -> Option<SearchNodeId> {
        let id = self.peek()?;
        self.heap.pop();
        self.closed[id.index()] = true;
        let node = &self.nodes[id.index()];
        let key = node.key();
        let eat = node.g.earliest_arrival_time();
        self.handles.remove(&key);
        self.finalized.insert(key, eat);
        Some(id)
    }

    #[inline]
    pub fn node(&self, id: SearchNodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    /// Graph nodes from the search root to `id`.
    pub fn path_to(&self, id: SearchNodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            let n = self.node(c);
            path.push(n.node);
            cur = n.parent;
        }
        path.reverse();
        path
    }

    /// Number of open states.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Nodes ever created, open or closed.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }
}
