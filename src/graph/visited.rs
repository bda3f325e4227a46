//! Claim-once visited flags for concurrent traversals.
//!
//! Backed by a word-packed [`AtomicBitset`]. A claim is a single atomic
//! `fetch_or`, so among all workers examining the same node in a phase,
//! exactly one observes the transition and enqueues it.

use core::sync::atomic::Ordering;

use super::NodeId;
use crate::concurrency::atomic::AtomicBitset;

/// Visited state for every node of one traversal.
///
/// Flags only ever go from unvisited to visited.
#[derive(Debug)]
pub struct VisitedSet {
    bits: AtomicBitset,
}

impl VisitedSet {
    /// Creates a set for `nodes` nodes, none visited.
    pub fn new(nodes: usize) -> Self {
        Self {
            bits: AtomicBitset::new(nodes),
        }
    }

    /// Marks `node` visited; returns `true` iff this call performed the transition.
    #[inline]
    pub fn claim(&self, node: NodeId) -> bool {
        self.bits.test_and_set(node as usize, Ordering::AcqRel)
    }

    /// Whether `node` has been claimed.
    #[inline]
    pub fn is_visited(&self, node: NodeId) -> bool {
        self.bits.is_set(node as usize)
    }

    /// Number of claimed nodes.
    pub fn visited_count(&self) -> usize {
        self.bits.count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_is_one_shot() {
        let v = VisitedSet::new(3);
        assert!(!v.is_visited(1));
        assert!(v.claim(1));
        assert!(!v.claim(1));
        assert!(v.is_visited(1));
        assert_eq!(v.visited_count(), 1);
    }
}
