//! Coordinator-side merge of the per-worker next-frontier buffers.

use std::collections::HashSet;

use crate::graph::NodeId;

/// Deduplicating merge of partial frontiers into the next frontier.
///
/// The scratch set is kept between phases so its allocation is reused.
#[derive(Debug, Default)]
pub struct FrontierMerger {
    seen: HashSet<NodeId>,
}

impl FrontierMerger {
    /// Creates an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces `frontier` with the sorted union of all `buffers` and clears
    /// each buffer for reuse.
    ///
    /// A node appearing in several buffers, or several times in one buffer,
    /// appears once in the result. Returns the new frontier length.
    pub fn merge<'a, I>(&mut self, buffers: I, frontier: &mut Vec<NodeId>) -> usize
    where
        I: IntoIterator<Item = &'a mut Vec<NodeId>>,
    {
        for buffer in buffers {
            self.seen.extend(buffer.drain(..));
        }

        frontier.clear();
        frontier.extend(self.seen.drain());
        frontier.sort_unstable();
        frontier.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_across_buffers_collapse() {
        let mut merger = FrontierMerger::new();
        let mut buffers = vec![vec![7, 3, 3], vec![3, 9], vec![], vec![7]];
        let mut frontier = vec![1, 2];

        let len = merger.merge(buffers.iter_mut(), &mut frontier);

        assert_eq!(len, 3);
        assert_eq!(frontier, vec![3, 7, 9]);
        assert!(buffers.iter().all(Vec::is_empty));
    }

    #[test]
    fn empty_buffers_drain_the_frontier() {
        let mut merger = FrontierMerger::new();
        let mut buffers: Vec<Vec<NodeId>> = vec![Vec::new(); 3];
        let mut frontier = vec![4];
        assert_eq!(merger.merge(buffers.iter_mut(), &mut frontier), 0);
        assert!(frontier.is_empty());
    }

    #[test]
    fn merger_is_reusable_across_phases() {
        let mut merger = FrontierMerger::new();
        let mut frontier = Vec::new();
        merger.merge([&mut vec![5, 1]], &mut frontier);
        assert_eq!(frontier, vec![1, 5]);
        merger.merge([&mut vec![2]], &mut frontier);
        assert_eq!(frontier, vec![2]);
    }
}
