//! Graphs consumed by the traversal engines.
//!
//! - [`Graph`]: the read-only view a traversal needs (node count, per-node
//!   value, per-node out-neighbors).
//! - [`CsrGraph`]: an immutable compressed-sparse-row implementation with
//!   generation and persistence helpers.
//! - [`VisitedSet`]: claim-once visited flags shared by concurrent workers.

pub mod csr;
pub mod generate;
pub mod visited;

pub use csr::CsrGraph;
pub use generate::{generate_dense, generate_sparse, FastRand};
pub use visited::VisitedSet;

/// Index of a node in a graph.
pub type NodeId = u32;

/// Value carried by every node.
pub type Value = i16;

/// Read-only graph access required by the traversals.
///
/// Implementations must be immutable for the duration of a traversal; the
/// parallel engine shares one reference across all worker threads.
pub trait Graph: Sync {
    /// Number of nodes; valid ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Value stored at `node`.
    fn value_of(&self, node: NodeId) -> Value;

    /// Out-neighbors of `node`, in insertion order.
    fn neighbors_of(&self, node: NodeId) -> &[NodeId];
}

impl<G: Graph + ?Sized> Graph for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn value_of(&self, node: NodeId) -> Value {
        (**self).value_of(node)
    }

    fn neighbors_of(&self, node: NodeId) -> &[NodeId] {
        (**self).neighbors_of(node)
    }
}
