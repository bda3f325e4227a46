//! # `frontier` - Level-Synchronous Parallel BFS
//!
//! Counts how many nodes reachable from a start node carry a target value,
//! exploring the graph one BFS level ("phase") at a time, and lets several
//! parallelization strategies for that same traversal be compared.
//!
//! ## Architecture
//!
//! ```text
//!            coordinator (caller)                    N workers
//!   seed frontier, spawn workers ──────────────▶ expand own partition
//!   coordinator_wait() ◀──────── last arrival ── worker_arrive()
//!   merge + dedup + sort buffers                  (parked)
//!   start_next_generation() ─────────────────▶ expand own partition
//!   ...                                           ...
//!   frontier empty: shut_down() ─────────────▶ exit, return count
//!   join all, sum counts
//! ```
//!
//! - [`concurrency::GenerationalBarrier`]: one reusable barrier for the whole
//!   traversal; workers wait on a captured generation number, so spurious
//!   wakeups cannot release them early.
//! - [`bfs::Partitioner`]: static even split or round-robin chunks of the
//!   current frontier, complete and disjoint.
//! - [`graph::VisitedSet`]: atomic claim-once flags, the only state written
//!   by several workers within a phase.
//! - [`bfs::FrontierMerger`]: turns the per-worker buffers into the next,
//!   sorted frontier.
//!
//! ## Example
//!
//! ```rust
//! use frontier::{run_parallel_bfs, sequential_bfs, CsrGraph};
//!
//! let graph = CsrGraph::from_adjacency(
//!     vec![5, 1, 5, 5, 9],
//!     &[vec![1, 2], vec![3], vec![3], vec![4], vec![]],
//! )?;
//!
//! for workers in [1, 2, 4, 8] {
//!     assert_eq!(run_parallel_bfs(&graph, 0, 5, workers, 2)?, 3);
//! }
//! assert_eq!(sequential_bfs(&graph, 0, 5)?, 3);
//! # Ok::<(), frontier::BfsError>(())
//! ```

#![warn(missing_docs, clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bfs;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;

pub use bfs::{
    run_parallel_bfs, run_parallel_bfs_with, sequential_bfs, FrontierMerger, PartitionPolicy,
    Partitioner, Strategy,
};
#[cfg(feature = "parallel")]
pub use bfs::pool_bfs;
pub use concurrency::{AtomicBitset, GenerationalBarrier, WorkerRelease};
pub use config::{BfsConfig, GeneratorConfig};
pub use error::{BfsError, GraphError, Result};
pub use graph::{CsrGraph, Graph, NodeId, Value, VisitedSet};
