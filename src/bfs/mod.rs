//! Level-synchronous breadth-first traversal engines.
//!
//! All engines count the nodes reachable from a start node whose value
//! equals a search value, and all agree on the result:
//!
//! - [`sequential_bfs`]: single-threaded queue BFS, the reference.
//! - [`run_parallel_bfs`]: a fixed pool of worker threads released phase by
//!   phase through a [`GenerationalBarrier`](crate::GenerationalBarrier); the
//!   coordinator merges per-worker next-frontier buffers between phases.
//! - [`pool_bfs`] (feature `parallel`): the same level loop on a `rayon`
//!   thread pool.
//!
//! Visited nodes are claimed with one atomic test-and-set per node, so no
//! node enters two workers' buffers; the merge still deduplicates and sorts,
//! which keeps frontier order, and therefore partitioning, reproducible.

pub mod driver;
pub mod merge;
pub mod partition;
#[cfg(feature = "parallel")]
pub mod pool;
pub mod sequential;
mod worker;

pub use driver::{run_parallel_bfs, run_parallel_bfs_with};
pub use merge::FrontierMerger;
pub use partition::{Assignment, PartitionPolicy, Partitioner};
#[cfg(feature = "parallel")]
pub use pool::pool_bfs;
pub use sequential::sequential_bfs;

use serde::{Deserialize, Serialize};

use crate::config::BfsConfig;
use crate::error::Result;
use crate::graph::Graph;

/// A traversal engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// [`sequential_bfs`].
    Sequential,
    /// [`run_parallel_bfs_with`] on dedicated worker threads.
    #[default]
    Threads,
    /// `pool_bfs` on a `rayon` pool.
    Pool,
}

impl Strategy {
    /// Runs this engine with the parameters in `config`.
    pub fn run<G: Graph + ?Sized>(self, graph: &G, config: &BfsConfig) -> Result<u64> {
        match self {
            Self::Sequential => sequential_bfs(graph, config.start_node, config.search_value),
            Self::Threads => run_parallel_bfs_with(
                graph,
                config.start_node,
                config.search_value,
                config.workers,
                config.chunk_size,
                config.partition,
            ),
            #[cfg(feature = "parallel")]
            Self::Pool => pool_bfs(
                graph,
                config.start_node,
                config.search_value,
                config.workers,
                config.chunk_size,
            ),
            #[cfg(not(feature = "parallel"))]
            Self::Pool => Err(crate::error::BfsError::StrategyUnavailable("pool")),
        }
    }
}
