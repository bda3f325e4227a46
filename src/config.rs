//! Run configuration and defaults.
//!
//! Both structs deserialize from partial JSON documents; missing fields take
//! the defaults below.

use serde::{Deserialize, Serialize};

use crate::bfs::PartitionPolicy;
use crate::error::{BfsError, Result};
use crate::graph::{NodeId, Value};

/// Default start node.
pub const DEFAULT_START_NODE: NodeId = 0;
/// Default value counted by the traversal.
pub const DEFAULT_SEARCH_VALUE: Value = 5;
/// Frontier entries per round-robin chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 2;
/// Largest node value drawn by the generators.
pub const DEFAULT_MAX_VALUE: Value = 6;
/// Generator seed.
pub const DEFAULT_SEED: u32 = 1234;
/// Edge probability of the dense generator, in percent.
pub const DEFAULT_PERCENT: u32 = 35;

/// Parameters of a single traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BfsConfig {
    /// Node the traversal starts from.
    pub start_node: NodeId,
    /// Value whose occurrences are counted.
    pub search_value: Value,
    /// Worker threads.
    pub workers: usize,
    /// Frontier entries per round-robin chunk.
    pub chunk_size: usize,
    /// How each frontier is split across workers.
    pub partition: PartitionPolicy,
}

impl Default for BfsConfig {
    fn default() -> Self {
        Self {
            start_node: DEFAULT_START_NODE,
            search_value: DEFAULT_SEARCH_VALUE,
            workers: default_workers(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            partition: PartitionPolicy::default(),
        }
    }
}

impl BfsConfig {
    /// Checks the traversal preconditions against a graph of `node_count` nodes.
    ///
    /// # Errors
    /// Returns an invalid-argument [`BfsError`] for an out-of-range start node,
    /// zero workers, or a zero chunk size.
    pub fn validate(&self, node_count: usize) -> Result<()> {
        validate_arguments(node_count, self.start_node, self.workers, self.chunk_size)
    }
}

pub(crate) fn validate_arguments(
    node_count: usize,
    start: NodeId,
    workers: usize,
    chunk_size: usize,
) -> Result<()> {
    if start as usize >= node_count {
        return Err(BfsError::StartOutOfRange { start, node_count });
    }
    if workers == 0 {
        return Err(BfsError::NoWorkers);
    }
    if chunk_size == 0 {
        return Err(BfsError::ZeroChunkSize);
    }
    Ok(())
}

/// Parameters of a generated graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of nodes.
    pub nodes: usize,
    /// Seed of the generator's random sequence.
    pub seed: u32,
    /// Node values are drawn from `1..=max_value`.
    pub max_value: Value,
    /// Edge probability of the dense generator.
    pub percent: u32,
    /// When set, use the sparse generator with exactly this many edges.
    pub edges: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: 0,
            seed: DEFAULT_SEED,
            max_value: DEFAULT_MAX_VALUE,
            percent: DEFAULT_PERCENT,
            edges: None,
        }
    }
}

impl GeneratorConfig {
    /// Builds the configured graph.
    pub fn generate(&self) -> Result<crate::graph::CsrGraph> {
        let graph = match self.edges {
            Some(edges) => {
                crate::graph::generate_sparse(self.nodes, edges, self.seed, self.max_value)?
            }
            None => crate::graph::generate_dense(self.nodes, self.seed, self.max_value, self.percent)?,
        };
        Ok(graph)
    }
}

/// Worker count used when none is configured.
pub fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}
