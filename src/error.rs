//! Error types for graph handling and traversal.
//!
//! Fallible library operations return [`Result<T>`]; graph construction and
//! persistence report [`GraphError`], which converts into [`BfsError`].

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised while building, generating or persisting a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An adjacency entry points outside the node range.
    #[error("edge {from}->{to} is out of bounds for {node_count} nodes")]
    EdgeOutOfRange {
        from: NodeId,
        to: NodeId,
        node_count: usize,
    },

    /// `values` and `adjacency` disagree on the number of nodes.
    #[error("graph has {values} values but {adjacency} adjacency lists")]
    LengthMismatch { values: usize, adjacency: usize },

    /// The node count does not fit in a [`NodeId`].
    #[error("{0} nodes exceed the node id range")]
    TooManyNodes(usize),

    /// A generator was asked for something it cannot produce.
    #[error("invalid generator parameter: {0}")]
    InvalidGeneratorParameter(String),
}

/// Errors raised by the traversal engines.
#[derive(Debug, Error)]
pub enum BfsError {
    /// The start node is not a node of the graph.
    #[error("start node {start} is out of range for {node_count} nodes")]
    StartOutOfRange { start: NodeId, node_count: usize },

    /// At least one worker is required.
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// Round-robin partitioning needs a non-empty chunk.
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,

    /// A worker unwound mid-phase and abandoned the barrier.
    #[error("a worker abandoned the phase barrier")]
    WorkerLost,

    /// A worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A worker thread panicked.
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// The thread pool backing the pool driver could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// The requested strategy was compiled out.
    #[error("strategy `{0}` is not available in this build")]
    StrategyUnavailable(&'static str),

    /// Graph loading or generation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl BfsError {
    /// Returns `true` for bad caller input rejected before any traversal starts.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::StartOutOfRange { .. } | Self::NoWorkers | Self::ZeroChunkSize
        )
    }

    /// Returns `true` for internal synchronization failures that abort a run.
    pub fn is_concurrency_violation(&self) -> bool {
        matches!(self, Self::WorkerLost | Self::WorkerPanicked { .. })
    }
}

/// Convenience alias for `Result<T, BfsError>`.
pub type Result<T, E = BfsError> = std::result::Result<T, E>;
