//! Level-synchronous BFS on a `rayon` thread pool.
//!
//! Same contract as [`run_parallel_bfs`](super::run_parallel_bfs), but each
//! level is a parallel-for over frontier chunks instead of a hand-managed
//! worker pool; the pool's own join provides the phase boundary.

use rayon::prelude::*;
use tracing::{debug, info};

use super::merge::FrontierMerger;
use super::worker::expand;
use crate::config::validate_arguments;
use crate::error::{BfsError, Result};
use crate::graph::{Graph, NodeId, Value, VisitedSet};

/// Counts matching reachable nodes using a dedicated pool of `workers`
/// threads and chunks of `chunk_size` frontier entries.
///
/// # Errors
/// Invalid-argument errors as for `run_parallel_bfs`, or
/// [`BfsError::ThreadPool`] if the pool cannot be built.
#[tracing::instrument(level = "debug", skip(graph), fields(nodes = graph.node_count()))]
pub fn pool_bfs<G: Graph + ?Sized>(
    graph: &G,
    start: NodeId,
    search_value: Value,
    workers: usize,
    chunk_size: usize,
) -> Result<u64> {
    validate_arguments(graph.node_count(), start, workers, chunk_size)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("bfs-pool-{i}"))
        .build()
        .map_err(|e| BfsError::ThreadPool(e.to_string()))?;

    let visited = VisitedSet::new(graph.node_count());
    visited.claim(start);

    let mut frontier = vec![start];
    let mut merger = FrontierMerger::new();
    let mut occurrences = 0u64;
    let mut phase = 0u64;

    pool.install(|| {
        while !frontier.is_empty() {
            // One (matches, next-frontier) partial per rayon split.
            let mut partials: Vec<(u64, Vec<NodeId>)> = frontier
                .par_chunks(chunk_size)
                .fold(
                    || (0u64, Vec::new()),
                    |(mut matches, mut next), chunk| {
                        for &node in chunk {
                            if expand(graph, &visited, search_value, node, &mut next) {
                                matches += 1;
                            }
                        }
                        (matches, next)
                    },
                )
                .collect();

            occurrences += partials.iter().map(|(matches, _)| matches).sum::<u64>();
            let discovered = merger.merge(partials.iter_mut().map(|(_, next)| next), &mut frontier);
            debug!(phase, discovered, "phase merged");
            phase += 1;
        }
    });

    info!(
        phases = phase,
        visited = visited.visited_count(),
        occurrences,
        "traversal complete"
    );
    Ok(occurrences)
}
