//! The coordinator: spawns the worker pool, runs phases until the frontier
//! drains, then tears the pool down and reduces the partial counts.
//!
//! Lifecycle of one call:
//!
//! ```text
//! INIT -> RUNNING(0) -> RUNNING(1) -> ... -> DRAINED -> SHUTTING_DOWN -> DONE
//! ```
//!
//! Phase 0 starts as soon as the workers are spawned, so the coordinator
//! skips the release on its first iteration. Every exit path, including
//! errors, shuts the barrier down and joins all spawned workers before
//! returning.

use std::thread;

use tracing::{debug, info};

use super::merge::FrontierMerger;
use super::partition::{PartitionPolicy, Partitioner};
use super::worker::{self, write, PhaseState};
use crate::concurrency::sync::lock;
use crate::config::validate_arguments;
use crate::error::{BfsError, Result};
use crate::graph::{Graph, NodeId, Value};

/// Counts the nodes reachable from `start` (itself included) whose value is
/// `search_value`, using `workers` threads and round-robin chunks of
/// `chunk_size` frontier entries.
///
/// # Errors
/// - invalid-argument errors if `start` is not a node, `workers == 0` or
///   `chunk_size == 0`; no thread is started in that case
/// - [`BfsError::Spawn`] if a worker thread cannot be created
/// - [`BfsError::WorkerPanicked`] / [`BfsError::WorkerLost`] if a worker dies
pub fn run_parallel_bfs<G: Graph + ?Sized>(
    graph: &G,
    start: NodeId,
    search_value: Value,
    workers: usize,
    chunk_size: usize,
) -> Result<u64> {
    run_parallel_bfs_with(
        graph,
        start,
        search_value,
        workers,
        chunk_size,
        PartitionPolicy::RoundRobin,
    )
}

/// [`run_parallel_bfs`] with an explicit partition policy.
#[tracing::instrument(level = "debug", skip(graph), fields(nodes = graph.node_count()))]
pub fn run_parallel_bfs_with<G: Graph + ?Sized>(
    graph: &G,
    start: NodeId,
    search_value: Value,
    workers: usize,
    chunk_size: usize,
    policy: PartitionPolicy,
) -> Result<u64> {
    validate_arguments(graph.node_count(), start, workers, chunk_size)?;

    let state = PhaseState::new(
        graph,
        search_value,
        Partitioner::new(policy, workers, chunk_size),
    );
    state.visited.claim(start);
    write(&state.frontier).push(start);

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        let mut spawn_error = None;
        for w in 0..workers {
            let state = &state;
            let spawned = thread::Builder::new()
                .name(format!("bfs-worker-{w}"))
                .spawn_scoped(scope, move || worker::run(state, w));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    spawn_error = Some(BfsError::Spawn(err));
                    break;
                }
            }
        }

        let outcome = match spawn_error {
            Some(err) => Err(err),
            None => coordinate(&state),
        };

        // SHUTTING_DOWN: release everyone with the shutdown flag set.
        state.barrier.shut_down();

        let mut total = 0u64;
        let mut panicked = None;
        for (w, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(matches) => total += matches,
                Err(_) => {
                    panicked.get_or_insert(BfsError::WorkerPanicked { worker: w });
                }
            }
        }
        if let Some(err) = panicked {
            return Err(err);
        }

        let phases = outcome?;
        info!(
            phases,
            visited = state.visited.visited_count(),
            occurrences = total,
            "traversal complete"
        );
        Ok(total)
    })
}

/// Runs phases until the merged frontier is empty; returns the phase count.
fn coordinate<G: Graph + ?Sized>(state: &PhaseState<'_, G>) -> Result<u64> {
    let mut merger = FrontierMerger::new();
    let mut phase = 0u64;

    loop {
        if phase > 0 {
            state.barrier.start_next_generation();
        }
        state
            .barrier
            .coordinator_wait()
            .map_err(|_| BfsError::WorkerLost)?;

        // Every worker is parked: the frontier and all slots are ours.
        let mut frontier = write(&state.frontier);
        let mut slots: Vec<_> = state.slots.iter().map(|slot| lock(&**slot)).collect();
        let discovered = merger.merge(slots.iter_mut().map(|next| &mut **next), &mut frontier);

        debug!(phase, discovered, "phase merged");
        phase += 1;

        if discovered == 0 {
            return Ok(phase);
        }
    }
}
