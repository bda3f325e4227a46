//! The worker side of the level-synchronous traversal.
//!
//! A worker runs one loop iteration per phase: it expands the frontier
//! entries its partition assigns it, then parks on the barrier until the
//! coordinator has merged the phase and released the next one.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crossbeam_utils::CachePadded;
use tracing::trace;

use super::partition::Partitioner;
use crate::concurrency::sync::{lock, GenerationalBarrier, Mutex, WorkerRelease};
use crate::graph::{Graph, NodeId, Value, VisitedSet};

/// State shared by the coordinator and all workers of one traversal.
///
/// The frontier and the next-frontier slots sit behind locks that are never
/// contended: workers only touch them between a release and their arrival,
/// the coordinator only between its wait and the next release.
pub(crate) struct PhaseState<'g, G: ?Sized> {
    pub(crate) graph: &'g G,
    pub(crate) search_value: Value,
    pub(crate) visited: VisitedSet,
    pub(crate) frontier: RwLock<Vec<NodeId>>,
    /// Next-frontier buffer of each worker, written only by its owner.
    pub(crate) slots: Vec<CachePadded<Mutex<Vec<NodeId>>>>,
    pub(crate) partitioner: Partitioner,
    pub(crate) barrier: GenerationalBarrier,
}

impl<'g, G: Graph + ?Sized> PhaseState<'g, G> {
    pub(crate) fn new(graph: &'g G, search_value: Value, partitioner: Partitioner) -> Self {
        let workers = partitioner.workers();
        Self {
            graph,
            search_value,
            visited: VisitedSet::new(graph.node_count()),
            frontier: RwLock::new(Vec::new()),
            slots: (0..workers)
                .map(|_| CachePadded::new(Mutex::new(Vec::new())))
                .collect(),
            partitioner,
            barrier: GenerationalBarrier::new(workers),
        }
    }
}

pub(crate) fn read<T>(rw: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rw.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(rw: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rw.write().unwrap_or_else(PoisonError::into_inner)
}

/// Expands `node`: returns whether it matches `search_value` and appends
/// every neighbor this call claimed to `next`.
#[inline]
pub(crate) fn expand<G: Graph + ?Sized>(
    graph: &G,
    visited: &VisitedSet,
    search_value: Value,
    node: NodeId,
    next: &mut Vec<NodeId>,
) -> bool {
    for &v in graph.neighbors_of(node) {
        // The plain load skips the read-modify-write for already-seen nodes.
        if !visited.is_visited(v) && visited.claim(v) {
            next.push(v);
        }
    }
    graph.value_of(node) == search_value
}

/// Wakes the coordinator if the worker unwinds before arriving.
struct AbandonOnUnwind<'a>(&'a GenerationalBarrier);

impl Drop for AbandonOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abandon();
        }
    }
}

/// Worker loop; returns the number of matches this worker found.
pub(crate) fn run<G: Graph + ?Sized>(state: &PhaseState<'_, G>, worker: usize) -> u64 {
    let _abandon = AbandonOnUnwind(&state.barrier);
    let mut matches = 0u64;
    let mut phases = 0u64;
    trace!(worker, "worker started");

    loop {
        {
            let frontier = read(&state.frontier);
            let mut next = lock(&*state.slots[worker]);
            for range in state.partitioner.assignment(frontier.len(), worker) {
                for &node in &frontier[range] {
                    if expand(state.graph, &state.visited, state.search_value, node, &mut next) {
                        matches += 1;
                    }
                }
            }
        }
        phases += 1;

        if state.barrier.worker_arrive() == WorkerRelease::Shutdown {
            break;
        }
    }

    trace!(worker, phases, matches, "worker exiting");
    matches
}
