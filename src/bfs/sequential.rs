//! Single-threaded queue-based BFS, the reference the parallel engines are
//! checked against.

use std::collections::VecDeque;

use crate::config::validate_arguments;
use crate::error::Result;
use crate::graph::{Graph, NodeId, Value};

/// Counts the nodes reachable from `start` (itself included) whose value is
/// `search_value`.
///
/// # Errors
/// Returns [`BfsError::StartOutOfRange`](crate::BfsError::StartOutOfRange) if
/// `start` is not a node of `graph`.
pub fn sequential_bfs<G: Graph + ?Sized>(graph: &G, start: NodeId, search_value: Value) -> Result<u64> {
    validate_arguments(graph.node_count(), start, 1, 1)?;

    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    let mut occurrences = 0u64;

    visited[start as usize] = true;
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        if graph.value_of(node) == search_value {
            occurrences += 1;
        }
        for &v in graph.neighbors_of(node) {
            if !visited[v as usize] {
                visited[v as usize] = true;
                queue.push_back(v);
            }
        }
    }

    Ok(occurrences)
}
