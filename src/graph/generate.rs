//! Deterministic random graph generators.
//!
//! Generators own their random state through [`FastRand`]; two calls with
//! the same parameters always produce the same graph.

use std::collections::BTreeSet;

use super::{CsrGraph, NodeId, Value};
use crate::error::GraphError;

/// A small linear congruential generator.
///
/// `state = 214013 * state + 2531011`, yielding 15 bits per step.
#[derive(Debug, Clone)]
pub struct FastRand {
    state: u32,
}

impl FastRand {
    /// Creates a generator from `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next 15-bit output.
    #[inline]
    pub fn next_u15(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(214_013).wrapping_add(2_531_011);
        (self.state >> 16) & 0x7FFF
    }

    /// Uniform-ish draw in `0..bound` from two combined outputs.
    ///
    /// # Panics
    /// Panics if `bound == 0`.
    #[inline]
    pub fn below(&mut self, bound: u32) -> u32 {
        assert!(bound != 0, "bound must be non-zero");
        let wide = (self.next_u15() << 15) | self.next_u15();
        wide % bound
    }
}

fn checked_node_count(nodes: usize) -> Result<NodeId, GraphError> {
    NodeId::try_from(nodes).map_err(|_| GraphError::TooManyNodes(nodes))
}

fn check_max_value(max_value: Value) -> Result<(), GraphError> {
    if max_value < 1 {
        return Err(GraphError::InvalidGeneratorParameter(format!(
            "max value must be positive, got {max_value}"
        )));
    }
    Ok(())
}

/// Draws a node value in `1..=max_value`.
#[inline]
fn draw_value(rng: &mut FastRand, max_value: Value) -> Value {
    // `max_value` is a positive i16, so the remainder fits as well.
    (rng.next_u15() % max_value as u32) as Value + 1
}

/// Generates a forward-only DAG in which each pair `i < j` is linked `i -> j`
/// with probability `percent`%.
///
/// Every node's value is drawn after its row of edges.
///
/// # Errors
/// Rejects `percent > 100`, `max_value < 1`, and node counts beyond the id range.
pub fn generate_dense(
    nodes: usize,
    seed: u32,
    max_value: Value,
    percent: u32,
) -> Result<CsrGraph, GraphError> {
    let n = checked_node_count(nodes)?;
    check_max_value(max_value)?;
    if percent > 100 {
        return Err(GraphError::InvalidGeneratorParameter(format!(
            "percent must be in 0..=100, got {percent}"
        )));
    }

    let mut rng = FastRand::new(seed);
    let mut adjacency = Vec::with_capacity(nodes);
    let mut values = Vec::with_capacity(nodes);

    for i in 0..n {
        let row: Vec<NodeId> = (i + 1..n)
            .filter(|_| rng.next_u15() % 100 < percent)
            .collect();
        adjacency.push(row);
        values.push(draw_value(&mut rng, max_value));
    }

    CsrGraph::from_adjacency(values, &adjacency)
}

/// Generates exactly `edges` distinct forward edges `i -> j` (`i < j`) drawn
/// uniformly over all node pairs; each adjacency list is sorted.
///
/// # Errors
/// Rejects more edges than the `n * (n - 1) / 2` available pairs,
/// `max_value < 1`, and node counts beyond the id range.
pub fn generate_sparse(
    nodes: usize,
    edges: usize,
    seed: u32,
    max_value: Value,
) -> Result<CsrGraph, GraphError> {
    let n = checked_node_count(nodes)?;
    check_max_value(max_value)?;
    let pairs = nodes.saturating_mul(nodes.saturating_sub(1)) / 2;
    if edges > pairs {
        return Err(GraphError::InvalidGeneratorParameter(format!(
            "{edges} edges requested but {nodes} nodes only admit {pairs}"
        )));
    }

    let mut rng = FastRand::new(seed);
    let mut rows: Vec<BTreeSet<NodeId>> = vec![BTreeSet::new(); nodes];

    let mut count = 0;
    while count < edges {
        let i = rng.below(n);
        let j = rng.below(n);
        if i == j {
            continue;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        if rows[lo as usize].insert(hi) {
            count += 1;
        }
    }

    let adjacency: Vec<Vec<NodeId>> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
    let values = (0..nodes).map(|_| draw_value(&mut rng, max_value)).collect();

    CsrGraph::from_adjacency(values, &adjacency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn fast_rand_matches_reference_sequence() {
        let mut rng = FastRand::new(1234);
        // 1234 * 214013 + 2531011 = 266_623_053 (no wrap); >> 16 & 0x7fff
        assert_eq!(rng.next_u15(), (266_623_053u32 >> 16) & 0x7FFF);
    }

    #[test]
    fn dense_is_deterministic_and_forward_only() {
        let a = generate_dense(64, 1234, 6, 35).unwrap();
        let b = generate_dense(64, 1234, 6, 35).unwrap();
        assert_eq!(a, b);

        for u in 0..64u32 {
            assert!(a.neighbors_of(u).iter().all(|&v| v > u));
            assert!((1..=6).contains(&a.value_of(u)));
        }
        assert_ne!(a, generate_dense(64, 4321, 6, 35).unwrap());
    }

    #[test]
    fn dense_extremes() {
        assert_eq!(generate_dense(20, 7, 6, 0).unwrap().edge_count(), 0);
        assert_eq!(generate_dense(20, 7, 6, 100).unwrap().edge_count(), 190);
        assert!(generate_dense(20, 7, 6, 101).is_err());
        assert!(generate_dense(20, 7, 0, 50).is_err());
    }

    #[test]
    fn sparse_has_exact_distinct_edges() {
        let g = generate_sparse(100, 300, 99, 6).unwrap();
        assert_eq!(g.edge_count(), 300);
        for u in 0..100u32 {
            let nbrs = g.neighbors_of(u);
            assert!(nbrs.windows(2).all(|w| w[0] < w[1]));
            assert!(nbrs.iter().all(|&v| v > u));
        }
    }

    #[test]
    fn sparse_rejects_impossible_edge_count() {
        assert!(generate_sparse(4, 7, 1, 6).is_err());
        assert_eq!(generate_sparse(4, 6, 1, 6).unwrap().edge_count(), 6);
    }
}
