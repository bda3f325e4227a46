//! Cross-checks the engines against `petgraph`'s BFS on generated graphs.

use frontier::graph::{generate_dense, generate_sparse};
use frontier::{run_parallel_bfs, sequential_bfs, CsrGraph, Graph, Value};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;

fn petgraph_count(g: &CsrGraph, start: u32, search: Value) -> u64 {
    let mut pg: DiGraph<Value, ()> = DiGraph::new();
    let nodes: Vec<NodeIndex> = g.values().iter().map(|&v| pg.add_node(v)).collect();
    for u in 0..g.node_count() as u32 {
        for &v in g.neighbors_of(u) {
            pg.add_edge(nodes[u as usize], nodes[v as usize], ());
        }
    }

    let mut bfs = Bfs::new(&pg, nodes[start as usize]);
    let mut count = 0;
    while let Some(n) = bfs.next(&pg) {
        if pg[n] == search {
            count += 1;
        }
    }
    count
}

#[test]
fn dense_graph_agrees_with_petgraph() {
    let g = generate_dense(250, 1234, 6, 10).unwrap();
    for start in [0, 100, 249] {
        let expected = petgraph_count(&g, start, 5);
        assert_eq!(sequential_bfs(&g, start, 5).unwrap(), expected);
        assert_eq!(run_parallel_bfs(&g, start, 5, 4, 2).unwrap(), expected);
    }
}

#[test]
fn sparse_graph_agrees_with_petgraph() {
    let g = generate_sparse(1_000, 1_500, 77, 3).unwrap();
    for search in 1..=3 {
        let expected = petgraph_count(&g, 0, search);
        assert_eq!(run_parallel_bfs(&g, 0, search, 8, 2).unwrap(), expected);
    }
}
