//! A compact CSR (compressed sparse row) graph with per-node values.
//!
//! The layout is three contiguous arrays:
//! - `offsets`: `Vec<usize>` of length `n + 1`
//! - `edges`: all out-neighbors, row after row
//! - `values`: one [`Value`] per node
//!
//! The graph is immutable once built, so it can be shared by reference with
//! any number of traversal threads.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Graph, NodeId, Value};
use crate::error::GraphError;

/// Immutable adjacency-list graph stored in CSR form.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_adjacency` | \(O(n + m)\) | Validates every edge |
/// | `neighbors_of` | \(O(1)\) | Returns a slice of the edge array |
/// | `value_of` | \(O(1)\) | |
/// | `to_dot` | \(O(n + m)\) | |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphDocument", into = "GraphDocument")]
pub struct CsrGraph {
    offsets: Vec<usize>,
    edges: Vec<NodeId>,
    values: Vec<Value>,
}

/// On-disk form: one value and one adjacency list per node.
#[derive(Serialize, Deserialize)]
struct GraphDocument {
    values: Vec<Value>,
    adjacency: Vec<Vec<NodeId>>,
}

impl CsrGraph {
    /// Builds a CSR graph from per-node values and adjacency lists.
    ///
    /// Duplicate neighbors are kept as given.
    ///
    /// # Errors
    /// - [`GraphError::LengthMismatch`] if the two inputs disagree on `n`
    /// - [`GraphError::EdgeOutOfRange`] if any neighbor is `>= n`
    /// - [`GraphError::TooManyNodes`] if `n` does not fit a [`NodeId`]
    pub fn from_adjacency(values: Vec<Value>, adjacency: &[Vec<NodeId>]) -> Result<Self, GraphError> {
        let n = values.len();
        if adjacency.len() != n {
            return Err(GraphError::LengthMismatch {
                values: n,
                adjacency: adjacency.len(),
            });
        }
        if NodeId::try_from(n).is_err() {
            return Err(GraphError::TooManyNodes(n));
        }

        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);
        let mut total_edges = 0usize;
        for nbrs in adjacency {
            total_edges += nbrs.len();
            offsets.push(total_edges);
        }

        let mut edges = Vec::with_capacity(total_edges);
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                if v as usize >= n {
                    return Err(GraphError::EdgeOutOfRange {
                        // `u < n <= NodeId::MAX` was checked above.
                        from: u as NodeId,
                        to: v,
                        node_count: n,
                    });
                }
                edges.push(v);
            }
        }

        Ok(Self {
            offsets,
            edges,
            values,
        })
    }

    /// A graph of `n` nodes, all with `value`, and no edges.
    pub fn isolated(n: usize, value: Value) -> Result<Self, GraphError> {
        Self::from_adjacency(vec![value; n], &vec![Vec::new(); n])
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All node values, indexed by node id.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Renders the graph in Graphviz DOT syntax.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n");
        for u in 0..self.node_count() {
            for &v in self.neighbors_of(u as NodeId) {
                // Writing into a String cannot fail.
                let _ = writeln!(out, "  {u} -> {v};");
            }
        }
        out.push_str("}\n");
        out
    }

    /// Serializes the graph as a JSON adjacency document.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), GraphError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Reads and validates a JSON adjacency document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GraphError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the graph to `path` as JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), GraphError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Loads a graph previously written by [`save_json`](Self::save_json).
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}

impl Graph for CsrGraph {
    #[inline]
    fn node_count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn value_of(&self, node: NodeId) -> Value {
        self.values[node as usize]
    }

    #[inline]
    fn neighbors_of(&self, node: NodeId) -> &[NodeId] {
        let u = node as usize;
        &self.edges[self.offsets[u]..self.offsets[u + 1]]
    }
}

impl TryFrom<GraphDocument> for CsrGraph {
    type Error = GraphError;

    fn try_from(doc: GraphDocument) -> Result<Self, Self::Error> {
        Self::from_adjacency(doc.values, &doc.adjacency)
    }
}

impl From<CsrGraph> for GraphDocument {
    fn from(graph: CsrGraph) -> Self {
        let adjacency = graph
            .offsets
            .windows(2)
            .map(|w| graph.edges[w[0]..w[1]].to_vec())
            .collect();
        Self {
            values: graph.values,
            adjacency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> CsrGraph {
        CsrGraph::from_adjacency(vec![5, 1, 5, 5, 9], &[vec![1, 2], vec![3], vec![3], vec![4], vec![]])
            .unwrap()
    }

    #[test]
    fn rows_follow_input_order() {
        let g = diamond();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 5);
        assert_eq!(g.neighbors_of(0), &[1, 2]);
        assert_eq!(g.neighbors_of(4), &[] as &[NodeId]);
        assert_eq!(g.neighbors_of(3), &[4]);
        assert_eq!(g.value_of(4), 9);
    }

    #[test]
    fn rejects_dangling_edge() {
        let err = CsrGraph::from_adjacency(vec![0, 0], &[vec![1], vec![2]]).unwrap_err();
        assert!(matches!(
            err,
            GraphError::EdgeOutOfRange { from: 1, to: 2, node_count: 2 }
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = CsrGraph::from_adjacency(vec![0], &[vec![], vec![]]).unwrap_err();
        assert!(matches!(err, GraphError::LengthMismatch { values: 1, adjacency: 2 }));
    }

    #[test]
    fn dot_lists_every_edge() {
        let dot = diamond().to_dot();
        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.contains("  0 -> 2;\n"));
        assert!(dot.contains("  3 -> 4;\n"));
        assert_eq!(dot.lines().count(), 7);
    }

    #[test]
    fn json_document_is_adjacency_form() {
        let mut buf = Vec::new();
        diamond().to_writer(&mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["values"], serde_json::json!([5, 1, 5, 5, 9]));
        assert_eq!(json["adjacency"][0], serde_json::json!([1, 2]));

        let back = CsrGraph::from_reader(buf.as_slice()).unwrap();
        assert_eq!(back, diamond());
    }

    #[test]
    fn invalid_document_is_rejected_on_load() {
        let doc = r#"{"values":[1],"adjacency":[[3]]}"#;
        let err = CsrGraph::from_reader(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Json(_)));
    }
}
