//! Tensor bundle: feature matrices and edge-index lists for a
//! heterogeneous graph-learning stage.
//!
//! Node tensors are keyed by node type; edge tensors by the
//! (source type, relation, destination type) triple. Edge rows come from
//! the same index maps the GraphML export and `id_maps.json` use, so all
//! three artifacts agree on node identity.

use std::io::Write;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ndarray::Array2;
use serde::Serialize;

use crate::features::FeatureSet;
use crate::graph::KnowledgeGraph;
use crate::model::{NodeType, Relation};
use crate::schema::{EdgeType, Schema};
use crate::Result;

/// Format tag written into every bundle.
pub const BUNDLE_FORMAT: &str = "procure-kg/hetero-tensors/v1";

/// Dense float features of one node type, shape `(num_nodes, feature_dim)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTensor {
    pub x: Array2<f32>,
}

impl NodeTensor {
    pub fn num_nodes(&self) -> usize {
        self.x.nrows()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }
}

/// Edge index of one relation, shape `(2, num_edges)`: row 0 holds source
/// indices, row 1 destination indices.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeTensor {
    pub edge_type: EdgeType,
    pub edge_index: Array2<i64>,
}

impl EdgeTensor {
    pub fn num_edges(&self) -> usize {
        self.edge_index.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.edge_index.dim()
    }

    /// `(src, dst)` pairs in edge order.
    pub fn pairs(&self) -> Vec<(i64, i64)> {
        self.edge_index
            .row(0)
            .iter()
            .zip(self.edge_index.row(1).iter())
            .map(|(s, d)| (*s, *d))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TensorBundle {
    pub nodes: IndexMap<NodeType, NodeTensor>,
    pub edges: IndexMap<EdgeType, EdgeTensor>,
}

impl TensorBundle {
    /// Assemble from the normalized features and the graph's relations.
    ///
    /// A relation contributes only edges whose endpoints both resolve in the
    /// index maps of its declared types; a relation with no such edge is
    /// left out entirely.
    pub fn from_graph(graph: &KnowledgeGraph, features: &FeatureSet, schema: &Schema) -> Self {
        let nodes = features
            .iter()
            .map(|(t, m)| (*t, NodeTensor { x: m.values.clone() }))
            .collect();

        let id_maps = graph.id_maps();
        let mut edges = IndexMap::new();
        for &relation in schema.relations() {
            let edge_type = EdgeType::of(relation);
            let pairs: Vec<(i64, i64)> = graph
                .edges_of(relation)
                .filter_map(|e| {
                    let src = graph.get_node(e.src)?;
                    let dst = graph.get_node(e.dst)?;
                    let s = id_maps.get(edge_type.src, &src.key)?;
                    let d = id_maps.get(edge_type.dst, &dst.key)?;
                    Some((s as i64, d as i64))
                })
                .collect();
            if pairs.is_empty() {
                continue;
            }
            let edge_index = Array2::from_shape_fn((2, pairs.len()), |(row, col)| {
                if row == 0 { pairs[col].0 } else { pairs[col].1 }
            });
            edges.insert(edge_type, EdgeTensor { edge_type, edge_index });
        }

        Self { nodes, edges }
    }

    pub fn node(&self, node_type: NodeType) -> Option<&NodeTensor> {
        self.nodes.get(&node_type)
    }

    pub fn edge_index(&self, relation: Relation) -> Option<&EdgeTensor> {
        self.edges.get(&EdgeType::of(relation))
    }

    pub fn get(&self, src: NodeType, relation: &str, dst: NodeType) -> Option<&EdgeTensor> {
        self.edges
            .values()
            .find(|t| t.edge_type.src == src && t.edge_type.relation == relation && t.edge_type.dst == dst)
    }

    /// Serialize as JSON, stamped with `generated_at`.
    pub fn write_json(&self, writer: &mut dyn Write, generated_at: DateTime<Utc>) -> Result<()> {
        let doc = BundleDoc {
            format: BUNDLE_FORMAT,
            generated_at,
            node_types: self
                .nodes
                .iter()
                .map(|(t, n)| {
                    let doc = NodeDoc {
                        num_nodes: n.num_nodes(),
                        shape: [n.x.nrows(), n.x.ncols()],
                        x: n.x.rows().into_iter().map(|r| r.to_vec()).collect(),
                    };
                    (*t, doc)
                })
                .collect(),
            edge_types: self
                .edges
                .values()
                .map(|e| EdgeDoc {
                    src: e.edge_type.src,
                    relation: e.edge_type.relation,
                    dst: e.edge_type.dst,
                    shape: [e.edge_index.nrows(), e.edge_index.ncols()],
                    edge_index: e.edge_index.rows().into_iter().map(|r| r.to_vec()).collect(),
                })
                .collect(),
        };
        serde_json::to_writer(&mut *writer, &doc)?;
        writer.flush()?;
        Ok(())
    }
}

// ============================================================================
// On-disk layout
// ============================================================================

#[derive(Serialize)]
struct BundleDoc {
    format: &'static str,
    generated_at: DateTime<Utc>,
    node_types: IndexMap<NodeType, NodeDoc>,
    edge_types: Vec<EdgeDoc>,
}

#[derive(Serialize)]
struct NodeDoc {
    num_nodes: usize,
    shape: [usize; 2],
    x: Vec<Vec<f32>>,
}

#[derive(Serialize)]
struct EdgeDoc {
    src: NodeType,
    relation: &'static str,
    dst: NodeType,
    shape: [usize; 2],
    edge_index: Vec<Vec<i64>>,
}
