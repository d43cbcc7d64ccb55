//! # Feature Normalizer
//!
//! Builds one dense matrix per node type from the declared feature list and
//! min-max scales every column independently into `[0, 1]`.
//!
//! This is a full-batch pass: it needs every node of a type, so it runs
//! strictly after node materialization. The matrices are derived views owned
//! apart from the graph so export never has to walk the graph again.

use indexmap::IndexMap;
use ndarray::Array2;
use tracing::info;

use crate::graph::KnowledgeGraph;
use crate::model::NodeType;
use crate::schema::Schema;

/// Normalized features of one node type. Row `i` is the node with index `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub node_type: NodeType,
    pub names: &'static [&'static str],
    pub values: Array2<f32>,
}

impl FeatureMatrix {
    /// (node count, feature width)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// One column by feature name.
    pub fn column(&self, name: &str) -> Option<Vec<f32>> {
        let j = self.names.iter().position(|n| *n == name)?;
        Some(self.values.column(j).to_vec())
    }
}

/// Feature matrices keyed by node type, in schema order.
pub type FeatureSet = IndexMap<NodeType, FeatureMatrix>;

/// Build the normalized matrix of every node type that has nodes and a
/// non-empty feature list.
pub fn build_feature_matrices(graph: &KnowledgeGraph, schema: &Schema) -> FeatureSet {
    let mut out = FeatureSet::new();
    for &node_type in schema.node_types() {
        let names = schema.feature_names(node_type);
        let nodes = graph.nodes_of(node_type);
        if names.is_empty() || nodes.is_empty() {
            continue;
        }

        let rows: Vec<Vec<f64>> = nodes.iter().map(|n| n.attrs.features()).collect();
        let raw = Array2::from_shape_fn((rows.len(), names.len()), |(i, j)| {
            rows[i].get(j).copied().unwrap_or(0.0)
        });
        let values = min_max_normalize(&raw);

        info!("  Feature [{:<12}]: {:?}", node_type.as_str(), values.dim());
        out.insert(node_type, FeatureMatrix { node_type, names, values });
    }
    out
}

/// Column-wise `(x - min) / (max - min)`. A constant column uses a
/// denominator of 1.0 and so normalizes to all zeros. Non-finite inputs
/// count as 0.0.
pub fn min_max_normalize(raw: &Array2<f64>) -> Array2<f32> {
    let raw = raw.mapv(sanitize);
    let (rows, cols) = raw.dim();
    if rows == 0 {
        return Array2::zeros((0, cols));
    }

    // Per column: (scaled min, pre-scale factor, scaled range)
    let mut scales = Vec::with_capacity(cols);
    for column in raw.columns() {
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // Halve both ends when max - min overflows
        let factor = if (max - min).is_finite() { 1.0 } else { 0.5 };
        let range = max * factor - min * factor;
        scales.push((min * factor, factor, if range == 0.0 { 1.0 } else { range }));
    }

    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let (low, factor, range) = scales[j];
        (((raw[[i, j]] * factor - low) / range).clamp(0.0, 1.0)) as f32
    })
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
