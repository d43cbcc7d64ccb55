//! Graph statistics summary.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::Serialize;

use crate::graph::KnowledgeGraph;
use crate::model::{NodeType, Relation};
use crate::schema::Schema;

/// Node counts per type, edge counts per relation, totals and density.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphStats {
    pub n_nodes: IndexMap<NodeType, usize>,
    pub n_edges: IndexMap<Relation, usize>,
    pub total_nodes: usize,
    pub total_edges: usize,
    pub density: f64,
}

impl GraphStats {
    pub fn from_graph(graph: &KnowledgeGraph, schema: &Schema) -> Self {
        let n_nodes = schema
            .node_types()
            .iter()
            .map(|t| (*t, graph.node_count_of(*t)))
            .collect();
        let n_edges = schema
            .relations()
            .iter()
            .map(|r| (*r, graph.edge_count_of(*r)))
            .collect();
        let total_nodes = graph.node_count();
        let total_edges = graph.edge_count();
        Self {
            n_nodes,
            n_edges,
            total_nodes,
            total_edges,
            density: density(total_nodes, total_edges),
        }
    }

    /// Human-readable report.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "── Procurement Knowledge Graph ───────────────────────");
        let _ = writeln!(out, "  Total nodes : {:>5}", self.total_nodes);
        let _ = writeln!(out, "  Total edges : {:>5}", self.total_edges);
        let _ = writeln!(out, "  Density     : {:.6}", self.density);
        let _ = writeln!(out);
        let _ = writeln!(out, "  Nodes by type:");
        for (t, n) in &self.n_nodes {
            let _ = writeln!(out, "    {:<12}: {:>4}", t.as_str(), n);
        }
        let _ = writeln!(out);
        let _ = write!(out, "  Edges by relation:");
        for (r, n) in &self.n_edges {
            let _ = write!(out, "\n    {:<30}: {:>4}", r.as_str(), n);
        }
        out
    }
}

/// `edges / (n * (n - 1))` for `n > 1`, else 0.
pub fn density(total_nodes: usize, total_edges: usize) -> f64 {
    if total_nodes > 1 {
        let n = total_nodes as f64;
        total_edges as f64 / (n * (n - 1.0))
    } else {
        0.0
    }
}
