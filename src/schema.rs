//! # Schema Registry
//!
//! Node types, the relation catalog, per-type feature field lists, and the
//! criticality ordinal mapping. A `Schema` is an immutable value handed to
//! the builder; nothing here is global state.

use std::fmt;

use crate::model::{NodeAttrs, NodeType, Relation};

/// A (source type, relation, destination type) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeType {
    pub src: NodeType,
    pub relation: &'static str,
    pub dst: NodeType,
}

impl EdgeType {
    /// The declared triple of a base relation.
    pub fn of(relation: Relation) -> Self {
        let (src, dst) = relation.signature();
        Self { src, relation: relation.as_str(), dst }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.src, self.relation, self.dst)
    }
}

/// Immutable registry of everything the builder needs to know about shape.
#[derive(Debug, Clone)]
pub struct Schema {
    node_types: Vec<NodeType>,
    relations: Vec<Relation>,
    criticality: Vec<(&'static str, u8)>,
}

impl Schema {
    /// The procurement schema: five node types, nine base relations,
    /// criticality {Low:0, Medium:1, High:2, Critical:3}.
    pub fn procurement() -> Self {
        Self {
            node_types: NodeType::ALL.to_vec(),
            relations: Relation::ALL.to_vec(),
            criticality: vec![("Low", 0), ("Medium", 1), ("High", 2), ("Critical", 3)],
        }
    }

    pub fn node_types(&self) -> &[NodeType] {
        &self.node_types
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn feature_names(&self, node_type: NodeType) -> &'static [&'static str] {
        NodeAttrs::feature_names(node_type)
    }

    /// The base triples, in catalog order.
    pub fn edge_types(&self) -> Vec<EdgeType> {
        self.relations.iter().map(|r| EdgeType::of(*r)).collect()
    }

    /// Base triples followed by `rev_*` triples for every asymmetric relation.
    /// Reverse triples are declared for downstream consumers only; the
    /// builder never materializes them.
    pub fn all_edge_types(&self) -> Vec<EdgeType> {
        let mut out = self.edge_types();
        for rel in &self.relations {
            if let Some(name) = rel.reverse_name() {
                let (src, dst) = rel.signature();
                out.push(EdgeType { src: dst, relation: name, dst: src });
            }
        }
        out
    }

    /// Ordinal of a criticality label. Unknown labels map to 0.
    pub fn encode_criticality(&self, label: &str) -> u8 {
        self.criticality
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, ord)| *ord)
            .unwrap_or(0)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::procurement()
    }
}
