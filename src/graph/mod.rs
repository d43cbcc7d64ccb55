//! # Knowledge Graph Store
//!
//! In-memory multi-relational directed graph with typed nodes.
//!
//! ## Layout
//!
//! - **Nodes**: one `Vec<Node>` per node type; position == dense index.
//! - **Index maps**: natural key → index, per type (see [`IdMaps`]).
//! - **Edges**: append-only `Vec<Edge>`; `EdgeId` is the position.
//! - **Adjacency**: `(relation, src index, dst index)` → edge ids, so parallel
//!   edges of one relation between the same pair are kept (multigraph).
//! - **Edge attributes**: side table keyed by `EdgeId`, only for relations
//!   that carry attributes.
//!
//! The store is single-owner and single-threaded; it is built once per
//! build run and never mutated afterwards.

mod id_maps;

pub use id_maps::IdMaps;

use hashbrown::HashMap;

use crate::model::*;

/// Adjacency key. The relation fixes both endpoint types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub relation: Relation,
    pub src: usize,
    pub dst: usize,
}

/// In-memory procurement knowledge graph.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    nodes: HashMap<NodeType, Vec<Node>>,
    id_maps: IdMaps,
    edges: Vec<Edge>,
    edge_attrs: HashMap<EdgeId, EdgeAttrs>,
    adjacency: HashMap<EdgeKey, Vec<EdgeId>>,
    by_relation: HashMap<Relation, Vec<EdgeId>>,
    outgoing: HashMap<NodeRef, Vec<EdgeId>>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Node CRUD
    // ========================================================================

    /// Insert a node, or overwrite the label and attributes of an existing
    /// node with the same natural key. The index of an existing key never
    /// changes, so indices stay a dense `[0, count)` range.
    pub fn upsert_node(&mut self, key: &str, label: impl Into<String>, attrs: NodeAttrs) -> NodeRef {
        let node_type = attrs.node_type();
        let nodes = self.nodes.entry(node_type).or_default();

        if let Some(index) = self.id_maps.get(node_type, key) {
            let node = &mut nodes[index];
            node.label = label.into();
            node.attrs = attrs;
            return NodeRef::new(node_type, index);
        }

        let index = nodes.len();
        nodes.push(Node { key: key.to_string(), index, label: label.into(), attrs });
        self.id_maps.insert(node_type, key, index);
        NodeRef::new(node_type, index)
    }

    pub fn get_node(&self, node: NodeRef) -> Option<&Node> {
        self.nodes.get(&node.node_type)?.get(node.index)
    }

    /// Resolve a natural key within one node type.
    pub fn resolve(&self, node_type: NodeType, key: &str) -> Option<NodeRef> {
        self.id_maps.get(node_type, key).map(|index| NodeRef::new(node_type, index))
    }

    pub fn node_by_key(&self, node_type: NodeType, key: &str) -> Option<&Node> {
        self.resolve(node_type, key).and_then(|r| self.get_node(r))
    }

    /// Nodes of one type, in index order.
    pub fn nodes_of(&self, node_type: NodeType) -> &[Node] {
        self.nodes.get(&node_type).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All nodes, grouped by type in materialization order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        NodeType::ALL.into_iter().flat_map(move |t| self.nodes_of(t).iter())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.values().map(Vec::len).sum()
    }

    pub fn node_count_of(&self, node_type: NodeType) -> usize {
        self.nodes_of(node_type).len()
    }

    pub fn id_maps(&self) -> &IdMaps {
        &self.id_maps
    }

    /// Remember which country key a country name refers to.
    pub fn record_country_name(&mut self, name: &str, key: &str) {
        self.id_maps.record_country_name(name, key);
    }

    /// Resolve a country by its display name.
    pub fn resolve_country_name(&self, name: &str) -> Option<NodeRef> {
        let key = self.id_maps.country_key_by_name(name)?;
        self.resolve(NodeType::Country, key)
    }

    // ========================================================================
    // Edge CRUD
    // ========================================================================

    /// Append a directed edge. Endpoints must already exist and match the
    /// relation's signature; otherwise nothing is added and `None` is returned.
    pub fn add_edge(
        &mut self,
        relation: Relation,
        src: NodeRef,
        dst: NodeRef,
        attrs: Option<EdgeAttrs>,
    ) -> Option<EdgeId> {
        let (src_type, dst_type) = relation.signature();
        if src.node_type != src_type || dst.node_type != dst_type {
            return None;
        }
        if self.get_node(src).is_none() || self.get_node(dst).is_none() {
            return None;
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(id, relation, src, dst));
        if let Some(attrs) = attrs {
            self.edge_attrs.insert(id, attrs);
        }
        self.adjacency
            .entry(EdgeKey { relation, src: src.index, dst: dst.index })
            .or_default()
            .push(id);
        self.by_relation.entry(relation).or_default().push(id);
        self.outgoing.entry(src).or_default().push(id);
        Some(id)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    pub fn edge_attrs(&self, id: EdgeId) -> Option<&EdgeAttrs> {
        self.edge_attrs.get(&id)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges of one relation, in insertion order.
    pub fn edges_of(&self, relation: Relation) -> impl Iterator<Item = &Edge> + '_ {
        self.by_relation
            .get(&relation)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.get_edge(*id))
    }

    /// Parallel edges of one relation between a specific ordered pair.
    pub fn edges_between(&self, relation: Relation, src: usize, dst: usize) -> &[EdgeId] {
        self.adjacency
            .get(&EdgeKey { relation, src, dst })
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_edge(&self, relation: Relation, src: NodeRef, dst: NodeRef) -> bool {
        let (src_type, dst_type) = relation.signature();
        src.node_type == src_type
            && dst.node_type == dst_type
            && !self.edges_between(relation, src.index, dst.index).is_empty()
    }

    /// Outgoing edges of a node, optionally filtered by relation.
    pub fn outgoing(&self, node: NodeRef, relation: Option<Relation>) -> Vec<&Edge> {
        self.outgoing
            .get(&node)
            .into_iter()
            .flatten()
            .filter_map(|id| self.get_edge(*id))
            .filter(|e| relation.is_none_or(|r| e.relation == r))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count_of(&self, relation: Relation) -> usize {
        self.by_relation.get(&relation).map(Vec::len).unwrap_or(0)
    }
}
