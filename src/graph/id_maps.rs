//! Per-type natural-key → dense-index maps.

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::model::NodeType;

/// Index maps for every node type, plus the internal country-name map.
///
/// Built during node materialization and never mutated afterwards. Entries
/// keep insertion order, which is index order.
#[derive(Debug, Clone, Default)]
pub struct IdMaps {
    by_type: IndexMap<NodeType, IndexMap<String, usize>>,
    /// country display name → country key. Internal; never exported.
    country_by_name: HashMap<String, String>,
}

impl IdMaps {
    pub fn get(&self, node_type: NodeType, key: &str) -> Option<usize> {
        self.by_type.get(&node_type)?.get(key).copied()
    }

    pub(crate) fn insert(&mut self, node_type: NodeType, key: &str, index: usize) {
        self.by_type.entry(node_type).or_default().insert(key.to_string(), index);
    }

    /// The map of one node type; `None` if no node of that type exists.
    pub fn of(&self, node_type: NodeType) -> Option<&IndexMap<String, usize>> {
        self.by_type.get(&node_type)
    }

    pub fn len_of(&self, node_type: NodeType) -> usize {
        self.of(node_type).map(IndexMap::len).unwrap_or(0)
    }

    pub fn node_types(&self) -> impl Iterator<Item = NodeType> + '_ {
        self.by_type.keys().copied()
    }

    pub(crate) fn record_country_name(&mut self, name: &str, key: &str) {
        self.country_by_name.insert(name.to_string(), key.to_string());
    }

    pub fn country_key_by_name(&self, name: &str) -> Option<&str> {
        self.country_by_name.get(name).map(String::as_str)
    }
}

/// Serializes as `{ node_type: { key: index } }`, leaving out internal maps.
impl Serialize for IdMaps {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.by_type.serialize(serializer)
    }
}

impl PartialEq for IdMaps {
    fn eq(&self, other: &Self) -> bool {
        self.by_type == other.by_type
    }
}
