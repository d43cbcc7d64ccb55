//! PropertyMap: the flattened attribute bag of a node or edge.

use indexmap::IndexMap;
use super::Value;

/// Attribute names to values, in declaration order.
pub type PropertyMap = IndexMap<String, Value>;
