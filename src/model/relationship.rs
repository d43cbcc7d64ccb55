//! Relations (edge kinds) and edges in the procurement graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::{NodeRef, NodeType, PropertyMap, Value};

/// Opaque edge identifier (position in insertion order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The nine base relations. Each has a fixed (source, destination) signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Supplies,
    LocatedIn,
    Covers,
    SignedWith,
    OriginatesIn,
    DeliversTo,
    Carries,
    CoSupplier,
    TradesWith,
}

impl Relation {
    /// Catalog order.
    pub const ALL: [Relation; 9] = [
        Relation::Supplies,
        Relation::LocatedIn,
        Relation::Covers,
        Relation::SignedWith,
        Relation::OriginatesIn,
        Relation::DeliversTo,
        Relation::Carries,
        Relation::CoSupplier,
        Relation::TradesWith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Supplies => "supplies",
            Relation::LocatedIn => "located_in",
            Relation::Covers => "covers",
            Relation::SignedWith => "signed_with",
            Relation::OriginatesIn => "originates_in",
            Relation::DeliversTo => "delivers_to",
            Relation::Carries => "carries",
            Relation::CoSupplier => "co_supplier",
            Relation::TradesWith => "trades_with",
        }
    }

    /// Name of the synthesized reverse relation, for asymmetric signatures only.
    pub fn reverse_name(&self) -> Option<&'static str> {
        match self {
            Relation::Supplies => Some("rev_supplies"),
            Relation::LocatedIn => Some("rev_located_in"),
            Relation::Covers => Some("rev_covers"),
            Relation::SignedWith => Some("rev_signed_with"),
            Relation::OriginatesIn => Some("rev_originates_in"),
            Relation::DeliversTo => Some("rev_delivers_to"),
            Relation::Carries => Some("rev_carries"),
            Relation::CoSupplier | Relation::TradesWith => None,
        }
    }

    /// (source type, destination type).
    pub fn signature(&self) -> (NodeType, NodeType) {
        use NodeType::*;
        match self {
            Relation::Supplies => (Supplier, Component),
            Relation::LocatedIn => (Supplier, Country),
            Relation::Covers => (Contract, Component),
            Relation::SignedWith => (Contract, Supplier),
            Relation::OriginatesIn => (Route, Country),
            Relation::DeliversTo => (Route, Country),
            Relation::Carries => (Route, Component),
            Relation::CoSupplier => (Supplier, Supplier),
            Relation::TradesWith => (Country, Country),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation-specific edge attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeAttrs {
    Supplies { is_primary: bool, unit_price_usd: f64 },
}

impl EdgeAttrs {
    pub fn properties(&self) -> PropertyMap {
        let mut props = PropertyMap::new();
        match self {
            EdgeAttrs::Supplies { is_primary, unit_price_usd } => {
                props.insert("is_primary".into(), Value::Bool(*is_primary));
                props.insert("unit_price_usd".into(), Value::Float(*unit_price_usd));
            }
        }
        props
    }
}

/// A directed, relation-tagged edge. Attributes live in the graph's side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub relation: Relation,
    pub src: NodeRef,
    pub dst: NodeRef,
}

impl Edge {
    pub fn new(id: EdgeId, relation: Relation, src: NodeRef, dst: NodeRef) -> Self {
        Self { id, relation, src, dst }
    }
}
