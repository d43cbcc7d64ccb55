//! # Procurement Graph Model
//!
//! Typed DTOs for the heterogeneous graph: node types, per-type attribute
//! records, relations and their edge attributes, and the primitive `Value`
//! used when attributes are flattened for export.
//!
//! Design rule: no tables, no files, no builder state here.
//! This module is pure data: no I/O, no logging.

pub mod node;
pub mod relationship;
pub mod value;
pub mod property_map;

pub use node::{
    Node, NodeAttrs, NodeRef, NodeType,
    SupplierAttrs, ComponentAttrs, CountryAttrs, ContractAttrs, RouteAttrs,
};
pub use relationship::{Edge, EdgeAttrs, EdgeId, Relation};
pub use value::Value;
pub use property_map::PropertyMap;
