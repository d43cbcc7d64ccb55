//! # procure-kg: Procurement Knowledge Graph Builder
//!
//! Assembles six procurement tables (suppliers, components, countries,
//! contracts, routes, sourcing links) into a typed heterogeneous
//! multi-relational graph, derives implicit relations, min-max normalizes
//! per-type feature matrices, and exports both an attributed-graph file and
//! a tensor bundle that share one index space.
//!
//! ## Design Principles
//!
//! 1. **Schema as a value**: `Schema` is an immutable table handed to the builder
//! 2. **Typed attributes**: every node type and relation has an explicit record
//! 3. **Row order is index order**: the n-th row of a table becomes index n-1
//! 4. **Tolerant on data, strict on inputs**: bad cells coerce, missing files abort
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use procure_kg::{BuilderConfig, KnowledgeGraphBuilder};
//!
//! # fn example() -> procure_kg::Result<()> {
//! let config = BuilderConfig::default()
//!     .with_data_dir("data/raw/synthetic")
//!     .with_output_dir("data/processed");
//!
//! let mut builder = KnowledgeGraphBuilder::new(config);
//! builder.build()?;
//! println!("{}", builder.stats().summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! | Phase | Module | Output |
//! |-------|--------|--------|
//! | Load | `loader` | six raw tables |
//! | Nodes | `builder::nodes` | typed nodes + index maps |
//! | Edges | `builder::edges` | explicit + derived relations |
//! | Features | `features` | normalized matrices |
//! | Export | `export` | GraphML, tensor bundle, side files |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod schema;
pub mod loader;
pub mod graph;
pub mod builder;
pub mod features;
pub mod stats;
pub mod export;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, NodeAttrs, NodeRef, NodeType,
    Edge, EdgeAttrs, EdgeId, Relation,
    Value, PropertyMap,
};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use schema::{EdgeType, Schema};
pub use loader::{Table, Tables};
pub use graph::{IdMaps, KnowledgeGraph};
pub use builder::KnowledgeGraphBuilder;
pub use features::{FeatureMatrix, FeatureSet};
pub use stats::GraphStats;
pub use export::tensor::{EdgeTensor, NodeTensor, TensorBundle};
pub use config::BuilderConfig;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing {path}. Run: {hint}")]
    MissingInput { path: std::path::PathBuf, hint: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Builder already ran; use a fresh KnowledgeGraphBuilder per build")]
    AlreadyBuilt,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
