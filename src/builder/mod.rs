//! # Knowledge Graph Builder
//!
//! One `build()` runs the whole batch pipeline, strictly in order:
//!
//! ```text
//! load tables → nodes → edges → feature matrices → tensor bundle → export
//! ```
//!
//! The builder owns its graph, index maps and features exclusively. It is
//! single-use: a second `build()` on the same instance is refused, because
//! re-running would accumulate nodes and edges into the live graph.

pub mod edges;
pub mod nodes;

use tracing::info;

use crate::config::BuilderConfig;
use crate::export::{self, tensor::TensorBundle};
use crate::features::{build_feature_matrices, FeatureSet};
use crate::graph::{IdMaps, KnowledgeGraph};
use crate::loader::Tables;
use crate::schema::Schema;
use crate::stats::GraphStats;
use crate::{Error, Result};

pub use edges::EdgeReport;

/// Builds the procurement knowledge graph from the six input tables.
pub struct KnowledgeGraphBuilder {
    config: BuilderConfig,
    schema: Schema,
    graph: KnowledgeGraph,
    features: FeatureSet,
    tensor_bundle: Option<TensorBundle>,
    edge_report: EdgeReport,
    built: bool,
}

impl KnowledgeGraphBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self::with_schema(config, Schema::procurement())
    }

    pub fn with_schema(config: BuilderConfig, schema: Schema) -> Self {
        Self {
            config,
            schema,
            graph: KnowledgeGraph::new(),
            features: FeatureSet::new(),
            tensor_bundle: None,
            edge_report: EdgeReport::default(),
            built: false,
        }
    }

    /// Load, materialize, normalize and export.
    pub fn build(&mut self) -> Result<&Self> {
        self.config.validate()?;
        self.build_in_memory()?;
        let stats = self.stats();
        export::export_all(&self.config, &self.graph, self.tensor_bundle.as_ref(), &stats)?;
        info!(
            "Build complete: {} nodes | {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        info!("\n{}", stats.summary());
        Ok(&*self)
    }

    /// Everything except export: load the tables from `data_dir` and build
    /// the graph, features and tensor bundle in memory.
    pub fn build_in_memory(&mut self) -> Result<&mut Self> {
        if self.built {
            return Err(Error::AlreadyBuilt);
        }
        let tables = Tables::load(&self.config.data_dir)?;
        self.build_from_tables(&tables)
    }

    /// Build from tables already in memory.
    pub fn build_from_tables(&mut self, tables: &Tables) -> Result<&mut Self> {
        if self.built {
            return Err(Error::AlreadyBuilt);
        }
        self.built = true;

        nodes::materialize_nodes(&mut self.graph, tables, &self.schema);
        self.edge_report = edges::materialize_edges(&mut self.graph, tables);
        self.features = build_feature_matrices(&self.graph, &self.schema);
        self.tensor_bundle = self.assemble_tensor_bundle();
        Ok(self)
    }

    #[cfg(feature = "tensor-bundle")]
    fn assemble_tensor_bundle(&self) -> Option<TensorBundle> {
        Some(TensorBundle::from_graph(&self.graph, &self.features, &self.schema))
    }

    #[cfg(not(feature = "tensor-bundle"))]
    fn assemble_tensor_bundle(&self) -> Option<TensorBundle> {
        tracing::warn!("tensor-bundle feature disabled, skipping tensor assembly");
        None
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    pub fn id_maps(&self) -> &IdMaps {
        self.graph.id_maps()
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn tensor_bundle(&self) -> Option<&TensorBundle> {
        self.tensor_bundle.as_ref()
    }

    /// Added/dropped edge counts from the edge phase.
    pub fn edge_report(&self) -> &EdgeReport {
        &self.edge_report
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats::from_graph(&self.graph, &self.schema)
    }
}
