//! # Export
//!
//! Writes every artifact of a build into the output directory:
//!
//! | Artifact | Writer | Content |
//! |----------|--------|---------|
//! | `procurement_kg.graphml` | [`graphml::write_graphml`] | all nodes and edges with attributes |
//! | `procurement_kg.tensors.json` | [`tensor::TensorBundle::write_json`] | feature tensors + edge indices |
//! | `id_maps.json` | [`write_id_maps`] | natural key → index, per type |
//! | `kg_stats.json` | [`write_stats`] | counts, totals, density |
//!
//! The tensor bundle is optional: when it was not assembled the export
//! logs a warning and writes everything else.

pub mod graphml;
pub mod tensor;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::BuilderConfig;
use crate::graph::{IdMaps, KnowledgeGraph};
use crate::stats::GraphStats;
use crate::Result;

use self::tensor::TensorBundle;

/// Write the GraphML file, the tensor bundle (if any), and both side files.
/// Returns the paths written, in write order.
pub fn export_all(
    config: &BuilderConfig,
    graph: &KnowledgeGraph,
    bundle: Option<&TensorBundle>,
    stats: &GraphStats,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_dir)?;
    let mut written = Vec::new();

    let path = config.graph_path();
    let mut w = BufWriter::new(File::create(&path)?);
    graphml::write_graphml(graph, &mut w)?;
    w.flush()?;
    info!("  -> {}", path.display());
    written.push(path);

    match bundle {
        Some(bundle) => {
            let path = config.tensor_path();
            let mut w = BufWriter::new(File::create(&path)?);
            bundle.write_json(&mut w, Utc::now())?;
            info!("  -> {}", path.display());
            written.push(path);
        }
        None => warn!("Tensor bundle unavailable, skipping tensor export"),
    }

    let path = config.id_maps_path();
    write_id_maps(graph.id_maps(), &mut BufWriter::new(File::create(&path)?))?;
    info!("  -> {}", path.display());
    written.push(path);

    let path = config.stats_path();
    write_stats(stats, &mut BufWriter::new(File::create(&path)?))?;
    info!("  -> {}", path.display());
    written.push(path);

    Ok(written)
}

/// `{ node_type: { key: index } }`, pretty-printed.
pub fn write_id_maps(maps: &IdMaps, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, maps)?;
    writer.flush()?;
    Ok(())
}

/// The flat statistics record, pretty-printed.
pub fn write_stats(stats: &GraphStats, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, stats)?;
    writer.flush()?;
    Ok(())
}
