//! Builder configuration: where the tables live and where artifacts go.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Directory holding the six `<table>.csv` inputs.
    pub data_dir: PathBuf,
    /// Directory receiving every artifact. Created on export.
    pub output_dir: PathBuf,
    pub graph_file: String,
    pub tensor_file: String,
    pub id_maps_file: String,
    pub stats_file: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/raw/synthetic"),
            output_dir: PathBuf::from("data/processed"),
            graph_file: "procurement_kg.graphml".into(),
            tensor_file: "procurement_kg.tensors.json".into(),
            id_maps_file: "id_maps.json".into(),
            stats_file: "kg_stats.json".into(),
        }
    }
}

impl BuilderConfig {
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Read a JSON config; absent fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("graph_file", &self.graph_file),
            ("tensor_file", &self.tensor_file),
            ("id_maps_file", &self.id_maps_file),
            ("stats_file", &self.stats_file),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn graph_path(&self) -> PathBuf {
        self.output_dir.join(&self.graph_file)
    }

    pub fn tensor_path(&self) -> PathBuf {
        self.output_dir.join(&self.tensor_file)
    }

    pub fn id_maps_path(&self) -> PathBuf {
        self.output_dir.join(&self.id_maps_file)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.output_dir.join(&self.stats_file)
    }
}
