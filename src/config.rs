//! Runtime configuration for the `axis_report` tool.
//!
//! ```json
//! {
//!   "input_path": "responses/scalp_001.json",
//!   "output": { "json_out": "out/scalp_001_report.json", "format": "both" },
//!   "params": { "confidence_threshold": 0.4, "bbox_fallback": false }
//! }
//! ```

use crate::error::{Error, Result};
use crate::pipeline::AnalysisParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(&self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
    pub format: OutputFormat,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: AnalysisParams,
}

/// Load and validate a config file. Relative paths are taken as given.
pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: RuntimeConfig = serde_json::from_str(&contents).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.params.validate()?;
    Ok(config)
}
