use crate::error::{CliError, Result};
use sasmod::engine::config::QSpacing;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileQRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub points: Option<usize>,
    pub spacing: Option<QSpacing>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub scale: Option<f64>,
    pub background: Option<f64>,
    pub qy: Option<f64>,
    pub q_file: Option<PathBuf>,
    pub q_range: Option<FileQRange>,
    pub parameters: Option<BTreeMap<String, f64>>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
