//! Engine configuration.
//!
//! Settings live in a `framedex.toml` file inside the data directory and
//! are written out with defaults on first open, so a deployment can be
//! tuned by editing the file in place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "framedex.toml";

const DEFAULT_BATCH_SIZE: usize = 32;
const DEFAULT_OVERFETCH_FACTOR: usize = 10;

/// Tunable settings for an engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding the catalog, index snapshot, and config file.
    #[serde(skip)]
    data_dir: PathBuf,

    /// Number of frames embedded and committed per ingestion batch.
    pub batch_size: usize,

    /// Search examines `top_k * overfetch_factor` candidates before
    /// temporal deduplication trims them down to `top_k`.
    pub overfetch_factor: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            overfetch_factor: DEFAULT_OVERFETCH_FACTOR,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with default settings rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// The directory holding all engine state.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the metadata catalog database.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("catalog.db")
    }

    /// Path of the vector index snapshot.
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("frames.index")
    }

    /// Path of the configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    /// Renders the default configuration as a commented TOML template.
    pub fn default_toml() -> String {
        format!(
            "\
# framedex engine configuration.

# Number of frames embedded and committed per batch during ingestion.
batch_size = {DEFAULT_BATCH_SIZE}

# Search examines top_k * overfetch_factor candidates before temporal
# deduplication trims them down to top_k.
overfetch_factor = {DEFAULT_OVERFETCH_FACTOR}
"
        )
    }

    /// Parses a configuration file, rooting it at `data_dir`.
    pub fn from_file(path: &Path, data_dir: impl Into<PathBuf>) -> EngineResult<Self> {
        let raw = fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&raw).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.data_dir = data_dir.into();
        config.validate()?;
        Ok(config)
    }

    /// Writes the default template to `path` unless a file already exists.
    pub fn write_default_if_missing(path: &Path) -> EngineResult<()> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, Self::default_toml())?;
        debug!(target: "framedex::config", path = %path.display(), "wrote default config");
        Ok(())
    }

    /// Loads the configuration under `data_dir`, creating it on first use.
    pub fn load_or_init(data_dir: impl Into<PathBuf>) -> EngineResult<Self> {
        let data_dir = data_dir.into();
        let path = data_dir.join(CONFIG_FILE_NAME);
        Self::write_default_if_missing(&path)?;
        Self::from_file(&path, data_dir)
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.batch_size < 1 {
            return Err(EngineError::InvalidConfig(
                "batch_size must be at least 1".into(),
            ));
        }
        if self.overfetch_factor < 1 {
            return Err(EngineError::InvalidConfig(
                "overfetch_factor must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
