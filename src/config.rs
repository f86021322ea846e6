//! Configuration for the progress graph
//!
//! Loaded from YAML and overlaid with environment variables. The
//! variable names follow the script properties of the spreadsheet the
//! data comes from:
//!
//! - `SPREADSHEET_ID` - data source to open when none is bound
//! - `BACKGROUND_IMAGE_URL` - image shown behind the rendered graph
//! - `PROGRESS_GRAPH_WORKBOOK_ROOT` - directory holding exported workbooks
//! - `PROGRESS_GRAPH_BIND` - listen address of the HTTP host
//!
//! ```yaml
//! data_source_id: roadmap-2024
//! background_image_url: https://example.com/board.png
//! workbook_root: ./workbooks
//! dot:
//!   graph_name: G
//!   graph_attributes:
//!     - [splines, curved]
//!     - [overlap, "false"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::graph::DotOptions;

pub const ENV_DATA_SOURCE_ID: &str = "SPREADSHEET_ID";
pub const ENV_BACKGROUND_IMAGE_URL: &str = "BACKGROUND_IMAGE_URL";
pub const ENV_WORKBOOK_ROOT: &str = "PROGRESS_GRAPH_WORKBOOK_ROOT";
pub const ENV_BIND_ADDR: &str = "PROGRESS_GRAPH_BIND";

/// Configuration values the transformation reads.
///
/// Lookups never fail; unset values come back empty.
pub trait ConfigStore: Send + Sync {
    /// Image URL passed through to the front end
    fn background_image_url(&self) -> String {
        String::new()
    }

    /// Identifier of the data source to open when none is bound
    fn data_source_id(&self) -> String {
        String::new()
    }

    /// Graph-level DOT settings
    fn dot_options(&self) -> DotOptions {
        DotOptions::default()
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub data_source_id: String,
    pub background_image_url: String,
    /// Directory under which `data_source_id` names a workbook directory
    pub workbook_root: PathBuf,
    /// HTML front end served at `/` by the HTTP host
    pub static_dir: Option<PathBuf>,
    pub bind_addr: String,
    pub dot: DotOptions,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            data_source_id: String::new(),
            background_image_url: String::new(),
            workbook_root: PathBuf::from("workbooks"),
            static_dir: None,
            bind_addr: "127.0.0.1:8080".to_string(),
            dot: DotOptions::default(),
        }
    }
}

impl GraphConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: GraphConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`. Empty values are ignored.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(id) = get(ENV_DATA_SOURCE_ID) {
            self.data_source_id = id;
        }
        if let Some(url) = get(ENV_BACKGROUND_IMAGE_URL) {
            self.background_image_url = url;
        }
        if let Some(root) = get(ENV_WORKBOOK_ROOT) {
            self.workbook_root = PathBuf::from(root);
        }
        if let Some(addr) = get(ENV_BIND_ADDR) {
            self.bind_addr = addr;
        }
        self
    }
}

impl ConfigStore for GraphConfig {
    fn background_image_url(&self) -> String {
        self.background_image_url.clone()
    }

    fn data_source_id(&self) -> String {
        self.data_source_id.clone()
    }

    fn dot_options(&self) -> DotOptions {
        self.dot.clone()
    }
}
