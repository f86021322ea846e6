//! Resolve which row source a request reads from.
//!
//! Precedence:
//! 1. a source bound by the host (e.g. a workbook given on the command line)
//! 2. the configured data-source id, opened under `workbook_root`; the id
//!    must be a single directory name
//! 3. otherwise `GraphError::NoRowSource`

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::{CsvWorkbook, RowSource};
use crate::config::ConfigStore;
use crate::error::{GraphError, Result};

#[derive(Debug, Clone)]
pub struct SourceLocator {
    workbook_root: PathBuf,
}

impl SourceLocator {
    pub fn new(workbook_root: impl Into<PathBuf>) -> Self {
        Self {
            workbook_root: workbook_root.into(),
        }
    }

    pub fn resolve(
        &self,
        bound: Option<Arc<dyn RowSource>>,
        config: &dyn ConfigStore,
    ) -> Result<Arc<dyn RowSource>> {
        if let Some(source) = bound {
            tracing::debug!(source = %source.describe(), "Using bound row source");
            return Ok(source);
        }

        let id = config.data_source_id();
        let id = id.trim();
        if id.is_empty() {
            return Err(GraphError::NoRowSource);
        }

        if !is_single_name(id) {
            return Err(GraphError::InvalidDataSourceId { id: id.to_string() });
        }

        let path = self.workbook_root.join(id);
        if !path.is_dir() {
            return Err(GraphError::DataSourceNotFound {
                id: id.to_string(),
                path,
            });
        }

        tracing::debug!(data_source_id = %id, path = %path.display(), "Opening configured workbook");
        Ok(Arc::new(CsvWorkbook::open(path)))
    }
}

/// True when `id` names one entry directly under the root: no separators,
/// no `.`/`..`, no drive or root prefix.
fn is_single_name(id: &str) -> bool {
    if id.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
