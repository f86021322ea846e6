//! Row sources - where node and edge rows come from
//!
//! The pipeline never looks up a data source on its own. A `RowSource` is
//! either handed in directly (bound) or resolved from configuration by
//! [`SourceLocator`].

mod csv_workbook;
mod locator;

pub use csv_workbook::{CsvWorkbook, EDGE_SHEET, NODE_SHEET};
pub use locator::SourceLocator;

use crate::error::Result;
use crate::graph::RawRow;

/// Supplier of one snapshot of sheet rows.
///
/// Both methods return data rows only, header excluded, and may return an
/// empty list. Failing to reach the data at all is an error, which is
/// distinct from having no rows.
pub trait RowSource: Send + Sync {
    /// Rows of the Node sheet: (id, label, attribute, status, prompt)
    fn node_rows(&self) -> Result<Vec<RawRow>>;

    /// Rows of the Edge sheet: (source, target)
    fn edge_rows(&self) -> Result<Vec<RawRow>>;

    /// Short description for logs
    fn describe(&self) -> String {
        "row source".to_string()
    }
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    nodes: Vec<RawRow>,
    edges: Vec<RawRow>,
}

impl MemoryRowSource {
    pub fn new(nodes: Vec<RawRow>, edges: Vec<RawRow>) -> Self {
        Self { nodes, edges }
    }
}

impl RowSource for MemoryRowSource {
    fn node_rows(&self) -> Result<Vec<RawRow>> {
        Ok(self.nodes.clone())
    }

    fn edge_rows(&self) -> Result<Vec<RawRow>> {
        Ok(self.edges.clone())
    }

    fn describe(&self) -> String {
        format!(
            "in-memory ({} node rows, {} edge rows)",
            self.nodes.len(),
            self.edges.len()
        )
    }
}
