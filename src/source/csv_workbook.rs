//! Workbook exported as one CSV file per sheet.
//!
//! ```text
//! <workbook>/
//! ├── Node.csv   id,label,attribute,status,prompt
//! └── Edge.csv   source,target
//! ```
//!
//! The first record of each file is the header row and is skipped. Rows
//! may be shorter or longer than the header.

use std::path::{Path, PathBuf};

use super::RowSource;
use crate::error::{GraphError, Result};
use crate::graph::RawRow;

pub const NODE_SHEET: &str = "Node";
pub const EDGE_SHEET: &str = "Edge";

#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    /// Open a workbook directory. Sheets are read lazily on each call.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet))
    }

    fn read_sheet(&self, sheet: &str) -> Result<Vec<RawRow>> {
        let path = self.sheet_path(sheet);
        if !path.is_file() {
            return Err(GraphError::MissingSheet {
                sheet: sheet.to_string(),
                path,
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(sheet, path = %path.display(), rows = rows.len(), "Read sheet");
        Ok(rows)
    }
}

impl RowSource for CsvWorkbook {
    fn node_rows(&self) -> Result<Vec<RawRow>> {
        self.read_sheet(NODE_SHEET)
    }

    fn edge_rows(&self) -> Result<Vec<RawRow>> {
        self.read_sheet(EDGE_SHEET)
    }

    fn describe(&self) -> String {
        format!("csv workbook {}", self.dir.display())
    }
}
