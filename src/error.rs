//! Error types for the progress graph pipeline
//!
//! Only failures that stop a whole request live here. Malformed rows and
//! dangling edges are recovered inside the pipeline and never surface.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for loading and rendering a graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Neither a bound row source nor a data-source id is available
    #[error(
        "No usable data source: bind a workbook or set SPREADSHEET_ID (data_source_id) in the configuration"
    )]
    NoRowSource,

    /// The data-source id is not a plain directory name
    #[error("Invalid data source id '{id}': expected a single directory name")]
    InvalidDataSourceId { id: String },

    /// A data-source id is configured but names nothing on disk
    #[error("Data source '{id}' not found at {}", path.display())]
    DataSourceNotFound { id: String, path: PathBuf },

    /// The data source exists but lacks one of the required sheets
    #[error("Sheet '{sheet}' not found at {}", path.display())]
    MissingSheet { sheet: String, path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoRowSource => "NO_ROW_SOURCE",
            Self::InvalidDataSourceId { .. } => "INVALID_DATA_SOURCE_ID",
            Self::DataSourceNotFound { .. } => "DATA_SOURCE_NOT_FOUND",
            Self::MissingSheet { .. } => "MISSING_SHEET",
            Self::Csv(_) => "CSV",
            Self::Io(_) => "IO",
            Self::Yaml(_) => "CONFIG",
            Self::Serialization(_) => "SERIALIZATION",
        }
    }

    /// Configuration errors are the ones an operator has to fix before any
    /// request can succeed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoRowSource
                | Self::InvalidDataSourceId { .. }
                | Self::DataSourceNotFound { .. }
                | Self::MissingSheet { .. }
                | Self::Yaml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
