//! Progress Graph - sheet rows to Graphviz DOT
//!
//! Reads a Node sheet and an Edge sheet, and produces everything a browser
//! front end needs to draw and explore the graph:
//!
//! - DOT text for the renderer, one statement per node and per edge
//! - node details (status color and label, prompt text)
//! - edge details keyed by a stable edge handle
//! - an adjacency index for client-side traversal
//!
//! ## Quick Start
//!
//! ```
//! use progress_graph::{compute_graph, GraphConfig};
//!
//! let nodes = vec![
//!     vec!["A".to_string(), "Start".to_string(), String::new(), "ToDo".to_string()],
//!     vec!["B".to_string(), "End".to_string(), String::new(), "Done".to_string()],
//! ];
//! let edges = vec![vec!["A".to_string(), "B".to_string()]];
//!
//! let response = compute_graph(&nodes, &edges, &GraphConfig::default());
//! assert!(response.graph_text.contains(r#""A" -> "B" [id="A_B"];"#));
//! assert_eq!(response.adjacency.get("A").unwrap(), ["B"]);
//! ```

// Core error handling
pub mod error;

// Configuration and the ConfigStore seam
pub mod config;

// Transformation pipeline
pub mod graph;

// Row sources (bound, in-memory, CSV workbook) and resolution
pub mod source;

// HTTP host
#[cfg(feature = "server")]
pub mod api;

pub use config::{ConfigStore, GraphConfig};
pub use error::{GraphError, Result};
pub use graph::{compute_graph, load_graph, DotOptions, RawRow};
pub use source::{CsvWorkbook, MemoryRowSource, RowSource, SourceLocator};

pub use progress_graph_types::{
    AdjacencyIndex, EdgeDetail, EdgeRecord, GraphResponse, NodeDetail, NodeRecord, NodeStatus,
    RawAttributes,
};
