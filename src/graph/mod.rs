//! Sheet rows -> DOT text + front-end payload
//!
//! ```text
//! RowSource ──► parser ──┬──► status ──► dot ───────┐
//!                        ├──► adjacency ────────────┼──► assemble ──► GraphResponse
//!                        └──► (node/edge details) ──┘
//! ```
//!
//! Every step is a pure function of its input; the same rows always give
//! the same output.

pub mod adjacency;
pub mod assemble;
pub mod dot;
pub mod parser;
pub mod status;

pub use adjacency::build_adjacency;
pub use assemble::{assemble, compute_graph, edge_detail, load_graph, node_detail};
pub use dot::{edge_handle, escape, quote_id, render_dot, DotBuilder, DotOptions};
pub use parser::{
    default_prompt, parse_edge_row, parse_edge_rows, parse_node_row, parse_node_rows, RawRow,
};
pub use status::{resolve_cell, resolve_status, ResolvedStatus};
