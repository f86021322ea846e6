//! Graph serializer - renders records as Graphviz DOT.
//!
//! Output is assembled by [`DotBuilder`], an ordered list of statements
//! joined once at the end:
//!
//! ```text
//! digraph G {
//!   graph [overlap=false];
//!   "A" [label="Start", style=filled, fillcolor="lightgray"];
//!   "B" [label="End", style=filled, fillcolor="lightgreen"];
//!   "A" -> "B" [id="A_B"];
//! }
//! ```
//!
//! Every identifier goes through [`quote_id`], in node and edge statements
//! alike, so a node id always maps to the same DOT token.

use progress_graph_types::{EdgeRecord, NodeRecord, RawAttributes};
use serde::{Deserialize, Serialize};

use super::status::resolve_status;

const INDENT: &str = "  ";

/// Graph-level settings written before the first node statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotOptions {
    /// Name after `digraph`
    #[serde(default = "default_graph_name")]
    pub graph_name: String,
    /// `graph [key=value]` statements, in order. Keys and values are
    /// quoted unless they are plain identifiers.
    #[serde(default = "default_graph_attributes")]
    pub graph_attributes: Vec<(String, String)>,
}

fn default_graph_name() -> String {
    "G".to_string()
}

fn default_graph_attributes() -> Vec<(String, String)> {
    vec![("overlap".to_string(), "false".to_string())]
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            graph_name: default_graph_name(),
            graph_attributes: default_graph_attributes(),
        }
    }
}

/// Escape text for use inside a double-quoted DOT string.
///
/// Distinct inputs always give distinct output, also as read back by the
/// Graphviz lexer (which keeps `\\`, `\n` and `\r` as two characters and
/// only folds `\"`). Other control characters are copied as-is.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Quote an identifier as a DOT string literal.
pub fn quote_id(id: &str) -> String {
    format!("\"{}\"", escape(id))
}

/// DOT keywords, matched case-insensitively by Graphviz.
const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

fn is_plain_id(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(name))
}

/// Bare identifier when that is unambiguous, quoted string otherwise.
fn dot_id(name: &str) -> String {
    if is_plain_id(name) {
        name.to_string()
    } else {
        quote_id(name)
    }
}

/// Stable handle for a rendered edge, also used as its DOT `id`.
///
/// `%` and `_` inside either endpoint are percent-encoded before joining
/// with `_`, so distinct (source, target) pairs never share a handle.
pub fn edge_handle(source: &str, target: &str) -> String {
    fn encode(part: &str) -> String {
        part.replace('%', "%25").replace('_', "%5F")
    }
    format!("{}_{}", encode(source), encode(target))
}

/// Ordered statement list for one DOT document.
#[derive(Debug, Clone)]
pub struct DotBuilder {
    header: String,
    statements: Vec<String>,
}

impl DotBuilder {
    pub fn new(options: &DotOptions) -> Self {
        let statements = options
            .graph_attributes
            .iter()
            .map(|(key, value)| format!("graph [{}={}];", dot_id(key), dot_id(value)))
            .collect();

        Self {
            header: format!("digraph {} {{", dot_id(&options.graph_name)),
            statements,
        }
    }

    /// Append a node statement. `fill` is the resolved color.
    pub fn node(&mut self, id: &str, label: &str, fill: &str, extra: &RawAttributes) -> &mut Self {
        let mut stmt = format!(
            "{} [label={}, style=filled, fillcolor={}",
            quote_id(id),
            quote_id(label),
            quote_id(fill)
        );
        if !extra.is_empty() {
            // Raw fragment from the sheet, copied as-is.
            stmt.push_str(", ");
            stmt.push_str(extra.as_str());
        }
        stmt.push_str("];");
        self.statements.push(stmt);
        self
    }

    /// Append an edge statement carrying the edge handle as its `id`.
    pub fn edge(&mut self, source: &str, target: &str) -> &mut Self {
        self.statements.push(format!(
            "{} -> {} [id={}];",
            quote_id(source),
            quote_id(target),
            quote_id(&edge_handle(source, target))
        ));
        self
    }

    /// Statements added so far, header and closing brace excluded.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Join everything into the final document.
    pub fn finish(self) -> String {
        let mut lines = Vec::with_capacity(self.statements.len() + 2);
        lines.push(self.header);
        lines.extend(self.statements.into_iter().map(|s| format!("{}{}", INDENT, s)));
        lines.push("}".to_string());
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Render nodes (in order) then edges (in order) as one DOT document.
pub fn render_dot(nodes: &[NodeRecord], edges: &[EdgeRecord], options: &DotOptions) -> String {
    let mut builder = DotBuilder::new(options);

    for node in nodes {
        let resolved = resolve_status(node.status);
        builder.node(&node.id, &node.label, resolved.color, &node.attribute);
    }

    for edge in edges {
        builder.edge(&edge.source, &edge.target);
    }

    builder.finish()
}
