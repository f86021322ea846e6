//! Progress Graph Types - Level 1 wire types
//!
//! Pure data structures shared by every boundary of the progress graph:
//! the transformation pipeline, the HTTP host and the browser front end
//! that consumes the JSON payload.
//!
//! ## Contents
//!
//! - `NodeStatus` - lifecycle enumeration carried by a node row
//! - `NodeRecord` / `EdgeRecord` - parsed sheet rows
//! - `NodeDetail` / `EdgeDetail` - per-node and per-edge overlay data
//! - `AdjacencyIndex` - node id -> ordered outgoing targets
//! - `GraphResponse` - the envelope returned to the rendering host
//!
//! ## Rules
//!
//! 1. No transformation logic lives here, only constructors and accessors.
//! 2. JSON field names are camelCase, matching the front end.
//! 3. No workspace dependencies.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// STATUS
// ============================================================================

/// Lifecycle status of a node.
///
/// Only the three exact spellings used in the sheet are recognised;
/// anything else, including an empty cell, is `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeStatus {
    ToDo,
    InProgress,
    Done,
    #[default]
    Unset,
}

impl NodeStatus {
    /// Interpret a raw status cell. Surrounding whitespace is ignored,
    /// matching is case-sensitive.
    pub fn from_cell(value: &str) -> Self {
        match value.trim() {
            "ToDo" => Self::ToDo,
            "InProgress" => Self::InProgress,
            "Done" => Self::Done,
            _ => Self::Unset,
        }
    }

    /// Canonical sheet spelling, empty for `Unset`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "ToDo",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
            Self::Unset => "",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl From<&str> for NodeStatus {
    fn from(value: &str) -> Self {
        Self::from_cell(value)
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            other => f.write_str(other.as_str()),
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// Extra DOT attributes appended verbatim to a node statement.
///
/// This is an unvalidated injection point: the sheet author writes raw
/// attribute fragments (e.g. `shape=box, penwidth=2`) and the serializer
/// copies them into the output untouched. Whoever fills the column is
/// responsible for keeping the fragment syntactically valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAttributes(String);

impl RawAttributes {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self(fragment.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RawAttributes {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A node row accepted by the record parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Trimmed, non-empty identifier
    pub id: String,
    /// Trimmed, non-empty display label
    pub label: String,
    /// Verbatim DOT attribute fragment (may be empty)
    pub attribute: RawAttributes,
    /// Parsed lifecycle status
    pub status: NodeStatus,
    /// Status cell as written in the sheet, trimmed (empty when absent)
    pub raw_status: String,
    /// Description shown by the front end; never empty once parsed
    pub prompt: String,
}

/// An edge row accepted by the record parser.
///
/// Neither endpoint is checked against the node list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

// ============================================================================
// DETAILS (front-end overlay data)
// ============================================================================

/// Per-node payload used by the front end for tooltips and side panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetail {
    pub id: String,
    pub label: String,
    pub attribute: String,
    /// Raw status text (empty when unset)
    pub status: String,
    /// Localized status label
    pub status_text: String,
    pub prompt: String,
    /// Fill color used in the DOT output
    pub color: String,
}

/// Per-edge payload; `id` matches the `id` attribute of the rendered edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDetail {
    pub source: String,
    pub target: String,
    pub id: String,
}

// ============================================================================
// ADJACENCY INDEX
// ============================================================================

/// Mapping from node id to the ids reachable over one outgoing edge.
///
/// Keys keep first-insertion order and serialize as a JSON object in that
/// order. Target lists keep edge order and may contain repeats.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    entries: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `id` is a key. Existing target lists are left alone.
    pub fn insert_node(&mut self, id: &str) {
        self.slot(id);
    }

    /// Append `target` to the list of `source`, creating the key if needed.
    pub fn push_edge(&mut self, source: &str, target: &str) {
        let idx = self.slot(source);
        self.entries[idx].1.push(target.to_string());
    }

    fn slot(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.positions.get(id) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push((id.to_string(), Vec::new()));
        self.positions.insert(id.to_string(), idx);
        idx
    }

    pub fn get(&self, id: &str) -> Option<&[String]> {
        self.positions
            .get(id)
            .map(|&idx| self.entries[idx].1.as_slice())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl PartialEq for AdjacencyIndex {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for AdjacencyIndex {}

impl<K, V, T> FromIterator<(K, V)> for AdjacencyIndex
where
    K: AsRef<str>,
    V: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (key, targets) in iter {
            index.insert_node(key.as_ref());
            for target in targets {
                index.push_edge(key.as_ref(), target.as_ref());
            }
        }
        index
    }
}

impl Serialize for AdjacencyIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, targets) in &self.entries {
            map.serialize_entry(key, targets)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AdjacencyIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndexVisitor;

        impl<'de> Visitor<'de> for IndexVisitor {
            type Value = AdjacencyIndex;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of node id to target id list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut index = AdjacencyIndex::new();
                while let Some((key, targets)) = access.next_entry::<String, Vec<String>>()? {
                    index.insert_node(&key);
                    for target in targets {
                        index.push_edge(&key, &target);
                    }
                }
                Ok(index)
            }
        }

        deserializer.deserialize_map(IndexVisitor)
    }
}

// ============================================================================
// RESPONSE ENVELOPE
// ============================================================================

/// Everything the rendering host needs for one page load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResponse {
    /// DOT source handed to the graph renderer
    pub graph_text: String,
    pub node_details: Vec<NodeDetail>,
    pub edge_details: Vec<EdgeDetail>,
    pub adjacency: AdjacencyIndex,
    /// Pass-through from configuration, empty when unset
    pub background_image_url: String,
}
