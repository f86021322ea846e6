//! Record parser - raw sheet rows into typed node and edge records.
//!
//! Column positions are fixed:
//!
//! ```text
//! Node sheet: A=id  B=label  C=attribute  D=status  E=prompt
//! Edge sheet: A=source  B=target
//! ```
//!
//! Rows missing a required column are skipped, never reported as errors.
//! Short rows read the missing cells as empty and extra columns are ignored.

use std::collections::HashMap;

use progress_graph_types::{EdgeRecord, NodeRecord, NodeStatus, RawAttributes};

/// One sheet row, header excluded. Cells are kept in column order.
pub type RawRow = Vec<String>;

const NODE_ID: usize = 0;
const NODE_LABEL: usize = 1;
const NODE_ATTRIBUTE: usize = 2;
const NODE_STATUS: usize = 3;
const NODE_PROMPT: usize = 4;

const EDGE_SOURCE: usize = 0;
const EDGE_TARGET: usize = 1;

/// Description used when a node row leaves the prompt column empty.
pub fn default_prompt(label: &str) -> String {
    format!("這是 {} 節點的詳細說明。", label)
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

/// Parse a single node row, `None` when id or label is blank.
pub fn parse_node_row(row: &[String]) -> Option<NodeRecord> {
    let id = cell(row, NODE_ID);
    let label = cell(row, NODE_LABEL);
    if id.is_empty() || label.is_empty() {
        return None;
    }

    let raw_status = cell(row, NODE_STATUS);
    let prompt = match cell(row, NODE_PROMPT) {
        "" => default_prompt(label),
        given => given.to_string(),
    };

    Some(NodeRecord {
        id: id.to_string(),
        label: label.to_string(),
        attribute: RawAttributes::new(cell(row, NODE_ATTRIBUTE)),
        status: NodeStatus::from_cell(raw_status),
        raw_status: raw_status.to_string(),
        prompt,
    })
}

/// Parse a single edge row, `None` when either endpoint is blank.
pub fn parse_edge_row(row: &[String]) -> Option<EdgeRecord> {
    let source = cell(row, EDGE_SOURCE);
    let target = cell(row, EDGE_TARGET);
    if source.is_empty() || target.is_empty() {
        return None;
    }
    Some(EdgeRecord::new(source, target))
}

/// Parse all node rows in order.
///
/// A repeated id replaces the earlier record's data but keeps the earlier
/// record's position, so each id appears once.
pub fn parse_node_rows(rows: &[RawRow]) -> Vec<NodeRecord> {
    let mut nodes: Vec<NodeRecord> = Vec::with_capacity(rows.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (row_idx, row) in rows.iter().enumerate() {
        let Some(node) = parse_node_row(row) else {
            tracing::debug!(row = row_idx + 2, "Skipping node row without id or label");
            continue;
        };

        tracing::debug!(
            node_id = %node.id,
            label = %node.label,
            status = %node.status,
            "Parsed node row"
        );

        match seen.get(&node.id) {
            Some(&pos) => {
                tracing::warn!(
                    node_id = %node.id,
                    row = row_idx + 2,
                    "Duplicate node id, later row replaces earlier one"
                );
                nodes[pos] = node;
            }
            None => {
                seen.insert(node.id.clone(), nodes.len());
                nodes.push(node);
            }
        }
    }

    nodes
}

/// Parse all edge rows in order. Repeated pairs are kept.
pub fn parse_edge_rows(rows: &[RawRow]) -> Vec<EdgeRecord> {
    rows.iter()
        .enumerate()
        .filter_map(|(row_idx, row)| {
            let edge = parse_edge_row(row);
            if edge.is_none() {
                tracing::debug!(row = row_idx + 2, "Skipping edge row without source or target");
            }
            edge
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_full_node_row() {
        let node = parse_node_row(&row(&["A", "Start", "shape=box", "ToDo", "Kick-off"])).unwrap();
        assert_eq!(
            node,
            NodeRecord {
                id: "A".into(),
                label: "Start".into(),
                attribute: RawAttributes::new("shape=box"),
                status: NodeStatus::ToDo,
                raw_status: "ToDo".into(),
                prompt: "Kick-off".into(),
            }
        );
    }

    #[test]
    fn test_short_row_gets_defaults() {
        let node = parse_node_row(&row(&["A", "Start"])).unwrap();
        assert!(node.attribute.is_empty());
        assert_eq!(node.status, NodeStatus::Unset);
        assert_eq!(node.raw_status, "");
        assert_eq!(node.prompt, "這是 Start 節點的詳細說明。");
    }

    #[test]
    fn test_blank_id_or_label_dropped() {
        assert!(parse_node_row(&row(&["", "Start"])).is_none());
        assert!(parse_node_row(&row(&["A", "   "])).is_none());
        assert!(parse_node_row(&row(&["A"])).is_none());
        assert!(parse_node_row(&[]).is_none());
    }

    #[test]
    fn test_cells_are_trimmed() {
        let node = parse_node_row(&row(&["  A ", " Start ", "", " Done ", "  "])).unwrap();
        assert_eq!(node.id, "A");
        assert_eq!(node.label, "Start");
        assert_eq!(node.status, NodeStatus::Done);
        assert_eq!(node.prompt, default_prompt("Start"));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let edge = parse_edge_row(&row(&["A", "B", "ignored", "also"])).unwrap();
        assert_eq!(edge, EdgeRecord::new("A", "B"));
    }

    #[test]
    fn test_edge_rows_skip_incomplete() {
        let edges = parse_edge_rows(&[
            row(&["A", "B"]),
            row(&["A", ""]),
            row(&["", "B"]),
            row(&["B", "C"]),
            row(&["A", "B"]),
        ]);
        assert_eq!(
            edges,
            vec![
                EdgeRecord::new("A", "B"),
                EdgeRecord::new("B", "C"),
                EdgeRecord::new("A", "B"),
            ]
        );
    }

    #[test]
    fn test_duplicate_id_last_wins_first_position() {
        let nodes = parse_node_rows(&[
            row(&["A", "First", "", "ToDo"]),
            row(&["B", "Other"]),
            row(&["A", "Second", "", "Done"]),
        ]);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "A");
        assert_eq!(nodes[0].label, "Second");
        assert_eq!(nodes[0].status, NodeStatus::Done);
        assert_eq!(nodes[1].id, "B");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_node_rows(&[]).is_empty());
        assert!(parse_edge_rows(&[]).is_empty());
    }
}
