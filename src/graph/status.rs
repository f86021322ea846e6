//! Status resolver - maps a node status to its fill color and label.

use progress_graph_types::NodeStatus;

/// Display attributes derived from a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStatus {
    /// Graphviz color name used as `fillcolor`
    pub color: &'static str,
    /// Label shown in the front end
    pub status_text: &'static str,
}

pub const UNSET_COLOR: &str = "white";
pub const UNSET_TEXT: &str = "未設定";

/// Resolve the display attributes of a status.
pub fn resolve_status(status: NodeStatus) -> ResolvedStatus {
    match status {
        NodeStatus::ToDo => ResolvedStatus {
            color: "lightgray",
            status_text: "待辦",
        },
        NodeStatus::InProgress => ResolvedStatus {
            color: "gold",
            status_text: "進行中",
        },
        NodeStatus::Done => ResolvedStatus {
            color: "lightgreen",
            status_text: "已完成",
        },
        NodeStatus::Unset => ResolvedStatus {
            color: UNSET_COLOR,
            status_text: UNSET_TEXT,
        },
    }
}

/// Convenience for callers holding the raw sheet cell.
pub fn resolve_cell(value: &str) -> ResolvedStatus {
    resolve_status(NodeStatus::from_cell(value))
}
