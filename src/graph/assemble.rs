//! Result assembler - the transformation entry points.

use progress_graph_types::{EdgeDetail, EdgeRecord, GraphResponse, NodeDetail, NodeRecord};

use super::adjacency::build_adjacency;
use super::dot::{edge_handle, render_dot};
use super::parser::{parse_edge_rows, parse_node_rows, RawRow};
use super::status::resolve_status;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::source::RowSource;

/// Node detail with the derived color and status label filled in.
pub fn node_detail(node: &NodeRecord) -> NodeDetail {
    let resolved = resolve_status(node.status);
    NodeDetail {
        id: node.id.clone(),
        label: node.label.clone(),
        attribute: node.attribute.as_str().to_string(),
        status: node.raw_status.clone(),
        status_text: resolved.status_text.to_string(),
        prompt: node.prompt.clone(),
        color: resolved.color.to_string(),
    }
}

pub fn edge_detail(edge: &EdgeRecord) -> EdgeDetail {
    EdgeDetail {
        source: edge.source.clone(),
        target: edge.target.clone(),
        id: edge_handle(&edge.source, &edge.target),
    }
}

/// Assemble the response from already-parsed records.
pub fn assemble(
    nodes: &[NodeRecord],
    edges: &[EdgeRecord],
    config: &dyn ConfigStore,
) -> GraphResponse {
    let graph_text = render_dot(nodes, edges, &config.dot_options());
    let adjacency = build_adjacency(nodes, edges);

    GraphResponse {
        graph_text,
        node_details: nodes.iter().map(node_detail).collect(),
        edge_details: edges.iter().map(edge_detail).collect(),
        adjacency,
        background_image_url: config.background_image_url(),
    }
}

/// Transform one snapshot of sheet rows into the rendering payload.
///
/// Pure with respect to its arguments: the same rows and configuration
/// always give a byte-identical `graph_text` and an equal adjacency index.
pub fn compute_graph(
    node_rows: &[RawRow],
    edge_rows: &[RawRow],
    config: &dyn ConfigStore,
) -> GraphResponse {
    let nodes = parse_node_rows(node_rows);
    let edges = parse_edge_rows(edge_rows);

    let response = assemble(&nodes, &edges, config);

    tracing::debug!(
        node_rows = node_rows.len(),
        edge_rows = edge_rows.len(),
        nodes = response.node_details.len(),
        edges = response.edge_details.len(),
        "Graph computed"
    );
    tracing::trace!(dot = %response.graph_text, "Generated DOT");

    response
}

/// Read a fresh snapshot from `source` and transform it.
pub fn load_graph(source: &dyn RowSource, config: &dyn ConfigStore) -> Result<GraphResponse> {
    let node_rows = source.node_rows()?;
    let edge_rows = source.edge_rows()?;
    Ok(compute_graph(&node_rows, &edge_rows, config))
}
