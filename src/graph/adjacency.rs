//! Index builder - adjacency index from parsed records.

use progress_graph_types::{AdjacencyIndex, EdgeRecord, NodeRecord};

/// Build the adjacency index.
///
/// Every parsed node is seeded with an empty list first, then each edge
/// appends its target under its source. Sources unknown to the node list
/// get a key of their own; repeated edges stay repeated.
pub fn build_adjacency(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> AdjacencyIndex {
    let mut index = AdjacencyIndex::new();

    for node in nodes {
        index.insert_node(&node.id);
    }

    for edge in edges {
        if !index.contains(&edge.source) {
            tracing::debug!(source = %edge.source, "Edge source is not a known node");
        }
        index.push_edge(&edge.source, &edge.target);
    }

    index
}
