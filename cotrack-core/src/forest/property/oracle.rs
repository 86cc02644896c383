//! Brute-force oracle for maximum spanning forest weights.
//!
//! Enumerates every edge subset, so it is only usable on graphs with a
//! handful of edges. With strictly positive weights the heaviest acyclic
//! subset is always a spanning forest, which makes its weight the reference
//! value for the selector.

use crate::graph::Edge;

/// Upper bound on the edge count accepted by [`max_forest_weight`].
pub(super) const MAX_ORACLE_EDGES: usize = 16;

/// Returns the weight of the heaviest acyclic subset of `edges`.
pub(super) fn max_forest_weight(node_count: usize, edges: &[Edge]) -> u64 {
    assert!(
        edges.len() <= MAX_ORACLE_EDGES,
        "oracle is exponential in the edge count"
    );
    (0_u32..(1 << edges.len()))
        .filter_map(|mask| subset_weight(node_count, edges, mask))
        .max()
        .unwrap_or(0)
}

fn subset_weight(node_count: usize, edges: &[Edge], mask: u32) -> Option<u64> {
    let mut parent: Vec<usize> = (0..node_count).collect();
    let mut total = 0_u64;
    for (bit, edge) in edges.iter().enumerate() {
        if mask & (1 << bit) == 0 {
            continue;
        }
        let left = root(&mut parent, edge.source().index());
        let right = root(&mut parent, edge.target().index());
        if left == right {
            return None;
        }
        parent[left] = right;
        total += u64::from(edge.weight());
    }
    Some(total)
}

/// Counts connected components of the graph, isolated nodes included.
pub(super) fn component_count(node_count: usize, edges: &[Edge]) -> usize {
    let mut parent: Vec<usize> = (0..node_count).collect();
    let mut components = node_count;
    for edge in edges {
        let left = root(&mut parent, edge.source().index());
        let right = root(&mut parent, edge.target().index());
        if left != right {
            parent[left] = right;
            components -= 1;
        }
    }
    components
}

/// Returns `true` when `edges` contain no cycle.
pub(super) fn is_acyclic(node_count: usize, edges: &[Edge]) -> bool {
    component_count(node_count, edges) + edges.len() == node_count
}

fn root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        node = parent[node];
    }
    node
}
