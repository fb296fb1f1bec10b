use std::collections::BTreeSet;

use super::model::{EdgeRecord, FilteredEdge, NodeRecord};

/// Significance cutoff applied to every edge, independent of the
/// user-tunable correlation threshold.
pub const P_VALUE_CUTOFF: f64 = 0.05;

// ---------------------------------------------------------------------------
// Edge filter
// ---------------------------------------------------------------------------

/// Select the edges worth drawing.
///
/// An edge survives when:
/// * `p_value < 0.05` (strict; `p == 0.05` is excluded)
/// * `|correlation_estimate| > corr_threshold` (strict; boundary excluded)
/// * `variable1 != variable2` (self-loops removed)
/// * with a non-empty `allowed_categories`, both endpoint categories are
///   in the set — an edge with one endpoint outside the selection is
///   dropped entirely, not just hidden.
pub fn filter_edges(
    edges: &[EdgeRecord],
    corr_threshold: f64,
    allowed_categories: Option<&BTreeSet<String>>,
) -> Vec<FilteredEdge> {
    edges
        .iter()
        .filter(|e| {
            e.p_value < P_VALUE_CUTOFF
                && e.correlation_estimate.abs() > corr_threshold
                && e.variable1 != e.variable2
        })
        .filter(|e| match allowed_categories {
            Some(selected) if !selected.is_empty() => {
                selected.contains(&e.category1) && selected.contains(&e.category2)
            }
            // No selection (or empty set) means no category constraint.
            _ => true,
        })
        .cloned()
        .map(FilteredEdge::new)
        .collect()
}

// ---------------------------------------------------------------------------
// Node derivation
// ---------------------------------------------------------------------------

/// Derive the unique node set from the surviving edges.
///
/// Takes the union of `(variable1, category1)` and `(variable2, category2)`
/// endpoints, sorts by `(node, category)` so tie-breaks are reproducible,
/// then keeps the first record per node. Node membership is a pure function
/// of the current filtered edges; callers re-derive after every re-filter.
pub fn derive_nodes(filtered_edges: &[FilteredEdge]) -> Vec<NodeRecord> {
    let mut endpoints: Vec<NodeRecord> = Vec::with_capacity(filtered_edges.len() * 2);
    for fe in filtered_edges {
        endpoints.push(NodeRecord {
            node: fe.record.variable1.clone(),
            category: fe.record.category1.clone(),
        });
        endpoints.push(NodeRecord {
            node: fe.record.variable2.clone(),
            category: fe.record.category2.clone(),
        });
    }
    endpoints.sort();
    endpoints.dedup_by(|a, b| a.node == b.node);
    endpoints
}

/// Sorted set of categories present among the given nodes.
pub fn unique_categories(nodes: &[NodeRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = nodes.iter().map(|n| n.category.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CorrSign;

    fn edge(v1: &str, v2: &str, c1: &str, c2: &str, r: f64, p: f64) -> EdgeRecord {
        EdgeRecord {
            variable1: v1.to_string(),
            variable2: v2.to_string(),
            category1: c1.to_string(),
            category2: c2.to_string(),
            correlation_estimate: r,
            p_value: p,
        }
    }

    fn sample() -> Vec<EdgeRecord> {
        vec![
            edge("A", "B", "catX", "catX", 0.5, 0.01),
            edge("A", "C", "catX", "catY", -0.4, 0.02),
            edge("B", "C", "catX", "catY", 0.1, 0.2),
        ]
    }

    #[test]
    fn keeps_significant_strong_edges() {
        let out = filter_edges(&sample(), 0.3, None);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].record.variable2, "B");
        assert_eq!(out[0].corr_sign, CorrSign::Positive);
        assert_eq!(out[1].record.variable2, "C");
        assert_eq!(out[1].corr_sign, CorrSign::Negative);
    }

    #[test]
    fn high_threshold_yields_empty() {
        assert!(filter_edges(&sample(), 0.6, None).is_empty());
    }

    #[test]
    fn boundary_values_are_excluded() {
        let edges = vec![
            edge("A", "B", "c", "c", 0.3, 0.01), // |r| == threshold
            edge("A", "C", "c", "c", 0.5, 0.05), // p == cutoff
        ];
        assert!(filter_edges(&edges, 0.3, None).is_empty());
    }

    #[test]
    fn self_loops_are_removed() {
        let edges = vec![edge("A", "A", "c", "c", 0.9, 0.001)];
        assert!(filter_edges(&edges, 0.3, None).is_empty());
    }

    #[test]
    fn category_selection_requires_both_endpoints() {
        let allowed: BTreeSet<String> = ["catX".to_string()].into();
        let out = filter_edges(&sample(), 0.3, Some(&allowed));
        // A–C spans catX/catY and must be dropped entirely.
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record.variable1, "A");
        assert_eq!(out[0].record.variable2, "B");
    }

    #[test]
    fn empty_selection_means_no_constraint() {
        let allowed = BTreeSet::new();
        assert_eq!(filter_edges(&sample(), 0.3, Some(&allowed)).len(), 2);
    }

    #[test]
    fn nodes_are_endpoint_union_deduped() {
        let out = filter_edges(&sample(), 0.3, None);
        let nodes = derive_nodes(&out);
        let names: Vec<&str> = nodes.iter().map(|n| n.node.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(unique_categories(&nodes), ["catX", "catY"]);
    }

    #[test]
    fn first_seen_category_wins_on_duplicate_node() {
        // B appears with two different categories; the sorted traversal
        // keeps the lexicographically smaller one.
        let edges = vec![
            edge("A", "B", "catX", "catZ", 0.5, 0.01),
            edge("B", "C", "catY", "catX", 0.6, 0.01),
        ];
        let nodes = derive_nodes(&filter_edges(&edges, 0.3, None));
        let b = nodes.iter().find(|n| n.node == "B").unwrap();
        assert_eq!(b.category, "catY");
    }
}
