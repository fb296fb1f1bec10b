use std::collections::BTreeMap;
use std::f64::consts::TAU;

use serde::Serialize;

use crate::data::model::NodeRecord;

/// Radius of the big circle the category centres sit on.
pub const DEFAULT_R_OUTER: f64 = 8.0;
/// Radius of each category's inner node circle.
pub const DEFAULT_R_INNER: f64 = 2.0;

/// Explicit 2D position for one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// Centre of a category's cluster on the outer circle.
fn category_center(c_idx: usize, num_categories: usize, r_outer: f64) -> (f64, f64) {
    let theta = TAU * c_idx as f64 / num_categories.max(1) as f64;
    (r_outer * theta.cos(), r_outer * theta.sin())
}

// ---------------------------------------------------------------------------
// Two-level radial placement
// ---------------------------------------------------------------------------

/// Compute deterministic coordinates for every node.
///
/// Categories are spread evenly around a big circle of radius `r_outer`;
/// within each category the nodes are spread evenly around an inner circle
/// of radius `r_inner` centred on the category's point. A category with a
/// single node places it at angle 0.
///
/// The result depends only on category membership and the sorted
/// `(category, node)` ordering — never on edge topology — so repeated runs
/// over the same node set produce identical coordinates. Per-category
/// ranks come from one grouped pass over the pre-sorted slice rather than
/// a scan per node.
pub fn compute_layout(
    nodes: &[NodeRecord],
    categories: &[String],
    r_outer: f64,
    r_inner: f64,
) -> BTreeMap<String, LayoutPoint> {
    let cat_to_idx: BTreeMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, cat)| (cat.as_str(), i))
        .collect();
    let num_categories = categories.len();

    let mut sorted: Vec<&NodeRecord> = nodes.iter().collect();
    sorted.sort_by(|a, b| (&a.category, &a.node).cmp(&(&b.category, &b.node)));

    let mut positions = BTreeMap::new();
    let mut start = 0;
    while start < sorted.len() {
        let category = &sorted[start].category;
        let mut end = start;
        while end < sorted.len() && sorted[end].category == *category {
            end += 1;
        }
        let n_in_cat = end - start;

        let c_idx = cat_to_idx.get(category.as_str()).copied().unwrap_or(0);
        let (cx, cy) = category_center(c_idx, num_categories, r_outer);

        for (pos_in_cat, node) in sorted[start..end].iter().enumerate() {
            let theta = TAU * pos_in_cat as f64 / n_in_cat.max(1) as f64;
            positions.insert(
                node.node.clone(),
                LayoutPoint {
                    x: cx + r_inner * theta.cos(),
                    y: cy + r_inner * theta.sin(),
                },
            );
        }
        start = end;
    }

    positions
}
