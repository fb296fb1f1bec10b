use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::color::{sign_color, CategoryColors};
use crate::config::PipelineConfig;
use crate::data::filter::{derive_nodes, filter_edges, unique_categories};
use crate::data::model::{CorrSign, CorrelationDataset, FilteredEdge};
use crate::layout::compute_layout;

// ---------------------------------------------------------------------------
// Output artifacts
// ---------------------------------------------------------------------------

/// A node ready for rendering: category, explicit position, colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub node: String,
    pub category: String,
    pub x: f64,
    pub y: f64,
    /// The category's colour, denormalized so the adapter can draw a node
    /// without a legend lookup.
    pub color: String,
}

/// Everything the presentation adapter needs to draw the graph. The
/// adapter only reads these; it never feeds anything back into the
/// pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GraphArtifacts {
    /// Surviving edges, each annotated with its correlation sign.
    pub edges: Vec<FilteredEdge>,
    /// Unique nodes in `(category, node)` order, with layout coordinates.
    pub nodes: Vec<PositionedNode>,
    /// category → hex colour, recomputed from the filtered category set.
    pub category_colors: BTreeMap<String, String>,
    /// corr_sign → hex colour.
    pub sign_colors: BTreeMap<String, String>,
    /// node → size, a linear gradient over the node ordering.
    pub node_sizes: BTreeMap<String, f64>,
}

impl GraphArtifacts {
    /// (edges, nodes, categories) counts for the run summary.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.edges.len(), self.nodes.len(), self.category_colors.len())
    }
}

/// Outcome of one pipeline run.
#[derive(Debug)]
pub enum PipelineRun {
    /// A graph to hand to the presentation adapter.
    Graph(GraphArtifacts),
    /// No edges met the criteria. Terminal for this parameter set and
    /// expected; not a fault.
    Empty,
}

// ---------------------------------------------------------------------------
// The pipeline
// ---------------------------------------------------------------------------

/// Run the full pipeline: filter → derive nodes → assign attributes →
/// layout. Recomputes everything from scratch; nothing is cached between
/// runs, so a parameter change is just another call.
pub fn run(dataset: &CorrelationDataset, config: &PipelineConfig) -> PipelineRun {
    let edges = filter_edges(
        &dataset.edges,
        config.corr_threshold,
        config.allowed_categories.as_ref(),
    );
    if edges.is_empty() {
        return PipelineRun::Empty;
    }

    let nodes = derive_nodes(&edges);
    // Colours come from the categories present *after* filtering, never
    // from a mapping computed on an earlier, wider edge set.
    let categories = unique_categories(&nodes);
    debug!(
        "{} edges, {} nodes, {} categories after filtering",
        edges.len(),
        nodes.len(),
        categories.len()
    );

    let colors = CategoryColors::new(&categories, config.palette);
    let positions = compute_layout(&nodes, &categories, config.r_outer, config.r_inner);

    // One ordering drives both the size gradient and the node table:
    // sort by (category, node), same as the layout.
    let mut ordered = nodes;
    ordered.sort_by(|a, b| (&a.category, &a.node).cmp(&(&b.category, &b.node)));
    let total = ordered.len();

    let node_sizes: BTreeMap<String, f64> = ordered
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let size = config.size_base + config.size_scale * (i as f64 / total as f64);
            (n.node.clone(), size)
        })
        .collect();

    let positioned: Vec<PositionedNode> = ordered
        .into_iter()
        .map(|n| {
            let p = positions[&n.node];
            let color = colors.color_for(&n.category).to_string();
            PositionedNode {
                node: n.node,
                category: n.category,
                x: p.x,
                y: p.y,
                color,
            }
        })
        .collect();

    let sign_colors: BTreeMap<String, String> = [CorrSign::Positive, CorrSign::Negative]
        .into_iter()
        .map(|s| (s.to_string(), sign_color(s).to_string()))
        .collect();

    PipelineRun::Graph(GraphArtifacts {
        edges,
        nodes: positioned,
        category_colors: colors.legend_entries().into_iter().collect(),
        sign_colors,
        node_sizes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::EdgeRecord;
    use std::collections::BTreeSet;

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

    fn dataset() -> CorrelationDataset {
        CorrelationDataset::from_edges(vec![
            edge("A", "B", "catX", "catX", 0.5, 0.01),
            edge("A", "C", "catX", "catY", -0.4, 0.02),
            edge("B", "C", "catX", "catY", 0.1, 0.2),
        ])
    }

    fn expect_graph(run: PipelineRun) -> GraphArtifacts {
        match run {
            PipelineRun::Graph(g) => g,
            PipelineRun::Empty => panic!("expected a graph"),
        }
    }

    #[test]
    fn worked_example_keeps_two_edges() {
        let g = expect_graph(run(&dataset(), &PipelineConfig::default()));
        assert_eq!(g.counts(), (2, 3, 2));

        let names: Vec<&str> = g.nodes.iter().map(|n| n.node.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn high_threshold_halts_with_empty() {
        let config = PipelineConfig {
            corr_threshold: 0.6,
            ..PipelineConfig::default()
        };
        assert!(matches!(run(&dataset(), &config), PipelineRun::Empty));
    }

    #[test]
    fn every_output_edge_satisfies_the_predicate() {
        let config = PipelineConfig::default();
        let g = expect_graph(run(&dataset(), &config));
        for e in &g.edges {
            assert!(e.record.p_value < 0.05);
            assert!(e.record.correlation_estimate.abs() > config.corr_threshold);
            assert_ne!(e.record.variable1, e.record.variable2);
        }
    }

    #[test]
    fn node_set_is_exactly_the_endpoint_union() {
        let g = expect_graph(run(&dataset(), &PipelineConfig::default()));
        let mut endpoints = BTreeSet::new();
        for e in &g.edges {
            endpoints.insert(e.record.variable1.as_str());
            endpoints.insert(e.record.variable2.as_str());
        }
        let nodes: BTreeSet<&str> = g.nodes.iter().map(|n| n.node.as_str()).collect();
        assert_eq!(nodes, endpoints);
    }

    #[test]
    fn runs_are_byte_identical() {
        let config = PipelineConfig::default();
        let ds = dataset();
        let a = expect_graph(run(&ds, &config));
        let b = expect_graph(run(&ds, &config));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn category_refilter_rederives_nodes_and_colors() {
        let config = PipelineConfig {
            allowed_categories: Some(["catX".to_string()].into()),
            ..PipelineConfig::default()
        };
        let g = expect_graph(run(&dataset(), &config));
        // Only A–B survives; C and catY vanish from every artifact.
        assert_eq!(g.counts(), (1, 2, 1));
        assert!(!g.category_colors.contains_key("catY"));
        assert!(!g.node_sizes.contains_key("C"));
    }

    #[test]
    fn sizes_form_a_linear_gradient() {
        let config = PipelineConfig::default();
        let g = expect_graph(run(&dataset(), &config));
        let n = g.nodes.len() as f64;
        for (i, node) in g.nodes.iter().enumerate() {
            let expected = config.size_base + config.size_scale * (i as f64 / n);
            assert!((g.node_sizes[&node.node] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn node_colors_match_the_category_legend() {
        let g = expect_graph(run(&dataset(), &PipelineConfig::default()));
        for node in &g.nodes {
            assert_eq!(&node.color, &g.category_colors[&node.category]);
        }
    }

    #[test]
    fn sign_color_mapping_is_fixed() {
        let g = expect_graph(run(&dataset(), &PipelineConfig::default()));
        assert_eq!(g.sign_colors["positive"], "#1f77b4");
        assert_eq!(g.sign_colors["negative"], "#d62728");
    }
}
