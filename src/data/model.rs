use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EdgeRecord – one row of the correlation table
// ---------------------------------------------------------------------------

/// Required input columns, in the order the loaders report them.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "variable1",
    "variable2",
    "category1",
    "category2",
    "correlation_estimate",
    "p_value",
];

/// A single pairwise relationship (one row of the source table).
/// Rows arrive deduplicated upstream: one row per unordered variable pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub variable1: String,
    pub variable2: String,
    pub category1: String,
    pub category2: String,
    pub correlation_estimate: f64,
    pub p_value: f64,
}

// ---------------------------------------------------------------------------
// CorrSign – sign of a correlation estimate, used for edge colouring
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrSign {
    Positive,
    Negative,
}

impl CorrSign {
    /// Zero counts as positive, matching `r >= 0`.
    pub fn of(correlation_estimate: f64) -> Self {
        if correlation_estimate >= 0.0 {
            CorrSign::Positive
        } else {
            CorrSign::Negative
        }
    }
}

impl fmt::Display for CorrSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrSign::Positive => write!(f, "positive"),
            CorrSign::Negative => write!(f, "negative"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredEdge / NodeRecord – pipeline intermediates
// ---------------------------------------------------------------------------

/// An edge that survived filtering, annotated with its correlation sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredEdge {
    #[serde(flatten)]
    pub record: EdgeRecord,
    pub corr_sign: CorrSign,
}

impl FilteredEdge {
    pub fn new(record: EdgeRecord) -> Self {
        let corr_sign = CorrSign::of(record.correlation_estimate);
        FilteredEdge { record, corr_sign }
    }
}

/// A variable appearing as an endpoint of at least one filtered edge.
/// Unique per `node`; the category comes from whichever endpoint produced
/// it first in the sorted `(node, category)` traversal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct NodeRecord {
    pub node: String,
    pub category: String,
}

// ---------------------------------------------------------------------------
// CorrelationDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed correlation table with its derived category index.
#[derive(Debug, Clone)]
pub struct CorrelationDataset {
    /// All rows, in file order.
    pub edges: Vec<EdgeRecord>,
    /// Sorted set of every category label appearing on either endpoint.
    pub categories: BTreeSet<String>,
}

impl CorrelationDataset {
    /// Build the category index from the loaded rows.
    pub fn from_edges(edges: Vec<EdgeRecord>) -> Self {
        let mut categories = BTreeSet::new();
        for edge in &edges {
            categories.insert(edge.category1.clone());
            categories.insert(edge.category2.clone());
        }
        CorrelationDataset { edges, categories }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
