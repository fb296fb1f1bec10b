use std::collections::BTreeSet;

use crate::color::PaletteMode;
use crate::layout::{DEFAULT_R_INNER, DEFAULT_R_OUTER};

/// Default minimum |correlation| for an edge to be kept.
pub const DEFAULT_CORR_THRESHOLD: f64 = 0.3;
/// Smallest node size in the ordinal size gradient.
pub const DEFAULT_SIZE_BASE: f64 = 200.0;
/// Spread of the size gradient above the base.
pub const DEFAULT_SIZE_SCALE: f64 = 800.0;

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// Everything the pipeline needs beyond the dataset itself. Passed
/// explicitly into [`crate::pipeline::run`]; each run is a pure function
/// of `(dataset, config)` with no ambient state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Minimum |correlation|, in `[0.0, 1.0]`. Strict comparison: an edge
    /// with `|r|` exactly at the threshold is excluded.
    pub corr_threshold: f64,
    /// Restrict the graph to these categories. `None` (or an empty set)
    /// keeps every category.
    pub allowed_categories: Option<BTreeSet<String>>,
    /// Category colour palette.
    pub palette: PaletteMode,
    /// Radius of the outer circle of category centres.
    pub r_outer: f64,
    /// Radius of each category's inner node circle.
    pub r_inner: f64,
    /// Node size gradient parameters: `size(i) = base + scale * i / n`.
    pub size_base: f64,
    pub size_scale: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            corr_threshold: DEFAULT_CORR_THRESHOLD,
            allowed_categories: None,
            palette: PaletteMode::default(),
            r_outer: DEFAULT_R_OUTER,
            r_inner: DEFAULT_R_INNER,
            size_base: DEFAULT_SIZE_BASE,
            size_scale: DEFAULT_SIZE_SCALE,
        }
    }
}
