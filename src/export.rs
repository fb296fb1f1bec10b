use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::pipeline::GraphArtifacts;

// ---------------------------------------------------------------------------
// Presentation boundary
// ---------------------------------------------------------------------------

/// Serialize the artifacts for the external presentation adapter.
///
/// A failure here is an export failure only: the artifacts were already
/// computed and stay valid, the caller just could not hand them over.
pub fn write_artifacts<W: Write>(mut writer: W, artifacts: &GraphArtifacts) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, artifacts).context("serializing graph artifacts")?;
    writer.write_all(b"\n").context("writing artifacts")?;
    Ok(())
}

/// Write the artifacts to a file.
pub fn write_artifacts_file(path: &Path, artifacts: &GraphArtifacts) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_artifacts(std::io::BufWriter::new(file), artifacts)
}

/// Log the per-run network summary and the category legend.
pub fn log_summary(artifacts: &GraphArtifacts) {
    let (edges, nodes, categories) = artifacts.counts();
    info!("Edges: {edges}");
    info!("Nodes: {nodes}");
    info!("Categories: {categories}");
    info!("Filtered automatically for p < 0.05");
    for (category, color) in &artifacts.category_colors {
        info!("  {category}: {color}");
    }
}

/// The user-facing report for the no-edges outcome. Terminal for this
/// parameter set, not a fault.
pub fn empty_result_notice(
    corr_threshold: f64,
    allowed_categories: Option<&BTreeSet<String>>,
) -> String {
    match allowed_categories {
        Some(cats) if !cats.is_empty() => {
            let names: Vec<&str> = cats.iter().map(String::as_str).collect();
            format!(
                "No edges meet the criteria (|r| > {corr_threshold}, categories: {}).",
                names.join(", ")
            )
        }
        _ => format!("No edges meet the criteria (|r| > {corr_threshold})."),
    }
}
