//! Results persistence module

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::to_string_pretty;

use crate::graph::CompressedGraph;
use crate::metrics::{AnalysisReport, NodeMetrics};
use crate::pipeline::Analysis;

/// Save analysis results to the specified directory
pub fn save_results(analysis: &Analysis, output_dir: &Path) -> Result<()> {
    log::info!("Saving results to {}", output_dir.display());

    // Ensure output directory exists
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    save_summary(&analysis.report, output_dir)?;
    save_node_metrics(&analysis.node_metrics, output_dir)?;
    save_gexf(&analysis.subgraph, &analysis.node_metrics, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save the analysis report as JSON
fn save_summary(report: &AnalysisReport, output_dir: &Path) -> Result<()> {
    log::info!("Saving summary information");

    let path = output_dir.join("summary.json");
    let mut file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(to_string_pretty(report)?.as_bytes())?;

    Ok(())
}

/// Save per-node metrics as CSV
fn save_node_metrics(rows: &[NodeMetrics], output_dir: &Path) -> Result<()> {
    log::info!("Saving metrics for {} nodes", rows.len());

    let path = output_dir.join("nodes_metrics.csv");
    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "node,degree,pagerank,eigenvector,community")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{}",
            row.node, row.degree, row.pagerank, row.eigenvector, row.community
        )?;
    }
    writer.flush()?;

    Ok(())
}

/// Save the subgraph with node attributes as GEXF
fn save_gexf(subgraph: &CompressedGraph, rows: &[NodeMetrics], output_dir: &Path) -> Result<()> {
    log::info!("Generating GEXF graph file");

    let path = output_dir.join("subgraph.gexf");
    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    // Header and attribute declarations
    writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(writer, "<gexf xmlns=\"http://gexf.net/1.3\" version=\"1.3\">")?;
    writeln!(writer, "  <graph mode=\"static\" defaultedgetype=\"undirected\">")?;
    writeln!(writer, "    <attributes class=\"node\">")?;
    writeln!(writer, "      <attribute id=\"0\" title=\"degree\" type=\"integer\"/>")?;
    writeln!(writer, "      <attribute id=\"1\" title=\"pagerank\" type=\"double\"/>")?;
    writeln!(writer, "      <attribute id=\"2\" title=\"eigenvector\" type=\"double\"/>")?;
    writeln!(writer, "      <attribute id=\"3\" title=\"community\" type=\"integer\"/>")?;
    writeln!(writer, "    </attributes>")?;

    // Nodes
    writeln!(writer, "    <nodes>")?;
    for row in rows {
        writeln!(writer, "      <node id=\"{}\" label=\"{}\">", row.node, row.node)?;
        writeln!(writer, "        <attvalues>")?;
        writeln!(writer, "          <attvalue for=\"0\" value=\"{}\"/>", row.degree)?;
        writeln!(writer, "          <attvalue for=\"1\" value=\"{}\"/>", row.pagerank)?;
        writeln!(writer, "          <attvalue for=\"2\" value=\"{}\"/>", row.eigenvector)?;
        writeln!(writer, "          <attvalue for=\"3\" value=\"{}\"/>", row.community)?;
        writeln!(writer, "        </attvalues>")?;
        writeln!(writer, "      </node>")?;
    }
    writeln!(writer, "    </nodes>")?;

    // Edges
    writeln!(writer, "    <edges>")?;
    for (edge_id, (a, b)) in subgraph.edge_indices().enumerate() {
        writeln!(
            writer,
            "      <edge id=\"{}\" source=\"{}\" target=\"{}\"/>",
            edge_id,
            subgraph.id_of(a),
            subgraph.id_of(b)
        )?;
    }
    writeln!(writer, "    </edges>")?;

    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</gexf>")?;
    writer.flush()?;

    Ok(())
}
