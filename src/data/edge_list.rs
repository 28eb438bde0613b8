//! Edge-list text input

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::graph::{CompressedGraph, GraphBuilder, NodeId};

/// Parse an edge list: one `u v` pair per line, `#` comments and blank lines skipped
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<CompressedGraph> {
    let mut builder = GraphBuilder::new();
    let mut edge_lines = 0usize;

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_number + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (u, v) = match (fields.next(), fields.next(), fields.next()) {
            (Some(u), Some(v), None) => (u, v),
            _ => return Err(anyhow!("Line {}: expected two node ids, got {:?}", line_number + 1, trimmed)),
        };

        let u: NodeId = u
            .parse()
            .with_context(|| format!("Line {}: invalid node id {:?}", line_number + 1, u))?;
        let v: NodeId = v
            .parse()
            .with_context(|| format!("Line {}: invalid node id {:?}", line_number + 1, v))?;

        builder.add_edge(u, v);
        edge_lines += 1;
    }

    log::info!("Parsed {} edge line(s) over {} nodes", edge_lines, builder.node_count());
    Ok(builder.build())
}

/// Load an edge-list file
pub fn load_edge_list(path: &Path) -> Result<CompressedGraph> {
    log::info!("Reading edge list: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let graph = parse_edge_list(BufReader::new(file))?;

    log::info!(
        "Loaded graph with {} nodes and {} edges ({} bytes in memory)",
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage()
    );
    Ok(graph)
}
