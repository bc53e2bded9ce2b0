//! Full export: nodes, links, document files and the custom analysis.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, error, info, warn};

use neoviz_core::writer::DEFAULT_OUTPUT_DIR;
use neoviz_core::{build_document, summarize, write_document, ExportDocument, ExportPaths};
use neoviz_graph::extract::{DEFAULT_LINK_LIMIT, DEFAULT_NODE_LIMIT};
use neoviz_graph::{fetch_links, fetch_nodes, reached_cap, ExtractLimits, GraphClient, GraphConfig};

use crate::output;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Directory for graph-data.json, graph-data.min.json and custom-analysis.json
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum number of nodes to export
    #[arg(long, default_value_t = DEFAULT_NODE_LIMIT)]
    pub node_limit: usize,

    /// Maximum number of relationships to export
    #[arg(long, default_value_t = DEFAULT_LINK_LIMIT)]
    pub link_limit: usize,

    /// Skip the custom analysis queries
    #[arg(long)]
    pub skip_analysis: bool,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            node_limit: DEFAULT_NODE_LIMIT,
            link_limit: DEFAULT_LINK_LIMIT,
            skip_analysis: false,
        }
    }
}

impl ExportArgs {
    fn limits(&self) -> ExtractLimits {
        ExtractLimits {
            nodes: self.node_limit,
            links: self.link_limit,
        }
    }
}

pub async fn execute(args: ExportArgs, config: &GraphConfig) -> Result<()> {
    let client = GraphClient::connect(config)
        .await
        .inspect_err(|e| error!(error = %format!("{:#}", e), "Could not connect to Neo4j"))?;

    let paths = ExportPaths::in_dir(&args.output_dir);

    let document = export_graph(&client, args.limits(), &paths)
        .await
        .inspect_err(|e| error!(error = %format!("{:#}", e), "Export failed"))?;

    output::print_export_summary(&document, &summarize(&document), &paths);

    if args.skip_analysis {
        debug!("Custom analysis skipped");
    } else {
        super::analyze::run_and_write(&client, &paths.analysis).await;
    }

    info!("Export complete");
    Ok(())
}

/// Extract, aggregate and write the graph document.
async fn export_graph(
    client: &GraphClient,
    limits: ExtractLimits,
    paths: &ExportPaths,
) -> Result<ExportDocument> {
    info!(node_limit = limits.nodes, link_limit = limits.links, "Starting export");

    let nodes = fetch_nodes(client, limits.nodes).await?;
    let links = fetch_links(client, limits.links).await?;

    if reached_cap(nodes.len(), limits.nodes) || reached_cap(links.len(), limits.links) {
        warn_if_truncated(client, limits).await;
    }

    let document = build_document(nodes, links);
    write_document(&document, paths).context("Failed to write graph data")?;
    Ok(document)
}

/// Compare totals against the caps; truncation is reported, not treated as an error.
async fn warn_if_truncated(client: &GraphClient, limits: ExtractLimits) {
    match client.get_counts().await {
        Ok(counts) => {
            if counts.nodes > limits.nodes {
                warn!(total = counts.nodes, exported = limits.nodes, "Node export truncated");
            }
            if counts.relationships > limits.links {
                warn!(total = counts.relationships, exported = limits.links, "Relationship export truncated");
            }
        }
        Err(e) => debug!(error = %e, "Could not count graph totals"),
    }
}
