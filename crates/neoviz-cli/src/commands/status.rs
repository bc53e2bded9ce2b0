//! Connectivity check and graph size.

use anyhow::Result;
use colored::Colorize;
use tracing::error;

use neoviz_graph::{GraphClient, GraphConfig};

pub async fn execute(config: &GraphConfig) -> Result<()> {
    let client = GraphClient::connect(config)
        .await
        .inspect_err(|e| error!(error = %format!("{:#}", e), "Could not connect to Neo4j"))?;
    let counts = client
        .get_counts()
        .await
        .inspect_err(|e| error!(error = %format!("{:#}", e), "Could not count graph totals"))?;

    println!("{}", "Neo4j Status".bold());
    println!("{}", "─".repeat(40));
    println!("  URI:           {}", config.uri.cyan());
    println!("  Database:      {}", config.database.cyan());
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());
    println!("{}", "─".repeat(40));

    Ok(())
}
