//! Custom analysis queries.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::{error, warn};

use neoviz_core::writer::DEFAULT_OUTPUT_DIR;
use neoviz_core::{write_analysis, AnalysisReport, ExportPaths};
use neoviz_graph::{run_analysis, GraphClient, GraphConfig};

use crate::output;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory for custom-analysis.json
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

/// Standalone analysis: failures abort with a non-zero exit.
pub async fn execute(args: AnalyzeArgs, config: &GraphConfig) -> Result<()> {
    let client = GraphClient::connect(config)
        .await
        .inspect_err(|e| error!(error = %format!("{:#}", e), "Could not connect to Neo4j"))?;

    let path = ExportPaths::in_dir(&args.output_dir).analysis;
    let report = analyze(&client, &path)
        .await
        .inspect_err(|e| error!(error = %format!("{:#}", e), "Custom analysis failed"))?;

    output::print_analysis_summary(&report, &path);
    Ok(())
}

/// Analysis as the last step of an export: failures are logged and swallowed.
pub async fn run_and_write(client: &GraphClient, path: &Path) {
    match analyze(client, path).await {
        Ok(report) => output::print_analysis_summary(&report, path),
        Err(e) => warn!(error = %format!("{:#}", e), "Custom analysis failed, continuing"),
    }
}

async fn analyze(client: &GraphClient, path: &Path) -> Result<AnalysisReport> {
    let report = run_analysis(client).await?;
    write_analysis(&report, path).context("Failed to write custom analysis")?;
    Ok(report)
}
