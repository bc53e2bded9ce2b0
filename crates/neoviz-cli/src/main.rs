//! neoviz - export a Neo4j graph to JSON for force-graph visualization.

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Initialize tracing on stderr so stdout stays free for the summary.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "neoviz=debug,neoviz_graph=debug,neoviz_core=debug"
    } else {
        "neoviz=info,neoviz_graph=info,neoviz_core=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the environment and flags still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Dropping the command future on Ctrl-C drops the client and its pool.
    tokio::select! {
        result = cli.execute() => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, Neo4j connection closed");
            Ok(())
        }
    }
}
