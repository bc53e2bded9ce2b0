//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use neoviz_graph::GraphConfig;

pub mod analyze;
pub mod export;
pub mod status;

/// Export a Neo4j graph to JSON for force-graph visualization
#[derive(Parser)]
#[command(name = "neoviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Neo4j connection settings, read from flags or the environment.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long, global = true, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub uri: String,

    /// Neo4j user
    #[arg(long, global = true, env = "NEO4J_USER", default_value = "neo4j")]
    pub user: String,

    /// Neo4j password
    #[arg(long, global = true, env = "NEO4J_PASSWORD", default_value = "password", hide_env_values = true)]
    pub password: String,

    /// Database name
    #[arg(long, global = true, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub database: String,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.uri.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export nodes, links and the custom analysis (default)
    Export(export::ExportArgs),

    /// Run only the custom analysis queries
    Analyze(analyze::AnalyzeArgs),

    /// Check connectivity and show node/relationship counts
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.connection.to_config();

        match self.command.unwrap_or_else(|| Commands::Export(export::ExportArgs::default())) {
            Commands::Export(args) => export::execute(args, &config).await,
            Commands::Analyze(args) => analyze::execute(args, &config).await,
            Commands::Status => status::execute(&config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_export() {
        let cli = Cli::try_parse_from(["neoviz"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_connection_flags() {
        let cli = Cli::try_parse_from([
            "neoviz",
            "--uri",
            "bolt://db:7687",
            "--user",
            "reader",
            "--password",
            "secret",
            "status",
        ])
        .unwrap();
        let config = cli.connection.to_config();
        assert_eq!(config.uri, "bolt://db:7687");
        assert_eq!(config.user, "reader");
        assert_eq!(config.password, "secret");
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn test_export_options() {
        let cli = Cli::try_parse_from([
            "neoviz",
            "export",
            "--output-dir",
            "out",
            "--node-limit",
            "10",
            "--link-limit",
            "20",
            "--skip-analysis",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Export(args)) => {
                assert_eq!(args.output_dir, std::path::PathBuf::from("out"));
                assert_eq!(args.node_limit, 10);
                assert_eq!(args.link_limit, 20);
                assert!(args.skip_analysis);
            }
            _ => panic!("expected export"),
        }
    }
}
