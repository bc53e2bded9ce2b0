//! # Neoviz Graph
//!
//! Neo4j side of the export: connection handling, the bounded node and
//! relationship extractors, and the canned analysis queries.

pub mod analysis;
pub mod client;
pub mod extract;

pub use analysis::{analysis_row, run_analysis, AnalysisQuery, ANALYSIS_QUERIES};
pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use extract::{edge_from_row, fetch_links, fetch_nodes, node_from_row, reached_cap, ExtractLimits};
