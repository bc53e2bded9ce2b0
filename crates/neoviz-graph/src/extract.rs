//! Node and relationship extraction.
//!
//! Both extractors return the driver's internal identities so that link
//! endpoints can be joined to node ids by plain string equality.

use anyhow::{Context, Result};
use neo4rs::Query;
use serde_json::{Map, Value};
use tracing::{info, warn};

use neoviz_core::{EdgeRecord, NodeRecord};

use crate::GraphClient;

/// Default cap on exported nodes.
pub const DEFAULT_NODE_LIMIT: usize = 1000;

/// Default cap on exported relationships.
pub const DEFAULT_LINK_LIMIT: usize = 5000;

const NODES_QUERY: &str = "MATCH (n)
     RETURN id(n) AS id, labels(n) AS labels, properties(n) AS properties
     LIMIT $limit";

const LINKS_QUERY: &str = "MATCH (a)-[r]->(b)
     RETURN id(a) AS source, id(b) AS target, type(r) AS type, properties(r) AS properties
     LIMIT $limit";

/// Row caps for a single export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractLimits {
    pub nodes: usize,
    pub links: usize,
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODE_LIMIT,
            links: DEFAULT_LINK_LIMIT,
        }
    }
}

/// Fetch up to `limit` nodes.
pub async fn fetch_nodes(client: &GraphClient, limit: usize) -> Result<Vec<NodeRecord>> {
    let query = Query::new(NODES_QUERY.to_string()).param("limit", limit_param(limit)?);
    let rows = client.query(query).await.context("Failed to fetch nodes")?;

    let nodes = rows.iter().map(node_from_row).collect::<Result<Vec<_>>>()?;

    log_cap("nodes", nodes.len(), limit);
    Ok(nodes)
}

/// Fetch up to `limit` directed relationships.
pub async fn fetch_links(client: &GraphClient, limit: usize) -> Result<Vec<EdgeRecord>> {
    let query = Query::new(LINKS_QUERY.to_string()).param("limit", limit_param(limit)?);
    let rows = client.query(query).await.context("Failed to fetch relationships")?;

    let links = rows.iter().map(edge_from_row).collect::<Result<Vec<_>>>()?;

    log_cap("links", links.len(), limit);
    Ok(links)
}

/// Map one row of the node query to a node record.
pub fn node_from_row(row: &neo4rs::Row) -> Result<NodeRecord> {
    let id: i64 = row
        .get("id")
        .map_err(|e| anyhow::anyhow!("Node row has no readable id: {:?}", e))?;
    let labels: Vec<String> = row
        .get("labels")
        .map_err(|e| anyhow::anyhow!("Node {} has unreadable labels: {:?}", id, e))?;

    let properties = match read_properties(row) {
        Ok(map) => map,
        Err(e) => {
            warn!(id, error = %e, "Could not convert node properties to JSON, exporting none");
            Map::new()
        }
    };

    Ok(NodeRecord::from_parts(id, &labels, properties))
}

/// Map one row of the relationship query to an edge record.
pub fn edge_from_row(row: &neo4rs::Row) -> Result<EdgeRecord> {
    let source: i64 = row
        .get("source")
        .map_err(|e| anyhow::anyhow!("Relationship row has no readable source: {:?}", e))?;
    let target: i64 = row
        .get("target")
        .map_err(|e| anyhow::anyhow!("Relationship row has no readable target: {:?}", e))?;
    let rel_type: String = row.get("type").map_err(|e| {
        anyhow::anyhow!("Relationship {}->{} has an unreadable type: {:?}", source, target, e)
    })?;

    let properties = match read_properties(row) {
        Ok(map) => map,
        Err(e) => {
            warn!(
                source,
                target,
                rel_type = %rel_type,
                error = %e,
                "Could not convert relationship properties to JSON, exporting none"
            );
            Map::new()
        }
    };

    Ok(EdgeRecord::from_parts(source, target, rel_type, properties))
}

/// Read the `properties` column as a JSON object.
///
/// Values with no JSON mapping in the driver (spatial points) make the whole
/// map unreadable; callers then export the record with empty properties.
fn read_properties(row: &neo4rs::Row) -> std::result::Result<Map<String, Value>, String> {
    row.get::<Map<String, Value>>("properties")
        .map_err(|e| format!("{:?}", e))
}

fn limit_param(limit: usize) -> Result<i64> {
    i64::try_from(limit).with_context(|| format!("Row limit {} is too large", limit))
}

fn log_cap(kind: &str, fetched: usize, limit: usize) {
    if reached_cap(fetched, limit) {
        info!(kind, limit, "Row cap reached, export may be truncated");
    } else {
        info!(kind, fetched, "Extracted");
    }
}

/// Whether an extractor returned as many rows as it was allowed to.
pub fn reached_cap(fetched: usize, limit: usize) -> bool {
    fetched >= limit
}
