//! Canned analysis queries.
//!
//! Each query has fixed output columns; every result row is turned into a
//! JSON object keyed by those columns and stored under the query name.

use anyhow::{Context, Result};
use neo4rs::Query;
use serde_json::{Map, Value};
use tracing::{debug, info};

use neoviz_core::AnalysisReport;

use crate::GraphClient;

/// A fixed analytical query.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisQuery {
    pub name: &'static str,
    pub description: &'static str,
    pub cypher: &'static str,
    pub columns: &'static [&'static str],
}

/// Nodes with more incident relationships than this are "high degree".
pub const HIGH_DEGREE_THRESHOLD: i64 = 5;

pub const ANALYSIS_QUERIES: &[AnalysisQuery] = &[
    AnalysisQuery {
        name: "nodeTypeDistribution",
        description: "Count of nodes per primary label",
        cypher: "MATCH (n)
             RETURN coalesce(labels(n)[0], 'Unknown') AS type, count(n) AS count
             ORDER BY count DESC",
        columns: &["type", "count"],
    },
    AnalysisQuery {
        name: "highDegreeNodes",
        description: "Nodes with more than 5 relationships",
        cypher: "MATCH (n)-[r]-()
             WITH n, count(r) AS degree
             WHERE degree > $threshold
             RETURN id(n) AS id, coalesce(labels(n)[0], 'Unknown') AS type,
                    coalesce(n.name, n.title, n.label) AS name, degree
             ORDER BY degree DESC
             LIMIT 20",
        columns: &["id", "type", "name", "degree"],
    },
];

/// Run every canned query and collect the rows into a report.
///
/// The first failing query aborts the whole analysis.
pub async fn run_analysis(client: &GraphClient) -> Result<AnalysisReport> {
    let mut report = AnalysisReport::new();

    for analysis in ANALYSIS_QUERIES {
        let mut query = Query::new(analysis.cypher.to_string());
        if analysis.cypher.contains("$threshold") {
            query = query.param("threshold", HIGH_DEGREE_THRESHOLD);
        }
        let rows = client
            .query(query)
            .await
            .with_context(|| format!("Analysis query '{}' failed", analysis.name))?;

        let results: Vec<Map<String, Value>> = rows
            .iter()
            .map(|row| analysis_row(row, analysis.columns))
            .collect();

        debug!(query = analysis.name, rows = results.len(), "Analysis query complete");
        report.insert(analysis.name, analysis.description, results);
    }

    info!(queries = report.len(), "Custom analysis complete");
    Ok(report)
}

/// Convert one result row to a JSON object keyed by `columns`.
pub fn analysis_row(row: &neo4rs::Row, columns: &[&str]) -> Map<String, Value> {
    row_to_map(columns, |column| row.get::<Value>(column).ok())
}

/// Build a JSON object from a row, one entry per column.
///
/// Columns the lookup cannot produce become `null`.
fn row_to_map<F>(columns: &[&str], mut lookup: F) -> Map<String, Value>
where
    F: FnMut(&str) -> Option<Value>,
{
    columns
        .iter()
        .map(|column| (column.to_string(), lookup(column).unwrap_or(Value::Null)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo4rs::{BoltList, BoltNull, BoltType, Row};
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_two_uniquely_named_queries() {
        assert_eq!(ANALYSIS_QUERIES.len(), 2);
        let names: HashSet<&str> = ANALYSIS_QUERIES.iter().map(|q| q.name).collect();
        assert_eq!(names.len(), ANALYSIS_QUERIES.len());
    }

    #[test]
    fn test_columns_are_returned_by_cypher() {
        for analysis in ANALYSIS_QUERIES {
            for column in analysis.columns {
                assert!(
                    analysis.cypher.contains(&format!("AS {}", column))
                        || analysis.cypher.contains(&format!(", {}", column)),
                    "{} does not return column {}",
                    analysis.name,
                    column
                );
            }
        }
    }

    #[test]
    fn test_row_to_map_fills_missing_with_null() {
        let map = row_to_map(&["type", "count"], |column| match column {
            "type" => Some(json!("Person")),
            _ => None,
        });
        assert_eq!(Value::Object(map), json!({"type": "Person", "count": null}));
    }

    #[test]
    fn test_row_to_map_keeps_every_column() {
        let map = row_to_map(&["id", "type", "name", "degree"], |column| Some(json!(column)));
        assert_eq!(map.len(), 4);
        assert_eq!(map["degree"], json!("degree"));
    }

    #[test]
    fn test_analysis_row_from_driver_row() {
        let fields = BoltList::from(vec![
            BoltType::from("type"),
            BoltType::from("count"),
            BoltType::from("name"),
        ]);
        let data = BoltList::from(vec![
            BoltType::from("Person"),
            BoltType::from(3_i64),
            BoltType::Null(BoltNull),
        ]);
        let row = Row::new(fields, data);

        let map = analysis_row(&row, &["type", "count", "name", "degree"]);
        assert_eq!(
            Value::Object(map),
            json!({"type": "Person", "count": 3, "name": null, "degree": null})
        );
    }
}
