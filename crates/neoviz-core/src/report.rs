//! Custom analysis report model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw rows returned by one canned analysis query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub description: String,
    pub results: Vec<Map<String, Value>>,
}

/// All analysis results keyed by query name, as written to `custom-analysis.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisReport {
    pub queries: BTreeMap<String, AnalysisResult>,
}

impl AnalysisReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rows for a named query, replacing any earlier entry.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        results: Vec<Map<String, Value>>,
    ) {
        self.queries.insert(
            name.into(),
            AnalysisResult {
                description: description.into(),
                results,
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }
}
