//! Merge extracted nodes and links into an export document.

use std::collections::{BTreeSet, HashMap};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::model::{EdgeRecord, ExportDocument, ExportMetadata, NodeRecord};

/// Occurrence count for a single node or relationship type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub name: String,
    pub count: usize,
}

/// Per-type counts shown in the console summary after an export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    pub node_types: Vec<TypeCount>,
    pub relationship_types: Vec<TypeCount>,
}

/// Assemble the export document, stamping it with the current time.
pub fn build_document(nodes: Vec<NodeRecord>, links: Vec<EdgeRecord>) -> ExportDocument {
    let export_date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    build_document_at(nodes, links, export_date)
}

/// Assemble the export document with an explicit export date.
pub fn build_document_at(
    nodes: Vec<NodeRecord>,
    links: Vec<EdgeRecord>,
    export_date: String,
) -> ExportDocument {
    let node_types: BTreeSet<String> = nodes.iter().map(|n| n.node_type.clone()).collect();
    let relationship_types: BTreeSet<String> = links.iter().map(|l| l.rel_type.clone()).collect();

    let metadata = ExportMetadata {
        export_date,
        total_nodes: nodes.len(),
        total_links: links.len(),
        node_types,
        relationship_types,
    };

    ExportDocument {
        nodes,
        links,
        metadata,
    }
}

/// Count occurrences of each node and relationship type.
pub fn summarize(document: &ExportDocument) -> TypeSummary {
    TypeSummary {
        node_types: count_types(document.nodes.iter().map(|n| n.node_type.as_str())),
        relationship_types: count_types(document.links.iter().map(|l| l.rel_type.as_str())),
    }
}

/// Sorted by count descending, ties broken by name.
fn count_types<'a>(types: impl Iterator<Item = &'a str>) -> Vec<TypeCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for t in types {
        *counts.entry(t).or_insert(0) += 1;
    }

    let mut result: Vec<TypeCount> = counts
        .into_iter()
        .map(|(name, count)| TypeCount {
            name: name.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    result
}
