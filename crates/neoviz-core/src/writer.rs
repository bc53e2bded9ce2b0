//! Serialize export documents and analysis reports to disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{NeovizError, NeovizResult};
use crate::model::ExportDocument;
use crate::report::AnalysisReport;

/// Default directory for all output files.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

pub const GRAPH_DATA_FILE: &str = "graph-data.json";
pub const GRAPH_DATA_MIN_FILE: &str = "graph-data.min.json";
pub const ANALYSIS_FILE: &str = "custom-analysis.json";

/// Locations of the three output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub pretty: PathBuf,
    pub compact: PathBuf,
    pub analysis: PathBuf,
}

impl ExportPaths {
    /// Standard file names under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            pretty: dir.join(GRAPH_DATA_FILE),
            compact: dir.join(GRAPH_DATA_MIN_FILE),
            analysis: dir.join(ANALYSIS_FILE),
        }
    }
}

impl Default for ExportPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_OUTPUT_DIR)
    }
}

/// Write the document twice: pretty-printed and compact.
///
/// Both files are staged next to their targets and only renamed into place
/// once both writes succeeded, so a failure leaves the previous pair intact.
pub fn write_document(document: &ExportDocument, paths: &ExportPaths) -> NeovizResult<()> {
    let pretty = serde_json::to_string_pretty(document)?;
    let compact = serde_json::to_string(document)?;

    let staged_pretty = stage_file(&paths.pretty, pretty.as_bytes())?;
    let staged_compact = match stage_file(&paths.compact, compact.as_bytes()) {
        Ok(staged) => staged,
        Err(e) => {
            discard(&staged_pretty);
            return Err(e);
        }
    };

    if let Err(e) = commit(&staged_compact, &paths.compact) {
        discard(&staged_compact);
        discard(&staged_pretty);
        return Err(e);
    }
    if let Err(e) = commit(&staged_pretty, &paths.pretty) {
        discard(&staged_pretty);
        return Err(e);
    }

    info!(
        pretty = %paths.pretty.display(),
        compact = %paths.compact.display(),
        nodes = document.metadata.total_nodes,
        links = document.metadata.total_links,
        "Graph data written"
    );
    Ok(())
}

/// Write the analysis report as pretty JSON.
pub fn write_analysis(report: &AnalysisReport, path: &Path) -> NeovizResult<()> {
    write_json_pretty(report, path)?;
    info!(path = %path.display(), queries = report.len(), "Custom analysis written");
    Ok(())
}

fn write_json_pretty<T: Serialize>(value: &T, path: &Path) -> NeovizResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    write_file(path, content.as_bytes())
}

/// Write a file, creating its parent directory if needed.
fn write_file(path: &Path, content: &[u8]) -> NeovizResult<()> {
    if path.file_name().is_none() {
        return Err(NeovizError::Path(path.display().to_string()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| NeovizError::write(parent, e))?;
    }

    std::fs::write(path, content).map_err(|e| NeovizError::write(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "File written");
    Ok(())
}

/// Write `content` to a sibling `.tmp` file of `path`.
fn stage_file(path: &Path, content: &[u8]) -> NeovizResult<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(NeovizError::Path(path.display().to_string()));
    };
    let mut staged_name = name.to_os_string();
    staged_name.push(".tmp");
    let staged = path.with_file_name(staged_name);

    write_file(&staged, content)?;
    Ok(staged)
}

fn commit(staged: &Path, path: &Path) -> NeovizResult<()> {
    std::fs::rename(staged, path).map_err(|e| NeovizError::write(path, e))
}

fn discard(staged: &Path) {
    if let Err(e) = std::fs::remove_file(staged) {
        debug!(path = %staged.display(), error = %e, "Could not remove staged file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build_document;
    use crate::model::{EdgeRecord, NodeRecord};
    use serde_json::{json, Map, Value};

    fn sample_document() -> ExportDocument {
        let mut props = Map::new();
        props.insert("name".to_string(), json!("Ada"));
        props.insert("born".to_string(), json!(1815));
        let nodes = vec![
            NodeRecord::from_parts(0, &["Person".to_string()], props),
            NodeRecord::from_parts(1, &["Machine".to_string()], Map::new()),
        ];
        let links = vec![EdgeRecord::from_parts(0, 1, "PROGRAMMED", Map::new())];
        build_document(nodes, links)
    }

    #[test]
    fn test_paths_in_dir() {
        let paths = ExportPaths::in_dir("out");
        assert_eq!(paths.pretty, Path::new("out/graph-data.json"));
        assert_eq!(paths.compact, Path::new("out/graph-data.min.json"));
        assert_eq!(paths.analysis, Path::new("out/custom-analysis.json"));
        assert_eq!(ExportPaths::default(), ExportPaths::in_dir("data"));
    }

    #[test]
    fn test_compact_and_pretty_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ExportPaths::in_dir(dir.path());
        let doc = sample_document();

        write_document(&doc, &paths).unwrap();

        let pretty_text = std::fs::read_to_string(&paths.pretty).unwrap();
        let compact_text = std::fs::read_to_string(&paths.compact).unwrap();
        assert!(pretty_text.contains('\n'));
        assert!(!compact_text.contains('\n'));

        let pretty: Value = serde_json::from_str(&pretty_text).unwrap();
        let compact: Value = serde_json::from_str(&compact_text).unwrap();
        assert_eq!(pretty, compact);

        let parsed: ExportDocument = serde_json::from_str(&compact_text).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let paths = ExportPaths::in_dir(&nested);

        write_document(&sample_document(), &paths).unwrap();
        assert!(paths.pretty.exists());
        assert!(paths.compact.exists());
    }

    #[test]
    fn test_write_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ExportPaths::in_dir(dir.path());
        let mut report = AnalysisReport::new();
        report.insert("highDegreeNodes", "Nodes with more than 5 relationships", Vec::new());

        write_analysis(&report, &paths.analysis).unwrap();

        let value: Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.analysis).unwrap()).unwrap();
        assert_eq!(value["highDegreeNodes"]["results"], json!([]));
    }

    #[test]
    fn test_write_into_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let paths = ExportPaths::in_dir(blocker.join("sub"));
        let err = write_document(&sample_document(), &paths).unwrap_err();
        assert!(matches!(err, NeovizError::Write { .. }));
    }

    #[test]
    fn test_failed_compact_write_keeps_previous_pretty_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ExportPaths::in_dir(dir.path());
        std::fs::write(&paths.pretty, b"previous").unwrap();
        // A directory in place of the compact file makes its rename fail.
        std::fs::create_dir(&paths.compact).unwrap();

        let err = write_document(&sample_document(), &paths).unwrap_err();
        assert!(matches!(err, NeovizError::Write { .. }));

        assert_eq!(std::fs::read_to_string(&paths.pretty).unwrap(), "previous");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
