//! # Neoviz Core
//!
//! Export document model, aggregation and JSON output for neoviz.
//!
//! Nothing in this crate talks to the database: the graph crate hands over
//! identities, labels and property maps, and this crate turns them into the
//! document a force-graph visualization consumes.

pub mod aggregate;
pub mod error;
pub mod model;
pub mod report;
pub mod writer;

pub use aggregate::{build_document, summarize, TypeCount, TypeSummary};
pub use error::{NeovizError, NeovizResult};
pub use model::{EdgeRecord, ExportDocument, ExportMetadata, NodeRecord, UNKNOWN_TYPE};
pub use report::{AnalysisReport, AnalysisResult};
pub use writer::{write_analysis, write_document, ExportPaths};
