//! Terminal output formatting.

use std::path::Path;

use colored::Colorize;
use neoviz_core::{AnalysisReport, ExportDocument, ExportPaths, TypeCount, TypeSummary};

/// Print totals, per-type counts and the written file locations.
pub fn print_export_summary(document: &ExportDocument, summary: &TypeSummary, paths: &ExportPaths) {
    println!("{}", "Graph Export".bold());
    println!("{}", "─".repeat(40));
    println!("  Nodes:         {}", document.metadata.total_nodes.to_string().cyan());
    println!("  Links:         {}", document.metadata.total_links.to_string().cyan());
    println!("  Exported at:   {}", document.metadata.export_date.dimmed());

    print_type_counts("Node types", &summary.node_types);
    print_type_counts("Relationship types", &summary.relationship_types);

    println!();
    println!("  {} {}", "→".green(), paths.pretty.display());
    println!("  {} {}", "→".green(), paths.compact.display());
    println!("{}", "─".repeat(40));
}

/// Print the query names and row counts of an analysis report.
pub fn print_analysis_summary(report: &AnalysisReport, path: &Path) {
    println!("{}", "Custom Analysis".bold());
    if report.is_empty() {
        println!("  {}", "No analysis queries ran.".dimmed());
    }
    for (name, result) in &report.queries {
        println!(
            "  {} {} ({} rows)",
            "•".dimmed(),
            name.yellow(),
            result.results.len()
        );
    }
    println!("  {} {}", "→".green(), path.display());
}

fn print_type_counts(title: &str, counts: &[TypeCount]) {
    println!();
    if counts.is_empty() {
        println!("  {}", format!("No {}.", title.to_lowercase()).dimmed());
        return;
    }

    println!("  {} ({}):", title.bold(), counts.len());
    let width = counts.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for c in counts {
        println!("    {:<width$}  {}", c.name, c.count.to_string().cyan(), width = width);
    }
}
