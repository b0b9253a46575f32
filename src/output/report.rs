//! CSV report writers

use crate::config::CrawlConfig;
use crate::output::{OutputError, OutputResult};
use crate::storage::LinkGraph;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes the pages report: one row per crawled domain with its outdegree
/// and visit count.
pub fn export_pages_report(graph: &LinkGraph, path: &Path) -> OutputResult<()> {
    write_pages(graph, path).map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })
}

fn write_pages(graph: &LinkGraph, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "domain,outgoing_links,visit_count")?;

    for (domain, outbound) in graph.graph() {
        writeln!(
            writer,
            "{},{},{}",
            domain,
            outbound.len(),
            graph.visit_count_of(domain)
        )?;
    }

    writer.flush()
}

/// Writes the rank report: one row per ranked domain, scores to six decimal
/// places.
pub fn export_rank_report(graph: &LinkGraph, path: &Path) -> OutputResult<()> {
    write_rank(graph, path).map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })
}

fn write_rank(graph: &LinkGraph, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "domain,pagerank_score")?;

    for (domain, score) in graph.rank() {
        writeln!(writer, "{},{:.6}", domain, score)?;
    }

    writer.flush()
}

/// Writes both reports, logging any failure and carrying on: a report that
/// cannot be written never aborts the run or blocks the other report.
pub fn export_reports(graph: &LinkGraph, config: &CrawlConfig) {
    match export_pages_report(graph, &config.pages_report_path) {
        Ok(()) => tracing::info!(
            path = %config.pages_report_path.display(),
            rows = graph.graph().len(),
            "exported pages report"
        ),
        Err(error) => tracing::error!(%error, "pages report failed"),
    }

    match export_rank_report(graph, &config.rank_report_path) {
        Ok(()) => tracing::info!(
            path = %config.rank_report_path.display(),
            rows = graph.rank().len(),
            "exported rank report"
        ),
        Err(error) => tracing::error!(%error, "rank report failed"),
    }
}
