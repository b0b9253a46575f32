//! Per-run metrics append
//!
//! Every run appends one row to a shared metrics file so repeated runs can
//! be compared side by side. The header is written only when the file is
//! new or empty.

use crate::output::{OutputError, OutputResult};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

const METRICS_HEADER: &str = "seed_url,max_pages,num_threads,total_ms,pages_crawled,throughput";

/// One run's worth of metrics
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub seed_url: String,
    pub max_pages: usize,
    pub num_threads: usize,
    pub total_ms: u64,
    pub pages_crawled: usize,
}

impl RunMetrics {
    /// Pages per second over the crawl phase; 0.0 for a sub-millisecond run.
    pub fn throughput(&self) -> f64 {
        if self.total_ms > 0 {
            self.pages_crawled as f64 * 1000.0 / self.total_ms as f64
        } else {
            0.0
        }
    }
}

/// Appends one metrics row, writing the header first when the file is
/// empty.
pub fn append_metrics(metrics: &RunMetrics, path: &Path) -> OutputResult<()> {
    write_row(metrics, path).map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })
}

fn write_row(metrics: &RunMetrics, path: &Path) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    if file.metadata()?.len() == 0 {
        writeln!(file, "{}", METRICS_HEADER)?;
    }

    writeln!(
        file,
        "{},{},{},{},{},{:.2}",
        metrics.seed_url,
        metrics.max_pages,
        metrics.num_threads,
        metrics.total_ms,
        metrics.pages_crawled,
        metrics.throughput()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> RunMetrics {
        RunMetrics {
            seed_url: "https://a.test".to_string(),
            max_pages: 100,
            num_threads: 4,
            total_ms: 2000,
            pages_crawled: 50,
        }
    }

    #[test]
    fn test_throughput() {
        assert!((sample().throughput() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_throughput_zero_duration() {
        let mut metrics = sample();
        metrics.total_ms = 0;
        assert_eq!(metrics.throughput(), 0.0);
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metrics.csv");

        append_metrics(&sample(), &path).unwrap();
        append_metrics(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "seed_url,max_pages,num_threads,total_ms,pages_crawled,throughput"
        );
        assert_eq!(lines[1], "https://a.test,100,4,2000,50,25.00");
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn test_append_to_unwritable_path_fails() {
        let result = append_metrics(&sample(), Path::new("/nonexistent-dir/metrics.csv"));
        assert!(matches!(result, Err(OutputError::Write { .. })));
    }
}
