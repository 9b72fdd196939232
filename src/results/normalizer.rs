//! Result normalization: classify raw results and project them into table
//! rows plus the ordered, chart-eligible subset.

use crate::error::FormatError;
use crate::format::{format_bytes, format_count, format_duration};
use crate::models::{DisplayRow, ParseMetrics, RawResult, StatusLabel};

/// Rendered in place of any numeric value that cannot be shown.
pub const PLACEHOLDER: &str = "-";

/// A successful result, borrowed from the response, ready for charting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartEntry<'a> {
    pub library: &'a str,
    pub winner: bool,
    pub metrics: &'a ParseMetrics,
}

/// Output of one normalizer pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResults<'a> {
    /// One row per input result, in input order
    pub rows: Vec<DisplayRow>,
    /// Successful results only, in input order
    pub chart_eligible: Vec<ChartEntry<'a>>,
}

impl NormalizedResults<'_> {
    pub fn winner_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.status == StatusLabel::Winner)
            .count()
    }
}

/// Map a raw result to its status badge.
///
/// The winner flag is taken from the server as-is; several flagged
/// results all classify as `Winner`.
pub fn classify(result: &RawResult) -> StatusLabel {
    match result {
        RawResult::Failure { .. } => StatusLabel::Failed,
        RawResult::Success { winner: true, .. } => StatusLabel::Winner,
        RawResult::Success { winner: false, .. } => StatusLabel::Success,
    }
}

fn display_metric(
    library: &str,
    field: &str,
    value: Option<f64>,
    formatter: fn(f64) -> Result<String, FormatError>,
) -> String {
    let Some(value) = value else {
        log::warn!("[Normalizer] {} reported success without {}", library, field);
        return PLACEHOLDER.to_string();
    };

    formatter(value).unwrap_or_else(|e| {
        log::warn!("[Normalizer] Cannot display {} for {}: {}", field, library, e);
        PLACEHOLDER.to_string()
    })
}

fn to_row(result: &RawResult) -> DisplayRow {
    let status = classify(result);
    match result {
        RawResult::Failure { library, error } => DisplayRow {
            library: library.clone(),
            ops_per_sec: PLACEHOLDER.to_string(),
            avg_time: PLACEHOLDER.to_string(),
            memory: PLACEHOLDER.to_string(),
            allocs: PLACEHOLDER.to_string(),
            status,
            error_text: Some(error.clone().unwrap_or_default()),
        },
        RawResult::Success { library, metrics, .. } => DisplayRow {
            library: library.clone(),
            ops_per_sec: display_metric(
                library,
                "ops_per_second",
                metrics.ops_per_second,
                format_count,
            ),
            avg_time: display_metric(
                library,
                "avg_time_per_parse",
                metrics.avg_time_per_parse,
                format_duration,
            ),
            memory: display_metric(
                library,
                "memory_allocated",
                metrics.memory_allocated,
                format_bytes,
            ),
            allocs: display_metric(
                library,
                "allocs_per_op",
                metrics.allocs_per_op,
                format_count,
            ),
            status,
            error_text: None,
        },
    }
}

/// Normalize a result list. Never fails: malformed entries degrade to
/// placeholders rather than blanking the whole table.
pub fn normalize(results: &[RawResult]) -> NormalizedResults<'_> {
    let rows: Vec<DisplayRow> = results.iter().map(to_row).collect();

    let chart_eligible: Vec<ChartEntry<'_>> = results
        .iter()
        .filter_map(|result| match result {
            RawResult::Success { library, winner, metrics } => Some(ChartEntry {
                library,
                winner: *winner,
                metrics,
            }),
            RawResult::Failure { .. } => None,
        })
        .collect();

    log::debug!(
        "[Normalizer] {} results -> {} rows, {} chart entries",
        results.len(),
        rows.len(),
        chart_eligible.len()
    );

    NormalizedResults { rows, chart_eligible }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(
        library: &str,
        winner: bool,
        ops: f64,
        ns: f64,
        bytes: f64,
        allocs: f64,
    ) -> RawResult {
        RawResult::Success {
            library: library.to_string(),
            winner,
            metrics: ParseMetrics {
                ops_per_second: Some(ops),
                avg_time_per_parse: Some(ns),
                memory_allocated: Some(bytes),
                allocs_per_op: Some(allocs),
            },
        }
    }

    fn failure(library: &str, error: Option<&str>) -> RawResult {
        RawResult::Failure {
            library: library.to_string(),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&failure("a", None)), StatusLabel::Failed);
        assert_eq!(classify(&success("a", true, 1.0, 1.0, 1.0, 1.0)), StatusLabel::Winner);
        assert_eq!(classify(&success("a", false, 1.0, 1.0, 1.0, 1.0)), StatusLabel::Success);
    }

    #[test]
    fn test_success_row_formatting() {
        let results = vec![success("libA", false, 500_000.0, 2_000.0, 128.0, 2.0)];
        let normalized = normalize(&results);

        assert_eq!(
            normalized.rows[0],
            DisplayRow {
                library: "libA".to_string(),
                ops_per_sec: "500,000".to_string(),
                avg_time: "2.00 μs".to_string(),
                memory: "128.00 B".to_string(),
                allocs: "2".to_string(),
                status: StatusLabel::Success,
                error_text: None,
            }
        );
    }

    #[test]
    fn test_failed_row_uses_placeholders() {
        let results = vec![failure("libC", Some("timeout")), failure("libD", None)];
        let normalized = normalize(&results);

        let row = &normalized.rows[0];
        assert_eq!(row.status, StatusLabel::Failed);
        for cell in [&row.ops_per_sec, &row.avg_time, &row.memory, &row.allocs] {
            assert_eq!(cell, PLACEHOLDER);
        }
        assert_eq!(row.error_text.as_deref(), Some("timeout"));
        assert_eq!(normalized.rows[1].error_text.as_deref(), Some(""));
        assert!(normalized.chart_eligible.is_empty());
    }

    #[test]
    fn test_order_preserved_and_failures_excluded_from_charts() {
        let results = vec![
            success("slow", false, 10.0, 5_000.0, 64.0, 1.0),
            failure("broken", Some("adapter 'broken' not found")),
            success("fast", true, 90.0, 500.0, 32.0, 1.0),
        ];
        let normalized = normalize(&results);

        let libs: Vec<_> = normalized.rows.iter().map(|r| r.library.as_str()).collect();
        assert_eq!(libs, vec!["slow", "broken", "fast"]);

        let charted: Vec<_> = normalized.chart_eligible.iter().map(|e| e.library).collect();
        assert_eq!(charted, vec!["slow", "fast"]);
        assert!(normalized.chart_eligible[1].winner);
    }

    #[test]
    fn test_malformed_success_renders_placeholder() {
        let results = vec![RawResult::Success {
            library: "partial".to_string(),
            winner: false,
            metrics: ParseMetrics {
                ops_per_second: Some(1_000.0),
                avg_time_per_parse: None,
                memory_allocated: Some(f64::NAN),
                allocs_per_op: Some(3.0),
            },
        }];
        let normalized = normalize(&results);
        let row = &normalized.rows[0];

        assert_eq!(row.ops_per_sec, "1,000");
        assert_eq!(row.avg_time, PLACEHOLDER);
        assert_eq!(row.memory, PLACEHOLDER);
        assert_eq!(row.allocs, "3");
        assert_eq!(row.status, StatusLabel::Success);
        assert_eq!(normalized.chart_eligible.len(), 1);
    }

    #[test]
    fn test_multiple_winners_pass_through() {
        let results = vec![
            success("a", true, 1.0, 1.0, 1.0, 1.0),
            success("b", true, 1.0, 1.0, 1.0, 1.0),
        ];
        let normalized = normalize(&results);
        assert_eq!(normalized.winner_count(), 2);
        assert!(normalized.chart_eligible.iter().all(|e| e.winner));
    }

    #[test]
    fn test_empty_input() {
        let normalized = normalize(&[]);
        assert!(normalized.rows.is_empty());
        assert!(normalized.chart_eligible.is_empty());
    }
}
