//! Core data structures shared by the client, the result pipeline and the UI.
//!
//! Wire types mirror the benchmark server's JSON contract. `RawResult` is
//! decoded from the server's flat record into a tagged union so that every
//! consumer has to handle success and failure explicitly.

use serde::{Deserialize, Serialize};

/// Kind of HTTP message submitted for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Request,
    Response,
}

/// Request methods recognised when sniffing a message's first line.
const REQUEST_METHODS: [&str; 9] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "CONNECT", "TRACE",
];

impl MessageType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Request => "request",
            MessageType::Response => "response",
        }
    }

    /// Guess the message type from the first line of a raw HTTP message.
    ///
    /// Returns `None` when the first line is neither a request line
    /// (`METHOD target ...`) nor a status line (`HTTP/...`).
    pub fn detect(raw: &str) -> Option<MessageType> {
        let first_line = raw.trim_start().lines().next()?.trim();

        if first_line.starts_with("HTTP/") {
            return Some(MessageType::Response);
        }

        let is_request = REQUEST_METHODS.iter().any(|method| {
            first_line
                .strip_prefix(method)
                .map_or(false, |rest| rest.starts_with(' '))
        });

        is_request.then_some(MessageType::Request)
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Benchmark job sent to `POST /api/benchmark`. Built fresh per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkRequest {
    pub message: String,
    pub message_type: MessageType,
    pub iterations: u32,
    pub concurrency: u32,
    pub libraries: Vec<String>,
}

/// Measurements reported for a successful library run.
///
/// Every field is optional: a successful record missing a metric is
/// malformed, but must still be displayable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParseMetrics {
    /// Parses per second
    pub ops_per_second: Option<f64>,
    /// Mean nanoseconds per parse
    pub avg_time_per_parse: Option<f64>,
    /// Bytes allocated per operation
    pub memory_allocated: Option<f64>,
    /// Allocations per operation
    pub allocs_per_op: Option<f64>,
}

/// One per-library result as returned by the benchmark server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireResult")]
pub enum RawResult {
    Success {
        library: String,
        winner: bool,
        metrics: ParseMetrics,
    },
    Failure {
        library: String,
        error: Option<String>,
    },
}

impl RawResult {
    pub fn library(&self) -> &str {
        match self {
            RawResult::Success { library, .. } | RawResult::Failure { library, .. } => library,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RawResult::Success { .. })
    }

    /// True only for successful results flagged as winner by the server.
    pub fn is_winner(&self) -> bool {
        matches!(self, RawResult::Success { winner: true, .. })
    }
}

/// Flat record exactly as the server serialises it.
#[derive(Debug, Clone, Deserialize)]
struct WireResult {
    library: String,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    winner: bool,
    #[serde(default)]
    ops_per_second: Option<f64>,
    #[serde(default)]
    avg_time_per_parse: Option<f64>,
    #[serde(default)]
    memory_allocated: Option<f64>,
    #[serde(default)]
    allocs_per_op: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

impl From<WireResult> for RawResult {
    fn from(wire: WireResult) -> Self {
        if wire.success {
            return RawResult::Success {
                library: wire.library,
                winner: wire.winner,
                metrics: ParseMetrics {
                    ops_per_second: wire.ops_per_second,
                    avg_time_per_parse: wire.avg_time_per_parse,
                    memory_allocated: wire.memory_allocated,
                    allocs_per_op: wire.allocs_per_op,
                },
            };
        }

        if wire.winner {
            log::warn!(
                "[Models] Dropping winner flag on failed result for {}",
                wire.library
            );
        }
        RawResult::Failure {
            library: wire.library,
            error: wire.error,
        }
    }
}

/// Response body of a successful `POST /api/benchmark`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkResponse {
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub results: Vec<RawResult>,
    /// Message type the server actually benchmarked (echoed back)
    #[serde(default)]
    pub message_type: Option<String>,
}

/// Response body of `GET /api/libraries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrariesResponse {
    pub libraries: Vec<String>,
}

/// Error body returned with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// Status column of a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Winner,
    Success,
    Failed,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Winner => "Winner",
            StatusLabel::Success => "Success",
            StatusLabel::Failed => "Failed",
        }
    }
}

/// Display-ready table row, one per `RawResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub library: String,
    pub ops_per_sec: String,
    pub avg_time: String,
    pub memory: String,
    pub allocs: String,
    pub status: StatusLabel,
    /// `Some` only for failed rows; empty when the server gave no reason
    pub error_text: Option<String>,
}

/// Chart-ready bar series: parallel labels, values and highlight flags.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub highlight: Vec<bool>,
}

impl ChartSeries {
    pub fn push(&mut self, label: impl Into<String>, value: f64, highlight: bool) {
        self.labels.push(label.into());
        self.values.push(value);
        self.highlight.push(highlight);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, value, highlight)` tuples in order
    pub fn bars(&self) -> impl Iterator<Item = (&str, f64, bool)> + '_ {
        self.labels
            .iter()
            .zip(&self.values)
            .zip(&self.highlight)
            .map(|((label, value), highlight)| (label.as_str(), *value, *highlight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_detect() {
        assert_eq!(
            MessageType::detect("GET / HTTP/1.1\r\nHost: a\r\n\r\n"),
            Some(MessageType::Request)
        );
        assert_eq!(MessageType::detect("  OPTIONS * HTTP/1.1"), Some(MessageType::Request));
        assert_eq!(MessageType::detect("HTTP/1.1 200 OK\r\n"), Some(MessageType::Response));
        assert_eq!(MessageType::detect("GETX / HTTP/1.1"), None);
        assert_eq!(MessageType::detect(""), None);
    }

    #[test]
    fn test_request_serializes_snake_case() {
        let req = BenchmarkRequest {
            message: "GET / HTTP/1.1".to_string(),
            message_type: MessageType::Request,
            iterations: 1000,
            concurrency: 4,
            libraries: vec!["libA".to_string()],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message_type"], "request");
        assert_eq!(json["iterations"], 1000);
        assert_eq!(json["libraries"][0], "libA");
    }

    #[test]
    fn test_raw_result_decodes_success() {
        let json = r#"{"library":"net/http","total_time":5000,"avg_time_per_parse":1500,
            "ops_per_second":666666.6,"memory_allocated":4096,"allocs_per_op":12,
            "success":true,"winner":true}"#;
        let result: RawResult = serde_json::from_str(json).unwrap();
        assert!(result.is_winner());
        assert_eq!(result.library(), "net/http");
        match result {
            RawResult::Success { metrics, .. } => {
                assert_eq!(metrics.avg_time_per_parse, Some(1500.0));
                assert_eq!(metrics.memory_allocated, Some(4096.0));
            }
            RawResult::Failure { .. } => panic!("expected success"),
        }
    }

    #[test]
    fn test_raw_result_decodes_failure_and_drops_winner() {
        let json = r#"{"library":"libC","success":false,"winner":true,"error":"timeout"}"#;
        let result: RawResult = serde_json::from_str(json).unwrap();
        assert!(!result.is_success());
        assert!(!result.is_winner());
        assert_eq!(
            result,
            RawResult::Failure {
                library: "libC".to_string(),
                error: Some("timeout".to_string())
            }
        );
    }

    #[test]
    fn test_chart_series_bars() {
        let mut series = ChartSeries::default();
        series.push("a", 1.0, false);
        series.push("b", 2.0, true);
        let bars: Vec<_> = series.bars().collect();
        assert_eq!(bars, vec![("a", 1.0, false), ("b", 2.0, true)]);
        assert_eq!(series.len(), 2);
    }
}
