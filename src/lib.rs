//! ParseInsight client
//!
//! This crate drives an HTTP-parser benchmarking server: it submits a
//! benchmark job, then normalizes and presents the per-library results as a
//! table plus throughput and latency bar charts.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Wire types and display types
//! - **format**: Unit formatting (counts, durations, byte sizes)
//! - **results**: Result normalization and presentation
//! - **client**: Benchmark server client (reqwest)
//! - **orchestrator**: Submission state machine and validation
//! - **config**: Client settings persistence
//! - **log_collector**: `log` backend writing to ./logs
//! - **ui**: egui front-end implementing the output sinks

// Core foundational modules
pub mod error;
pub mod models;

pub mod format;
pub mod results;

pub mod client;
pub mod orchestrator;

pub mod config;
pub mod log_collector;

pub mod ui;

// Re-export the log crate for macro usage
pub use log;

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use error::{
    ApiError, ConfigError, FormatError, OrchestratorError, PresentError, Result, ValidationError,
};

pub use models::{
    BenchmarkRequest, BenchmarkResponse, ChartSeries, DisplayRow, MessageType, ParseMetrics,
    RawResult, StatusLabel,
};

pub use client::{BenchmarkBackend, HttpBackend};
pub use config::ClientConfig;
pub use log_collector::{flush_all_logs, LogCollector};
pub use orchestrator::{BenchmarkForm, BenchmarkOrchestrator, StatusSink, SubmissionState};
pub use results::{ChartHandle, ChartKind, ChartRenderer, Presentation, ResultPresenter, TableSink};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_enum_variants_accessible() {
        assert_eq!(StatusLabel::Winner, StatusLabel::Winner);
        assert_eq!(SubmissionState::Idle, SubmissionState::Idle);
        assert_eq!(MessageType::default(), MessageType::Request);
    }
}
