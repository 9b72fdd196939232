//! Results pipeline: normalization of raw benchmark results and their
//! presentation as a table plus throughput/latency bar charts.
//!
//! # Module Structure
//!
//! - `normalizer`: classifies results and formats table cells
//! - `presenter`: builds chart series and drives the output targets

pub mod normalizer;
pub mod presenter;

pub use normalizer::{classify, normalize, ChartEntry, NormalizedResults, PLACEHOLDER};
pub use presenter::{
    build_presentation, ChartHandle, ChartKind, ChartPalette, ChartRenderer, Presentation,
    ResultPresenter, TableSink,
};
