//! Result presentation: turns a `BenchmarkResponse` into table rows and the
//! throughput/latency chart series, and owns the live chart instances.
//!
//! **Ownership**: the presenter holds at most one `ChartHandle` per
//! `ChartKind`. Every redraw destroys the previous handle before asking the
//! renderer for a new one, so two charts of the same kind never coexist.

use crate::error::PresentError;
use crate::format::{format_count, format_micros};
use crate::models::{BenchmarkResponse, ChartSeries, DisplayRow};
use crate::results::normalizer::{normalize, ChartEntry, PLACEHOLDER};

/// The two comparison charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Operations per second, higher is better
    Throughput,
    /// Average time per parse in microseconds, lower is better
    Latency,
}

/// RGB bar colours for one chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub highlight: [u8; 3],
    pub normal: [u8; 3],
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Throughput, ChartKind::Latency];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Throughput => "Operations per Second (Higher is Better)",
            ChartKind::Latency => "Average Time per Parse (Lower is Better)",
        }
    }

    pub fn dataset_label(&self) -> &'static str {
        match self {
            ChartKind::Throughput => "Operations per Second",
            ChartKind::Latency => "Average Time per Parse (μs)",
        }
    }

    /// Value-axis tick label
    pub fn axis_label(&self, value: f64) -> String {
        match self {
            ChartKind::Throughput => {
                format_count(value).unwrap_or_else(|_| PLACEHOLDER.to_string())
            }
            ChartKind::Latency => format_micros(value),
        }
    }

    /// Winner bars are amber (throughput) or green (latency).
    pub fn palette(&self) -> ChartPalette {
        match self {
            ChartKind::Throughput => ChartPalette {
                highlight: [251, 191, 36],
                normal: [59, 130, 246],
            },
            ChartKind::Latency => ChartPalette {
                highlight: [16, 185, 129],
                normal: [139, 92, 246],
            },
        }
    }
}

/// Opaque identifier of a chart instance created by a `ChartRenderer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChartHandle(pub u64);

/// Output target for the results table.
pub trait TableSink: Send {
    fn render_table(
        &mut self,
        recommendation: &str,
        rows: &[DisplayRow],
    ) -> Result<(), PresentError>;
}

/// Bar chart rendering engine.
pub trait ChartRenderer: Send {
    /// Draw a new chart and return its handle
    fn draw(
        &mut self,
        kind: ChartKind,
        series: &ChartSeries,
    ) -> Result<ChartHandle, PresentError>;

    /// Tear down a chart previously returned by `draw`
    fn destroy(&mut self, handle: ChartHandle);
}

/// Everything derived from one response.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub recommendation: String,
    pub rows: Vec<DisplayRow>,
    pub throughput: ChartSeries,
    pub latency: ChartSeries,
}

impl Presentation {
    pub fn series(&self, kind: ChartKind) -> &ChartSeries {
        match kind {
            ChartKind::Throughput => &self.throughput,
            ChartKind::Latency => &self.latency,
        }
    }

    pub fn has_charts(&self) -> bool {
        !self.throughput.is_empty()
    }
}

fn build_series(entries: &[ChartEntry<'_>]) -> (ChartSeries, ChartSeries) {
    let mut throughput = ChartSeries::default();
    let mut latency = ChartSeries::default();

    for entry in entries {
        // Missing metrics chart as zero so both series keep the same bars
        throughput.push(
            entry.library,
            entry.metrics.ops_per_second.unwrap_or(0.0),
            entry.winner,
        );
        latency.push(
            entry.library,
            entry
                .metrics
                .avg_time_per_parse
                .map(|ns| ns / 1_000.0)
                .unwrap_or(0.0),
            entry.winner,
        );
    }

    (throughput, latency)
}

/// Build table rows and chart series from a response without touching any sink.
pub fn build_presentation(response: &BenchmarkResponse) -> Presentation {
    let normalized = normalize(&response.results);
    let (throughput, latency) = build_series(&normalized.chart_eligible);

    Presentation {
        recommendation: response.recommendation.clone(),
        rows: normalized.rows,
        throughput,
        latency,
    }
}

/// Pushes presentations to the injected table and chart targets.
pub struct ResultPresenter {
    table: Box<dyn TableSink>,
    renderer: Box<dyn ChartRenderer>,
    throughput_chart: Option<ChartHandle>,
    latency_chart: Option<ChartHandle>,
}

impl ResultPresenter {
    pub fn new(table: Box<dyn TableSink>, renderer: Box<dyn ChartRenderer>) -> Self {
        ResultPresenter {
            table,
            renderer,
            throughput_chart: None,
            latency_chart: None,
        }
    }

    /// Handle of the live chart of `kind`, if one is drawn
    pub fn active_chart(&self, kind: ChartKind) -> Option<ChartHandle> {
        match kind {
            ChartKind::Throughput => self.throughput_chart,
            ChartKind::Latency => self.latency_chart,
        }
    }

    fn slot(&mut self, kind: ChartKind) -> &mut Option<ChartHandle> {
        match kind {
            ChartKind::Throughput => &mut self.throughput_chart,
            ChartKind::Latency => &mut self.latency_chart,
        }
    }

    fn release_chart(&mut self, kind: ChartKind) {
        if let Some(old) = self.slot(kind).take() {
            log::debug!("[Presenter] Destroying {:?} chart {:?}", kind, old);
            self.renderer.destroy(old);
        }
    }

    fn replace_chart(&mut self, kind: ChartKind, series: &ChartSeries) -> Result<(), PresentError> {
        self.release_chart(kind);
        let handle = self.renderer.draw(kind, series)?;
        *self.slot(kind) = Some(handle);
        Ok(())
    }

    /// Render a response: table first, then both charts.
    ///
    /// With no successful results the renderer is not asked to draw; any
    /// charts from a previous run are released.
    pub fn present(&mut self, response: &BenchmarkResponse) -> Result<Presentation, PresentError> {
        let presentation = build_presentation(response);

        self.table
            .render_table(&presentation.recommendation, &presentation.rows)?;

        if presentation.has_charts() {
            for kind in ChartKind::ALL {
                self.replace_chart(kind, presentation.series(kind))?;
            }
        } else {
            log::info!("[Presenter] No successful results, skipping charts");
            for kind in ChartKind::ALL {
                self.release_chart(kind);
            }
        }

        log::info!(
            "[Presenter] Rendered {} rows, {} chart bars",
            presentation.rows.len(),
            presentation.throughput.len()
        );
        Ok(presentation)
    }
}
