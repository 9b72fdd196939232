//! Shared view state written by the orchestrator's sinks and read by the
//! egui render loop.
//!
//! `SharedView` is cheap to clone; every clone points at the same
//! `Arc<Mutex<ViewState>>`. Sink calls arrive from tokio tasks and request a
//! repaint so the next frame picks them up.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PresentError;
use crate::models::{ChartSeries, DisplayRow};
use crate::orchestrator::StatusSink;
use crate::results::{ChartHandle, ChartKind, ChartRenderer, TableSink};

/// Everything the results screen shows.
#[derive(Clone, Debug)]
pub struct ViewState {
    pub loading: bool,
    pub submit_enabled: bool,
    pub results_visible: bool,
    /// Set by `scroll_to_results`, consumed by the next frame
    pub scroll_requested: bool,
    /// Pending user-facing message (shown as a modal)
    pub notification: Option<String>,
    pub recommendation: String,
    pub rows: Vec<DisplayRow>,
    /// Live chart instances keyed by handle
    pub charts: BTreeMap<ChartHandle, (ChartKind, ChartSeries)>,
    next_chart_id: u64,
    /// Library catalog delivered by the startup fetch, not yet merged into the form
    pub pending_catalog: Option<Vec<String>>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            loading: false,
            submit_enabled: true,
            results_visible: false,
            scroll_requested: false,
            notification: None,
            recommendation: String::new(),
            rows: Vec::new(),
            charts: BTreeMap::new(),
            next_chart_id: 0,
            pending_catalog: None,
        }
    }
}

impl ViewState {
    /// The live chart of `kind`, if any
    pub fn chart(&self, kind: ChartKind) -> Option<&ChartSeries> {
        self.charts
            .values()
            .find(|(k, _)| *k == kind)
            .map(|(_, series)| series)
    }
}

/// Handle shared between the UI thread and the orchestrator task.
#[derive(Clone, Default)]
pub struct SharedView {
    state: Arc<Mutex<ViewState>>,
    ctx: Option<egui::Context>,
}

impl SharedView {
    pub fn new(ctx: Option<egui::Context>) -> Self {
        SharedView {
            state: Arc::new(Mutex::new(ViewState::default())),
            ctx,
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, ViewState>> {
        match self.state.lock() {
            Ok(guard) => Some(guard),
            Err(e) => {
                log::error!("[View] State lock poisoned: {}", e);
                None
            }
        }
    }

    fn repaint(&self) {
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }

    /// Apply `f` to the state and request a repaint
    pub fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> Option<R> {
        let result = self.lock().map(|mut state| f(&mut state));
        self.repaint();
        result
    }

    /// Claim the submit control for one run. Returns `false` if it is
    /// already disabled.
    pub fn try_begin_submit(&self) -> bool {
        self.update(|state| {
            if !state.submit_enabled {
                return false;
            }
            state.submit_enabled = false;
            true
        })
        .unwrap_or(false)
    }

    /// Give the submit control back once a run has finished, whatever the outcome
    pub fn finish_submit(&self) {
        self.update(|state| state.submit_enabled = true);
    }

    /// Copy of the current state for rendering one frame
    pub fn snapshot(&self) -> ViewState {
        self.lock().map(|state| state.clone()).unwrap_or_default()
    }
}

impl TableSink for SharedView {
    fn render_table(
        &mut self,
        recommendation: &str,
        rows: &[DisplayRow],
    ) -> Result<(), PresentError> {
        self.update(|state| {
            state.recommendation = recommendation.to_string();
            state.rows = rows.to_vec();
        })
        .ok_or_else(|| PresentError::Table("view state unavailable".to_string()))
    }
}

impl ChartRenderer for SharedView {
    fn draw(
        &mut self,
        kind: ChartKind,
        series: &ChartSeries,
    ) -> Result<ChartHandle, PresentError> {
        self.update(|state| {
            state.next_chart_id += 1;
            let handle = ChartHandle(state.next_chart_id);
            state.charts.insert(handle, (kind, series.clone()));
            handle
        })
        .ok_or_else(|| PresentError::Chart("view state unavailable".to_string()))
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.update(|state| state.charts.remove(&handle));
    }
}

impl StatusSink for SharedView {
    fn notify(&mut self, message: &str) {
        self.update(|state| state.notification = Some(message.to_string()));
    }

    fn set_loading(&mut self, loading: bool) {
        self.update(|state| state.loading = loading);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.update(|state| state.submit_enabled = enabled);
    }

    fn set_results_visible(&mut self, visible: bool) {
        self.update(|state| state.results_visible = visible);
    }

    fn scroll_to_results(&mut self) {
        self.update(|state| state.scroll_requested = true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_store_replaces_by_handle() {
        let mut view = SharedView::new(None);
        let mut series = ChartSeries::default();
        series.push("libA", 1.0, true);

        let first = view.draw(ChartKind::Throughput, &series).unwrap();
        view.destroy(first);
        let second = view.draw(ChartKind::Throughput, &series).unwrap();

        let snapshot = view.snapshot();
        assert_ne!(first, second);
        assert_eq!(snapshot.charts.len(), 1);
        assert_eq!(snapshot.chart(ChartKind::Throughput), Some(&series));
        assert_eq!(snapshot.chart(ChartKind::Latency), None);
    }

    #[test]
    fn test_submit_claimed_once_until_finished() {
        let view = SharedView::new(None);

        assert!(view.try_begin_submit());
        assert!(!view.snapshot().submit_enabled);
        // Double click before the run starts
        assert!(!view.try_begin_submit());

        view.finish_submit();
        assert!(view.snapshot().submit_enabled);
        assert!(view.try_begin_submit());
    }

    #[test]
    fn test_status_sink_updates_state() {
        let mut view = SharedView::new(None);
        view.set_loading(true);
        view.set_submit_enabled(false);
        view.notify("Please enter an HTTP message");

        let snapshot = view.snapshot();
        assert!(snapshot.loading);
        assert!(!snapshot.submit_enabled);
        assert_eq!(
            snapshot.notification.as_deref(),
            Some("Please enter an HTTP message")
        );
    }
}
