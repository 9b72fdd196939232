/// Main App and UI State Management
///
/// This module provides the eframe::App implementation for the benchmark
/// client: the job form, the library checklist, and the results section
/// (recommendation, table, throughput and latency charts). All logic is
/// delegated to the `BenchmarkOrchestrator`; this file only collects input
/// and draws `ViewState`.

use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::client::HttpBackend;
use crate::config::ClientConfig;
use crate::models::MessageType;
use crate::orchestrator::{BenchmarkForm, BenchmarkOrchestrator};
use crate::results::{ChartKind, ResultPresenter};
use crate::ui::view::{SharedView, ViewState};
use crate::ui::widgets;

const SAMPLE_REQUEST: &str = concat!(
    "GET /api/users?page=1 HTTP/1.1\r\n",
    "Host: example.com\r\n",
    "User-Agent: parse-insight\r\n",
    "Accept: application/json\r\n",
    "\r\n",
);

/// Form input that lives only in the UI
pub struct FormState {
    pub message: String,
    pub message_type: MessageType,
    pub iterations: u32,
    pub concurrency: u32,
    /// Catalog libraries with their checkbox state, in catalog order
    pub libraries: Vec<(String, bool)>,
}

impl FormState {
    fn from_config(config: &ClientConfig) -> Self {
        FormState {
            message: SAMPLE_REQUEST.to_string(),
            message_type: config.default_message_type,
            iterations: config.default_iterations,
            concurrency: config.default_concurrency,
            libraries: Vec::new(),
        }
    }

    /// Snapshot of the form as the orchestrator sees it
    pub fn to_form(&self) -> BenchmarkForm {
        BenchmarkForm {
            message: self.message.clone(),
            message_type: self.message_type,
            iterations: self.iterations,
            concurrency: self.concurrency,
            libraries: self
                .libraries
                .iter()
                .filter(|(_, checked)| *checked)
                .map(|(name, _)| name.clone())
                .collect(),
        }
    }
}

pub struct ParseInsightApp {
    form: FormState,
    view: SharedView,
    orchestrator: Arc<Mutex<BenchmarkOrchestrator>>,
    runtime: tokio::runtime::Handle,
}

impl ParseInsightApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &ClientConfig,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let view = SharedView::new(Some(cc.egui_ctx.clone()));
        let backend = Arc::new(HttpBackend::new(config.server_url.clone()));
        let presenter = ResultPresenter::new(Box::new(view.clone()), Box::new(view.clone()));
        let orchestrator = BenchmarkOrchestrator::new(backend, presenter, Box::new(view.clone()));

        let app = ParseInsightApp {
            form: FormState::from_config(config),
            view,
            orchestrator: Arc::new(Mutex::new(orchestrator)),
            runtime,
        };
        app.spawn_catalog_load();
        app
    }

    fn spawn_catalog_load(&self) {
        let orchestrator = Arc::clone(&self.orchestrator);
        let view = self.view.clone();
        self.runtime.spawn(async move {
            let fetch = orchestrator.lock().await.load_libraries();
            let libraries = fetch.await;
            view.update(|state| state.pending_catalog = Some(libraries));
        });
    }

    fn spawn_submit(&self) {
        if !self.view.try_begin_submit() {
            log::debug!("[UI] Submit ignored, a run is already pending");
            return;
        }

        let orchestrator = Arc::clone(&self.orchestrator);
        let view = self.view.clone();
        let form = self.form.to_form();
        self.runtime.spawn(async move {
            let result = orchestrator.lock().await.submit(&form).await;
            if let Err(e) = result {
                log::debug!("[UI] Submission ended with error: {}", e);
            }
            // Validation failures return before the orchestrator touches the button
            view.finish_submit();
        });
    }

    fn merge_catalog(&mut self) {
        let catalog = self.view.update(|state| state.pending_catalog.take()).flatten();
        if let Some(libraries) = catalog {
            // Every library starts checked
            self.form.libraries = libraries.into_iter().map(|name| (name, true)).collect();
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui, state: &ViewState) {
        ui.heading("HTTP Message");
        ui.add(
            egui::TextEdit::multiline(&mut self.form.message)
                .code_editor()
                .desired_rows(8)
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Message type")
                .selected_text(self.form.message_type.as_str())
                .show_ui(ui, |ui| {
                    let selected = &mut self.form.message_type;
                    ui.selectable_value(selected, MessageType::Request, "request");
                    ui.selectable_value(selected, MessageType::Response, "response");
                });
            if ui.button("Detect").clicked() {
                match MessageType::detect(&self.form.message) {
                    Some(detected) => self.form.message_type = detected,
                    None => log::info!("[UI] Could not detect message type from first line"),
                }
            }

            ui.separator();
            ui.label("Iterations");
            ui.add(egui::DragValue::new(&mut self.form.iterations).clamp_range(1..=10_000_000));
            ui.label("Concurrency");
            ui.add(egui::DragValue::new(&mut self.form.concurrency).clamp_range(1..=100));
        });

        ui.add_space(6.0);
        ui.label(egui::RichText::new("Parser libraries").strong());
        ui.horizontal_wrapped(|ui| {
            if self.form.libraries.is_empty() {
                ui.label("No libraries available");
            }
            for (name, checked) in self.form.libraries.iter_mut() {
                ui.checkbox(checked, name.as_str());
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let run = ui.add_enabled(state.submit_enabled, egui::Button::new("Run Benchmark"));
            if run.clicked() {
                self.spawn_submit();
            }
            if state.loading {
                ui.spinner();
                ui.label("Running benchmark...");
            }
        });
    }

    fn render_results(&self, ui: &mut egui::Ui, state: &ViewState) {
        let heading = ui.heading("Results");
        if state.scroll_requested {
            heading.scroll_to_me(Some(egui::Align::TOP));
            self.view.update(|s| s.scroll_requested = false);
        }

        ui.label(egui::RichText::new(&state.recommendation).italics());
        ui.add_space(6.0);

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(120.0))
            .columns(Column::auto().at_least(90.0), 4)
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["Library", "Ops/sec", "Avg Time", "Memory", "Allocs/op", "Status"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in &state.rows {
                    body.row(22.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.strong(row.library.as_str());
                        });
                        for cell in [&row.ops_per_sec, &row.avg_time, &row.memory, &row.allocs] {
                            table_row.col(|ui| {
                                ui.monospace(cell.as_str());
                            });
                        }
                        table_row.col(|ui| {
                            ui.horizontal(|ui| {
                                widgets::status_badge(ui, row.status);
                                let error = row.error_text.as_deref().unwrap_or_default();
                                if !error.is_empty() {
                                    ui.small(error);
                                }
                            });
                        });
                    });
                }
            });

        ui.add_space(12.0);
        for kind in ChartKind::ALL {
            if let Some(series) = state.chart(kind) {
                widgets::bar_chart(ui, kind, series);
                ui.add_space(12.0);
            }
        }
    }

    fn render_notification(&self, ctx: &egui::Context, state: &ViewState) {
        let Some(message) = &state.notification else {
            return;
        };

        egui::Window::new("ParseInsight")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message.as_str());
                if ui.button("OK").clicked() {
                    self.view.update(|s| s.notification = None);
                }
            });
    }
}

impl eframe::App for ParseInsightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.merge_catalog();
        let state = self.view.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.render_form(ui, &state);
                    if state.results_visible {
                        ui.separator();
                        self.render_results(ui, &state);
                    }
                });
        });

        self.render_notification(ctx, &state);
    }
}
