//! Benchmark request orchestration.
//!
//! Collects the user's form input, validates the minimal preconditions,
//! submits the job through a `BenchmarkBackend` and hands the response to the
//! `ResultPresenter`. UI chrome (loading indicator, submit button, results
//! section) is driven through an injected `StatusSink`.
//!
//! Whatever happens after validation passes, the loading indicator is hidden,
//! the submit control re-enabled and the state returned to `Idle` before
//! `submit` returns.

pub mod state;

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::client::BenchmarkBackend;
use crate::error::{OrchestratorError, ValidationError};
use crate::models::{BenchmarkRequest, MessageType};
use crate::results::{Presentation, ResultPresenter};

pub use state::{SubmissionState, SubmissionTracker};

/// UI chrome the orchestrator drives around a submission.
pub trait StatusSink: Send {
    /// Show a blocking, user-facing message (validation or backend error)
    fn notify(&mut self, message: &str);
    fn set_loading(&mut self, loading: bool);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_results_visible(&mut self, visible: bool);
    fn scroll_to_results(&mut self);
}

/// Raw user input, as collected from the form controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkForm {
    pub message: String,
    pub message_type: MessageType,
    pub iterations: u32,
    pub concurrency: u32,
    /// Checked libraries, in catalog order
    pub libraries: Vec<String>,
}

impl Default for BenchmarkForm {
    fn default() -> Self {
        BenchmarkForm {
            message: String::new(),
            message_type: MessageType::Request,
            iterations: 10_000,
            concurrency: 1,
            libraries: Vec::new(),
        }
    }
}

impl BenchmarkForm {
    /// Validate the form and build the request that will be sent.
    ///
    /// The message is sent trimmed of surrounding whitespace.
    pub fn to_request(&self) -> Result<BenchmarkRequest, ValidationError> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        if self.libraries.is_empty() {
            return Err(ValidationError::NoLibraries);
        }
        if self.iterations == 0 {
            return Err(ValidationError::ZeroIterations);
        }
        if self.concurrency == 0 {
            return Err(ValidationError::ZeroConcurrency);
        }

        Ok(BenchmarkRequest {
            message: message.to_string(),
            message_type: self.message_type,
            iterations: self.iterations,
            concurrency: self.concurrency,
            libraries: self.libraries.clone(),
        })
    }
}

/// Drives one benchmark submission at a time.
pub struct BenchmarkOrchestrator {
    backend: Arc<dyn BenchmarkBackend>,
    presenter: ResultPresenter,
    status: Box<dyn StatusSink>,
    tracker: SubmissionTracker,
}

impl BenchmarkOrchestrator {
    pub fn new(
        backend: Arc<dyn BenchmarkBackend>,
        presenter: ResultPresenter,
        status: Box<dyn StatusSink>,
    ) -> Self {
        BenchmarkOrchestrator {
            backend,
            presenter,
            status,
            tracker: SubmissionTracker::new(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.tracker.state()
    }

    pub fn tracker(&self) -> &SubmissionTracker {
        &self.tracker
    }

    pub fn presenter(&self) -> &ResultPresenter {
        &self.presenter
    }

    /// Fetch the selectable libraries. Failures are logged and yield an
    /// empty list; submitting then fails validation.
    ///
    /// The returned future does not borrow the orchestrator, so callers can
    /// release their lock before awaiting it.
    pub fn load_libraries(&self) -> BoxFuture<'static, Vec<String>> {
        let fetch = self.backend.fetch_libraries();
        async move {
            match fetch.await {
                Ok(libraries) => {
                    log::info!("[Orchestrator] Loaded {} parser libraries", libraries.len());
                    libraries
                }
                Err(e) => {
                    log::error!("[Orchestrator] Failed to load libraries: {}", e);
                    Vec::new()
                }
            }
        }
        .boxed()
    }

    /// Validate, submit and present one benchmark run.
    ///
    /// Validation failures are reported through the status sink without any
    /// network call and leave the state `Idle`.
    pub async fn submit(
        &mut self,
        form: &BenchmarkForm,
    ) -> Result<Presentation, OrchestratorError> {
        if self.tracker.state() != SubmissionState::Idle {
            return Err(OrchestratorError::Busy);
        }

        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => {
                log::warn!("[Orchestrator] Rejected submission: {}", e);
                self.status.notify(&e.user_message());
                return Err(e.into());
            }
        };

        self.tracker.transition_to(SubmissionState::Submitting)?;
        self.status.set_loading(true);
        self.status.set_submit_enabled(false);
        self.status.set_results_visible(false);

        let outcome = self.execute(request).await;

        self.status.set_loading(false);
        self.status.set_submit_enabled(true);
        if let Err(e) = self.tracker.transition_to(SubmissionState::Idle) {
            log::error!("[Orchestrator] Could not return to idle: {}", e);
            self.tracker = SubmissionTracker::new();
        }

        outcome
    }

    async fn execute(
        &mut self,
        request: BenchmarkRequest,
    ) -> Result<Presentation, OrchestratorError> {
        log::info!(
            "[Orchestrator] Submitting {} message to {:?}",
            request.message_type,
            request.libraries
        );

        let response = match self.backend.run_benchmark(request).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("[Orchestrator] Benchmark failed: {}", e);
                self.status.notify(&e.user_message());
                self.tracker.record_error(e.to_string())?;
                return Err(e.into());
            }
        };

        match self.presenter.present(&response) {
            Ok(presentation) => {
                self.tracker.transition_to(SubmissionState::Succeeded)?;
                self.status.set_results_visible(true);
                self.status.scroll_to_results();
                log::info!(
                    "[Orchestrator] Benchmark complete in {:?}: {}",
                    self.tracker.last_duration().unwrap_or_default(),
                    presentation.recommendation
                );
                Ok(presentation)
            }
            Err(e) => {
                log::error!("[Orchestrator] Presenting results failed: {}", e);
                let err = OrchestratorError::from(e);
                self.status.notify(&err.user_message());
                self.tracker.record_error(err.to_string())?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BenchmarkForm {
        BenchmarkForm {
            message: "  GET / HTTP/1.1\r\nHost: example.com\r\n\r\n  ".to_string(),
            message_type: MessageType::Request,
            iterations: 1000,
            concurrency: 4,
            libraries: vec!["libA".to_string(), "libB".to_string()],
        }
    }

    #[test]
    fn test_to_request_trims_message() {
        let request = form().to_request().unwrap();
        assert_eq!(request.message, "GET / HTTP/1.1\r\nHost: example.com");
        assert_eq!(request.libraries, vec!["libA", "libB"]);
        assert_eq!(request.concurrency, 4);
    }

    #[test]
    fn test_to_request_validation() {
        let mut blank = form();
        blank.message = " \n\t ".to_string();
        assert_eq!(blank.to_request(), Err(ValidationError::EmptyMessage));

        let mut no_libs = form();
        no_libs.libraries.clear();
        assert_eq!(no_libs.to_request(), Err(ValidationError::NoLibraries));

        let mut zero_iter = form();
        zero_iter.iterations = 0;
        assert_eq!(zero_iter.to_request(), Err(ValidationError::ZeroIterations));

        let mut zero_conc = form();
        zero_conc.concurrency = 0;
        assert_eq!(zero_conc.to_request(), Err(ValidationError::ZeroConcurrency));
    }

    #[test]
    fn test_empty_message_reported_before_libraries() {
        let blank = BenchmarkForm::default();
        assert_eq!(blank.to_request(), Err(ValidationError::EmptyMessage));
    }
}
