//! Submission State Management
//!
//! This module provides the request-lifecycle state machine used by the
//! benchmark orchestrator.
//!
//! **Architecture**:
//! - `SubmissionState`: Enum representing the discrete lifecycle states
//! - `SubmissionTracker`: Struct tracking the current state, its history and timing
//! - Transitions are validated; the orchestrator never jumps states directly

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::error::OrchestratorError;

/// Request lifecycle: `Idle -> Submitting -> {Succeeded, Failed} -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionState {
    /// Waiting for the user; the only state that accepts a submission
    Idle,

    /// Request sent, awaiting the server
    Submitting,

    /// Response received and presented
    Succeeded,

    /// Backend, network or presentation failure
    Failed,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        }
    }

    /// Get all valid transitions FROM this state.
    pub fn valid_next_states(&self) -> &'static [SubmissionState] {
        match self {
            SubmissionState::Idle => &[SubmissionState::Submitting],
            SubmissionState::Submitting => &[SubmissionState::Succeeded, SubmissionState::Failed],
            SubmissionState::Succeeded => &[SubmissionState::Idle],
            SubmissionState::Failed => &[SubmissionState::Idle],
        }
    }

    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        self.valid_next_states().contains(&next)
    }
}

/// Current state plus what happened to the previous submissions.
#[derive(Debug, Clone)]
pub struct SubmissionTracker {
    state: SubmissionState,
    /// Every state entered, oldest first (starts with `Idle`)
    history: Vec<SubmissionState>,
    submitted_at: Option<Instant>,
    last_duration: Option<Duration>,
    last_error: Option<String>,
}

impl Default for SubmissionTracker {
    fn default() -> Self {
        SubmissionTracker {
            state: SubmissionState::Idle,
            history: vec![SubmissionState::Idle],
            submitted_at: None,
            last_duration: None,
            last_error: None,
        }
    }
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn history(&self) -> &[SubmissionState] {
        &self.history
    }

    /// Round-trip time of the last completed submission
    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Attempt to move to `next`.
    pub fn transition_to(&mut self, next: SubmissionState) -> Result<(), OrchestratorError> {
        if !self.state.can_transition_to(next) {
            return Err(OrchestratorError::InvalidTransition {
                from: self.state.as_str(),
                to: next.as_str(),
            });
        }

        match next {
            SubmissionState::Submitting => {
                self.submitted_at = Some(Instant::now());
                self.last_error = None;
            }
            SubmissionState::Succeeded | SubmissionState::Failed => {
                self.last_duration = self.submitted_at.map(|t| t.elapsed());
            }
            SubmissionState::Idle => {}
        }

        log::debug!(
            "[Orchestrator] State {} -> {}",
            self.state.as_str(),
            next.as_str()
        );
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Record an error and move to `Failed`.
    pub fn record_error(&mut self, error: String) -> Result<(), OrchestratorError> {
        self.transition_to(SubmissionState::Failed)?;
        self.last_error = Some(error);
        Ok(())
    }
}
