//! Unified error type hierarchy for ParseInsight
//!
//! Provides structured error handling with ValidationError, ApiError, FormatError,
//! PresentError, ConfigError and the OrchestratorError umbrella.

use std::io;
use thiserror::Error;

/// Benchmark form validation errors, raised before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("HTTP message cannot be empty")]
    EmptyMessage,

    #[error("No parser library selected")]
    NoLibraries,

    #[error("Iterations must be a positive integer")]
    ZeroIterations,

    #[error("Concurrency must be a positive integer")]
    ZeroConcurrency,
}

impl ValidationError {
    /// Get a user-facing error message suitable for UI display
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::EmptyMessage => "Please enter an HTTP message".to_string(),
            ValidationError::NoLibraries => {
                "Please select at least one parser library".to_string()
            }
            ValidationError::ZeroIterations => "Iterations must be at least 1".to_string(),
            ValidationError::ZeroConcurrency => "Concurrency must be at least 1".to_string(),
        }
    }
}

/// Fallback shown when the backend rejects a benchmark without an `error` field.
pub const BACKEND_FALLBACK_MESSAGE: &str = "Benchmark failed";

/// Backend communication errors.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// Transport failure (connection refused, DNS, TLS...)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status. `message` is the server-supplied `error` field, if any.
    #[error(
        "Backend returned {status}: {}",
        .message.as_deref().unwrap_or(BACKEND_FALLBACK_MESSAGE)
    )]
    Backend { status: u16, message: Option<String> },

    /// Success status, but the body was not the expected JSON shape
    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Get a user-facing error message suitable for UI display
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(msg) => format!("Error: {}", msg),
            ApiError::Backend { message, .. } => format!(
                "Error: {}",
                message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(BACKEND_FALLBACK_MESSAGE)
            ),
            ApiError::Decode(msg) => format!("Error: {}", msg),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Unit formatting failures. Never shown to the user directly: the
/// normalizer renders them as the `-` placeholder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("value is not finite: {0}")]
    NonFinite(f64),

    #[error("value must not be negative: {0}")]
    Negative(f64),

    #[error("value {0} exceeds the largest supported unit")]
    OutOfRange(f64),
}

/// Failures reported by the output targets while presenting results.
#[derive(Error, Debug, Clone)]
pub enum PresentError {
    #[error("Table rendering failed: {0}")]
    Table(String),

    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

/// Configuration file parsing and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during config operations: {0}")]
    IoError(#[from] io::Error),
}

/// Errors produced by a benchmark submission.
#[derive(Error, Debug, Clone)]
pub enum OrchestratorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Present(#[from] PresentError),

    /// A submission is already in flight
    #[error("A benchmark is already running")]
    Busy,

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
}

impl OrchestratorError {
    /// Get a user-facing error message suitable for UI display
    pub fn user_message(&self) -> String {
        match self {
            OrchestratorError::Validation(e) => e.user_message(),
            OrchestratorError::Api(e) => e.user_message(),
            OrchestratorError::Present(e) => format!("Error: {}", e),
            OrchestratorError::Busy => "A benchmark is already running".to_string(),
            OrchestratorError::InvalidTransition { .. } => format!("Internal error: {}", self),
        }
    }
}

/// Top-level result type for the application entry point.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
