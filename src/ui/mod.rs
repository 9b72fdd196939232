//! UI Module - egui front-end for the benchmark client
//!
//! `SharedView` implements the table, chart and status sinks the
//! orchestrator writes to; `ParseInsightApp` renders that state every frame.

pub mod app;
pub mod view;
pub mod widgets;

pub use app::{FormState, ParseInsightApp};
pub use view::{SharedView, ViewState};
