//! Decoupled logging pipeline for the ParseInsight client.
//!
//! # Architecture
//!
//! ```text
//! log::info!() / warn!() / error!()
//!     |
//! [LogCollector] (log::Log impl, non-blocking)
//!     | (crossbeam unbounded channel)
//!     v
//! [Disk writer thread]
//!     |
//! logs/parse-insight-<ts>.log
//! ```
//!
//! The writer is a plain OS thread, so it keeps draining regardless of which
//! tokio runtime (or none) the caller runs on.

use chrono::Local;
use crossbeam_channel::{unbounded, Sender};
use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Collector installed as the global logger, kept for `flush_all_logs`.
static GLOBAL_COLLECTOR: OnceCell<LogCollector> = OnceCell::new();

/// Internal log line or special marker
enum LogMessage {
    Line(LogLine),
    /// Flush marker with channel sender to signal completion
    Flush(std::sync::mpsc::Sender<()>),
}

/// A log line with metadata
#[derive(Clone, Debug)]
pub struct LogLine {
    pub message: String,
    /// Wall-clock time the line was produced (HH:MM:SS.mmm)
    pub timestamp: String,
}

impl LogLine {
    pub fn new(message: String) -> Self {
        LogLine {
            message,
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }
}

/// Get the global logs path relative to the current working directory: ./logs
pub fn get_global_logs_path() -> Result<PathBuf, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Failed to get current working directory: {}", e))?;
    Ok(cwd.join("logs"))
}

/// Ensure the logs directory exists
pub fn ensure_logs_dir_exists(log_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| format!("Failed to create logs directory: {}", e))
}

/// Logger that hands lines to a background disk writer.
#[derive(Clone)]
pub struct LogCollector {
    tx: Sender<LogMessage>,
    session_path: PathBuf,
    level: LevelFilter,
}

impl LogCollector {
    /// Create a collector writing to a fresh timestamped file in `log_dir`.
    pub fn new(log_dir: PathBuf, level: LevelFilter) -> Result<Self, String> {
        ensure_logs_dir_exists(&log_dir)?;

        let filename = format!("parse-insight-{}.log", Local::now().format("%Y%m%d_%H%M%S"));
        let session_path = log_dir.join(filename);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&session_path)
            .map_err(|e| format!("Failed to open log file {}: {}", session_path.display(), e))?;

        let (tx, rx) = unbounded::<LogMessage>();

        std::thread::spawn(move || {
            while let Ok(msg) = rx.recv() {
                match msg {
                    LogMessage::Line(line) => {
                        let formatted = format!("[{}] {}\n", line.timestamp, line.message);
                        if let Err(e) = file.write_all(formatted.as_bytes()) {
                            eprintln!("[Log] Failed to write log line: {}", e);
                        }
                    }
                    LogMessage::Flush(done) => {
                        let _ = file.flush();
                        let _ = done.send(());
                    }
                }
            }
            eprintln!("[Log] Disk writer thread shutting down");
        });

        Ok(LogCollector {
            tx,
            session_path,
            level,
        })
    }

    /// File this collector writes to
    pub fn session_log_path(&self) -> &Path {
        &self.session_path
    }

    /// Queue a line for the disk writer (never blocks)
    pub fn log_str(&self, message: impl Into<String>) {
        let _ = self.tx.send(LogMessage::Line(LogLine::new(message.into())));
    }

    /// Block until every line queued before this call is on disk.
    pub fn wait_for_empty(&self) -> Result<(), String> {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        self.tx
            .send(LogMessage::Flush(tx))
            .map_err(|e| format!("Failed to send flush marker: {}", e))?;
        rx.recv()
            .map_err(|e| format!("Flush signal interrupted: {}", e))
    }

    /// Install a clone of this collector as the global `log` backend.
    pub fn install(&self) -> Result<(), String> {
        GLOBAL_COLLECTOR
            .set(self.clone())
            .map_err(|_| "Logger already installed".to_string())?;
        log::set_boxed_logger(Box::new(self.clone()))
            .map_err(|e| format!("Failed to install logger: {}", e))?;
        log::set_max_level(self.level);
        Ok(())
    }
}

/// Wires all log::info!(), log::warn!(), log::error!() calls into LogCollector
impl Log for LogCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.log_str(format!("[{}] {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {
        let _ = self.wait_for_empty();
    }
}

/// Create a session log in `log_dir` and install it as the global logger.
///
/// Every failure is returned, never fatal: the caller decides whether to run
/// without a log file.
pub fn init_logging_in(log_dir: PathBuf, level: LevelFilter) -> Result<LogCollector, String> {
    let collector = LogCollector::new(log_dir, level)?;
    collector.install()?;
    Ok(collector)
}

/// `init_logging_in` for ./logs
pub fn init_global_logging(level: LevelFilter) -> Result<LogCollector, String> {
    init_logging_in(get_global_logs_path()?, level)
}

/// Flush the globally installed collector, if any.
pub fn flush_all_logs() {
    if let Some(collector) = GLOBAL_COLLECTOR.get() {
        if let Err(e) = collector.wait_for_empty() {
            eprintln!("[Log] Flush failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_reach_disk_after_flush() {
        let dir = tempfile::TempDir::new().unwrap();
        let collector = LogCollector::new(dir.path().to_path_buf(), LevelFilter::Info).unwrap();

        collector.log_str("[Orchestrator] first");
        collector.log_str("[Orchestrator] second");
        collector.wait_for_empty().unwrap();

        let content = std::fs::read_to_string(collector.session_log_path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[Orchestrator] first"));
        assert!(lines[1].ends_with("[Orchestrator] second"));
    }

    #[test]
    fn test_init_logging_reports_unusable_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let not_a_dir = dir.path().join("logs");
        std::fs::write(&not_a_dir, "occupied").unwrap();

        let result = init_logging_in(not_a_dir, LevelFilter::Info);
        assert!(result.is_err());
        assert!(GLOBAL_COLLECTOR.get().is_none());
    }

    #[test]
    fn test_level_filtering() {
        let dir = tempfile::TempDir::new().unwrap();
        let collector = LogCollector::new(dir.path().to_path_buf(), LevelFilter::Warn).unwrap();

        let info = Metadata::builder().level(log::Level::Info).build();
        let error = Metadata::builder().level(log::Level::Error).build();
        assert!(!collector.enabled(&info));
        assert!(collector.enabled(&error));
    }
}
