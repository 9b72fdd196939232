use parse_insight::config::{get_global_settings_path, load_or_default, ClientConfig};
use parse_insight::log_collector::init_global_logging;
use parse_insight::ui::ParseInsightApp;

#[tokio::main]
async fn main() -> parse_insight::Result<()> {
    // =========================================================================
    // SETTINGS
    // =========================================================================
    let config = match get_global_settings_path().and_then(|path| load_or_default(&path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[Main] WARNING: Settings unusable ({}), using defaults", e);
            ClientConfig::default()
        }
    };

    // =========================================================================
    // LOGGING - before anything that logs
    // =========================================================================
    // Logging is best effort: any failure here falls through to the UI
    match init_global_logging(config.level_filter()) {
        Ok(collector) => eprintln!(
            "[Main] ✓ Logging to {}",
            collector.session_log_path().display()
        ),
        Err(e) => eprintln!("[Main] WARNING: Logging disabled: {}", e),
    }

    log::info!(
        "[Main] ParseInsight {} starting, server {}",
        parse_insight::VERSION,
        config.server_url
    );

    // =========================================================================
    // UI
    // =========================================================================
    let runtime = tokio::runtime::Handle::current();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_title("ParseInsight"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "ParseInsight",
        options,
        Box::new(move |cc| Box::new(ParseInsightApp::new(cc, &config, runtime))),
    );

    log::info!("[Main] Shutting down");
    parse_insight::flush_all_logs();

    result.map_err(|e| format!("UI error: {}", e).into())
}
