mod cli;
mod logging;

use homeui_engine::{run_capture, CaptureOutcome, ChromiumPageDriver};
use ui_logging::{ui_debug, ui_error};

/// Captures one screenshot and terminates. Every path, including skips and
/// failures, exits with status 0; outcomes are reported through the log only.
fn main() {
    let config = match cli::parse(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}\n\n{}", cli::USAGE);
            return;
        }
    };

    logging::initialize(config.log_destination);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            ui_error!("Failed to start async runtime: {err}");
            return;
        }
    };

    runtime.block_on(async {
        let mut driver = match ChromiumPageDriver::launch().await {
            Ok(driver) => driver,
            Err(err) => {
                ui_error!("Failed to launch headless browser: {err}");
                return;
            }
        };

        match run_capture(&mut driver, &config.capture).await {
            Ok(CaptureOutcome::Captured(path)) => {
                ui_debug!("Capture finished: {}", path.display());
            }
            Ok(CaptureOutcome::Skipped) => {
                ui_debug!("Capture skipped for {}", config.capture.target_url);
            }
            Err(err) => {
                ui_error!("Screenshot capture failed: {err}");
            }
        }
    });
}
