use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, Viewport};
use chromiumoxide::page::{Page, ScreenshotParams};
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use ui_logging::{ui_debug, ui_info};

use crate::persist::AtomicFileWriter;
use crate::{CaptureError, CaptureOutcome, NavigationOutcome};

/// Fixed capture viewport; applied as both window size and clip rectangle.
pub const VIEWPORT_WIDTH: u32 = 600;
pub const VIEWPORT_HEIGHT: u32 = 400;

pub const DEFAULT_TARGET_URL: &str = "http://localhost:8081/app-runner-home/";
pub const DEFAULT_OUTPUT_PATH: &str = "output.png";

const NOT_FOUND_MARKER: &str = "404 Not Found";

/// One capture job. The `check_not_found` / `settle_delay` / `verbose` flags
/// select between the 404-aware logged profile and the silent always-capture
/// profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    pub target_url: String,
    pub output_path: PathBuf,
    /// Skip the capture when navigation fails or the page reports a 404.
    pub check_not_found: bool,
    /// Wait after navigation so asynchronous page content can finish loading.
    pub settle_delay: Duration,
    pub verbose: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::logged(DEFAULT_TARGET_URL, DEFAULT_OUTPUT_PATH)
    }
}

impl CaptureConfig {
    /// 404-aware variant with progress logging.
    pub fn logged(target_url: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            target_url: target_url.into(),
            output_path: output_path.into(),
            check_not_found: true,
            settle_delay: Duration::from_secs(5),
            verbose: true,
        }
    }

    /// Always-capture variant: longer settle, no status check, no logging.
    pub fn silent(target_url: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            target_url: target_url.into(),
            output_path: output_path.into(),
            check_not_found: false,
            settle_delay: Duration::from_secs(10),
            verbose: false,
        }
    }
}

/// The one browser page a capture run owns.
#[async_trait::async_trait]
pub trait PageDriver: Send {
    /// Single navigation attempt. `Err` means the browser itself broke;
    /// a page-level failure comes back as `NavigationOutcome { ok: false, .. }`.
    async fn navigate(&mut self, url: &str) -> Result<NavigationOutcome, CaptureError>;
    /// Renders the fixed viewport to PNG bytes.
    async fn capture(&mut self) -> Result<Vec<u8>, CaptureError>;
    async fn close(&mut self);
}

/// Runs one capture job to a terminal state:
/// `Navigating -> {Skipped | Settling} -> Captured | Skipped`.
pub async fn run_capture(
    driver: &mut dyn PageDriver,
    config: &CaptureConfig,
) -> Result<CaptureOutcome, CaptureError> {
    if config.verbose {
        ui_info!(
            "Creating screenshot from {} and saving to {}",
            config.target_url,
            config.output_path.display()
        );
    }

    let navigation = driver.navigate(&config.target_url).await;

    if config.check_not_found {
        let skip = match &navigation {
            Ok(outcome) => !outcome.ok || outcome.content.contains(NOT_FOUND_MARKER),
            Err(_) => true,
        };
        if skip {
            if config.verbose {
                ui_info!(
                    "Not generating screenshot for {} as it has returned a 404",
                    config.target_url
                );
            }
            driver.close().await;
            return Ok(CaptureOutcome::Skipped);
        }
    } else if let Err(err) = navigation {
        // Navigation status is ignored in this variant, but a dead browser
        // still ends the run.
        driver.close().await;
        return Err(err);
    }

    tokio::time::sleep(config.settle_delay).await;

    let png = match driver.capture().await {
        Ok(bytes) => bytes,
        Err(err) => {
            driver.close().await;
            return Err(err);
        }
    };
    let written = write_png(&config.output_path, &png);
    driver.close().await;
    let path = written?;

    if config.verbose {
        ui_info!("Screenshot written to {}", path.display());
    }
    Ok(CaptureOutcome::Captured(path))
}

fn write_png(output_path: &Path, bytes: &[u8]) -> Result<PathBuf, CaptureError> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = output_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CaptureError::InvalidOutputPath(output_path.display().to_string()))?;
    let writer = AtomicFileWriter::new(dir);
    Ok(writer.write(filename, bytes)?)
}

/// Headless Chromium driver over the DevTools protocol.
pub struct ChromiumPageDriver {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Option<Page>,
}

impl ChromiumPageDriver {
    /// Launches a headless browser sized to the fixed capture viewport.
    pub async fn launch() -> Result<Self, CaptureError> {
        let config = BrowserConfig::builder()
            .window_size(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
            .build()
            .map_err(CaptureError::Browser)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| CaptureError::Browser(err.to_string()))?;

        // The handler pumps CDP messages for the whole browser lifetime.
        let handler_task = tokio::spawn(async move {
            while handler.next().await.is_some() {}
        });

        Ok(Self {
            browser,
            handler_task,
            page: None,
        })
    }
}

#[async_trait::async_trait]
impl PageDriver for ChromiumPageDriver {
    async fn navigate(&mut self, url: &str) -> Result<NavigationOutcome, CaptureError> {
        let page = match self.browser.new_page(url).await {
            Ok(page) => page,
            Err(err) => {
                ui_debug!("navigation to {url} failed: {err}");
                return Ok(NavigationOutcome::default());
            }
        };
        let ok = page.wait_for_navigation().await.is_ok();
        let content = page.content().await.unwrap_or_default();
        self.page = Some(page);
        Ok(NavigationOutcome { ok, content })
    }

    async fn capture(&mut self) -> Result<Vec<u8>, CaptureError> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| CaptureError::Browser("no page navigated".to_string()))?;
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .clip(Viewport {
                x: 0.0,
                y: 0.0,
                width: f64::from(VIEWPORT_WIDTH),
                height: f64::from(VIEWPORT_HEIGHT),
                scale: 1.0,
            })
            .build();
        page.screenshot(params)
            .await
            .map_err(|err| CaptureError::Browser(err.to_string()))
    }

    async fn close(&mut self) {
        if let Some(page) = self.page.take() {
            let _ = page.close().await;
        }
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}
