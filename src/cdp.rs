//! Chrome DevTools Protocol renderer

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as Base64Engine;
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::{Emulation, Page};
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use serde_json::json;

use crate::{Error, RenderConfig, Renderer, Result};

/// Headless Chrome session (uses the `headless_chrome` crate)
///
/// Launches one browser with a window sized to the logical viewport and keeps
/// a single tab that every card is loaded into.
pub struct CdpRenderer {
    browser: Browser,
    tab: Arc<Tab>,
    config: RenderConfig,
}

impl CdpRenderer {
    // Timeouts surface as `Error::Timeout`, anything else goes through `wrap`.
    fn classify(&self, err: anyhow::Error, wrap: fn(String) -> Error) -> Error {
        if err.is::<headless_chrome::util::Timeout>() {
            Error::Timeout(self.config.timeout_ms)
        } else {
            wrap(err.to_string())
        }
    }
}

/// `Emulation.setDeviceMetricsOverride` parameters for the configured viewport.
///
/// Optional protocol fields are left out so they deserialize to `None`.
pub fn device_metrics_params(config: &RenderConfig) -> serde_json::Value {
    json!({
        "width": config.viewport.width,
        "height": config.viewport.height,
        "deviceScaleFactor": config.device_scale_factor,
        "mobile": false,
    })
}

impl Renderer for CdpRenderer {
    fn new(config: RenderConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(config.sandbox)
            .path(config.chrome_path.clone())
            .window_size(Some((config.viewport.width, config.viewport.height)))
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(Duration::from_millis(config.timeout_ms));

        // Layout sees the real density (`window.devicePixelRatio`), not just the capture.
        let metrics: Emulation::SetDeviceMetricsOverride = serde_json::from_value(device_metrics_params(&config))
            .map_err(|e| Error::InitializationError(format!("Invalid device metrics: {}", e)))?;
        tab.call_method(metrics)
            .map_err(|e| Error::InitializationError(format!("Failed to set device metrics: {}", e)))?;

        debug!(
            "chrome launched at {}x{} @{}x, timeout {}ms",
            config.viewport.width, config.viewport.height, config.device_scale_factor, config.timeout_ms
        );
        Ok(Self { browser, tab, config })
    }

    fn load_markup(&mut self, markup: &str) -> Result<()> {
        let b64 = Base64Engine::encode(&base64::engine::general_purpose::STANDARD, markup);
        let url = format!("data:text/html;charset=utf-8;base64,{}", b64);

        self.tab
            .navigate_to(&url)
            .map_err(|e| self.classify(e, |m| Error::LoadError(format!("Navigation failed: {}", m))))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| self.classify(e, |m| Error::LoadError(format!("Wait for navigation failed: {}", m))))?;

        // Text metrics change once web fonts settle.
        self.tab
            .evaluate("document.fonts.ready.then(() => true)", true)
            .map_err(|e| self.classify(e, |m| Error::LoadError(format!("Waiting for fonts failed: {}", m))))?;

        Ok(())
    }

    // Emulated density already doubles device pixels, so the clip stays at 1.0.
    fn render_png(&self) -> Result<Vec<u8>> {
        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: f64::from(self.config.viewport.width),
            height: f64::from(self.config.viewport.height),
            scale: 1.0,
        };

        self.tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, Some(clip), true)
            .map_err(|e| self.classify(e, |m| Error::RenderError(format!("Screenshot failed: {}", m))))
    }

    fn close(self) -> Result<()> {
        // Dropping the browser terminates the child process.
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_metrics_carry_viewport_and_density() {
        let params = device_metrics_params(&RenderConfig::default());
        assert_eq!(params["width"], 1200);
        assert_eq!(params["height"], 630);
        assert_eq!(params["deviceScaleFactor"], 2.0);
        assert_eq!(params["mobile"], false);
    }

    #[test]
    fn device_metrics_deserialize_into_protocol_command() {
        let cmd: Emulation::SetDeviceMetricsOverride =
            serde_json::from_value(device_metrics_params(&RenderConfig::default())).unwrap();
        assert_eq!(cmd.width, 1200);
        assert_eq!(cmd.height, 630);
        assert_eq!(cmd.device_scale_factor, 2.0);
        assert!(!cmd.mobile);
    }

    #[test]
    fn test_cdp_renderer_creation() {
        let config = RenderConfig::default();
        // This test requires Chrome to be installed, so we skip it in CI
        if std::env::var("CI").is_ok() {
            return;
        }
        let result = CdpRenderer::new(config);
        if let Err(e) = result {
            eprintln!("Skipping CDP renderer creation test because Chrome is not available or failed to launch: {}", e);
            return;
        }
        assert!(result.unwrap().close().is_ok());
    }
}
