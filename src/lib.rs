//! ogshot
//!
//! Renders the site's social-share preview images ("OG images") by loading a
//! generated HTML card into headless Chrome and screenshotting it to PNG.
//!
//! # Features
//!
//! - **CDP Backend** (default): Uses Chrome DevTools Protocol via headless Chrome
//! - **Pure template**: the card design is a deterministic function of one
//!   [`ImageSpec`], testable without a browser
//! - **Scoped session**: one browser per batch, released on every exit path
//!
//! # Example
//!
//! ```no_run
//! use ogshot::{ChromeDriver, RenderConfig, CATALOG};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut driver = ChromeDriver::start(RenderConfig::default(), "images/og")?;
//! let written = driver.run(CATALOG, |path| println!("wrote {}", path.display()))?;
//! driver.stop()?;
//! println!("{} images", written.len());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod catalog;
pub use catalog::{ImageSpec, CATALOG};

pub mod template;
pub use template::{render, Theme};

pub mod driver;
pub use driver::RenderDriver;
#[cfg(feature = "cdp")]
pub use driver::ChromeDriver;

#[cfg(feature = "cdp")]
pub mod cdp;

/// Logical width of a preview card in CSS pixels
pub const OG_WIDTH: u32 = 1200;
/// Logical height of a preview card in CSS pixels
pub const OG_HEIGHT: u32 = 630;
/// Device-pixel-density multiplier applied when capturing
pub const DEVICE_SCALE_FACTOR: f64 = 2.0;

/// Configuration for a render session
///
/// The defaults produce 1200×630 cards captured at 2× density, so every
/// written PNG is 2400×1260.
///
/// # Examples
///
/// ```
/// let cfg = ogshot::RenderConfig::default();
/// assert_eq!(cfg.physical_size(), (2400, 1260));
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Logical viewport (and capture area) dimensions
    pub viewport: Viewport,
    /// Device-pixel-density multiplier
    pub device_scale_factor: f64,
    /// Upper bound for each browser operation in milliseconds
    pub timeout_ms: u64,
    /// Explicit Chrome/Chromium binary; auto-detected when `None`
    pub chrome_path: Option<PathBuf>,
    /// Whether to keep Chrome's sandbox enabled
    pub sandbox: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            device_scale_factor: DEVICE_SCALE_FACTOR,
            timeout_ms: 30000,
            chrome_path: None,
            sandbox: true,
        }
    }
}

impl RenderConfig {
    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::ConfigError(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !self.device_scale_factor.is_finite() || self.device_scale_factor <= 0.0 {
            return Err(Error::ConfigError(format!(
                "device scale factor must be positive, got {}",
                self.device_scale_factor
            )));
        }
        if self.timeout_ms == 0 {
            return Err(Error::ConfigError("timeout must be at least 1ms".into()));
        }
        Ok(())
    }

    /// Pixel dimensions of the captured PNG
    pub fn physical_size(&self) -> (u32, u32) {
        let scale = |v: u32| (f64::from(v) * self.device_scale_factor).round() as u32;
        (scale(self.viewport.width), scale(self.viewport.height))
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: OG_WIDTH,
            height: OG_HEIGHT,
        }
    }
}

/// Browser backend used by the [`RenderDriver`]
///
/// One instance is one browser session with a single page that is reused for
/// every image of a batch.
pub trait Renderer {
    /// Start a session with the given configuration
    fn new(config: RenderConfig) -> Result<Self>
    where
        Self: Sized;

    /// Replace the page content with `markup` and wait until it is ready
    fn load_markup(&mut self, markup: &str) -> Result<()>;

    /// Capture the logical viewport as an opaque PNG at the configured density
    fn render_png(&self) -> Result<Vec<u8>>;

    /// Close the session and clean up resources
    fn close(self) -> Result<()>;
}
