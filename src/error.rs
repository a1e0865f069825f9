//! Error types for the render pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing preview images
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch the browser session
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load generated markup into the page
    #[error("Failed to load markup: {0}")]
    LoadError(String),

    /// Failed to capture or validate a screenshot
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Filesystem failure while creating a directory or writing an image
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// CDP-specific error
    #[cfg(feature = "cdp")]
    #[error("CDP error: {0}")]
    CdpError(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(feature = "cdp")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::CdpError(err.to_string())
    }
}
