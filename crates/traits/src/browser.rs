//! Browser seam used by the export stage.
//!
//! The export driver only needs a handful of remote operations. Keeping them
//! behind a trait lets the pipeline run against a real WebDriver endpoint in
//! production and against a recording fake in tests.

use std::time::Duration;
use thiserror::Error;

/// Error type for remote browser operations.
#[derive(Error, Debug, Clone)]
pub enum BrowserError {
    #[error("Failed to start browser session: {0}")]
    SessionStart(String),

    #[error("Browser returned '{error}': {message}")]
    Protocol { error: String, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response from browser: {0}")]
    InvalidResponse(String),

    #[error("Browser session already closed")]
    Closed,
}

/// Opens browser sessions.
///
/// # Example
///
/// ```ignore
/// let mut session = connector.connect()?;
/// session.navigate("file:///tmp/out/html/MAD/CAS/B123.html")?;
/// let png = session.screenshot_png()?;
/// session.close()?;
/// ```
pub trait BrowserConnector {
    type Session: BrowserSession;

    fn connect(&self) -> Result<Self::Session, BrowserError>;
}

/// A live browser session.
///
/// Implementations should also release the remote session when dropped, so
/// an aborted export never leaks a browser.
pub trait BrowserSession {
    fn clear_cookies(&mut self) -> Result<(), BrowserError>;

    fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Waits until an element with the given CSS class is present.
    ///
    /// Returns `Ok(false)` when the timeout elapses first.
    fn wait_for_class(&mut self, class: &str, timeout: Duration) -> Result<bool, BrowserError>;

    fn set_window_size(&mut self, width: u32, height: u32) -> Result<(), BrowserError>;

    /// Captures the current viewport as PNG bytes.
    fn screenshot_png(&mut self) -> Result<Vec<u8>, BrowserError>;

    fn close(self) -> Result<(), BrowserError>
    where
        Self: Sized;
}
