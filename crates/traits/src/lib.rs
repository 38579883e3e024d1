//! Seams between the pipeline and its collaborators.
//!
//! - [`BrowserConnector`] / [`BrowserSession`]: the remote browser that captures
//!   rendered HTML, with [`BrowserError`] for its failures
//! - [`ProgressSink`]: receives a [`Progress`] after each exported document
//!
//! The pipeline is generic over these, so tests can substitute fakes.

pub mod browser;
pub mod progress;

pub use browser::{BrowserConnector, BrowserError, BrowserSession};
pub use progress::{Progress, ProgressSink};
