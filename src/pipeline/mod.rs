//! Run orchestration.
//!
//! A run processes each data file in turn: parse, optionally narrow to one
//! entity by fuzzy name, render the HTML documents, copy the static assets
//! next to them and export PNG and PDF through a browser.
//!
//! # Example
//!
//! ```ignore
//! use geninfo::{Config, PipelineBuilder, RunOptions};
//! use geninfo_webdriver::{ChromeOptions, WebDriverClient};
//!
//! let client = WebDriverClient::for_host("127.0.0.1", 4444, ChromeOptions::default())?;
//! let mut pipeline = PipelineBuilder::new(Config::load(None)?).build(client)?;
//! pipeline.run_all(&RunOptions::default())?;
//! ```

mod builder;
pub mod export;
mod orchestrator;
mod progress;
pub mod quantize;

pub use builder::PipelineBuilder;
pub use export::{ExportOptions, ExportReport, ExportRequest, ExportUnit, Exporter};
pub use orchestrator::{Pipeline, RunOptions, RunSummary};
pub use progress::LogProgress;
pub use quantize::Quantizer;
