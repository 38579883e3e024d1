//! Batch generator of per-entity infographics.
//!
//! Entity tables (CSV, one entity per column) are joined with a territory
//! table, formatted, rendered into HTML through handlebars templates in every
//! requested language, captured as PNG in a remote browser and converted to
//! single-page A4 PDFs.
//!
//! The building blocks live in the workspace crates; this crate wires them
//! together with configuration, fuzzy entity lookup and the export stage.

pub mod config;
pub mod error;
pub mod matcher;
pub mod pipeline;

pub use config::Config;
pub use error::PipelineError;
pub use matcher::{AbortOnAmbiguity, ConsolePrompt, Disambiguator, MatchError};
pub use pipeline::{
    ExportOptions, ExportReport, ExportRequest, Exporter, LogProgress, Pipeline, PipelineBuilder,
    Quantizer, RunOptions, RunSummary,
};

pub use geninfo_traits::{BrowserConnector, BrowserError, BrowserSession, Progress, ProgressSink};
