use crate::matcher::MatchError;
use geninfo_render_lopdf::RenderError;
use geninfo_resource::ResourceError;
use geninfo_source::SourceError;
use geninfo_template::TemplateError;
use geninfo_traits::BrowserError;
use geninfo_types::ModeError;
use thiserror::Error;

/// A comprehensive error type for a generation run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Reading input failed: {0}")]
    Source(#[from] SourceError),

    #[error("Unrecognised data file: {0}")]
    Mode(#[from] ModeError),

    #[error("Rendering HTML failed: {0}")]
    Template(#[from] TemplateError),

    #[error("Writing PDF failed: {0}")]
    Render(#[from] RenderError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Output tree error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Entity selection failed: {0}")]
    Match(#[from] MatchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
