use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("No template for mode '{mode}' and language '{language}' (tried {tried:?})")]
    NotFound {
        mode: String,
        language: String,
        tried: Vec<String>,
    },

    #[error("Failed to compile template '{name}': {source}")]
    Compile {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Template rendering error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
