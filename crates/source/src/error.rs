use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read CSV from '{origin}': {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("Column '{column}' not found in '{origin}'")]
    MissingColumn { origin: String, column: String },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub(crate) fn csv(origin: &str) -> impl FnOnce(csv::Error) -> SourceError + '_ {
        move |source| SourceError::Csv {
            origin: origin.to_string(),
            source,
        }
    }
}
