use std::path::PathBuf;
use thiserror::Error;

/// Error type for output tree operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResourceError {
    pub(crate) fn io(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> ResourceError + '_ {
        move |source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
