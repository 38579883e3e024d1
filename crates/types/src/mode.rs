//! The document family selector.

use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

static DATA_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"datos_(.+)\.csv$").expect("data file pattern is a valid regex")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' does not match the 'datos_<mode>.csv' naming convention")]
pub struct ModeError(pub String);

/// Document family, e.g. `entidades` for `datos_entidades.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mode(String);

impl Mode {
    pub fn new(mode: impl Into<String>) -> Self {
        Self(mode.into())
    }

    pub fn from_data_file(path: &Path) -> Result<Self, ModeError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ModeError(path.display().to_string()))?;
        DATA_FILE_PATTERN
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| ModeError(file_name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Template file names to try for a language, most specific first.
    pub fn template_candidates(&self, language: &str) -> [String; 2] {
        [
            format!("{}_{}.html", self.0, language.to_uppercase()),
            format!("{}.html", self.0),
        ]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
