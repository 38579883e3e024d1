//! Territory identifiers and the reference data joined onto every entity.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A territory code as written in the reference table (e.g. `MAD`).
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TerritoryCode(Arc<str>);

impl TerritoryCode {
    pub fn new(code: impl Into<Arc<str>>) -> Self {
        Self(code.into())
    }

    /// Derives the code from an entity column header.
    ///
    /// Headers may carry a qualifier after the first `.` (`MAD.1`, `MAD.2`)
    /// when several entities share a territory; the qualifier is dropped.
    pub fn from_column_header(header: &str) -> Self {
        let code = header.split('.').next().unwrap_or(header);
        Self::new(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The directory name used for this territory in the output tree.
    pub fn dir_name(&self) -> String {
        self.0.to_uppercase()
    }
}

impl From<&str> for TerritoryCode {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<String> for TerritoryCode {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for TerritoryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TerritoryCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TerritoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Branding and contact fields shared by every entity of a territory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerritoryRecord {
    pub primary_logo: String,
    pub secondary_logo: String,
    pub website: String,
    pub email: String,
}

impl TerritoryRecord {
    /// The template variable names and values contributed to each entity.
    pub fn template_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("logo_reas", &self.primary_logo),
            ("logo_mercado", &self.secondary_logo),
            ("web", &self.website),
            ("email", &self.email),
        ]
    }
}
