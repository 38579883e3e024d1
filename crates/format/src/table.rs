//! The property classification table.

use crate::format_value;
use std::collections::{BTreeSet, HashMap};

/// How a dataset property is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Integer,
    Float,
    Boolean,
    Text,
}

pub const DEFAULT_INTEGER_PROPERTIES: &[&str] = &[
    "ind3d", "ind3h", "ind3a", "ind20d", "ind97", "q1203", "q1201", "q1405", "q1406", "q1413",
    "ind254", "ind6", "ind7", "ind67agru", "ind1d", "ind1h", "ind1a", "ind1agrupado",
    "ind1agrupadod", "ind1agrupadoh", "ind1agrupadoa", "ind118", "ind254A",
];

/// Reserved; no float-typed properties exist in the current dataset.
pub const DEFAULT_FLOAT_PROPERTIES: &[&str] = &[];

pub const DEFAULT_BOOLEAN_PROPERTIES: &[&str] = &[
    "ind58", "ind62", "q4104a", "q4104b", "q4104c", "q4104d", "q5305a", "q5305b", "q5305c",
    "q5305d", "ind71", "ind105", "ind78", "ind80", "q3406c", "q3406a", "q3406d", "q4106a",
    "q4106d", "q4106c", "ind62agrupado", "q6813a", "q6813b", "q6813c", "q6813d", "q1415e",
    "q1415f", "q1415a",
];

/// Identity fields every dataset carries; always plain text.
pub const TEXT_PROPERTIES: &[&str] = &["NIF", "Nombre", "Idioma"];

/// Maps property names to their [`FormatKind`].
///
/// Names missing from the table are formatted as text; [`PropertyTable::validate`]
/// reports them so they can be classified explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTable {
    kinds: HashMap<String, FormatKind>,
}

impl PropertyTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The classification used by the production dataset.
    pub fn builtin() -> Self {
        Self::from_lists(
            DEFAULT_INTEGER_PROPERTIES,
            DEFAULT_FLOAT_PROPERTIES,
            DEFAULT_BOOLEAN_PROPERTIES,
        )
    }

    pub fn from_lists<S: AsRef<str>>(integer: &[S], float: &[S], boolean: &[S]) -> Self {
        Self::empty()
            .with(FormatKind::Text, TEXT_PROPERTIES)
            .with(FormatKind::Integer, integer)
            .with(FormatKind::Float, float)
            .with(FormatKind::Boolean, boolean)
    }

    /// Classifies `names` as `kind`, overriding earlier entries.
    pub fn with<S: AsRef<str>>(mut self, kind: FormatKind, names: &[S]) -> Self {
        for name in names {
            self.kinds.insert(name.as_ref().to_string(), kind);
        }
        self
    }

    pub fn classify(&self, property: &str) -> Option<FormatKind> {
        self.kinds.get(property).copied()
    }

    pub fn format(&self, property: &str, raw: &str) -> String {
        format_value(self.classify(property).unwrap_or(FormatKind::Text), raw)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Compares the table against the property names found in a dataset.
    pub fn validate<'a, I>(&self, properties: I) -> Validation
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: BTreeSet<&str> = properties.into_iter().collect();
        let unclassified = present
            .iter()
            .filter(|name| !self.kinds.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        let mut missing: Vec<String> = self
            .kinds
            .keys()
            .filter(|name| !present.contains(name.as_str()))
            .cloned()
            .collect();
        missing.sort();
        Validation { missing, unclassified }
    }
}

/// Result of [`PropertyTable::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Classified names that the dataset does not contain.
    pub missing: Vec<String>,
    /// Dataset properties without a classification (rendered as text).
    pub unclassified: Vec<String>,
}

impl Validation {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unclassified.is_empty()
    }
}
