//! The per-entity record produced by the dataset parser.

use crate::territory::TerritoryCode;
use std::collections::BTreeMap;
use thiserror::Error;

/// Tax identifier; also the output filename stem.
pub const NIF_FIELD: &str = "NIF";
/// Display name.
pub const NAME_FIELD: &str = "Nombre";
/// Semicolon separated list of requested language codes.
pub const LANGUAGES_FIELD: &str = "Idioma";

const REQUIRED_FIELDS: [&str; 3] = [NIF_FIELD, NAME_FIELD, LANGUAGES_FIELD];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("entity is missing required field '{0}'")]
pub struct MissingField(pub &'static str);

/// One entity with every property already formatted for display.
///
/// Fields hold the territory key, the joined territory fields and all
/// dataset properties (later entries win on name clashes). The record is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    territory: TerritoryCode,
    fields: BTreeMap<String, String>,
}

impl EntityRecord {
    /// Builds a record, rejecting it if any required field is absent or blank.
    pub fn new(
        territory: TerritoryCode,
        fields: BTreeMap<String, String>,
    ) -> Result<Self, MissingField> {
        for required in REQUIRED_FIELDS {
            match fields.get(required) {
                Some(value) if !value.trim().is_empty() => {}
                _ => return Err(MissingField(required)),
            }
        }
        Ok(Self { territory, fields })
    }

    pub fn territory(&self) -> &TerritoryCode {
        &self.territory
    }

    pub fn nif(&self) -> &str {
        self.required(NIF_FIELD)
    }

    pub fn name(&self) -> &str {
        self.required(NAME_FIELD)
    }

    /// Requested language codes, in the order they were listed.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.required(LANGUAGES_FIELD)
            .split(';')
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn required(&self, field: &str) -> &str {
        // Presence is checked in `new`.
        self.fields.get(field).map(String::as_str).unwrap_or_default()
    }
}
