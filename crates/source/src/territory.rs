//! The territory reference table.

use crate::{cell, SourceError};
use geninfo_types::{TerritoryCode, TerritoryRecord};
use log::debug;
use std::collections::HashMap;
use std::io;
use std::path::Path;

const CODE_COLUMN: &str = "Código";
const PRIMARY_LOGO_COLUMN: &str = "Logo 1 reas";
const SECONDARY_LOGO_COLUMN: &str = "Logo 2 mercado";
const WEBSITE_COLUMN: &str = "web territorio";
const EMAIL_COLUMN: &str = "email";

/// Territory records keyed by code. Loaded once per run and never mutated.
#[derive(Debug, Clone, Default)]
pub struct TerritoryTable {
    records: HashMap<TerritoryCode, TerritoryRecord>,
}

impl TerritoryTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(SourceError::csv(&origin))?;
        Self::read(reader, &origin)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, SourceError> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        Self::read(reader, "<reader>")
    }

    fn read<R: io::Read>(mut reader: csv::Reader<R>, origin: &str) -> Result<Self, SourceError> {
        let headers = reader.headers().map_err(SourceError::csv(origin))?.clone();
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        };

        let code_idx = position(CODE_COLUMN).ok_or_else(|| SourceError::MissingColumn {
            origin: origin.to_string(),
            column: CODE_COLUMN.to_string(),
        })?;
        // Optional columns blank-fill when absent.
        let primary_idx = position(PRIMARY_LOGO_COLUMN);
        let secondary_idx = position(SECONDARY_LOGO_COLUMN);
        let website_idx = position(WEBSITE_COLUMN);
        let email_idx = position(EMAIL_COLUMN);

        let mut records = HashMap::new();
        for row in reader.records() {
            let row = row.map_err(SourceError::csv(origin))?;
            let code = cell(&row, code_idx);
            if code.trim().is_empty() {
                continue;
            }
            let optional = |idx: Option<usize>| {
                idx.map(|i| cell(&row, i)).unwrap_or_default().to_string()
            };
            records.insert(
                TerritoryCode::new(code),
                TerritoryRecord {
                    primary_logo: optional(primary_idx),
                    secondary_logo: optional(secondary_idx),
                    website: optional(website_idx),
                    email: optional(email_idx),
                },
            );
        }

        debug!("Loaded {} territories from {}", records.len(), origin);
        Ok(Self { records })
    }

    pub fn get(&self, code: &str) -> Option<&TerritoryRecord> {
        self.records.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(TerritoryCode, TerritoryRecord)> for TerritoryTable {
    fn from_iter<I: IntoIterator<Item = (TerritoryCode, TerritoryRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
