//! The transposed entity/property table.
//!
//! The table stores one entity per column rather than per row:
//!
//! ```text
//! col 0  | col 1 (property)  | col 2 | col 3 | col 4 (MAD) | col 5 (MAD.1) | col 6 (CAT) ...
//! ...    | NIF               |       |       | B12345678   | F87654321     | G11223344
//! ...    | Nombre            |       |       | Coop Uno    | Coop Dos      | Coop Tres
//! ```
//!
//! The header of column 1 names the territory key field, each data row's
//! column 1 names a property, and every column from [`FIRST_ENTITY_COLUMN`]
//! onwards holds one entity whose header is its territory code.

use crate::{cell, SourceError, TerritoryTable};
use geninfo_format::PropertyTable;
use geninfo_types::{EntityRecord, TerritoryCode};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Column holding property names.
pub const PROPERTY_COLUMN: usize = 1;
/// First column holding entity values.
pub const FIRST_ENTITY_COLUMN: usize = 4;

const DEFAULT_TERRITORY_KEY: &str = "Codigo Territorio";

/// Builds [`EntityRecord`]s from the entity table.
#[derive(Debug, Clone)]
pub struct DatasetParser {
    properties: PropertyTable,
}

impl DatasetParser {
    pub fn new(properties: PropertyTable) -> Self {
        Self { properties }
    }

    pub fn parse_path<P: AsRef<Path>>(
        &self,
        path: P,
        territories: &TerritoryTable,
    ) -> Result<Vec<EntityRecord>, SourceError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(SourceError::csv(&origin))?;
        self.parse(reader, &origin, territories)
    }

    pub fn parse_reader<R: io::Read>(
        &self,
        reader: R,
        territories: &TerritoryTable,
    ) -> Result<Vec<EntityRecord>, SourceError> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        self.parse(reader, "<reader>", territories)
    }

    fn parse<R: io::Read>(
        &self,
        mut reader: csv::Reader<R>,
        origin: &str,
        territories: &TerritoryTable,
    ) -> Result<Vec<EntityRecord>, SourceError> {
        let headers = reader.headers().map_err(SourceError::csv(origin))?.clone();
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(SourceError::csv(origin))?;

        let territory_key = match headers.get(PROPERTY_COLUMN).map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => DEFAULT_TERRITORY_KEY.to_string(),
        };

        // (row index, template-safe property name)
        let properties: Vec<(usize, String)> = rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let name = cell(row, PROPERTY_COLUMN);
                if name.trim().is_empty() {
                    debug!("{}: row {} has no property name, ignored", origin, idx + 2);
                    None
                } else {
                    Some((idx, template_safe_name(name)))
                }
            })
            .collect();

        self.report_classification(origin, &properties);

        let mut entities = Vec::new();
        for (column, header) in headers.iter().enumerate().skip(FIRST_ENTITY_COLUMN) {
            let code = TerritoryCode::from_column_header(header);
            let Some(territory) = territories.get(code.as_str()) else {
                debug!(
                    "{}: column {} ('{}') has no territory match, skipped",
                    origin, column, header
                );
                continue;
            };

            let mut fields = BTreeMap::new();
            fields.insert(territory_key.clone(), code.to_string());
            for (name, value) in territory.template_fields() {
                fields.insert(name.to_string(), value.to_string());
            }
            for (row_idx, name) in &properties {
                let raw = cell(&rows[*row_idx], column);
                fields.insert(name.clone(), self.properties.format(name, raw));
            }

            match EntityRecord::new(code, fields) {
                Ok(entity) => entities.push(entity),
                Err(e) => warn!("{}: column {} ('{}') dropped: {}", origin, column, header, e),
            }
        }

        debug!(
            "{}: {} entities parsed from {} entity columns",
            origin,
            entities.len(),
            headers.len().saturating_sub(FIRST_ENTITY_COLUMN)
        );
        Ok(entities)
    }

    fn report_classification(&self, origin: &str, properties: &[(usize, String)]) {
        let validation = self
            .properties
            .validate(properties.iter().map(|(_, name)| name.as_str()));
        if !validation.unclassified.is_empty() {
            warn!(
                "{}: {} properties have no format classification and are rendered as text: {}",
                origin,
                validation.unclassified.len(),
                validation.unclassified.join(", ")
            );
        }
        if !validation.missing.is_empty() {
            debug!(
                "{}: classified properties absent from the dataset: {}",
                origin,
                validation.missing.join(", ")
            );
        }
    }
}

/// Property names become template identifiers; `/` is not allowed there.
fn template_safe_name(name: &str) -> String {
    name.replace('/', "_")
}
