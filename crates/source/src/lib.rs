//! Data sources for the infographic pipeline.
//!
//! ## Available Sources
//!
//! - [`TerritoryTable`]: the territory reference table, keyed by code
//! - [`DatasetParser`]: the transposed entity/property table, joined with territories
//! - [`TranslationCatalog`]: per-language strings from the master translation table
//!
//! ## Example
//!
//! ```ignore
//! use geninfo_format::PropertyTable;
//! use geninfo_source::{DatasetParser, TerritoryTable};
//!
//! let territories = TerritoryTable::from_path("data/datos_territorios.csv")?;
//! let entities = DatasetParser::new(PropertyTable::builtin())
//!     .parse_path("data/datos_entidades.csv", &territories)?;
//! ```

mod dataset;
mod error;
mod territory;
mod translations;

pub use dataset::{DatasetParser, FIRST_ENTITY_COLUMN, PROPERTY_COLUMN};
pub use error::SourceError;
pub use territory::TerritoryTable;
pub use translations::{TranslationCatalog, TranslationTable, KEY_COLUMN};

/// Reads a cell, blank-filling short rows.
pub(crate) fn cell(record: &csv::StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or_default()
}
