//! Shared data model for the infographic pipeline.
//!
//! - [`TerritoryCode`] / [`TerritoryRecord`]: branding and contact data per territory
//! - [`EntityRecord`]: one entity column of the source dataset, fully formatted
//! - [`Language`]: the supported document languages
//! - [`AllowList`] / [`Filters`]: territory and language gating for render jobs
//! - [`Mode`]: the document family derived from a data file name

pub mod entity;
pub mod filter;
pub mod language;
pub mod mode;
pub mod territory;

pub use entity::{EntityRecord, MissingField, LANGUAGES_FIELD, NAME_FIELD, NIF_FIELD};
pub use filter::{AllowList, Filters};
pub use language::Language;
pub use mode::{Mode, ModeError};
pub use territory::{TerritoryCode, TerritoryRecord};
