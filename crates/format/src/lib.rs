//! Turns raw dataset cells into display-ready strings.
//!
//! Formatting is dispatched by an explicit [`PropertyTable`] mapping property
//! names to a [`FormatKind`]. Every formatter is total: a value that cannot be
//! interpreted is passed through unchanged.

mod number;
mod table;

pub use number::{
    NumberKind, THOUSANDS_SUFFIX, float_with_comma, format_boolean, format_number, is_float,
    parse_boolean,
};
pub use table::{
    DEFAULT_BOOLEAN_PROPERTIES, DEFAULT_FLOAT_PROPERTIES, DEFAULT_INTEGER_PROPERTIES,
    FormatKind, PropertyTable, TEXT_PROPERTIES, Validation,
};

/// Formats a raw cell according to its kind.
pub fn format_value(kind: FormatKind, raw: &str) -> String {
    match kind {
        FormatKind::Integer => format_number(raw, NumberKind::Integer),
        FormatKind::Float => format_number(raw, NumberKind::Float),
        FormatKind::Boolean => format_boolean(raw),
        FormatKind::Text => raw.to_string(),
    }
}
