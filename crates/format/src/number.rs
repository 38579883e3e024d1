//! Numeric and boolean cell formatting.

/// Suffix for thousands. It carries a translation placeholder that the
/// `subrender` template helper resolves per language.
pub const THOUSANDS_SUFFIX: &str = "<small>{{ TXT059 }}</small>";

const SUFFIXES: [&str; 3] = ["", THOUSANDS_SUFFIX, "M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// Rounded (half to even) before abbreviation.
    Integer,
    Float,
}

/// Formats a localized number (`1.234.567,00 €`) for display.
///
/// The value is abbreviated by dividing by 1000 at most twice, rendered with
/// one decimal, trailing zeros and point dropped, and the decimal point
/// turned into a comma: `1.234.567,00 €` becomes `1,2M`. Unparseable input
/// is returned unchanged.
pub fn format_number(raw: &str, kind: NumberKind) -> String {
    let Some(mut value) = parse_localized(raw) else {
        return raw.to_string();
    };
    if kind == NumberKind::Integer {
        value = value.round_ties_even();
    }

    let mut suffix = 0;
    while value >= 1000.0 && suffix < SUFFIXES.len() - 1 {
        value /= 1000.0;
        suffix += 1;
    }

    let grouped = group_thousands(&format!("{value:.1}"));
    let trimmed = grouped.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", trimmed.replace('.', ","), SUFFIXES[suffix])
}

/// `si` / `no` (any case) to a boolean; anything else is not a boolean.
pub fn parse_boolean(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("si") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Boolean cells render as `True` / `False`; other values pass through.
pub fn format_boolean(raw: &str) -> String {
    match parse_boolean(raw) {
        Some(true) => "True".to_string(),
        Some(false) => "False".to_string(),
        None => raw.to_string(),
    }
}

/// Parses a number that may use a decimal comma.
pub fn float_with_comma(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

pub fn is_float(raw: &str) -> bool {
    float_with_comma(raw).is_some()
}

fn parse_localized(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '€' | '.'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Inserts `,` every three digits of the integer part of a `{:.1}` rendering.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}
