//! Template helpers.
//!
//! | helper      | usage                      | result                                   |
//! |-------------|----------------------------|------------------------------------------|
//! | `float`     | `{{float ind6}}`           | comma-decimal string as a number          |
//! | `is_float`  | `{{#if (is_float ind6)}}`  | whether the value parses as a number      |
//! | `number`    | `{{number ind3d}}`         | integer display form with thousands suffix |
//! | `subrender` | `{{subrender ind3d}}`      | resolves `{{ KEY }}` placeholders in a value |

use geninfo_format::{NumberKind, float_with_comma, format_number};
use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, handlebars_helper,
};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
});

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

handlebars_helper!(float: |v: Json| {
    match float_with_comma(&as_text(v)).and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => v.clone(),
    }
});

handlebars_helper!(is_float: |v: Json| float_with_comma(&as_text(v)).is_some());

handlebars_helper!(number: |v: Json| format_number(&as_text(v), NumberKind::Integer));

/// Replaces `{{ KEY }}` tokens with values looked up in `context`.
///
/// Missing keys become empty strings. Every substituted value goes through
/// `escape`; the surrounding text is left untouched and nothing is evaluated
/// recursively.
pub fn substitute_placeholders(
    template: &str,
    context: &Value,
    escape: &dyn Fn(&str) -> String,
) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            context
                .get(&caps[1])
                .map(|v| escape(&as_text(v)))
                .unwrap_or_default()
        })
        .into_owned()
}

pub(crate) fn subrender(
    h: &Helper,
    r: &Handlebars,
    ctx: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h.param(0).map(|p| as_text(p.value())).unwrap_or_default();
    let rendered = substitute_placeholders(&value, ctx.data(), r.get_escape_fn());
    out.write(&rendered)?;
    Ok(())
}

pub(crate) fn register(registry: &mut Handlebars<'_>) {
    registry.register_helper("float", Box::new(float));
    registry.register_helper("is_float", Box::new(is_float));
    registry.register_helper("number", Box::new(number));
    registry.register_helper("subrender", Box::new(subrender));
}
