//! Renders one HTML document per entity and language.
//!
//! Templates live in a single directory and are picked by document mode and
//! language: `{mode}_{LANG}.html` first, then `{mode}.html`. Each document is
//! rendered against a context made of the configured globals, the language's
//! translations and the entity's own fields, in increasing precedence.

mod error;
mod helpers;
mod renderer;

pub use error::TemplateError;
pub use helpers::substitute_placeholders;
pub use renderer::{
    Collision, OutputClaims, RenderReport, RenderRequest, RendererOptions, TemplateRenderer,
};
