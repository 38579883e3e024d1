//! Filesystem concerns of the infographic pipeline.
//!
//! ## Available Pieces
//!
//! - [`OutputLayout`]: where every artifact of a run lives
//! - [`sanitize_filename`]: turns entity identifiers into safe file stems
//! - [`copy_tree`]: copies the static asset tree next to the rendered HTML

mod error;
mod filesystem;
mod layout;

pub use error::ResourceError;
pub use filesystem::{copy_tree, sanitize_filename};
pub use layout::{ArtifactKind, HtmlArtifact, OutputLayout};
