//! Filename sanitising and directory copying.

use crate::ResourceError;
use log::debug;
use std::fs;
use std::path::Path;

const FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

const RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Makes an identifier usable as a file stem on every platform.
///
/// Path separators and other forbidden characters are removed, so the result
/// can never escape the directory it is joined onto.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && !c.is_control())
        .collect();
    let cleaned = cleaned
        .trim_start()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace());

    if cleaned.is_empty() {
        return "_".to_string();
    }
    let stem = cleaned.split('.').next().unwrap_or(cleaned);
    if RESERVED.iter().any(|r| r.eq_ignore_ascii_case(stem)) {
        format!("{cleaned}_")
    } else {
        cleaned.to_string()
    }
}

/// Recursively copies `src` into `dest`, overwriting existing files.
///
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<usize, ResourceError> {
    fs::create_dir_all(dest).map_err(ResourceError::io(dest))?;
    let mut copied = 0;
    for entry in fs::read_dir(src).map_err(ResourceError::io(src))? {
        let entry = entry.map_err(ResourceError::io(src))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if entry.file_type().map_err(ResourceError::io(&from))?.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(ResourceError::io(&from))?;
            copied += 1;
        }
    }
    debug!("Copied {} files from {} to {}", copied, src.display(), dest.display());
    Ok(copied)
}
