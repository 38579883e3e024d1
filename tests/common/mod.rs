pub mod browser;
pub mod fixtures;

use lopdf::Document as LopdfDocument;
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Loads a PDF from disk, returning its page count and first MediaBox.
pub fn pdf_page_info(path: &Path) -> Result<(usize, Vec<f32>), Box<dyn std::error::Error>> {
    let doc = LopdfDocument::load(path)?;
    let pages = doc.get_pages();
    let first = *pages.values().next().ok_or("PDF has no pages")?;
    let media_box = doc
        .get_object(first)?
        .as_dict()?
        .get(b"MediaBox")?
        .as_array()?
        .iter()
        .map(|o| o.as_float())
        .collect::<Result<Vec<_>, _>>()?;
    Ok((pages.len(), media_box))
}

/// Relative paths of every file under `dir` with the given extension, sorted.
pub fn files_with_extension(dir: &Path, extension: &str) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, extension: &str, out: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, extension, out);
            } else if path.extension().is_some_and(|e| e == extension) {
                let rel = path.strip_prefix(root).unwrap_or(&path);
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, extension, &mut out);
    out.sort();
    out
}
