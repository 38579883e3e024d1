//! The output tree of a run.
//!
//! ```text
//! {root}/html/{TERR}/{LANG}/{nif}.html
//! {root}/html/static/...
//! {root}/png/{TERR}/{LANG}/{nif}.png
//! {root}/pdf/{TERR}/{LANG}/{nif}.pdf
//! ```

use crate::ResourceError;
use geninfo_types::TerritoryCode;
use std::fs;
use std::path::{Path, PathBuf};

const STATIC_DIR: &str = "static";

/// The three artifact families produced per entity and language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Html,
    Png,
    Pdf,
}

impl ArtifactKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            ArtifactKind::Html => "html",
            ArtifactKind::Png => "png",
            ArtifactKind::Pdf => "pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        self.dir_name()
    }
}

/// A rendered HTML file found on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HtmlArtifact {
    pub territory: String,
    pub language: String,
    pub stem: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kind_dir(&self, kind: ArtifactKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Path of one artifact. Territory and language directories are upper-cased.
    pub fn artifact_path(
        &self,
        kind: ArtifactKind,
        territory: &TerritoryCode,
        language: &str,
        stem: &str,
    ) -> PathBuf {
        self.kind_dir(kind)
            .join(territory.dir_name())
            .join(language.to_uppercase())
            .join(format!("{}.{}", stem, kind.extension()))
    }

    /// Where the static asset tree is copied.
    pub fn static_dir(&self) -> PathBuf {
        self.kind_dir(ArtifactKind::Html).join(STATIC_DIR)
    }

    /// Lists `html/{TERR}/{LANG}/*.html`, sorted, ignoring the static tree.
    ///
    /// A missing `html` directory yields an empty list.
    pub fn discover_html(&self) -> Result<Vec<HtmlArtifact>, ResourceError> {
        let html_dir = self.kind_dir(ArtifactKind::Html);
        let mut found = Vec::new();
        if !html_dir.is_dir() {
            return Ok(found);
        }

        for territory in subdirectories(&html_dir)? {
            if territory == STATIC_DIR {
                continue;
            }
            let territory_dir = html_dir.join(&territory);
            for language in subdirectories(&territory_dir)? {
                let language_dir = territory_dir.join(&language);
                let entries =
                    fs::read_dir(&language_dir).map_err(ResourceError::io(&language_dir))?;
                for entry in entries {
                    let path = entry.map_err(ResourceError::io(&language_dir))?.path();
                    if !path.is_file() || path.extension().is_none_or(|ext| ext != "html") {
                        continue;
                    }
                    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    found.push(HtmlArtifact {
                        territory: territory.clone(),
                        language: language.clone(),
                        stem: stem.to_string(),
                        path: path.clone(),
                    });
                }
            }
        }
        found.sort();
        Ok(found)
    }
}

fn subdirectories(dir: &Path) -> Result<Vec<String>, ResourceError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(ResourceError::io(dir))? {
        let entry = entry.map_err(ResourceError::io(dir))?;
        if entry.path().is_dir()
            && let Some(name) = entry.file_name().to_str()
        {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
