//! Per-language strings from the master translation table.
//!
//! The master table has one key column and one column per language, named
//! after the language (`Castellano`, `Català`, ...). Blank cells are treated
//! as absent so a template can fall back on its own default.

use crate::{cell, SourceError};
use geninfo_types::Language;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;

/// Header of the key column.
pub const KEY_COLUMN: &str = "Código";

static EMPTY: TranslationTable = TranslationTable(BTreeMap::new());

/// Key → string mapping for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable(BTreeMap<String, String>);

impl TranslationTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// All supported languages, read from the master table once.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    tables: HashMap<&'static str, TranslationTable>,
}

impl TranslationCatalog {
    /// Reads the master table. A missing file yields an empty catalog.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "Translation table '{}' not found, templates render without translations",
                path.display()
            );
            return Ok(Self::default());
        }
        let origin = path.display().to_string();
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(SourceError::csv(&origin))?;
        Self::read(reader, &origin)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, SourceError> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        Self::read(reader, "<reader>")
    }

    fn read<R: io::Read>(mut reader: csv::Reader<R>, origin: &str) -> Result<Self, SourceError> {
        let headers = reader.headers().map_err(SourceError::csv(origin))?.clone();
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        };

        let key_idx = position(KEY_COLUMN).ok_or_else(|| SourceError::MissingColumn {
            origin: origin.to_string(),
            column: KEY_COLUMN.to_string(),
        })?;

        let columns: Vec<(Language, usize)> = Language::ALL
            .into_iter()
            .filter_map(|lang| match position(lang.name) {
                Some(idx) => Some((lang, idx)),
                None => {
                    warn!(
                        "{}: no '{}' column, '{}' has no translations",
                        origin, lang.name, lang.code
                    );
                    None
                }
            })
            .collect();

        let mut entries: HashMap<&'static str, BTreeMap<String, String>> = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(SourceError::csv(origin))?;
            let key = cell(&record, key_idx).trim();
            if key.is_empty() {
                continue;
            }
            for (lang, idx) in &columns {
                let value = cell(&record, *idx).trim();
                if value.is_empty() {
                    continue;
                }
                entries
                    .entry(lang.code)
                    .or_default()
                    .insert(key.to_string(), value.to_string());
            }
        }

        let tables: HashMap<_, _> = entries
            .into_iter()
            .map(|(code, map)| (code, TranslationTable(map)))
            .collect();
        for (code, table) in &tables {
            debug!("{}: {} strings for '{}'", origin, table.len(), code);
        }
        Ok(Self { tables })
    }

    /// The table for a language code; unknown codes get an empty table.
    pub fn load(&self, code: &str) -> &TranslationTable {
        Language::from_code(code)
            .and_then(|lang| self.tables.get(lang.code))
            .unwrap_or(&EMPTY)
    }

    /// Writes `{code}.json` for every supported language.
    pub fn write_json<P: AsRef<Path>>(&self, dir: P) -> Result<(), SourceError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| SourceError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        for lang in Language::ALL {
            let path = dir.join(format!("{}.json", lang.code));
            let table = self.load(lang.code);
            let json = serde_json::to_string_pretty(&table.0)
                .map_err(|e| SourceError::Write {
                    path: path.clone(),
                    source: io::Error::other(e),
                })?;
            fs::write(&path, json).map_err(|source| SourceError::Write {
                path: path.clone(),
                source,
            })?;
            info!("Wrote {} strings to {}", table.len(), path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "\
Código,Castellano,Català,Euskera,Galego
TXT001,Hola,Hola,Kaixo,Ola
TXT002,Empleo,Ocupació,,Emprego
TXT059,  mil  ,mil,mila,mil
,huérfano,orfe,,
";

    #[test]
    fn load_is_case_insensitive() {
        let catalog = TranslationCatalog::from_reader(MASTER.as_bytes()).unwrap();
        assert_eq!(catalog.load("eus").get("TXT001"), Some("Kaixo"));
        assert_eq!(catalog.load("EUS").get("TXT001"), Some("Kaixo"));
        assert_eq!(catalog.load("Cat").get("TXT002"), Some("Ocupació"));
    }

    #[test]
    fn blank_cells_are_absent_and_values_trimmed() {
        let catalog = TranslationCatalog::from_reader(MASTER.as_bytes()).unwrap();
        assert_eq!(catalog.load("eus").get("TXT002"), None);
        assert_eq!(catalog.load("cas").get("TXT059"), Some("mil"));
        assert_eq!(catalog.load("cas").len(), 3);
    }

    #[test]
    fn unknown_language_is_empty() {
        let catalog = TranslationCatalog::from_reader(MASTER.as_bytes()).unwrap();
        assert!(catalog.load("eng").is_empty());
    }

    #[test]
    fn missing_language_column_yields_empty_table() {
        let master = "Código,Castellano\nTXT001,Hola\n";
        let catalog = TranslationCatalog::from_reader(master.as_bytes()).unwrap();
        assert_eq!(catalog.load("cas").get("TXT001"), Some("Hola"));
        assert!(catalog.load("gal").is_empty());
    }

    #[test]
    fn missing_key_column_is_an_error() {
        let err =
            TranslationCatalog::from_reader("Clave,Castellano\nA,B\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn { .. }));
    }

    #[test]
    fn missing_file_is_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TranslationCatalog::from_path(dir.path().join("nope.csv")).unwrap();
        assert!(catalog.load("cas").is_empty());
    }

    #[test]
    fn json_export_writes_one_file_per_language() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TranslationCatalog::from_reader(MASTER.as_bytes()).unwrap();
        catalog.write_json(dir.path().join("json")).unwrap();

        let cas = std::fs::read_to_string(dir.path().join("json/cas.json")).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&cas).unwrap();
        assert_eq!(parsed.get("TXT001").map(String::as_str), Some("Hola"));
        assert!(dir.path().join("json/gal.json").exists());
    }
}
