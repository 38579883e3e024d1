//! Run configuration.
//!
//! Loaded from a TOML file (`geninfo.toml` by default) with `GENINFO__*`
//! environment variables layered on top, e.g. `GENINFO__WEBDRIVER__HOST` or
//! `GENINFO__TERRITORIES=MAD,CAT`. Every field has a default, so an absent
//! file is not an error.

use geninfo_format::{
    DEFAULT_BOOLEAN_PROPERTIES, DEFAULT_FLOAT_PROPERTIES, DEFAULT_INTEGER_PROPERTIES,
    PropertyTable,
};
use geninfo_types::{AllowList, Filters};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "geninfo.toml";
pub const ENV_PREFIX: &str = "GENINFO";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the entity tables.
    pub data_dir: PathBuf,
    /// Entity tables to process, in order. Each must be named `datos_<mode>.csv`.
    pub data_files: Vec<String>,
    pub territories_file: PathBuf,
    pub translations_file: PathBuf,
    pub template_dir: PathBuf,
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Territory allow-list; empty allows every territory.
    pub territories: Vec<String>,
    /// Language allow-list; empty allows every language.
    pub languages: Vec<String>,
    /// PNG quantizer binary. Captures stay uncompressed when unset.
    pub pngquant_path: Option<PathBuf>,
    pub autoescape: bool,
    pub webdriver: WebDriverConfig,
    pub export: ExportConfig,
    pub formatting: FormattingConfig,
    /// Extra variables available to every template.
    pub globals: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            data_files: vec!["datos_entidades.csv".to_string(), "datos_autonomas.csv".to_string()],
            territories_file: PathBuf::from("data/datos_territorios.csv"),
            translations_file: PathBuf::from("translations/strings.csv"),
            template_dir: PathBuf::from("template"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("infografias"),
            territories: Vec::new(),
            languages: Vec::new(),
            pngquant_path: None,
            autoescape: false,
            webdriver: WebDriverConfig::default(),
            export: ExportConfig::default(),
            formatting: FormattingConfig::default(),
            globals: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebDriverConfig {
    pub host: String,
    pub port: u16,
    pub headless: bool,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4444,
            headless: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub chart_class: String,
    pub chart_wait_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            window_width: 2480,
            window_height: 3700,
            chart_class: "highcharts-container".to_string(),
            chart_wait_secs: 3,
        }
    }
}

impl ExportConfig {
    pub fn chart_wait(&self) -> Duration {
        Duration::from_secs(self.chart_wait_secs)
    }
}

/// Property classification overrides. An absent list keeps the built-in one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormattingConfig {
    pub integer: Option<Vec<String>>,
    pub float: Option<Vec<String>>,
    pub boolean: Option<Vec<String>>,
}

fn list_or(list: &Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    match list {
        Some(list) => list.clone(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

impl FormattingConfig {
    pub fn property_table(&self) -> PropertyTable {
        PropertyTable::from_lists(
            &list_or(&self.integer, DEFAULT_INTEGER_PROPERTIES),
            &list_or(&self.float, DEFAULT_FLOAT_PROPERTIES),
            &list_or(&self.boolean, DEFAULT_BOOLEAN_PROPERTIES),
        )
    }
}

impl Config {
    /// Loads `path`, or `geninfo.toml` if present, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => {
                builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
            }
        };
        builder = builder.add_source(Self::environment());
        builder.build()?.try_deserialize()
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("territories")
            .with_list_parse_key("languages")
            .with_list_parse_key("data_files")
    }

    pub fn filters(&self) -> Filters {
        Filters::new(AllowList::new(&self.territories), AllowList::new(&self.languages))
    }

    pub fn property_table(&self) -> PropertyTable {
        self.formatting.property_table()
    }

    pub fn data_file_paths(&self) -> Vec<PathBuf> {
        self.data_files.iter().map(|f| self.data_dir.join(f)).collect()
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }
}
