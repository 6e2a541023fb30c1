use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub precision: Option<usize>, // None prints the shortest round-trip form
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

fn default_empty_message() -> String {
    "No rows match the filter condition".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: None,
            empty_message: default_empty_message(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub trim: bool,
}

fn default_delimiter() -> char {
    ','
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            trim: false,
        }
    }
}

/// User-facing error texts; override these to localize the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "default_filter_error")]
    pub filter_error: String,
    #[serde(default = "default_aggregate_error")]
    pub aggregate_error: String,
    #[serde(default = "default_column_error")]
    pub column_error: String,
    #[serde(default = "default_error")]
    pub error: String,
    #[serde(default = "default_file_not_found")]
    pub file_not_found: String, // `{path}` is replaced with the input path
}

fn default_filter_error() -> String {
    "Filter error".into()
}
fn default_aggregate_error() -> String {
    "Aggregate error".into()
}
fn default_column_error() -> String {
    "Column error".into()
}
fn default_error() -> String {
    "Error".into()
}
fn default_file_not_found() -> String {
    "file '{path}' not found or unreadable".into()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            filter_error: default_filter_error(),
            aggregate_error: default_aggregate_error(),
            column_error: default_column_error(),
            error: default_error(),
            file_not_found: default_file_not_found(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub csv: CsvConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        if let Ok(env_path) = std::env::var("CSV_LENS_CONFIG") {
            return PathBuf::from(env_path); // $CSV_LENS_CONFIG overrides default config path
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("csv-lens")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let cfg: Self =
            toml::from_str(content).map_err(|e| crate::CsvLensError::Other(e.to_string()))?;
        if !cfg.csv.delimiter.is_ascii() {
            return Err(crate::CsvLensError::Other(format!(
                "csv.delimiter must be a single ASCII character, got '{}'",
                cfg.csv.delimiter
            )));
        }
        Ok(cfg)
    }
}
