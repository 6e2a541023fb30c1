use csv::{ReaderBuilder, Trim};
use csv_lens_common::{CsvConfig, CsvLensError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// One record, keyed by the header it was loaded with.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.iter().position(|c| c == column).map(|i| self.values[i].as_str())
    }

    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn values(&self) -> &[String] { &self.values }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter().map(String::as_str))
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Whole input held in memory, in file order.
#[derive(Debug, Clone)]
pub struct RowStore {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

impl RowStore {
    pub fn open(path: &Path, cfg: &CsvConfig) -> Result<Self> {
        let file = File::open(path).map_err(|source| CsvLensError::FileAccess { path: path.to_path_buf(), source })?;
        let store = Self::from_reader(file, cfg)?;
        log::debug!("loaded {} rows x {} columns from {}", store.len(), store.columns.len(), path.display());
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R, cfg: &CsvConfig) -> Result<Self> {
        // chars in U+0080..=U+00FF fit a u8 but never occur as one byte in UTF-8 input
        if !cfg.delimiter.is_ascii() {
            return Err(CsvLensError::Other(format!("delimiter must be ASCII, got '{}'", cfg.delimiter)));
        }
        let delimiter = cfg.delimiter as u8;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .trim(if cfg.trim { Trim::All } else { Trim::None })
            .from_reader(reader);
        let columns: Arc<[String]> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            if record.len() > columns.len() {
                log::warn!("row {}: {} fields for {} columns, extra fields dropped", i + 1, record.len(), columns.len());
            }
            // short rows padded with empty cells
            let values: Vec<String> = (0..columns.len())
                .map(|c| record.get(c).unwrap_or_default().to_string())
                .collect();
            rows.push(Row { columns: Arc::clone(&columns), values });
        }
        Ok(Self { columns, rows })
    }

    /// Schema: column names in header order.
    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn rows(&self) -> &[Row] { &self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> RowStore {
        RowStore::from_reader(text.as_bytes(), &CsvConfig::default()).unwrap()
    }

    #[test]
    fn header_and_order_preserved() {
        let s = load("name,brand,price\niphone,apple,999\ngalaxy,samsung,1199\n");
        assert_eq!(s.columns(), ["name", "brand", "price"]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.rows()[0].get("brand"), Some("apple"));
        assert_eq!(s.rows()[1].get("name"), Some("galaxy"));
        assert_eq!(s.rows()[1].get("missing"), None);
    }

    #[test]
    fn quoted_fields_unescaped() {
        let s = load("name,note\n\"a, b\",\"say \"\"hi\"\"\"\n");
        assert_eq!(s.rows()[0].get("name"), Some("a, b"));
        assert_eq!(s.rows()[0].get("note"), Some("say \"hi\""));
    }

    #[test]
    fn ragged_rows_padded_and_truncated() {
        let s = load("a,b,c\n1\n1,2,3,4\n");
        assert_eq!(s.rows()[0].values(), ["1", "", ""]);
        assert_eq!(s.rows()[1].values(), ["1", "2", "3"]);
    }

    #[test]
    fn custom_delimiter_and_trim() {
        let cfg = CsvConfig { delimiter: ';', trim: true };
        let s = RowStore::from_reader("a; b\n 1 ;2\n".as_bytes(), &cfg).unwrap();
        assert_eq!(s.columns(), ["a", "b"]);
        assert_eq!(s.rows()[0].get("a"), Some("1"));
    }

    #[test]
    fn latin1_delimiter_rejected() {
        let cfg = CsvConfig { delimiter: 'é', trim: false };
        let err = RowStore::from_reader("aéb\n1é2\n".as_bytes(), &cfg).unwrap_err();
        assert!(err.to_string().contains("ASCII"));
    }

    #[test]
    fn header_only_is_empty() {
        let s = load("a,b\n");
        assert!(s.is_empty());
        assert_eq!(s.columns().len(), 2);
    }

    #[test]
    fn missing_file_is_file_access() {
        let err = RowStore::open(Path::new("/definitely/not/here.csv"), &CsvConfig::default()).unwrap_err();
        assert_eq!(err.kind(), csv_lens_common::ErrorKind::FileAccess);
    }
}
