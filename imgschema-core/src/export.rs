// CSV export of generated schemas

use crate::error::ExportError;
use crate::schema::ResultRow;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CSV_MIME: &str = "text/csv";
pub const CSV_HEADER: [&str; 2] = ["url", "img_schema"];

/// `image_schemas_<YYYY-MM-DD>.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("image_schemas_{}.csv", date.format("%Y-%m-%d"))
}

/// Encode rows as UTF-8 CSV. The header is written even when there are no rows.
pub fn encode_csv(rows: &[ResultRow]) -> Result<Vec<u8>, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}

/// Holds the last encoded buffer together with the rows it came from.
/// A single slot: new rows replace it.
#[derive(Debug, Default)]
pub struct ExportCache {
    rows: Vec<ResultRow>,
    bytes: Option<Vec<u8>>,
    encodes: usize,
}

impl ExportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_encode(&mut self, rows: &[ResultRow]) -> Result<&[u8], ExportError> {
        let hit = self.bytes.is_some() && self.rows.as_slice() == rows;
        if hit {
            debug!("Reusing cached CSV buffer ({} rows)", rows.len());
        } else {
            let bytes = encode_csv(rows)?;
            self.rows = rows.to_vec();
            self.bytes = Some(bytes);
            self.encodes += 1;
        }
        Ok(self.bytes.as_deref().unwrap_or_default())
    }

    /// How many times the cache actually encoded
    pub fn encode_count(&self) -> usize {
        self.encodes
    }
}

/// A finished, downloadable CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    pub fn new(date: NaiveDate, bytes: Vec<u8>) -> Self {
        Self {
            filename: export_filename(date),
            mime: CSV_MIME,
            bytes,
        }
    }

    /// Write to `target`. A directory receives the dated filename, anything
    /// else is used as the file path. A missing target that ends in a
    /// separator or has no extension is created as a directory.
    pub fn save(&self, target: &Path) -> Result<PathBuf, ExportError> {
        let path = if names_directory(target) {
            fs::create_dir_all(target)?;
            target.join(&self.filename)
        } else {
            target.to_path_buf()
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

fn names_directory(target: &Path) -> bool {
    if target.is_dir() {
        return true;
    }
    if target.exists() {
        return false;
    }
    let trailing_separator = target
        .to_string_lossy()
        .chars()
        .last()
        .is_some_and(std::path::is_separator);
    trailing_separator || target.extension().is_none()
}
