// Collecting the URL list from the supported input shapes

use crate::error::InputError;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the required column in tabular input. Matched case-sensitively.
pub const URL_COLUMN: &str = "url";

/// Where the URL list comes from
#[derive(Debug, Clone)]
pub enum UrlSource {
    /// CSV file with a `url` column
    Csv(PathBuf),
    /// Text file, one URL per line
    TextFile(PathBuf),
    /// Pasted text, one URL per line
    Text(String),
    /// URLs given one by one
    List(Vec<String>),
}

/// Resolve a source into the ordered URL list. An empty list is not an
/// error; callers treat it as nothing to do.
pub fn collect_urls(source: &UrlSource) -> Result<Vec<String>, InputError> {
    let urls = match source {
        UrlSource::Csv(path) => urls_from_csv_file(path)?,
        UrlSource::TextFile(path) => urls_from_text_file(path)?,
        UrlSource::Text(text) => urls_from_text(text),
        UrlSource::List(items) => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    };
    debug!("Collected {} URL(s)", urls.len());
    Ok(urls)
}

/// Split on line breaks, dropping blank lines.
pub fn urls_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn urls_from_text_file(path: &Path) -> Result<Vec<String>, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(urls_from_text(&content))
}

pub fn urls_from_csv_file(path: &Path) -> Result<Vec<String>, InputError> {
    let file = fs::File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    urls_from_csv_reader(file)
}

/// Read the `url` column of a headed CSV. Other columns are ignored and
/// rows with a blank cell are skipped.
pub fn urls_from_csv_reader<R: Read>(reader: R) -> Result<Vec<String>, InputError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let column = headers
        .iter()
        .position(|h| h == URL_COLUMN)
        .ok_or(InputError::MissingUrlColumn)?;

    let mut urls = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(cell) = record.get(column) {
            let cell = cell.trim();
            if !cell.is_empty() {
                urls.push(cell.to_string());
            }
        }
    }

    Ok(urls)
}
