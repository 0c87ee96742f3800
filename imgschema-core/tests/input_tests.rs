// Tests for URL input collection

use imgschema_core::error::InputError;
use imgschema_core::input::{
    UrlSource, collect_urls, urls_from_csv_file, urls_from_csv_reader, urls_from_text,
    urls_from_text_file,
};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

// ============================================================================
// Text Input Tests
// ============================================================================

#[test]
fn test_urls_from_text_splits_lines() {
    let urls = urls_from_text("https://a.example\nhttps://b.example\n");
    assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
}

#[test]
fn test_urls_from_text_blank_lines_dropped() {
    let urls = urls_from_text("https://a.example\n\n   \nhttps://b.example");
    assert_eq!(urls.len(), 2);
    assert_eq!(urls[1], "https://b.example");
}

#[test]
fn test_urls_from_text_crlf() {
    let urls = urls_from_text("https://a.example\r\nhttps://b.example\r\n");
    assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
}

#[test]
fn test_urls_from_text_empty() {
    assert!(urls_from_text("").is_empty());
    assert!(urls_from_text("  \n\t\n").is_empty());
}

#[test]
fn test_urls_from_text_keeps_order_and_duplicates() {
    let urls = urls_from_text("https://b.example\nhttps://a.example\nhttps://b.example");
    assert_eq!(
        urls,
        vec!["https://b.example", "https://a.example", "https://b.example"]
    );
}

#[test]
fn test_urls_from_text_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "https://example.com")?;
    writeln!(temp_file)?;
    writeln!(temp_file, "https://example.org/page")?;

    let urls = urls_from_text_file(temp_file.path())?;
    assert_eq!(urls, vec!["https://example.com", "https://example.org/page"]);
    Ok(())
}

#[test]
fn test_urls_from_missing_text_file() {
    let result = urls_from_text_file(&PathBuf::from("/nonexistent/urls.txt"));
    assert!(matches!(result, Err(InputError::Io { .. })));
}

// ============================================================================
// CSV Input Tests
// ============================================================================

#[test]
fn test_urls_from_csv_url_column() {
    let data = "url\nhttps://a.example\nhttps://b.example\n";
    let urls = urls_from_csv_reader(data.as_bytes()).unwrap();
    assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
}

#[test]
fn test_urls_from_csv_other_columns_ignored() {
    let data = "title,url,notes\nHome,https://a.example,x\nAbout,https://a.example/about,\"y, z\"\n";
    let urls = urls_from_csv_reader(data.as_bytes()).unwrap();
    assert_eq!(urls, vec!["https://a.example", "https://a.example/about"]);
}

#[test]
fn test_urls_from_csv_blank_cells_skipped() {
    let data = "url,title\nhttps://a.example,A\n,B\n  ,C\nhttps://c.example,C\n";
    let urls = urls_from_csv_reader(data.as_bytes()).unwrap();
    assert_eq!(urls, vec!["https://a.example", "https://c.example"]);
}

#[test]
fn test_urls_from_csv_column_is_case_sensitive() {
    let data = "URL\nhttps://a.example\n";
    let result = urls_from_csv_reader(data.as_bytes());
    assert!(matches!(result, Err(InputError::MissingUrlColumn)));
}

#[test]
fn test_urls_from_csv_missing_column() {
    let data = "link\nhttps://a.example\n";
    let result = urls_from_csv_reader(data.as_bytes());
    assert!(matches!(result, Err(InputError::MissingUrlColumn)));
}

#[test]
fn test_urls_from_csv_empty_input() {
    let urls = urls_from_csv_reader("".as_bytes()).unwrap();
    assert!(urls.is_empty());
}

#[test]
fn test_urls_from_csv_header_only() {
    let urls = urls_from_csv_reader("url\n".as_bytes()).unwrap();
    assert!(urls.is_empty());
}

#[test]
fn test_urls_from_csv_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "url")?;
    writeln!(temp_file, "https://example.com/a")?;
    writeln!(temp_file, "https://example.com/b")?;

    let urls = urls_from_csv_file(temp_file.path())?;
    assert_eq!(urls.len(), 2);
    Ok(())
}

// ============================================================================
// Source Dispatch Tests
// ============================================================================

#[test]
fn test_collect_urls_from_list() {
    let source = UrlSource::List(vec![
        " https://a.example ".to_string(),
        "".to_string(),
        "https://b.example".to_string(),
    ]);
    let urls = collect_urls(&source).unwrap();
    assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
}

#[test]
fn test_collect_urls_from_text() {
    let source = UrlSource::Text("https://a.example\n\nhttps://b.example".to_string());
    assert_eq!(collect_urls(&source).unwrap().len(), 2);
}

#[test]
fn test_collect_urls_from_csv_path() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "url")?;
    writeln!(temp_file, "https://example.com")?;

    let source = UrlSource::Csv(temp_file.path().to_path_buf());
    assert_eq!(collect_urls(&source)?, vec!["https://example.com"]);
    Ok(())
}
