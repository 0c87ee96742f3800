// Tests for schema serialization and CSV export

use chrono::NaiveDate;
use imgschema_core::export::{
    CSV_MIME, CsvExport, ExportCache, encode_csv, export_filename,
};
use imgschema_core::schema::{PageSchema, ResultRow};
use imgschema_scanner::ImageRecord;
use tempfile::TempDir;

fn sample_images() -> Vec<ImageRecord> {
    vec![
        ImageRecord::new("/a.jpg".to_string())
            .with_alt(Some("Jane".to_string()))
            .with_dimensions(Some("100".to_string()), None),
        ImageRecord::new("/b.png".to_string()),
    ]
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

// ============================================================================
// PageSchema Tests
// ============================================================================

#[test]
fn test_page_schema_json_ld_shape() {
    let schema = PageSchema::new("https://example.com", sample_images());
    let json = schema.to_json_ld().unwrap();

    assert_eq!(
        json,
        concat!(
            r#"{"@context":"https://schema.org","@type":"ImageObject","url":"https://example.com","image":["#,
            r#"{"@type":"ImageObject","name":"Jane","description":"Jane","contentUrl":"/a.jpg","height":"100"},"#,
            r#"{"@type":"ImageObject","name":null,"description":null,"contentUrl":"/b.png"}]}"#
        )
    );
}

#[test]
fn test_empty_page_schema() {
    let json = PageSchema::empty("https://example.com/none").to_json_ld().unwrap();
    assert_eq!(
        json,
        r#"{"@context":"https://schema.org","@type":"ImageObject","url":"https://example.com/none","image":[]}"#
    );
}

#[test]
fn test_page_schema_decodes_back() {
    let schema = PageSchema::new("https://example.com", sample_images());
    let decoded = PageSchema::from_json_ld(&schema.to_json_ld().unwrap()).unwrap();
    assert_eq!(decoded, schema);
}

#[test]
fn test_result_row_url_matches_schema_url() {
    let schema = PageSchema::new("https://example.com/x?y=1", sample_images());
    let row = ResultRow::from_schema(&schema).unwrap();

    let value: serde_json::Value = serde_json::from_str(&row.img_schema).unwrap();
    let obj = value.as_object().unwrap();
    for key in ["@context", "@type", "url", "image"] {
        assert!(obj.contains_key(key), "missing key {}", key);
    }
    assert_eq!(obj["url"], row.url.as_str());
}

// ============================================================================
// CSV Encoding Tests
// ============================================================================

#[test]
fn test_export_filename() {
    assert_eq!(export_filename(date()), "image_schemas_2024-03-07.csv");
}

#[test]
fn test_encode_csv_header_only() {
    let bytes = encode_csv(&[]).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "url,img_schema\n");
}

#[test]
fn test_encode_csv_rows_in_order_and_readable() {
    let rows = vec![
        ResultRow::from_schema(&PageSchema::new("https://a.example", sample_images())).unwrap(),
        ResultRow::from_schema(&PageSchema::empty("https://b.example")).unwrap(),
    ];
    let bytes = encode_csv(&rows).unwrap();

    let mut rdr = csv::Reader::from_reader(bytes.as_slice());
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["url", "img_schema"]);

    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][0], "https://a.example");
    assert_eq!(&records[0][1], rows[0].img_schema.as_str());
    assert_eq!(&records[1][0], "https://b.example");

    let decoded = PageSchema::from_json_ld(&records[1][1]).unwrap();
    assert!(decoded.image.is_empty());
}

#[test]
fn test_encode_csv_quotes_json() {
    let rows = vec![ResultRow::from_schema(&PageSchema::empty("https://a.example")).unwrap()];
    let text = String::from_utf8(encode_csv(&rows).unwrap()).unwrap();
    // JSON contains commas and quotes, so the cell must be quoted with doubled quotes
    assert!(text.contains(r#""{""@context"":""https://schema.org"","#));
}

// ============================================================================
// Export Cache Tests
// ============================================================================

#[test]
fn test_export_cache_reuses_identical_rows() {
    let rows = vec![ResultRow::from_schema(&PageSchema::empty("https://a.example")).unwrap()];
    let mut cache = ExportCache::new();

    let first = cache.get_or_encode(&rows).unwrap().to_vec();
    let second = cache.get_or_encode(&rows.clone()).unwrap().to_vec();

    assert_eq!(first, second);
    assert_eq!(cache.encode_count(), 1);
}

#[test]
fn test_export_cache_replaced_by_new_rows() {
    let rows_a = vec![ResultRow::from_schema(&PageSchema::empty("https://a.example")).unwrap()];
    let rows_b = vec![ResultRow::from_schema(&PageSchema::empty("https://b.example")).unwrap()];
    let mut cache = ExportCache::new();

    cache.get_or_encode(&rows_a).unwrap();
    let b = cache.get_or_encode(&rows_b).unwrap().to_vec();
    assert!(String::from_utf8(b).unwrap().contains("https://b.example"));
    assert_eq!(cache.encode_count(), 2);

    cache.get_or_encode(&rows_a).unwrap();
    assert_eq!(cache.encode_count(), 3);
}

// ============================================================================
// CsvExport Tests
// ============================================================================

#[test]
fn test_csv_export_metadata() {
    let export = CsvExport::new(date(), b"url,img_schema\n".to_vec());
    assert_eq!(export.mime, CSV_MIME);
    assert_eq!(export.mime, "text/csv");
    assert_eq!(export.filename, "image_schemas_2024-03-07.csv");
}

#[test]
fn test_csv_export_save_to_directory() {
    let dir = TempDir::new().unwrap();
    let export = CsvExport::new(date(), b"url,img_schema\n".to_vec());

    let path = export.save(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("image_schemas_2024-03-07.csv"));
    assert_eq!(std::fs::read(&path).unwrap(), export.bytes);
}

#[test]
fn test_csv_export_save_to_file_path() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out").join("schemas.csv");
    let export = CsvExport::new(date(), b"url,img_schema\n".to_vec());

    let path = export.save(&target).unwrap();

    assert_eq!(path, target);
    assert!(target.exists());
}

#[test]
fn test_csv_export_save_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let target = format!("{}/out/", dir.path().display());
    let export = CsvExport::new(date(), b"url,img_schema\n".to_vec());

    let path = export.save(std::path::Path::new(&target)).unwrap();

    assert_eq!(path, dir.path().join("out").join("image_schemas_2024-03-07.csv"));
    assert_eq!(std::fs::read(&path).unwrap(), export.bytes);
}

#[test]
fn test_csv_export_save_extensionless_target_is_directory() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("reports");
    let export = CsvExport::new(date(), b"url,img_schema\n".to_vec());

    let path = export.save(&target).unwrap();

    assert!(target.is_dir());
    assert_eq!(path, target.join("image_schemas_2024-03-07.csv"));
}
