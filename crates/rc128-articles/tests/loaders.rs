use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rc128_articles::{LoadError, RowIssueKind, load_records, parse_csv_records};
use rc128_model::Locale;

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "rc128-articles-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(path: &Path, contents: &[u8]) {
    fs::write(path, contents).unwrap();
}

const ARTICLES_CSV: &str = "\u{feff}ID,Part_Number,Part_Title,Chapter_Number,Chapter_Title,Article_Number,Article_Title,Article_Body,Language,Effective_Date
en-1,Part One,General Provisions,Chapter 1,Scope,Article 1,Definitions,Terms used in these rules.,en,2023-07-01
en-5,Part One,General Provisions,Chapter 3,Claims,Article 5,Notice of Claim,Notice shall be given within 28 days.,EN,01/07/2023
fr-1,Partie 1,,Chapitre 1,,Article 1,,,fr,
ar-1,الباب الأول,,الفصل 1,,المادة 1,,,ar,soon
";

#[test]
fn loads_csv_with_bom_and_mixed_case_headers() {
    let dir = unique_temp_dir("csv");
    let path = dir.join("articles.csv");
    write(&path, ARTICLES_CSV.as_bytes());

    let loaded = load_records(&path).expect("load csv");
    assert_eq!(loaded.source, path);
    let ids: Vec<&str> = loaded.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["en-1", "en-5", "ar-1"]);

    let first = &loaded.records[0];
    assert_eq!(first.part_title, "General Provisions");
    assert_eq!(first.article_title, "Definitions");
    assert_eq!(first.effective_date, NaiveDate::from_ymd_opt(2023, 7, 1));
    assert_eq!(loaded.records[1].effective_date, NaiveDate::from_ymd_opt(2023, 7, 1));
    assert_eq!(loaded.records[2].language, Locale::Ar);
    assert_eq!(loaded.records[2].effective_date, None);
}

#[test]
fn row_issues_carry_line_numbers() {
    let loaded = parse_csv_records(ARTICLES_CSV.as_bytes(), Path::new("inline.csv")).expect("parse");
    assert_eq!(loaded.issues.len(), 2);
    assert_eq!(loaded.dropped_count(), 1);

    let unknown = &loaded.issues[0];
    assert_eq!(unknown.row, 4);
    assert_eq!(unknown.record_id, "fr-1");
    assert_eq!(unknown.kind, RowIssueKind::UnknownLanguage("fr".to_string()));
    assert!(unknown.dropped());

    let bad_date = &loaded.issues[1];
    assert_eq!(bad_date.row, 5);
    assert!(!bad_date.dropped());
    assert_eq!(
        bad_date.to_string(),
        "row 5 (ar-1): invalid effective date \"soon\", date ignored"
    );
}

#[test]
fn malformed_rows_are_loaded_for_the_builder_to_judge() {
    let csv = "id,part_number,chapter_number,article_number,language\n\
               x-1,Part One,,Article 1,en\n";
    let loaded = parse_csv_records(csv.as_bytes(), Path::new("inline.csv")).expect("parse");
    assert_eq!(loaded.records.len(), 1);
    assert!(loaded.records[0].is_malformed());
    assert!(loaded.issues.is_empty());
}

#[test]
fn missing_required_column_is_an_error() {
    let csv = "id,part_number,chapter_number,language\nx-1,P,C,en\n";
    let err = parse_csv_records(csv.as_bytes(), Path::new("short.csv")).unwrap_err();
    match err {
        LoadError::MissingColumn { column, .. } => assert_eq!(column, "article_number"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn loads_json_array() {
    let dir = unique_temp_dir("json");
    let path = dir.join("articles.JSON");
    write(
        &path,
        r#"[
            {"id": "en-1", "part_number": "Part One", "chapter_number": "Chapter 1",
             "article_number": "Article 1", "article_title": "Definitions",
             "language": "en-GB", "effective_date": "2023-07-01T00:00:00Z"},
            {"id": 2, "part_number": "Part One", "chapter_number": "Chapter 1",
             "article_number": "Article 2", "language": "de"}
        ]"#
        .as_bytes(),
    );

    let loaded = load_records(&path).expect("load json");
    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.records[0].language, Locale::En);
    assert_eq!(loaded.issues[0].row, 2);
    assert_eq!(loaded.issues[0].record_id, "2");
}

#[test]
fn invalid_json_reports_path() {
    let dir = unique_temp_dir("bad-json");
    let path = dir.join("articles.json");
    write(&path, b"{\"not\": \"an array\"}");
    let err = load_records(&path).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
    assert!(err.to_string().contains("articles.json"));
}

#[test]
fn unsupported_extension_and_missing_file() {
    let err = load_records(Path::new("articles.xlsx")).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat { .. }));

    let dir = unique_temp_dir("missing");
    let err = load_records(&dir.join("absent.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn short_row_is_dropped_without_failing_the_file() {
    let csv = "id,part_number,chapter_number,article_number,language\n\
               1,P1,C1,A1,en\n\
               2,P1,C1\n\
               3,P1,C1,A3,en\n";
    let loaded = parse_csv_records(csv.as_bytes(), Path::new("x.csv")).expect("parse");

    let ids: Vec<&str> = loaded.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(loaded.dropped_count(), 1);

    let issue = &loaded.issues[0];
    assert_eq!(issue.row, 3);
    assert_eq!(issue.record_id, "2");
    assert_eq!(
        issue.kind,
        RowIssueKind::FieldCount {
            expected: 5,
            found: 3
        }
    );
    assert_eq!(
        issue.to_string(),
        "row 3 (2): expected 5 fields, found 3, row dropped"
    );
}

#[test]
fn long_row_is_dropped_too() {
    let csv = "id,part_number,chapter_number,article_number,language\n\
               1,P1,C1,A1,en,extra\n\
               2,P1,C1,A2,en\n";
    let loaded = parse_csv_records(csv.as_bytes(), Path::new("x.csv")).expect("parse");

    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.records[0].id, "2");
    assert!(loaded.issues[0].dropped());
    assert_eq!(loaded.issues[0].row, 2);
}
