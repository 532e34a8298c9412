//! Article record loaders for CSV and JSON exports of the data store.
//!
//! Both formats go through the same lenient row conversion: rows with an
//! unknown language are dropped, rows with an unparsable date keep the record
//! without a date. CSV rows with the wrong field count are dropped too. Every
//! such row is reported in [`LoadedRecords::issues`].

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use rc128_model::{ArticleRecord, Locale};

use crate::error::LoadError;

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "part_number",
    "chapter_number",
    "article_number",
    "language",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// What went wrong with one input row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowIssueKind {
    /// The row was dropped.
    UnknownLanguage(String),
    /// The row was kept without an effective date.
    InvalidDate(String),
    /// The row has a different number of fields than the header. Dropped.
    FieldCount { expected: usize, found: usize },
    /// The row could not be read or decoded. Dropped.
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RowIssue {
    /// 1-based row number (CSV line or JSON array position).
    pub row: usize,
    pub record_id: String,
    pub kind: RowIssueKind,
}

impl RowIssue {
    pub fn dropped(&self) -> bool {
        !matches!(self.kind, RowIssueKind::InvalidDate(_))
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RowIssueKind::UnknownLanguage(tag) => write!(
                f,
                "row {} ({}): unknown language {tag:?}, row dropped",
                self.row, self.record_id
            ),
            RowIssueKind::InvalidDate(value) => write!(
                f,
                "row {} ({}): invalid effective date {value:?}, date ignored",
                self.row, self.record_id
            ),
            RowIssueKind::FieldCount { expected, found } => write!(
                f,
                "row {} ({}): expected {expected} fields, found {found}, row dropped",
                self.row, self.record_id
            ),
            RowIssueKind::Unreadable(message) => write!(
                f,
                "row {} ({}): {message}, row dropped",
                self.row, self.record_id
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub source: PathBuf,
    pub records: Vec<ArticleRecord>,
    pub issues: Vec<RowIssue>,
}

impl LoadedRecords {
    pub fn dropped_count(&self) -> usize {
        self.issues.iter().filter(|issue| issue.dropped()).count()
    }
}

/// A row as exported, before validation. Every field is optional so that a
/// single bad row never fails the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawArticleRow {
    #[serde(default, deserialize_with = "string_or_number")]
    id: Option<String>,
    #[serde(default)]
    part_number: Option<String>,
    #[serde(default)]
    part_title: Option<String>,
    #[serde(default)]
    chapter_number: Option<String>,
    #[serde(default)]
    chapter_title: Option<String>,
    #[serde(default)]
    article_number: Option<String>,
    #[serde(default)]
    article_title: Option<String>,
    #[serde(default)]
    article_body: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    effective_date: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Int(n)) => Some(n.to_string()),
        Some(Raw::Float(n)) => Some(n.to_string()),
        None => None,
    })
}

/// Load records from a `.csv` or `.json` file.
pub fn load_records(path: &Path) -> Result<LoadedRecords, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let loaded = match extension.as_deref() {
        Some("csv") => load_csv_records(path)?,
        Some("json") => load_json_records(path)?,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };
    info!(
        path = %path.display(),
        records = loaded.records.len(),
        issues = loaded.issues.len(),
        "article records loaded"
    );
    Ok(loaded)
}

pub fn load_csv_records(path: &Path) -> Result<LoadedRecords, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
    parse_csv_records(&bytes, path)
}

pub fn load_json_records(path: &Path) -> Result<LoadedRecords, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
    parse_json_records(&bytes, path)
}

/// Parse CSV bytes. `path` is only used for error context.
///
/// Only a missing required column fails the file. Short, long or undecodable
/// rows are dropped and reported in [`LoadedRecords::issues`].
pub fn parse_csv_records(bytes: &[u8], path: &Path) -> Result<LoadedRecords, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: csv::StringRecord = reader
        .headers()
        .map_err(|e| LoadError::csv(path, &e))?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_ascii_lowercase())
        .collect();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: *column,
            });
        }
    }
    let id_column = headers.iter().position(|h| h == "id");

    let mut loaded = LoadedRecords {
        source: path.to_path_buf(),
        ..LoadedRecords::default()
    };
    for (idx, result) in reader.records().enumerate() {
        // header is line 1
        let fallback_row = idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let row = e
                    .position()
                    .map_or(fallback_row, |pos| pos.line() as usize);
                let kind = RowIssueKind::Unreadable(e.to_string());
                push_dropped(&mut loaded, row, format!("row-{row}"), kind);
                continue;
            }
        };
        let row = record
            .position()
            .map_or(fallback_row, |pos| pos.line() as usize);
        let record_id = id_column
            .and_then(|col| record.get(col))
            .filter(|id| !id.is_empty())
            .map_or_else(|| format!("row-{row}"), str::to_string);

        if record.len() != headers.len() {
            let kind = RowIssueKind::FieldCount {
                expected: headers.len(),
                found: record.len(),
            };
            push_dropped(&mut loaded, row, record_id, kind);
            continue;
        }
        match record.deserialize::<RawArticleRow>(Some(&headers)) {
            Ok(raw) => convert_row(raw, row, &mut loaded),
            Err(e) => {
                let kind = RowIssueKind::Unreadable(e.to_string());
                push_dropped(&mut loaded, row, record_id, kind);
            }
        }
    }
    Ok(loaded)
}

fn push_dropped(loaded: &mut LoadedRecords, row: usize, record_id: String, kind: RowIssueKind) {
    let issue = RowIssue {
        row,
        record_id,
        kind,
    };
    warn!(%issue, "article row rejected");
    loaded.issues.push(issue);
}

/// Parse a JSON array of article objects.
pub fn parse_json_records(bytes: &[u8], path: &Path) -> Result<LoadedRecords, LoadError> {
    let rows: Vec<RawArticleRow> =
        serde_json::from_slice(bytes).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let mut loaded = LoadedRecords {
        source: path.to_path_buf(),
        ..LoadedRecords::default()
    };
    for (idx, row) in rows.into_iter().enumerate() {
        convert_row(row, idx + 1, &mut loaded);
    }
    Ok(loaded)
}

fn convert_row(row: RawArticleRow, row_number: usize, loaded: &mut LoadedRecords) {
    let record_id = non_empty(row.id).unwrap_or_else(|| format!("row-{row_number}"));
    let language_tag = row.language.unwrap_or_default();
    let language = match language_tag.parse::<Locale>() {
        Ok(language) => language,
        Err(_) => {
            push_dropped(
                loaded,
                row_number,
                record_id,
                RowIssueKind::UnknownLanguage(language_tag),
            );
            return;
        }
    };

    let effective_date = match non_empty(row.effective_date) {
        None => None,
        Some(raw) => match parse_date(&raw) {
            Some(date) => Some(date),
            None => {
                let issue = RowIssue {
                    row: row_number,
                    record_id: record_id.clone(),
                    kind: RowIssueKind::InvalidDate(raw),
                };
                warn!(%issue, "article date ignored");
                loaded.issues.push(issue);
                None
            }
        },
    };

    loaded.records.push(ArticleRecord {
        id: record_id,
        part_number: row.part_number.unwrap_or_default(),
        part_title: row.part_title.unwrap_or_default(),
        chapter_number: row.chapter_number.unwrap_or_default(),
        chapter_title: row.chapter_title.unwrap_or_default(),
        article_number: row.article_number.unwrap_or_default(),
        article_title: row.article_title.unwrap_or_default(),
        article_body: row.article_body.unwrap_or_default(),
        language,
        effective_date,
    });
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts ISO dates and the day-first form used by older exports. Timestamps
/// are cut to their date part.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}
