use std::path::PathBuf;

use rc128_articles::RowIssue;
use rc128_model::{Locale, LookupEntry};
use rc128_navigator::{BuildReport, NavigationPhase, Selection, Toggle};

#[derive(Debug)]
pub struct TocResult {
    pub source: PathBuf,
    pub language: Locale,
    pub rendered: String,
    pub selection: Option<(String, Selection)>,
    pub toggles: Vec<(String, Toggle)>,
    pub phase: NavigationPhase,
    pub report: BuildReport,
}

#[derive(Debug)]
pub struct ArticleRow {
    pub id: String,
    pub part: String,
    pub chapter: String,
    pub article: String,
    pub title: String,
    pub effective_date: Option<String>,
}

#[derive(Debug)]
pub struct ArticlesResult {
    pub source: PathBuf,
    pub language: Locale,
    pub search: Option<String>,
    pub rows: Vec<ArticleRow>,
}

#[derive(Debug)]
pub struct CheckResult {
    pub source: PathBuf,
    pub record_count: usize,
    pub reports: Vec<BuildReport>,
    pub issues: Vec<RowIssue>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct LookupResult {
    pub table: &'static str,
    pub entries: Vec<&'static LookupEntry>,
}
