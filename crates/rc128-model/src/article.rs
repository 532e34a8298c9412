//! Article records as served by the data store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::Locale;

/// One article of the statutory text, in one locale.
///
/// Records arrive pre-ordered by part, chapter and article. Key fields may be
/// blank when the upstream row is incomplete; the outline builder skips those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub part_title: String,
    #[serde(default)]
    pub chapter_number: String,
    #[serde(default)]
    pub chapter_title: String,
    #[serde(default)]
    pub article_number: String,
    #[serde(default)]
    pub article_title: String,
    #[serde(default)]
    pub article_body: String,
    pub language: Locale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
}

/// The (part, chapter, article) tuple identifying a record within one locale.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NaturalKey<'a> {
    pub part: &'a str,
    pub chapter: &'a str,
    pub article: &'a str,
}

impl ArticleRecord {
    /// Convenience constructor for the key and title fields.
    pub fn new(
        id: impl Into<String>,
        language: Locale,
        part: (&str, &str),
        chapter: (&str, &str),
        article: (&str, &str),
    ) -> Self {
        Self {
            id: id.into(),
            part_number: part.0.to_string(),
            part_title: part.1.to_string(),
            chapter_number: chapter.0.to_string(),
            chapter_title: chapter.1.to_string(),
            article_number: article.0.to_string(),
            article_title: article.1.to_string(),
            article_body: String::new(),
            language,
            effective_date: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.article_body = body.into();
        self
    }

    pub fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey {
            part: self.part_number.trim(),
            chapter: self.chapter_number.trim(),
            article: self.article_number.trim(),
        }
    }

    /// Names of the key fields that are blank.
    pub fn missing_key_fields(&self) -> Vec<&'static str> {
        let key = self.natural_key();
        let mut missing = Vec::new();
        if key.part.is_empty() {
            missing.push("part_number");
        }
        if key.chapter.is_empty() {
            missing.push("chapter_number");
        }
        if key.article.is_empty() {
            missing.push("article_number");
        }
        missing
    }

    pub fn is_malformed(&self) -> bool {
        !self.missing_key_fields().is_empty()
    }

    /// Case-insensitive match of `needle` against number, title and body.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        [&self.article_number, &self.article_title, &self.article_body]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
