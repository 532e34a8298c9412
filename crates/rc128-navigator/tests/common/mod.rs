//! Shared fixtures for navigator integration tests.
#![allow(dead_code)]

use rc128_model::{ArticleRecord, Locale};

pub fn article(
    id: &str,
    language: Locale,
    part: (&str, &str),
    chapter: (&str, &str),
    article: (&str, &str),
) -> ArticleRecord {
    ArticleRecord::new(id, language, part, chapter, article)
}

/// Part One with Chapter 1 / Article 1 and Chapter 3 / Article 5, in English.
pub fn two_chapter_records() -> Vec<ArticleRecord> {
    vec![
        article(
            "en-1",
            Locale::En,
            ("Part One", "General Provisions"),
            ("Chapter 1", "Scope"),
            ("Article 1", "Definitions"),
        )
        .with_body("In these conditions the following words have the meanings stated."),
        article(
            "en-5",
            Locale::En,
            ("Part One", "General Provisions"),
            ("Chapter 3", "Claims"),
            ("Article 5", "Notice of Claim"),
        )
        .with_body("The contractor shall give notice within 28 days."),
    ]
}

/// The same structure in both locales plus a second English part.
pub fn bilingual_records() -> Vec<ArticleRecord> {
    let mut records = two_chapter_records();
    records.push(article(
        "en-9",
        Locale::En,
        ("Part Two", "Administration"),
        ("Chapter 4", "Records"),
        ("Article 9", "Contemporaneous Records"),
    ));
    records.push(article(
        "ar-1",
        Locale::Ar,
        ("الباب الأول", "أحكام عامة"),
        ("الفصل 1", "النطاق"),
        ("المادة 1", "التعريفات"),
    ));
    records
}

pub const ARTICLE_5: &str = "article-article-5";
pub const CHAPTER_3: &str = "chapter-part-one-chapter-3";
pub const CHAPTER_1: &str = "chapter-part-one-chapter-1";
pub const PART_ONE: &str = "part-part-one";
