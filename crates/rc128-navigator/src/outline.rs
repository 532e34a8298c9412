//! Outline builder: flat article records into a Part → Chapter → Article tree.
//!
//! The builder makes a single pass over the records of one locale and creates
//! parts, chapters and articles lazily in first-seen order. It never fails;
//! incomplete rows and repeated natural keys are recorded in the
//! [`BuildReport`] and skipped.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use rc128_model::{
    ArticleKeying, ArticleRecord, Locale, NodeId, NodeKind, OrderPolicy, OutlineOptions,
};

/// One node of the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    pub id: NodeId,
    pub title: String,
    pub kind: NodeKind,
    pub children: Vec<OutlineNode>,
    /// Index of the originating record in the builder input (articles only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_index: Option<usize>,
}

impl OutlineNode {
    fn section(id: NodeId, kind: NodeKind, number: &str, title: &str) -> Self {
        Self {
            id,
            title: display_title(number, title),
            kind,
            children: Vec::new(),
            record_index: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

fn display_title(number: &str, title: &str) -> String {
    let number = number.trim();
    let title = title.trim();
    if title.is_empty() {
        number.to_string()
    } else {
        format!("{number}: {title}")
    }
}

/// Position of a node in the part/chapter/article vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeLocation {
    part: usize,
    chapter: Option<usize>,
    article: Option<usize>,
}

/// The built outline for one locale, with an id index.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    language: Locale,
    parts: Vec<OutlineNode>,
    index: HashMap<NodeId, NodeLocation>,
}

impl PartialEq for Outline {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language && self.parts == other.parts
    }
}

impl Eq for Outline {}

impl Outline {
    pub fn language(&self) -> Locale {
        self.language
    }

    /// Top-level part nodes in first-seen order.
    pub fn parts(&self) -> &[OutlineNode] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Total number of nodes at all levels.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn find(&self, id: &str) -> Option<&OutlineNode> {
        let location = self.index.get(id)?;
        let part = self.parts.get(location.part)?;
        let Some(chapter_idx) = location.chapter else {
            return Some(part);
        };
        let chapter = part.children.get(chapter_idx)?;
        match location.article {
            Some(article_idx) => chapter.children.get(article_idx),
            None => Some(chapter),
        }
    }

    /// Owning part and chapter ids of an article. `None` for unknown ids and
    /// for ids that are not articles.
    pub fn ancestors_of(&self, article_id: &str) -> Option<(&NodeId, &NodeId)> {
        let location = self.index.get(article_id)?;
        location.article?;
        let part = self.parts.get(location.part)?;
        let chapter = part.children.get(location.chapter?)?;
        Some((&part.id, &chapter.id))
    }

    /// Input index of the record behind an article id.
    pub fn record_index(&self, article_id: &str) -> Option<usize> {
        self.find(article_id)
            .filter(|node| node.kind == NodeKind::Article)
            .and_then(|node| node.record_index)
    }

    /// Article ids in outline order.
    pub fn article_ids(&self) -> Vec<&NodeId> {
        self.nodes()
            .filter(|node| node.kind == NodeKind::Article)
            .map(|node| &node.id)
            .collect()
    }

    /// Part and chapter ids in outline order.
    pub fn section_ids(&self) -> Vec<&NodeId> {
        self.nodes()
            .filter(|node| node.kind.is_section())
            .map(|node| &node.id)
            .collect()
    }

    /// Depth-first, pre-order walk over every node.
    pub fn nodes(&self) -> impl Iterator<Item = &OutlineNode> {
        self.parts.iter().flat_map(|part| {
            std::iter::once(part).chain(part.children.iter().flat_map(|chapter| {
                std::iter::once(chapter).chain(chapter.children.iter())
            }))
        })
    }
}

/// A record dropped because one or more key fields were blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub record_id: String,
    pub missing: Vec<&'static str>,
}

/// A record whose article key was already present in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateArticle {
    pub record_id: String,
    /// Id of the article node that kept the first occurrence.
    pub kept: NodeId,
}

/// Diagnostics collected while building one outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub language: Locale,
    /// Records in the requested locale.
    pub considered: usize,
    pub parts: usize,
    pub chapters: usize,
    pub articles: usize,
    pub duplicates: Vec<DuplicateArticle>,
    pub skipped_malformed: Vec<SkippedRecord>,
}

impl BuildReport {
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped_malformed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.skipped_malformed.is_empty()
    }
}

/// Result of [`build_outline`].
#[derive(Debug, Clone, Default)]
pub struct OutlineBuild {
    pub outline: Outline,
    pub report: BuildReport,
}

/// Build the outline for `language` from `records`.
///
/// Records of other locales are ignored. Input order is preserved unless
/// `options.order` asks for a natural sort first.
pub fn build_outline(
    records: &[ArticleRecord],
    language: Locale,
    options: &OutlineOptions,
) -> OutlineBuild {
    let mut candidates: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.language == language)
        .map(|(idx, _)| idx)
        .collect();

    if options.order == OrderPolicy::Sorted {
        // sort_by is stable, so ties keep their upstream order
        candidates.sort_by(|&a, &b| compare_records(&records[a], &records[b]));
    }

    let mut builder = TreeBuilder::new(language, options.article_keying);
    builder.report.considered = candidates.len();
    for idx in candidates {
        builder.push(idx, &records[idx]);
    }
    let build = builder.finish();
    debug!(
        language = %language,
        parts = build.report.parts,
        chapters = build.report.chapters,
        articles = build.report.articles,
        duplicates = build.report.duplicate_count(),
        skipped = build.report.skipped_count(),
        "outline built"
    );
    build
}

struct TreeBuilder {
    language: Locale,
    keying: ArticleKeying,
    parts: Vec<OutlineNode>,
    index: HashMap<NodeId, NodeLocation>,
    part_slots: HashMap<String, usize>,
    chapter_slots: HashMap<(String, String), usize>,
    /// Article dedupe key -> id of the node that holds it.
    article_keys: HashMap<String, NodeId>,
    taken_article_ids: HashSet<NodeId>,
    report: BuildReport,
}

impl TreeBuilder {
    fn new(language: Locale, keying: ArticleKeying) -> Self {
        Self {
            language,
            keying,
            parts: Vec::new(),
            index: HashMap::new(),
            part_slots: HashMap::new(),
            chapter_slots: HashMap::new(),
            article_keys: HashMap::new(),
            taken_article_ids: HashSet::new(),
            report: BuildReport {
                language,
                ..BuildReport::default()
            },
        }
    }

    fn push(&mut self, record_index: usize, record: &ArticleRecord) {
        let missing = record.missing_key_fields();
        if !missing.is_empty() {
            warn!(
                record_id = %record.id,
                missing = ?missing,
                "skipping article record with blank key fields"
            );
            self.report.skipped_malformed.push(SkippedRecord {
                record_id: record.id.clone(),
                missing,
            });
            return;
        }

        let key = record.natural_key();
        let dedupe_key = match self.keying {
            ArticleKeying::Tuple => {
                format!("{}\u{1f}{}\u{1f}{}", key.part, key.chapter, key.article)
            }
            ArticleKeying::ArticleNumber => key.article.to_string(),
        };
        if let Some(kept) = self.article_keys.get(&dedupe_key) {
            debug!(
                record_id = %record.id,
                kept = %kept,
                "duplicate article key ignored"
            );
            self.report.duplicates.push(DuplicateArticle {
                record_id: record.id.clone(),
                kept: kept.clone(),
            });
            return;
        }

        let part_idx = self.part_slot(key.part, record);
        let chapter_idx = self.chapter_slot(part_idx, key.part, key.chapter, record);
        let article_id = self.article_id(record);

        let chapter = &mut self.parts[part_idx].children[chapter_idx];
        let article_idx = chapter.children.len();
        chapter.children.push(OutlineNode {
            id: article_id.clone(),
            title: display_title(&record.article_number, &record.article_title),
            kind: NodeKind::Article,
            children: Vec::new(),
            record_index: Some(record_index),
        });
        self.index.insert(
            article_id.clone(),
            NodeLocation {
                part: part_idx,
                chapter: Some(chapter_idx),
                article: Some(article_idx),
            },
        );
        self.taken_article_ids.insert(article_id.clone());
        self.article_keys.insert(dedupe_key, article_id);
        self.report.articles += 1;
    }

    /// Slot of the part with raw key `part_key`, created on first sight.
    fn part_slot(&mut self, part_key: &str, record: &ArticleRecord) -> usize {
        if let Some(&idx) = self.part_slots.get(part_key) {
            return idx;
        }
        let idx = self.parts.len();
        let id = self.free_section_id(NodeId::part(&record.part_number));
        self.parts.push(OutlineNode::section(
            id.clone(),
            NodeKind::Part,
            &record.part_number,
            &record.part_title,
        ));
        self.index.insert(
            id,
            NodeLocation {
                part: idx,
                chapter: None,
                article: None,
            },
        );
        self.part_slots.insert(part_key.to_string(), idx);
        self.report.parts += 1;
        idx
    }

    fn chapter_slot(
        &mut self,
        part_idx: usize,
        part_key: &str,
        chapter_key: &str,
        record: &ArticleRecord,
    ) -> usize {
        let slot_key = (part_key.to_string(), chapter_key.to_string());
        if let Some(&idx) = self.chapter_slots.get(&slot_key) {
            return idx;
        }
        let idx = self.parts[part_idx].children.len();
        let base = NodeId::chapter(&record.part_number, &record.chapter_number);
        let id = self.free_section_id(base);
        let part = &mut self.parts[part_idx];
        part.children.push(OutlineNode::section(
            id.clone(),
            NodeKind::Chapter,
            &record.chapter_number,
            &record.chapter_title,
        ));
        self.index.insert(
            id,
            NodeLocation {
                part: part_idx,
                chapter: Some(idx),
                article: None,
            },
        );
        self.chapter_slots.insert(slot_key, idx);
        self.report.chapters += 1;
        idx
    }

    /// Distinct keys can normalize to the same id ("Part I" and "Part i",
    /// or "a-b"/"c" and "a"/"b-c"); later sections get a numeric suffix.
    fn free_section_id(&self, base: NodeId) -> NodeId {
        if !self.index.contains_key(&base) {
            return base;
        }
        let mut suffix = 2usize;
        loop {
            let candidate = base.with_suffix(suffix);
            if !self.index.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Short id when free, otherwise the part/chapter-qualified id. A numeric
    /// suffix covers the case where even the qualified id is taken.
    fn article_id(&self, record: &ArticleRecord) -> NodeId {
        let short = NodeId::article(&record.article_number);
        if !self.taken_article_ids.contains(&short) {
            return short;
        }
        let qualified = NodeId::qualified_article(
            &record.part_number,
            &record.chapter_number,
            &record.article_number,
        );
        if !self.taken_article_ids.contains(&qualified) {
            return qualified;
        }
        let mut suffix = 2usize;
        loop {
            let candidate = qualified.with_suffix(suffix);
            if !self.taken_article_ids.contains(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn finish(self) -> OutlineBuild {
        OutlineBuild {
            outline: Outline {
                language: self.language,
                parts: self.parts,
                index: self.index,
            },
            report: self.report,
        }
    }
}

fn compare_records(a: &ArticleRecord, b: &ArticleRecord) -> Ordering {
    let left = a.natural_key();
    let right = b.natural_key();
    natural_cmp(left.part, right.part)
        .then_with(|| natural_cmp(left.chapter, right.chapter))
        .then_with(|| natural_cmp(left.article, right.article))
}

/// Compare two labels so that embedded numbers order by value:
/// `"Article 9"` sorts before `"Article 10"`. Text runs compare
/// case-insensitively.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l, r) {
                    (Chunk::Number(l), Chunk::Number(r)) => compare_digits(l, r),
                    (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
                    (Chunk::Text(l), Chunk::Text(r)) => l.to_lowercase().cmp(&r.to_lowercase()),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

enum Chunk<'a> {
    Number(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(value: &'a str) -> Self {
        Self { rest: value }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let is_digit = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, ch)| ch.is_ascii_digit() != is_digit)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if is_digit {
            Chunk::Number(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_cmp_orders_embedded_numbers() {
        assert_eq!(natural_cmp("Article 9", "Article 10"), Ordering::Less);
        assert_eq!(natural_cmp("Article 010", "Article 10"), Ordering::Equal);
        assert_eq!(natural_cmp("chapter 2", "Chapter 2"), Ordering::Equal);
        assert_eq!(natural_cmp("Article 2a", "Article 2"), Ordering::Greater);
    }

    #[test]
    fn display_title_omits_blank_titles() {
        assert_eq!(display_title("Article 1", "Definitions"), "Article 1: Definitions");
        assert_eq!(display_title(" Article 1 ", "  "), "Article 1");
    }

    #[test]
    fn article_id_falls_back_to_qualified_form() {
        let mut builder = TreeBuilder::new(Locale::En, ArticleKeying::Tuple);
        let first = ArticleRecord::new(
            "1",
            Locale::En,
            ("Part One", ""),
            ("Chapter 1", ""),
            ("Article 5", ""),
        );
        let second = ArticleRecord::new(
            "2",
            Locale::En,
            ("Part One", ""),
            ("Chapter 2", ""),
            ("Article 5", ""),
        );
        builder.push(0, &first);
        builder.push(1, &second);
        let build = builder.finish();
        assert_eq!(
            build.outline.article_ids(),
            vec![
                &NodeId::article("Article 5"),
                &NodeId::qualified_article("Part One", "Chapter 2", "Article 5"),
            ]
        );
        assert!(build.report.duplicates.is_empty());
    }
}
