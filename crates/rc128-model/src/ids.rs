#![deny(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

use crate::ModelError;

/// Normalize a part, chapter or article number into an id segment.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-`, and trims leading and trailing dashes. `"Article 5"` becomes
/// `"article-5"`.
pub fn normalize_key(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Stable identifier of an outline node.
///
/// Ids are derived from the natural key of the node, so they survive a
/// refetch of the same records. Article ids double as deep-link targets.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an externally supplied id (URL fragment, CLI argument).
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidNodeId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn part(part_number: &str) -> Self {
        Self(format!("part-{}", normalize_key(part_number)))
    }

    pub fn chapter(part_number: &str, chapter_number: &str) -> Self {
        Self(format!(
            "chapter-{}-{}",
            normalize_key(part_number),
            normalize_key(chapter_number)
        ))
    }

    /// Short article id, used as the deep-link format.
    pub fn article(article_number: &str) -> Self {
        Self(format!("article-{}", normalize_key(article_number)))
    }

    /// Article id qualified by its part and chapter, used when the short id
    /// is already taken by an article from another chapter.
    pub fn qualified_article(part_number: &str, chapter_number: &str, article_number: &str) -> Self {
        Self(format!(
            "article-{}-{}-{}",
            normalize_key(part_number),
            normalize_key(chapter_number),
            normalize_key(article_number)
        ))
    }

    /// Append a numeric disambiguator, e.g. `article-5-2`.
    pub fn with_suffix(&self, suffix: usize) -> Self {
        Self(format!("{}-{suffix}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
