//! Configuration options for outline building.

use serde::{Deserialize, Serialize};

/// How the builder treats the order of incoming records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderPolicy {
    /// Trust the upstream ordering (part, then chapter, then article).
    #[default]
    AsProvided,
    /// Stable natural sort by (part, chapter, article) before building.
    Sorted,
}

/// Which key decides that two article records are the same outline leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArticleKeying {
    /// Full (part, chapter, article) tuple.
    #[default]
    Tuple,
    /// Article number alone. Articles sharing a number across chapters
    /// collapse into the first one seen, as the legacy dashboard did.
    ArticleNumber,
}

/// Options controlling outline construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    pub order: OrderPolicy,
    pub article_keying: ArticleKeying,
}

impl OutlineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: OrderPolicy) -> Self {
        self.order = order;
        self
    }

    pub fn with_article_keying(mut self, keying: ArticleKeying) -> Self {
        self.article_keying = keying;
        self
    }
}
