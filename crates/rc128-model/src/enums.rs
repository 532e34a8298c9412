//! Type-safe enumerations for the article outline.
//!
//! Locale tags and node kinds travel as strings through the data store
//! and URL state; these enums give them compile-time meaning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Locale of an article record.
///
/// The statutory text is published as parallel per-locale sets. Records
/// from different locales describe the same text but never share an outline.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English text.
    #[default]
    En,
    /// Arabic text.
    Ar,
}

impl Locale {
    /// Returns the lowercase locale tag as stored by the data source.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Human-readable language name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ar => "Arabic",
        }
    }

    /// All supported locales in display order.
    pub const fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Ar]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Locale {
    type Err = ModelError;

    /// Parse a locale tag. Accepts region-qualified tags such as `en-GB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let primary = normalized
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        match primary {
            "en" | "english" => Ok(Locale::En),
            "ar" | "arabic" => Ok(Locale::Ar),
            _ => Err(ModelError::UnknownLocale(s.to_string())),
        }
    }
}

/// Level of a node in the three-level outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Part,
    Chapter,
    Article,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Part => "part",
            NodeKind::Chapter => "chapter",
            NodeKind::Article => "article",
        }
    }

    /// Depth in the outline, starting at 0 for parts.
    pub fn depth(&self) -> usize {
        match self {
            NodeKind::Part => 0,
            NodeKind::Chapter => 1,
            NodeKind::Article => 2,
        }
    }

    /// Parts and chapters can be expanded; articles are always leaves.
    pub fn is_section(&self) -> bool {
        matches!(self, NodeKind::Part | NodeKind::Chapter)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_region_tags() {
        assert_eq!("en-GB".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" AR ".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!("ar_SA".parse::<Locale>().unwrap(), Locale::Ar);
    }

    #[test]
    fn locale_rejects_unknown_tag() {
        let err = "fr".parse::<Locale>().unwrap_err();
        assert_eq!(err, ModelError::UnknownLocale("fr".to_string()));
    }

    #[test]
    fn only_parts_and_chapters_are_sections() {
        assert!(NodeKind::Part.is_section());
        assert!(NodeKind::Chapter.is_section());
        assert!(!NodeKind::Article.is_section());
    }
}
