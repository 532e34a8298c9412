//! Navigation state for one mounted outline view.
//!
//! All expand/collapse and highlight state lives in [`NavigationState`]. It is
//! only mutated through [`crate::Navigator`], which keeps the invariants:
//! expanded ids name parts or chapters of the current outline, and the active
//! chapter is always the owner of the active article.

use std::collections::BTreeSet;

use rc128_model::NodeId;

/// Where a pending selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOrigin {
    /// Supplied at mount time (URL fragment); waits for the first non-empty outline.
    DeepLink,
    /// A `select_article` call that missed; retried on the next rebuild only.
    Selection,
}

/// A selection waiting for data to arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSelection {
    pub id: String,
    pub origin: PendingOrigin,
}

/// Coarse navigator phase, derived from the state fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    Focused,
    Transitioning,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub(crate) expanded_ids: BTreeSet<NodeId>,
    pub(crate) active_article_id: Option<NodeId>,
    pub(crate) active_chapter_id: Option<NodeId>,
    pub(crate) pending: Option<PendingSelection>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with a deep link that resolves once data arrives.
    pub fn with_deep_link(id: impl Into<String>) -> Self {
        Self {
            pending: Some(PendingSelection {
                id: id.into(),
                origin: PendingOrigin::DeepLink,
            }),
            ..Self::default()
        }
    }

    pub fn expanded_ids(&self) -> &BTreeSet<NodeId> {
        &self.expanded_ids
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_ids.contains(id)
    }

    pub fn active_article_id(&self) -> Option<&NodeId> {
        self.active_article_id.as_ref()
    }

    pub fn active_chapter_id(&self) -> Option<&NodeId> {
        self.active_chapter_id.as_ref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_article_id.as_ref().is_some_and(|a| a.as_str() == id)
            || self.active_chapter_id.as_ref().is_some_and(|c| c.as_str() == id)
    }

    pub fn pending(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    pub fn phase(&self) -> NavigationPhase {
        if self.pending.is_some() {
            NavigationPhase::Transitioning
        } else if self.active_article_id.is_some() {
            NavigationPhase::Focused
        } else {
            NavigationPhase::Idle
        }
    }

    /// Back to Idle: nothing expanded, nothing active, nothing pending.
    pub(crate) fn reset(&mut self) {
        self.expanded_ids.clear();
        self.active_article_id = None;
        self.active_chapter_id = None;
        self.pending = None;
    }

    pub(crate) fn clear_active(&mut self) {
        self.active_article_id = None;
        self.active_chapter_id = None;
    }
}
