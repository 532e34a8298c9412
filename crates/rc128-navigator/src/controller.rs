//! Navigation controller.
//!
//! [`Navigator`] ties the record store, the built outline and the navigation
//! state together. Every entry point is total: unknown ids are reported
//! through return values and never panic or error.

use tracing::debug;

use rc128_model::{ArticleRecord, Locale, NodeId, OutlineOptions};

use crate::outline::{BuildReport, Outline, build_outline};
use crate::state::{NavigationPhase, NavigationState, PendingOrigin, PendingSelection};
use crate::store::{RecordSource, RecordStore};

/// Outcome of [`Navigator::select_article`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The article was found; its chapter and part are now expanded.
    Focused {
        article: NodeId,
        chapter: NodeId,
        part: NodeId,
    },
    /// Not in the current outline. The request waits for the next rebuild.
    Deferred,
}

impl Selection {
    pub fn is_focused(&self) -> bool {
        matches!(self, Selection::Focused { .. })
    }
}

/// Outcome of [`Navigator::toggle_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Expanded,
    Collapsed,
    /// The id is not a part or chapter of the current outline.
    Ignored,
}

#[derive(Debug)]
pub struct Navigator {
    store: RecordStore,
    options: OutlineOptions,
    outline: Outline,
    report: BuildReport,
    state: NavigationState,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(OutlineOptions::default())
    }
}

impl Navigator {
    pub fn new(options: OutlineOptions) -> Self {
        Self::with_state(options, Locale::default(), NavigationState::new())
    }

    /// A navigator that selects `article_id` once the first non-empty
    /// outline is available.
    pub fn with_deep_link(options: OutlineOptions, article_id: impl Into<String>) -> Self {
        Self::with_state(
            options,
            Locale::default(),
            NavigationState::with_deep_link(article_id),
        )
    }

    /// Set the initial locale without touching navigation state, so a
    /// deep link seeded at mount survives.
    pub fn with_language(mut self, language: Locale) -> Self {
        self.store.set_language(language);
        self.rebuild();
        self
    }

    fn with_state(options: OutlineOptions, language: Locale, state: NavigationState) -> Self {
        let store = RecordStore::new(language);
        let build = build_outline(store.records(), language, &options);
        Self {
            store,
            options,
            outline: build.outline,
            report: build.report,
            state,
        }
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Diagnostics from the most recent outline build.
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Mutable store access for subscribing observers.
    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    pub fn language(&self) -> Locale {
        self.store.language()
    }

    pub fn phase(&self) -> NavigationPhase {
        self.state.phase()
    }

    /// The record behind the active article.
    pub fn active_article(&self) -> Option<&ArticleRecord> {
        let id = self.state.active_article_id()?;
        let idx = self.outline.record_index(id.as_str())?;
        self.store.records().get(idx)
    }

    /// Articles for the content pane: active locale, filtered by search.
    pub fn visible_articles(&self) -> Vec<&ArticleRecord> {
        self.store.visible_articles()
    }

    pub fn select_article(&mut self, article_id: &str) -> Selection {
        if let Some(selection) = self.focus(article_id) {
            self.state.pending = None;
            return selection;
        }
        debug!(article_id, "article not in outline, deferring selection");
        self.state.pending = Some(PendingSelection {
            id: article_id.to_string(),
            origin: PendingOrigin::Selection,
        });
        Selection::Deferred
    }

    pub fn toggle_section(&mut self, section_id: &str) -> Toggle {
        let Some(node) = self.outline.find(section_id) else {
            return Toggle::Ignored;
        };
        if !node.kind.is_section() {
            return Toggle::Ignored;
        }
        if self.state.expanded_ids.remove(section_id) {
            Toggle::Collapsed
        } else {
            self.state.expanded_ids.insert(node.id.clone());
            Toggle::Expanded
        }
    }

    pub fn expand_all(&mut self) {
        let ids: Vec<NodeId> = self.outline.section_ids().into_iter().cloned().collect();
        self.state.expanded_ids.extend(ids);
    }

    pub fn collapse_all(&mut self) {
        self.state.expanded_ids.clear();
    }

    /// Switch locale. Node ids are scoped to one locale's tree, so navigation
    /// resets to Idle and any pending selection is dropped.
    pub fn set_language(&mut self, language: Locale) {
        debug!(from = %self.store.language(), to = %language, "language changed");
        self.state.reset();
        self.store.set_language(language);
        self.rebuild();
    }

    /// Only changes which article bodies are visible; the outline and
    /// navigation state are untouched.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.store.set_search_term(term);
    }

    /// Data arrival: replace the record set and rebuild.
    pub fn replace_records(&mut self, records: Vec<ArticleRecord>) {
        self.store.replace_records(records);
        self.rebuild();
    }

    pub fn refresh_from<S: RecordSource + ?Sized>(&mut self, source: &S) {
        self.replace_records(source.current_records().to_vec());
    }

    fn rebuild(&mut self) {
        let build = build_outline(self.store.records(), self.store.language(), &self.options);
        self.outline = build.outline;
        self.report = build.report;
        self.prune();
        self.retry_pending();
    }

    /// Drop state that no longer refers to a node of the rebuilt outline.
    fn prune(&mut self) {
        let outline = &self.outline;
        self.state
            .expanded_ids
            .retain(|id| outline.find(id.as_str()).is_some_and(|node| node.kind.is_section()));

        let Some(active) = self.state.active_article_id.clone() else {
            return;
        };
        match self.outline.ancestors_of(active.as_str()) {
            Some((_, chapter)) => self.state.active_chapter_id = Some(chapter.clone()),
            None => {
                debug!(article_id = %active, "active article left the outline");
                self.state.clear_active();
            }
        }
    }

    fn retry_pending(&mut self) {
        let Some(pending) = self.state.pending.take() else {
            return;
        };
        if pending.origin == PendingOrigin::DeepLink && self.outline.is_empty() {
            self.state.pending = Some(pending);
            return;
        }
        if self.focus(&pending.id).is_none() {
            debug!(
                article_id = %pending.id,
                origin = ?pending.origin,
                "pending selection unresolved, dropping"
            );
        }
    }

    fn focus(&mut self, article_id: &str) -> Option<Selection> {
        let (part, chapter) = self.outline.ancestors_of(article_id)?;
        let (part, chapter) = (part.clone(), chapter.clone());
        let article = self.outline.find(article_id)?.id.clone();

        self.state.expanded_ids.insert(part.clone());
        self.state.expanded_ids.insert(chapter.clone());
        self.state.active_article_id = Some(article.clone());
        self.state.active_chapter_id = Some(chapter.clone());
        debug!(article_id = %article, chapter_id = %chapter, "article focused");

        Some(Selection::Focused {
            article,
            chapter,
            part,
        })
    }
}
