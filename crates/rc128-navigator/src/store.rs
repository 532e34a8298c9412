//! Record store: the flat article list plus the active locale and search term.
//!
//! The store owns no derived state. Observers subscribe to change events; the
//! navigator rebuilds its outline from the store on data arrival.

use std::fmt;

use tracing::debug;

use rc128_model::{ArticleRecord, Locale};

/// Snapshot accessor for whatever holds the current record set.
pub trait RecordSource {
    fn current_records(&self) -> &[ArticleRecord];
}

impl RecordSource for [ArticleRecord] {
    fn current_records(&self) -> &[ArticleRecord] {
        self
    }
}

impl RecordSource for Vec<ArticleRecord> {
    fn current_records(&self) -> &[ArticleRecord] {
        self
    }
}

/// Change notification sent to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    RecordsReplaced { count: usize },
    LanguageChanged(Locale),
    SearchChanged(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

#[derive(Default)]
pub struct RecordStore {
    records: Vec<ArticleRecord>,
    language: Locale,
    search_term: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records.len())
            .field("language", &self.language)
            .field("search_term", &self.search_term)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl RecordSource for RecordStore {
    fn current_records(&self) -> &[ArticleRecord] {
        &self.records
    }
}

impl RecordStore {
    pub fn new(language: Locale) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn language(&self) -> Locale {
        self.language
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn replace_records(&mut self, records: Vec<ArticleRecord>) {
        let count = records.len();
        self.records = records;
        debug!(count, "records replaced");
        self.notify(&StoreEvent::RecordsReplaced { count });
    }

    pub fn set_language(&mut self, language: Locale) {
        self.language = language;
        self.notify(&StoreEvent::LanguageChanged(language));
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        let event = StoreEvent::SearchChanged(self.search_term.clone());
        self.notify(&event);
    }

    /// Records of the active locale that match the search term.
    pub fn visible_articles(&self) -> Vec<&ArticleRecord> {
        let needle = self.search_term.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| record.language == self.language)
            .filter(|record| record.matches_search(&needle))
            .collect()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: &StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn record(id: &str, language: Locale, article: &str, body: &str) -> ArticleRecord {
        ArticleRecord::new(
            id,
            language,
            ("Part One", ""),
            ("Chapter 1", ""),
            (article, ""),
        )
        .with_body(body)
    }

    #[test]
    fn visible_articles_filter_by_language_and_search() {
        let mut store = RecordStore::new(Locale::En);
        store.replace_records(vec![
            record("1", Locale::En, "Article 1", "Notice of claim"),
            record("2", Locale::En, "Article 2", "Payment terms"),
            record("3", Locale::Ar, "Article 1", "Notice"),
        ]);
        assert_eq!(store.visible_articles().len(), 2);

        store.set_search_term("  NOTICE ");
        let ids: Vec<&str> = store
            .visible_articles()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn subscribers_receive_events_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = RecordStore::default();
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        store.replace_records(vec![record("1", Locale::En, "Article 1", "")]);
        store.set_language(Locale::Ar);
        assert!(store.unsubscribe(id));
        store.set_search_term("ignored");
        assert!(!store.unsubscribe(id));

        assert_eq!(
            *seen.borrow(),
            vec![
                StoreEvent::RecordsReplaced { count: 1 },
                StoreEvent::LanguageChanged(Locale::Ar),
            ]
        );
    }
}
