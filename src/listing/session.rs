/*!
 * Listing session: filter and search state plus the fetched collection.
 *
 * Each refresh takes a generation number. When a refresh finishes, its
 * outcome is merged only if no newer refresh has started since; otherwise it
 * is discarded. In-flight requests are never cancelled.
 */

use log::debug;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::listing::pipeline::{CharacterPipeline, ListingOutcome};
use crate::listing::search::apply_search;
use crate::models::{CharacterEntity, FilterState, Selector, SelectorKind};

/// Where the listing view stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// What happened to a refresh's outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Merged into the session
    Applied,
    /// A newer refresh started first; the outcome was dropped
    Stale,
}

#[derive(Debug, Default)]
struct SessionState {
    filters: FilterState,
    search: String,
    characters: Vec<CharacterEntity>,
    displayed: Vec<CharacterEntity>,
    error: Option<String>,
    state: ListingState,
}

/// Character listing view model
#[derive(Debug)]
pub struct ListingSession {
    pipeline: CharacterPipeline,
    generation: AtomicU64,
    inner: Mutex<SessionState>,
}

impl ListingSession {
    pub fn new(pipeline: CharacterPipeline) -> Self {
        Self {
            pipeline,
            generation: AtomicU64::new(0),
            inner: Mutex::new(SessionState::default()),
        }
    }

    pub fn with_filters(pipeline: CharacterPipeline, filters: FilterState) -> Self {
        let session = Self::new(pipeline);
        session.inner.lock().filters = filters;
        session
    }

    pub fn filters(&self) -> FilterState {
        self.inner.lock().filters.clone()
    }

    /// Change one selector. Returns true when the filter state changed.
    pub fn set_filter(&self, kind: SelectorKind, selector: Selector) -> bool {
        self.inner.lock().filters.set(kind, selector)
    }

    /// Change one selector and refresh if it changed
    pub async fn update_filter(&self, kind: SelectorKind, selector: Selector) -> Option<RefreshOutcome> {
        if self.set_filter(kind, selector) {
            Some(self.refresh().await)
        } else {
            None
        }
    }

    /// Fetch with the current filters and merge the result if still current
    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let filters = {
            let mut inner = self.inner.lock();
            inner.state = ListingState::Loading;
            inner.filters.clone()
        };

        debug!("Refresh #{} with {:?}", generation, filters.query_pairs());
        let outcome = self.pipeline.load_characters(&filters).await;
        self.merge(generation, outcome)
    }

    /// Re-run the last fetch with unchanged filters
    pub async fn retry(&self) -> RefreshOutcome {
        self.refresh().await
    }

    fn merge(&self, generation: u64, outcome: ListingOutcome) -> RefreshOutcome {
        let mut inner = self.inner.lock();
        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            debug!("Dropping refresh #{}, #{} is newer", generation, latest);
            return RefreshOutcome::Stale;
        }

        inner.displayed = apply_search(&outcome.characters, &inner.search);
        inner.characters = outcome.characters;
        inner.state = match &outcome.error {
            Some(message) => ListingState::Failed(message.clone()),
            None => ListingState::Loaded,
        };
        inner.error = outcome.error;
        RefreshOutcome::Applied
    }

    /// Update the search text and recompute the displayed collection
    pub fn set_search(&self, query: impl Into<String>) {
        let mut inner = self.inner.lock();
        inner.search = query.into();
        inner.displayed = apply_search(&inner.characters, &inner.search);
    }

    pub fn search(&self) -> String {
        self.inner.lock().search.clone()
    }

    pub fn state(&self) -> ListingState {
        self.inner.lock().state.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.lock().error.clone()
    }

    /// Full collection from the last applied refresh
    pub fn characters(&self) -> Vec<CharacterEntity> {
        self.inner.lock().characters.clone()
    }

    /// Collection after the search text is applied
    pub fn displayed(&self) -> Vec<CharacterEntity> {
        self.inner.lock().displayed.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().state == ListingState::Loading
    }
}
