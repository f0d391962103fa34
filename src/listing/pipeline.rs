/*!
 * Character listing pipeline.
 *
 * One listing request, then one episode lookup per character to fill in
 * `first_episode_name`. Lookups for a page run concurrently and are joined
 * all-settled: a failed lookup leaves its character un-enriched but never
 * drops it or fails the listing.
 */

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::clients::CatalogApi;
use crate::models::{CharacterEntity, FilterState, Location};

/// Tuning for the enrichment fan-out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOptions {
    /// Cap on concurrent episode lookups; `None` fans out the whole page at once
    pub max_concurrent_enrichments: Option<usize>,
}

/// Result of one listing load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingOutcome {
    /// Characters in catalog order
    pub characters: Vec<CharacterEntity>,
    /// Set only when the listing request itself failed
    pub error: Option<String>,
}

impl ListingOutcome {
    fn failed(message: String) -> Self {
        Self {
            characters: Vec::new(),
            error: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Fetches, enriches and returns character listings
#[derive(Debug, Clone)]
pub struct CharacterPipeline {
    catalog: Arc<dyn CatalogApi>,
    options: PipelineOptions,
}

impl CharacterPipeline {
    pub fn new(catalog: Arc<dyn CatalogApi>, options: PipelineOptions) -> Self {
        Self { catalog, options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Load the first page of characters matching `filters` and enrich each one
    pub async fn load_characters(&self, filters: &FilterState) -> ListingOutcome {
        self.load_characters_with_progress(filters, |_, _| {}).await
    }

    /// Same as `load_characters`, reporting `(settled, total)` after every episode lookup
    pub async fn load_characters_with_progress<F>(&self, filters: &FilterState, progress: F) -> ListingOutcome
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let page = match self.catalog.list_characters(filters).await {
            Ok(page) => page,
            Err(e) if e.is_not_found() => {
                info!("No characters match {:?}", filters.query_pairs());
                return ListingOutcome::default();
            }
            Err(e) => {
                error!("Character listing failed: {}", e);
                return ListingOutcome::failed(e.to_string());
            }
        };

        debug!("Listing returned {} characters", page.results.len());
        let characters = self.enrich_all(page.results, &progress).await;

        ListingOutcome {
            characters,
            error: None,
        }
    }

    async fn enrich_all<F>(&self, characters: Vec<CharacterEntity>, progress: &F) -> Vec<CharacterEntity>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let total = characters.len();
        let settled = AtomicUsize::new(0);
        let settled = &settled;

        let lookups = characters.into_iter().map(move |character| async move {
            let character = self.enrich_one(character).await;
            let done = settled.fetch_add(1, Ordering::SeqCst) + 1;
            progress(done, total);
            character
        });

        match self.options.max_concurrent_enrichments {
            None => join_all(lookups).await,
            // buffered keeps input order, unlike buffer_unordered
            Some(limit) => stream::iter(lookups).buffered(limit.max(1)).collect().await,
        }
    }

    async fn enrich_one(&self, mut character: CharacterEntity) -> CharacterEntity {
        let Some(url) = character.first_episode_url().map(str::to_owned) else {
            debug!("Character {} has no episodes, skipping enrichment", character.id);
            return character;
        };

        match self.catalog.get_episode(&url).await {
            Ok(episode) => character.first_episode_name = Some(episode.name),
            Err(e) => warn!(
                "First episode lookup failed for '{}' ({}): {}",
                character.name, url, e
            ),
        }
        character
    }

    /// Best-effort location listing; failures are logged and yield an empty list
    pub async fn load_locations(&self) -> Vec<Location> {
        match self.catalog.list_locations().await {
            Ok(page) => page.results,
            Err(e) => {
                error!("Error fetching locations: {}", e);
                Vec::new()
            }
        }
    }
}
