/*!
 * In-memory catalog for tests and benchmarks.
 *
 * `MockCatalog` answers listings from a fixed set of characters, applying the
 * filters itself and reporting not-found when nothing matches, the way the
 * real catalog does. Episode lookups succeed only for URIs registered with
 * `with_episode`, which makes partial enrichment failures easy to stage.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::clients::CatalogApi;
use crate::errors::ClientError;
use crate::models::{
    CharacterEntity, CharacterPage, CharacterStatus, Episode, FilterState, Location,
    LocationPage, NamedResource, SelectorKind,
};

/// How the mock answers listing requests
#[derive(Debug, Clone, PartialEq)]
pub enum ListingBehavior {
    /// Filter the stored characters; not-found when none match
    Working,
    /// Always report not-found
    NotFound,
    /// Always fail with the given error
    Failing(ClientError),
}

/// Call counters shared with the test that owns the mock
#[derive(Debug, Default)]
pub struct CallStats {
    pub listing_calls: AtomicUsize,
    pub episode_calls: AtomicUsize,
    pub location_calls: AtomicUsize,
    in_flight_episodes: AtomicUsize,
    pub max_in_flight_episodes: AtomicUsize,
}

/// Mock catalog service
#[derive(Debug)]
pub struct MockCatalog {
    characters: Vec<CharacterEntity>,
    episodes: HashMap<String, String>,
    locations: Vec<Location>,
    listing: ListingBehavior,
    locations_fail: bool,
    listing_delays: Vec<(FilterState, Duration)>,
    episode_delay: Option<Duration>,
    queries: Mutex<Vec<Vec<(&'static str, String)>>>,
    stats: Arc<CallStats>,
}

impl MockCatalog {
    pub fn new(characters: Vec<CharacterEntity>) -> Self {
        Self {
            characters,
            episodes: HashMap::new(),
            locations: Vec::new(),
            listing: ListingBehavior::Working,
            locations_fail: false,
            listing_delays: Vec::new(),
            episode_delay: None,
            queries: Mutex::new(Vec::new()),
            stats: Arc::new(CallStats::default()),
        }
    }

    /// Register an episode URI that resolves to `name`
    pub fn with_episode(mut self, url: impl Into<String>, name: impl Into<String>) -> Self {
        self.episodes.insert(url.into(), name.into());
        self
    }

    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_listing(mut self, behavior: ListingBehavior) -> Self {
        self.listing = behavior;
        self
    }

    pub fn with_failing_locations(mut self) -> Self {
        self.locations_fail = true;
        self
    }

    /// Hold listings for exactly these filters for `delay` before answering
    pub fn with_listing_delay(mut self, filters: FilterState, delay: Duration) -> Self {
        self.listing_delays.push((filters, delay));
        self
    }

    /// Hold every episode lookup for `delay`
    pub fn with_episode_delay(mut self, delay: Duration) -> Self {
        self.episode_delay = Some(delay);
        self
    }

    pub fn stats(&self) -> Arc<CallStats> {
        self.stats.clone()
    }

    /// Query pairs received so far, in call order
    pub fn recorded_queries(&self) -> Vec<Vec<(&'static str, String)>> {
        self.queries.lock().clone()
    }

    fn matches(character: &CharacterEntity, filters: &FilterState) -> bool {
        SelectorKind::ALL_KINDS.iter().all(|kind| {
            let Some(wanted) = filters.get(*kind).value() else {
                return true;
            };
            let actual = match kind {
                SelectorKind::Status => character.status.as_str(),
                SelectorKind::Gender => character.gender.as_str(),
                SelectorKind::Species => character.species.as_str(),
                SelectorKind::Type => character.kind.as_str(),
            };
            actual.eq_ignore_ascii_case(wanted)
        })
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn list_characters(&self, filters: &FilterState) -> Result<CharacterPage, ClientError> {
        self.stats.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(filters.query_pairs());

        if let Some((_, delay)) = self.listing_delays.iter().find(|(f, _)| f == filters) {
            tokio::time::sleep(*delay).await;
        }

        match &self.listing {
            ListingBehavior::Failing(error) => Err(error.clone()),
            ListingBehavior::NotFound => Err(ClientError::NotFound("api/character".to_string())),
            ListingBehavior::Working => {
                let results: Vec<CharacterEntity> = self
                    .characters
                    .iter()
                    .filter(|c| Self::matches(c, filters))
                    .cloned()
                    .collect();
                if results.is_empty() {
                    Err(ClientError::NotFound("api/character".to_string()))
                } else {
                    Ok(CharacterPage { results })
                }
            }
        }
    }

    async fn get_episode(&self, url: &str) -> Result<Episode, ClientError> {
        self.stats.episode_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.stats.in_flight_episodes.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_in_flight_episodes.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.episode_delay {
            tokio::time::sleep(delay).await;
        }

        let result = match self.episodes.get(url) {
            Some(name) => Ok(Episode {
                name: name.clone(),
                episode: None,
                air_date: None,
            }),
            None => Err(ClientError::ConnectionError(format!("no route to {}", url))),
        };

        self.stats.in_flight_episodes.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn list_locations(&self) -> Result<LocationPage, ClientError> {
        self.stats.location_calls.fetch_add(1, Ordering::SeqCst);
        if self.locations_fail {
            return Err(ClientError::ApiError {
                status_code: 500,
                message: "location index unavailable".to_string(),
            });
        }
        Ok(LocationPage {
            results: self.locations.clone(),
        })
    }
}

/// Build a catalog character with the fields the pipeline cares about
pub fn sample_character(id: u64, name: &str, status: &str, episode_url: &str) -> CharacterEntity {
    CharacterEntity {
        id,
        name: name.to_string(),
        status: CharacterStatus::from(status.to_string()),
        species: "Human".to_string(),
        gender: "Male".to_string(),
        kind: String::new(),
        origin: NamedResource {
            name: "Earth (C-137)".to_string(),
            url: String::new(),
        },
        location: NamedResource {
            name: "Citadel of Ricks".to_string(),
            url: String::new(),
        },
        episode: if episode_url.is_empty() {
            Vec::new()
        } else {
            vec![episode_url.to_string()]
        },
        image: format!("https://rickandmortyapi.com/api/character/avatar/{}.jpeg", id),
        first_episode_name: None,
    }
}
