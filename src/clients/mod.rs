/*!
 * Clients for the external services.
 *
 * - `http`: the configured reqwest client (base URL, timeout, bearer token)
 * - `catalog`: character/location catalog and episode lookups
 * - `debt`: finance backend debt records
 * - `mock`: in-memory catalog used by tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ClientError;
use crate::models::{CharacterPage, DebtRecord, Episode, FilterState, LocationPage};

/// Read access to the character catalog
///
/// The listing pipeline only talks to this trait, so it can run against the
/// real service or an in-memory stand-in.
#[async_trait]
pub trait CatalogApi: Send + Sync + Debug {
    /// Fetch the first page of characters matching `filters`
    ///
    /// # Arguments
    /// * `filters` - Selectors; `All` selectors are left out of the query
    ///
    /// # Returns
    /// * `Result<CharacterPage, ClientError>` - The page, or `ClientError::NotFound` when nothing matches
    async fn list_characters(&self, filters: &FilterState) -> Result<CharacterPage, ClientError>;

    /// Resolve one episode URI taken from a character's `episode` list
    async fn get_episode(&self, url: &str) -> Result<Episode, ClientError>;

    /// Fetch the first page of locations
    async fn list_locations(&self) -> Result<LocationPage, ClientError>;
}

/// Read/write access to debt records on the finance backend
#[async_trait]
pub trait DebtApi: Send + Sync + Debug {
    async fn get_debt(&self, id: &str) -> Result<DebtRecord, ClientError>;

    async fn update_debt(&self, id: &str, record: &DebtRecord) -> Result<(), ClientError>;
}

pub mod catalog;
pub mod debt;
pub mod http;
pub mod mock;

pub use self::catalog::CatalogClient;
pub use self::debt::DebtClient;
pub use self::http::ApiHttpClient;
pub use self::mock::MockCatalog;
