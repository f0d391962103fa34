use async_trait::async_trait;

use crate::clients::CatalogApi;
use crate::clients::http::ApiHttpClient;
use crate::errors::ClientError;
use crate::models::{CharacterPage, Episode, FilterState, LocationPage};

const CHARACTER_PATH: &str = "api/character";
const LOCATION_PATH: &str = "api/location";

/// Catalog client backed by the public character API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: ApiHttpClient,
}

impl CatalogClient {
    pub fn new(http: ApiHttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_characters(&self, filters: &FilterState) -> Result<CharacterPage, ClientError> {
        self.http.get_json(CHARACTER_PATH, &filters.query_pairs()).await
    }

    async fn get_episode(&self, url: &str) -> Result<Episode, ClientError> {
        self.http.get_absolute(url).await
    }

    async fn list_locations(&self) -> Result<LocationPage, ClientError> {
        self.http.get_json(LOCATION_PATH, &[]).await
    }
}
