use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;

use crate::app_config::Config;
use crate::clients::{ApiHttpClient, CatalogApi, CatalogClient, DebtApi, DebtClient};
use crate::debt::DebtEditor;
use crate::listing::{CharacterPipeline, ListingSession, PipelineOptions};
use crate::models::FilterState;

// @module: Wires configuration into clients, pipeline and editors

/// Application controller holding the configured service clients
#[derive(Debug, Clone)]
pub struct Controller {
    config: Config,
    catalog: Arc<dyn CatalogApi>,
    debts: Arc<dyn DebtApi>,
}

impl Controller {
    /// Build HTTP clients for the catalog and backend from `config`
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let credentials = config.auth.credential_provider();
        debug!("Catalog at {}, backend at {}", config.catalog.endpoint, config.backend.endpoint);

        let catalog_http = ApiHttpClient::new(
            &config.catalog.endpoint,
            config.catalog.timeout(),
            credentials.clone(),
        )
        .context("Failed to build catalog client")?;
        let backend_http = ApiHttpClient::new(
            &config.backend.endpoint,
            config.backend.timeout(),
            credentials,
        )
        .context("Failed to build backend client")?;

        Ok(Self {
            config,
            catalog: Arc::new(CatalogClient::new(catalog_http)),
            debts: Arc::new(DebtClient::new(backend_http)),
        })
    }

    /// Controller over caller-supplied services, e.g. in-memory ones in tests
    pub fn with_services(config: Config, catalog: Arc<dyn CatalogApi>, debts: Arc<dyn DebtApi>) -> Self {
        Self {
            config,
            catalog,
            debts,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pipeline using the configured fan-out, optionally overridden
    pub fn pipeline(&self, max_concurrent_enrichments: Option<usize>) -> CharacterPipeline {
        let mut options: PipelineOptions = self.config.listing.pipeline_options();
        if max_concurrent_enrichments.is_some() {
            options.max_concurrent_enrichments = max_concurrent_enrichments;
        }
        CharacterPipeline::new(self.catalog.clone(), options)
    }

    pub fn listing_session(&self, filters: FilterState) -> ListingSession {
        ListingSession::with_filters(self.pipeline(None), filters)
    }

    pub async fn open_debt(&self, id: &str) -> DebtEditor {
        DebtEditor::open(self.debts.clone(), id).await
    }
}
