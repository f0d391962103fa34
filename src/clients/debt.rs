use async_trait::async_trait;

use crate::clients::DebtApi;
use crate::clients::http::ApiHttpClient;
use crate::errors::ClientError;
use crate::models::{DebtEnvelope, DebtRecord};

/// Finance backend client for debt records
#[derive(Debug, Clone)]
pub struct DebtClient {
    http: ApiHttpClient,
}

impl DebtClient {
    const COLLECTION: &'static str = "finance/debt";

    pub fn new(http: ApiHttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DebtApi for DebtClient {
    async fn get_debt(&self, id: &str) -> Result<DebtRecord, ClientError> {
        let url = self.http.resource(Self::COLLECTION, id)?;
        let envelope: DebtEnvelope = self.http.get_json_at(url, &[]).await?;
        Ok(envelope.data)
    }

    async fn update_debt(&self, id: &str, record: &DebtRecord) -> Result<(), ClientError> {
        let url = self.http.resource(Self::COLLECTION, id)?;
        self.http.put_json_at(url, record).await
    }
}
