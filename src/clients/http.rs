/*!
 * The configured HTTP client shared by the catalog and backend clients.
 *
 * Requests relative to the base URL carry the bearer token from the
 * credential provider. Absolute URLs (episode links handed out by the
 * catalog) go out without it.
 */

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::credentials::CredentialProvider;
use crate::errors::ClientError;

/// Per-request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// reqwest client bound to one base URL and one credential source
#[derive(Debug, Clone)]
pub struct ApiHttpClient {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiHttpClient {
    /// Build a client for `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Root of the service, e.g. `https://rickandmortyapi.com`
    /// * `timeout` - Fixed per-request timeout
    /// * `credentials` - Consulted on every request for a bearer token
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ClientError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: normalize_base(base_url)?,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path such as `api/character` against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// URL of one item under `collection`, with `id` escaped as a single path segment
    pub fn resource(&self, collection: &str, id: &str) -> Result<Url, ClientError> {
        if matches!(id.trim(), "" | "." | "..") {
            return Err(ClientError::InvalidUrl(format!("invalid resource id '{}'", id)));
        }

        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET a base-relative path and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        self.get_json_at(self.endpoint(path)?, query).await
    }

    /// GET a URL built from the base URL, with credentials
    pub async fn get_json_at<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        debug!("GET {} {:?}", url, query);

        let request = self.authorize(self.client.get(url).query(query));
        let response = request.send().await?;
        decode_json(check_status(response).await?).await
    }

    /// PUT a JSON body to a base-relative path; the response body is ignored
    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        self.put_json_at(self.endpoint(path)?, body).await
    }

    /// PUT a JSON body to a URL built from the base URL, with credentials
    pub async fn put_json_at<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<(), ClientError> {
        debug!("PUT {}", url);

        let request = self.authorize(self.client.put(url).json(body));
        let response = request.send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// GET an absolute URL without credentials and decode the JSON body
    pub async fn get_absolute<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let url = Url::parse(url)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        decode_json(check_status(response).await?).await
    }
}

fn normalize_base(base_url: &str) -> Result<Url, ClientError> {
    // Url::join drops the last path segment unless it ends with a slash.
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());

    Err(match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(url),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::AuthenticationError(message),
        StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimitExceeded(message),
        _ => ClientError::ApiError {
            status_code: status.as_u16(),
            message,
        },
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ClientError::ParseError(e.to_string()))
}
