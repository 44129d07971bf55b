//! HTTP client for the plant API.
//!
//! One GET per resource with a configured deadline. Every failure is
//! classified into the fixed error taxonomy before it leaves this module.
//! No automatic retries, no request cancellation: a failed fetch is
//! terminal until the caller fetches again.

use crate::models::{ApiConfig, Category, FetchError, Question, Resource, VerdantError};
use serde::Deserialize;
use tracing::{debug, warn};

/// Wire envelope for `/getCategories`: `{ "data": [ ... ] }`.
///
/// `data` may be absent or null in malformed responses; the decode step
/// reports that as an invalid response format.
#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    data: Option<Vec<Category>>,
}

/// HTTP client for the plant API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a client with the configured request timeout.
    pub fn new(config: ApiConfig) -> Result<Self, VerdantError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch the category collection.
    ///
    /// The envelope's `data` field is required; a received body without it
    /// classifies as an invalid response format, not a transport error.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        let body = self
            .get(self.config.categories_url(), Resource::Categories)
            .await?;

        let envelope: CategoriesEnvelope =
            serde_json::from_str(&body).map_err(|_| FetchError::InvalidFormat)?;
        envelope.data.ok_or(FetchError::InvalidFormat)
    }

    /// Fetch the question collection (bare array on the wire; a null body
    /// classifies as an invalid response format).
    pub async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError> {
        let body = self
            .get(self.config.questions_url(), Resource::Questions)
            .await?;

        let items: Option<Vec<Question>> =
            serde_json::from_str(&body).map_err(|_| FetchError::InvalidFormat)?;
        items.ok_or(FetchError::InvalidFormat)
    }

    /// Issue one GET and return the raw body of a successful response.
    async fn get(&self, url: String, resource: Resource) -> Result<String, FetchError> {
        debug!(%url, resource = %resource, "API request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            let classified = FetchError::from_transport(&e, resource);
            warn!(resource = %resource, error = %e, classified = %classified, "Request failed");
            classified
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_transport(&e, resource))?;

        if !status.is_success() {
            let classified = FetchError::from_error_body(&body, resource);
            warn!(
                resource = %resource,
                status = status.as_u16(),
                error = %classified,
                "API error response"
            );
            return Err(classified);
        }

        debug!(resource = %resource, bytes = body.len(), "API response received");
        Ok(body)
    }

    /// The endpoint settings this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}
