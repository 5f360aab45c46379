//! Catalog search client with the collection fallback.

mod classify;
mod endpoint;

use crate::error::{CatalogError, TransportError};
use crate::payload::UpstreamPayload;
use crate::transport::{BrowserTransport, Transport};

use classify::{classify, collection_id, Outcome};

pub use endpoint::{search_url, CATALOG_SEARCH_PATH, DEFAULT_ORIGIN};

/// The two requests a fetch can make. There is no transition out of
/// `CollectionLookup`, which bounds every fetch to two calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TextSearch,
    CollectionLookup,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::TextSearch => "text_search",
            Stage::CollectionLookup => "collection_lookup",
        }
    }
}

/// Client for the catalog `search` endpoint.
///
/// A text search that the catalog accepts but answers with no items is
/// retried once, addressed by the collection id the catalog resolved the
/// text to. Any failure ends the fetch.
///
/// Holds no per-request state, so one instance can serve concurrent fetches.
#[derive(Debug, Clone)]
pub struct CatalogClient<T = BrowserTransport> {
    transport: T,
    search_url: String,
}

impl CatalogClient<BrowserTransport> {
    /// Creates a client for `origin` using the Chrome-impersonating transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the HTTP client cannot be built.
    pub fn browser(origin: &str, timeout_secs: u64) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            BrowserTransport::new(timeout_secs)?,
            origin,
        ))
    }
}

impl<T: Transport> CatalogClient<T> {
    #[must_use]
    pub fn with_transport(transport: T, origin: &str) -> Self {
        Self {
            transport,
            search_url: search_url(origin),
        }
    }

    #[must_use]
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Runs `payload` against the catalog and returns the raw body of the
    /// final response.
    ///
    /// Makes one call, or two when the first answer is an empty success.
    /// The second answer is returned whatever its item count.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::ResponseShape`]: a body is not JSON, lacks
    ///   `success` or `items`, or an empty result lacks
    ///   `processor.collectionId`.
    /// - [`CatalogError::ServiceLimit`]: `success: false` with code 7.
    /// - [`CatalogError::ServiceInteraction`]: any other `success: false`,
    ///   or a transport failure including timeouts.
    pub async fn fetch(&self, payload: &UpstreamPayload) -> Result<String, CatalogError> {
        let parsed = match self.send(payload, Stage::TextSearch).await? {
            Outcome::Items { body, .. } => return Ok(body),
            Outcome::Empty { parsed, .. } => parsed,
        };

        let collection_id = collection_id(&parsed)?;
        tracing::info!(
            collection_id = %collection_id,
            "text search returned no items; re-querying by collection"
        );

        let lookup = payload.to_collection_lookup(collection_id);
        let outcome = self.send(&lookup, Stage::CollectionLookup).await?;
        Ok(outcome.into_body())
    }

    async fn send(
        &self,
        payload: &UpstreamPayload,
        stage: Stage,
    ) -> Result<Outcome, CatalogError> {
        let body = payload.to_json().map_err(|e| CatalogError::ResponseShape {
            context: "failed to serialize request payload".to_string(),
            source: Some(e),
        })?;

        let response = self
            .transport
            .post_json(&self.search_url, body)
            .await
            .inspect_err(|e| {
                tracing::warn!(stage = stage.as_str(), error = %e, "catalog request failed");
            })?;

        tracing::debug!(
            stage = stage.as_str(),
            status = response.status,
            bytes = response.body.len(),
            "catalog responded"
        );

        let outcome = classify(response.body).inspect_err(|e| {
            tracing::warn!(
                stage = stage.as_str(),
                status = response.status,
                error = %e,
                "catalog response rejected"
            );
        })?;

        if let Outcome::Items { count, .. } = &outcome {
            tracing::debug!(stage = stage.as_str(), items = count, "catalog returned items");
        }

        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
