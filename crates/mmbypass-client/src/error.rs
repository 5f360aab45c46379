use thiserror::Error;

/// Failures of a single catalog `fetch`.
///
/// Every variant is terminal for the call. The only re-query the client ever
/// makes is the collection fallback, which is driven by an empty result and
/// never by one of these errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The body is not JSON or lacks a field the protocol depends on.
    #[error("catalog response has an unexpected structure: {context}")]
    ResponseShape {
        context: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The service answered `success: false`, or could not be reached.
    #[error("catalog service interaction failed: {reason}")]
    ServiceInteraction {
        reason: String,
        #[source]
        source: Option<TransportError>,
    },

    /// The service answered `success: false` with the quota code.
    #[error("catalog service limit is exhausted (code {code}); try again later")]
    ServiceLimit { code: i64 },
}

impl CatalogError {
    pub(crate) fn shape(context: impl Into<String>) -> Self {
        CatalogError::ResponseShape {
            context: context.into(),
            source: None,
        }
    }
}

impl From<TransportError> for CatalogError {
    fn from(err: TransportError) -> Self {
        CatalogError::ServiceInteraction {
            reason: err.to_string(),
            source: Some(err),
        }
    }
}

/// Errors from the HTTP layer, before any body is inspected.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] wreq::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: wreq::Error,
    },
}
