//! HTTP transport for catalog requests.
//!
//! The catalog rejects clients whose TLS and HTTP/2 fingerprints do not look
//! like a browser, so the production transport drives `wreq` with a Chrome
//! emulation profile. [`Transport`] is the seam the protocol logic is written
//! against.

use std::future::Future;
use std::time::Duration;

use wreq::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use wreq::Client;
use wreq_util::Emulation;

use crate::error::TransportError;

/// Status and body of an upstream response. The body is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one JSON POST and returns the raw response.
pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// `wreq` client impersonating desktop Chrome.
#[derive(Debug, Clone)]
pub struct BrowserTransport {
    client: Client,
}

impl BrowserTransport {
    /// Builds the transport with a total request timeout of `timeout_secs`
    /// and a 10 second connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the TLS stack cannot be
    /// initialised.
    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        let client = Client::builder()
            .emulation(Emulation::Chrome131)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client })
    }
}

impl Transport for BrowserTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, TransportError> {
        let classify = |source: wreq::Error| {
            if source.is_timeout() {
                TransportError::Timeout {
                    url: url.to_owned(),
                }
            } else {
                TransportError::Request {
                    url: url.to_owned(),
                    source,
                }
            }
        };

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7")
            .body(body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(RawResponse { status, body })
    }
}
