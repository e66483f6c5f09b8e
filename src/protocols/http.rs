//! WHOIS-over-HTTP client.
//!
//! Some registries only publish replies through a web endpoint; the
//! authority address is then an `http(s)://` URL prefix and the query is a
//! plain GET of `prefix + domain`. Redirects are not followed and TLS
//! verification is disabled: several of these authorities serve self-signed
//! or mismatched certificates.

use crate::error::WhoisLookupError;
use std::time::Duration;
use tracing::debug;

/// HTTP client for fetching WHOIS replies from web authorities.
#[derive(Debug, Clone)]
pub struct HttpWhoisClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpWhoisClient {
    /// Create a client with the given total exchange timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, WhoisLookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| {
                WhoisLookupError::connection(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout })
    }

    /// Fetch the raw reply body for `prefix + domain`.
    ///
    /// The body still contains markup; stripping happens during
    /// normalization.
    ///
    /// # Errors
    ///
    /// `ConnectionFailure`/`Timeout` on any transport problem.
    pub async fn fetch(&self, prefix: &str, domain: &str) -> Result<Vec<u8>, WhoisLookupError> {
        let url = format!("{}{}", prefix, domain);
        debug!(url = url.as_str(), "fetching WHOIS reply over HTTP");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;
        let body = response.bytes().await.map_err(|e| self.classify(&url, e))?;

        Ok(body.to_vec())
    }

    /// Map a transport error, reporting the deadline this client was
    /// actually configured with.
    fn classify(&self, url: &str, err: reqwest::Error) -> WhoisLookupError {
        if err.is_timeout() {
            WhoisLookupError::timeout(format!("HTTP exchange with {}", url), self.timeout)
        } else {
            WhoisLookupError::connection(err.to_string())
        }
    }
}
