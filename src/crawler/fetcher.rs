//! HTTP fetching
//!
//! Workers consume fetching through the [`Fetcher`] trait so the crawl
//! engine can be driven by a scripted fetcher in tests. The production
//! implementation is a thin wrapper over a blocking reqwest client: the
//! worker pool is plain OS threads, so there is no async runtime to hand
//! requests to.
//!
//! Failures are not errors here. Any network problem, timeout, or non-2xx
//! status yields `None` and the worker moves on; the page is simply never
//! recorded.

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Per-request timeout
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum redirect hops before a fetch is abandoned
const MAX_REDIRECTS: usize = 10;

const USER_AGENT: &str = concat!("linkrank/", env!("CARGO_PKG_VERSION"));

/// Source of page bodies for the crawl
pub trait Fetcher {
    /// Fetches a URL.
    ///
    /// # Returns
    ///
    /// * `Some(body)` - The response body of a successful (2xx) fetch
    /// * `None` - Any failure: network error, timeout, non-2xx status
    fn fetch(&self, url: &str) -> Option<String>;
}

/// Builds the blocking HTTP client used for crawling.
///
/// Redirects are followed (up to 10 hops), bodies are gzip-decoded, and
/// every request carries the crate's user agent and a 10-second timeout.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .build()
}

/// Production fetcher backed by a pooled blocking reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(url, %error, "request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, %status, "non-success status");
            return None;
        }

        match response.text() {
            Ok(body) => Some(body),
            Err(error) => {
                tracing::debug!(url, %error, "failed to read body");
                None
            }
        }
    }
}
