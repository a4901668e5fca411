//! Transport to the remote rules-executor service.
//!
//! The service exposes exactly two operations, both JSON over POST:
//! creating an executor from a rule set and processing a fact batch against
//! an existing executor. [`HttpGateway`] performs one request per logical
//! operation with no retries; [`ExecutorGateway`] is the seam that lets
//! tests substitute a stub.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use ring_core::{ExecutorId, FactBatch, MatchRecord, RuleSet};

use crate::Error;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Base address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://0.0.0.0:8080";

/// The two calls a session makes against the remote service.
///
/// Object-safe so a [`Session`](crate::Session) can hold any implementation
/// behind a box; tests exercise dispatch behavior through stub gateways.
#[async_trait]
pub trait ExecutorGateway: Send + Sync {
    /// Register a rule set and return the executor identifier the service
    /// assigns to it.
    async fn create_executor(&self, rules: &RuleSet) -> Result<ExecutorId, Error>;

    /// Evaluate a fact batch against a previously created executor and return
    /// the matches in server order.
    async fn process_facts(
        &self,
        id: ExecutorId,
        facts: &FactBatch,
    ) -> Result<Vec<MatchRecord>, Error>;
}

/// HTTP gateway to the rules-executor service.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

/// Builder for configuring an [`HttpGateway`].
#[derive(Debug)]
pub struct HttpGatewayBuilder {
    base_url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl HttpGatewayBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Create a builder from a host and port, as `http://{host}:{port}`.
    pub fn for_host(host: impl AsRef<str>, port: u16) -> Self {
        Self::new(format!("http://{}:{}", host.as_ref(), port))
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings. The
    /// custom client is responsible for its own timeout and headers.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Result<HttpGateway, Error> {
        let client = match self.client {
            Some(c) => c,
            None => {
                let mut headers = HeaderMap::new();
                headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
                Client::builder()
                    .timeout(self.timeout)
                    .default_headers(headers)
                    .build()
                    .map_err(|e| Error::Configuration(e.to_string()))?
            }
        };

        Ok(HttpGateway {
            client,
            base_url: self.base_url,
        })
    }
}

impl HttpGateway {
    /// Create a gateway with default configuration.
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpGatewayBuilder::new(base_url)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>) -> HttpGatewayBuilder {
        HttpGatewayBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ExecutorGateway for HttpGateway {
    async fn create_executor(&self, rules: &RuleSet) -> Result<ExecutorId, Error> {
        let url = format!("{}/create-rules-executor", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(rules)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: format!("failed to create rules executor: {status}"),
            });
        }

        // The service answers with the executor id as a bare integer body.
        let body = response
            .text()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        let id: ExecutorId = body.trim().parse().map_err(|e| {
            Error::Deserialization(format!("expected integer executor id, got {body:?}: {e}"))
        })?;

        tracing::debug!(%id, "created rules executor");
        Ok(id)
    }

    async fn process_facts(
        &self,
        id: ExecutorId,
        facts: &FactBatch,
    ) -> Result<Vec<MatchRecord>, Error> {
        let url = format!("{}/rules-executors/{}/process", self.base_url, id);

        let response = self
            .client
            .post(&url)
            .json(facts)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: format!("failed to process facts: {status}"),
            });
        }

        let matches = response
            .json::<Vec<MatchRecord>>()
            .await
            .map_err(|e| Error::Deserialization(e.to_string()))?;

        tracing::debug!(%id, matches = matches.len(), "processed fact batch");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_trims_trailing_slash() {
        let gateway = HttpGateway::new("http://localhost:8080/");
        assert_eq!(gateway.base_url(), "http://localhost:8080");
    }

    #[test]
    fn gateway_preserves_url_without_slash() {
        let gateway = HttpGateway::new("http://localhost:8080");
        assert_eq!(gateway.base_url(), "http://localhost:8080");
    }

    #[test]
    fn builder_for_host_formats_base_url() {
        let gateway = HttpGatewayBuilder::for_host("rules.internal", 9000)
            .build()
            .unwrap();
        assert_eq!(gateway.base_url(), "http://rules.internal:9000");
    }

    #[test]
    fn default_gateway_uses_default_base_url() {
        let gateway = HttpGateway::default();
        assert_eq!(gateway.base_url(), DEFAULT_BASE_URL);
    }
}
