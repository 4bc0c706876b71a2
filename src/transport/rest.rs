//! Reqwest-backed REST channel
//!
//! Carries HTTP basic auth and `Content-Type: application/json` on every
//! request against the controller's `/redfish/v1` base. TLS verification is
//! configurable because the controller ships with a self-signed certificate.

use crate::error::{Error, Result};
use crate::transport::{status_error, Payload, RestChannel};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the REST channel
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Controller address (IP or hostname)
    pub address: String,
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password (should use secrets in production)
    pub password: String,
    /// Accept the controller's self-signed certificate
    pub accept_invalid_certs: bool,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            address: "localhost".to_string(),
            username: "admin".to_string(),
            password: String::new(),
            accept_invalid_certs: true,
            timeout: Duration::from_secs(30),
        }
    }
}

impl RestConfig {
    /// Base URL for the controller's REST API
    pub fn base_url(&self) -> String {
        format!("https://{}/redfish/v1", self.address)
    }
}

// =============================================================================
// REST Client
// =============================================================================

/// HTTPS client for the discovery controller REST API
pub struct RestClient {
    config: RestConfig,
    client: reqwest::Client,
}

impl RestClient {
    /// Create a new client from explicit configuration
    pub fn new(config: RestConfig) -> Result<Self> {
        if config.address.is_empty() {
            return Err(Error::Configuration(
                "controller address must not be empty".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    /// Combine the base URL and OID into the full request URI
    fn uri(&self, oid: &str) -> String {
        let base = self.config.base_url();
        if oid.starts_with('/') {
            format!("{}{}", base, oid)
        } else {
            format!("{}/{}", base, oid)
        }
    }

    fn request(&self, method: reqwest::Method, oid: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.uri(oid))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    async fn read_json(oid: &str, response: reqwest::Response) -> Result<Payload> {
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(oid, status.as_u16()));
        }

        // Some mutations answer 2xx with an empty body
        let body = response.text().await?;
        if body.is_empty() {
            return Ok(Payload::Null);
        }

        serde_json::from_str(&body).map_err(|err| Error::Decode {
            oid: oid.to_string(),
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl RestChannel for RestClient {
    async fn get(&self, oid: &str) -> Result<Payload> {
        debug!("GET {}", oid);
        let response = self.request(reqwest::Method::GET, oid).send().await?;
        Self::read_json(oid, response).await
    }

    async fn post(&self, oid: &str, body: Payload) -> Result<Payload> {
        debug!("POST {}", oid);
        let response = self
            .request(reqwest::Method::POST, oid)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;
        Self::read_json(oid, response).await
    }

    async fn put(&self, oid: &str, body: Payload) -> Result<Payload> {
        debug!("PUT {}", oid);
        let response = self
            .request(reqwest::Method::PUT, oid)
            .json(&body)
            .send()
            .await?;
        Self::read_json(oid, response).await
    }

    async fn delete(&self, oid: &str) -> Result<()> {
        debug!("DELETE {}", oid);
        let response = self.request(reqwest::Method::DELETE, oid).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(oid, status.as_u16()));
        }
        Ok(())
    }
}
