use crate::codec::MediaType;
use crate::error::{RestError, Result};
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Base URL of the public DSpace demonstration repository
pub const DEMO_BASE_URL: &str = "https://demo.dspace.org/rest";

/// Create the default HTTP client for REST API requests
/// with connection pooling and the timeouts from `config`
pub fn create_rest_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?;
    Ok(client)
}

/// Configuration for the DSpace REST client.
///
/// Immutable once handed to a [`crate::RestClient`].
#[derive(Debug, Clone)]
pub struct Config {
    base_url: Url,
    media_type: MediaType,
    timeout: Duration,
    connect_timeout: Duration,
}

impl Config {
    /// Create a configuration for the REST API rooted at `base_url`,
    /// e.g. "https://demo.dspace.org/rest". Trailing slashes are dropped.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(RestError::InvalidConfig("base URL is empty".to_string()));
        }

        let url = Url::parse(trimmed)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(RestError::InvalidConfig(format!(
                "base URL must use http:// or https://, got {}",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(RestError::InvalidConfig(format!(
                "base URL {} must not carry a query or fragment",
                trimmed
            )));
        }
        if url.cannot_be_a_base() {
            return Err(RestError::InvalidConfig(format!(
                "base URL {} cannot carry a path",
                trimmed
            )));
        }

        Ok(Config {
            base_url: url,
            media_type: MediaType::default(),
            timeout: Duration::from_secs(300), // 5 minutes
            connect_timeout: Duration::from_secs(10),
        })
    }

    /// Set the representation used for request entities
    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    /// Set the total request timeout used by the default transport
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout used by the default transport
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Base URL, without trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base_url
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}
