//! CLI configuration
//!
//! Connection settings collected from flags and `FARM_*` environment
//! variables.

use std::time::Duration;

use farm_client::{ClientConfig, Credentials};

pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8080";
pub const DEFAULT_REGION: &str = "us-west-2";

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// Farm API base URL (e.g., "https://farm.example.com")
    pub endpoint_url: String,

    /// Region reported in diagnostics
    pub region: String,

    /// Bearer token, if any
    pub token: Option<String>,

    /// Per-request timeout; none means the HTTP client default
    pub timeout: Option<Duration>,

    /// Upgrade binding warnings to errors
    pub strict: bool,
}

impl Config {
    pub fn new(endpoint_url: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            region: region.into(),
            token: None,
            timeout: None,
            strict: false,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint_url.is_empty() {
            anyhow::bail!("endpoint_url cannot be empty");
        }

        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            anyhow::bail!("endpoint_url must start with http:// or https://");
        }

        if self.region.trim().is_empty() {
            anyhow::bail!("region cannot be empty");
        }

        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            anyhow::bail!("timeout must be greater than 0");
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.endpoint_url.clone(), self.region.clone());
        match self.timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }

    pub fn credentials(&self) -> Credentials {
        match &self.token {
            Some(token) => Credentials::token(token.clone()),
            None => Credentials::anonymous(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_URL, DEFAULT_REGION)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint_url", &self.endpoint_url)
            .field("region", &self.region)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("strict", &self.strict)
            .finish()
    }
}
