//! Farm HTTP Client
//!
//! A small HTTP transport for the rendering-farm management API.
//!
//! The client knows nothing about individual commands. Callers hand it an
//! operation name and a JSON request object; the routing table decides the
//! method, fills path parameters from the request and sends whatever is left
//! as a query string or JSON body.
//!
//! # Example
//!
//! ```no_run
//! use farm_client::{ClientConfig, Credentials, FarmClient, RemoteClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::new("http://localhost:8080", "us-west-2");
//!     let client = FarmClient::create(Credentials::anonymous(), &config)?;
//!
//!     let request = json!({ "FarmId": "farm-123" });
//!     let response = client
//!         .invoke("ListFleets", request.as_object().cloned().unwrap_or_default())
//!         .await?;
//!
//!     println!("{}", response);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod operations;

// Re-export commonly used types
pub use error::{BoxError, ClientError, Result};
pub use operations::{Method, Route};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// The remote side of a command invocation
///
/// Implementations must be safe to share between concurrent invocations.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Perform exactly one remote call
    async fn invoke(&self, operation: &str, request: Map<String, Value>) -> Result<Value>;

    /// Endpoint this client talks to, for diagnostics
    fn endpoint(&self) -> &str;
}

/// Credentials attached to every request
#[derive(Clone, Default)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    /// Bearer token credentials
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Send requests without an Authorization header
    pub fn anonymous() -> Self {
        Self::default()
    }

    fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Connection settings for the farm API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://farm.example.com")
    pub endpoint_url: String,
    /// Region the endpoint serves
    pub region: String,
    /// Per-request timeout enforced by the HTTP client
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint_url: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            region: region.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client for the farm management API
#[derive(Debug, Clone)]
pub struct FarmClient {
    /// Base URL without trailing slash, for display
    base_url: String,
    /// Parsed base URL routes are joined onto
    endpoint: Url,
    region: String,
    credentials: Credentials,
    /// HTTP client instance
    client: Client,
}

impl FarmClient {
    /// Create a client from credentials and endpoint settings
    ///
    /// # Errors
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// cannot be built.
    pub fn create(credentials: Credentials, config: &ClientConfig) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("farm-cli/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Self::with_client(config, credentials, builder.build()?)
    }

    /// Create a client around a preconfigured reqwest Client
    pub fn with_client(
        config: &ClientConfig,
        credentials: Credentials,
        client: Client,
    ) -> Result<Self> {
        let base_url = config.endpoint_url.trim_end_matches('/').to_string();
        let endpoint = Url::parse(&base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("invalid endpoint URL '{}': {}", base_url, e))
        })?;

        Ok(Self {
            base_url,
            endpoint,
            region: config.region.clone(),
            credentials,
            client,
        })
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Sort a reqwest failure into the transport error it represents
    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_connect() {
            ClientError::Unreachable {
                endpoint: self.base_url.clone(),
                source: Box::new(err),
            }
        } else if err.is_timeout() {
            ClientError::Timeout {
                endpoint: self.base_url.clone(),
                source: Box::new(err),
            }
        } else {
            ClientError::RequestFailed(err)
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Error statuses become [`ClientError::ApiError`]; an empty success body
    /// is reported as an empty object.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_slice(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[async_trait]
impl RemoteClient for FarmClient {
    async fn invoke(&self, operation: &str, mut request: Map<String, Value>) -> Result<Value> {
        let route = operations::find_route(operation)
            .ok_or_else(|| ClientError::UnknownOperation(operation.to_string()))?;
        let url = route.expand(&self.endpoint, &mut request)?;
        let request_id = Uuid::new_v4();

        debug!(
            operation,
            %request_id,
            method = ?route.method,
            %url,
            "Sending request"
        );

        let mut builder = self
            .client
            .request(route.method.as_reqwest(), url)
            .header("x-request-id", request_id.to_string());
        if let Some(token) = self.credentials.bearer() {
            builder = builder.bearer_auth(token);
        }
        builder = if route.method.sends_body() {
            builder.json(&request)
        } else {
            builder.query(&operations::query_pairs(&request))
        };

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        debug!(operation, %request_id, status = response.status().as_u16(), "Received response");

        self.handle_response(response).await
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

/// Error body shape returned by the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "Message")]
    message: Option<String>,
    #[serde(alias = "Code", alias = "__type")]
    code: Option<String>,
}

fn api_error(status: u16, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            code,
        }) => ClientError::ApiError {
            status,
            code,
            message,
        },
        _ => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                ClientError::api_error(status, "Unknown error")
            } else {
                ClientError::api_error(status, text)
            }
        }
    }
}
