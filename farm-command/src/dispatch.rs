//! Dispatch and error translation
//!
//! One remote call per invocation through a client handle that is created on
//! first use and shared read-only afterwards. Transport failures are sorted
//! into [`InvocationError`] variants; nothing is retried here.

use std::sync::Arc;

use farm_client::{ClientConfig, ClientError, Credentials, FarmClient, RemoteClient};
use farm_core::CommandDefinition;
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::cancel::CancelSignal;
use crate::error::InvocationError;

/// Creates the remote client from its configuration
pub type ClientFactory =
    Box<dyn Fn(&ClientConfig) -> Result<Arc<dyn RemoteClient>, ClientError> + Send + Sync>;

/// Lazily created client handle shared by all invocations
pub struct SharedClient {
    config: ClientConfig,
    factory: ClientFactory,
    handle: OnceCell<Arc<dyn RemoteClient>>,
}

impl SharedClient {
    pub fn new(config: ClientConfig, factory: ClientFactory) -> Self {
        Self {
            config,
            factory,
            handle: OnceCell::new(),
        }
    }

    /// Shared handle backed by the HTTP transport
    pub fn http(config: ClientConfig, credentials: Credentials) -> Self {
        Self::new(
            config,
            Box::new(move |config| {
                let client = FarmClient::create(credentials.clone(), config)?;
                Ok(Arc::new(client) as Arc<dyn RemoteClient>)
            }),
        )
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_created(&self) -> bool {
        self.handle.initialized()
    }

    /// Get the handle, creating it on first use
    ///
    /// Concurrent first callers wait for a single creation.
    pub async fn get(&self) -> Result<Arc<dyn RemoteClient>, InvocationError> {
        self.handle
            .get_or_try_init(|| async {
                info!(endpoint = %self.config.endpoint_url, region = %self.config.region, "Creating API client");
                (self.factory)(&self.config)
            })
            .await
            .cloned()
            .map_err(|source| InvocationError::ClientCreation {
                endpoint: self.config.endpoint_url.clone(),
                source,
            })
    }
}

impl std::fmt::Debug for SharedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedClient")
            .field("config", &self.config)
            .field("created", &self.is_created())
            .finish()
    }
}

/// Perform the remote call for one invocation
///
/// The cancel signal is observed only when the command is declared
/// cancellable; every other command runs its call to completion.
pub async fn dispatch(
    client: &SharedClient,
    definition: &CommandDefinition,
    request: Map<String, Value>,
    cancel: Option<&CancelSignal>,
) -> Result<Value, InvocationError> {
    let operation = definition.name;
    let handle = client.get().await?;
    let call = handle.invoke(operation, request);

    let result = match cancel.filter(|_| definition.cancellable) {
        Some(signal) => {
            tokio::select! {
                biased;
                _ = signal.cancelled() => {
                    warn!(operation, "Invocation cancelled");
                    return Err(InvocationError::Cancelled { operation });
                }
                result = call => result,
            }
        }
        None => call.await,
    };

    result.map_err(|source| translate(operation, client.config(), source))
}

/// Sort a client failure into the invocation error it surfaces as
fn translate(operation: &'static str, config: &ClientConfig, source: ClientError) -> InvocationError {
    if source.is_unreachable() {
        debug!(operation, error = %source, "Endpoint unreachable");
        InvocationError::NetworkResolution {
            operation,
            endpoint: config.endpoint_url.clone(),
            region: config.region.clone(),
            source,
        }
    } else {
        debug!(operation, error = %source, "Service call failed");
        InvocationError::Service {
            operation,
            message: source.to_string(),
            source,
        }
    }
}
