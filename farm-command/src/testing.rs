//! Scripted remote clients for tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use farm_client::{ClientConfig, ClientError, RemoteClient, Result};
use serde_json::{Map, Value};

use crate::dispatch::SharedClient;

type Reply = Arc<dyn Fn() -> Result<Value> + Send + Sync>;

/// Records every call and answers with a fixed reply
#[derive(Clone)]
pub(crate) struct ScriptedClient {
    reply: Reply,
    delay: Option<Duration>,
    hang: bool,
    calls: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
}

impl ScriptedClient {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            hang: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn ok(response: Value) -> Self {
        Self::with_reply(Arc::new(move || Ok(response.clone())))
    }

    pub(crate) fn failing(error: impl Fn() -> ClientError + Send + Sync + 'static) -> Self {
        Self::with_reply(Arc::new(move || Err(error())))
    }

    /// Never answers
    pub(crate) fn hanging() -> Self {
        let mut client = Self::ok(Value::Null);
        client.hang = true;
        client
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteClient for ScriptedClient {
    async fn invoke(&self, operation: &str, request: Map<String, Value>) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), request));

        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        (self.reply)()
    }

    fn endpoint(&self) -> &str {
        "https://farm.invalid"
    }
}

/// Shared handle that always hands out `client`
pub(crate) fn shared(client: ScriptedClient) -> SharedClient {
    SharedClient::new(
        ClientConfig::new("https://farm.invalid", "us-west-2"),
        Box::new(move |_| Ok(Arc::new(client.clone()) as Arc<dyn RemoteClient>)),
    )
}
