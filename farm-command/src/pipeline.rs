//! Command invocation pipeline
//!
//! Runs one command through binding, request construction, dispatch and
//! projection. A [`Pipeline`] is shared by concurrent invocations; each
//! invocation owns its own context and never sees another's values.

use std::fmt;

use farm_core::CommandDefinition;
use serde_json::Value;
use tracing::{Instrument, Span, debug, info_span};
use uuid::Uuid;

use crate::binding::{BindOptions, Bound, RawValue, bind};
use crate::cancel::CancelSignal;
use crate::dispatch::{SharedClient, dispatch};
use crate::error::{BindingWarning, InvocationError};
use crate::registry::CommandRegistry;
use crate::request::build_request;

/// Lifecycle of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Unbound,
    Bound,
    RequestBuilt,
    Dispatched,
    Succeeded,
    Failed,
}

impl InvocationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unbound => "unbound",
            Self::Bound => "bound",
            Self::RequestBuilt => "request-built",
            Self::Dispatched => "dispatched",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One command call as the caller describes it
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub command: String,
    pub inputs: Vec<(String, RawValue)>,
    pub select: Option<String>,
    pub cancel: Option<CancelSignal>,
}

impl Invocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Add one raw input under a parameter name or alias
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.inputs.push((key.into(), value.into()));
        self
    }

    pub fn select(mut self, selector: impl Into<String>) -> Self {
        self.select = Some(selector.into());
        self
    }

    pub fn cancel_on(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }
}

/// Successful invocation result
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The projected value
    pub value: Value,
    /// Non-fatal binding problems
    pub warnings: Vec<BindingWarning>,
}

/// Table-driven executor for every registered command
#[derive(Debug)]
pub struct Pipeline {
    registry: CommandRegistry,
    client: SharedClient,
    options: BindOptions,
}

impl Pipeline {
    pub fn new(registry: CommandRegistry, client: SharedClient) -> Self {
        Self {
            registry,
            client,
            options: BindOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BindOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn client(&self) -> &SharedClient {
        &self.client
    }

    /// Run one invocation to a terminal state
    ///
    /// # Errors
    /// Fails if the command is unknown, binding rejects the input, the remote
    /// call fails or is cancelled, or the response lacks the selected field.
    pub async fn invoke(&self, invocation: Invocation) -> Result<Outcome, InvocationError> {
        self.prepare(invocation)?.send().await
    }

    /// Bind an invocation without sending it
    ///
    /// Binding warnings are available from the returned [`Prepared`] before
    /// anything goes over the wire.
    ///
    /// # Errors
    /// Fails if the command is unknown or binding rejects the input.
    pub fn prepare(&self, invocation: Invocation) -> Result<Prepared<'_>, InvocationError> {
        let definition = self
            .registry
            .get(&invocation.command)
            .ok_or_else(|| InvocationError::UnknownCommand(invocation.command.clone()))?;

        let span = info_span!(
            "invoke",
            command = definition.name,
            invocation_id = %Uuid::new_v4()
        );

        let Invocation {
            inputs,
            select,
            cancel,
            ..
        } = invocation;

        let bound = {
            let _entered = span.enter();
            let mut state = InvocationState::Unbound;
            match bind(definition, inputs, select.as_deref(), self.options) {
                Ok(bound) => {
                    advance(&mut state, InvocationState::Bound);
                    bound
                }
                Err(e) => {
                    advance(&mut state, InvocationState::Failed);
                    return Err(e.into());
                }
            }
        };

        Ok(Prepared {
            pipeline: self,
            definition,
            bound,
            cancel,
            span,
        })
    }
}

/// A bound invocation waiting to be sent
#[derive(Debug)]
pub struct Prepared<'p> {
    pipeline: &'p Pipeline,
    definition: &'static CommandDefinition,
    bound: Bound<'static>,
    cancel: Option<CancelSignal>,
    span: Span,
}

impl Prepared<'_> {
    pub fn definition(&self) -> &'static CommandDefinition {
        self.definition
    }

    /// Non-fatal binding problems, known before dispatch
    pub fn warnings(&self) -> &[BindingWarning] {
        &self.bound.warnings
    }

    /// Build the request, dispatch it and project the response
    pub async fn send(self) -> Result<Outcome, InvocationError> {
        let span = self.span.clone();

        async move {
            let mut state = InvocationState::Bound;
            let result = self.run(&mut state).await;
            let end = if result.is_ok() {
                InvocationState::Succeeded
            } else {
                InvocationState::Failed
            };
            advance(&mut state, end);
            result
        }
        .instrument(span)
        .await
    }

    async fn run(self, state: &mut InvocationState) -> Result<Outcome, InvocationError> {
        let Prepared {
            pipeline,
            definition,
            bound,
            cancel,
            ..
        } = self;

        let request = build_request(&bound.context);
        advance(state, InvocationState::RequestBuilt);
        debug!(fields = request.len(), "Request built");

        advance(state, InvocationState::Dispatched);
        let response = dispatch(&pipeline.client, definition, request, cancel.as_ref()).await?;

        let value = bound.context.projection().apply(&bound.context, response)?;
        Ok(Outcome {
            value,
            warnings: bound.warnings,
        })
    }
}

fn advance(state: &mut InvocationState, to: InvocationState) {
    debug!(from = %state, %to, "Invocation state");
    *state = to;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BindingError;
    use crate::testing::{ScriptedClient, shared};
    use farm_client::ClientError;
    use serde_json::json;
    use std::sync::Arc;

    fn pipeline(client: ScriptedClient) -> Pipeline {
        Pipeline::new(CommandRegistry::builtin().unwrap(), shared(client))
    }

    #[tokio::test]
    async fn test_list_fleets_default_projection() {
        let client = ScriptedClient::ok(json!({
            "Fleets": [{"FleetId": "fleet-1", "Status": "ACTIVE"}],
            "NextToken": null
        }));
        let pipeline = pipeline(client.clone());

        let outcome = pipeline
            .invoke(Invocation::new("ListFleets").arg("FarmId", "farm-123"))
            .await
            .unwrap();

        assert_eq!(outcome.value, json!([{"FleetId": "fleet-1", "Status": "ACTIVE"}]));
        assert!(outcome.warnings.is_empty());

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "ListFleets");
        assert_eq!(Value::Object(calls[0].1.clone()), json!({"FarmId": "farm-123"}));
    }

    #[tokio::test]
    async fn test_create_storage_profile() {
        let client = ScriptedClient::ok(json!({"StorageProfileId": "sp-42"}));
        let pipeline = pipeline(client.clone());

        let outcome = pipeline
            .invoke(
                Invocation::new("createStorageProfile")
                    .arg("Name", "Linux Profile")
                    .arg("farmid", "farm-1")
                    .arg("OsFamily", "linux"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.value, json!("sp-42"));
        let request = &client.calls()[0].1;
        assert_eq!(
            Value::Object(request.clone()),
            json!({"DisplayName": "Linux Profile", "FarmId": "farm-1", "OsFamily": "LINUX"})
        );
    }

    #[tokio::test]
    async fn test_whole_and_pass_through_selectors() {
        let response = json!({"Fleets": [], "NextToken": "t-2"});
        let pipeline = pipeline(ScriptedClient::ok(response.clone()));

        let whole = pipeline
            .invoke(Invocation::new("ListFleets").arg("FarmId", "farm-1").select("*"))
            .await
            .unwrap();
        assert_eq!(whole.value, response);

        let echoed = pipeline
            .invoke(
                Invocation::new("ListFleets")
                    .arg("FarmId", "farm-1")
                    .select("^FarmId"),
            )
            .await
            .unwrap();
        assert_eq!(echoed.value, json!("farm-1"));
    }

    #[tokio::test]
    async fn test_missing_required_still_dispatches_with_warning() {
        let client = ScriptedClient::ok(json!({"Fleets": []}));
        let pipeline = pipeline(client.clone());

        let outcome = pipeline.invoke(Invocation::new("ListFleets")).await.unwrap();

        assert_eq!(
            outcome.warnings,
            vec![BindingWarning::MissingRequired { param: "FarmId" }]
        );
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_strict_binding_sends_nothing() {
        let client = ScriptedClient::ok(json!({"Fleets": []}));
        let pipeline = pipeline(client.clone()).with_options(BindOptions { strict: true });

        let err = pipeline.invoke(Invocation::new("ListFleets")).await.unwrap_err();

        assert!(matches!(
            err,
            InvocationError::Binding(BindingError::Strict(BindingWarning::MissingRequired {
                param: "FarmId"
            }))
        ));
        assert!(client.calls().is_empty());
        assert!(!pipeline.client().is_created());
    }

    #[tokio::test]
    async fn test_warnings_known_before_failed_dispatch() {
        let client = ScriptedClient::failing(|| ClientError::ApiError {
            status: 400,
            code: Some("ValidationException".to_string()),
            message: "ValidationException".to_string(),
        });
        let pipeline = pipeline(client.clone());

        let prepared = pipeline
            .prepare(
                Invocation::new("CreateFleet")
                    .arg("FarmId", "farm-1")
                    .arg("DisplayName", "Render nodes"),
            )
            .unwrap();

        assert_eq!(
            prepared.warnings(),
            &[
                BindingWarning::MissingRequired { param: "RoleArn" },
                BindingWarning::MissingRequired {
                    param: "MaxWorkerCount"
                },
                BindingWarning::MissingRequired {
                    param: "Configuration"
                },
            ]
        );
        assert!(client.calls().is_empty());

        let err = prepared.send().await.unwrap_err();
        assert!(matches!(
            err,
            InvocationError::Service {
                operation: "CreateFleet",
                ..
            }
        ));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let pipeline = pipeline(ScriptedClient::ok(json!({})));

        let err = pipeline.invoke(Invocation::new("ListQueues")).await.unwrap_err();
        assert!(matches!(err, InvocationError::UnknownCommand(name) if name == "ListQueues"));
    }

    #[tokio::test]
    async fn test_missing_selected_field_fails_projection() {
        let pipeline = pipeline(ScriptedClient::ok(json!({"NextToken": null})));

        let err = pipeline
            .invoke(Invocation::new("ListFleets").arg("FarmId", "farm-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, InvocationError::Projection(_)));
    }

    #[tokio::test]
    async fn test_service_failure_surfaces() {
        let pipeline = pipeline(ScriptedClient::failing(|| ClientError::ApiError {
            status: 404,
            code: Some("ResourceNotFoundException".to_string()),
            message: "Fleet not found".to_string(),
        }));

        let err = pipeline
            .invoke(
                Invocation::new("GetFleet")
                    .arg("FarmId", "farm-1")
                    .arg("Id", "fleet-9"),
            )
            .await
            .unwrap_err();
        assert!(err.client_error().unwrap().is_not_found());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_invocations_keep_their_own_values() {
        let client = ScriptedClient::ok(json!({"FleetId": "ignored"}));
        let pipeline = Arc::new(pipeline(client.clone()));

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..10 {
            let pipeline = pipeline.clone();
            tasks.spawn(async move {
                pipeline
                    .invoke(
                        Invocation::new("GetFleet")
                            .arg("FarmId", "farm-1")
                            .arg("FleetId", format!("fleet-{i}").as_str())
                            .select("^FleetId"),
                    )
                    .await
                    .map(|outcome| (i, outcome.value))
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (i, value) = joined.unwrap().unwrap();
            assert_eq!(value, json!(format!("fleet-{i}")));
        }
        assert_eq!(client.calls().len(), 10);
    }

    #[test]
    fn test_terminal_states() {
        assert!(InvocationState::Succeeded.is_terminal());
        assert!(InvocationState::Failed.is_terminal());
        assert!(!InvocationState::Dispatched.is_terminal());
        assert_eq!(InvocationState::RequestBuilt.to_string(), "request-built");
    }
}
