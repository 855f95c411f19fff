//! API command invocation
//!
//! Parses `--Param value` arguments, merges in JSON piped on stdin and runs
//! the command through the pipeline. A piped array runs one invocation per
//! element concurrently; all of them share one lazily created client.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use colored::*;
use farm_command::{
    BindOptions, BindingWarning, CancelSignal, CommandRegistry, Invocation, Pipeline, RawValue,
    SharedClient,
};
use farm_core::CommandDefinition;
use serde_json::{Map, Value};
use tokio::io::AsyncReadExt;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::Config;

/// Arguments following the command name
#[derive(Debug, Default, PartialEq)]
struct InvokeArgs {
    command: String,
    inputs: Vec<(String, String)>,
    select: Option<String>,
    stdin: bool,
}

/// Piped input, split into one parameter map per invocation
#[derive(Debug, PartialEq)]
struct Batch {
    items: Vec<Map<String, Value>>,
    /// Input was an array; output is one too
    many: bool,
}

/// Handle `farm <Command> ...`
pub async fn handle_invoke(args: Vec<String>, config: &Config, registry: CommandRegistry) -> Result<()> {
    let args = parse_args(args)?;
    let definition = registry.get(&args.command).with_context(|| {
        format!(
            "unknown command '{}'; run `farm commands` to list them",
            args.command
        )
    })?;

    let batch = if args.stdin {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read stdin")?;
        let piped: Value = serde_json::from_str(&text).context("stdin is not valid JSON")?;
        split_piped(piped)?
    } else {
        Batch {
            items: vec![Map::new()],
            many: false,
        }
    };

    let client = SharedClient::http(config.client_config(), config.credentials());
    let pipeline = Arc::new(
        Pipeline::new(registry, client).with_options(BindOptions {
            strict: config.strict,
        }),
    );

    let cancel = CancelSignal::new();
    // Other commands keep the default Ctrl-C behaviour
    let watcher = definition.cancellable.then(|| {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                cancel.cancel();
            }
        })
    });

    let many = batch.many;
    let results = run_batch(pipeline, definition, &args, batch, cancel).await;

    if let Some(watcher) = watcher {
        watcher.abort();
    }

    print_results(results, many)
}

fn parse_args(args: Vec<String>) -> Result<InvokeArgs> {
    let mut args = args.into_iter().peekable();
    let Some(command) = args.next() else {
        bail!("missing command name");
    };

    let mut parsed = InvokeArgs {
        command,
        ..InvokeArgs::default()
    };

    while let Some(arg) = args.next() {
        if arg == "--stdin" {
            parsed.stdin = true;
            continue;
        }

        let (key, inline) = if arg == "-s" {
            ("select".to_string(), None)
        } else if let Some(flag) = arg.strip_prefix("--") {
            match flag.split_once('=') {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (flag.to_string(), None),
            }
        } else {
            bail!("unexpected argument '{}'; parameters are passed as --Name value", arg);
        };

        if key.is_empty() {
            bail!("empty parameter name in '{}'", arg);
        }

        let value = match inline {
            Some(value) => value,
            None => match args.next_if(|next| !next.starts_with("--")) {
                Some(value) => value,
                None => bail!("--{} needs a value", key),
            },
        };

        if key.eq_ignore_ascii_case("select") {
            parsed.select = Some(value);
        } else {
            parsed.inputs.push((key, value));
        }
    }

    Ok(parsed)
}

fn split_piped(piped: Value) -> Result<Batch> {
    match piped {
        Value::Object(map) => Ok(Batch {
            items: vec![map],
            many: false,
        }),
        Value::Array(items) => {
            let items = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(map) => Ok(map),
                    other => bail!("stdin item {} is not a JSON object: {}", index, other),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Batch { items, many: true })
        }
        other => bail!("stdin must hold a JSON object or array, got: {}", other),
    }
}

/// Combine piped properties with command-line values
///
/// Command-line values win over piped ones for the same parameter. Piped
/// properties that name no parameter are skipped so the output of one
/// command can feed the next.
fn merge_inputs(
    definition: &CommandDefinition,
    cli: &[(String, String)],
    piped: Map<String, Value>,
) -> Vec<(String, RawValue)> {
    let given: HashSet<&str> = cli
        .iter()
        .filter_map(|(key, _)| definition.param(key))
        .map(|(param, _)| param.name)
        .collect();

    let mut inputs = Vec::new();
    for (key, value) in piped {
        match definition.param(&key) {
            Some((param, _)) if !given.contains(param.name) => {
                inputs.push((key, RawValue::Json(value)));
            }
            Some(_) => debug!(key = %key, "Piped value overridden on the command line"),
            None => debug!(key = %key, "Piped property names no parameter"),
        }
    }

    inputs.extend(
        cli.iter()
            .map(|(key, value)| (key.clone(), RawValue::Text(value.clone()))),
    );
    inputs
}

/// What one invocation of a batch produced
struct ItemReport {
    warnings: Vec<BindingWarning>,
    result: Result<Value>,
}

impl ItemReport {
    fn failed(error: anyhow::Error) -> Self {
        Self {
            warnings: Vec::new(),
            result: Err(error),
        }
    }
}

/// Run every item concurrently; reports come back in input order
///
/// Binding warnings are printed as soon as an item is bound, before its
/// call is sent.
async fn run_batch(
    pipeline: Arc<Pipeline>,
    definition: &CommandDefinition,
    args: &InvokeArgs,
    batch: Batch,
    cancel: CancelSignal,
) -> Vec<ItemReport> {
    let count = batch.items.len();
    let many = batch.many;
    let mut tasks = JoinSet::new();

    for (index, piped) in batch.items.into_iter().enumerate() {
        let invocation = Invocation {
            command: definition.name.to_string(),
            inputs: merge_inputs(definition, &args.inputs, piped),
            select: args.select.clone(),
            cancel: Some(cancel.clone()),
        };
        let pipeline = pipeline.clone();

        tasks.spawn(async move {
            let report = match pipeline.prepare(invocation) {
                Ok(prepared) => {
                    let warnings = prepared.warnings().to_vec();
                    print_warnings(many.then_some(index), &warnings);
                    ItemReport {
                        warnings,
                        result: prepared
                            .send()
                            .await
                            .map(|outcome| outcome.value)
                            .map_err(anyhow::Error::from),
                    }
                }
                Err(e) => ItemReport::failed(e.into()),
            };
            (index, report)
        });
    }

    let mut reports: Vec<Option<ItemReport>> = Vec::with_capacity(count);
    reports.resize_with(count, || None);

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, report)) => reports[index] = Some(report),
            Err(e) => warn!("Invocation task failed: {}", e),
        }
    }

    // A task that panicked never filled its slot
    reports
        .into_iter()
        .map(|report| {
            report.unwrap_or_else(|| ItemReport::failed(anyhow!("invocation did not complete")))
        })
        .collect()
}

fn print_results(reports: Vec<ItemReport>, many: bool) -> Result<()> {
    let total = reports.len();
    let mut values = Vec::with_capacity(total);
    let mut failures = 0;

    for (index, report) in reports.into_iter().enumerate() {
        match report.result {
            Ok(value) => values.push(value),
            Err(e) if !many => return Err(e),
            Err(e) => {
                failures += 1;
                eprintln!("{} item {}: {:#}", "error:".red().bold(), index, e);
            }
        }
    }

    let output = if many {
        Value::Array(values)
    } else {
        values.pop().unwrap_or(Value::Null)
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if failures > 0 {
        bail!("{} of {} invocations failed", failures, total);
    }
    Ok(())
}

fn print_warnings(item: Option<usize>, warnings: &[BindingWarning]) {
    for warning in warnings {
        let message = match item {
            Some(index) => format!("item {}: {}", index, warning),
            None => warning.to_string(),
        };
        eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use farm_client::{ClientConfig, RemoteClient};
    use serde_json::json;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// How the test client answers a call
    enum Reply {
        /// The request it received
        Echo,
        /// A 400 validation error
        Reject,
        /// Echo, but panic when FleetId has this value
        PanicOn(&'static str),
    }

    struct TestClient(Reply);

    #[async_trait]
    impl RemoteClient for TestClient {
        async fn invoke(
            &self,
            _operation: &str,
            request: Map<String, Value>,
        ) -> farm_client::Result<Value> {
            match self.0 {
                Reply::Reject => Err(farm_client::ClientError::ApiError {
                    status: 400,
                    code: Some("ValidationException".to_string()),
                    message: "ValidationException".to_string(),
                }),
                Reply::PanicOn(fleet) if request.get("FleetId") == Some(&json!(fleet)) => {
                    panic!("client blew up on {}", fleet)
                }
                Reply::Echo | Reply::PanicOn(_) => Ok(Value::Object(request)),
            }
        }

        fn endpoint(&self) -> &str {
            "https://farm.invalid"
        }
    }

    fn test_pipeline(reply: Reply) -> Arc<Pipeline> {
        let client: Arc<dyn RemoteClient> = Arc::new(TestClient(reply));
        let shared = SharedClient::new(
            ClientConfig::new("https://farm.invalid", "us-west-2"),
            Box::new(move |_| Ok(client.clone())),
        );
        Arc::new(Pipeline::new(CommandRegistry::builtin().unwrap(), shared))
    }

    fn fleets_batch() -> Batch {
        split_piped(json!([
            {"FleetId": "fleet-a"},
            {"FleetId": "fleet-b"},
            {"FleetId": "fleet-c"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(args(&[
            "ListFleets",
            "--FarmId",
            "farm-1",
            "--MaxResults=10",
            "--select",
            "*",
            "--stdin",
        ]))
        .unwrap();

        assert_eq!(
            parsed,
            InvokeArgs {
                command: "ListFleets".to_string(),
                inputs: vec![
                    ("FarmId".to_string(), "farm-1".to_string()),
                    ("MaxResults".to_string(), "10".to_string()),
                ],
                select: Some("*".to_string()),
                stdin: true,
            }
        );
    }

    #[test]
    fn test_parse_args_accepts_dash_values() {
        let parsed = parse_args(args(&["UpdateFleet", "--MinWorkerCount", "-1", "-s", "^FleetId"]))
            .unwrap();
        assert_eq!(parsed.inputs, vec![("MinWorkerCount".to_string(), "-1".to_string())]);
        assert_eq!(parsed.select.as_deref(), Some("^FleetId"));
    }

    #[test]
    fn test_parse_args_rejects_malformed_input() {
        assert!(parse_args(Vec::new()).is_err());
        assert!(parse_args(args(&["GetFleet", "fleet-1"])).is_err());
        assert!(parse_args(args(&["GetFleet", "--FleetId"])).is_err());
        assert!(parse_args(args(&["GetFleet", "--FleetId", "--FarmId", "f"])).is_err());
        assert!(parse_args(args(&["GetFleet", "--=x"])).is_err());
    }

    #[test]
    fn test_split_piped() {
        let single = split_piped(json!({"FarmId": "farm-1"})).unwrap();
        assert!(!single.many);
        assert_eq!(single.items.len(), 1);

        let many = split_piped(json!([{"FarmId": "a"}, {"FarmId": "b"}])).unwrap();
        assert!(many.many);
        assert_eq!(many.items.len(), 2);

        assert!(split_piped(json!([{"FarmId": "a"}, 3])).is_err());
        assert!(split_piped(json!("farm-1")).is_err());
    }

    #[test]
    fn test_command_line_wins_over_piped() {
        let registry = CommandRegistry::builtin().unwrap();
        let definition = registry.get("UpdateFleet").unwrap();
        let piped = json!({
            "FarmId": "farm-1",
            "FleetId": "fleet-1",
            "MaxWorkerCount": 5,
            "Status": "ACTIVE"
        });

        let inputs = merge_inputs(
            definition,
            &[("maxworkercount".to_string(), "20".to_string())],
            piped.as_object().cloned().unwrap(),
        );

        assert_eq!(
            inputs,
            vec![
                ("FarmId".to_string(), RawValue::Json(json!("farm-1"))),
                ("FleetId".to_string(), RawValue::Json(json!("fleet-1"))),
                ("maxworkercount".to_string(), RawValue::Text("20".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn test_piped_array_runs_each_item() {
        let registry = CommandRegistry::builtin().unwrap();
        let definition = registry.get("GetFleet").unwrap();
        let invoke_args = parse_args(args(&["GetFleet", "--FarmId", "farm-1", "--select", "*"]))
            .unwrap();

        let reports = run_batch(
            test_pipeline(Reply::Echo),
            definition,
            &invoke_args,
            fleets_batch(),
            CancelSignal::new(),
        )
        .await;

        let values: Vec<Value> = reports.into_iter().map(|r| r.result.unwrap()).collect();
        assert_eq!(
            values,
            vec![
                json!({"FarmId": "farm-1", "FleetId": "fleet-a"}),
                json!({"FarmId": "farm-1", "FleetId": "fleet-b"}),
                json!({"FarmId": "farm-1", "FleetId": "fleet-c"}),
            ]
        );
    }

    #[tokio::test]
    async fn test_warnings_kept_when_call_fails() {
        let registry = CommandRegistry::builtin().unwrap();
        let definition = registry.get("CreateFleet").unwrap();
        let invoke_args = parse_args(args(&[
            "CreateFleet",
            "--FarmId",
            "farm-1",
            "--DisplayName",
            "Render nodes",
        ]))
        .unwrap();
        let batch = Batch {
            items: vec![Map::new()],
            many: false,
        };

        let reports = run_batch(
            test_pipeline(Reply::Reject),
            definition,
            &invoke_args,
            batch,
            CancelSignal::new(),
        )
        .await;

        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].warnings,
            vec![
                BindingWarning::MissingRequired { param: "RoleArn" },
                BindingWarning::MissingRequired {
                    param: "MaxWorkerCount"
                },
                BindingWarning::MissingRequired {
                    param: "Configuration"
                },
            ]
        );
        let err = reports[0].result.as_ref().unwrap_err();
        assert!(err.to_string().contains("CreateFleet failed"));
    }

    #[tokio::test]
    async fn test_panicked_item_counts_as_failure_in_place() {
        let registry = CommandRegistry::builtin().unwrap();
        let definition = registry.get("GetFleet").unwrap();
        let invoke_args = parse_args(args(&["GetFleet", "--FarmId", "farm-1", "--select", "^FleetId"]))
            .unwrap();

        let reports = run_batch(
            test_pipeline(Reply::PanicOn("fleet-b")),
            definition,
            &invoke_args,
            fleets_batch(),
            CancelSignal::new(),
        )
        .await;

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].result.as_ref().unwrap(), &json!("fleet-a"));
        assert!(reports[1].result.is_err());
        assert_eq!(reports[2].result.as_ref().unwrap(), &json!("fleet-c"));

        let err = print_results(reports, true).unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 invocations failed");
    }

    #[test]
    fn test_single_failure_is_returned() {
        let reports = vec![ItemReport::failed(anyhow!("unknown command 'Nope'"))];
        assert!(print_results(reports, false).is_err());
    }
}
