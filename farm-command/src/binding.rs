//! Parameter binding
//!
//! Turns raw caller input into an [`InvocationContext`]. Keys may use the
//! primary parameter name or any alias (ASCII case ignored); values are
//! coerced to the declared [`ParamKind`]. Binding never performs I/O.
//!
//! Tie-break: when the same parameter arrives under several keys, the primary
//! name wins, then the earliest declared alias. Repeated list parameters
//! accumulate; repeated scalars keep the last value.

use std::collections::BTreeMap;

use farm_core::{CommandDefinition, KeyMatch, ParamDescriptor, ParamKind, Supplied};
use serde_json::{Number, Value};
use tracing::warn;

use crate::context::InvocationContext;
use crate::error::{BindingError, BindingWarning};
use crate::projection::Projection;

/// One raw value as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Text typed on the command line
    Text(String),
    /// A value taken from a prior stage's JSON output
    Json(Value),
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        RawValue::Json(value)
    }
}

impl RawValue {
    fn display(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            RawValue::Json(value) => value.to_string(),
        }
    }
}

/// Binding policy
#[derive(Debug, Clone, Copy, Default)]
pub struct BindOptions {
    /// Upgrade every binding warning to an error
    pub strict: bool,
}

/// Result of a successful bind
#[derive(Debug, Clone)]
pub struct Bound<'d> {
    pub context: InvocationContext<'d>,
    pub warnings: Vec<BindingWarning>,
}

/// A value seen for a parameter, before tie-breaking
struct Candidate {
    source: KeyMatch,
    key: String,
    value: Supplied,
}

/// Bind raw caller input against a command definition
///
/// # Errors
/// Returns an error if a key names no parameter, a value cannot be coerced,
/// the selector is invalid, or strict binding sees a warning.
pub fn bind<'d>(
    definition: &'d CommandDefinition,
    inputs: Vec<(String, RawValue)>,
    selector: Option<&str>,
    options: BindOptions,
) -> Result<Bound<'d>, BindingError> {
    let projection = Projection::resolve(definition, selector)?;

    let mut candidates: BTreeMap<&'static str, Vec<Candidate>> = BTreeMap::new();
    for (key, raw) in inputs {
        let (param, source) =
            definition
                .param(&key)
                .ok_or_else(|| BindingError::UnknownParameter {
                    command: definition.name,
                    key: key.clone(),
                })?;
        let value = coerce(param, raw)?;
        candidates.entry(param.name).or_default().push(Candidate {
            source,
            key,
            value,
        });
    }

    let mut values = BTreeMap::new();
    let mut warnings = Vec::new();

    for param in definition.params {
        let Some(seen) = candidates.remove(param.name) else {
            continue;
        };
        let (value, conflict) = break_tie(param, seen);
        warnings.extend(conflict);
        values.insert(param.name, value);
    }

    for param in definition.required_params() {
        match values.get(param.name) {
            None => warnings.push(BindingWarning::MissingRequired { param: param.name }),
            Some(Supplied::Null) => warnings.push(BindingWarning::NullRequired { param: param.name }),
            Some(_) => {}
        }
    }

    if options.strict {
        if let Some(warning) = warnings.first() {
            return Err(BindingError::Strict(warning.clone()));
        }
    }

    for warning in &warnings {
        warn!(command = definition.name, "{}", warning);
    }

    Ok(Bound {
        context: InvocationContext::new(definition, values, projection),
        warnings,
    })
}

/// Pick the winning value among everything supplied for one parameter
fn break_tie(
    param: &'static ParamDescriptor,
    mut seen: Vec<Candidate>,
) -> (Supplied, Option<BindingWarning>) {
    // Stable: keeps input order within one source
    seen.sort_by_key(|candidate| candidate.source);
    let Some(best) = seen.first().map(|candidate| candidate.source) else {
        return (Supplied::Absent, None);
    };

    let (winners, losers): (Vec<_>, Vec<_>) =
        seen.into_iter().partition(|candidate| candidate.source == best);

    let (value, winner_key, mut ignored) = if param.kind.is_list() {
        let winner_key = winners.first().map(|c| c.key.clone()).unwrap_or_default();
        (merge_lists(&winners), winner_key, Vec::new())
    } else {
        let mut winners = winners;
        let Some(last) = winners.pop() else {
            return (Supplied::Absent, None);
        };
        let ignored: Vec<String> = winners
            .iter()
            .filter(|c| c.value != last.value)
            .map(|c| c.key.clone())
            .collect();
        (last.value, last.key, ignored)
    };

    ignored.extend(
        losers
            .iter()
            .filter(|c| c.value != value)
            .map(|c| c.key.clone()),
    );

    let warning = (!ignored.is_empty()).then(|| BindingWarning::ConflictingValues {
        param: param.name,
        winner: winner_key,
        ignored: ignored.join(", --"),
    });

    (value, warning)
}

fn merge_lists(candidates: &[Candidate]) -> Supplied {
    let mut items = Vec::new();
    let mut any_value = false;

    for candidate in candidates {
        if let Supplied::Value(Value::Array(list)) = &candidate.value {
            any_value = true;
            items.extend(list.iter().cloned());
        }
    }

    if any_value {
        Supplied::Value(Value::Array(items))
    } else {
        Supplied::Null
    }
}

/// Coerce a raw value to the parameter's declared kind
fn coerce(param: &'static ParamDescriptor, raw: RawValue) -> Result<Supplied, BindingError> {
    match &raw {
        RawValue::Json(Value::Null) => return Ok(Supplied::Null),
        RawValue::Text(text) if param.kind != ParamKind::String && text.trim() == "null" => {
            return Ok(Supplied::Null);
        }
        _ => {}
    }

    let invalid = |raw: &RawValue| BindingError::InvalidValue {
        param: param.name,
        expected: param.kind.to_string(),
        value: raw.display(),
    };

    let value = match param.kind {
        ParamKind::String => match &raw {
            RawValue::Text(text) => Value::String(text.clone()),
            RawValue::Json(Value::String(s)) => Value::String(s.clone()),
            RawValue::Json(v @ (Value::Number(_) | Value::Bool(_))) => Value::String(v.to_string()),
            RawValue::Json(_) => return Err(invalid(&raw)),
        },
        ParamKind::Int => {
            let number = match &raw {
                RawValue::Text(text) | RawValue::Json(Value::String(text)) => {
                    text.trim().parse::<i64>().ok()
                }
                RawValue::Json(Value::Number(n)) => n.as_i64(),
                RawValue::Json(_) => None,
            };
            Value::Number(Number::from(number.ok_or_else(|| invalid(&raw))?))
        }
        ParamKind::Enum(variants) => {
            let text = match &raw {
                RawValue::Text(text) | RawValue::Json(Value::String(text)) => text.trim(),
                RawValue::Json(_) => return Err(invalid(&raw)),
            };
            let canonical = variants
                .iter()
                .find(|variant| variant.eq_ignore_ascii_case(text))
                .ok_or_else(|| invalid(&raw))?;
            Value::String((*canonical).to_string())
        }
        ParamKind::StringList => match &raw {
            RawValue::Text(text) if text.trim_start().starts_with('[') => {
                string_list(serde_json::from_str(text).map_err(|_| invalid(&raw))?)
                    .ok_or_else(|| invalid(&raw))?
            }
            RawValue::Text(text) => Value::Array(
                text.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| Value::String(item.to_string()))
                    .collect(),
            ),
            RawValue::Json(value) => string_list(value.clone()).ok_or_else(|| invalid(&raw))?,
        },
        ParamKind::Object => {
            let value = match &raw {
                RawValue::Text(text) => serde_json::from_str(text).map_err(|_| invalid(&raw))?,
                RawValue::Json(value) => value.clone(),
            };
            if !value.is_object() {
                return Err(invalid(&raw));
            }
            value
        }
        ParamKind::ObjectList => {
            let value = match &raw {
                RawValue::Text(text) => serde_json::from_str(text).map_err(|_| invalid(&raw))?,
                RawValue::Json(value) => value.clone(),
            };
            match value {
                Value::Object(_) => Value::Array(vec![value]),
                Value::Array(items) if items.iter().all(Value::is_object) => Value::Array(items),
                _ => return Err(invalid(&raw)),
            }
        }
    };

    Ok(Supplied::Value(value))
}

fn string_list(value: Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::Array(vec![Value::String(s)])),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Some(Value::String(s)),
                Value::Number(n) => Some(Value::String(n.to_string())),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        _ => None,
    }
}
