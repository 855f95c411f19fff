//! Request construction
//!
//! A request carries a field if and only if the caller supplied it. Absent
//! optionals never appear, so server-side defaults are not overwritten with
//! empty values.

use farm_core::{ParamKind, Supplied};
use serde_json::{Map, Value};

use crate::context::InvocationContext;

/// Build the request object for one invocation
///
/// Fields are keyed by primary parameter name. An explicit null is forwarded
/// only for parameters that track presence; otherwise it counts as absent.
pub fn build_request(context: &InvocationContext<'_>) -> Map<String, Value> {
    let mut request = Map::new();

    for param in context.definition().params {
        match context.get(param.name) {
            Supplied::Absent => {}
            Supplied::Null => {
                if param.track_presence {
                    request.insert(param.name.to_string(), Value::Null);
                }
            }
            Supplied::Value(value) => {
                request.insert(param.name.to_string(), copy_value(param.kind, value));
            }
        }
    }

    request
}

fn copy_value(kind: ParamKind, value: &Value) -> Value {
    match (kind, value) {
        // Fresh sequence, never shared with the caller's input
        (ParamKind::StringList | ParamKind::ObjectList, Value::Array(items)) => {
            Value::Array(items.iter().cloned().collect())
        }
        (ParamKind::Int, Value::Number(n)) => n.as_i64().map(Value::from).unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}
