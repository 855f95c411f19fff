//! Output projection
//!
//! Selectors are resolved against the command definition when binding, so a
//! typo in a field name fails before anything is sent:
//! - `*` returns the whole response
//! - `Name` returns one top-level response field
//! - `^Param` echoes the caller's value for `Param` once the call succeeded

use farm_core::CommandDefinition;
use serde_json::Value;

use crate::context::InvocationContext;
use crate::error::{BindingError, ProjectionError};

/// Selector meaning "the entire response"
pub const WILDCARD: &str = "*";

/// Prefix marking a pass-through selector
pub const PASS_THROUGH_PREFIX: char = '^';

/// What part of an invocation is returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Whole,
    Field(&'static str),
    PassThrough(&'static str),
}

impl Projection {
    /// Resolve a caller selector, falling back to the command default
    pub fn resolve(
        definition: &CommandDefinition,
        selector: Option<&str>,
    ) -> Result<Self, BindingError> {
        let selector = selector
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(definition.default_select);

        if selector == WILDCARD {
            return Ok(Projection::Whole);
        }

        if let Some(name) = selector.strip_prefix(PASS_THROUGH_PREFIX) {
            return definition
                .param(name)
                .map(|(param, _)| Projection::PassThrough(param.name))
                .ok_or_else(|| BindingError::InvalidSelector {
                    command: definition.name,
                    selector: selector.to_string(),
                    reason: format!("{} is not a parameter of {}", name, definition.name),
                });
        }

        definition
            .response_field(selector)
            .map(Projection::Field)
            .ok_or_else(|| BindingError::InvalidSelector {
                command: definition.name,
                selector: selector.to_string(),
                reason: if definition.response_fields.is_empty() {
                    "the response has no fields; use '*'".to_string()
                } else {
                    format!(
                        "expected '*', '^Param' or one of: {}",
                        definition.response_fields.join(", ")
                    )
                },
            })
    }

    /// Produce the caller-visible result from a successful response
    pub fn apply(
        &self,
        context: &InvocationContext<'_>,
        response: Value,
    ) -> Result<Value, ProjectionError> {
        let operation = context.definition().name;

        match *self {
            Projection::Whole => Ok(response),
            Projection::Field(field) => match response {
                Value::Object(mut map) => map
                    .remove(field)
                    .ok_or(ProjectionError::MissingField { operation, field }),
                _ => Err(ProjectionError::NotAnObject { operation }),
            },
            Projection::PassThrough(param) => Ok(context.get(param).to_json()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{BindOptions, RawValue, bind};
    use crate::registry::CommandRegistry;
    use serde_json::json;

    fn registry() -> CommandRegistry {
        CommandRegistry::builtin().unwrap()
    }

    #[test]
    fn test_default_selector() {
        let registry = registry();
        let list = registry.get("ListFleets").unwrap();
        assert_eq!(
            Projection::resolve(list, None).unwrap(),
            Projection::Field("Fleets")
        );

        let get = registry.get("GetFleet").unwrap();
        assert_eq!(Projection::resolve(get, Some("  ")).unwrap(), Projection::Whole);
    }

    #[test]
    fn test_selector_forms() {
        let registry = registry();
        let list = registry.get("ListFleets").unwrap();

        assert_eq!(Projection::resolve(list, Some("*")).unwrap(), Projection::Whole);
        assert_eq!(
            Projection::resolve(list, Some("nexttoken")).unwrap(),
            Projection::Field("NextToken")
        );
        assert_eq!(
            Projection::resolve(list, Some("^farmid")).unwrap(),
            Projection::PassThrough("FarmId")
        );
        assert_eq!(
            Projection::resolve(list, Some("^MaxItems")).unwrap(),
            Projection::PassThrough("MaxResults")
        );
    }

    #[test]
    fn test_invalid_selectors_fail_at_bind_time() {
        let registry = registry();
        let list = registry.get("ListFleets").unwrap();

        let err = Projection::resolve(list, Some("Queues")).unwrap_err();
        assert!(matches!(err, BindingError::InvalidSelector { .. }));
        assert!(err.to_string().contains("Fleets, NextToken"));

        let err = Projection::resolve(list, Some("^QueueId")).unwrap_err();
        assert!(err.to_string().contains("QueueId is not a parameter"));
    }

    #[test]
    fn test_whole_returns_response_unchanged() {
        let registry = registry();
        let definition = registry.get("ListFleets").unwrap();
        let bound = bind(
            definition,
            vec![("FarmId".into(), RawValue::Text("farm-123".into()))],
            Some("*"),
            BindOptions::default(),
        )
        .unwrap();

        let response = json!({
            "Fleets": [{"FleetId": "fleet-1", "Status": "ACTIVE", "Extra": {"nested": true}}],
            "NextToken": null
        });

        let projected = bound
            .context
            .projection()
            .apply(&bound.context, response.clone())
            .unwrap();
        assert_eq!(projected, response);
    }

    #[test]
    fn test_pass_through_returns_supplied_value() {
        let registry = registry();
        let definition = registry.get("ListFleets").unwrap();
        let bound = bind(
            definition,
            vec![
                ("FarmId".into(), RawValue::Text("farm-123".into())),
                ("MaxResults".into(), RawValue::Text("25".into())),
            ],
            Some("^MaxResults"),
            BindOptions::default(),
        )
        .unwrap();

        let projected = bound
            .context
            .projection()
            .apply(&bound.context, json!({"Fleets": [], "NextToken": "abc"}))
            .unwrap();
        assert_eq!(projected, json!(25));
    }

    #[test]
    fn test_pass_through_of_unsupplied_param_is_null() {
        let registry = registry();
        let definition = registry.get("ListFleets").unwrap();
        let bound = bind(
            definition,
            vec![("FarmId".into(), RawValue::Text("farm-123".into()))],
            Some("^NextToken"),
            BindOptions::default(),
        )
        .unwrap();

        let projected = bound
            .context
            .projection()
            .apply(&bound.context, json!({"Fleets": []}))
            .unwrap();
        assert_eq!(projected, Value::Null);
    }

    #[test]
    fn test_missing_field_is_projection_error() {
        let registry = registry();
        let definition = registry.get("ListFleets").unwrap();
        let bound = bind(
            definition,
            vec![("FarmId".into(), RawValue::Text("farm-123".into()))],
            None,
            BindOptions::default(),
        )
        .unwrap();

        let err = bound
            .context
            .projection()
            .apply(&bound.context, json!({"NextToken": null}))
            .unwrap_err();
        assert_eq!(
            err,
            ProjectionError::MissingField {
                operation: "ListFleets",
                field: "Fleets"
            }
        );

        let err = bound
            .context
            .projection()
            .apply(&bound.context, json!([1, 2]))
            .unwrap_err();
        assert_eq!(err, ProjectionError::NotAnObject { operation: "ListFleets" });
    }
}
