//! Supplied parameter values
//!
//! Presence is tracked explicitly so that "not supplied" and "supplied as
//! null" stay distinguishable all the way into request construction.

use serde_json::Value;

/// What a caller supplied for one parameter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Supplied {
    /// The caller never mentioned the parameter
    #[default]
    Absent,
    /// The caller bound the parameter to null
    Null,
    /// The caller bound the parameter to a value
    Value(Value),
}

impl Supplied {
    /// Wrap a JSON value, mapping JSON null to [`Supplied::Null`]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Supplied::Null,
            other => Supplied::Value(other),
        }
    }

    /// Whether the caller mentioned the parameter at all
    pub fn is_supplied(&self) -> bool {
        !matches!(self, Supplied::Absent)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Supplied::Value(value) => Some(value),
            _ => None,
        }
    }

    /// JSON view of the value; absent and null both become JSON null
    pub fn to_json(&self) -> Value {
        match self {
            Supplied::Value(value) => value.clone(),
            Supplied::Absent | Supplied::Null => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_maps_null() {
        assert_eq!(Supplied::from_json(Value::Null), Supplied::Null);
        assert_eq!(
            Supplied::from_json(json!("farm-1")),
            Supplied::Value(json!("farm-1"))
        );
    }

    #[test]
    fn test_presence() {
        assert!(!Supplied::Absent.is_supplied());
        assert!(Supplied::Null.is_supplied());
        assert!(Supplied::Value(json!(0)).is_supplied());
        assert!(Supplied::Null.as_value().is_none());
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Supplied::Absent.to_json(), Value::Null);
        assert_eq!(Supplied::Value(json!([1, 2])).to_json(), json!([1, 2]));
    }
}
