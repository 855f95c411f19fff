//! Operation routing
//!
//! Maps operation names to an HTTP method and a path template. Path
//! placeholders (`{FarmId}`) are filled from the request and removed from it;
//! whatever remains travels as the query string or the JSON body.

mod fleets;
mod license_endpoints;
mod session_actions;
mod storage_profiles;

use reqwest::Url;
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

/// HTTP method used by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    /// Whether leftover request fields are sent as a JSON body rather than a query string
    pub fn sends_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

/// Where an operation lives on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub operation: &'static str,
    pub method: Method,
    pub path: &'static str,
}

const TABLES: &[&[Route]] = &[
    fleets::ROUTES,
    storage_profiles::ROUTES,
    license_endpoints::ROUTES,
    session_actions::ROUTES,
];

/// Look up the route for an operation
pub fn find_route(operation: &str) -> Option<&'static Route> {
    TABLES
        .iter()
        .flat_map(|routes| routes.iter())
        .find(|route| route.operation == operation)
}

/// All known routes
pub fn routes() -> impl Iterator<Item = &'static Route> {
    TABLES.iter().flat_map(|routes| routes.iter())
}

impl Route {
    pub const fn new(operation: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            operation,
            method,
            path,
        }
    }

    /// Names of the placeholders in the path template, in order
    pub fn path_params(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter_map(placeholder)
    }

    /// Build the request URL, moving path parameters out of `request`
    pub fn expand(&self, base: &Url, request: &mut Map<String, Value>) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::InvalidRequest(format!("{} cannot be used as a base URL", base))
            })?;
            segments.pop_if_empty();

            for segment in self.path.split('/').filter(|s| !s.is_empty()) {
                match placeholder(segment) {
                    Some(name) => {
                        let value = request.remove(name).ok_or_else(|| {
                            ClientError::InvalidRequest(format!(
                                "{} requires path parameter {}",
                                self.operation, name
                            ))
                        })?;
                        segments.push(&self.path_value(name, value)?);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        Ok(url)
    }

    fn path_value(&self, name: &str, value: Value) -> Result<String> {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(ClientError::InvalidRequest(format!(
                    "path parameter {} of {} must be a string, got {}",
                    name, self.operation, other
                )));
            }
        };

        if text.is_empty() {
            return Err(ClientError::InvalidRequest(format!(
                "path parameter {} of {} must not be empty",
                name, self.operation
            )));
        }

        Ok(text)
    }
}

/// Flatten leftover request fields into query pairs
///
/// Lists become repeated keys, objects are sent as JSON text and nulls are
/// dropped since a query string cannot carry them.
pub(crate) fn query_pairs(request: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for (key, value) in request {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), query_text(item)));
                }
            }
            other => pairs.push((key.clone(), query_text(other))),
        }
    }

    pairs
}

fn query_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_find_route() {
        let route = find_route("GetStorageProfile").unwrap();
        assert_eq!(route.method, Method::Get);
        assert_eq!(
            route.path_params().collect::<Vec<_>>(),
            vec!["FarmId", "StorageProfileId"]
        );
        assert!(find_route("getstorageprofile").is_none());
        assert!(find_route("LaunchRockets").is_none());
    }

    #[test]
    fn test_operation_names_are_unique() {
        let mut names: Vec<_> = routes().map(|r| r.operation).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_expand_moves_path_params_out_of_request() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let mut req = request(json!({"FarmId": "farm-1", "FleetId": "fleet-2", "DisplayName": "x"}));

        let url = find_route("UpdateFleet").unwrap().expand(&base, &mut req).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/2023-10-12/farms/farm-1/fleets/fleet-2"
        );
        assert_eq!(req, request(json!({"DisplayName": "x"})));
    }

    #[test]
    fn test_expand_keeps_base_path_and_encodes_values() {
        let base = Url::parse("https://farm.example.com/api/").unwrap();
        let mut req = request(json!({"LicenseEndpointId": "le 1/2"}));

        let url = find_route("GetLicenseEndpoint")
            .unwrap()
            .expand(&base, &mut req)
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://farm.example.com/api/2023-10-12/license-endpoints/le%201%2F2"
        );
    }

    #[test]
    fn test_expand_rejects_missing_or_empty_path_param() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let route = find_route("ListFleets").unwrap();

        let err = route.expand(&base, &mut Map::new()).unwrap_err();
        assert!(err.to_string().contains("FarmId"));

        let mut req = request(json!({"FarmId": ""}));
        assert!(route.expand(&base, &mut req).is_err());

        let mut req = request(json!({"FarmId": null}));
        assert!(route.expand(&base, &mut req).is_err());
    }

    #[test]
    fn test_query_pairs() {
        let req = request(json!({
            "MaxResults": 5,
            "NextToken": null,
            "SubnetIds": ["a", "b"],
            "Status": "ACTIVE"
        }));

        let pairs = query_pairs(&req);

        assert_eq!(
            pairs,
            vec![
                ("MaxResults".to_string(), "5".to_string()),
                ("Status".to_string(), "ACTIVE".to_string()),
                ("SubnetIds".to_string(), "a".to_string()),
                ("SubnetIds".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_body_methods() {
        assert!(Method::Post.sends_body());
        assert!(Method::Patch.sends_body());
        assert!(!Method::Get.sends_body());
        assert!(!Method::Delete.sends_body());
    }
}
