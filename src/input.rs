//! Parsing of the user-supplied dependency map

use serde_json::{Map, Value};

use crate::error::InputError;
use crate::types::PackageRequest;

/// Dependency tables read when the input is a whole package.json
const DEPENDENCY_FIELDS: [&str; 3] = ["dependencies", "devDependencies", "peerDependencies"];

/// Parse a JSON object mapping package names to versions, preserving key order
///
/// A whole package.json is also accepted: when any of the dependency fields is
/// present, those tables are merged in field order and the rest is ignored.
pub fn parse_packages(content: &str) -> Result<Vec<PackageRequest>, InputError> {
    let Value::Object(root) = serde_json::from_str::<Value>(content)? else {
        return Err(InputError::NotAnObject);
    };

    if DEPENDENCY_FIELDS.iter().any(|f| root.contains_key(*f)) {
        let mut merged = Map::new();
        for field in DEPENDENCY_FIELDS {
            match root.get(field) {
                Some(Value::Object(table)) => {
                    for (name, version) in table {
                        merged.entry(name.clone()).or_insert_with(|| version.clone());
                    }
                }
                Some(_) => return Err(InputError::NotAnObject),
                None => {}
            }
        }
        return to_requests(merged);
    }

    to_requests(root)
}

fn to_requests(entries: Map<String, Value>) -> Result<Vec<PackageRequest>, InputError> {
    entries
        .into_iter()
        .map(|(name, version)| match version {
            Value::String(version) => Ok(PackageRequest::new(name, version)),
            _ => Err(InputError::NonStringVersion { name }),
        })
        .collect()
}
