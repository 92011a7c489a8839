use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

/// Structured cache key of a query, e.g. `["shop", {"body": "query Shop { .. }"}]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryKey(pub Vec<Value>);

impl QueryKey {
    pub fn new(parts: Vec<Value>) -> Self {
        Self(parts)
    }
}

impl From<&str> for QueryKey {
    fn from(key: &str) -> Self {
        Self(vec![Value::String(key.to_string())])
    }
}

impl From<Vec<Value>> for QueryKey {
    fn from(parts: Vec<Value>) -> Self {
        Self(parts)
    }
}

/// Deterministic fingerprint of a key. Objects hash by their `body` field when
/// they carry one (GraphQL requests), otherwise by their JSON text, which
/// serde_json prints with sorted keys.
pub fn hash_key(key: &QueryKey) -> String {
    let mut hash = String::new();
    for part in &key.0 {
        match part {
            Value::Null => {}
            Value::String(s) => hash.push_str(s),
            Value::Object(map) => match map.get("body") {
                Some(Value::String(body)) => hash.push_str(body),
                _ => hash.push_str(&part.to_string()),
            },
            other => hash.push_str(&other.to_string()),
        }
    }
    hash
}

/// Maps a fingerprint to something a human can read.
pub trait QueryNames {
    fn find_query_name(&self, fingerprint: &str) -> String;
}

#[derive(Debug, Default)]
pub struct QueryNameRegistry {
    names: RwLock<HashMap<String, String>>,
}

impl QueryNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, key: &QueryKey, name: impl Into<String>) {
        let mut names = match self.names.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        names.insert(hash_key(key), name.into());
    }
}

impl QueryNames for QueryNameRegistry {
    fn find_query_name(&self, fingerprint: &str) -> String {
        let names = match self.names.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(name) = names.get(fingerprint) {
            return name.clone();
        }
        graphql_operation(fingerprint).unwrap_or_else(|| fingerprint.to_string())
    }
}

/// `query Foo(...) {` -> `query Foo`, same for mutations. Key prefixes are
/// glued onto the body, so no word boundary is required before the keyword.
fn graphql_operation(text: &str) -> Option<String> {
    for kind in ["query", "mutation"] {
        let mut rest = text;
        while let Some(pos) = rest.find(kind) {
            let after = &rest[pos + kind.len()..];
            let trimmed = after.trim_start();
            if trimmed.len() < after.len() {
                let name: String = trimmed
                    .chars()
                    .take_while(|c| c.is_alphanumeric() || *c == '_')
                    .collect();
                if !name.is_empty() {
                    return Some(format!("{} {}", kind, name));
                }
            }
            rest = after;
        }
    }
    None
}
