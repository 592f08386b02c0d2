//! Document and store type definitions.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One loaded namespace: a string-keyed mapping of arbitrary nested values.
pub type Document = Map<String, Value>;

/// Every cached namespace, keyed by namespace name.
pub type Store = BTreeMap<String, Document>;

/// Turn a value into a document if it is a mapping, handing it back otherwise.
pub fn into_document(value: Value) -> std::result::Result<Document, Value> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(other),
    }
}

/// Short name for the kind of a value, used in error messages.
pub const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
