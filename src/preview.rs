//! Human-readable preview of a format-dict.

use serde_json::{Map, Value};

use crate::pyrepr;
use crate::types::FormatDict;

/// Owned copy of a dict. Nested dicts are copied one level at a time; dicts
/// buried inside lists are left as they are.
pub fn to_plain_recursive(map: &Map<String, Value>) -> Map<String, Value> {
  map
    .iter()
    .map(|(k, v)| {
      let v = match v {
        Value::Object(inner) => Value::Object(to_plain_recursive(inner)),
        other => other.clone(),
      };
      (k.clone(), v)
    })
    .collect()
}

/// One `key:\nvalue` block. Non-string values are pretty-printed.
pub fn preview_entry(key: &str, value: &Value) -> String {
  match value {
    Value::String(s) => format!("{key}:\n{s}"),
    other => format!("{key}:\n{}", pyrepr::pformat(other)),
  }
}

/// All entries of the dict, separated by blank lines. Empty for a missing dict.
pub fn preview_message(dict: Option<&FormatDict>) -> String {
  let Some(dict) = dict else {
    return String::new();
  };
  to_plain_recursive(dict.as_map())
    .iter()
    .map(|(k, v)| preview_entry(k, v))
    .collect::<Vec<_>>()
    .join("\n\n")
}
