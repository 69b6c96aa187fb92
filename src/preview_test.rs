//! Tests for `preview`.

use serde_json::json;

use crate::preview::{preview_entry, preview_message, to_plain_recursive};
use crate::types::FormatDict;

#[test]
fn preview_message_joins_entries_with_blank_line() {
  let dict = FormatDict::try_from(json!({"greeting": "Hello\nthere", "n": 3})).unwrap();
  assert_eq!(
    preview_message(Some(&dict)),
    "greeting:\nHello\nthere\n\nn:\n3"
  );
}

#[test]
fn preview_message_of_nothing_is_empty() {
  assert_eq!(preview_message(None), "");
  assert_eq!(preview_message(Some(&FormatDict::new())), "");
}

#[test]
fn preview_entry_pretty_prints_non_strings() {
  assert_eq!(
    preview_entry("cfg", &json!({"b": [1, 2], "a": null})),
    "cfg:\n{'a': None, 'b': [1, 2]}"
  );
  assert_eq!(preview_entry("flag", &json!(false)), "flag:\nFalse");
}

#[test]
fn to_plain_recursive_copies_nested_dicts() {
  let value = json!({"outer": {"inner": {"x": 1}}, "list": [{"y": 2}]});
  let map = value.as_object().unwrap();
  let plain = to_plain_recursive(map);
  assert_eq!(serde_json::Value::Object(plain), value);
}
