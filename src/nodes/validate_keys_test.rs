//! Tests for `validate_keys`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::FormatDict;
use futures::StreamExt;
use serde_json::{Map, Value, json};
use streamweave::node::Node;
use tokio_stream::wrappers::ReceiverStream;

use super::validate_keys::{ValidateKeysNode, validate_item};

#[test]
fn node_trait_methods() {
  let mut node = ValidateKeysNode::new("validate");
  assert_eq!(node.name(), "validate");
  node.set_name("updated");
  assert_eq!(node.name(), "updated");
  assert_eq!(node.input_port_names(), &["in"]);
  assert_eq!(node.output_port_names(), &["out", "error"]);
  assert!(node.has_output_port("error"));
  assert!(!node.has_input_port("error"));
}

#[test]
fn validate_item_accepts_json_object() {
  let item = Arc::new(json!({"abc": 1, "_x": 2, "x1": 3})) as Arc<dyn std::any::Any + Send + Sync>;
  let dict = validate_item(item).unwrap();
  assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["abc", "_x", "x1"]);
}

#[test]
fn validate_item_accepts_map_and_dict() {
  let mut map = Map::new();
  map.insert("k".to_string(), Value::from("v"));
  let dict = validate_item(Arc::new(map) as Arc<dyn std::any::Any + Send + Sync>).unwrap();
  assert_eq!(dict.len(), 1);
  let again = validate_item(Arc::new(dict.clone()) as Arc<dyn std::any::Any + Send + Sync>).unwrap();
  assert_eq!(again, dict);
}

#[test]
fn validate_item_lists_every_bad_key() {
  let item = Arc::new(json!({"1abc": 1, "a b": 2, "": 3, "ok": 4}))
    as Arc<dyn std::any::Any + Send + Sync>;
  let err = validate_item(item).unwrap_err();
  assert!(err.contains("(3)"), "{err}");
  assert!(err.contains("\"1abc\""), "{err}");
  assert!(err.contains("\"a b\""), "{err}");
  assert!(err.contains("key is empty"), "{err}");
  assert!(!err.contains("\"ok\""), "{err}");
}

#[test]
fn validate_item_rejects_non_mappings() {
  let list = Arc::new(json!([1, 2])) as Arc<dyn std::any::Any + Send + Sync>;
  assert!(validate_item(list).unwrap_err().contains("Not a mapping"));
  let other = Arc::new(3_u8) as Arc<dyn std::any::Any + Send + Sync>;
  assert!(validate_item(other).unwrap_err().contains("Not a mapping"));
}

#[tokio::test]
async fn node_execute_routes_valid_and_invalid() {
  let node = ValidateKeysNode::new("validate");
  let (tx, rx) = tokio::sync::mpsc::channel(4);
  tx.send(Arc::new(json!({"good": 1})) as Arc<dyn std::any::Any + Send + Sync>)
    .await
    .unwrap();
  tx.send(Arc::new(json!({"bad-key": 1})) as Arc<dyn std::any::Any + Send + Sync>)
    .await
    .unwrap();
  drop(tx);
  let mut inputs: streamweave::node::InputStreams = HashMap::new();
  inputs.insert(
    "in".to_string(),
    Box::pin(ReceiverStream::new(rx))
      as std::pin::Pin<
        Box<dyn futures::Stream<Item = Arc<dyn std::any::Any + Send + Sync>> + Send>,
      >,
  );
  let mut outputs = node.execute(inputs).await.unwrap();
  let mut out = outputs.remove("out").unwrap();
  let mut error = outputs.remove("error").unwrap();
  let dict = out.next().await.unwrap().downcast::<FormatDict>().unwrap();
  assert!(dict.contains_key("good"));
  let msg = error.next().await.unwrap().downcast::<String>().unwrap();
  assert!(msg.contains("bad-key"), "{msg}");
}
