//! Tests for `dict_add_string`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{FormatDict, FormatValue};
use futures::StreamExt;
use streamweave::node::Node;
use tokio_stream::wrappers::ReceiverStream;

use super::dict_add_string::{DictAddStringNode, process_add_string_item};

fn base() -> FormatDict {
  FormatDict::try_from_iter([("a", FormatValue::from("1"))]).unwrap()
}

#[test]
fn node_trait_methods() {
  let mut node = DictAddStringNode::new("add", "k", "v", false);
  assert_eq!(node.name(), "add");
  node.set_name("updated");
  assert_eq!(node.name(), "updated");
  assert_eq!(node.input_port_names(), &["in"]);
  assert_eq!(node.output_port_names(), &["out", "error"]);
  assert!(node.has_input_port("in"));
  assert!(node.has_output_port("error"));
  assert!(!node.has_output_port("x"));
}

#[test]
fn process_item_adds_entry_with_cleanup() {
  let item = Arc::new(base()) as Arc<dyn std::any::Any + Send + Sync>;
  let dict = process_add_string_item(item, " text ", "  one\n  two  ", true).unwrap();
  assert_eq!(dict.get("text"), Some(&FormatValue::from("one\ntwo")));
  assert_eq!(dict.get("a"), Some(&FormatValue::from("1")));
}

#[test]
fn process_item_overwrites_in_place() {
  let item = Arc::new(base()) as Arc<dyn std::any::Any + Send + Sync>;
  let dict = process_add_string_item(item, "a", "  x", false).unwrap();
  assert_eq!(dict.len(), 1);
  assert_eq!(dict.get("a"), Some(&FormatValue::from("  x")));
}

#[test]
fn process_item_rejects_invalid_key() {
  let item = Arc::new(base()) as Arc<dyn std::any::Any + Send + Sync>;
  let err = process_add_string_item(item, "a-b", "x", false).unwrap_err();
  assert!(err.contains("a-b"), "{err}");
}

#[test]
fn process_item_rejects_wrong_type() {
  let item = Arc::new("not a dict".to_string()) as Arc<dyn std::any::Any + Send + Sync>;
  assert_eq!(
    process_add_string_item(item, "a", "x", false).unwrap_err(),
    "Expected FormatDict"
  );
}

#[tokio::test]
async fn node_execute_adds_string() {
  let node = DictAddStringNode::new("add", "name", "World", false);
  let (tx, rx) = tokio::sync::mpsc::channel(4);
  tx.send(Arc::new(base()) as Arc<dyn std::any::Any + Send + Sync>)
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
  let dict = out.next().await.unwrap().downcast::<FormatDict>().unwrap();
  assert_eq!(dict.get("name"), Some(&FormatValue::from("World")));
}
