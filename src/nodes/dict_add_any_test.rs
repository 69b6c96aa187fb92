//! Tests for `dict_add_any`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{FormatDict, FormatValue};
use futures::StreamExt;
use serde_json::json;
use streamweave::node::Node;
use tokio_stream::wrappers::ReceiverStream;

use super::dict_add_any::{DictAddAnyNode, process_add_any_item};

#[test]
fn node_trait_methods() {
  let mut node = DictAddAnyNode::new("any", "k", None);
  assert_eq!(node.name(), "any");
  node.set_name("updated");
  assert_eq!(node.name(), "updated");
  assert_eq!(node.input_port_names(), &["in"]);
  assert_eq!(node.output_port_names(), &["out", "error"]);
  assert!(node.has_input_port("in"));
  assert!(!node.has_input_port("out"));
  assert!(node.has_output_port("out"));
}

#[test]
fn process_item_adds_structured_value() {
  let item = Arc::new(FormatDict::new()) as Arc<dyn std::any::Any + Send + Sync>;
  let value = json!({"x": [1, 2]});
  let dict = process_add_any_item(item, "data", Some(&value)).unwrap();
  assert_eq!(dict.get("data"), Some(&value));
}

#[test]
fn process_item_without_value_passes_dict_through() {
  let base = FormatDict::try_from_iter([("a", FormatValue::from(1))]).unwrap();
  let item = Arc::new(base.clone()) as Arc<dyn std::any::Any + Send + Sync>;
  let dict = process_add_any_item(item, "not a key", None).unwrap();
  assert_eq!(dict, base);
}

#[test]
fn process_item_rejects_invalid_key() {
  let item = Arc::new(FormatDict::new()) as Arc<dyn std::any::Any + Send + Sync>;
  let err = process_add_any_item(item, "9lives", Some(&json!(9))).unwrap_err();
  assert!(err.contains("starts with a digit"), "{err}");
}

#[tokio::test]
async fn node_execute_reports_wrong_type() {
  let node = DictAddAnyNode::new("any", "k", Some(json!(true)));
  let (tx, rx) = tokio::sync::mpsc::channel(4);
  tx.send(Arc::new(7_i64) as Arc<dyn std::any::Any + Send + Sync>)
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
  let mut error = outputs.remove("error").unwrap();
  let msg = error.next().await.unwrap().downcast::<String>().unwrap();
  assert_eq!(msg.as_str(), "Expected FormatDict");
}
