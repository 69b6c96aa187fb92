//! Tests for `dict_preview`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::display::DisplaySink;
use crate::types::{FormatDict, FormatValue};
use futures::StreamExt;
use streamweave::node::Node;
use tokio_stream::wrappers::ReceiverStream;

use super::dict_preview::DictPreviewNode;

#[test]
fn node_trait_methods() {
  let mut node = DictPreviewNode::new("preview");
  assert_eq!(node.name(), "preview");
  node.set_name("updated");
  assert_eq!(node.name(), "updated");
  assert_eq!(node.input_port_names(), &["in"]);
  assert_eq!(node.output_port_names(), &["out"]);
  assert!(node.has_input_port("in"));
  assert!(!node.has_output_port("error"));
}

#[tokio::test]
async fn node_execute_passes_through_and_previews() {
  let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
  let recorder = seen.clone();
  let sink: Arc<dyn DisplaySink> = Arc::new(move |text: &str, _node_id: &str| {
    recorder.lock().unwrap().push(text.to_string());
  });
  let node = DictPreviewNode::new("preview").with_display(sink);
  let dict = FormatDict::try_from_iter([
    ("name", FormatValue::from("World")),
    ("n", FormatValue::from(2)),
  ])
  .unwrap();

  let (tx, rx) = tokio::sync::mpsc::channel(4);
  tx.send(Arc::new(dict.clone()) as Arc<dyn std::any::Any + Send + Sync>)
    .await
    .unwrap();
  tx.send(Arc::new("other".to_string()) as Arc<dyn std::any::Any + Send + Sync>)
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
  let first = out.next().await.unwrap().downcast::<FormatDict>().unwrap();
  assert_eq!(*first, dict);
  let second = out.next().await.unwrap().downcast::<String>().unwrap();
  assert_eq!(second.as_str(), "other");
  assert!(out.next().await.is_none());

  assert_eq!(
    seen.lock().unwrap().as_slice(),
    &["name:\nWorld\n\nn:\n2".to_string()]
  );
}
