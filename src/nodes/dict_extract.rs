//! Read one entry of a format-dict as a string.

use crate::dict_ops;
use crate::display::DisplaySink;
use crate::types::FormatDict;
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use streamweave::node::{InputStreams, Node, NodeExecutionError, OutputStreams};
use tokio_stream::wrappers::ReceiverStream;

/// Returns the extracted string if item is a FormatDict.
pub(crate) fn process_extract_item(item: Arc<dyn Any + Send + Sync>, key: &str) -> Option<String> {
  let dict = item.downcast::<FormatDict>().ok()?;
  Some(dict_ops::extract_string(Some(&dict), key))
}

/// StreamWeave node that emits `dict[key]` as a `String` (empty when missing).
/// Items that aren't dicts are skipped.
pub struct DictExtractStringNode {
  /// Node display name.
  name: String,
  /// Input port names (e.g. `in`).
  input_ports: Vec<String>,
  /// Output port names (e.g. `out`).
  output_ports: Vec<String>,
  key: String,
  display: Option<Arc<dyn DisplaySink>>,
}

impl DictExtractStringNode {
  pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      input_ports: vec!["in".to_string()],
      output_ports: vec!["out".to_string()],
      key: key.into(),
      display: None,
    }
  }

  /// Mirrors every extracted string into `sink`.
  pub fn with_display(mut self, sink: Arc<dyn DisplaySink>) -> Self {
    self.display = Some(sink);
    self
  }
}

#[async_trait]
impl Node for DictExtractStringNode {
  fn name(&self) -> &str {
    &self.name
  }

  fn set_name(&mut self, name: &str) {
    self.name = name.to_string();
  }

  fn input_port_names(&self) -> &[String] {
    &self.input_ports
  }

  fn output_port_names(&self) -> &[String] {
    &self.output_ports
  }

  fn has_input_port(&self, name: &str) -> bool {
    name == "in"
  }

  fn has_output_port(&self, name: &str) -> bool {
    name == "out"
  }

  fn execute(
    &self,
    mut inputs: InputStreams,
  ) -> Pin<
    Box<dyn std::future::Future<Output = Result<OutputStreams, NodeExecutionError>> + Send + '_>,
  > {
    let key = self.key.clone();
    let display = self.display.clone();
    let node_id = self.name.clone();
    Box::pin(async move {
      let in_stream = inputs.remove("in").ok_or("Missing 'in' input")?;
      let (out_tx, out_rx) = tokio::sync::mpsc::channel(16);

      tokio::spawn(async move {
        use futures::StreamExt;
        let mut s = in_stream;
        while let Some(item) = s.next().await {
          let text = match process_extract_item(item, &key) {
            Some(t) => t,
            None => continue,
          };
          if let Some(sink) = &display {
            sink.display(&text, &node_id);
          }
          let _ = out_tx
            .send(Arc::new(text) as Arc<dyn Any + Send + Sync>)
            .await;
        }
      });

      let mut outputs = HashMap::new();
      outputs.insert(
        "out".to_string(),
        Box::pin(ReceiverStream::new(out_rx))
          as Pin<Box<dyn futures::Stream<Item = Arc<dyn Any + Send + Sync>> + Send>>,
      );
      Ok(outputs)
    })
  }
}
