//! Show a format-dict and pass it through.

use crate::display::DisplaySink;
use crate::preview::preview_message;
use crate::types::FormatDict;
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use streamweave::node::{InputStreams, Node, NodeExecutionError, OutputStreams};
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

/// Pass-through node for [FormatDict] items. The preview text of each dict goes to
/// the display sink; other items are forwarded untouched.
pub struct DictPreviewNode {
  /// Node display name.
  name: String,
  /// Input port names.
  input_ports: Vec<String>,
  /// Output port names.
  output_ports: Vec<String>,
  display: Option<Arc<dyn DisplaySink>>,
}

impl DictPreviewNode {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      input_ports: vec!["in".to_string()],
      output_ports: vec!["out".to_string()],
      display: None,
    }
  }

  pub fn with_display(mut self, sink: Arc<dyn DisplaySink>) -> Self {
    self.display = Some(sink);
    self
  }
}

#[async_trait]
impl Node for DictPreviewNode {
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
    let display = self.display.clone();
    let node_id = self.name.clone();
    Box::pin(async move {
      let in_stream = inputs.remove("in").ok_or("Missing 'in' input")?;
      let (out_tx, out_rx) = tokio::sync::mpsc::channel(16);

      tokio::spawn(async move {
        use futures::StreamExt;
        let mut s = in_stream;
        while let Some(item) = s.next().await {
          if let (Some(sink), Some(dict)) = (&display, item.downcast_ref::<FormatDict>()) {
            debug!(node = %node_id, entries = dict.len(), "previewing format-dict");
            sink.display(&preview_message(Some(dict)), &node_id);
          }
          let _ = out_tx.send(item).await;
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
