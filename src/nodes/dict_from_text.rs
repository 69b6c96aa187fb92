//! Build a format-dict from named sub-strings in plain text.

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
use tracing::instrument;

/// Input: text plus the dict to extend.
#[derive(Debug, Clone)]
pub struct DictFromTextInput {
  pub text: String,
  pub base: Option<FormatDict>,
}

/// Status line: the parsed names joined with `,`.
pub(crate) fn status_line(names: &[String]) -> String {
  names.join(",")
}

/// Parses one input item (`String` or [DictFromTextInput]).
#[instrument(level = "trace", skip(item))]
pub(crate) fn process_dict_from_text_item(
  item: Arc<dyn Any + Send + Sync>,
  cleanup: bool,
) -> Result<(FormatDict, Vec<String>), String> {
  let item = match item.downcast::<String>() {
    Ok(text) => return dict_ops::dict_from_text(&text, cleanup, None).map_err(|e| e.to_string()),
    Err(item) => item,
  };
  let input = item
    .downcast::<DictFromTextInput>()
    .map_err(|_| "Expected String or DictFromTextInput".to_string())?;
  dict_ops::dict_from_text(&input.text, cleanup, input.base.as_ref()).map_err(|e| e.to_string())
}

/// StreamWeave node that parses text into a [FormatDict].
pub struct DictFromTextNode {
  /// Node display name.
  name: String,
  /// Input port names (e.g. `in`).
  input_ports: Vec<String>,
  /// Output port names (e.g. `out`, `error`).
  output_ports: Vec<String>,
  /// Trim every value line.
  cleanup: bool,
  /// Where the status line goes, if anywhere.
  display: Option<Arc<dyn DisplaySink>>,
}

impl DictFromTextNode {
  pub fn new(name: impl Into<String>, cleanup: bool) -> Self {
    Self {
      name: name.into(),
      input_ports: vec!["in".to_string()],
      output_ports: vec!["out".to_string(), "error".to_string()],
      cleanup,
      display: None,
    }
  }

  /// Sends the parsed names to `sink` after every item.
  pub fn with_display(mut self, sink: Arc<dyn DisplaySink>) -> Self {
    self.display = Some(sink);
    self
  }
}

#[async_trait]
impl Node for DictFromTextNode {
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
    name == "out" || name == "error"
  }

  fn execute(
    &self,
    mut inputs: InputStreams,
  ) -> Pin<
    Box<dyn std::future::Future<Output = Result<OutputStreams, NodeExecutionError>> + Send + '_>,
  > {
    let cleanup = self.cleanup;
    let display = self.display.clone();
    let node_id = self.name.clone();
    Box::pin(async move {
      let in_stream = inputs.remove("in").ok_or("Missing 'in' input")?;
      let (out_tx, out_rx) = tokio::sync::mpsc::channel(16);
      let (err_tx, err_rx) = tokio::sync::mpsc::channel(16);

      tokio::spawn(async move {
        use futures::StreamExt;
        let mut s = in_stream;
        while let Some(item) = s.next().await {
          match process_dict_from_text_item(item, cleanup) {
            Ok((dict, names)) => {
              if let Some(sink) = &display {
                sink.display(&status_line(&names), &node_id);
              }
              let _ = out_tx
                .send(Arc::new(dict) as Arc<dyn Any + Send + Sync>)
                .await;
            }
            Err(e) => {
              let _ = err_tx.send(Arc::new(e) as Arc<dyn Any + Send + Sync>).await;
            }
          }
        }
      });

      let mut outputs = HashMap::new();
      outputs.insert(
        "out".to_string(),
        Box::pin(ReceiverStream::new(out_rx))
          as Pin<Box<dyn futures::Stream<Item = Arc<dyn Any + Send + Sync>> + Send>>,
      );
      outputs.insert(
        "error".to_string(),
        Box::pin(ReceiverStream::new(err_rx))
          as Pin<Box<dyn futures::Stream<Item = Arc<dyn Any + Send + Sync>> + Send>>,
      );
      Ok(outputs)
    })
  }
}
