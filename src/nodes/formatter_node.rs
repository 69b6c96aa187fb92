//! Format a template with the entries of each incoming format-dict.

use crate::display::DisplaySink;
use crate::formatter::{format_and_display, format_value};
use crate::types::{FormatDict, FormatPolicy, FormatRequest};
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use streamweave::node::{InputStreams, Node, NodeExecutionError, OutputStreams};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{instrument, warn};

/// Formats one input item.
///
/// A [FormatDict] is applied to the node's own template; a [FormatRequest]
/// brings its template along. The formatting result or error is mirrored into
/// `sink`; items of any other type are rejected without touching it.
#[instrument(level = "trace", skip(item, sink))]
pub(crate) fn process_format_item(
  item: Arc<dyn Any + Send + Sync>,
  template: &str,
  policy: &FormatPolicy,
  sink: Option<&dyn DisplaySink>,
  node_id: &str,
) -> Result<String, String> {
  if let Some(dict) = item.downcast_ref::<FormatDict>() {
    return format_and_display(template, dict, policy, sink, node_id).map_err(|e| e.to_string());
  }
  let result = match item.downcast_ref::<FormatRequest>() {
    Some(request) => format_value(&request.template, request.dict.as_ref(), policy),
    None => return Err("Expected FormatDict or FormatRequest".to_string()),
  };
  if let Some(sink) = sink {
    match &result {
      Ok(text) => sink.display(text, node_id),
      Err(e) => sink.display(&e.to_string(), node_id),
    }
  }
  result.map_err(|e| e.to_string())
}

/// StreamWeave node running the template formatter.
///
/// Out: the formatted `String`. Error: the formatting error message.
pub struct FormatterNode {
  /// Node display name.
  name: String,
  /// Input port names (e.g. `in`).
  input_ports: Vec<String>,
  /// Output port names (e.g. `out`, `error`).
  output_ports: Vec<String>,
  template: String,
  policy: FormatPolicy,
  display: Option<Arc<dyn DisplaySink>>,
}

impl FormatterNode {
  pub fn new(name: impl Into<String>, template: impl Into<String>, policy: FormatPolicy) -> Self {
    Self {
      name: name.into(),
      input_ports: vec!["in".to_string()],
      output_ports: vec!["out".to_string(), "error".to_string()],
      template: template.into(),
      policy,
      display: None,
    }
  }

  /// Mirrors every result (text or error message) into `sink`.
  pub fn with_display(mut self, sink: Arc<dyn DisplaySink>) -> Self {
    self.display = Some(sink);
    self
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn policy(&self) -> &FormatPolicy {
    &self.policy
  }
}

#[async_trait]
impl Node for FormatterNode {
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
    let template = self.template.clone();
    let policy = self.policy;
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
          match process_format_item(item, &template, &policy, display.as_deref(), &node_id) {
            Ok(text) => {
              let _ = out_tx
                .send(Arc::new(text) as Arc<dyn Any + Send + Sync>)
                .await;
            }
            Err(e) => {
              warn!(node = %node_id, error = %e, "formatting failed");
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
