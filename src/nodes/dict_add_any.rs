//! Add one entry of any type to a format-dict.

use crate::dict_ops;
use crate::types::{FormatDict, FormatValue};
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use streamweave::node::{InputStreams, Node, NodeExecutionError, OutputStreams};
use tokio_stream::wrappers::ReceiverStream;

pub(crate) fn process_add_any_item(
  item: Arc<dyn Any + Send + Sync>,
  key: &str,
  value: Option<&FormatValue>,
) -> Result<FormatDict, String> {
  let dict = item
    .downcast::<FormatDict>()
    .map_err(|_| "Expected FormatDict".to_string())?;
  dict_ops::add_any(Some(&dict), key, value.cloned()).map_err(|e| e.to_string())
}

/// StreamWeave node that adds `key` with an arbitrary value. Without a value the
/// dict passes through unchanged.
pub struct DictAddAnyNode {
  /// Node display name.
  name: String,
  /// Input port names (e.g. `in`).
  input_ports: Vec<String>,
  /// Output port names (e.g. `out`, `error`).
  output_ports: Vec<String>,
  key: String,
  value: Option<FormatValue>,
}

impl DictAddAnyNode {
  pub fn new(name: impl Into<String>, key: impl Into<String>, value: Option<FormatValue>) -> Self {
    Self {
      name: name.into(),
      input_ports: vec!["in".to_string()],
      output_ports: vec!["out".to_string(), "error".to_string()],
      key: key.into(),
      value,
    }
  }
}

#[async_trait]
impl Node for DictAddAnyNode {
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
    let key = self.key.clone();
    let value = self.value.clone();
    Box::pin(async move {
      let in_stream = inputs.remove("in").ok_or("Missing 'in' input")?;
      let (out_tx, out_rx) = tokio::sync::mpsc::channel(16);
      let (err_tx, err_rx) = tokio::sync::mpsc::channel(16);

      tokio::spawn(async move {
        use futures::StreamExt;
        let mut s = in_stream;
        while let Some(item) = s.next().await {
          match process_add_any_item(item, &key, value.as_ref()) {
            Ok(dict) => {
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
