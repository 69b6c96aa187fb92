//! Validate the keys of an incoming mapping and turn it into a format-dict.

use crate::error::FormatError;
use crate::keys;
use crate::types::FormatDict;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::any::Any;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use streamweave::node::{InputStreams, Node, NodeExecutionError, OutputStreams};
use tokio_stream::wrappers::ReceiverStream;
use tracing::instrument;

/// Accepts a [FormatDict] (re-validated), a JSON object `Value`, or a JSON `Map`.
#[instrument(level = "trace", skip(item))]
pub(crate) fn validate_item(item: Arc<dyn Any + Send + Sync>) -> Result<FormatDict, String> {
  if let Some(dict) = item.downcast_ref::<FormatDict>() {
    keys::validate_keys(dict.keys()).map_err(|e| e.to_string())?;
    return Ok(dict.clone());
  }
  if let Some(value) = item.downcast_ref::<Value>() {
    return keys::validate_mapping(value).map_err(|e| e.to_string());
  }
  if let Some(map) = item.downcast_ref::<Map<String, Value>>() {
    return FormatDict::try_from_map(map.clone()).map_err(|e| e.to_string());
  }
  Err(FormatError::NotAMapping("item is neither a FormatDict nor JSON".to_string()).to_string())
}

/// StreamWeave node that checks every key of a mapping (letters, digits and
/// underscore, not starting with a digit). All bad keys of one item are
/// reported together on `error`.
pub struct ValidateKeysNode {
  /// Node display name.
  name: String,
  /// Input port names (e.g. `in`).
  input_ports: Vec<String>,
  /// Output port names (e.g. `out`, `error`).
  output_ports: Vec<String>,
}

impl ValidateKeysNode {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      input_ports: vec!["in".to_string()],
      output_ports: vec!["out".to_string(), "error".to_string()],
    }
  }
}

#[async_trait]
impl Node for ValidateKeysNode {
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
    Box::pin(async move {
      let in_stream = inputs.remove("in").ok_or("Missing 'in' input")?;
      let (out_tx, out_rx) = tokio::sync::mpsc::channel(16);
      let (err_tx, err_rx) = tokio::sync::mpsc::channel(16);

      tokio::spawn(async move {
        use futures::StreamExt;
        let mut s = in_stream;
        while let Some(item) = s.next().await {
          match validate_item(item) {
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
