//! Self-contained formatting job that can flow through a graph.

use serde_json::Value;

use super::FormatDict;

/// Template plus optional dict. The template is a raw value so that non-string
/// inputs coming from other nodes are reported instead of silently stringified.
#[derive(Debug, Clone)]
pub struct FormatRequest {
  pub template: Value,
  pub dict: Option<FormatDict>,
}

impl FormatRequest {
  pub fn new(template: impl Into<String>, dict: Option<FormatDict>) -> Self {
    Self {
      template: Value::String(template.into()),
      dict,
    }
  }
}
