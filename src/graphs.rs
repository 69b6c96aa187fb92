//! Predefined StreamWeave graphs built with the `graph!` macro.
//!
//! Graph I/O for every pipeline: `input` → first node, formatter.out → `output`,
//! formatter.error → `error`. The text pipeline also exposes its parser's errors
//! as [PARSE_ERROR_PORT].

use crate::display::DisplaySink;
use crate::nodes::{DictFromTextNode, DictPreviewNode, FormatterNode};
use crate::types::FormatPolicy;
use std::sync::Arc;
use streamweave::graph::Graph;

/// Graph output carrying formatter errors.
pub const ERROR_PORT: &str = "error";

/// Graph output carrying dict-from-text errors in [text_format_pipeline].
///
/// A graph output maps to a single node port, so parse errors can't share
/// [ERROR_PORT]; [crate::runner::run_text_graph] reads both.
pub const PARSE_ERROR_PORT: &str = "parse_error";

fn preview_node(sink: Option<Arc<dyn DisplaySink>>) -> DictPreviewNode {
  match sink {
    Some(s) => DictPreviewNode::new("preview").with_display(s),
    None => DictPreviewNode::new("preview"),
  }
}

fn formatter_node(
  template: &str,
  policy: FormatPolicy,
  sink: Option<Arc<dyn DisplaySink>>,
) -> FormatterNode {
  let node = FormatterNode::new("format", template, policy);
  match sink {
    Some(s) => node.with_display(s),
    None => node,
  }
}

/// Format-dict in, formatted string out.
///
/// Pipeline: DictPreview → Formatter. With a sink, the preview and the result
/// are both mirrored into it.
pub fn format_pipeline(
  template: &str,
  policy: FormatPolicy,
  sink: Option<Arc<dyn DisplaySink>>,
) -> Graph {
  let preview = preview_node(sink.clone());
  let format = formatter_node(template, policy, sink);
  streamweave::graph! {
    preview: preview,
    format: format,
    graph.input => preview.in,
    preview.out => format.in,
    format.out => graph.output,
    format.error => graph.error
  }
}

/// Plain text in, formatted string out: the text is parsed into a format-dict
/// first.
///
/// Pipeline: DictFromText → DictPreview → Formatter. Parse errors (such as
/// invalid keys) go to `parse_error`, formatter errors to `error`.
pub fn text_format_pipeline(
  template: &str,
  cleanup: bool,
  policy: FormatPolicy,
  sink: Option<Arc<dyn DisplaySink>>,
) -> Graph {
  let parse = match sink.clone() {
    Some(s) => DictFromTextNode::new("parse", cleanup).with_display(s),
    None => DictFromTextNode::new("parse", cleanup),
  };
  let preview = preview_node(sink.clone());
  let format = formatter_node(template, policy, sink);
  streamweave::graph! {
    parse: parse,
    preview: preview,
    format: format,
    graph.input => parse.in,
    parse.out => preview.in,
    preview.out => format.in,
    format.out => graph.output,
    format.error => graph.error,
    parse.error => graph.parse_error
  }
}
