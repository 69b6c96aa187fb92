//! # streamweave-string-constructor
//!
//! String templating as a graph of StreamWeave nodes: build a format-dict from
//! text, JSON or single entries, then substitute `{key}` placeholders in a template.
//!
//! ## Architecture
//!
//! The formatting logic lives in plain functions ([formatter], [dict_ops],
//! [keys], [preview]); the `nodes` module wraps them as StreamWeave nodes and
//! [graphs] wires the common pipelines. Formatting can be single-pass or
//! recursive (repeat until a fixed point), and safe (unknown placeholders stay
//! in the text) or strict (they fail the call).

pub mod dict_ops;
pub mod display;
pub mod docstring;
#[cfg(test)]
mod docstring_test;
pub mod error;
pub mod format_spec;
pub mod formatter;
pub mod graphs;
pub mod keys;
pub mod nodes;
pub mod preview;
#[cfg(test)]
mod preview_test;
pub mod pyrepr;
pub mod registry;
#[cfg(test)]
mod registry_test;
pub mod runner;
pub mod template_parser;
pub mod text_chunks;
pub mod types;

pub use display::{DisplaySink, TracingSink};
pub use error::{FormatError, InvalidKey, KeyIssue};
pub use formatter::{format_template, format_value};
pub use graphs::{format_pipeline, text_format_pipeline};
pub use runner::{run_format_graph, run_text_graph};
pub use types::{FormatDict, FormatPolicy, FormatRequest, FormatValue};
