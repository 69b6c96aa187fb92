//! Status-display side channel.
//!
//! Nodes may mirror their result into a sink (the host's live preview, a log, a
//! test recorder). Sinks are fire-and-forget: nothing they do feeds back.

use tracing::info;

/// Receives status text for a node.
pub trait DisplaySink: Send + Sync {
  fn display(&self, text: &str, node_id: &str);
}

impl<F> DisplaySink for F
where
  F: Fn(&str, &str) + Send + Sync,
{
  fn display(&self, text: &str, node_id: &str) {
    self(text, node_id)
  }
}

/// Writes status text to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DisplaySink for TracingSink {
  fn display(&self, text: &str, node_id: &str) {
    info!(node = %node_id, status = %text, "node status");
  }
}
