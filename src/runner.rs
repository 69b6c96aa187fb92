//! Graph runner: feed one item into a pipeline from [crate::graphs] and wait for
//! its result.

use crate::graphs::{ERROR_PORT, PARSE_ERROR_PORT};
use crate::types::FormatDict;
use std::any::Any;
use std::sync::Arc;
use streamweave::graph::Graph;
use tracing::debug;

/// Runs `graph` with `dict` as its only input item.
///
/// Returns the first string on `output`, or the first message on `error`.
pub async fn run_format_graph(graph: Graph, dict: FormatDict) -> Result<String, String> {
  run_streamweave_graph(graph, Arc::new(dict)).await
}

/// Like [run_format_graph] for pipelines that take plain text. Errors from both
/// the parser and the formatter are returned.
pub async fn run_text_graph(graph: Graph, text: impl Into<String>) -> Result<String, String> {
  run_graph_with_error_ports(graph, Arc::new(text.into()), &[ERROR_PORT, PARSE_ERROR_PORT]).await
}

/// Feeds one item into the "input" port, runs until the graph finishes, and
/// returns whichever of "output" or "error" produced an item first.
///
/// The graph must have been built with `input`, `output` and `error` port names.
pub async fn run_streamweave_graph(
  graph: Graph,
  item: Arc<dyn Any + Send + Sync>,
) -> Result<String, String> {
  run_graph_with_error_ports(graph, item, &[ERROR_PORT]).await
}

/// [run_streamweave_graph] with every port in `error_ports` feeding the same
/// error channel.
async fn run_graph_with_error_ports(
  mut graph: Graph,
  item: Arc<dyn Any + Send + Sync>,
  error_ports: &[&str],
) -> Result<String, String> {
  let (tx_in, rx_in) = tokio::sync::mpsc::channel(1);
  let (tx_out, mut rx_out) = tokio::sync::mpsc::channel::<Arc<dyn Any + Send + Sync>>(16);
  let (tx_err, mut rx_err) = tokio::sync::mpsc::channel::<Arc<dyn Any + Send + Sync>>(16);

  graph
    .connect_input_channel("input", rx_in)
    .map_err(|e| e.to_string())?;
  graph
    .connect_output_channel("output", tx_out)
    .map_err(|e| e.to_string())?;
  for port in error_ports {
    graph
      .connect_output_channel(port, tx_err.clone())
      .map_err(|e| e.to_string())?;
  }
  drop(tx_err);

  tx_in.send(item).await.map_err(|e| e.to_string())?;
  drop(tx_in);

  graph.execute().await.map_err(|e| e.to_string())?;
  let result = tokio::select! {
    Some(out) = rx_out.recv() => Ok(out),
    Some(err) = rx_err.recv() => Err(err),
    else => {
      graph.wait_for_completion().await.map_err(|e| e.to_string())?;
      return Err("Graph finished without output".to_string());
    }
  };
  graph
    .wait_for_completion()
    .await
    .map_err(|e| e.to_string())?;

  match result {
    Ok(out) => out
      .downcast::<String>()
      .map(|s| (*s).clone())
      .map_err(|_| "Graph output is not a String".to_string()),
    Err(err) => {
      let msg = err
        .downcast::<String>()
        .map(|s| (*s).clone())
        .unwrap_or_else(|_| "Graph reported a non-text error".to_string());
      debug!(error = %msg, "graph reported error");
      Err(msg)
    }
  }
}
