//! CLI: format a template file with a format-dict built from JSON and/or text files.
//!
//! Usage: `format_text [OPTIONS] <template-file>`
//! Example: format_text --recursive --dict-text values.txt prompt.txt
//!
//! The formatted text goes to stdout; logs go to stderr.
//! Set RUST_LOG=streamweave_string_constructor=trace for span enter/exit and events.

use clap::Parser;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use streamweave_string_constructor::{
  DisplaySink, FormatDict, FormatPolicy, TracingSink, dict_ops, format_pipeline, keys,
  run_format_graph,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

const ENV_MAX_ITERATIONS: &str = "STRING_CONSTRUCTOR_MAX_ITERATIONS";
const ENV_RECURSIVE: &str = "STRING_CONSTRUCTOR_RECURSIVE";

/// Format a template file with values from a format-dict.
#[derive(Parser, Debug)]
#[command(name = "format_text")]
#[command(
  after_help = r#"Environment variables (override the matching flags when set):
  STRING_CONSTRUCTOR_MAX_ITERATIONS   Iteration ceiling for --recursive.
  STRING_CONSTRUCTOR_RECURSIVE        1/true/yes or 0/false/no.

Dict text files hold blank-line separated chunks; the first line of a chunk is
its key and the remaining lines are its value.

Examples:
  format_text --dict-json values.json prompt.txt
  format_text --recursive --dict-text values.txt prompt.txt"#
)]
struct Args {
  /// Repeat substitution until the text stops changing.
  #[arg(long)]
  recursive: bool,

  /// Fail on unknown placeholders instead of leaving them untouched.
  #[arg(long = "unsafe")]
  strict: bool,

  /// Iteration ceiling for --recursive. Overridden by STRING_CONSTRUCTOR_MAX_ITERATIONS if set.
  #[arg(long, value_name = "N", default_value_t = FormatPolicy::DEFAULT_MAX_ITERATIONS)]
  max_iterations: usize,

  /// Keep the indentation of --dict-text values.
  #[arg(long)]
  no_cleanup: bool,

  /// Log the dict preview and the result.
  #[arg(long)]
  preview: bool,

  /// JSON object file with dict entries.
  #[arg(long, value_name = "FILE")]
  dict_json: Option<PathBuf>,

  /// Text file with dict entries, merged after --dict-json.
  #[arg(long, value_name = "FILE")]
  dict_text: Option<PathBuf>,

  /// Path to the template file
  #[arg(value_name = "template-file")]
  template_path: PathBuf,
}

fn parse_flag(value: &str) -> Option<bool> {
  match value.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" => Some(true),
    "0" | "false" | "no" => Some(false),
    _ => None,
  }
}

fn read_file(path: &Path) -> String {
  match fs::read_to_string(path) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Error reading {}: {}", path.display(), e);
      process::exit(1);
    }
  }
}

fn build_dict(args: &Args) -> Result<FormatDict, String> {
  let mut dict = FormatDict::new();
  if let Some(path) = &args.dict_json {
    let value: serde_json::Value = serde_json::from_str(&read_file(path))
      .map_err(|e| format!("Error parsing {}: {}", path.display(), e))?;
    dict = keys::validate_mapping(&value).map_err(|e| e.to_string())?;
  }
  if let Some(path) = &args.dict_text {
    let (merged, names) = dict_ops::dict_from_text(&read_file(path), !args.no_cleanup, Some(&dict))
      .map_err(|e| e.to_string())?;
    info!(keys = %names.join(","), "parsed dict text");
    dict = merged;
  }
  Ok(dict)
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  info!("format_text starting");
  let args = Args::parse();

  // Env vars override flags. These are the values used by the program (not read from env again).
  let recursive = match env::var(ENV_RECURSIVE) {
    Ok(v) => parse_flag(&v).unwrap_or_else(|| {
      warn!(value = %v, "ignoring {ENV_RECURSIVE}");
      args.recursive
    }),
    Err(_) => args.recursive,
  };
  let max_iterations = match env::var(ENV_MAX_ITERATIONS) {
    Ok(v) => v.trim().parse::<usize>().unwrap_or_else(|_| {
      warn!(value = %v, "ignoring {ENV_MAX_ITERATIONS}");
      args.max_iterations
    }),
    Err(_) => args.max_iterations,
  };
  let policy = FormatPolicy::new(recursive, !args.strict).with_max_iterations(max_iterations);
  info!(?policy, "options (env or flags)");

  let template = read_file(&args.template_path);
  let dict = match build_dict(&args) {
    Ok(d) => d,
    Err(e) => {
      eprintln!("Error building format-dict: {}", e);
      process::exit(1);
    }
  };

  let sink: Option<Arc<dyn DisplaySink>> = if args.preview {
    Some(Arc::new(TracingSink))
  } else {
    None
  };
  let graph = format_pipeline(&template, policy, sink);
  match run_format_graph(graph, dict).await {
    Ok(text) => print!("{text}"),
    Err(e) => {
      eprintln!("Format error: {}", e);
      process::exit(1);
    }
  }
}
