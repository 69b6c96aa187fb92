//! Building and reading format-dicts: merge, add a single entry, parse from text,
//! extract one value.
//!
//! Every operation returns a new dict; inputs are never modified.

use tracing::{debug, instrument};

use crate::error::FormatError;
use crate::keys;
use crate::pyrepr;
use crate::text_chunks::{parse_chunks, split_lines};
use crate::types::{FormatDict, FormatValue};

/// Union of `base` and every dict in `updates`, applied in order so later
/// updates win ties. New keys are validated together; `sort` orders the result
/// by key.
#[instrument(level = "trace", skip(base, updates))]
pub fn merge_dicts(
  base: Option<&FormatDict>,
  updates: &[&FormatDict],
  sort: bool,
) -> Result<FormatDict, FormatError> {
  let pairs: Vec<(String, FormatValue)> = updates
    .iter()
    .flat_map(|d| d.iter().map(|(k, v)| (k.to_string(), v.clone())))
    .collect();
  let merged = base.cloned().unwrap_or_default().merged(pairs)?;
  Ok(if sort { merged.sorted() } else { merged })
}

/// Joins the lines of `value` back together with each line trimmed.
pub fn strip_lines(value: &str) -> String {
  split_lines(value).into_iter().map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Adds or overwrites a string entry. With `cleanup`, every line of the value is
/// trimmed.
#[instrument(level = "trace", skip(base, value))]
pub fn add_string(
  base: Option<&FormatDict>,
  name: &str,
  value: &str,
  cleanup: bool,
) -> Result<FormatDict, FormatError> {
  let key = keys::clean_key(name)?;
  let value = if cleanup {
    strip_lines(value)
  } else {
    value.to_string()
  };
  base
    .cloned()
    .unwrap_or_default()
    .with_entry(&key, FormatValue::String(value))
}

/// Adds or overwrites an entry of any type. `None` adds nothing and returns the
/// base (or an empty dict).
#[instrument(level = "trace", skip(base, value))]
pub fn add_any(
  base: Option<&FormatDict>,
  name: &str,
  value: Option<FormatValue>,
) -> Result<FormatDict, FormatError> {
  let base = base.cloned().unwrap_or_default();
  let Some(value) = value else {
    return Ok(base);
  };
  let key = keys::clean_key(name)?;
  base.with_entry(&key, value)
}

/// Parses named sub-strings from `text` (see [parse_chunks]) and merges them into
/// `base`. Returns the new dict and the names that were parsed, in order.
#[instrument(level = "trace", skip(text, base))]
pub fn dict_from_text(
  text: &str,
  cleanup: bool,
  base: Option<&FormatDict>,
) -> Result<(FormatDict, Vec<String>), FormatError> {
  let chunks = parse_chunks(text, cleanup);
  let names: Vec<String> = chunks.iter().map(|(k, _)| k.clone()).collect();
  let base = base.cloned().unwrap_or_default();
  if chunks.is_empty() {
    return Ok((base, names));
  }
  let dict = base.merged(
    chunks
      .into_iter()
      .map(|(k, v)| (k, FormatValue::String(v))),
  )?;
  debug!(count = names.len(), "parsed dict entries from text");
  Ok((dict, names))
}

/// Reads one entry as a string: missing keys and `null` give an empty string,
/// strings are returned as-is, anything else as its repr.
///
/// `name` is looked up exactly as given, surrounding whitespace included.
pub fn extract_string(dict: Option<&FormatDict>, name: &str) -> String {
  match dict.and_then(|d| d.get(name)) {
    None | Some(FormatValue::Null) => String::new(),
    Some(FormatValue::String(s)) => s.clone(),
    Some(other) => pyrepr::to_repr(other),
  }
}
