//! Format-dict key validation.
//!
//! A key must be usable as a placeholder name: ASCII letters, digits and
//! underscores, not starting with a digit. Batches report every bad key at once.

use crate::error::{FormatError, InvalidKey, KeyIssue};
use crate::types::FormatDict;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::instrument;

static KEY_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static key regex"));

/// Checks a single key against the identifier rule.
pub fn validate_key(key: &str) -> Result<(), KeyIssue> {
  if KEY_RE.is_match(key) {
    return Ok(());
  }
  match key.chars().next() {
    None => Err(KeyIssue::Empty),
    Some(c) if c.is_ascii_digit() => Err(KeyIssue::StartsWithDigit),
    Some(_) => Err(KeyIssue::InvalidCharacters),
  }
}

/// True if `key` passes [validate_key].
pub fn is_valid_key(key: &str) -> bool {
  KEY_RE.is_match(key)
}

/// Trims surrounding whitespace from a user-typed name and validates it.
#[instrument(level = "trace")]
pub fn clean_key(name: &str) -> Result<String, FormatError> {
  let key = name.trim();
  validate_key(key).map_err(|issue| {
    FormatError::InvalidKey(InvalidKey {
      key: key.to_string(),
      issue,
    })
  })?;
  Ok(key.to_string())
}

/// Collects every invalid key of the batch.
pub(crate) fn collect_invalid<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<InvalidKey> {
  keys
    .into_iter()
    .filter_map(|key| {
      validate_key(key).err().map(|issue| InvalidKey {
        key: key.to_string(),
        issue,
      })
    })
    .collect()
}

/// Validates a batch of keys, reporting all violations in one error.
#[instrument(level = "trace", skip(keys))]
pub fn validate_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Result<(), FormatError> {
  match FormatError::from_invalid_keys(collect_invalid(keys)) {
    Some(e) => Err(e),
    None => Ok(()),
  }
}

/// Validates an arbitrary value as a format-dict: it must be a JSON object with
/// valid keys. Returns the dict unchanged on success.
#[instrument(level = "trace", skip(value))]
pub fn validate_mapping(value: &Value) -> Result<FormatDict, FormatError> {
  match value {
    Value::Object(map) => FormatDict::try_from_map(map.clone()),
    other => Err(FormatError::NotAMapping(crate::pyrepr::type_name(other).to_string())),
  }
}
