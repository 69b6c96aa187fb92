//! Errors raised while building format-dicts and formatting templates.

use std::fmt;
use thiserror::Error;

/// Why a single dict key was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIssue {
  Empty,
  StartsWithDigit,
  InvalidCharacters,
}

impl fmt::Display for KeyIssue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      KeyIssue::Empty => write!(f, "key is empty"),
      KeyIssue::StartsWithDigit => write!(f, "key starts with a digit"),
      KeyIssue::InvalidCharacters => {
        write!(f, "key must contain only letters/digits/underscore")
      }
    }
  }
}

/// One rejected key together with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKey {
  pub key: String,
  pub issue: KeyIssue,
}

impl fmt::Display for InvalidKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}: {}", self.key, self.issue)
  }
}

/// Errors from dict construction, key validation and template formatting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
  /// Exactly one key failed validation.
  #[error("Invalid format-dict key {:?}: {}", .0.key, .0.issue)]
  InvalidKey(InvalidKey),

  /// Several keys failed validation; every one of them is listed.
  #[error("Invalid format-dict keys ({}): {}", .0.len(), join_invalid(.0))]
  InvalidKeys(Vec<InvalidKey>),

  /// The template was not a string.
  #[error("Not a string: {0}")]
  NotAString(String),

  /// The dict input was not a mapping.
  #[error("Not a mapping: {0}")]
  NotAMapping(String),

  /// Strict formatting met a placeholder whose key is not in the dict.
  #[error("No key {key:?} in the format-dict for placeholder {placeholder}")]
  MissingKey { key: String, placeholder: String },

  /// The key exists but the placeholder could not be rendered
  /// (attribute/index access, conversion or format spec).
  #[error("Can't resolve placeholder {placeholder}: {reason}")]
  UnresolvedField { placeholder: String, reason: String },

  /// Opening and closing brace runs disagree on whether the span is escaped.
  #[error("Unbalanced braces in {placeholder}")]
  UnbalancedBraces { placeholder: String },

  /// Recursive formatting kept changing the text until the iteration ceiling.
  #[error(
    "Recursive formatting didn't converge after {iterations} iterations \
     (cyclic or divergent substitution chain).\nTemplate: {template:?}\n\
     Previous: {previous:?}\nLast: {last:?}"
  )]
  Divergent {
    template: String,
    previous: String,
    last: String,
    iterations: usize,
  },

  /// Recursive formatting produced more text than the policy allows.
  #[error("Formatted text exceeded {limit} bytes (template: {template:?})")]
  OutputTooLarge { template: String, limit: usize },
}

fn join_invalid(keys: &[InvalidKey]) -> String {
  keys
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

impl FormatError {
  /// Builds the single- or multi-key error from the collected violations.
  /// Returns `None` when nothing was collected.
  pub fn from_invalid_keys(mut keys: Vec<InvalidKey>) -> Option<Self> {
    match keys.len() {
      0 => None,
      1 => keys.pop().map(FormatError::InvalidKey),
      _ => Some(FormatError::InvalidKeys(keys)),
    }
  }
}
