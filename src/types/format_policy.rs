//! Per-call formatting policy.

use serde::{Deserialize, Serialize};

/// Selects how a template is formatted: single pass or fixed point, and whether
/// unresolvable placeholders are kept (`safe`) or fail the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatPolicy {
  /// Re-apply substitution until the text stops changing.
  pub recursive: bool,
  /// Leave unresolvable placeholders untouched instead of failing.
  pub safe: bool,
  /// Ceiling on recursive passes. Never less than 1.
  pub max_iterations: usize,
  /// Ceiling on the byte length of any intermediate recursive result.
  pub max_output_len: usize,
}

impl FormatPolicy {
  /// Default recursive pass ceiling (the usual interpreter recursion limit).
  pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
  pub const DEFAULT_MAX_OUTPUT_LEN: usize = 16 * 1024 * 1024;

  pub fn new(recursive: bool, safe: bool) -> Self {
    Self {
      recursive,
      safe,
      max_iterations: Self::DEFAULT_MAX_ITERATIONS,
      max_output_len: Self::DEFAULT_MAX_OUTPUT_LEN,
    }
  }

  /// Single pass, unresolvable placeholders fail.
  pub fn strict() -> Self {
    Self::new(false, false)
  }

  /// Single pass, unresolvable placeholders kept.
  pub fn safe() -> Self {
    Self::new(false, true)
  }

  pub fn with_recursive(mut self, recursive: bool) -> Self {
    self.recursive = recursive;
    self
  }

  pub fn with_safe(mut self, safe: bool) -> Self {
    self.safe = safe;
    self
  }

  /// Sets the recursive pass ceiling, clamped to at least 1.
  pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
    self.max_iterations = max_iterations.max(1);
    self
  }

  pub fn with_max_output_len(mut self, max_output_len: usize) -> Self {
    self.max_output_len = max_output_len;
    self
  }

  /// Iteration ceiling actually used (guards hand-built structs with 0).
  pub fn iteration_ceiling(&self) -> usize {
    self.max_iterations.max(1)
  }
}

impl Default for FormatPolicy {
  fn default() -> Self {
    Self::safe()
  }
}
