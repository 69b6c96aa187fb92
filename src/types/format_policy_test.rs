//! Tests for `format_policy`.

use crate::types::FormatPolicy;

#[test]
fn default_is_safe_single_pass() {
  let policy = FormatPolicy::default();
  assert!(policy.safe);
  assert!(!policy.recursive);
  assert_eq!(policy.max_iterations, FormatPolicy::DEFAULT_MAX_ITERATIONS);
  assert_eq!(policy.max_output_len, FormatPolicy::DEFAULT_MAX_OUTPUT_LEN);
}

#[test]
fn builders_set_flags() {
  let policy = FormatPolicy::strict().with_recursive(true).with_safe(true);
  assert_eq!(policy, FormatPolicy::new(true, true));
}

#[test]
fn iteration_ceiling_is_never_zero() {
  assert_eq!(FormatPolicy::safe().with_max_iterations(0).max_iterations, 1);
  let mut policy = FormatPolicy::safe();
  policy.max_iterations = 0;
  assert_eq!(policy.iteration_ceiling(), 1);
}

#[test]
fn policy_deserializes_from_json() {
  let policy: FormatPolicy = serde_json::from_str(
    r#"{"recursive": true, "safe": false, "max_iterations": 10, "max_output_len": 64}"#,
  )
  .unwrap();
  assert_eq!(
    policy,
    FormatPolicy::strict()
      .with_recursive(true)
      .with_max_iterations(10)
      .with_max_output_len(64)
  );
}
