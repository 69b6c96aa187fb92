//! Property tests for the formatter, the key validator and dict merging.

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde_json::Value;
use streamweave_string_constructor::dict_ops::merge_dicts;
use streamweave_string_constructor::formatter::substitute_once;
use streamweave_string_constructor::keys::validate_key;
use streamweave_string_constructor::{FormatDict, FormatError, FormatPolicy, KeyIssue, format_template};

// =============================================================================
// Generators
// =============================================================================

fn key_strategy() -> impl Strategy<Value = String> {
  "[a-z_][a-z0-9_]{0,6}"
}

fn text_strategy() -> impl Strategy<Value = String> {
  "[a-zA-Z0-9 .,:!]{0,10}"
}

fn dict_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
  prop::collection::btree_map(key_strategy(), text_strategy(), 1..6)
}

fn to_dict(map: &BTreeMap<String, String>) -> FormatDict {
  FormatDict::try_from_iter(map.iter().map(|(k, v)| (k.clone(), Value::from(v.clone()))))
    .expect("generated keys are valid")
}

/// Template pieces: literal text, or a placeholder choosing a dict key by index.
fn template_from(pieces: &[(bool, usize, String)], keys: &[&String], unknown: &str) -> String {
  pieces
    .iter()
    .map(|(is_placeholder, idx, text)| match (*is_placeholder, keys.is_empty()) {
      (true, false) => format!("{{{}}}", keys[idx % keys.len()]),
      (true, true) => format!("{{{unknown}}}"),
      (false, _) => text.clone(),
    })
    .collect()
}

fn pieces_strategy() -> impl Strategy<Value = Vec<(bool, usize, String)>> {
  prop::collection::vec((any::<bool>(), any::<usize>(), text_strategy()), 0..8)
}

// =============================================================================
// Formatter
// =============================================================================

proptest! {
  #[test]
  fn safe_and_strict_agree_when_every_key_is_known(
    map in dict_strategy(),
    pieces in pieces_strategy(),
  ) {
    let dict = to_dict(&map);
    let keys: Vec<&String> = map.keys().collect();
    let template = template_from(&pieces, &keys, "unused");
    let safe = substitute_once(&template, &dict, true).unwrap();
    let strict = substitute_once(&template, &dict, false).unwrap();
    prop_assert_eq!(safe, strict);
  }

  #[test]
  fn safe_mode_keeps_unknown_placeholders_verbatim(
    map in dict_strategy(),
    prefix in text_strategy(),
    suffix in text_strategy(),
    unknown in "zz_unknown[0-9]{0,3}",
    open in 1usize..5,
    close in 1usize..5,
  ) {
    let dict = to_dict(&map);
    let raw = format!("{}{unknown}{}", "{".repeat(open), "}".repeat(close));
    let template = format!("{prefix}{raw}{suffix}");
    let out = substitute_once(&template, &dict, true).unwrap();
    prop_assert_eq!(out, template);
  }

  #[test]
  fn second_safe_pass_changes_nothing(
    map in dict_strategy(),
    pieces in pieces_strategy(),
    drop_keys in any::<bool>(),
  ) {
    let dict = to_dict(&map);
    let keys: Vec<&String> = if drop_keys { Vec::new() } else { map.keys().collect() };
    let template = template_from(&pieces, &keys, "zz_missing");
    let once = substitute_once(&template, &dict, true).unwrap();
    let twice = substitute_once(&once, &dict, true).unwrap();
    prop_assert_eq!(once, twice);
  }

  #[test]
  fn acyclic_chain_matches_manual_unrolling(
    depth in 1usize..40,
    leaf in text_strategy(),
  ) {
    let mut pairs: Vec<(String, Value)> = (0..depth)
      .map(|i| (format!("k{i}"), Value::from(format!("<{{k{}}}>", i + 1))))
      .collect();
    pairs.push((format!("k{depth}"), Value::from(leaf.clone())));
    let dict = FormatDict::try_from_iter(pairs).unwrap();

    let mut expected = leaf;
    for _ in 0..depth {
      expected = format!("<{expected}>");
    }
    let policy = FormatPolicy::strict().with_recursive(true);
    prop_assert_eq!(format_template("{k0}", &dict, &policy).unwrap(), expected);
  }

  #[test]
  fn two_key_cycle_always_diverges(max in 1usize..60, safe in any::<bool>()) {
    let dict = FormatDict::try_from_iter([
      ("a", Value::from("{b}")),
      ("b", Value::from("{a}")),
    ])
    .unwrap();
    let policy = FormatPolicy::new(true, safe).with_max_iterations(max);
    match format_template("{a}", &dict, &policy) {
      Err(FormatError::Divergent { iterations, previous, last, .. }) => {
        prop_assert_eq!(iterations, max);
        prop_assert_ne!(previous, last);
      }
      other => prop_assert!(false, "expected divergence, got {:?}", other),
    }
  }
}

// =============================================================================
// Keys and merging
// =============================================================================

proptest! {
  #[test]
  fn identifier_keys_are_valid(key in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
    prop_assert_eq!(validate_key(&key), Ok(()));
  }

  #[test]
  fn digit_first_keys_are_rejected(key in "[0-9][A-Za-z0-9_]{0,20}") {
    prop_assert_eq!(validate_key(&key), Err(KeyIssue::StartsWithDigit));
  }

  #[test]
  fn merge_is_associative_and_later_wins(
    a in dict_strategy(),
    b in dict_strategy(),
    c in dict_strategy(),
  ) {
    let (da, db, dc) = (to_dict(&a), to_dict(&b), to_dict(&c));
    let ab = merge_dicts(Some(&da), &[&db], false).unwrap();
    let left = merge_dicts(Some(&ab), &[&dc], false).unwrap();
    let bc = merge_dicts(Some(&db), &[&dc], false).unwrap();
    let right = merge_dicts(Some(&da), &[&bc], false).unwrap();
    prop_assert_eq!(&left, &right);

    for (k, v) in c.iter() {
      prop_assert_eq!(left.get(k), Some(&Value::from(v.clone())));
    }
    for (k, v) in b.iter().filter(|(k, _)| !c.contains_key(*k)) {
      prop_assert_eq!(left.get(k), Some(&Value::from(v.clone())));
    }
  }
}
