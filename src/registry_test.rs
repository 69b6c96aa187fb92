//! Tests for `registry`.

use std::collections::HashSet;

use crate::registry::{CATEGORY, DICT_CATEGORY, display_name, node_catalog};

#[test]
fn catalog_lists_every_node_once() {
  let catalog = node_catalog();
  assert_eq!(catalog.len(), 7);
  let ids: HashSet<&str> = catalog.iter().map(|n| n.id).collect();
  assert_eq!(ids.len(), catalog.len());
  assert!(catalog.iter().all(|n| !n.description.is_empty()));
  assert!(
    catalog
      .iter()
      .all(|n| n.category == CATEGORY || n.category == DICT_CATEGORY)
  );
}

#[test]
fn descriptions_are_reflowed() {
  let catalog = node_catalog();
  let add = catalog.iter().find(|n| n.id == "DictAddString").unwrap();
  assert_eq!(
    add.description,
    "Adds a single string entry to a format-dict, or overwrites an existing one. \
     With cleanup, every line of the value is trimmed."
  );
  let fmt = catalog.iter().find(|n| n.id == "Formatter").unwrap();
  assert!(fmt.description.contains("\n1. recursive"), "{}", fmt.description);
}

#[test]
fn display_name_lookup() {
  assert_eq!(display_name("Formatter"), Some("Format String"));
  assert_eq!(display_name("DictPreview"), Some("Dict Preview"));
  assert_eq!(display_name("Nope"), None);
}
