//! Catalog of the string-constructor nodes: ids, display names, menu categories
//! and descriptions.

use crate::docstring::{DEFAULT_TAB_SIZE, clean_doc, format_description};

/// Menu category for formatting nodes.
pub const CATEGORY: &str = "string_constructor";
/// Menu category for dict building nodes.
pub const DICT_CATEGORY: &str = "string_constructor/dict";

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
  pub id: &'static str,
  pub display_name: &'static str,
  pub category: &'static str,
  /// Description already run through [format_description].
  pub description: String,
}

struct RawEntry {
  id: &'static str,
  display_name: &'static str,
  category: &'static str,
  doc: &'static str,
}

const ENTRIES: &[RawEntry] = &[
  RawEntry {
    id: "DictFromText",
    display_name: "Dict from Text",
    category: DICT_CATEGORY,
    doc: "
      Parses named sub-strings out of plain text and adds them to a format-dict.

      Sub-strings are separated by blank lines. The first line of each one is
      its name, the remaining lines are its value:
        - names must be valid identifiers
        - with cleanup, every value line is trimmed
    ",
  },
  RawEntry {
    id: "DictAddString",
    display_name: "Dict: Add String",
    category: DICT_CATEGORY,
    doc: "
      Adds a single string entry to a format-dict, or overwrites an existing one.
      With cleanup, every line of the value is trimmed.
    ",
  },
  RawEntry {
    id: "DictAddAny",
    display_name: "Dict: Add Any",
    category: DICT_CATEGORY,
    doc: "
      Adds a single entry of any type to a format-dict.
      An absent value leaves the dict unchanged.
    ",
  },
  RawEntry {
    id: "DictExtractString",
    display_name: "Dict: Extract String",
    category: DICT_CATEGORY,
    doc: "
      Reads one entry of a format-dict as a string.
      Missing entries give an empty string.
    ",
  },
  RawEntry {
    id: "DictPreview",
    display_name: "Dict Preview",
    category: DICT_CATEGORY,
    doc: "
      Shows every entry of a format-dict and passes the dict through unchanged.
    ",
  },
  RawEntry {
    id: "ValidateKeys",
    display_name: "Validate Dict Keys",
    category: DICT_CATEGORY,
    doc: "
      Checks that every key of a mapping is a valid identifier and
      passes it on as a format-dict.

      Invalid keys are reported together.
    ",
  },
  RawEntry {
    id: "Formatter",
    display_name: "Format String",
    category: CATEGORY,
    doc: "
      Formats a template with the values of a format-dict.

      Options:
        1. recursive: repeat until the text stops changing
        2. safe: leave unknown placeholders untouched
    ",
  },
];

/// Every node of the package, in menu order.
pub fn node_catalog() -> Vec<NodeInfo> {
  ENTRIES
    .iter()
    .map(|e| NodeInfo {
      id: e.id,
      display_name: e.display_name,
      category: e.category,
      description: format_description(&clean_doc(e.doc), DEFAULT_TAB_SIZE),
    })
    .collect()
}

/// Display name of the node with `id`.
pub fn display_name(id: &str) -> Option<&'static str> {
  ENTRIES.iter().find(|e| e.id == id).map(|e| e.display_name)
}
