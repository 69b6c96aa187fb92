//! Tests for `docstring`.

use crate::docstring::{clean_doc, format_description, recover_tab_indent};

#[test]
fn clean_doc_dedents_and_trims() {
  assert_eq!(clean_doc("\n    Hello\n      world\n    "), "Hello\n  world");
  assert_eq!(clean_doc("First line\n    second"), "First line\nsecond");
  assert_eq!(clean_doc(""), "");
}

#[test]
fn recover_tab_indent_rounds_half_tabs() {
  assert_eq!(recover_tab_indent("    x", 8), "\tx");
  assert_eq!(recover_tab_indent("   x", 8), "x");
  assert_eq!(recover_tab_indent("\t  x", 8), "\tx");
  assert_eq!(recover_tab_indent("  \tx", 8), "\tx");
  assert_eq!(recover_tab_indent("    x", 2), "\t\tx");
  assert_eq!(recover_tab_indent("x", 4), "x");
}

#[test]
fn paragraph_lines_are_joined() {
  assert_eq!(
    format_description("Line one\nline two\n\nPara two", 8),
    "Line one line two\nPara two"
  );
}

#[test]
fn extra_blank_lines_are_kept() {
  assert_eq!(format_description("a\n\n\nb", 8), "a\n\nb");
}

#[test]
fn list_items_and_indent_changes_start_new_lines() {
  let doc = "Options:\n  - one\n  - two\n    continued";
  assert_eq!(
    format_description(doc, 2),
    "Options:\n\t- one\n\t- two\n\t\tcontinued"
  );
  assert_eq!(
    format_description("Steps:\n1. first\n2) second\na. third", 4),
    "Steps:\n1. first\n2) second\na. third"
  );
}
