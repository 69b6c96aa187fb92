//! Turn node descriptions written as wrapped doc text into display text.
//!
//! Mid-paragraph line breaks become spaces, indentation is recovered as tabs, list
//! items and indent changes start a new line, and runs of blank lines lose their
//! first line (the paragraph separator).

use once_cell::sync::Lazy;
use regex::Regex;

static LIST_LINE_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^(\s*)([-*•]+|[a-zA-Z]\s*[.)]|[0-9+]\s*[.)])\s+").expect("static list regex")
});

/// Default tab width used when recovering indentation.
pub const DEFAULT_TAB_SIZE: usize = 8;

/// Dedents doc text the way Python's `inspect.cleandoc` does: tabs expanded,
/// the first line stripped, the common indent of the other lines removed, and
/// leading/trailing blank lines dropped.
pub fn clean_doc(doc: &str) -> String {
  let expanded: Vec<String> = doc.lines().map(expand_tabs).collect();
  let margin = expanded
    .iter()
    .skip(1)
    .filter(|l| !l.trim().is_empty())
    .map(|l| l.len() - l.trim_start().len())
    .min()
    .unwrap_or(0);

  let mut lines: Vec<String> = expanded
    .iter()
    .enumerate()
    .map(|(i, l)| {
      if i == 0 {
        l.trim_start().to_string()
      } else {
        l.get(margin..).unwrap_or("").trim_end().to_string()
      }
    })
    .collect();
  while lines.first().is_some_and(|l| l.trim().is_empty()) {
    lines.remove(0);
  }
  while lines.last().is_some_and(|l| l.trim().is_empty()) {
    lines.pop();
  }
  lines.join("\n")
}

fn expand_tabs(line: &str) -> String {
  let mut out = String::with_capacity(line.len());
  for c in line.chars() {
    if c == '\t' {
      let n = DEFAULT_TAB_SIZE - out.chars().count() % DEFAULT_TAB_SIZE;
      out.push_str(&" ".repeat(n));
    } else {
      out.push(c);
    }
  }
  out
}

/// Replaces the leading whitespace of `line` with tabs. Spaces count as
/// `1 / tab_size` of a tab and half tabs round up; a space fraction is dropped
/// when more tabs follow the spaces.
pub(crate) fn recover_tab_indent(line: &str, tab_size: usize) -> String {
  let content = line.trim_start_matches([' ', '\t']);
  let indent = &line[..line.len() - content.len()];

  let mut whole_tabs = 0;
  let mut pending_spaces = 0;
  for c in indent.chars() {
    if c == '\t' {
      // Tabs after spaces truncate the spaces to whole tabs.
      whole_tabs += pending_spaces / tab_size + 1;
      pending_spaces = 0;
    } else {
      pending_spaces += 1;
    }
  }
  let tabs = whole_tabs + (2 * pending_spaces + tab_size) / (2 * tab_size);
  format!("{}{content}", "\t".repeat(tabs))
}

fn join_paragraph(paragraph: &[&str], tab_size: usize, out: &mut Vec<String>) {
  let mut pending_indent = 0;
  let mut pending: Vec<String> = Vec::new();

  for chunk in paragraph {
    let recovered = recover_tab_indent(chunk, tab_size);
    let content = recovered.trim_start_matches('\t');
    let indent = recovered.len() - content.len();
    let is_list_line = LIST_LINE_RE.is_match(content);

    if indent == pending_indent && !is_list_line {
      pending.push(content.to_string());
      continue;
    }
    if !pending.is_empty() {
      out.push(format!("{}{}", "\t".repeat(pending_indent), pending.join(" ")));
      pending.clear();
    }
    pending.push(content.to_string());
    pending_indent = indent;
  }
  if !pending.is_empty() {
    out.push(format!("{}{}", "\t".repeat(pending_indent), pending.join(" ")));
  }
}

/// Formats cleaned doc text (see [clean_doc]) for display.
pub fn format_description(doc: &str, tab_size: usize) -> String {
  let tab_size = tab_size.max(1);
  let mut out: Vec<String> = Vec::new();
  let mut paragraph: Vec<&str> = Vec::new();

  for line in doc.lines() {
    let line = line.trim_end();
    if !line.is_empty() {
      paragraph.push(line);
      continue;
    }
    if !paragraph.is_empty() {
      join_paragraph(&paragraph, tab_size, &mut out);
      paragraph.clear();
      continue;
    }
    out.push(String::new());
  }
  if !paragraph.is_empty() {
    join_paragraph(&paragraph, tab_size, &mut out);
  }
  out.join("\n")
}
