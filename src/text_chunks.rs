//! Parse named sub-strings out of plain text.
//!
//! Chunks are separated by one or more blank lines. The first line of a chunk is
//! its name; the remaining lines are its text.

use tracing::instrument;

/// Splits `text` into `(name, value)` chunks.
///
/// Whitespace-only lines end the current chunk and are otherwise dropped. The
/// name is always trimmed; value lines are trimmed only with `cleanup`.
#[instrument(level = "trace", skip(text))]
pub fn parse_chunks(text: &str, cleanup: bool) -> Vec<(String, String)> {
  let mut chunks = Vec::new();
  let mut current: Vec<&str> = Vec::new();

  for line in split_lines(text) {
    let stripped = line.trim();
    if !stripped.is_empty() {
      current.push(if cleanup { stripped } else { line });
      continue;
    }
    if !current.is_empty() {
      chunks.push(dump_chunk(&current));
      current.clear();
    }
  }
  if !current.is_empty() {
    chunks.push(dump_chunk(&current));
  }
  chunks
}

/// The boundaries Python's `str.splitlines` breaks on.
fn is_line_break(c: char) -> bool {
  matches!(
    c,
    '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
  )
}

/// Splits on every [is_line_break] character, treating `\r\n` as one break. A
/// trailing terminator does not produce an extra empty line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
  let mut lines = Vec::new();
  let mut start = 0;
  let mut chars = text.char_indices().peekable();
  while let Some((i, c)) = chars.next() {
    if !is_line_break(c) {
      continue;
    }
    lines.push(&text[start..i]);
    start = i + c.len_utf8();
    if c == '\r' && chars.peek().map(|&(_, next)| next) == Some('\n') {
      chars.next();
      start += 1;
    }
  }
  if start < text.len() {
    lines.push(&text[start..]);
  }
  lines
}

fn dump_chunk(lines: &[&str]) -> (String, String) {
  let (name, body) = lines.split_first().map_or(("", &[][..]), |(n, b)| (*n, b));
  (name.trim().to_string(), body.join("\n"))
}
