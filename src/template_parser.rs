//! Placeholder scanning and replacement-field parsing.
//!
//! The scanner is a single forward pass over the bytes of the template (no regex,
//! no backtracking). It only recognises one layer of braces around a brace-free
//! inner span; braces nested inside a field name are not parsed.

/// One candidate placeholder found by [next_span].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
  /// Literal text before the opening brace run.
  pub prefix: &'a str,
  /// Number of consecutive `{`.
  pub open: usize,
  /// Text between the brace runs. Contains no braces.
  pub inner: &'a str,
  /// Number of consecutive `}`.
  pub close: usize,
  /// The whole span as written: opening run, inner text, closing run.
  pub raw: &'a str,
  /// Text after the closing brace run, not yet scanned.
  pub rest: &'a str,
}

/// Finds the next `{...}` span: a maximal `{` run, brace-free inner text, and a
/// maximal `}` run. An opening run that meets another `{` before any `}` is not a
/// span; scanning resumes at that brace.
pub fn next_span(s: &str) -> Option<Span<'_>> {
  let bytes = s.as_bytes();
  let mut i = 0;
  while i < bytes.len() {
    if bytes[i] != b'{' {
      i += 1;
      continue;
    }
    let open_start = i;
    while i < bytes.len() && bytes[i] == b'{' {
      i += 1;
    }
    let inner_start = i;
    while i < bytes.len() && bytes[i] != b'{' && bytes[i] != b'}' {
      i += 1;
    }
    if i >= bytes.len() {
      return None;
    }
    if bytes[i] == b'{' {
      continue;
    }
    let inner_end = i;
    while i < bytes.len() && bytes[i] == b'}' {
      i += 1;
    }
    return Some(Span {
      prefix: &s[..open_start],
      open: inner_start - open_start,
      inner: &s[inner_start..inner_end],
      close: i - inner_end,
      raw: &s[open_start..i],
      rest: &s[i..],
    });
  }
  None
}

/// Attribute or index access following the field's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor<'a> {
  /// `.name`
  Attribute(&'a str),
  /// `[n]` (numeric) or `[key]`
  Index(&'a str),
}

/// `!s`, `!r` or `!a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
  Str,
  Repr,
  Ascii,
}

/// Parsed replacement field: `key(.attr|[index])*(!conv)?(:spec)?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
  pub key: &'a str,
  pub accessors: Vec<Accessor<'a>>,
  pub conversion: Option<Conversion>,
  pub spec: &'a str,
}

/// Splits `inner` into field name, conversion and spec, then parses the field name.
/// The field name is trimmed; the spec is taken verbatim.
pub fn parse_field(inner: &str) -> Result<Field<'_>, String> {
  let (name_part, conversion, spec) = split_field(inner)?;
  let name = name_part.trim();
  let key_end = name.find(['.', '[']).unwrap_or(name.len());
  let key = &name[..key_end];
  if key.is_empty() {
    return Err("empty field name (positional fields are not supported)".to_string());
  }
  if key.bytes().all(|b| b.is_ascii_digit()) {
    return Err(format!("positional field {key} is not supported"));
  }
  if !crate::keys::is_valid_key(key) {
    return Err(format!("{key:?} is not a valid key"));
  }
  let accessors = parse_accessors(&name[key_end..])?;
  Ok(Field {
    key,
    accessors,
    conversion,
    spec,
  })
}

fn split_field(inner: &str) -> Result<(&str, Option<Conversion>, &str), String> {
  let mut in_bracket = false;
  for (i, c) in inner.char_indices() {
    match c {
      '[' => in_bracket = true,
      ']' => in_bracket = false,
      ':' if !in_bracket => return Ok((&inner[..i], None, &inner[i + 1..])),
      '!' if !in_bracket => {
        let after = &inner[i + 1..];
        let mut chars = after.chars();
        let conversion = match chars.next() {
          Some('s') => Conversion::Str,
          Some('r') => Conversion::Repr,
          Some('a') => Conversion::Ascii,
          Some(other) => return Err(format!("unknown conversion specifier {other}")),
          None => return Err("end of field after '!'".to_string()),
        };
        let remainder = chars.as_str();
        let spec = match remainder.strip_prefix(':') {
          Some(spec) => spec,
          None if remainder.is_empty() => "",
          None => return Err("expected ':' after conversion specifier".to_string()),
        };
        return Ok((&inner[..i], Some(conversion), spec));
      }
      _ => {}
    }
  }
  if in_bracket {
    return Err("missing ']' in field name".to_string());
  }
  Ok((inner, None, ""))
}

fn parse_accessors(mut s: &str) -> Result<Vec<Accessor<'_>>, String> {
  let mut accessors = Vec::new();
  while !s.is_empty() {
    if let Some(rest) = s.strip_prefix('.') {
      let end = rest.find(['.', '[']).unwrap_or(rest.len());
      let attr = &rest[..end];
      if attr.is_empty() {
        return Err("empty attribute in field name".to_string());
      }
      accessors.push(Accessor::Attribute(attr));
      s = &rest[end..];
    } else if let Some(rest) = s.strip_prefix('[') {
      let end = rest.find(']').ok_or("missing ']' in field name")?;
      let index = &rest[..end];
      if index.is_empty() {
        return Err("empty index in field name".to_string());
      }
      accessors.push(Accessor::Index(index));
      s = &rest[end + 1..];
    } else {
      return Err("only '.' or '[' may follow ']' in field name".to_string());
    }
  }
  Ok(accessors)
}
