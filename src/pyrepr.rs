//! Python-flavoured text forms of dict values: `str`, `repr`, `ascii` and `pformat`.
//!
//! Users of the host write templates with Python conventions in mind, so a
//! `true` in the dict is rendered `True`, a list as `['a', 1]`, and so on.

use serde_json::{Map, Number, Value};

/// Line width used by [pformat].
pub const PFORMAT_WIDTH: usize = 80;

/// Name of the value's type, Python style.
pub fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "NoneType",
    Value::Bool(_) => "bool",
    Value::Number(n) if n.is_f64() => "float",
    Value::Number(_) => "int",
    Value::String(_) => "str",
    Value::Array(_) => "list",
    Value::Object(_) => "dict",
  }
}

/// `str(value)`: strings verbatim, everything else as its repr.
pub fn to_display(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => to_repr(other),
  }
}

/// `repr(value)` with dict entries in insertion order.
pub fn to_repr(value: &Value) -> String {
  let mut out = String::new();
  write_repr(&mut out, value, false);
  out
}

/// `ascii(value)`: the repr with every non-ASCII char escaped.
pub fn to_ascii(value: &Value) -> String {
  escape_non_ascii(&to_repr(value))
}

/// Repr of a bare string.
pub fn str_repr(s: &str) -> String {
  let mut out = String::new();
  write_str_repr(&mut out, s);
  out
}

pub(crate) fn escape_non_ascii(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    let code = c as u32;
    match code {
      0..=0x7f => out.push(c),
      0x80..=0xff => out.push_str(&format!("\\x{code:02x}")),
      0x100..=0xffff => out.push_str(&format!("\\u{code:04x}")),
      _ => out.push_str(&format!("\\U{code:08x}")),
    }
  }
  out
}

/// Float text the way Python's `repr(float)` writes it.
pub fn float_repr(f: f64) -> String {
  if f.is_nan() {
    return "nan".to_string();
  }
  if f.is_infinite() {
    return if f > 0.0 { "inf" } else { "-inf" }.to_string();
  }
  let abs = f.abs();
  if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
    return python_exponent(&format!("{f:e}"));
  }
  let s = format!("{f}");
  if s.contains('.') { s } else { format!("{s}.0") }
}

/// Rewrites Rust's `1.5e-7` exponent form into Python's `1.5e-07`.
pub(crate) fn python_exponent(rust: &str) -> String {
  let Some((mantissa, exp)) = rust.split_once('e') else {
    return rust.to_string();
  };
  let (sign, digits) = match exp.strip_prefix('-') {
    Some(d) => ('-', d),
    None => ('+', exp),
  };
  format!("{mantissa}e{sign}{digits:0>2}")
}

fn number_repr(n: &Number) -> String {
  if let Some(i) = n.as_i64() {
    return i.to_string();
  }
  if let Some(u) = n.as_u64() {
    return u.to_string();
  }
  n.as_f64().map(float_repr).unwrap_or_else(|| n.to_string())
}

fn write_str_repr(out: &mut String, s: &str) {
  let quote = if s.contains('\'') && !s.contains('"') {
    '"'
  } else {
    '\''
  };
  out.push(quote);
  for c in s.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c if c == quote => {
        out.push('\\');
        out.push(c);
      }
      c if (c as u32) < 0x20 || c as u32 == 0x7f => {
        out.push_str(&format!("\\x{:02x}", c as u32));
      }
      c => out.push(c),
    }
  }
  out.push(quote);
}

fn sorted_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
  let mut entries: Vec<(&String, &Value)> = map.iter().collect();
  entries.sort_by(|a, b| a.0.cmp(b.0));
  entries
}

fn write_repr(out: &mut String, value: &Value, sort_dicts: bool) {
  match value {
    Value::Null => out.push_str("None"),
    Value::Bool(true) => out.push_str("True"),
    Value::Bool(false) => out.push_str("False"),
    Value::Number(n) => out.push_str(&number_repr(n)),
    Value::String(s) => write_str_repr(out, s),
    Value::Array(items) => {
      out.push('[');
      for (i, item) in items.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        write_repr(out, item, sort_dicts);
      }
      out.push(']');
    }
    Value::Object(map) => {
      let entries: Vec<(&String, &Value)> = if sort_dicts {
        sorted_entries(map)
      } else {
        map.iter().collect()
      };
      out.push('{');
      for (i, (k, v)) in entries.into_iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        write_str_repr(out, k);
        out.push_str(": ");
        write_repr(out, v, sort_dicts);
      }
      out.push('}');
    }
  }
}

/// Pretty repr: dict keys sorted; a list or dict that doesn't fit in
/// [PFORMAT_WIDTH] columns is broken one element per line with hanging indent.
pub fn pformat(value: &Value) -> String {
  let mut out = String::new();
  write_pretty(&mut out, value, 0, 0);
  out
}

fn write_pretty(out: &mut String, value: &Value, indent: usize, allowance: usize) {
  let mut flat = String::new();
  write_repr(&mut flat, value, true);
  let fits = flat.chars().count() + indent + allowance <= PFORMAT_WIDTH;
  match value {
    Value::Array(items) if !fits && !items.is_empty() => {
      out.push('[');
      let last = items.len() - 1;
      for (i, item) in items.iter().enumerate() {
        if i > 0 {
          out.push_str(",\n");
          out.push_str(&" ".repeat(indent + 1));
        }
        let tail = if i == last { allowance + 1 } else { 1 };
        write_pretty(out, item, indent + 1, tail);
      }
      out.push(']');
    }
    Value::Object(map) if !fits && !map.is_empty() => {
      out.push('{');
      let entries = sorted_entries(map);
      let last = entries.len() - 1;
      for (i, (k, v)) in entries.into_iter().enumerate() {
        if i > 0 {
          out.push_str(",\n");
          out.push_str(&" ".repeat(indent + 1));
        }
        let key = str_repr(k);
        out.push_str(&key);
        out.push_str(": ");
        let tail = if i == last { allowance + 1 } else { 1 };
        write_pretty(out, v, indent + 1 + key.chars().count() + 2, tail);
      }
      out.push('}');
    }
    _ => out.push_str(&flat),
  }
}
