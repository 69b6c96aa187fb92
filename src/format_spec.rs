//! Format-spec mini-language (the part after `:` in a placeholder).
//!
//! Supported: `[[fill]align][sign][0][width][,|_][.precision][type]` with types
//! `s d f F e E %`. Anything else is rejected so the placeholder is reported as
//! unresolvable rather than rendered wrongly.

use serde_json::{Number, Value};

use crate::pyrepr;
use crate::types::FormatPolicy;

/// Largest width a spec may ask for.
pub const MAX_WIDTH: usize = FormatPolicy::DEFAULT_MAX_OUTPUT_LEN;

/// Largest precision a spec may ask for.
pub const MAX_PRECISION: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
  Left,
  Right,
  Center,
  /// Padding goes between the sign and the digits.
  AfterSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
  /// Only negative numbers get a sign.
  Minus,
  Plus,
  Space,
}

/// Parsed format spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
  pub fill: char,
  pub align: Option<Align>,
  pub sign: Option<Sign>,
  pub zero_pad: bool,
  pub width: usize,
  pub grouping: Option<char>,
  pub precision: Option<usize>,
  pub kind: Option<char>,
}

impl FormatSpec {
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

impl Default for FormatSpec {
  fn default() -> Self {
    Self {
      fill: ' ',
      align: None,
      sign: None,
      zero_pad: false,
      width: 0,
      grouping: None,
      precision: None,
      kind: None,
    }
  }
}

fn align_of(c: char) -> Option<Align> {
  match c {
    '<' => Some(Align::Left),
    '>' => Some(Align::Right),
    '^' => Some(Align::Center),
    '=' => Some(Align::AfterSign),
    _ => None,
  }
}

/// Reads a run of digits at `i`. `Ok(None)` if there is none; a run that
/// doesn't fit in `usize` is an error.
fn take_digits(chars: &[char], i: &mut usize) -> Result<Option<usize>, String> {
  let start = *i;
  while *i < chars.len() && chars[*i].is_ascii_digit() {
    *i += 1;
  }
  if start == *i {
    return Ok(None);
  }
  chars[start..*i]
    .iter()
    .collect::<String>()
    .parse()
    .map(Some)
    .map_err(|_| "Too many decimal digits in format string".to_string())
}

/// Parses a spec string. The empty string is the default spec.
pub fn parse_spec(spec: &str) -> Result<FormatSpec, String> {
  let chars: Vec<char> = spec.chars().collect();
  let mut out = FormatSpec::default();
  let mut i = 0;

  if chars.len() >= 2 {
    if let Some(align) = align_of(chars[1]) {
      out.fill = chars[0];
      out.align = Some(align);
      i = 2;
    }
  }
  if out.align.is_none() {
    if let Some(align) = chars.first().copied().and_then(align_of) {
      out.align = Some(align);
      i = 1;
    }
  }
  if let Some(&c) = chars.get(i) {
    let sign = match c {
      '+' => Some(Sign::Plus),
      '-' => Some(Sign::Minus),
      ' ' => Some(Sign::Space),
      _ => None,
    };
    if sign.is_some() {
      out.sign = sign;
      i += 1;
    }
  }
  if chars.get(i) == Some(&'#') {
    return Err("alternate form '#' is not supported".to_string());
  }
  if chars.get(i) == Some(&'0') {
    out.zero_pad = true;
    i += 1;
  }
  if let Some(width) = take_digits(&chars, &mut i)? {
    if width > MAX_WIDTH {
      return Err(format!("width too large ({width} > {MAX_WIDTH})"));
    }
    out.width = width;
  }
  if let Some(&c) = chars.get(i) {
    if c == ',' || c == '_' {
      out.grouping = Some(c);
      i += 1;
    }
  }
  if chars.get(i) == Some(&'.') {
    i += 1;
    let precision = take_digits(&chars, &mut i)?.ok_or("format specifier missing precision")?;
    if precision > MAX_PRECISION {
      return Err(format!("precision too large ({precision} > {MAX_PRECISION})"));
    }
    out.precision = Some(precision);
  }
  if let Some(&c) = chars.get(i) {
    if !"sdfFeE%".contains(c) {
      return Err(format!("unknown format code {c:?}"));
    }
    out.kind = Some(c);
    i += 1;
  }
  if i != chars.len() {
    return Err(format!("invalid format specifier {spec:?}"));
  }
  Ok(out)
}

/// Renders an already-stringified value (after `!s`/`!r`/`!a`, or a string value).
pub fn apply_to_str(spec: &FormatSpec, s: &str) -> Result<String, String> {
  if let Some(kind) = spec.kind.filter(|k| *k != 's') {
    return Err(format!("unknown format code {kind:?} for a string"));
  }
  if spec.sign.is_some() {
    return Err("sign not allowed in string format specifier".to_string());
  }
  if spec.grouping.is_some() {
    return Err("cannot specify grouping with a string".to_string());
  }
  if spec.align == Some(Align::AfterSign) {
    return Err("'=' alignment not allowed in string format specifier".to_string());
  }
  let text: String = match spec.precision {
    Some(p) => s.chars().take(p).collect(),
    None => s.to_string(),
  };
  let fill = if spec.zero_pad && spec.align.is_none() {
    '0'
  } else {
    spec.fill
  };
  Ok(pad(&text, "", fill, spec.align.unwrap_or(Align::Left), spec.width))
}

/// Renders a dict value according to `spec`.
pub fn apply_spec(spec: &FormatSpec, value: &Value) -> Result<String, String> {
  match value {
    Value::String(s) => apply_to_str(spec, s),
    Value::Bool(b) if spec.is_empty() => Ok(pyrepr::to_display(&Value::Bool(*b))),
    Value::Bool(b) => format_int(spec, i128::from(*b)),
    Value::Number(n) => format_number(spec, n),
    other if spec.is_empty() => Ok(pyrepr::to_display(other)),
    other => Err(format!(
      "unsupported format string passed to {}.__format__",
      pyrepr::type_name(other)
    )),
  }
}

fn format_number(spec: &FormatSpec, n: &Number) -> Result<String, String> {
  if let Some(i) = n.as_i64() {
    return format_int(spec, i128::from(i));
  }
  if let Some(u) = n.as_u64() {
    return format_int(spec, i128::from(u));
  }
  let f = n.as_f64().ok_or("number is not representable")?;
  format_float(spec, f)
}

fn format_int(spec: &FormatSpec, i: i128) -> Result<String, String> {
  match spec.kind {
    None | Some('d') => {
      if spec.precision.is_some() {
        return Err("precision not allowed in integer format specifier".to_string());
      }
      let digits = group(&i.unsigned_abs().to_string(), spec.grouping);
      Ok(finish_number(spec, i < 0, &digits))
    }
    Some('s') => Err("unknown format code 's' for an integer".to_string()),
    Some(_) => format_float(spec, i as f64),
  }
}

fn format_float(spec: &FormatSpec, f: f64) -> Result<String, String> {
  let negative = f.is_sign_negative();
  let abs = f.abs();
  let body = match spec.kind {
    Some('f') | Some('F') => fixed(abs, spec.precision.unwrap_or(6), spec.grouping),
    Some('e') | Some('E') => {
      let text = pyrepr::python_exponent(&format!("{:.*e}", spec.precision.unwrap_or(6), abs));
      if spec.kind == Some('E') {
        text.to_uppercase()
      } else {
        text
      }
    }
    Some('%') => format!(
      "{}%",
      fixed(abs * 100.0, spec.precision.unwrap_or(6), spec.grouping)
    ),
    None if spec.precision.is_none() => {
      let repr = pyrepr::float_repr(abs);
      match repr.split_once('.') {
        Some((int, frac)) if spec.grouping.is_some() && !repr.contains('e') => {
          format!("{}.{frac}", group(int, spec.grouping))
        }
        _ => repr,
      }
    }
    None => return Err("precision without a type is not supported for floats".to_string()),
    Some(kind) => return Err(format!("unknown format code {kind:?} for a float")),
  };
  Ok(finish_number(spec, negative, &body))
}

fn fixed(abs: f64, precision: usize, grouping: Option<char>) -> String {
  let text = format!("{abs:.precision$}");
  match text.split_once('.') {
    Some((int, frac)) => format!("{}.{frac}", group(int, grouping)),
    None => group(&text, grouping),
  }
}

/// Inserts the grouping separator every three digits from the right.
fn group(digits: &str, grouping: Option<char>) -> String {
  let Some(sep) = grouping else {
    return digits.to_string();
  };
  let len = digits.len();
  let mut out = String::with_capacity(len + len / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (len - i) % 3 == 0 {
      out.push(sep);
    }
    out.push(c);
  }
  out
}

fn finish_number(spec: &FormatSpec, negative: bool, body: &str) -> String {
  let sign = match (negative, spec.sign.unwrap_or(Sign::Minus)) {
    (true, _) => "-",
    (false, Sign::Plus) => "+",
    (false, Sign::Space) => " ",
    (false, Sign::Minus) => "",
  };
  let (fill, align) = match (spec.zero_pad, spec.align) {
    (true, None) => ('0', Align::AfterSign),
    (_, Some(align)) => (spec.fill, align),
    (false, None) => (spec.fill, Align::Right),
  };
  pad(body, sign, fill, align, spec.width)
}

fn pad(body: &str, sign: &str, fill: char, align: Align, width: usize) -> String {
  let len = sign.chars().count() + body.chars().count();
  let missing = width.saturating_sub(len);
  let fill_str = |n: usize| fill.to_string().repeat(n);
  match align {
    Align::Left => format!("{sign}{body}{}", fill_str(missing)),
    Align::Right => format!("{}{sign}{body}", fill_str(missing)),
    Align::Center => {
      let left = missing / 2;
      format!("{}{sign}{body}{}", fill_str(left), fill_str(missing - left))
    }
    Align::AfterSign => format!("{sign}{}{body}", fill_str(missing)),
  }
}
