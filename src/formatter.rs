//! Template formatter: substitutes `{key}` placeholders from a [FormatDict].
//!
//! Brace runs follow Python's doubling rule. A span with odd opening and closing
//! runs is a placeholder: the innermost brace pair is consumed and every other
//! pair collapses to one literal brace (`{{{a}}}` gives `{` + value + `}`). A span
//! with even runs is escaped text and only loses one layer (`{{a}}` gives `{a}`).
//! Exactly one layer is resolved per pass; recursive mode repeats passes until the
//! text stops changing.
//!
//! Safe mode never alters a span it can't resolve: unknown keys, malformed fields,
//! unbalanced runs and escaped spans around unknown names are copied byte for byte.
//! Strict mode follows Python: escapes always collapse and any unresolvable
//! placeholder fails the whole call.

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::display::DisplaySink;
use crate::error::FormatError;
use crate::format_spec::{apply_spec, apply_to_str, parse_spec};
use crate::pyrepr;
use crate::template_parser::{Accessor, Conversion, Span, next_span, parse_field};
use crate::types::{FormatDict, FormatPolicy, FormatValue};

/// Formats `template` against `dict` as selected by `policy`.
#[instrument(level = "trace", skip(dict))]
pub fn format_template(
  template: &str,
  dict: &FormatDict,
  policy: &FormatPolicy,
) -> Result<String, FormatError> {
  match policy.recursive {
    false => substitute_once(template, dict, policy.safe),
    true => format_fixed_point(template, dict, policy),
  }
}

/// Formats a template that arrived as an arbitrary value. Non-string templates
/// are a type error; a missing dict behaves as an empty one.
pub fn format_value(
  template: &Value,
  dict: Option<&FormatDict>,
  policy: &FormatPolicy,
) -> Result<String, FormatError> {
  let Value::String(template) = template else {
    return Err(FormatError::NotAString(pyrepr::to_repr(template)));
  };
  let empty = FormatDict::new();
  format_template(template, dict.unwrap_or(&empty), policy)
}

/// Like [format_template], then mirrors the text (or the error message) into `sink`.
pub fn format_and_display(
  template: &str,
  dict: &FormatDict,
  policy: &FormatPolicy,
  sink: Option<&dyn DisplaySink>,
  node_id: &str,
) -> Result<String, FormatError> {
  let result = format_template(template, dict, policy);
  if let Some(sink) = sink {
    match &result {
      Ok(text) => sink.display(text, node_id),
      Err(e) => sink.display(&e.to_string(), node_id),
    }
  }
  result
}

/// One left-to-right substitution pass over every span of the template.
#[instrument(level = "trace", skip(dict))]
pub fn substitute_once(template: &str, dict: &FormatDict, safe: bool) -> Result<String, FormatError> {
  let mut out = String::with_capacity(template.len());
  let mut rest = template;
  while let Some(span) = next_span(rest) {
    out.push_str(span.prefix);
    match render_span(&span, dict, safe) {
      Ok(text) => out.push_str(&text),
      Err(e) if safe => {
        trace!(span = span.raw, error = %e, "kept unresolved span");
        out.push_str(span.raw);
      }
      Err(e) => return Err(e),
    }
    rest = span.rest;
  }
  out.push_str(rest);
  Ok(out)
}

/// Repeats [substitute_once] until two consecutive results are equal.
///
/// Fails with [FormatError::Divergent] when the policy's iteration ceiling is
/// reached first, carrying the last two (differing) intermediate results.
#[instrument(level = "trace", skip(dict))]
pub fn format_fixed_point(
  template: &str,
  dict: &FormatDict,
  policy: &FormatPolicy,
) -> Result<String, FormatError> {
  let ceiling = policy.iteration_ceiling();
  let mut previous = template.to_string();
  let mut iterations = 0;
  loop {
    let next = substitute_once(&previous, dict, policy.safe)?;
    iterations += 1;
    if next == previous {
      debug!(iterations, "recursive formatting converged");
      return Ok(next);
    }
    if next.len() > policy.max_output_len {
      return Err(FormatError::OutputTooLarge {
        template: template.to_string(),
        limit: policy.max_output_len,
      });
    }
    if iterations >= ceiling {
      return Err(FormatError::Divergent {
        template: template.to_string(),
        previous,
        last: next,
        iterations,
      });
    }
    previous = next;
  }
}

fn braces(c: char, n: usize) -> String {
  c.to_string().repeat(n)
}

fn render_span(span: &Span<'_>, dict: &FormatDict, safe: bool) -> Result<String, FormatError> {
  let open_literal = braces('{', span.open / 2);
  let close_literal = braces('}', span.close / 2);
  match (span.open % 2, span.close % 2) {
    (1, 1) => {
      let value = resolve_placeholder(span, dict)?;
      Ok(format!("{open_literal}{value}{close_literal}"))
    }
    (0, 0) => {
      if safe {
        resolve_placeholder(span, dict)?;
      }
      Ok(format!("{open_literal}{}{close_literal}", span.inner))
    }
    _ => Err(FormatError::UnbalancedBraces {
      placeholder: span.raw.to_string(),
    }),
  }
}

/// Renders the inner text of a span as one replacement field.
fn resolve_placeholder(span: &Span<'_>, dict: &FormatDict) -> Result<String, FormatError> {
  let unresolved = |reason: String| FormatError::UnresolvedField {
    placeholder: span.raw.to_string(),
    reason,
  };
  let field = parse_field(span.inner).map_err(unresolved)?;
  let mut value = dict.get(field.key).ok_or_else(|| FormatError::MissingKey {
    key: field.key.to_string(),
    placeholder: span.raw.to_string(),
  })?;
  for accessor in &field.accessors {
    value = access(value, accessor).map_err(unresolved)?;
  }
  let spec = parse_spec(field.spec).map_err(unresolved)?;
  let rendered = match field.conversion {
    Some(Conversion::Str) => apply_to_str(&spec, &pyrepr::to_display(value)),
    Some(Conversion::Repr) => apply_to_str(&spec, &pyrepr::to_repr(value)),
    Some(Conversion::Ascii) => apply_to_str(&spec, &pyrepr::to_ascii(value)),
    None => apply_spec(&spec, value),
  };
  rendered.map_err(unresolved)
}

fn access<'v>(value: &'v FormatValue, accessor: &Accessor<'_>) -> Result<&'v FormatValue, String> {
  match (accessor, value) {
    (Accessor::Attribute(name), Value::Object(map)) => map
      .get(*name)
      .ok_or_else(|| format!("no attribute {name:?}")),
    (Accessor::Index(index), Value::Array(items)) => {
      let i: usize = index
        .parse()
        .map_err(|_| format!("list indices must be integers, not {index:?}"))?;
      items
        .get(i)
        .ok_or_else(|| format!("list index {i} out of range"))
    }
    (Accessor::Index(index), Value::Object(map)) => {
      map.get(*index).ok_or_else(|| format!("no item {index:?}"))
    }
    (Accessor::Attribute(name), other) => Err(format!(
      "{} object has no attribute {name:?}",
      pyrepr::type_name(other)
    )),
    (Accessor::Index(_), other) => Err(format!(
      "{} object is not subscriptable",
      pyrepr::type_name(other)
    )),
  }
}
