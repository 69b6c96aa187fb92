//! Immutable, key-validated substitution mapping.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::keys;

use super::FormatValue;

/// String-keyed mapping used as the substitution source of templates.
///
/// Cloning is cheap (shared `Arc`). There is no mutating API: every update
/// produces a new dict, so a dict handed to another node never changes under it.
/// Keys are validated whenever a dict is built.
#[derive(Clone, Default, PartialEq)]
pub struct FormatDict {
  entries: Arc<Map<String, Value>>,
}

impl FormatDict {
  /// Empty dict.
  pub fn new() -> Self {
    Self::default()
  }

  /// Wraps an owned JSON object after validating all of its keys.
  pub fn try_from_map(map: Map<String, Value>) -> Result<Self, FormatError> {
    keys::validate_keys(map.keys().map(String::as_str))?;
    Ok(Self {
      entries: Arc::new(map),
    })
  }

  /// Builds a dict from key/value pairs; later duplicates overwrite earlier ones.
  pub fn try_from_iter<K, I>(pairs: I) -> Result<Self, FormatError>
  where
    K: Into<String>,
    I: IntoIterator<Item = (K, FormatValue)>,
  {
    let map: Map<String, Value> = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
    Self::try_from_map(map)
  }

  pub fn get(&self, key: &str) -> Option<&FormatValue> {
    self.entries.get(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Keys in insertion order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  /// Entries in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &FormatValue)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// New dict with `key` inserted or overwritten. An existing key keeps its position.
  pub fn with_entry(&self, key: &str, value: FormatValue) -> Result<Self, FormatError> {
    self.merged([(key.to_string(), value)])
  }

  /// New dict with all `updates` applied in order. Every new key is validated and
  /// all violations are reported together; `self` is never touched.
  pub fn merged<I>(&self, updates: I) -> Result<Self, FormatError>
  where
    I: IntoIterator<Item = (String, FormatValue)>,
  {
    let updates: Vec<(String, FormatValue)> = updates.into_iter().collect();
    keys::validate_keys(updates.iter().map(|(k, _)| k.as_str()))?;
    if updates.is_empty() {
      return Ok(self.clone());
    }
    let mut map = (*self.entries).clone();
    for (k, v) in updates {
      map.insert(k, v);
    }
    Ok(Self {
      entries: Arc::new(map),
    })
  }

  /// Copy with keys in ascending order.
  pub fn sorted(&self) -> Self {
    let mut pairs: Vec<(&String, &Value)> = self.entries.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    let map: Map<String, Value> = pairs
      .into_iter()
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect();
    Self {
      entries: Arc::new(map),
    }
  }

  /// Borrowed view of the entries.
  pub fn as_map(&self) -> &Map<String, Value> {
    &self.entries
  }

  /// Owned plain copy of the entries.
  pub fn to_plain(&self) -> Map<String, Value> {
    (*self.entries).clone()
  }

  /// The dict as a JSON object value.
  pub fn to_value(&self) -> Value {
    Value::Object(self.to_plain())
  }
}

impl fmt::Debug for FormatDict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.entries.iter()).finish()
  }
}

impl TryFrom<Map<String, Value>> for FormatDict {
  type Error = FormatError;

  fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
    Self::try_from_map(map)
  }
}

impl TryFrom<Value> for FormatDict {
  type Error = FormatError;

  fn try_from(value: Value) -> Result<Self, Self::Error> {
    keys::validate_mapping(&value)
  }
}

impl Serialize for FormatDict {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.entries.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for FormatDict {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let map = Map::<String, Value>::deserialize(deserializer)?;
    Self::try_from_map(map).map_err(serde::de::Error::custom)
  }
}
