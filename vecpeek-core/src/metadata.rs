//! Record metadata as stored by the engine.
//!
//! Engines hand back metadata as loosely typed JSON: usually a key-value
//! mapping, sometimes a bare scalar, often null. [`Metadata`] resolves that
//! shape once so the normalizer can match on it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Metadata attached to a record.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vecpeek_core::Metadata;
///
/// let meta = Metadata::from_value(Some(json!({"color": "red"})));
/// assert_eq!(meta.get_str("color"), Some("red"));
///
/// assert_eq!(Metadata::from_value(Some(json!(null))), Metadata::Absent);
/// assert_eq!(
///     Metadata::from_value(Some(json!("note-A"))),
///     Metadata::Scalar(json!("note-A"))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Metadata {
    /// A key-value mapping; its keys become table columns.
    Mapping(Map<String, Value>),
    /// Any non-null value that is not a mapping.
    Scalar(Value),
    /// No metadata for this record.
    #[default]
    Absent,
}

impl Metadata {
    /// Resolves an engine-native metadata slot.
    ///
    /// A missing slot and JSON `null` are both [`Metadata::Absent`].
    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Metadata::Absent,
            Some(Value::Object(map)) => Metadata::Mapping(map),
            Some(other) => Metadata::Scalar(other),
        }
    }

    /// Creates an empty mapping.
    #[inline]
    pub fn mapping() -> Self {
        Metadata::Mapping(Map::new())
    }

    /// Adds a field. Chainable.
    ///
    /// A scalar or absent value is replaced by a fresh mapping first.
    pub fn with_field<K, V>(self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut map = match self {
            Metadata::Mapping(map) => map,
            _ => Map::new(),
        };
        map.insert(key.into(), value.into());
        Metadata::Mapping(map)
    }

    /// Gets a mapping field by key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Metadata::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Gets a mapping field as a string.
    #[inline]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    /// Returns true if there is no metadata.
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Metadata::Absent)
    }
}

impl From<Value> for Metadata {
    fn from(value: Value) -> Self {
        Metadata::from_value(Some(value))
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metadata::Mapping(map) => map.serialize(serializer),
            Metadata::Scalar(value) => value.serialize(serializer),
            Metadata::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(Metadata::from_value(value))
    }
}
