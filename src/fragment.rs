//! # Configuration Fragments
//!
//! A [`Fragment`] is one unit of configuration contributed by choosing one
//! option on one axis, e.g. "choosing the Vulkan renderer adds a dependency
//! and a version tag". It is an insertion-ordered mapping from field name to
//! a [`Value`], and field order is preserved all the way to the emitted
//! manifest.
//!
//! Values come in exactly three kinds, resolved once when the fragment is
//! built:
//!
//! - **Scalar**: a single string (`"targetType": "staticLibrary"`)
//! - **Sequence**: an ordered list of strings (`"versions": ["GL_30"]`)
//! - **Nested**: another fragment (`"dependencies": {"erupted": "~>2.1"}`)
//!
//! Anything else found in a matrix file (numbers, booleans, null, lists of
//! mappings, non-string keys) is rejected by [`Fragment::from_yaml`] with
//! [`Error::MalformedField`], so the merge engine never has to guess.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};

/// The kind of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Sequence,
    Nested,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Scalar => f.write_str("scalar"),
            ValueKind::Sequence => f.write_str("sequence"),
            ValueKind::Nested => f.write_str("nested fragment"),
        }
    }
}

/// A single field value inside a [`Fragment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A plain string; the later value wins on merge.
    Scalar(String),
    /// An ordered list of strings; merged by concatenation.
    Sequence(Vec<String>),
    /// A nested fragment; merged recursively.
    Nested(Fragment),
}

impl Value {
    /// Build a sequence value from anything yielding strings.
    pub fn sequence<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Nested(_) => ValueKind::Nested,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Fragment> {
        match self {
            Value::Nested(fragment) => Some(fragment),
            _ => None,
        }
    }

    /// Convert a YAML value, reporting problems against `path`.
    fn from_yaml(value: &YamlValue, path: &str) -> Result<Self> {
        match value {
            YamlValue::String(s) => Ok(Value::Scalar(s.clone())),
            YamlValue::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    YamlValue::String(s) => Ok(s.clone()),
                    other => Err(Error::MalformedField {
                        path: format!("{}[{}]", path, idx),
                        message: format!(
                            "sequence items must be strings, found {}",
                            describe_yaml(other)
                        ),
                    }),
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            YamlValue::Mapping(_) => Fragment::from_yaml_at(value, path).map(Value::Nested),
            other => Err(Error::MalformedField {
                path: path.to_string(),
                message: format!(
                    "expected a string, a list of strings or a mapping, found {}",
                    describe_yaml(other)
                ),
            }),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Fragment> for Value {
    fn from(fragment: Fragment) -> Self {
        Value::Nested(fragment)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(s) => serializer.serialize_str(s),
            Value::Sequence(items) => serializer.collect_seq(items),
            Value::Nested(fragment) => fragment.serialize(serializer),
        }
    }
}

/// An insertion-ordered mapping from field name to [`Value`].
///
/// Fragments are small (a handful of fields), so lookups scan a vector;
/// this keeps field order stable without an extra map type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    fields: Vec<(String, Value)>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests and benches.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value.into());
        self
    }

    /// Insert a field, replacing (in place) any previous value.
    ///
    /// Returns the replaced value. A new field is appended at the end.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((field, value));
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a fragment from a YAML mapping.
    ///
    /// `path` names the fragment in error messages (e.g. `axis 'renderer'
    /// option 'Vulkan'`); nested fields are reported as dotted paths below it.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedField` if the value is not a mapping, a key is
    /// not a string, or any field holds a value outside the three supported
    /// kinds.
    pub fn from_yaml(value: &YamlValue, path: &str) -> Result<Self> {
        Self::from_yaml_at(value, path)
    }

    #[cfg(test)]
    pub(crate) fn from_yaml_str(text: &str) -> Result<Self> {
        let value: YamlValue = serde_yaml::from_str(text)?;
        Self::from_yaml(&value, "fragment")
    }

    fn from_yaml_at(value: &YamlValue, path: &str) -> Result<Self> {
        let mapping = match value {
            YamlValue::Mapping(mapping) => mapping,
            other => {
                return Err(Error::MalformedField {
                    path: path.to_string(),
                    message: format!("expected a mapping, found {}", describe_yaml(other)),
                })
            }
        };

        let mut fragment = Fragment::new();
        for (key, value) in mapping {
            let field = match key {
                YamlValue::String(s) => s.as_str(),
                other => {
                    return Err(Error::MalformedField {
                        path: path.to_string(),
                        message: format!("field names must be strings, found {}", describe_yaml(other)),
                    })
                }
            };
            let field_path = format!("{}.{}", path, field);
            fragment.insert(field, Value::from_yaml(value, &field_path)?);
        }
        Ok(fragment)
    }
}

impl Serialize for Fragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

fn describe_yaml(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}
