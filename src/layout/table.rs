//! The tabular data model: column schema and read-only rows.

use crate::units::Pt;
use std::fmt;

/// Separator placed between the parts of a [ColumnSource::Composite] column
pub const COMPOSITE_SEPARATOR: &str = " / ";

/// A scalar cell value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Null,
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(text) => text.is_empty(),
            Value::Number(_) => false,
            Value::Null => true,
        }
    }

    /// The numeric reading of the value, if it has one. Text is parsed after
    /// trimming whitespace.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(text) => text.trim().parse().ok(),
            Value::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// An ordered mapping from field key to value. Rows are never modified by
/// the layout engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    /// Set a field, replacing any previous value for the same key but keeping
    /// its position
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Row {
        self.set(key, value);
        self
    }

    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.set(key, value);
        }
        row
    }
}

/// Where a column takes its text from
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnSource {
    /// A single field, stringified
    Single(String),
    /// Several fields; the non-empty ones are joined with [COMPOSITE_SEPARATOR]
    Composite(Vec<String>),
}

/// One column of the table. The set of columns is fixed for a whole render.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSpec {
    pub header: String,
    pub width: Pt,
    pub source: ColumnSource,
}

impl ColumnSpec {
    /// A column showing a single field
    pub fn single<H: ToString, K: ToString>(header: H, width: Pt, key: K) -> ColumnSpec {
        ColumnSpec {
            header: header.to_string(),
            width,
            source: ColumnSource::Single(key.to_string()),
        }
    }

    /// A column showing several fields joined together
    pub fn composite<H, I, K>(header: H, width: Pt, keys: I) -> ColumnSpec
    where
        H: ToString,
        I: IntoIterator<Item = K>,
        K: ToString,
    {
        ColumnSpec {
            header: header.to_string(),
            width,
            source: ColumnSource::Composite(keys.into_iter().map(|k| k.to_string()).collect()),
        }
    }

    /// The text this column shows for `row`. Missing fields read as empty.
    pub fn resolve(&self, row: &Row) -> String {
        match &self.source {
            ColumnSource::Single(key) => row.get(key).map(ToString::to_string).unwrap_or_default(),
            ColumnSource::Composite(keys) => keys
                .iter()
                .filter_map(|key| row.get(key))
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(COMPOSITE_SEPARATOR),
        }
    }
}
