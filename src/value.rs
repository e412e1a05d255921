//! Typed property values and ordered property bags.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::parser::{parse_value, ParseError};

/// A single property value inferred from an attribute token.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PropValue {
    /// Infer a value from a trimmed token.
    ///
    /// `true`/`false` become booleans, decimal literals become numbers, and
    /// everything else is kept as text. `NaN` stays text; infinity is only
    /// recognized when spelled `Infinity` (optionally signed).
    ///
    /// ```rust
    /// use gsap_attr_core::PropValue;
    ///
    /// assert_eq!(PropValue::infer("true"), PropValue::Bool(true));
    /// assert_eq!(PropValue::infer("0.5"), PropValue::Number(0.5));
    /// assert_eq!(PropValue::infer("power2.out"), PropValue::Text("power2.out".into()));
    /// ```
    pub fn infer(token: &str) -> Self {
        match token {
            "true" => PropValue::Bool(true),
            "false" => PropValue::Bool(false),
            _ => match token.parse::<f64>() {
                Ok(n) if n.is_finite() || is_infinity_literal(token) => PropValue::Number(n),
                _ => PropValue::Text(token.to_string()),
            },
        }
    }

    /// Numeric payload, if this is a number.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean payload, if this is a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text payload, if this is a string.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn is_infinity_literal(token: &str) -> bool {
    token.strip_prefix(['+', '-']).unwrap_or(token) == "Infinity"
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

/// Ordered mapping from property name to value.
///
/// Keys keep the order in which the attribute declared them. Inserting an
/// existing key replaces the value in place.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PropertyBag {
    props: IndexMap<String, PropValue>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, returning the previous value for that key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropValue>,
    ) -> Option<PropValue> {
        self.props.insert(key.into(), value.into())
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Remove a property, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.props.shift_remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(|k| k.as_str())
    }

    /// Numeric value for `key`, if present and numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropValue::as_number)
    }
}

impl FromIterator<(String, PropValue)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (String, PropValue)>>(iter: I) -> Self {
        Self {
            props: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PropertyBag {
    type Item = (String, PropValue);
    type IntoIter = indexmap::map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.props.into_iter()
    }
}

/// Serializes in the delimited grammar: `x: 100; opacity: 0.5`.
impl fmt::Display for PropertyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.props.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

impl FromStr for PropertyBag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s)
    }
}
