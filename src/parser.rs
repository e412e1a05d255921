//! Directive value parsing.
//!
//! Two syntaxes share one entry point, [`parse_value`]:
//!
//! - Delimited: `"repeat: 2; yoyo: true"`
//! - Object: `"{repeat: 2, yoyo: true}"` (keys may be left unquoted)

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::{PropValue, PropertyBag};

/// Error type for object-syntax parsing.
///
/// The delimited grammar never fails; malformed pairs are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Value could not be read as JSON after key quoting
    #[error("invalid object syntax: {0}")]
    Json(String),
    /// Value parsed but is not an object
    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },
    /// A property holds null, an array or a nested object
    #[error("unsupported value for `{key}`: {found}")]
    UnsupportedValue { key: String, found: &'static str },
}

/// Grammar of a raw directive value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Syntax {
    /// `key: value; key: value`
    Delimited,
    /// `{key: value, key: value}`
    Object,
}

impl Syntax {
    /// Pick a grammar by looking at the first non-blank character.
    pub fn sniff(raw: &str) -> Self {
        if raw.trim_start().starts_with('{') {
            Syntax::Object
        } else {
            Syntax::Delimited
        }
    }
}

/// Parse a directive value with whichever grammar it is written in.
///
/// ## Example
///
/// ```rust
/// use gsap_attr_core::{parse_value, PropValue};
///
/// let delimited = parse_value("repeat: 2; yoyo: true").unwrap();
/// let object = parse_value("{repeat: 2, yoyo: true}").unwrap();
/// assert_eq!(delimited, object);
/// assert_eq!(delimited.get("repeat"), Some(&PropValue::Number(2.0)));
/// ```
pub fn parse_value(raw: &str) -> Result<PropertyBag, ParseError> {
    match Syntax::sniff(raw) {
        Syntax::Delimited => Ok(parse_delimited(raw)),
        Syntax::Object => parse_object(raw),
    }
}

/// Parse the `key: value; key: value` grammar.
///
/// Whitespace around `:` and `;` is trimmed. Pairs with a missing key or
/// value are dropped. There is no escaping: a pair is split on every `:`
/// and only the first two pieces are used.
///
/// ```rust
/// use gsap_attr_core::parser::parse_delimited;
///
/// let bag = parse_delimited("x: 100; : 5; opacity:; scale: 1.5;");
/// assert_eq!(bag.to_string(), "x: 100; scale: 1.5");
/// ```
pub fn parse_delimited(raw: &str) -> PropertyBag {
    let mut bag = PropertyBag::new();

    for item in raw.split(';') {
        let mut parts = item.split(':').map(str::trim);
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();

        if key.is_empty() || value.is_empty() {
            if !item.trim().is_empty() {
                debug!("skipping malformed pair {:?}", item.trim());
            }
            continue;
        }

        bag.insert(key, PropValue::infer(value));
    }

    bag
}

// String literals are matched first so their contents are never rewritten.
static UNQUOTED_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|([{,]\s*)([A-Za-z_$][\w$]*)\s*:"#)
        .expect("static pattern compiles")
});

/// Quote bare identifier keys so the value becomes valid JSON.
fn quote_keys(raw: &str) -> String {
    UNQUOTED_KEY
        .replace_all(raw, |caps: &Captures<'_>| match (caps.get(1), caps.get(2)) {
            (Some(lead), Some(key)) => format!("{}\"{}\":", lead.as_str(), key.as_str()),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Parse the `{key: value, ...}` grammar.
///
/// JSON numbers, booleans and strings map onto [`PropValue`] directly; string
/// contents are not re-inferred. Any error rejects the whole value.
///
/// ```rust
/// use gsap_attr_core::parser::{parse_object, ParseError};
/// use gsap_attr_core::PropValue;
///
/// let bag = parse_object(r#"{duration: 1.5, ease: "power2.out"}"#).unwrap();
/// assert_eq!(bag.get("ease"), Some(&PropValue::Text("power2.out".into())));
///
/// assert!(matches!(parse_object("{x: }"), Err(ParseError::Json(_))));
/// ```
pub fn parse_object(raw: &str) -> Result<PropertyBag, ParseError> {
    let quoted = quote_keys(raw);
    let json: JsonValue =
        serde_json::from_str(&quoted).map_err(|e| ParseError::Json(e.to_string()))?;

    let map = match json {
        JsonValue::Object(map) => map,
        other => {
            return Err(ParseError::NotAnObject {
                found: json_kind(&other),
            })
        }
    };

    let mut bag = PropertyBag::new();
    for (key, value) in map {
        let prop = match value {
            JsonValue::Bool(b) => PropValue::Bool(b),
            JsonValue::Number(n) => match n.as_f64() {
                Some(f) => PropValue::Number(f),
                None => {
                    return Err(ParseError::UnsupportedValue {
                        key,
                        found: "number",
                    })
                }
            },
            JsonValue::String(s) => PropValue::Text(s),
            other => {
                return Err(ParseError::UnsupportedValue {
                    found: json_kind(&other),
                    key,
                })
            }
        };
        bag.insert(key, prop);
    }

    Ok(bag)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimited() {
        let bag = parse_delimited("repeat: 2; yoyo: true; ease: power1.inOut;");
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.get("repeat"), Some(&PropValue::Number(2.0)));
        assert_eq!(bag.get("yoyo"), Some(&PropValue::Bool(true)));
        assert_eq!(bag.get("ease"), Some(&PropValue::Text("power1.inOut".into())));
    }

    #[test]
    fn test_parse_delimited_whitespace() {
        let bag = parse_delimited("  x :100 ;\n  y:   -20  ");
        assert_eq!(bag.number("x"), Some(100.0));
        assert_eq!(bag.number("y"), Some(-20.0));
    }

    #[test]
    fn test_parse_delimited_empty() {
        assert!(parse_delimited("").is_empty());
        assert!(parse_delimited(" ; ; ").is_empty());
        assert!(parse_value("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_delimited_skips_malformed_pairs() {
        let bag = parse_delimited("x: 10; nonsense; : 4; y: 20");
        let keys: Vec<&str> = bag.keys().collect();
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[test]
    fn test_parse_delimited_no_escaping() {
        // Only the segment between the first and second colon is kept.
        let bag = parse_delimited("url: http://example.com");
        assert_eq!(bag.get("url"), Some(&PropValue::Text("http".into())));

        let bag = parse_delimited("start: top 80%");
        assert_eq!(bag.get("start"), Some(&PropValue::Text("top 80%".into())));
    }

    #[test]
    fn test_sniff() {
        assert_eq!(Syntax::sniff("x: 1"), Syntax::Delimited);
        assert_eq!(Syntax::sniff("  {x: 1}"), Syntax::Object);
        assert_eq!(Syntax::sniff(""), Syntax::Delimited);
    }

    #[test]
    fn test_parse_object() {
        let bag = parse_object("{x: 100, opacity: 0.5, yoyo: false, ease: \"expo.out\"}").unwrap();
        let keys: Vec<&str> = bag.keys().collect();
        assert_eq!(keys, vec!["x", "opacity", "yoyo", "ease"]);
        assert_eq!(bag.number("opacity"), Some(0.5));
        assert_eq!(bag.get("yoyo"), Some(&PropValue::Bool(false)));
    }

    #[test]
    fn test_parse_object_quoted_keys() {
        let bag = parse_object(r#"{"x": 1, y: 2}"#).unwrap();
        assert_eq!(bag.number("x"), Some(1.0));
        assert_eq!(bag.number("y"), Some(2.0));
    }

    #[test]
    fn test_parse_object_string_contents_untouched() {
        let bag = parse_object(r#"{label: "a, b: c", x: 1}"#).unwrap();
        assert_eq!(bag.get("label"), Some(&PropValue::Text("a, b: c".into())));
        assert_eq!(bag.number("x"), Some(1.0));

        let raw = r#"{start: "top {center, y: 2", note: "say \"hi, z: 1\""}"#;
        let bag = parse_object(raw).unwrap();
        assert_eq!(bag.get("start"), Some(&PropValue::Text("top {center, y: 2".into())));
        assert_eq!(bag.get("note"), Some(&PropValue::Text("say \"hi, z: 1\"".into())));
    }

    #[test]
    fn test_parse_object_strings_not_inferred() {
        let bag = parse_object(r#"{markers: "true", x: "5"}"#).unwrap();
        assert_eq!(bag.get("markers"), Some(&PropValue::Text("true".into())));
        assert_eq!(bag.get("x"), Some(&PropValue::Text("5".into())));
    }

    #[test]
    fn test_parse_object_empty() {
        assert!(parse_object("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_object_errors() {
        assert!(matches!(parse_object("{x: 1,"), Err(ParseError::Json(_))));
        assert!(matches!(parse_object("{x: oops}"), Err(ParseError::Json(_))));
        assert_eq!(
            parse_object("{x: null}"),
            Err(ParseError::UnsupportedValue {
                key: "x".into(),
                found: "null"
            })
        );
        assert_eq!(
            parse_object("{x: [1, 2]}"),
            Err(ParseError::UnsupportedValue {
                key: "x".into(),
                found: "array"
            })
        );
    }

    #[test]
    fn test_parse_value_dispatch() {
        assert!(parse_value("{broken").is_err());
        // Delimited grammar swallows anything it cannot read.
        assert!(parse_value("broken}").unwrap().is_empty());
    }
}
