//! # Field Values
//!
//! The dynamic value model shared by rules and records.
//!
//! Form fields are written with whatever the input layer hands over: most
//! often raw text, sometimes a number or boolean from a pre-filled record,
//! and sometimes nothing at all. [`FieldValue`] captures every one of those
//! shapes, and [`FieldValue::to_number`] defines how loosely a value may be
//! read as a number.
//!
//! ## Numeric Coercion
//!
//! Coercion follows the rules browsers apply to form input:
//!
//! ```text
//! Undefined        -> NaN
//! Null             -> 0
//! Bool             -> 0 / 1
//! Number(n)        -> n
//! String(s)        -> parse_number(s)     ("" and "  " are 0)
//! Array([])        -> 0
//! Array([x])       -> coercion of x's string form
//! Array([x, y..])  -> NaN
//! Object           -> NaN
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A dynamically typed field value.
///
/// Serializes as plain JSON. `Undefined` has no JSON counterpart and
/// serializes as `null`; deserializing `null` always yields `Null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. All numbers are stored as `f64`.
    Number(f64),
    /// A string, typically unparsed user input.
    String(String),
    /// An ordered list of values.
    Array(Vec<FieldValue>),
    /// A string-keyed map of values.
    Object(BTreeMap<String, FieldValue>),
    /// No value was supplied for the field.
    #[default]
    Undefined,
}

impl FieldValue {
    /// The runtime type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Undefined => "undefined",
        }
    }

    /// Whether this value is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Whether this value is `Undefined`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Whether this value counts as "not provided": undefined, null, or the
    /// empty string. Whitespace-only strings are provided.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Borrow the inner string, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Loosely coerce this value to a number. Returns NaN when the value
    /// has no numeric reading.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Number(n) => *n,
            Self::String(s) => parse_number(s),
            Self::Array(items) => match items.as_slice() {
                [] => 0.0,
                [only] => only.element_number(),
                _ => f64::NAN,
            },
            Self::Object(_) => f64::NAN,
        }
    }

    /// Coercion of a value that sits alone inside an array. The array's
    /// numeric reading goes through the element's string form, where
    /// null and undefined render as the empty string and booleans as words.
    fn element_number(&self) -> f64 {
        match self {
            Self::Undefined | Self::Null => 0.0,
            Self::Bool(_) | Self::Object(_) => f64::NAN,
            other => other.to_number(),
        }
    }
}

/// Parse text as a number the way form input is read.
///
/// Surrounding whitespace is ignored and blank text reads as 0. Accepted
/// forms are decimal literals with optional sign, fraction and exponent,
/// `Infinity` with optional sign, and unsigned `0x`, `0o` and `0b` literals.
/// Anything else is NaN.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_matches(is_input_whitespace);
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(s) {
        return value;
    }

    // `f64::from_str` also accepts "inf" and "nan", which are not numbers here.
    let decimal_only = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_only {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Whitespace ignored around numeric text: tab, vertical tab, form feed,
/// line terminators, the byte order mark and the `Zs` space separators.
/// Unlike `char::is_whitespace`, U+0085 (NEL) is not included.
fn is_input_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Parse a `0x`/`0o`/`0b` literal. Returns `None` when `s` has no radix
/// prefix, and `Some(NaN)` when the digits are invalid for the radix.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut value = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

// ─── Conversions ─────────────────────────────────────────────────────

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
