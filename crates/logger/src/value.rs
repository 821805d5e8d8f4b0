//! crates/logger/src/value.rs
//! Argument model: every value handed to a severity method is either a
//! primitive that contributes to the message text or a structured value that
//! is carried through untouched.

use std::fmt::{self, Write as _};

use serde_json::Value;

use crate::levels::{Level, PseudoLevel, Severity};

/// Scalar argument rendered into a message's text.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A string, rendered verbatim.
    Str(String),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean, rendered as `true`/`false`.
    Bool(bool),
    /// A named symbol, rendered as `Symbol(name)`.
    Symbol(String),
}

impl Primitive {
    /// Appends the textual form of the value to `out`.
    pub fn render_into(&self, out: &mut String) {
        match self {
            Self::Str(text) => out.push_str(text),
            Self::Int(value) => {
                let _ = write!(out, "{value}");
            }
            Self::Float(value) => render_float(*value, out),
            Self::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            Self::Symbol(name) => {
                out.push_str("Symbol(");
                out.push_str(name);
                out.push(')');
            }
        }
    }

    /// Converts the primitive into a JSON value.
    ///
    /// Non-finite floats have no JSON number form and become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Str(text) => Value::String(text.clone()),
            Self::Int(value) => Value::from(*value),
            Self::Float(value) => serde_json::Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::Bool(value) => Value::Bool(*value),
            Self::Symbol(_) => Value::String(self.to_string()),
        }
    }
}

/// Renders floats the way a dynamic language prints numbers: plain decimals
/// for magnitudes in `[1e-6, 1e21)`, shortest exponent form (`1e+21`,
/// `1e-7`) outside it.
fn render_float(value: f64, out: &mut String) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    } else if value == 0.0 {
        out.push('0');
    } else if (1e-6..1e21).contains(&value.abs()) {
        let _ = write!(out, "{value}");
    } else {
        let exponent = format!("{value:e}");
        match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                let _ = write!(out, "{mantissa}e+{power}");
            }
            _ => out.push_str(&exponent),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = String::new();
        self.render_into(&mut rendered);
        f.write_str(&rendered)
    }
}

/// Non-scalar argument preserved in a message's structured arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum StructuredArg {
    /// An explicit null.
    Null,
    /// A missing value.
    Undefined,
    /// A callable, identified by name.
    Function(String),
    /// A JSON array or object.
    Json(Value),
}

impl StructuredArg {
    /// Converts the value into JSON.
    ///
    /// `Null` and `Undefined` both become `null`; functions become the string
    /// `[Function: name]`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null | Self::Undefined => Value::Null,
            Self::Function(_) => Value::String(self.to_string()),
            Self::Json(value) => value.clone(),
        }
    }
}

impl fmt::Display for StructuredArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
            Self::Function(name) if name.is_empty() => f.write_str("[Function (anonymous)]"),
            Self::Function(name) => write!(f, "[Function: {name}]"),
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}

/// A single argument passed to a severity method.
///
/// The classification happens when the argument is built, so the parser only
/// has to match on the variant.
///
/// # Examples
///
/// ```
/// use logger::{Arg, Primitive, StructuredArg};
/// use serde_json::json;
///
/// assert!(Arg::from("ready").is_primitive());
/// assert!(Arg::from(3.5).is_primitive());
/// assert!(!Arg::from(json!({"x": 1})).is_primitive());
/// assert_eq!(Arg::from(json!("text")), Arg::Primitive(Primitive::Str("text".into())));
/// assert_eq!(Arg::from(json!(null)), Arg::Structured(StructuredArg::Null));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// Contributes to the message text.
    Primitive(Primitive),
    /// Carried in the message's structured arguments.
    Structured(StructuredArg),
}

impl Arg {
    /// Builds a symbol argument.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primitive(Primitive::Symbol(name.into()))
    }

    /// Builds a function argument identified by `name`.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::Structured(StructuredArg::Function(name.into()))
    }

    /// Builds a null argument.
    #[must_use]
    pub const fn null() -> Self {
        Self::Structured(StructuredArg::Null)
    }

    /// Builds an undefined argument.
    #[must_use]
    pub const fn undefined() -> Self {
        Self::Structured(StructuredArg::Undefined)
    }

    /// Reports whether the argument contributes to the message text.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Returns the string payload of a string argument.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Primitive(Primitive::Str(text)) => Some(text),
            _ => None,
        }
    }

    /// Converts the argument into JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Primitive(primitive) => primitive.to_json(),
            Self::Structured(structured) => structured.to_json(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => fmt::Display::fmt(primitive, f),
            Self::Structured(structured) => fmt::Display::fmt(structured, f),
        }
    }
}

impl From<Primitive> for Arg {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<StructuredArg> for Arg {
    fn from(value: StructuredArg) -> Self {
        Self::Structured(value)
    }
}

impl From<&Arg> for Arg {
    fn from(value: &Arg) -> Self {
        value.clone()
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Primitive(Primitive::Str(value.to_owned()))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Primitive(Primitive::Str(value))
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Primitive(Primitive::Str(value.clone()))
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Self::Primitive(Primitive::Str(value.to_string()))
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Primitive(Primitive::Bool(value))
    }
}

macro_rules! arg_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Primitive(Primitive::Int(i64::from(value)))
                }
            }
        )+
    };
}

arg_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! arg_from_wide_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    i64::try_from(value).map_or_else(
                        |_| Self::Primitive(Primitive::Float(value as f64)),
                        |value| Self::Primitive(Primitive::Int(value)),
                    )
                }
            }
        )+
    };
}

arg_from_wide_int!(u64, usize, isize);

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::Primitive(Primitive::Float(f64::from(value)))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Primitive(Primitive::Float(value))
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::null(),
            Value::Bool(flag) => Self::from(flag),
            Value::String(text) => Self::from(text),
            Value::Number(number) => number.as_i64().map_or_else(
                || Self::Primitive(Primitive::Float(number.as_f64().unwrap_or(f64::NAN))),
                |value| Self::Primitive(Primitive::Int(value)),
            ),
            value @ (Value::Array(_) | Value::Object(_)) => Self::Structured(StructuredArg::Json(value)),
        }
    }
}

impl From<Level> for Arg {
    fn from(level: Level) -> Self {
        Self::Primitive(Primitive::Int(i64::from(level.code())))
    }
}

impl From<PseudoLevel> for Arg {
    fn from(pseudo: PseudoLevel) -> Self {
        Self::Primitive(Primitive::Int(i64::from(pseudo.code())))
    }
}

impl From<Severity> for Arg {
    fn from(severity: Severity) -> Self {
        Self::Primitive(Primitive::Int(i64::from(severity.code())))
    }
}
