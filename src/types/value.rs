use std::collections::BTreeSet;
use std::fmt;

/// Values carried by event arguments and produced by expression evaluators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A UTF-8 string.
    String(String),
    /// A set of strings, e.g. chat badges.
    Set(BTreeSet<String>),
}

/// The declared type of an event property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    String,
    Set,
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::Set(_) => ValueKind::Set,
        }
    }

    /// Numeric view used by the ordering comparators.
    /// Only `Int` and `Float` are numeric; everything else is `None`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            Value::Set(v) => Some(v),
            _ => None,
        }
    }
}

/// Largest magnitude below which every integer is exactly representable as
/// a double.
const MAX_EXACT_FLOAT_INT: u64 = 1 << f64::MANTISSA_DIGITS;

/// 2^63 as a double: integral doubles in `[-2^63, 2^63)` fit an `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl ValueKind {
    /// Convert `value` into this kind if the conversion is lossless.
    /// Integers within +/-2^53 widen to doubles; integral doubles within the
    /// `i64` range narrow to integers.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn coerce(self, value: Value) -> Option<Value> {
        match (self, value) {
            (ValueKind::Float, Value::Int(v)) if v.unsigned_abs() <= MAX_EXACT_FLOAT_INT => {
                Some(Value::Float(v as f64))
            }
            (ValueKind::Int, Value::Float(v))
                if v.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&v) =>
            {
                Some(Value::Int(v as i64))
            }
            (kind, value) if value.kind() == kind => Some(value),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<S: Into<String>> FromIterator<S> for Value {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Value::Set(iter.into_iter().map(Into::into).collect())
    }
}

/// Plain-text rendering, used when a value is interpolated into a group
/// or coerced to a string by a comparator.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Set(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(item)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "integer",
            ValueKind::Float => "double",
            ValueKind::Bool => "boolean",
            ValueKind::String => "string",
            ValueKind::Set => "set of strings",
        };
        f.write_str(name)
    }
}
