use std::collections::BTreeSet;
use std::fmt;

use crate::parse::{literal, SyntaxError};

use super::value::Value;

/// Signature of the built-in comparator constructors.
pub type ComparatorCtor = fn(&str) -> Result<Comparator, SyntaxError>;

/// A typed comparison rule with its right-hand literal already parsed.
///
/// Left-hand values come from event arguments at evaluation time.
/// [`compare()`](Self::compare) is total: a type mismatch yields `false`.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparator {
    Equals(f64),
    GreaterThan(f64),
    GreaterOrEqual(f64),
    LessThan(f64),
    LessOrEqual(f64),
    /// Case-insensitive string prefix.
    Prefix(String),
    /// Case-insensitive string suffix.
    Postfix(String),
    /// Right-hand side is either a lowercased needle or a lowercased set.
    Contains(Value),
    /// Case-insensitive string equality.
    Is(String),
    /// Inclusive numeric bounds.
    InRange { lo: f64, hi: f64 },
}

impl Comparator {
    pub fn equals(right: &str) -> Result<Self, SyntaxError> {
        literal::parse_number(right).map(Comparator::Equals)
    }

    pub fn greater_than(right: &str) -> Result<Self, SyntaxError> {
        literal::parse_number(right).map(Comparator::GreaterThan)
    }

    pub fn greater_or_equal(right: &str) -> Result<Self, SyntaxError> {
        literal::parse_number(right).map(Comparator::GreaterOrEqual)
    }

    pub fn less_than(right: &str) -> Result<Self, SyntaxError> {
        literal::parse_number(right).map(Comparator::LessThan)
    }

    pub fn less_or_equal(right: &str) -> Result<Self, SyntaxError> {
        literal::parse_number(right).map(Comparator::LessOrEqual)
    }

    pub fn prefix(right: &str) -> Result<Self, SyntaxError> {
        Ok(Comparator::Prefix(right.to_lowercase()))
    }

    pub fn postfix(right: &str) -> Result<Self, SyntaxError> {
        Ok(Comparator::Postfix(right.to_lowercase()))
    }

    /// `[a, b]` builds a set to test the left value against; anything
    /// else is a substring or set-element needle.
    pub fn contains(right: &str) -> Result<Self, SyntaxError> {
        let right = right.to_lowercase();
        let value = match literal::parse_list(&right) {
            Some(items) => Value::Set(items),
            None => Value::String(right),
        };
        Ok(Comparator::Contains(value))
    }

    pub fn is(right: &str) -> Result<Self, SyntaxError> {
        Ok(Comparator::Is(right.to_lowercase()))
    }

    pub fn in_range(right: &str) -> Result<Self, SyntaxError> {
        let (lo, hi) = literal::parse_range(right)?;
        Ok(Comparator::InRange { lo, hi })
    }

    /// The symbols and constructors registered by
    /// [`PlatformBuilder::with_std_comparators()`](super::PlatformBuilder::with_std_comparators).
    #[must_use]
    pub fn standard() -> [(&'static str, ComparatorCtor); 10] {
        [
            ("=", Comparator::equals),
            (">", Comparator::greater_than),
            (">=", Comparator::greater_or_equal),
            ("<", Comparator::less_than),
            ("<=", Comparator::less_or_equal),
            ("PREFIX", Comparator::prefix),
            ("POSTFIX", Comparator::postfix),
            ("CONTAINS", Comparator::contains),
            ("IS", Comparator::is),
            ("IN RANGE", Comparator::in_range),
        ]
    }

    /// Compare `left` against the parsed right-hand literal.
    #[must_use]
    pub fn compare(&self, left: &Value) -> bool {
        match self {
            Comparator::Equals(right) => numeric(left, |l| l == *right),
            Comparator::GreaterThan(right) => numeric(left, |l| l > *right),
            Comparator::GreaterOrEqual(right) => numeric(left, |l| l >= *right),
            Comparator::LessThan(right) => numeric(left, |l| l < *right),
            Comparator::LessOrEqual(right) => numeric(left, |l| l <= *right),
            Comparator::InRange { lo, hi } => numeric(left, |l| *lo <= l && l <= *hi),
            Comparator::Prefix(right) => lowered(left).starts_with(right.as_str()),
            Comparator::Postfix(right) => lowered(left).ends_with(right.as_str()),
            Comparator::Is(right) => lowered(left) == *right,
            Comparator::Contains(right) => contains(left, right),
        }
    }

    /// The symbol this comparator is written with in scripts.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Equals(_) => "=",
            Comparator::GreaterThan(_) => ">",
            Comparator::GreaterOrEqual(_) => ">=",
            Comparator::LessThan(_) => "<",
            Comparator::LessOrEqual(_) => "<=",
            Comparator::Prefix(_) => "PREFIX",
            Comparator::Postfix(_) => "POSTFIX",
            Comparator::Contains(_) => "CONTAINS",
            Comparator::Is(_) => "IS",
            Comparator::InRange { .. } => "IN RANGE",
        }
    }
}

fn numeric(left: &Value, test: impl FnOnce(f64) -> bool) -> bool {
    left.as_number().is_some_and(test)
}

fn lowered(value: &Value) -> String {
    value.to_string().to_lowercase()
}

fn set_contains(set: &BTreeSet<String>, needle: &str) -> bool {
    set.iter().any(|item| item.to_lowercase() == needle)
}

fn contains(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Set(items), Value::String(needle)) => set_contains(items, needle),
        (Value::Set(items), Value::Set(options)) => {
            options.iter().any(|option| set_contains(items, option))
        }
        (scalar, Value::Set(options)) => options.contains(&lowered(scalar)),
        (scalar, Value::String(needle)) => lowered(scalar).contains(needle.as_str()),
        _ => false,
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol();
        match self {
            Comparator::Equals(v)
            | Comparator::GreaterThan(v)
            | Comparator::GreaterOrEqual(v)
            | Comparator::LessThan(v)
            | Comparator::LessOrEqual(v) => write!(f, "{symbol} {v}"),
            Comparator::Prefix(s) | Comparator::Postfix(s) | Comparator::Is(s) => {
                write!(f, "{symbol} {s}")
            }
            Comparator::Contains(Value::Set(items)) => {
                let joined: Vec<&str> = items.iter().map(String::as_str).collect();
                write!(f, "{symbol} [{}]", joined.join(","))
            }
            Comparator::Contains(v) => write!(f, "{symbol} {v}"),
            Comparator::InRange { lo, hi } => write!(f, "{symbol} [{lo},{hi}]"),
        }
    }
}
