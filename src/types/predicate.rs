use std::fmt;

use super::comparator::Comparator;
use super::event::{Event, EventArgs};

/// A named-field comparison: `<field> <comparator> <literal>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: String,
    comparator: Comparator,
}

impl Predicate {
    #[must_use]
    pub fn new(field: &str, comparator: Comparator) -> Self {
        Self {
            field: field.to_owned(),
            comparator,
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Evaluate against one occurrence of `event`. An undeclared or absent
    /// field makes the predicate false.
    #[must_use]
    pub fn test(&self, event: &Event, args: &EventArgs) -> bool {
        crate::evaluate::test_predicate(self, event, args)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.comparator)
    }
}
