use std::fmt;

use super::error::PerformingError;
use super::rule::Firing;

/// A rule whose firing aborted with an error.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFailure {
    /// Position of the rule in its ruleset.
    pub index: usize,
    pub error: PerformingError,
}

/// Result of dispatching one event context through a
/// [`Ruleset`](super::Ruleset).
///
/// Contains the output lines of every fired rule in firing order, the
/// indices of the rules that fired or whose action declined, and the rules
/// that failed.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Performance {
    output: Vec<String>,
    fired: Vec<usize>,
    declined: Vec<usize>,
    failures: Vec<RuleFailure>,
}

impl Performance {
    pub(crate) fn record_firing(&mut self, index: usize, firing: Firing) {
        if firing.performed {
            self.fired.push(index);
        } else {
            self.declined.push(index);
        }
        self.output.extend(firing.output);
    }

    pub(crate) fn record_failure(&mut self, index: usize, error: PerformingError) {
        self.failures.push(RuleFailure { index, error });
    }

    /// Output lines produced by fired rules, in firing order.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    #[must_use]
    pub fn into_output(self) -> Vec<String> {
        self.output
    }

    /// Indices of rules that fired successfully, in source order.
    #[must_use]
    pub fn fired(&self) -> &[usize] {
        &self.fired
    }

    /// Indices of rules whose predicates held but whose action reported
    /// `false`.
    #[must_use]
    pub fn declined(&self) -> &[usize] {
        &self.declined
    }

    #[must_use]
    pub fn failures(&self) -> &[RuleFailure] {
        &self.failures
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rules fired, {} failed, {} output lines",
            self.fired.len(),
            self.failures.len(),
            self.output.len()
        )
    }
}
