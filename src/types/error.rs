use thiserror::Error;

use super::value::ValueKind;

/// Errors raised while performing an action tree.
///
/// A `PerformingError` aborts the firing of the rule whose action raised it;
/// [`Ruleset::perform()`](super::Ruleset::perform) keeps firing the
/// remaining rules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerformingError {
    #[error("cannot perform {action} action outside of a rule")]
    OutsideRule { action: String },

    #[error("unknown event '{event}'")]
    UnknownEvent { event: String },

    #[error("action '{action}' failed: {message}")]
    Failed { action: String, message: String },

    #[error("task #{index} failed: {message}")]
    TaskFailed { index: usize, message: String },

    #[error("task runner worker panicked")]
    TaskPanicked,
}

impl PerformingError {
    /// Shorthand for plugins signalling their own failure.
    pub fn failed(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            action: action.into(),
            message: message.into(),
        }
    }
}

/// Raised when a value written through a [`Property`](super::Property)
/// does not match the property's declared type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("property '{property}' expects {expected}, got {found}")]
pub struct PropertyError {
    pub property: String,
    pub expected: ValueKind,
    pub found: ValueKind,
}
