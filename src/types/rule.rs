use std::fmt;

use tracing::{debug, trace};

use super::action::Action;
use super::context::EventContext;
use super::error::PerformingError;
use super::predicate::Predicate;

/// Outcome of a rule whose predicates held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firing {
    /// What the action tree reported. `false` means it declined to act.
    pub performed: bool,
    pub output: Vec<String>,
}

/// One event-triggered unit: an action tree guarded by a conjunction of
/// predicates, bound to an event by name.
///
/// The event is resolved against the platform when the rule fires, so a
/// rule may name an event that is registered later (or never, in which case
/// firing it reports [`PerformingError::UnknownEvent`]).
#[derive(Debug)]
pub struct Rule {
    event_name: String,
    action: Action,
    predicates: Vec<Predicate>,
    line: Option<usize>,
}

impl Rule {
    #[must_use]
    pub fn new(event_name: &str, action: Action) -> Self {
        Self {
            event_name: event_name.to_owned(),
            action,
            predicates: Vec::new(),
            line: None,
        }
    }

    /// Add a predicate; all predicates must hold for the rule to fire.
    #[must_use]
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    #[must_use]
    pub(crate) fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Source line of the rule's `ON` clause, when parsed from a script.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Whether this rule would fire for `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`PerformingError::UnknownEvent`] if the context targets this
    /// rule's event but no such event is registered.
    pub fn matches(&self, ctx: &EventContext<'_>) -> Result<bool, PerformingError> {
        if ctx.event_name() != self.event_name {
            return Ok(false);
        }
        let event = ctx.platform().event(&self.event_name).ok_or_else(|| {
            PerformingError::UnknownEvent {
                event: self.event_name.clone(),
            }
        })?;
        Ok(crate::evaluate::test_all(&self.predicates, event, ctx.args()))
    }

    /// Fire this rule: test its predicates and, if they all hold, perform
    /// its action with the rule bound to `ctx`.
    ///
    /// Returns `None` when the rule did not fire, otherwise the action
    /// tree's result and output lines.
    ///
    /// # Errors
    ///
    /// Returns [`PerformingError`] if the event is unknown or the action
    /// tree fails.
    pub fn perform<'a>(
        &'a self,
        ctx: &mut EventContext<'a>,
    ) -> Result<Option<Firing>, PerformingError> {
        if !self.matches(ctx)? {
            trace!(event = %self.event_name, "rule predicates not satisfied");
            return Ok(None);
        }

        debug!(event = %self.event_name, action = self.action.name(), "firing rule");
        let previous = ctx.current_rule();
        ctx.bind_rule(Some(self));
        let mut output = Vec::new();
        let result = self.action.perform(ctx, &mut output);
        ctx.bind_rule(previous);
        let performed = result?;
        if !performed {
            debug!(event = %self.event_name, action = self.action.name(), "action declined");
        }

        Ok(Some(Firing { performed, output }))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ON {}", self.action, self.event_name)?;
        for (i, predicate) in self.predicates.iter().enumerate() {
            let joiner = if i == 0 { "WITH" } else { "AND" };
            write!(f, " {joiner} {predicate}")?;
        }
        Ok(())
    }
}
