use std::fmt;

use tracing::warn;

use super::context::EventContext;
use super::performance::Performance;
use super::platform::Platform;
use super::rule::Rule;

/// An ordered, immutable collection of rules.
///
/// Thread-safe: rules are only read while firing, so one ruleset can serve
/// concurrent firings from behind an `Arc`, each with its own
/// [`EventContext`].
#[derive(Debug, Default)]
pub struct Ruleset {
    rules: Vec<Rule>,
}

impl Ruleset {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Lex and parse a script into a `Ruleset`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`](crate::SyntaxError) on the first malformed rule.
    pub fn parse_script(platform: &Platform, script: &str) -> Result<Self, crate::SyntaxError> {
        crate::parse::Parser::new(platform, crate::parse::tokenize(script)).parse()
    }

    /// Read a script file and parse it into a `Ruleset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`](crate::Error) on I/O or syntax failure.
    pub fn from_file(
        platform: &Platform,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::Error> {
        let script = std::fs::read_to_string(path)?;
        Ok(Self::parse_script(platform, &script)?)
    }

    /// Fire every rule bound to `ctx`'s event, in source order.
    ///
    /// A rule that fails does not stop later rules; its error is recorded
    /// in the returned [`Performance`].
    pub fn perform<'a>(&'a self, ctx: &mut EventContext<'a>) -> Performance {
        let mut performance = Performance::default();
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.event_name() != ctx.event_name() {
                continue;
            }
            match rule.perform(ctx) {
                Ok(Some(firing)) => performance.record_firing(index, firing),
                Ok(None) => {}
                Err(error) => {
                    warn!(rule = index, event = rule.event_name(), %error, "rule failed");
                    performance.record_failure(index, error);
                }
            }
        }
        performance
    }

    /// Rules bound to `event_name`, in source order.
    pub fn rules_for<'s>(&'s self, event_name: &'s str) -> impl Iterator<Item = &'s Rule> + 's {
        self.rules.iter().filter(move |r| r.event_name() == event_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for Ruleset {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ruleset({} rules)", self.rules.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Action, ActionPlugin, Comparator, Event, PerformingError, PlatformBuilder, Predicate,
        Property,
    };

    #[derive(Debug)]
    struct Emit(&'static str);

    impl ActionPlugin for Emit {
        fn perform(
            &self,
            _ctx: &EventContext<'_>,
            output: &mut Vec<String>,
        ) -> Result<bool, PerformingError> {
            output.push(self.0.to_owned());
            Ok(true)
        }
    }

    #[derive(Debug)]
    struct Fail;

    impl ActionPlugin for Fail {
        fn perform(
            &self,
            _ctx: &EventContext<'_>,
            _output: &mut Vec<String>,
        ) -> Result<bool, PerformingError> {
            Err(PerformingError::failed("FAIL", "nope"))
        }
    }

    #[derive(Debug)]
    struct Decline;

    impl ActionPlugin for Decline {
        fn perform(
            &self,
            _ctx: &EventContext<'_>,
            _output: &mut Vec<String>,
        ) -> Result<bool, PerformingError> {
            Ok(false)
        }
    }

    fn emit(text: &'static str) -> Action {
        Action::leaf("emit", vec![], Box::new(Emit(text)))
    }

    fn platform() -> Platform {
        PlatformBuilder::new("test")
            .event(Event::new("Donation").with_property(Property::float("amount")))
            .event(Event::new("Follow"))
            .build()
    }

    #[test]
    fn fires_matching_rules_in_source_order() {
        let platform = platform();
        let ruleset: Ruleset = [
            Rule::new("Donation", emit("first")),
            Rule::new("Follow", emit("skipped")),
            Rule::new("Donation", emit("second")),
        ]
        .into_iter()
        .collect();

        let mut ctx = EventContext::new(&platform, "Donation");
        let perf = ruleset.perform(&mut ctx);
        assert_eq!(perf.output(), ["first", "second"]);
        assert_eq!(perf.fired(), [0, 2]);
    }

    #[test]
    fn predicates_filter_rules() {
        let platform = platform();
        let big = Predicate::new("amount", Comparator::greater_or_equal("100").unwrap());
        let ruleset = Ruleset::new(vec![
            Rule::new("Donation", emit("big")).with_predicate(big),
            Rule::new("Donation", emit("any")),
        ]);

        let mut ctx = EventContext::new(&platform, "Donation").set("amount", 5.0);
        assert_eq!(ruleset.perform(&mut ctx).output(), ["any"]);

        let mut ctx = EventContext::new(&platform, "Donation").set("amount", 500.0);
        assert_eq!(ruleset.perform(&mut ctx).output(), ["big", "any"]);
    }

    #[test]
    fn failing_rule_does_not_block_later_rules() {
        let platform = platform();
        let ruleset = Ruleset::new(vec![
            Rule::new("Donation", Action::leaf("fail", vec![], Box::new(Fail))),
            Rule::new("Donation", emit("after")),
        ]);

        let mut ctx = EventContext::new(&platform, "Donation");
        let perf = ruleset.perform(&mut ctx);
        assert_eq!(perf.output(), ["after"]);
        assert_eq!(perf.failures().len(), 1);
        assert_eq!(perf.failures()[0].index, 0);
        assert!(ctx.current_rule().is_none());
    }

    #[test]
    fn declining_action_is_not_counted_as_fired() {
        let platform = platform();
        let ruleset = Ruleset::new(vec![
            Rule::new("Donation", Action::leaf("decline", vec![], Box::new(Decline))),
            Rule::new("Donation", emit("after")),
        ]);

        let mut ctx = EventContext::new(&platform, "Donation");
        let perf = ruleset.perform(&mut ctx);
        assert_eq!(perf.fired(), [1]);
        assert_eq!(perf.declined(), [0]);
        assert!(perf.is_success());
    }

    #[test]
    fn unknown_event_is_reported() {
        let platform = platform();
        let ruleset = Ruleset::new(vec![Rule::new("Raid", emit("never"))]);

        let mut ctx = EventContext::new(&platform, "Raid");
        let perf = ruleset.perform(&mut ctx);
        assert!(perf.output().is_empty());
        assert_eq!(
            perf.failures()[0].error,
            PerformingError::UnknownEvent {
                event: "Raid".into()
            }
        );
    }

    #[test]
    fn rules_for_filters_by_event() {
        let ruleset = Ruleset::new(vec![
            Rule::new("Donation", emit("a")),
            Rule::new("Follow", emit("b")),
            Rule::new("Donation", emit("c")),
        ]);
        assert_eq!(ruleset.rules_for("Donation").count(), 2);
        assert_eq!(ruleset.rules_for("Host").count(), 0);
        assert_eq!(ruleset.len(), 3);
        assert_eq!(ruleset.to_string(), "Ruleset(3 rules)");
    }
}
