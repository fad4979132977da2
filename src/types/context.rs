use super::event::{Event, EventArgs};
use super::platform::Platform;
use super::rule::Rule;
use super::value::Value;

/// One firing occurrence of an event: its name, target, argument values and
/// the rule currently being performed.
///
/// Event sources create a context per occurrence; the runtime binds
/// [`current_rule`](Self::current_rule) while a rule's action tree runs.
#[derive(Debug, Clone)]
pub struct EventContext<'a> {
    platform: &'a Platform,
    event_name: String,
    target: String,
    args: EventArgs,
    current_rule: Option<&'a Rule>,
}

impl<'a> EventContext<'a> {
    #[must_use]
    pub fn new(platform: &'a Platform, event_name: &str) -> Self {
        Self {
            platform,
            event_name: event_name.to_owned(),
            target: String::new(),
            args: EventArgs::new(),
            current_rule: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: &str) -> Self {
        target.clone_into(&mut self.target);
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: EventArgs) -> Self {
        self.args = args;
        self
    }

    /// Set one argument value, builder style.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.args.insert(name, value.into());
        self
    }

    #[must_use]
    pub fn platform(&self) -> &'a Platform {
        self.platform
    }

    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// The registered schema for this context's event, if any.
    #[must_use]
    pub fn event(&self) -> Option<&'a Event> {
        self.platform.event(&self.event_name)
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn args(&self) -> &EventArgs {
        &self.args
    }

    pub fn args_mut(&mut self) -> &mut EventArgs {
        &mut self.args
    }

    #[must_use]
    pub fn current_rule(&self) -> Option<&'a Rule> {
        self.current_rule
    }

    pub(crate) fn bind_rule(&mut self, rule: Option<&'a Rule>) {
        self.current_rule = rule;
    }

    /// Resolve every `${name}` placeholder in `text` through the
    /// platform's expression evaluators.
    #[must_use]
    pub fn interpolate(&self, text: &str) -> String {
        crate::evaluate::interpolate(text, self)
    }
}
