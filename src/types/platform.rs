use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::parse::SyntaxError;

use super::action::ActionPlugin;
use super::comparator::Comparator;
use super::context::EventContext;
use super::event::Event;
use super::value::Value;

/// Builds an action plugin from the words following its name.
pub type ActionFactory =
    Arc<dyn Fn(&Platform, &[String]) -> Result<Box<dyn ActionPlugin>, SyntaxError> + Send + Sync>;

/// Resolves a `${name}` placeholder. Receives the placeholder name and the
/// firing context; `None` renders as an empty string.
pub type ExpressionEvaluator = Arc<dyn Fn(&str, &EventContext<'_>) -> Option<Value> + Send + Sync>;

/// Builds a comparator from a predicate's raw right-hand text.
pub type ComparatorFactory = Arc<dyn Fn(&str) -> Result<Comparator, SyntaxError> + Send + Sync>;

/// Builder for a [`Platform`].
///
/// Registering a name twice keeps the last registration and logs a
/// warning. Action names and comparator symbols are case-insensitive;
/// expression and event names are case-sensitive.
///
/// # Example
///
/// ```
/// use streamrule::{Event, PlatformBuilder, Property};
///
/// let platform = PlatformBuilder::new("demo")
///     .with_std_comparators()
///     .with_std_expressions()
///     .event(Event::new("Donation").with_property(Property::float("amount")))
///     .build();
///
/// assert!(platform.comparator_factory("in range").is_some());
/// assert!(platform.event("Donation").is_some());
/// ```
#[must_use]
pub struct PlatformBuilder {
    platform: Platform,
}

impl PlatformBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            platform: Platform {
                name: name.to_owned(),
                actions: HashMap::new(),
                expressions: HashMap::new(),
                comparators: HashMap::new(),
                events: HashMap::new(),
            },
        }
    }

    /// Register an action factory under `name`.
    pub fn action(
        mut self,
        name: &str,
        factory: impl Fn(&Platform, &[String]) -> Result<Box<dyn ActionPlugin>, SyntaxError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        let key = name.to_uppercase();
        if key == "IF" {
            warn!("action 'IF' is shadowed by the built-in conditional");
        }
        if self.platform.actions.insert(key, Arc::new(factory)).is_some() {
            warn!(name, "action re-registered, keeping the last registration");
        }
        self
    }

    /// Register an expression evaluator for `${name}` placeholders.
    pub fn expression(
        mut self,
        name: &str,
        evaluator: impl Fn(&str, &EventContext<'_>) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        let evaluator: ExpressionEvaluator = Arc::new(evaluator);
        if self
            .platform
            .expressions
            .insert(name.to_owned(), evaluator)
            .is_some()
        {
            warn!(name, "expression re-registered, keeping the last registration");
        }
        self
    }

    /// Register a comparator factory under `symbol` (e.g. `"IN RANGE"`).
    pub fn comparator(
        mut self,
        symbol: &str,
        factory: impl Fn(&str) -> Result<Comparator, SyntaxError> + Send + Sync + 'static,
    ) -> Self {
        let key = normalize_symbol(symbol);
        if self.platform.comparators.insert(key, Arc::new(factory)).is_some() {
            warn!(symbol, "comparator re-registered, keeping the last registration");
        }
        self
    }

    pub fn event(mut self, event: Event) -> Self {
        let name = event.name().to_owned();
        if self.platform.events.insert(name.clone(), event).is_some() {
            warn!(%name, "event re-registered, keeping the last registration");
        }
        self
    }

    /// Register the ten built-in comparators.
    pub fn with_std_comparators(self) -> Self {
        Comparator::standard()
            .into_iter()
            .fold(self, |builder, (symbol, ctor)| builder.comparator(symbol, ctor))
    }

    /// Register `${event}` (event name) and `${target}` (context target).
    pub fn with_std_expressions(self) -> Self {
        self.expression("event", |_, ctx| Some(Value::from(ctx.event_name())))
            .expression("target", |_, ctx| Some(Value::from(ctx.target())))
    }

    /// Freeze the registrations.
    #[must_use]
    pub fn build(self) -> Platform {
        self.platform
    }
}

/// Registry of the extension points a script is parsed and performed with:
/// actions, expressions, comparators and events.
///
/// Immutable once built and `Send + Sync`, so one platform can back any
/// number of concurrent parses and firings. Several platforms can coexist
/// in one process.
pub struct Platform {
    name: String,
    actions: HashMap<String, ActionFactory>,
    expressions: HashMap<String, ExpressionEvaluator>,
    comparators: HashMap<String, ComparatorFactory>,
    events: HashMap<String, Event>,
}

impl Platform {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive action lookup.
    #[must_use]
    pub fn action_factory(&self, name: &str) -> Option<&ActionFactory> {
        self.actions.get(&name.to_uppercase())
    }

    #[must_use]
    pub fn expression(&self, name: &str) -> Option<&ExpressionEvaluator> {
        self.expressions.get(name)
    }

    /// Case-insensitive comparator lookup. Runs of whitespace inside the
    /// symbol are treated as a single space.
    #[must_use]
    pub fn comparator_factory(&self, symbol: &str) -> Option<&ComparatorFactory> {
        self.comparators.get(&normalize_symbol(symbol))
    }

    #[must_use]
    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.get(name)
    }
}

fn normalize_symbol(symbol: &str) -> String {
    symbol
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("name", &self.name)
            .field("actions", &sorted_keys(&self.actions))
            .field("expressions", &sorted_keys(&self.expressions))
            .field("comparators", &sorted_keys(&self.comparators))
            .field("events", &sorted_keys(&self.events))
            .finish()
    }
}
