mod action;
mod comparator;
mod context;
mod error;
mod event;
mod performance;
mod platform;
mod predicate;
mod rule;
mod ruleset;
mod value;

pub use action::{Action, ActionPlugin, IfAction, LeafAction};
pub use comparator::{Comparator, ComparatorCtor};
pub use context::EventContext;
pub use error::{PerformingError, PropertyError};
pub use event::{Event, EventArgs, Property};
pub use performance::{Performance, RuleFailure};
pub use platform::{
    ActionFactory, ComparatorFactory, ExpressionEvaluator, Platform, PlatformBuilder,
};
pub use predicate::Predicate;
pub use rule::{Firing, Rule};
pub use ruleset::Ruleset;
pub use value::{Value, ValueKind};
