mod error;
mod evaluate;
mod executor;
pub mod parse;
mod types;

pub use error::Error;
pub use executor::{Effect, InlineExecutor, TaskRunner, ThreadExecutor};
pub use parse::{join_words, tokenize, tokenize_words, Parser, SyntaxError, Token, TokenKind};
pub use types::{
    Action, ActionFactory, ActionPlugin, Comparator, ComparatorCtor, ComparatorFactory, Event,
    EventArgs, EventContext, ExpressionEvaluator, Firing, IfAction, LeafAction, Performance,
    PerformingError, Platform, PlatformBuilder, Predicate, Property, PropertyError, Rule,
    RuleFailure, Ruleset, Value, ValueKind,
};
