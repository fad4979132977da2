use std::fmt;

use crate::parse::{keyword_position, words, SyntaxError, Token, TokenKind};

use super::context::EventContext;
use super::error::PerformingError;
use super::platform::Platform;
use super::predicate::Predicate;

/// Capability implemented by embedder-registered actions.
///
/// Instances are built by an action factory from the words following the
/// action name and hold their own parsed arguments. Text meant for the
/// caller (messages to display, logs to assert on) is pushed to `output`.
pub trait ActionPlugin: fmt::Debug + Send + Sync {
    /// Returns `false` when the action declined to act; the rule is then
    /// reported as declined rather than fired.
    ///
    /// # Errors
    ///
    /// Returns [`PerformingError`] to abort the firing rule.
    fn perform(&self, ctx: &EventContext<'_>, output: &mut Vec<String>)
        -> Result<bool, PerformingError>;
}

/// A node of a rule's action tree.
#[derive(Debug)]
pub enum Action {
    Leaf(LeafAction),
    If(IfAction),
}

/// A registered plugin together with the tokens it was built from.
#[derive(Debug)]
pub struct LeafAction {
    name: String,
    args: Vec<Token>,
    plugin: Box<dyn ActionPlugin>,
}

/// `IF <condition> THEN <action> [ELSE <action>]`
#[derive(Debug)]
pub struct IfAction {
    condition: Vec<Predicate>,
    then: Box<Action>,
    otherwise: Option<Box<Action>>,
}

impl Action {
    #[must_use]
    pub fn leaf(name: &str, args: Vec<Token>, plugin: Box<dyn ActionPlugin>) -> Self {
        Action::Leaf(LeafAction {
            name: name.to_uppercase(),
            args,
            plugin,
        })
    }

    /// Perform this action tree against `ctx`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`PerformingError`] raised in the tree.
    pub fn perform(
        &self,
        ctx: &EventContext<'_>,
        output: &mut Vec<String>,
    ) -> Result<bool, PerformingError> {
        match self {
            Action::Leaf(leaf) => leaf.plugin.perform(ctx, output),
            Action::If(action) => action.perform(ctx, output),
        }
    }

    /// Action name: the registered name for leaves, `IF` for conditionals.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Action::Leaf(leaf) => &leaf.name,
            Action::If(_) => "IF",
        }
    }
}

impl LeafAction {
    /// Arguments as written, with their kind: `%...%` groups are
    /// [`TokenKind::Group`].
    #[must_use]
    pub fn args(&self) -> &[Token] {
        &self.args
    }
}

impl IfAction {
    #[must_use]
    pub fn new(condition: Vec<Predicate>, then: Action, otherwise: Option<Action>) -> Self {
        Self {
            condition,
            then: Box::new(then),
            otherwise: otherwise.map(Box::new),
        }
    }

    /// Build from the tokens following `IF`.
    ///
    /// The first `ELSE` splits off the else branch before the first `THEN`
    /// is searched for, so in `IF a THEN IF b THEN x ELSE y ELSE z` the first
    /// `ELSE` belongs to the outer `IF`.
    pub(crate) fn parse(platform: &Platform, args: &[Token]) -> Result<Self, SyntaxError> {
        let (if_part, else_part) = split_if_else(args)?;
        let (condition, body) = split_condition(if_part)?;

        if condition.is_empty() {
            return Err(SyntaxError::new("expected a condition after 'IF'"));
        }
        if body.is_empty() {
            return Err(SyntaxError::new("expected an action after 'THEN'"));
        }

        let condition = crate::parse::conjunction_from_tokens(platform, condition)?;
        let then = crate::parse::action_from_tokens(platform, body)?;
        let otherwise = else_part
            .map(|tokens| crate::parse::action_from_tokens(platform, tokens))
            .transpose()?;

        Ok(Self::new(condition, then, otherwise))
    }

    #[must_use]
    pub fn condition(&self) -> &[Predicate] {
        &self.condition
    }

    #[must_use]
    pub fn then_action(&self) -> &Action {
        &self.then
    }

    #[must_use]
    pub fn else_action(&self) -> Option<&Action> {
        self.otherwise.as_deref()
    }

    fn perform(
        &self,
        ctx: &EventContext<'_>,
        output: &mut Vec<String>,
    ) -> Result<bool, PerformingError> {
        let rule = ctx.current_rule().ok_or_else(|| PerformingError::OutsideRule {
            action: "IF".to_owned(),
        })?;
        let event = ctx
            .platform()
            .event(rule.event_name())
            .ok_or_else(|| PerformingError::UnknownEvent {
                event: rule.event_name().to_owned(),
            })?;

        if crate::evaluate::test_all(&self.condition, event, ctx.args()) {
            self.then.perform(ctx, output)
        } else if let Some(otherwise) = &self.otherwise {
            otherwise.perform(ctx, output)
        } else {
            Ok(true)
        }
    }
}

fn split_if_else(args: &[Token]) -> Result<(&[Token], Option<&[Token]>), SyntaxError> {
    let Some(index) = keyword_position(args, "ELSE") else {
        return Ok((args, None));
    };
    let else_part = &args[index + 1..];
    if else_part.is_empty() {
        return Err(SyntaxError::new("expected an action after 'ELSE'").near("ELSE"));
    }
    Ok((&args[..index], Some(else_part)))
}

fn split_condition(args: &[Token]) -> Result<(&[Token], &[Token]), SyntaxError> {
    let index = keyword_position(args, "THEN")
        .ok_or_else(|| SyntaxError::new("expected 'THEN' after condition"))?;
    Ok((&args[..index], &args[index + 1..]))
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Leaf(leaf) => {
                write!(f, "{}", leaf.name)?;
                for arg in &leaf.args {
                    match arg.kind {
                        TokenKind::Group => write!(f, " {}", words::quote_group(&arg.text))?,
                        _ => write!(f, " {}", arg.text)?,
                    }
                }
                Ok(())
            }
            Action::If(action) => {
                write!(f, "IF ")?;
                for (i, predicate) in action.condition.iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    write!(f, "{predicate}")?;
                }
                write!(f, " THEN {}", action.then)?;
                if let Some(otherwise) = &action.otherwise {
                    write!(f, " ELSE {otherwise}")?;
                }
                Ok(())
            }
        }
    }
}
