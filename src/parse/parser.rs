use tracing::debug;

use crate::{Action, IfAction, Platform, Predicate, Rule, Ruleset};

use super::{keyword_position, tokenize, SyntaxError, Token, TokenKind};

/// Recursive-descent parser building rules, actions and predicates.
///
/// Names are resolved against the [`Platform`] while parsing: unknown action
/// names and comparator symbols are syntax errors. Event names are bound
/// lazily and only checked when a rule fires. Keywords are only recognized
/// in bare words; `%...%` groups are always literal text.
#[derive(Debug)]
pub struct Parser<'p> {
    platform: &'p Platform,
    tokens: Vec<Token>,
}

impl<'p> Parser<'p> {
    /// Parser over lexer output.
    #[must_use]
    pub fn new(platform: &'p Platform, tokens: Vec<Token>) -> Self {
        Self { platform, tokens }
    }

    /// Parser over an already split word list, treated as a single line of
    /// bare words.
    #[must_use]
    pub fn from_words(platform: &'p Platform, words: Vec<String>) -> Self {
        let tokens = words
            .into_iter()
            .map(|text| Token {
                kind: TokenKind::Word,
                text,
                line: 1,
            })
            .collect();
        Self { platform, tokens }
    }

    /// Parser over one isolated line. Groups keep their kind, so `%and%`
    /// stays literal text.
    #[must_use]
    pub fn from_line(platform: &'p Platform, line: &str) -> Self {
        Self::new(platform, tokenize(line))
    }

    /// Parse every rule block.
    ///
    /// Blocks are separated by blank lines. The last line of a block must be
    /// `ON <event> [WITH <predicate> [AND <predicate>]...]`; the lines before
    /// it are the action.
    ///
    /// # Errors
    ///
    /// Returns the first [`SyntaxError`], tagged with the rule number.
    pub fn parse(&self) -> Result<Ruleset, SyntaxError> {
        let mut rules = Vec::new();
        let blocks = self
            .tokens
            .split(|t| t.kind == TokenKind::EmptyLine)
            .filter(|block| !block.is_empty());

        for (index, block) in blocks.enumerate() {
            let number = index + 1;
            let rule = parse_rule(self.platform, block).map_err(|e| e.in_rule(number))?;
            debug!(index = number, %rule, "parsed rule");
            rules.push(rule);
        }

        Ok(Ruleset::new(rules))
    }

    /// Parse all words as one action. Blank-line tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`] on an unknown action name or malformed `IF`.
    pub fn parse_action(&self) -> Result<Action, SyntaxError> {
        action_from_tokens(self.platform, &self.content())
    }

    /// Parse all words as one `<field> <comparator> <value>` predicate.
    /// Blank-line tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`] on an unknown comparator symbol or a literal
    /// the comparator cannot parse.
    pub fn parse_predicate(&self) -> Result<Predicate, SyntaxError> {
        predicate_from_tokens(self.platform, &self.content())
    }

    fn content(&self) -> Vec<Token> {
        self.tokens
            .iter()
            .filter(|t| t.kind != TokenKind::EmptyLine)
            .cloned()
            .collect()
    }
}

fn parse_rule(platform: &Platform, block: &[Token]) -> Result<Rule, SyntaxError> {
    // `block` is non-empty: empty blocks are filtered out by the caller.
    let last_line = block[block.len() - 1].line;
    let on_start = block
        .iter()
        .position(|t| t.line == last_line)
        .unwrap_or(0);
    let (action_tokens, on_line) = block.split_at(on_start);

    let keyword = &on_line[0];
    if !keyword.is_keyword("ON") {
        return Err(SyntaxError::new("expected 'ON <event>' as the last line of the rule")
            .at_line(last_line)
            .near(keyword.text.as_str()));
    }
    if action_tokens.is_empty() {
        return Err(SyntaxError::new("expected an action before 'ON'").at_line(last_line));
    }

    let rest = &on_line[1..];
    let with_index = keyword_position(rest, "WITH");
    let event_tokens = &rest[..with_index.unwrap_or(rest.len())];
    if event_tokens.is_empty() {
        return Err(SyntaxError::new("expected an event name after 'ON'").at_line(last_line));
    }
    let event_name = texts(event_tokens).join(" ");

    let predicates = match with_index {
        Some(index) => {
            let tokens = &rest[index + 1..];
            if tokens.is_empty() {
                return Err(SyntaxError::new("expected a predicate after 'WITH'").at_line(last_line));
            }
            conjunction_from_tokens(platform, tokens).map_err(|e| e.at_line(last_line))?
        }
        None => Vec::new(),
    };

    let action = action_from_tokens(platform, action_tokens)
        .map_err(|e| e.at_line(action_tokens[0].line))?;

    if platform.event(&event_name).is_none() {
        debug!(event = %event_name, "rule bound to an unregistered event");
    }

    Ok(predicates
        .into_iter()
        .fold(Rule::new(&event_name, action), Rule::with_predicate)
        .at_line(last_line))
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Parse `tokens` as an action: `IF ...` or a registered action name
/// followed by its arguments.
pub(crate) fn action_from_tokens(
    platform: &Platform,
    tokens: &[Token],
) -> Result<Action, SyntaxError> {
    let Some((name, args)) = tokens.split_first() else {
        return Err(SyntaxError::new("expected an action"));
    };

    if name.is_keyword("IF") {
        return IfAction::parse(platform, args).map(Action::If);
    }

    let name = name.text.as_str();
    let factory = platform
        .action_factory(name)
        .ok_or_else(|| SyntaxError::new(format!("unknown action name '{name}'")).near(name))?;
    let words: Vec<String> = args.iter().map(|t| t.text.clone()).collect();
    let plugin = factory(platform, &words).map_err(|e| e.near(name))?;
    Ok(Action::leaf(name, args.to_vec(), plugin))
}

/// Parse predicates joined by `AND`.
pub(crate) fn conjunction_from_tokens(
    platform: &Platform,
    tokens: &[Token],
) -> Result<Vec<Predicate>, SyntaxError> {
    tokens
        .split(|t| t.is_keyword("AND"))
        .map(|part| predicate_from_tokens(platform, part))
        .collect()
}

/// Parse `<field> <comparator...> <value>`. The comparator symbol may span
/// several words (`IN RANGE`); the value is the last word, or a bracketed
/// list that was split on its inner spaces.
fn predicate_from_tokens(
    platform: &Platform,
    tokens: &[Token],
) -> Result<Predicate, SyntaxError> {
    let words = texts(tokens);
    let value_start = value_start(&words);
    if words.len() < 3 || value_start < 2 {
        return Err(SyntaxError::new(format!(
            "expected '<field> <comparator> <value>', found '{}'",
            words.join(" ")
        )));
    }

    let field = words[0];
    let symbol = words[1..value_start].join(" ").to_uppercase();
    let value = words[value_start..].join(" ");

    let factory = platform.comparator_factory(&symbol).ok_or_else(|| {
        SyntaxError::new(format!("unknown comparator symbol '{symbol}'")).near(symbol.as_str())
    })?;
    let comparator = factory(&value)?;
    Ok(Predicate::new(field, comparator))
}

fn value_start(words: &[&str]) -> usize {
    let last = words.len().saturating_sub(1);
    if words.last().is_some_and(|w| w.ends_with(']')) {
        if let Some(open) = words.iter().rposition(|w| w.starts_with('[')) {
            return open;
        }
    }
    last
}
