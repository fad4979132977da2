use std::fmt;

/// Errors produced while lexing or parsing a script, or while constructing
/// an action or comparator from its raw arguments.
///
/// Parsing never recovers: the first error aborts the whole script. The
/// optional rule number, line and word point at the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    message: String,
    rule: Option<usize>,
    line: Option<usize>,
    word: Option<String>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rule: None,
            line: None,
            word: None,
        }
    }

    /// Attach the 1-based number of the rule block being parsed.
    /// An already attached rule number is kept.
    #[must_use]
    pub fn in_rule(mut self, rule: usize) -> Self {
        self.rule.get_or_insert(rule);
        self
    }

    /// Attach the 1-based source line. An already attached line is kept.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line.get_or_insert(line);
        self
    }

    #[must_use]
    pub fn near(mut self, word: impl Into<String>) -> Self {
        self.word.get_or_insert_with(|| word.into());
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn rule(&self) -> Option<usize> {
        self.rule
    }

    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    #[must_use]
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error")?;
        if let Some(rule) = self.rule {
            write!(f, " in rule #{rule}")?;
        }
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        if let Some(word) = &self.word {
            write!(f, " near '{word}'")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SyntaxError::new("unexpected token");
        assert_eq!(err.to_string(), "syntax error: unexpected token");
    }

    #[test]
    fn error_display_with_context() {
        let err = SyntaxError::new("unknown action name")
            .near("JUMP")
            .at_line(4)
            .in_rule(2);
        assert_eq!(
            err.to_string(),
            "syntax error in rule #2 (line 4) near 'JUMP': unknown action name"
        );
    }

    #[test]
    fn innermost_context_wins() {
        let err = SyntaxError::new("bad").at_line(3).at_line(9).in_rule(1).in_rule(5);
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.rule(), Some(1));
    }
}
