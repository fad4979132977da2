use std::iter::Peekable;
use std::str::Chars;

/// Single-character lookahead cursor over script text.
#[derive(Debug, Clone)]
pub struct CharStream<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> CharStream<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
        }
    }

    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    pub fn consume(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Consume the next character only if it equals `expected`.
    pub fn consume_if(&mut self, expected: char) -> bool {
        self.chars.next_if_eq(&expected).is_some()
    }

    pub fn has_next(&mut self) -> bool {
        self.chars.peek().is_some()
    }
}
