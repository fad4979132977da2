use std::io::Read;

use super::{CharStream, SyntaxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// A bare, space-delimited unit.
    Word,
    /// Text delimited by `%...%`, delimiters stripped. May span lines and
    /// embed `${name}` placeholders.
    Group,
    /// A run of blank lines. Separates rule blocks.
    EmptyLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line the token starts on.
    pub line: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: &str, line: usize) -> Self {
        Self {
            kind,
            text: text.to_owned(),
            line,
        }
    }

    /// Whether this is a bare word equal to `keyword`, ignoring ASCII case.
    /// Group text is quoted and never reads as a keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }
}

/// Index of the first token that is `keyword`.
pub(crate) fn keyword_position(tokens: &[Token], keyword: &str) -> Option<usize> {
    tokens.iter().position(|t| t.is_keyword(keyword))
}

/// Character-level lexer for scripts.
///
/// Never rejects input: an unterminated group becomes a trailing
/// [`TokenKind::Group`] token. No token is empty.
#[derive(Debug)]
pub struct Lexer<'a> {
    stream: CharStream<'a>,
    in_group: bool,
    escaping: bool,
    at_line_start: bool,
    buffer: String,
    line: usize,
    token_line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(stream: CharStream<'a>) -> Self {
        Self {
            stream,
            in_group: false,
            escaping: false,
            at_line_start: true,
            buffer: String::new(),
            line: 1,
            token_line: 1,
            tokens: Vec::new(),
        }
    }

    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some(c) = self.stream.peek() {
            if self.at_line_start {
                self.line_start(c);
            } else if self.in_group {
                self.stream.consume();
                self.group(c);
            } else {
                self.stream.consume();
                self.word(c);
            }
        }

        if self.escaping {
            self.push('\\');
        }
        let kind = if self.in_group {
            TokenKind::Group
        } else if self.at_line_start {
            TokenKind::EmptyLine
        } else {
            TokenKind::Word
        };
        self.flush(kind);
        self.tokens
    }

    fn line_start(&mut self, c: char) {
        match c {
            ' ' | '\t' => {
                self.stream.consume();
            }
            '\n' | '\r' => {
                self.stream.consume();
                self.push(c);
                if c == '\n' {
                    self.line += 1;
                }
            }
            _ => {
                self.flush(TokenKind::EmptyLine);
                self.at_line_start = false;
            }
        }
    }

    fn group(&mut self, c: char) {
        if self.escaping {
            self.escaping = false;
            if c != '%' && c != '\\' {
                self.push('\\');
            }
            self.push(c);
        } else {
            match c {
                '\\' => self.escaping = true,
                '%' => {
                    self.flush(TokenKind::Group);
                    self.in_group = false;
                }
                _ => self.push(c),
            }
        }
        if c == '\n' {
            self.line += 1;
        }
    }

    fn word(&mut self, c: char) {
        match c {
            '\n' | '\r' => {
                self.flush(TokenKind::Word);
                if c == '\r' {
                    self.stream.consume_if('\n');
                }
                self.line += 1;
                self.at_line_start = true;
            }
            ' ' | '\t' => self.flush(TokenKind::Word),
            '%' => self.in_group = true,
            '#' if self.buffer.is_empty() && self.word_ends_here() => self.skip_comment(),
            _ => self.push(c),
        }
    }

    fn word_ends_here(&mut self) -> bool {
        self.stream.peek().map_or(true, char::is_whitespace)
    }

    fn skip_comment(&mut self) {
        while self.stream.peek().is_some_and(|c| c != '\n' && c != '\r') {
            self.stream.consume();
        }
    }

    fn push(&mut self, c: char) {
        if self.buffer.is_empty() {
            self.token_line = self.line;
        }
        self.buffer.push(c);
    }

    fn flush(&mut self, kind: TokenKind) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        self.tokens.push(Token {
            kind,
            text,
            line: self.token_line,
        });
    }
}

/// Tokenize script text.
#[must_use]
pub fn tokenize(script: &str) -> Vec<Token> {
    Lexer::new(CharStream::new(script)).tokenize()
}

/// Read a script from `reader` and tokenize it.
///
/// # Errors
///
/// Returns [`SyntaxError`] if the reader fails or yields invalid UTF-8.
pub fn tokenize_reader(mut reader: impl Read) -> Result<Vec<Token>, SyntaxError> {
    let mut script = String::new();
    reader
        .read_to_string(&mut script)
        .map_err(|e| SyntaxError::new(format!("failed to read script: {e}")))?;
    Ok(tokenize(&script))
}
