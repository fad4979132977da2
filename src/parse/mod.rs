mod char_stream;
mod error;
mod lexer;
pub(crate) mod literal;
mod parser;
pub(crate) mod words;

pub use char_stream::CharStream;
pub use error::SyntaxError;
pub use lexer::{tokenize, tokenize_reader, Lexer, Token, TokenKind};
pub use parser::Parser;
pub use words::{join_words, tokenize_words};

pub(crate) use lexer::keyword_position;
pub(crate) use parser::{action_from_tokens, conjunction_from_tokens};
