//! YAML value parser over a pre-lexed token stream.
//!
//! The crate does not read text. An external lexer turns a YAML document into
//! [`Token`]s, each with a [`TokenKind`] and the raw text it matched, and this
//! crate builds the [`Value`] tree from them.
//!
//! # Parsing Pipeline
//!
//! 1. **Header**: Skips leading trivia, validates an optional `%YAML 1.1` or
//!    `%YAML 1.2` directive and consumes the `---` marker.
//!
//! 2. **Value Parser**: Dispatches on the current token kind into scalar
//!    decoding, block and flow collections, block scalars, anchors and
//!    aliases, recursing for nested values.
//!
//! 3. **Trailer**: Skips `...` markers and requires the end of the stream.
//!
//! Errors carry a short preview of the raw input where parsing stopped.

mod block_scalar;
mod cursor;
mod error;
mod parser;
mod scalar;
mod token;
mod value;

pub use error::{BlockScalarError, ParseError, ParseOptions, Result, DEFAULT_CONTEXT_LIMIT};
pub use parser::Parser;
pub use token::{Token, TokenKind, UnknownTokenKind};
pub use value::{Dictionary, Value};

/// Parse a single YAML document from its tokens.
///
/// # Example
///
/// ```
/// use libyamltree::{parse, Token, TokenKind, Value};
///
/// let tokens = vec![
///     Token::new(TokenKind::DecimalInt, "42"),
///     Token::end(),
/// ];
/// assert_eq!(parse(&tokens).unwrap(), Value::Int(42));
/// ```
///
/// # Panics
///
/// If an integer token holds digits invalid for its radix or a value outside
/// `i64`, which the lexer must never produce.
pub fn parse(tokens: &[Token]) -> Result<Value> {
    parse_with_options(tokens, &ParseOptions::default())
}

/// Parse a single YAML document with explicit options.
pub fn parse_with_options(tokens: &[Token], options: &ParseOptions) -> Result<Value> {
    Parser::with_options(tokens, options.clone()).parse_document()
}

/// Parse every document of a multi-document stream.
pub fn parse_all(tokens: &[Token]) -> Result<Vec<Value>> {
    Parser::new(tokens).parse_documents()
}
