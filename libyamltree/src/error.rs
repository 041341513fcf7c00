//! Error types for token-stream parsing.

use thiserror::Error;

use crate::token::TokenKind;

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Length of the raw-input preview attached to errors.
pub const DEFAULT_CONTEXT_LIMIT: usize = 50;

/// Options controlling one parse session.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Number of characters of raw input captured as error context.
    pub context_limit: usize,
    /// Reject aliases that name no anchor instead of resolving them to null.
    pub strict_aliases: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            context_limit: DEFAULT_CONTEXT_LIMIT,
            strict_aliases: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context_limit(mut self, limit: usize) -> Self {
        self.context_limit = limit;
        self
    }

    pub fn with_strict_aliases(mut self, strict: bool) -> Self {
        self.strict_aliases = strict;
        self
    }
}

/// Validation failure inside a literal block scalar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockScalarError {
    /// A blank line before the first content line is indented past the content.
    #[error("leading all-space line must not have too many spaces")]
    TooManySpaces,

    /// The content is indented less than the header's indentation indicator.
    #[error("less indented block scalar than the indicated level")]
    LessIndented,
}

/// Error type for parsing.
///
/// Every variant carries `context`, the raw text of the tokens at and after
/// the point of failure, truncated near the configured context limit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A required token was not found.
    #[error("{message}, {context}")]
    Expected {
        message: &'static str,
        context: String,
    },

    /// `%YAML` directive with a version other than 1.1 or 1.2.
    #[error("invalid yaml version, {context}")]
    InvalidVersion { version: String, context: String },

    /// No grammar rule starts with this token.
    #[error("unexpected {kind}, {context}")]
    UnexpectedToken { kind: TokenKind, context: String },

    /// Malformed literal or folded block scalar.
    #[error("{source}, {context}")]
    BlockScalar {
        #[source]
        source: BlockScalarError,
        context: String,
    },

    /// A float token the float grammar does not accept.
    #[error("invalid float {text:?}, {context}")]
    InvalidFloat { text: String, context: String },

    /// Alias naming no anchor, reported in strict alias mode.
    #[error("unknown alias {name:?}, {context}")]
    UnknownAlias { name: String, context: String },
}

impl ParseError {
    /// The raw-input preview captured where the error occurred.
    pub fn context(&self) -> &str {
        match self {
            ParseError::Expected { context, .. }
            | ParseError::InvalidVersion { context, .. }
            | ParseError::UnexpectedToken { context, .. }
            | ParseError::BlockScalar { context, .. }
            | ParseError::InvalidFloat { context, .. }
            | ParseError::UnknownAlias { context, .. } => context,
        }
    }

    /// The diagnostic without its context suffix.
    pub fn message(&self) -> String {
        let full = self.to_string();
        let suffix = format!(", {}", self.context());
        match full.strip_suffix(&suffix) {
            Some(message) => message.to_string(),
            None => full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_message_and_context() {
        let err = ParseError::Expected {
            message: "expected dedent",
            context: "b: 2".to_string(),
        };
        assert_eq!(err.to_string(), "expected dedent, b: 2");
        assert_eq!(err.message(), "expected dedent");
        assert_eq!(err.context(), "b: 2");
    }

    #[test]
    fn block_scalar_error_keeps_source() {
        use std::error::Error as _;

        let err = ParseError::BlockScalar {
            source: BlockScalarError::LessIndented,
            context: "  a\n".to_string(),
        };
        assert_eq!(
            err.message(),
            "less indented block scalar than the indicated level"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn options_builder() {
        let options = ParseOptions::new()
            .with_context_limit(10)
            .with_strict_aliases(true);
        assert_eq!(options.context_limit, 10);
        assert!(options.strict_aliases);
        assert_eq!(ParseOptions::default().context_limit, DEFAULT_CONTEXT_LIMIT);
    }
}
