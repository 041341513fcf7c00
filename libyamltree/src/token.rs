//! Token stream contract.
//!
//! The parser does not lex. It consumes tokens produced by an external lexer,
//! each carrying a kind and the raw text it matched. The stream is terminated
//! by a single `End` token.

use std::fmt;
use std::str::FromStr;

/// Token kind produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    Space,
    BlankLine,
    Newline,
    /// Indentation increased.
    Indent,
    /// Indentation returned to an enclosing level.
    Dedent,
    /// `%YAML`
    YamlDirective,
    /// `---`
    DocStart,
    /// `...`
    DocEnd,
    Null,
    True,
    False,
    DecimalInt,
    /// `0o17`
    OctalInt,
    /// `0x1F`
    HexInt,
    /// `1:02:03`
    SexagesimalInt,
    PositiveInfinity,
    NegativeInfinity,
    NotANumber,
    DecimalFloat,
    Dash,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    PlainKey,
    DoubleQuotedKey,
    SingleQuotedKey,
    QuestionMark,
    Colon,
    Comma,
    /// `|` or `>` with optional chomping and indentation indicators.
    LiteralBlockHeader,
    DoubleQuotedString,
    SingleQuotedString,
    PlainString,
    /// `&name`
    Anchor,
    /// `*name`
    Alias,
    /// End-of-stream sentinel.
    End,
}

const NAMES: &[(TokenKind, &str)] = &[
    (TokenKind::Comment, "comment"),
    (TokenKind::Space, "space"),
    (TokenKind::BlankLine, "blank-line"),
    (TokenKind::Newline, "newline"),
    (TokenKind::Indent, "indent"),
    (TokenKind::Dedent, "dedent"),
    (TokenKind::YamlDirective, "yaml-directive"),
    (TokenKind::DocStart, "document-start"),
    (TokenKind::DocEnd, "document-end"),
    (TokenKind::Null, "null-keyword"),
    (TokenKind::True, "true-keyword"),
    (TokenKind::False, "false-keyword"),
    (TokenKind::DecimalInt, "decimal-int"),
    (TokenKind::OctalInt, "octal-int"),
    (TokenKind::HexInt, "hex-int"),
    (TokenKind::SexagesimalInt, "sexagesimal-int"),
    (TokenKind::PositiveInfinity, "positive-infinity"),
    (TokenKind::NegativeInfinity, "negative-infinity"),
    (TokenKind::NotANumber, "not-a-number"),
    (TokenKind::DecimalFloat, "decimal-float"),
    (TokenKind::Dash, "dash"),
    (TokenKind::OpenBracket, "open-bracket"),
    (TokenKind::CloseBracket, "close-bracket"),
    (TokenKind::OpenBrace, "open-brace"),
    (TokenKind::CloseBrace, "close-brace"),
    (TokenKind::PlainKey, "plain-key"),
    (TokenKind::DoubleQuotedKey, "double-quoted-key"),
    (TokenKind::SingleQuotedKey, "single-quoted-key"),
    (TokenKind::QuestionMark, "question-mark"),
    (TokenKind::Colon, "colon"),
    (TokenKind::Comma, "comma"),
    (TokenKind::LiteralBlockHeader, "literal-block-header"),
    (TokenKind::DoubleQuotedString, "double-quoted-string"),
    (TokenKind::SingleQuotedString, "single-quoted-string"),
    (TokenKind::PlainString, "plain-string"),
    (TokenKind::Anchor, "anchor"),
    (TokenKind::Alias, "alias"),
    (TokenKind::End, "end-of-stream"),
];

impl TokenKind {
    /// Kebab-case name used in diagnostics and token fixtures.
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }

    /// Kinds that carry no document content.
    pub fn is_space(self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::Space | TokenKind::BlankLine | TokenKind::Newline
        )
    }

    /// Kinds that open a block mapping entry.
    pub fn starts_key(self) -> bool {
        matches!(
            self,
            TokenKind::PlainKey
                | TokenKind::DoubleQuotedKey
                | TokenKind::SingleQuotedKey
                | TokenKind::QuestionMark
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a token kind name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token kind \"{0}\"")]
pub struct UnknownTokenKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownTokenKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| UnknownTokenKind(s.to_string()))
    }
}

/// A single token in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// The end-of-stream sentinel.
    pub const fn end() -> Self {
        Self {
            kind: TokenKind::End,
            text: String::new(),
        }
    }
}
