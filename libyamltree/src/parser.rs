//! Recursive-descent value parser.
//!
//! The parser walks a token slice with a single cursor and builds values
//! bottom-up. It handles:
//! - Document headers: `%YAML` directives and `---` markers
//! - Scalars: keywords, integers in four radices, floats, strings
//! - Collections: block and flow sequences, block and flow mappings
//! - Literal and folded block scalars
//! - Anchors and aliases
//!
//! Every rule returns `Result<Value>`; the first error aborts the whole
//! parse, so no partially built collection is ever returned.

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::block_scalar;
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseOptions, Result};
use crate::scalar;
use crate::token::{Token, TokenKind};
use crate::value::{Dictionary, Value};

const SUPPORTED_VERSIONS: &[&str] = &["1.1", "1.2"];

/// Parser over one token stream.
///
/// Anchors bound while parsing a document are visible to later aliases in
/// the same document.
pub struct Parser<'t> {
    cursor: Cursor<'t>,
    aliases: HashMap<String, Value>,
    options: ParseOptions,
}

impl<'t> Parser<'t> {
    /// Create a parser with default options.
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    /// Create a parser with explicit options.
    pub fn with_options(tokens: &'t [Token], options: ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(tokens, options.context_limit),
            aliases: HashMap::new(),
            options,
        }
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Parse a stream holding exactly one document.
    ///
    /// # Panics
    ///
    /// If an integer token holds digits invalid for its radix.
    pub fn parse_document(&mut self) -> Result<Value> {
        debug!("parsing document");
        self.parse_header()?;
        let value = self.parse_value()?;
        self.cursor.ignore_doc_end();
        self.cursor.expect(TokenKind::End, "expected end")?;
        Ok(value)
    }

    /// Parse every document in the stream.
    ///
    /// Anchors do not carry over from one document to the next.
    ///
    /// # Panics
    ///
    /// If an integer token holds digits invalid for its radix.
    pub fn parse_documents(&mut self) -> Result<Vec<Value>> {
        let mut documents = Vec::new();
        loop {
            debug!("parsing document {}", documents.len() + 1);
            self.aliases.clear();
            self.parse_header()?;
            documents.push(self.parse_value()?);

            self.cursor.ignore_space();
            let ended = self.cursor.accept(TokenKind::DocEnd);
            self.cursor.ignore_doc_end();
            match self.cursor.peek().kind {
                TokenKind::End => return Ok(documents),
                TokenKind::DocStart | TokenKind::YamlDirective => {}
                _ if ended => {}
                _ => return self.fail_expected("expected end"),
            }
        }
    }

    // ========================================================================
    // Header
    // ========================================================================

    /// Consume leading trivia, an optional `%YAML` directive and the
    /// document start marker.
    ///
    /// The marker is optional unless a directive was read.
    fn parse_header(&mut self) -> Result<()> {
        let mut read_yaml = false;
        loop {
            let token = self.cursor.peek();
            match token.kind {
                kind if kind.is_space() => {
                    self.cursor.advance();
                }
                TokenKind::YamlDirective if !read_yaml => {
                    self.cursor.advance();
                    self.cursor.expect(TokenKind::Space, "expected space")?;
                    self.read_version()?;
                    read_yaml = true;
                }
                TokenKind::DocStart => {
                    self.cursor.advance();
                    return Ok(());
                }
                _ if read_yaml => return self.fail_expected("expected ---"),
                _ => return Ok(()),
            }
        }
    }

    fn read_version(&mut self) -> Result<()> {
        let version = &self.cursor.peek().text;
        if !SUPPORTED_VERSIONS.contains(&version.as_str()) {
            return Err(ParseError::InvalidVersion {
                version: version.clone(),
                context: self.cursor.build_context(),
            });
        }
        debug!("yaml directive version {}", version);
        self.cursor.advance();
        Ok(())
    }

    // ========================================================================
    // Value Dispatch
    // ========================================================================

    /// Parse the next value from the stream.
    ///
    /// # Panics
    ///
    /// If an integer token holds digits invalid for its radix.
    pub fn parse_value(&mut self) -> Result<Value> {
        let token = self.cursor.peek();
        match token.kind {
            kind if kind.is_space() => {
                self.cursor.advance();
                self.parse_value()
            }

            TokenKind::Null => self.scalar(Value::Null),
            TokenKind::True => self.scalar(Value::Bool(true)),
            TokenKind::False => self.scalar(Value::Bool(false)),
            TokenKind::PositiveInfinity => self.scalar(Value::Double(f64::INFINITY)),
            TokenKind::NegativeInfinity => self.scalar(Value::Double(f64::NEG_INFINITY)),
            TokenKind::NotANumber => self.scalar(Value::Double(f64::NAN)),

            TokenKind::DecimalInt
            | TokenKind::OctalInt
            | TokenKind::HexInt
            | TokenKind::SexagesimalInt => {
                self.scalar(Value::Int(scalar::decode_int(token.kind, &token.text)))
            }
            TokenKind::DecimalFloat => match scalar::decode_float(&token.text) {
                Some(f) => self.scalar(Value::Double(f)),
                None => Err(ParseError::InvalidFloat {
                    text: token.text.clone(),
                    context: self.cursor.build_context(),
                }),
            },

            TokenKind::Dash => self.parse_block_seq(),
            TokenKind::OpenBracket => self.parse_flow_seq(),
            TokenKind::OpenBrace => self.parse_flow_map(),
            kind if kind.starts_key() => self.parse_block_map(),

            TokenKind::Indent => {
                self.cursor.advance();
                self.parse_indented()
            }

            TokenKind::LiteralBlockHeader => self.parse_literal(),

            TokenKind::DoubleQuotedString | TokenKind::SingleQuotedString => {
                self.scalar(Value::from(scalar::strip_quotes(&token.text)))
            }
            TokenKind::PlainString => self.scalar(Value::from(token.text.as_str())),

            TokenKind::Anchor => {
                self.cursor.advance();
                let name = marker_name(&token.text);
                let value = self.parse_value()?;
                trace!("anchor &{} bound", name);
                self.aliases.insert(name.to_string(), value.clone());
                Ok(value)
            }
            TokenKind::Alias => self.resolve_alias(marker_name(&token.text)),

            // Empty document: the marker is left for the document loop.
            TokenKind::End | TokenKind::DocStart | TokenKind::DocEnd => Ok(Value::Null),

            kind => Err(ParseError::UnexpectedToken {
                kind,
                context: self.cursor.build_context(),
            }),
        }
    }

    /// Consume the current single-token scalar and yield its value.
    fn scalar(&mut self, value: Value) -> Result<Value> {
        self.cursor.advance();
        Ok(value)
    }

    /// Parse a value after an indent marker, then its closing dedent.
    fn parse_indented(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        self.cursor.ignore_space();
        self.cursor.expect(TokenKind::Dedent, "expected dedent")?;
        Ok(value)
    }

    fn resolve_alias(&mut self, name: &str) -> Result<Value> {
        if let Some(value) = self.aliases.get(name) {
            let value = value.clone();
            self.cursor.advance();
            return Ok(value);
        }
        if self.options.strict_aliases {
            return Err(ParseError::UnknownAlias {
                name: name.to_string(),
                context: self.cursor.build_context(),
            });
        }
        warn!("alias *{} names no anchor, resolving to null", name);
        self.cursor.advance();
        Ok(Value::Null)
    }

    // ========================================================================
    // Sequences
    // ========================================================================

    /// Parse `- item` entries until no dash follows.
    fn parse_block_seq(&mut self) -> Result<Value> {
        let mut items = Vec::new();
        while self.cursor.accept(TokenKind::Dash) {
            let indented = self.cursor.accept(TokenKind::Indent);
            self.cursor.ignore_space();
            let item = self.parse_value()?;
            self.cursor.ignore_space();
            if indented {
                self.cursor.expect(TokenKind::Dedent, "expected dedent")?;
            }
            items.push(item);
            self.cursor.ignore_space();
        }
        Ok(Value::Array(items))
    }

    /// Parse `[a, b, ...]`.
    fn parse_flow_seq(&mut self) -> Result<Value> {
        self.cursor.advance();
        let mut items = Vec::new();
        loop {
            self.cursor.ignore_space();
            if self.cursor.accept(TokenKind::CloseBracket) {
                break;
            }
            if !items.is_empty() {
                self.cursor.expect(TokenKind::Comma, "expected comma")?;
                self.cursor.ignore_space();
                if self.cursor.accept(TokenKind::CloseBracket) {
                    break;
                }
            }
            items.push(self.parse_value()?);
        }
        Ok(Value::Array(items))
    }

    // ========================================================================
    // Mappings
    // ========================================================================

    /// Read a plain or quoted key token.
    fn parse_key(&mut self) -> Result<Value> {
        let token = self.cursor.peek();
        let key = match token.kind {
            TokenKind::PlainKey => token.text.as_str(),
            TokenKind::DoubleQuotedKey | TokenKind::SingleQuotedKey => {
                scalar::strip_quotes(&token.text)
            }
            _ => return self.fail_expected("expected key"),
        };
        self.cursor.advance();
        Ok(Value::from(key))
    }

    /// Parse `{key: value, ...}`. Indentation inside the braces is ignored.
    fn parse_flow_map(&mut self) -> Result<Value> {
        self.cursor.advance();
        let mut entries = Dictionary::new();
        let mut first = true;
        loop {
            self.cursor.ignore_white_space();
            if self.cursor.accept(TokenKind::CloseBrace) {
                break;
            }
            if !first {
                self.cursor.expect(TokenKind::Comma, "expected comma")?;
                self.cursor.ignore_white_space();
                if self.cursor.accept(TokenKind::CloseBrace) {
                    break;
                }
            }
            let key = self.parse_key()?;
            self.cursor.ignore_white_space();
            self.cursor.expect(TokenKind::Colon, "expected colon")?;
            self.cursor.ignore_white_space();
            let value = match self.cursor.peek().kind {
                TokenKind::Comma | TokenKind::CloseBrace => Value::Null,
                _ => self.parse_value()?,
            };
            entries.insert(key, value);
            first = false;
        }
        Ok(Value::Dictionary(entries))
    }

    /// Parse `key: value` entries, including `? complex key` entries.
    fn parse_block_map(&mut self) -> Result<Value> {
        let mut entries = Dictionary::new();
        while self.cursor.peek().kind.starts_key() {
            let key = if self.cursor.accept(TokenKind::QuestionMark) {
                let key = self.parse_value()?;
                self.cursor.ignore_space();
                if self.cursor.peek().kind != TokenKind::Colon {
                    entries.insert(key, Value::Null);
                    continue;
                }
                key
            } else {
                self.parse_key()?
            };

            self.cursor.ignore_space();
            self.cursor.expect(TokenKind::Colon, "expected colon")?;
            let value = self.parse_block_map_value()?;
            entries.insert(key, value);
            self.cursor.ignore_space();
        }
        Ok(Value::Dictionary(entries))
    }

    /// Parse what follows a block mapping colon.
    ///
    /// A key on a following line, the end of the enclosing block, or the end
    /// of the document leaves the value empty.
    fn parse_block_map_value(&mut self) -> Result<Value> {
        let crossed_line = self.cursor.skip_space_across_lines();
        if self.cursor.accept(TokenKind::Indent) {
            return self.parse_indented();
        }
        match self.cursor.peek().kind {
            TokenKind::Dedent | TokenKind::DocStart | TokenKind::DocEnd | TokenKind::End => {
                Ok(Value::Null)
            }
            kind if crossed_line && kind.starts_key() => Ok(Value::Null),
            _ => self.parse_value(),
        }
    }

    // ========================================================================
    // Block Scalars
    // ========================================================================

    /// Parse a block scalar header and the raw body token after it.
    fn parse_literal(&mut self) -> Result<Value> {
        let header = &self.cursor.advance().text;
        let body = self.cursor.peek();
        if body.kind != TokenKind::PlainString {
            return self.fail_expected("expected scalar block");
        }
        match block_scalar::reconstruct(header, &body.text) {
            Ok(text) => {
                self.cursor.advance();
                Ok(Value::String(text))
            }
            Err(source) => Err(ParseError::BlockScalar {
                source,
                context: self.cursor.build_context(),
            }),
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn fail_expected<T>(&mut self, message: &'static str) -> Result<T> {
        Err(ParseError::Expected {
            message,
            context: self.cursor.build_context(),
        })
    }
}

/// Strip the `&` or `*` marker from an anchor or alias token.
fn marker_name(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.as_str()
}
