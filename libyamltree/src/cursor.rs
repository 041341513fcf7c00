//! Read position over a token slice, plus the skip and diagnostic helpers
//! shared by every grammar rule.

use crate::error::{ParseError, Result};
use crate::token::{Token, TokenKind};

/// Returned by `peek` once the slice is exhausted, so a stream without an
/// explicit terminator still ends in a peek-stable sentinel.
static END: Token = Token::end();

pub(crate) struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
    context_limit: usize,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(tokens: &'t [Token], context_limit: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            context_limit,
        }
    }

    /// The current token. Never moves.
    pub(crate) fn peek(&self) -> &'t Token {
        self.tokens.get(self.pos).unwrap_or(&END)
    }

    /// Return the current token and step past it. The end sentinel is never
    /// stepped past.
    pub(crate) fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if token.kind != TokenKind::End {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn accept(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with `message`.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &'static str) -> Result<()> {
        if self.accept(kind) {
            Ok(())
        } else {
            Err(ParseError::Expected {
                message,
                context: self.build_context(),
            })
        }
    }

    /// Consume tokens from the current position, concatenating their raw
    /// text until the configured limit is reached or the stream ends.
    ///
    /// Only call this when the parse is being abandoned.
    pub(crate) fn build_context(&mut self) -> String {
        let mut context = String::new();
        while context.chars().count() < self.context_limit && self.peek().kind != TokenKind::End
        {
            context.push_str(&self.advance().text);
        }
        context
    }

    fn skip_while(&mut self, skip: impl Fn(TokenKind) -> bool) {
        while skip(self.peek().kind) {
            self.advance();
        }
    }

    /// Skip comments, spaces, blank lines and newlines.
    pub(crate) fn ignore_space(&mut self) {
        self.skip_while(TokenKind::is_space);
    }

    /// Skip spaces and indentation changes.
    pub(crate) fn ignore_white_space(&mut self) {
        self.skip_while(|kind| {
            kind.is_space() || matches!(kind, TokenKind::Indent | TokenKind::Dedent)
        });
    }

    /// Skip spaces and document-end markers.
    pub(crate) fn ignore_doc_end(&mut self) {
        self.skip_while(|kind| kind.is_space() || kind == TokenKind::DocEnd);
    }

    /// Skip spaces, reporting whether a line break was among them.
    pub(crate) fn skip_space_across_lines(&mut self) -> bool {
        let mut crossed = false;
        while self.peek().kind.is_space() {
            crossed |= matches!(
                self.advance().kind,
                TokenKind::Newline | TokenKind::BlankLine
            );
        }
        crossed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind::*;

    fn tokens(pairs: &[(TokenKind, &str)]) -> Vec<Token> {
        pairs.iter().map(|(kind, text)| Token::new(*kind, *text)).collect()
    }

    #[test]
    fn end_is_peek_stable() {
        let toks = tokens(&[(PlainString, "a"), (End, "")]);
        let mut cursor = Cursor::new(&toks, 50);
        assert_eq!(cursor.advance().kind, PlainString);
        assert_eq!(cursor.advance().kind, End);
        assert_eq!(cursor.advance().kind, End);
        assert_eq!(cursor.peek().kind, End);
    }

    #[test]
    fn unterminated_slice_ends_in_sentinel() {
        let toks = tokens(&[(PlainString, "a")]);
        let mut cursor = Cursor::new(&toks, 50);
        cursor.advance();
        assert_eq!(cursor.peek().kind, End);
    }

    #[test]
    fn accept_leaves_cursor_on_mismatch() {
        let toks = tokens(&[(Colon, ":"), (End, "")]);
        let mut cursor = Cursor::new(&toks, 50);
        assert!(!cursor.accept(Comma));
        assert!(cursor.accept(Colon));
        assert_eq!(cursor.peek().kind, End);
    }

    #[test]
    fn expect_reports_context() {
        let toks = tokens(&[
            (PlainKey, "b"),
            (Colon, ":"),
            (Space, " "),
            (DecimalInt, "2"),
            (End, ""),
        ]);
        let mut cursor = Cursor::new(&toks, 50);
        let err = cursor.expect(Dedent, "expected dedent").unwrap_err();
        assert_eq!(err.to_string(), "expected dedent, b: 2");
    }

    #[test]
    fn context_stops_once_limit_is_reached() {
        let toks = tokens(&[
            (PlainString, "abcd"),
            (Space, " "),
            (PlainString, "efgh"),
            (End, ""),
        ]);
        let mut cursor = Cursor::new(&toks, 3);
        assert_eq!(cursor.build_context(), "abcd");
        assert_eq!(cursor.peek().kind, Space);
    }

    #[test]
    fn skip_sets() {
        let toks = tokens(&[
            (Comment, "# c"),
            (Newline, "\n"),
            (Indent, ""),
            (BlankLine, "\n"),
            (Dedent, ""),
            (DocEnd, "..."),
            (Space, " "),
            (End, ""),
        ]);

        let mut cursor = Cursor::new(&toks, 50);
        cursor.ignore_space();
        assert_eq!(cursor.peek().kind, Indent);

        let mut cursor = Cursor::new(&toks, 50);
        cursor.ignore_white_space();
        assert_eq!(cursor.peek().kind, DocEnd);

        let mut cursor = Cursor::new(&toks[4..], 50);
        cursor.advance();
        cursor.ignore_doc_end();
        assert_eq!(cursor.peek().kind, End);
    }

    #[test]
    fn reports_crossed_line_breaks() {
        let toks = tokens(&[(Space, " "), (Comment, "# c"), (PlainKey, "k"), (End, "")]);
        let mut cursor = Cursor::new(&toks, 50);
        assert!(!cursor.skip_space_across_lines());

        let toks = tokens(&[(Space, " "), (Newline, "\n"), (PlainKey, "k"), (End, "")]);
        let mut cursor = Cursor::new(&toks, 50);
        assert!(cursor.skip_space_across_lines());
        assert_eq!(cursor.peek().kind, PlainKey);
    }
}
