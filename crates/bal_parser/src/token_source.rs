//! Token input.
//!
//! The tokenizer is an external collaborator. The parser only needs a pull
//! interface; `TokenCursor` buffers what has been pulled so lookahead and
//! speculative parses can move backwards.

use crate::error::{ParseError, TokenSourceError};
use bal_core::text::{TextPos, TextRange};
use bal_syntax::{SyntaxKind, Token};

/// A lazy stream of tokens. `Ok(None)` means the stream is exhausted; a
/// well-formed stream ends with an `EndOfFileToken` before that.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Option<Token>, TokenSourceError>;
}

impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Result<Option<Token>, TokenSourceError> {
        Ok(self.next())
    }
}

/// Adapts a fallible token iterator, e.g. a lexer over a file that may fail
/// to decode.
#[derive(Debug)]
pub struct TokenIter<I>(pub I);

impl<I> TokenSource for TokenIter<I>
where
    I: Iterator<Item = Result<Token, TokenSourceError>>,
{
    fn next_token(&mut self) -> Result<Option<Token>, TokenSourceError> {
        self.0.next().transpose()
    }
}

/// Buffered, rewindable view over a `TokenSource`.
///
/// The buffer always ends with an end-of-input token once the source is
/// exhausted. If the source fails or runs dry early, a synthetic one is
/// appended so the parse can finish, and the failure is kept for the caller.
pub(crate) struct TokenCursor<'a> {
    source: Box<dyn TokenSource + 'a>,
    tokens: Vec<Token>,
    position: usize,
    exhausted: bool,
    fatal: Option<ParseError>,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: impl TokenSource + 'a) -> Self {
        Self {
            source: Box::new(source),
            tokens: Vec::new(),
            position: 0,
            exhausted: false,
            fatal: None,
        }
    }

    fn fill(&mut self, index: usize) {
        while !self.exhausted && self.tokens.len() <= index {
            match self.source.next_token() {
                Ok(Some(token)) => {
                    if token.kind == SyntaxKind::EndOfFileToken {
                        self.exhausted = true;
                    }
                    self.tokens.push(token);
                }
                Ok(None) => {
                    let after = self.last_end();
                    self.fatal = Some(ParseError::MissingEndOfInput { after });
                    self.synthesize_end_of_file(after);
                }
                Err(error) => {
                    let at = error.pos.max(self.last_end());
                    self.fatal = Some(error.into());
                    self.synthesize_end_of_file(at);
                }
            }
        }
    }

    fn last_end(&self) -> TextPos {
        self.tokens.last().map(|t| t.range.end).unwrap_or(0)
    }

    fn synthesize_end_of_file(&mut self, pos: TextPos) {
        self.tokens.push(Token::end_of_file(pos));
        self.exhausted = true;
    }

    /// The token `k` positions ahead; clamps to the end-of-input token.
    pub fn peek(&mut self, k: usize) -> &Token {
        self.fill(self.position + k);
        let index = (self.position + k).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Advance past the current token. Never moves past end-of-input.
    pub fn bump(&mut self) {
        self.fill(self.position);
        if self.position < self.tokens.len()
            && self.tokens[self.position].kind != SyntaxKind::EndOfFileToken
        {
            self.position += 1;
        }
    }

    /// Consume the end-of-input token itself. Only the compilation unit does this.
    pub fn bump_end_of_file(&mut self) {
        self.fill(self.position);
        if self.position < self.tokens.len()
            && self.tokens[self.position].kind == SyntaxKind::EndOfFileToken
        {
            self.position += 1;
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn rewind(&mut self, position: usize) {
        debug_assert!(position <= self.tokens.len());
        self.position = position;
    }

    /// A token already pulled into the buffer.
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Byte range covered by buffered tokens `start..end`.
    pub fn range_of(&self, start: usize, end: usize) -> Option<TextRange> {
        if start >= end {
            return None;
        }
        let first = self.tokens.get(start)?;
        let last = self.tokens.get(end - 1)?;
        Some(TextRange::new(first.range.pos, last.range.end))
    }

    /// Hand over the buffer, or the failure that cut the stream short.
    pub fn into_tokens(self) -> Result<Vec<Token>, ParseError> {
        match self.fatal {
            Some(error) => Err(error),
            None => Ok(self.tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(text: &str, pos: u32) -> Token {
        Token::new(
            SyntaxKind::Identifier,
            text,
            TextRange::new(pos, pos + text.len() as u32),
        )
    }

    #[test]
    fn test_peek_clamps_to_end_of_file() {
        let tokens = vec![ident("a", 0), Token::end_of_file(1)];
        let mut cursor = TokenCursor::new(tokens.into_iter());
        assert_eq!(cursor.peek(0).kind, SyntaxKind::Identifier);
        assert_eq!(cursor.peek(5).kind, SyntaxKind::EndOfFileToken);
        cursor.bump();
        cursor.bump();
        cursor.bump();
        assert_eq!(cursor.position(), 1);
        cursor.bump_end_of_file();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.peek(0).kind, SyntaxKind::EndOfFileToken);
        assert_eq!(cursor.into_tokens().unwrap().len(), 2);
    }

    #[test]
    fn test_rewind_replays_buffered_tokens() {
        let tokens = vec![ident("a", 0), ident("b", 2), Token::end_of_file(3)];
        let mut cursor = TokenCursor::new(tokens.into_iter());
        cursor.bump();
        let saved = cursor.position();
        cursor.bump();
        assert_eq!(cursor.peek(0).kind, SyntaxKind::EndOfFileToken);
        cursor.rewind(saved);
        assert_eq!(cursor.peek(0).text, "b");
        assert_eq!(cursor.range_of(0, 2), Some(TextRange::new(0, 3)));
        assert_eq!(cursor.range_of(1, 1), None);
    }

    #[test]
    fn test_missing_end_of_input_is_fatal() {
        let mut cursor = TokenCursor::new(vec![ident("a", 0)].into_iter());
        assert_eq!(cursor.peek(1).kind, SyntaxKind::EndOfFileToken);
        assert_eq!(cursor.peek(1).range, TextRange::empty(1));
        assert_eq!(
            cursor.into_tokens(),
            Err(ParseError::MissingEndOfInput { after: 1 })
        );
    }

    #[test]
    fn test_source_error_is_fatal() {
        let items = vec![
            Ok(ident("a", 0)),
            Err(TokenSourceError::new("bad byte", 4)),
        ];
        let mut cursor = TokenCursor::new(TokenIter(items.into_iter()));
        cursor.bump();
        assert_eq!(cursor.peek(0).kind, SyntaxKind::EndOfFileToken);
        assert!(matches!(
            cursor.into_tokens(),
            Err(ParseError::TokenSource(TokenSourceError { pos: 4, .. }))
        ));
    }
}
