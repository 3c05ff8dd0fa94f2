//! Fatal parse errors.
//!
//! Malformed input never produces one of these; it becomes diagnostics on a
//! best-effort tree. These are returned only when the token stream itself
//! cannot be trusted.

use bal_core::text::TextPos;

/// The token source failed to produce the next token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token source failed at offset {pos}: {message}")]
pub struct TokenSourceError {
    pub message: String,
    pub pos: TextPos,
}

impl TokenSourceError {
    pub fn new(message: impl Into<String>, pos: TextPos) -> Self {
        Self {
            message: message.into(),
            pos,
        }
    }
}

/// Why no parse tree could be returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    TokenSource(#[from] TokenSourceError),

    /// The source ran dry without yielding an end-of-input token.
    #[error("token stream ended after offset {after} without an end-of-input token")]
    MissingEndOfInput { after: TextPos },
}
