//! Input tokens as produced by the external tokenizer.

use crate::syntax_kind::SyntaxKind;
use bal_core::text::TextRange;

/// One classified lexical unit. The parser never mutates a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: String,
    pub range: TextRange,
}

impl Token {
    pub fn new(kind: SyntaxKind, text: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
        }
    }

    /// A keyword or punctuation token whose text is fixed by its kind.
    pub fn fixed(kind: SyntaxKind, pos: u32) -> Self {
        let text = kind
            .keyword_text()
            .or_else(|| kind.punctuation_text())
            .unwrap_or("");
        let end = pos + text.len() as u32;
        Self::new(kind, text, TextRange::new(pos, end))
    }

    pub fn end_of_file(pos: u32) -> Self {
        Self::new(SyntaxKind::EndOfFileToken, "", TextRange::empty(pos))
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_token_text() {
        let tok = Token::fixed(SyntaxKind::ServiceKeyword, 10);
        assert_eq!(tok.text, "service");
        assert_eq!(tok.range, TextRange::new(10, 17));

        let arrow = Token::fixed(SyntaxKind::RightArrowToken, 0);
        assert_eq!(arrow.text, "->");
        assert!(Token::end_of_file(3).range.is_empty());
    }
}
