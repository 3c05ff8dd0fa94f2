//! The result of parsing one compilation unit.

use crate::node::{CompilationUnit, Identifier, SyntaxToken};
use crate::token::Token;
use bal_core::intern::StringInterner;

/// A parse tree together with the token buffer it indexes into.
#[derive(Debug)]
pub struct ParseTree<'a> {
    pub file_name: String,
    pub root: CompilationUnit<'a>,
    pub tokens: Vec<Token>,
    pub interner: StringInterner,
}

impl<'a> ParseTree<'a> {
    /// The input token behind a `SyntaxToken`; `None` for tokens synthesized
    /// by recovery.
    pub fn token(&self, token: &SyntaxToken) -> Option<&Token> {
        if token.missing {
            return None;
        }
        self.tokens.get(token.index as usize)
    }

    pub fn token_text(&self, token: &SyntaxToken) -> &str {
        self.token(token).map(|t| t.text.as_str()).unwrap_or("")
    }

    pub fn name(&self, ident: &Identifier) -> &str {
        self.interner.resolve(ident.name)
    }

    pub fn has_errors(&self) -> bool {
        self.root.data.has_error()
    }
}
