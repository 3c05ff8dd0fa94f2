//! Shared helpers for the parser integration tests.
//!
//! `lex` is a small default-mode tokenizer: enough to turn test snippets
//! into the classified token stream the parser expects. XML, string template
//! and documentation tokens come from the tokenizer's other modes, so tests
//! that need them splice explicit tokens in with `TokenBuilder::token`.

#![allow(dead_code)]

use bal_core::text::TextRange;
use bal_core::{StringInterner, SyntaxArena};
use bal_diagnostics::Diagnostic;
use bal_parser::{parse_tokens, ParseOptions};
use bal_syntax::coverage::round_trips;
use bal_syntax::{ParseTree, SyntaxKind, Token};

/// Builds a token stream with contiguous, non-overlapping ranges.
#[derive(Default)]
pub struct TokenBuilder {
    tokens: Vec<Token>,
    pos: u32,
}

impl TokenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `source` in default mode and append the tokens.
    pub fn code(mut self, source: &str) -> Self {
        lex_into(source, self.pos, &mut self.tokens);
        self.pos += source.len() as u32;
        self
    }

    /// Append one token with explicit text.
    pub fn token(mut self, kind: SyntaxKind, text: &str) -> Self {
        let end = self.pos + text.len() as u32;
        self.tokens.push(Token::new(kind, text, TextRange::new(self.pos, end)));
        self.pos = end;
        self
    }

    /// Append a keyword or punctuation token.
    pub fn fixed(mut self, kind: SyntaxKind) -> Self {
        let token = Token::fixed(kind, self.pos);
        self.pos = token.range.end;
        self.tokens.push(token);
        self
    }

    pub fn build(mut self) -> Vec<Token> {
        self.tokens.push(Token::end_of_file(self.pos));
        self.tokens
    }
}

/// Tokenize a default-mode snippet, end-of-input included.
pub fn lex(source: &str) -> Vec<Token> {
    TokenBuilder::new().code(source).build()
}

fn punctuation_by_length() -> Vec<(&'static str, SyntaxKind)> {
    let mut table: Vec<_> = SyntaxKind::PUNCTUATION
        .iter()
        .filter_map(|&kind| kind.punctuation_text().map(|text| (text, kind)))
        .collect();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
}

fn lex_into(source: &str, base: u32, out: &mut Vec<Token>) {
    let punctuation = punctuation_by_length();
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let start = i;
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if source[i..].starts_with("//") {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }
        let kind = if c.is_ascii_alphabetic() || c == b'_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            SyntaxKind::from_keyword(&source[start..i]).unwrap_or(SyntaxKind::Identifier)
        } else if c.is_ascii_digit() {
            lex_number(bytes, &mut i)
        } else if c == b'"' {
            i += 1;
            while i < bytes.len() && bytes[i] != b'"' {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(bytes.len());
            SyntaxKind::QuotedStringLiteral
        } else {
            let (text, kind) = punctuation
                .iter()
                .find(|(text, _)| source[i..].starts_with(text))
                .copied()
                .unwrap_or_else(|| panic!("unexpected character {:?} in test source", c as char));
            i += text.len();
            kind
        };
        let range = TextRange::new(base + start as u32, base + i as u32);
        out.push(Token::new(kind, &source[start..i], range));
    }
}

fn lex_number(bytes: &[u8], i: &mut usize) -> SyntaxKind {
    if bytes[*i] == b'0' && matches!(bytes.get(*i + 1), Some(b'x' | b'X')) {
        *i += 2;
        while *i < bytes.len() && bytes[*i].is_ascii_hexdigit() {
            *i += 1;
        }
        return SyntaxKind::HexIntegerLiteral;
    }
    while *i < bytes.len() && bytes[*i].is_ascii_digit() {
        *i += 1;
    }
    // `1..5` is a range, not a float.
    let fraction = bytes.get(*i) == Some(&b'.') && bytes.get(*i + 1).is_some_and(u8::is_ascii_digit);
    if !fraction {
        return SyntaxKind::DecimalIntegerLiteral;
    }
    *i += 1;
    while *i < bytes.len() && bytes[*i].is_ascii_digit() {
        *i += 1;
    }
    SyntaxKind::DecimalFloatingPointLiteral
}

/// Parse `tokens` and hand the tree and diagnostics to `f`.
pub fn with_tree<R>(tokens: Vec<Token>, f: impl FnOnce(&ParseTree<'_>, &[Diagnostic]) -> R) -> R {
    with_tree_options(tokens, &ParseOptions::default(), f)
}

pub fn with_tree_options<R>(
    tokens: Vec<Token>,
    options: &ParseOptions,
    f: impl FnOnce(&ParseTree<'_>, &[Diagnostic]) -> R,
) -> R {
    let arena = SyntaxArena::for_token_count(tokens.len());
    let interner = StringInterner::new();
    let (tree, diagnostics) =
        parse_tokens(&arena, "test.bal", tokens, options, &interner).expect("token stream is complete");
    f(&tree, &diagnostics)
}

/// Parse a default-mode snippet.
pub fn with_source<R>(source: &str, f: impl FnOnce(&ParseTree<'_>, &[Diagnostic]) -> R) -> R {
    with_tree(lex(source), f)
}

/// Parse a snippet that must produce no diagnostics.
pub fn with_clean_source<R>(source: &str, f: impl FnOnce(&ParseTree<'_>) -> R) -> R {
    with_source(source, |tree, diagnostics| {
        assert!(
            diagnostics.is_empty(),
            "unexpected diagnostics for {:?}: {:#?}",
            source,
            diagnostics.iter().map(|d| &d.message_text).collect::<Vec<_>>()
        );
        assert!(!tree.has_errors(), "tree flagged with errors for {:?}", source);
        assert!(round_trips(tree), "tree does not cover the tokens of {:?}", source);
        f(tree)
    })
}

/// Statements of `function main() { <body> }`.
pub fn with_main_body<R>(
    body: &str,
    f: impl FnOnce(&ParseTree<'_>, &[bal_syntax::Statement<'_>], &[Diagnostic]) -> R,
) -> R {
    let source = format!("function main() {{ {} }}", body);
    with_source(&source, |tree, diagnostics| {
        let statements = match &tree.root.definitions[0] {
            bal_syntax::Definition::Function(function) => function
                .body
                .as_ref()
                .map(|body| body.statements)
                .unwrap_or(&[]),
            other => panic!("expected a function, got {:?}", other),
        };
        f(tree, statements, diagnostics)
    })
}

pub fn codes(diagnostics: &[Diagnostic]) -> Vec<u32> {
    diagnostics.iter().map(|d| d.code).collect()
}
