//! bal_parser: recursive descent parser for the service-oriented language.
//!
//! Consumes a classified token stream and produces an arena-allocated parse
//! tree for one compilation unit, together with the syntax diagnostics
//! found along the way. Malformed input still yields a best-effort tree.

mod error;
mod options;
mod parser;
mod precedence;
mod token_set;
mod token_source;
mod utilities;

pub use error::{ParseError, TokenSourceError};
pub use options::ParseOptions;
pub use parser::Parser;
pub use precedence::{
    expression_operator, reference_operator, type_operator, Associativity, ExpressionPrecedence,
    Fixity, OperatorInfo, ReferencePrecedence, TypePrecedence,
};
pub use token_source::{TokenIter, TokenSource};

use bal_core::intern::StringInterner;
use bal_core::SyntaxArena;
use bal_diagnostics::Diagnostic;
use bal_syntax::{ParseTree, Token};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Parse one compilation unit from `source`.
///
/// Syntax errors are returned as diagnostics next to the tree; `Err` means
/// the token source itself failed.
#[instrument(level = "debug", skip_all, fields(file = file_name))]
pub fn parse_compilation_unit<'a>(
    arena: &'a SyntaxArena,
    file_name: &str,
    source: impl TokenSource + 'a,
    options: &ParseOptions,
    interner: &StringInterner,
) -> Result<(ParseTree<'a>, Vec<Diagnostic>), ParseError> {
    let parser = Parser::new(arena, file_name, source, options, interner);
    let (tree, diagnostics) = parser.parse()?;
    debug!(
        tokens = tree.tokens.len(),
        diagnostics = diagnostics.len(),
        "parsed compilation unit"
    );
    Ok((tree, diagnostics))
}

/// `parse_compilation_unit` over an already tokenized unit.
pub fn parse_tokens<'a>(
    arena: &'a SyntaxArena,
    file_name: &str,
    tokens: Vec<Token>,
    options: &ParseOptions,
    interner: &StringInterner,
) -> Result<(ParseTree<'a>, Vec<Diagnostic>), ParseError> {
    parse_compilation_unit(arena, file_name, tokens.into_iter(), options, interner)
}

/// Parse many units on the rayon pool, each with its own arena and cursor.
///
/// A tree borrows its arena, so it cannot leave the worker; `f` runs there
/// with the result and its output is returned. Results keep input order.
pub fn parse_units_parallel<R, F>(
    units: Vec<(String, Vec<Token>)>,
    options: &ParseOptions,
    interner: &StringInterner,
    f: F,
) -> Vec<R>
where
    R: Send,
    F: Fn(&str, Result<(ParseTree<'_>, Vec<Diagnostic>), ParseError>) -> R + Sync,
{
    debug!(units = units.len(), "parsing units in parallel");
    units
        .into_par_iter()
        .map(|(file_name, tokens)| {
            let arena = SyntaxArena::for_token_count(tokens.len());
            let result = parse_tokens(&arena, &file_name, tokens, options, interner);
            f(&file_name, result)
        })
        .collect()
}
