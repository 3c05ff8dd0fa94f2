//! Error recovery, parse limits and fatal token-source failures.

mod common;

use bal_core::{StringInterner, SyntaxArena};
use bal_diagnostics::DiagnosticCategory;
use bal_parser::{parse_compilation_unit, ParseError, ParseOptions, TokenIter, TokenSourceError};
use bal_syntax::*;
use common::*;

#[test]
fn test_top_level_junk_becomes_missing_definition() {
    with_source(")) function f() { }", |tree, diagnostics| {
        assert_eq!(codes(diagnostics), [1003]);
        assert_eq!(tree.root.definitions.len(), 2);
        assert!(matches!(tree.root.definitions[0], Definition::Missing(data) if data.is_missing()));
        assert!(matches!(tree.root.definitions[1], Definition::Function(_)));
    });
}

#[test]
fn test_unclosed_function_body_is_unterminated() {
    with_source("function f() { int a = 1;", |tree, diagnostics| {
        assert_eq!(codes(diagnostics), [1010]);
        assert!(diagnostics[0].message_text.contains("'}'"));
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected a function");
        };
        assert_eq!(function.body.as_ref().unwrap().statements.len(), 1);
        assert!(tree.has_errors());
    });
}

#[test]
fn test_unclosed_record_literal_at_end_of_input() {
    with_source("function f() { } int x = {a: 1", |tree, diagnostics| {
        assert_eq!(codes(diagnostics), [1010]);
        let span = diagnostics[0].span.expect("diagnostic has a span");
        assert_eq!((span.start, span.length), (25, 1));
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected the function to survive");
        };
        assert!(!function.data.has_error());
        assert_eq!(tree.name(&function.signature.name), "f");
    });
}

#[test]
fn test_missing_expression_keeps_following_statements() {
    with_main_body("int a = ; b = 2;", |_, statements, diagnostics| {
        assert_eq!(diagnostics[0].code, 1001);
        assert!(diagnostics[0].message_text.contains("expression"));
        assert!(statements.iter().any(|s| matches!(s, Statement::Assignment(_))));
    });
}

#[test]
fn test_unterminated_construct_resumes_at_next_definition() {
    with_source("function f() { x = [1, 2; } type T int;", |tree, diagnostics| {
        assert!(!diagnostics.is_empty());
        let last = tree.root.definitions.last().unwrap();
        let Definition::Type(ty) = last else {
            panic!("expected the type definition to survive, got {:?}", last);
        };
        assert_eq!(tree.name(&ty.name), "T");
    });
}

#[test]
fn test_nesting_depth_is_reported_once() {
    let options = ParseOptions {
        max_nesting_depth: 8,
        ..ParseOptions::default()
    };
    let source = "function f() { x = ((((((((((((1)))))))))))); } function g() { }";
    with_tree_options(lex(source), &options, |tree, diagnostics| {
        assert_eq!(codes(diagnostics), [1020]);
        assert!(diagnostics[0].message_text.contains('8'));
        assert_eq!(tree.root.definitions.len(), 2);
        let Definition::Function(g) = &tree.root.definitions[1] else {
            panic!("expected the second function");
        };
        assert_eq!(tree.name(&g.signature.name), "g");
        assert!(tree.has_errors());
    });
}

#[test]
fn test_default_depth_accepts_ordinary_nesting() {
    with_clean_source("function f() { x = ((((((((((((1)))))))))))); }", |_| {});
}

#[test]
fn test_diagnostic_limit_appends_one_warning() {
    let options = ParseOptions {
        max_diagnostics: 2,
        ..ParseOptions::default()
    };
    let source = "function f() { a = ; b = ; c = ; d = ; }";
    with_tree_options(lex(source), &options, |_, diagnostics| {
        assert_eq!(diagnostics.len(), 3);
        let warning = &diagnostics[2];
        assert_eq!(warning.code, 1023);
        assert!(matches!(warning.category, DiagnosticCategory::Warning));
        assert!(warning.message_text.contains('2'));
    });
}

#[test]
fn test_token_source_failure_is_fatal() {
    let mut tokens = lex("function f() { }");
    tokens.pop();
    let failure = TokenSourceError::new("invalid UTF-8", 17);
    let source = TokenIter(tokens.into_iter().map(Ok).chain(std::iter::once(Err(failure.clone()))));
    let arena = SyntaxArena::new();
    let result = parse_compilation_unit(
        &arena,
        "broken.bal",
        source,
        &ParseOptions::default(),
        &StringInterner::new(),
    );
    assert!(matches!(result, Err(ParseError::TokenSource(ref e)) if *e == failure));
}

#[test]
fn test_missing_end_of_input_is_fatal() {
    let mut tokens = lex("int x;");
    tokens.pop();
    let arena = SyntaxArena::new();
    let result = parse_compilation_unit(
        &arena,
        "short.bal",
        tokens.into_iter(),
        &ParseOptions::default(),
        &StringInterner::new(),
    );
    assert!(matches!(result, Err(ParseError::MissingEndOfInput { after: 6 })));
}

#[test]
fn test_reserved_names_follow_options() {
    let strict = ParseOptions {
        allow_any_identifier_names: false,
        ..ParseOptions::default()
    };
    let source = "function main() { any x = foreach(items); }";
    with_tree_options(lex(source), &strict, |_, diagnostics| {
        assert!(!diagnostics.is_empty());
    });
    with_clean_source(source, |_| {});
}
