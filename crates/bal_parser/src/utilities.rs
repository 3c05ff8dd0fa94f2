//! FIRST sets, synchronization sets and statement dispatch classification.

use bal_syntax::SyntaxKind;

use crate::token_set::TokenSet;

/// Tokens that begin a top-level construct. The definition loop resumes here
/// after an error.
pub(crate) const TOP_LEVEL_START: TokenSet = TokenSet::new(&[
    SyntaxKind::ImportKeyword,
    SyntaxKind::XmlnsKeyword,
    SyntaxKind::ServiceKeyword,
    SyntaxKind::FunctionKeyword,
    SyntaxKind::TypeKeyword,
    SyntaxKind::AnnotationKeyword,
    SyntaxKind::EndpointKeyword,
    SyntaxKind::PublicKeyword,
    SyntaxKind::NativeKeyword,
    SyntaxKind::AtToken,
    SyntaxKind::DocumentationTemplateStart,
    SyntaxKind::DeprecatedTemplateStart,
]);

/// Tokens a statement-level error skip stops at. Only reserved words that
/// cannot continue an expression are listed.
pub(crate) const STATEMENT_SYNC: TokenSet = TokenSet::new(&[
    SyntaxKind::SemicolonToken,
    SyntaxKind::CloseBraceToken,
    SyntaxKind::IfKeyword,
    SyntaxKind::MatchKeyword,
    SyntaxKind::ForeachKeyword,
    SyntaxKind::WhileKeyword,
    SyntaxKind::BreakKeyword,
    SyntaxKind::ForkKeyword,
    SyntaxKind::TryKeyword,
    SyntaxKind::ThrowKeyword,
    SyntaxKind::ReturnKeyword,
    SyntaxKind::TransactionKeyword,
    SyntaxKind::AbortKeyword,
    SyntaxKind::LockKeyword,
    SyntaxKind::ForeverKeyword,
    SyntaxKind::WorkerKeyword,
]);

/// Tokens that may begin a statement; kept equal to the kinds
/// `classify_statement_start` accepts.
pub(crate) const STATEMENT_START: TokenSet = TokenSet::new(&[
    SyntaxKind::IfKeyword,
    SyntaxKind::MatchKeyword,
    SyntaxKind::ForeachKeyword,
    SyntaxKind::WhileKeyword,
    SyntaxKind::ContinueKeyword,
    SyntaxKind::BreakKeyword,
    SyntaxKind::ForkKeyword,
    SyntaxKind::TryKeyword,
    SyntaxKind::ThrowKeyword,
    SyntaxKind::ReturnKeyword,
    SyntaxKind::TransactionKeyword,
    SyntaxKind::AbortKeyword,
    SyntaxKind::RetryKeyword,
    SyntaxKind::LockKeyword,
    SyntaxKind::XmlnsKeyword,
    SyntaxKind::ForeverKeyword,
    SyntaxKind::VarKeyword,
    SyntaxKind::FunctionKeyword,
    SyntaxKind::OpenParenToken,
    SyntaxKind::Identifier,
    SyntaxKind::ObjectKeyword,
    SyntaxKind::RecordKeyword,
    SyntaxKind::IntKeyword,
    SyntaxKind::FloatKeyword,
    SyntaxKind::BooleanKeyword,
    SyntaxKind::StringKeyword,
    SyntaxKind::BlobKeyword,
    SyntaxKind::MapKeyword,
    SyntaxKind::JsonKeyword,
    SyntaxKind::XmlKeyword,
    SyntaxKind::TableKeyword,
    SyntaxKind::StreamKeyword,
    SyntaxKind::AnyKeyword,
    SyntaxKind::TypedescKeyword,
    SyntaxKind::FutureKeyword,
    SyntaxKind::DecimalIntegerLiteral,
    SyntaxKind::HexIntegerLiteral,
    SyntaxKind::OctalIntegerLiteral,
    SyntaxKind::BinaryIntegerLiteral,
    SyntaxKind::DecimalFloatingPointLiteral,
    SyntaxKind::HexFloatingPointLiteral,
    SyntaxKind::QuotedStringLiteral,
    SyntaxKind::Base16BlobLiteral,
    SyntaxKind::Base64BlobLiteral,
    SyntaxKind::TrueKeyword,
    SyntaxKind::FalseKeyword,
    SyntaxKind::NullKeyword,
    SyntaxKind::OpenBracketToken,
    SyntaxKind::OpenBraceToken,
    SyntaxKind::LessThanToken,
    SyntaxKind::PlusToken,
    SyntaxKind::MinusToken,
    SyntaxKind::ExclamationToken,
    SyntaxKind::LengthofKeyword,
    SyntaxKind::UntaintKeyword,
    SyntaxKind::AwaitKeyword,
    SyntaxKind::CheckKeyword,
    SyntaxKind::StartKeyword,
    SyntaxKind::NewKeyword,
    SyntaxKind::FromKeyword,
    SyntaxKind::XmlLiteralStart,
    SyntaxKind::StringTemplateLiteralStart,
]);

/// How a statement is dispatched from its first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementStart {
    If,
    Match,
    Foreach,
    While,
    /// `continue;` or, when not followed by `;`, a call named `continue`.
    Continue,
    Break,
    Fork,
    Try,
    Throw,
    Return,
    Transaction,
    Abort,
    /// `retry;`
    Retry,
    Lock,
    Namespace,
    Forever,
    /// `var x = e;` or `var (a, b) = e;`
    Var,
    /// A variable definition of function type.
    FunctionType,
    /// `(`: a tuple-typed definition, a destructuring, or an expression.
    Parenthesized,
    /// A variable definition when a type name and an identifier follow,
    /// otherwise an expression-led statement.
    TypeOrExpression,
    Expression,
}

pub(crate) fn classify_statement_start(kind: SyntaxKind) -> Option<StatementStart> {
    let start = match kind {
        SyntaxKind::IfKeyword => StatementStart::If,
        SyntaxKind::MatchKeyword => StatementStart::Match,
        SyntaxKind::ForeachKeyword => StatementStart::Foreach,
        SyntaxKind::WhileKeyword => StatementStart::While,
        SyntaxKind::ContinueKeyword => StatementStart::Continue,
        SyntaxKind::BreakKeyword => StatementStart::Break,
        SyntaxKind::ForkKeyword => StatementStart::Fork,
        SyntaxKind::TryKeyword => StatementStart::Try,
        SyntaxKind::ThrowKeyword => StatementStart::Throw,
        SyntaxKind::ReturnKeyword => StatementStart::Return,
        SyntaxKind::TransactionKeyword => StatementStart::Transaction,
        SyntaxKind::AbortKeyword => StatementStart::Abort,
        SyntaxKind::RetryKeyword => StatementStart::Retry,
        SyntaxKind::LockKeyword => StatementStart::Lock,
        SyntaxKind::XmlnsKeyword => StatementStart::Namespace,
        SyntaxKind::ForeverKeyword => StatementStart::Forever,
        SyntaxKind::VarKeyword => StatementStart::Var,
        SyntaxKind::FunctionKeyword => StatementStart::FunctionType,
        SyntaxKind::OpenParenToken => StatementStart::Parenthesized,
        SyntaxKind::Identifier | SyntaxKind::ObjectKeyword | SyntaxKind::RecordKeyword => {
            StatementStart::TypeOrExpression
        }
        k if k.is_builtin_type_keyword() => StatementStart::TypeOrExpression,
        k if can_start_expression(k) => StatementStart::Expression,
        _ => return None,
    };
    Some(start)
}

#[inline]
pub(crate) fn can_start_statement(kind: SyntaxKind) -> bool {
    STATEMENT_START.contains(kind)
}

/// FIRST set of expressions. `foreach` and `continue` only start an
/// expression as a call name, which callers check separately.
pub(crate) fn can_start_expression(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || kind.is_builtin_type_keyword()
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::LengthofKeyword
                | SyntaxKind::UntaintKeyword
                | SyntaxKind::AwaitKeyword
                | SyntaxKind::CheckKeyword
                | SyntaxKind::StartKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::FromKeyword
                | SyntaxKind::XmlLiteralStart
                | SyntaxKind::StringTemplateLiteralStart
        )
}

/// FIRST set of type names.
pub(crate) fn can_start_type(kind: SyntaxKind) -> bool {
    kind.is_builtin_type_keyword()
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::OpenParenToken
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::RecordKeyword
        )
}

/// Literal tokens usable in a finite type or other literal-only position.
pub(crate) fn is_simple_literal_start(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || matches!(
            kind,
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword
        )
}

pub(crate) fn is_join_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::UnidirectionalKeyword
            | SyntaxKind::LeftKeyword
            | SyntaxKind::RightKeyword
            | SyntaxKind::FullKeyword
            | SyntaxKind::OuterKeyword
            | SyntaxKind::InnerKeyword
            | SyntaxKind::JoinKeyword
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every kind the tokenizer can produce outside the sub-language modes.
    fn default_mode_tokens() -> Vec<SyntaxKind> {
        let mut kinds = vec![
            SyntaxKind::EndOfFileToken,
            SyntaxKind::Identifier,
            SyntaxKind::DecimalIntegerLiteral,
            SyntaxKind::HexIntegerLiteral,
            SyntaxKind::OctalIntegerLiteral,
            SyntaxKind::BinaryIntegerLiteral,
            SyntaxKind::DecimalFloatingPointLiteral,
            SyntaxKind::HexFloatingPointLiteral,
            SyntaxKind::QuotedStringLiteral,
            SyntaxKind::Base16BlobLiteral,
            SyntaxKind::Base64BlobLiteral,
            SyntaxKind::XmlLiteralStart,
            SyntaxKind::StringTemplateLiteralStart,
            SyntaxKind::DocumentationTemplateStart,
            SyntaxKind::DeprecatedTemplateStart,
        ];
        kinds.extend_from_slice(SyntaxKind::KEYWORDS);
        kinds.extend_from_slice(SyntaxKind::PUNCTUATION);
        kinds
    }

    #[test]
    fn test_statement_first_set_matches_dispatch() {
        for kind in default_mode_tokens() {
            assert_eq!(
                can_start_statement(kind),
                classify_statement_start(kind).is_some(),
                "{:?}",
                kind
            );
        }
    }

    #[test]
    fn test_statement_dispatch() {
        assert_eq!(classify_statement_start(SyntaxKind::IfKeyword), Some(StatementStart::If));
        assert_eq!(
            classify_statement_start(SyntaxKind::MapKeyword),
            Some(StatementStart::TypeOrExpression)
        );
        assert_eq!(
            classify_statement_start(SyntaxKind::StartKeyword),
            Some(StatementStart::Expression)
        );
        assert_eq!(classify_statement_start(SyntaxKind::CloseBraceToken), None);
        assert_eq!(classify_statement_start(SyntaxKind::WorkerKeyword), None);
        assert_eq!(classify_statement_start(SyntaxKind::ElseKeyword), None);
    }

    #[test]
    fn test_sync_sets_do_not_start_expressions() {
        for kind in default_mode_tokens() {
            if STATEMENT_SYNC.contains(kind) {
                assert!(!can_start_expression(kind), "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_type_and_literal_starts() {
        assert!(can_start_type(SyntaxKind::FutureKeyword));
        assert!(can_start_type(SyntaxKind::RecordKeyword));
        assert!(!can_start_type(SyntaxKind::QuotedStringLiteral));
        assert!(is_simple_literal_start(SyntaxKind::NullKeyword));
        assert!(!is_simple_literal_start(SyntaxKind::MinusToken));
        assert!(is_join_start(SyntaxKind::UnidirectionalKeyword));
    }
}
