//! Operator tables and the precedence-climbing engine.
//!
//! Type names, variable references and expressions are all left-recursive
//! families: a primary followed by postfix or infix operators. Each family
//! supplies an `OperatorGrammar`; `climb` does the rest.

use bal_syntax::SyntaxKind;

use crate::parser::{Marker, Parser};

/// Expression binding powers, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ExpressionPrecedence {
    Lowest = 0,
    Elvis = 1,
    MatchSuffix = 2,
    Ternary = 3,
    Range = 4,
    LogicalOr = 5,
    LogicalAnd = 6,
    Equality = 7,
    Relational = 8,
    Additive = 9,
    Multiplicative = 10,
    Power = 11,
    Unary = 12,
}

/// Type-name suffix binding powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypePrecedence {
    Lowest = 0,
    Union = 1,
    Nullable = 2,
    Array = 3,
}

/// Variable-reference suffix binding powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ReferencePrecedence {
    Lowest = 0,
    Invocation = 1,
    XmlAttribute = 2,
    Field = 3,
    Index = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Infix,
    Postfix,
}

/// One row of an operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub bp: u8,
    pub assoc: Associativity,
    pub fixity: Fixity,
    /// Node kind built when the operator is applied.
    pub node: SyntaxKind,
}

impl OperatorInfo {
    const fn infix(bp: u8, assoc: Associativity, node: SyntaxKind) -> Self {
        Self {
            bp,
            assoc,
            fixity: Fixity::Infix,
            node,
        }
    }

    const fn postfix(bp: u8, node: SyntaxKind) -> Self {
        Self {
            bp,
            assoc: Associativity::Left,
            fixity: Fixity::Postfix,
            node,
        }
    }

    /// Minimum binding power for the right operand of an infix operator.
    #[inline]
    pub fn next_min_bp(&self) -> u8 {
        match self.assoc {
            Associativity::Left => self.bp + 1,
            Associativity::Right => self.bp,
        }
    }
}

/// Binary, ternary, elvis, range and `but` operators.
pub fn expression_operator(kind: SyntaxKind) -> Option<OperatorInfo> {
    use Associativity::*;
    use ExpressionPrecedence as P;
    let info = match kind {
        SyntaxKind::QuestionColonToken => {
            OperatorInfo::infix(P::Elvis as u8, Left, SyntaxKind::ElvisExpression)
        }
        SyntaxKind::ButKeyword => {
            OperatorInfo::postfix(P::MatchSuffix as u8, SyntaxKind::MatchExpression)
        }
        SyntaxKind::QuestionToken => {
            OperatorInfo::infix(P::Ternary as u8, Right, SyntaxKind::TernaryExpression)
        }
        SyntaxKind::DotDotToken | SyntaxKind::DotDotLessThanToken => {
            OperatorInfo::infix(P::Range as u8, Left, SyntaxKind::IntegerRangeExpression)
        }
        SyntaxKind::BarBarToken => {
            OperatorInfo::infix(P::LogicalOr as u8, Left, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::AmpersandAmpersandToken => {
            OperatorInfo::infix(P::LogicalAnd as u8, Left, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => {
            OperatorInfo::infix(P::Equality as u8, Left, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken => {
            OperatorInfo::infix(P::Relational as u8, Left, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
            OperatorInfo::infix(P::Additive as u8, Left, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorInfo::infix(P::Multiplicative as u8, Left, SyntaxKind::BinaryExpression)
        }
        SyntaxKind::CaretToken => {
            OperatorInfo::infix(P::Power as u8, Right, SyntaxKind::BinaryExpression)
        }
        _ => return None,
    };
    Some(info)
}

/// Array, nullable and union suffixes on a type name.
pub fn type_operator(kind: SyntaxKind) -> Option<OperatorInfo> {
    let info = match kind {
        SyntaxKind::OpenBracketToken => {
            OperatorInfo::postfix(TypePrecedence::Array as u8, SyntaxKind::ArrayTypeName)
        }
        SyntaxKind::QuestionToken => {
            OperatorInfo::postfix(TypePrecedence::Nullable as u8, SyntaxKind::NullableTypeName)
        }
        SyntaxKind::BarToken => {
            OperatorInfo::postfix(TypePrecedence::Union as u8, SyntaxKind::UnionTypeName)
        }
        _ => return None,
    };
    Some(info)
}

/// Suffixes on a variable reference. `.` is ambiguous between a field access
/// and a method invocation, so the two tokens after it are consulted. `[N..`
/// is an event count on a pattern edge, never an index.
pub fn reference_operator(
    kind: SyntaxKind,
    next: SyntaxKind,
    after: SyntaxKind,
    any_identifier_names: bool,
) -> Option<OperatorInfo> {
    let is_name =
        |k: SyntaxKind| k == SyntaxKind::Identifier || (any_identifier_names && k.is_any_identifier_keyword());
    let info = match kind {
        SyntaxKind::OpenBracketToken
            if !(next.is_integer_literal() && after == SyntaxKind::DotDotToken) =>
        {
            OperatorInfo::postfix(ReferencePrecedence::Index as u8, SyntaxKind::IndexReference)
        }
        SyntaxKind::DotToken if is_name(next) && after == SyntaxKind::OpenParenToken => {
            OperatorInfo::postfix(
                ReferencePrecedence::Invocation as u8,
                SyntaxKind::MethodInvocation,
            )
        }
        SyntaxKind::DotToken
            if next == SyntaxKind::Identifier || next == SyntaxKind::AsteriskToken =>
        {
            OperatorInfo::postfix(ReferencePrecedence::Field as u8, SyntaxKind::FieldReference)
        }
        SyntaxKind::ExclamationToken if next == SyntaxKind::Identifier => {
            OperatorInfo::postfix(ReferencePrecedence::Field as u8, SyntaxKind::FieldReference)
        }
        SyntaxKind::AtToken => OperatorInfo::postfix(
            ReferencePrecedence::XmlAttribute as u8,
            SyntaxKind::XmlAttributeReference,
        ),
        _ => return None,
    };
    Some(info)
}

/// A left-recursive grammar family driven by `climb`.
pub(crate) trait OperatorGrammar<'a> {
    type Node;

    fn parse_primary(p: &mut Parser<'a>) -> Self::Node;

    /// The operator at the current token, if any. Must not consume.
    fn operator(p: &mut Parser<'a>) -> Option<OperatorInfo>;

    /// Consume a postfix operator and wrap `lhs`. `m` marks where `lhs` starts.
    fn apply_postfix(p: &mut Parser<'a>, m: Marker, lhs: Self::Node, op: OperatorInfo)
        -> Self::Node;

    /// Consume an infix operator, parse the right operand at `next_min_bp`
    /// and combine. Grammars whose `operator` table is postfix-only keep
    /// the default; `climb` only calls this for `Fixity::Infix` entries.
    fn apply_infix(
        _p: &mut Parser<'a>,
        _m: Marker,
        _lhs: Self::Node,
        op: OperatorInfo,
        _next_min_bp: u8,
    ) -> Self::Node {
        unreachable!("{:?} is not an infix operator of this grammar", op.node)
    }
}

/// Parse a primary, then apply every operator binding at least `min_bp`.
pub(crate) fn climb<'a, G: OperatorGrammar<'a>>(p: &mut Parser<'a>, min_bp: u8) -> G::Node {
    let m = p.start();
    let mut lhs = G::parse_primary(p);
    loop {
        if p.is_unwinding() {
            break;
        }
        let Some(op) = G::operator(p) else {
            break;
        };
        if op.bp < min_bp {
            break;
        }
        lhs = match op.fixity {
            Fixity::Postfix => G::apply_postfix(p, m, lhs, op),
            Fixity::Infix => {
                let next = op.next_min_bp();
                G::apply_infix(p, m, lhs, op, next)
            }
        };
    }
    lhs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(kind: SyntaxKind) -> u8 {
        expression_operator(kind).map(|op| op.bp).unwrap_or(0)
    }

    #[test]
    fn test_type_and_reference_tables_are_postfix_only() {
        let kinds = [
            SyntaxKind::OpenBracketToken,
            SyntaxKind::QuestionToken,
            SyntaxKind::BarToken,
            SyntaxKind::DotToken,
            SyntaxKind::ExclamationToken,
            SyntaxKind::AtToken,
        ];
        let followers = [
            (SyntaxKind::Identifier, SyntaxKind::OpenParenToken),
            (SyntaxKind::Identifier, SyntaxKind::SemicolonToken),
            (SyntaxKind::AsteriskToken, SyntaxKind::SemicolonToken),
            (SyntaxKind::DecimalIntegerLiteral, SyntaxKind::CloseBracketToken),
        ];
        for kind in kinds {
            if let Some(op) = type_operator(kind) {
                assert_eq!(op.fixity, Fixity::Postfix, "type {:?}", kind);
            }
            for (next, after) in followers {
                for any_names in [false, true] {
                    if let Some(op) = reference_operator(kind, next, after, any_names) {
                        assert_eq!(op.fixity, Fixity::Postfix, "reference {:?} {:?}", kind, next);
                    }
                }
            }
        }
        assert!(type_operator(SyntaxKind::BarToken).is_some());
        assert!(reference_operator(
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::OpenParenToken,
            true
        )
        .is_some());
    }

    #[test]
    fn test_expression_levels_are_ordered() {
        let low_to_high = [
            SyntaxKind::QuestionColonToken,
            SyntaxKind::ButKeyword,
            SyntaxKind::QuestionToken,
            SyntaxKind::DotDotToken,
            SyntaxKind::BarBarToken,
            SyntaxKind::AmpersandAmpersandToken,
            SyntaxKind::EqualsEqualsToken,
            SyntaxKind::LessThanToken,
            SyntaxKind::PlusToken,
            SyntaxKind::AsteriskToken,
            SyntaxKind::CaretToken,
        ];
        for pair in low_to_high.windows(2) {
            assert!(bp(pair[0]) < bp(pair[1]), "{:?} vs {:?}", pair[0], pair[1]);
        }
        assert!(bp(SyntaxKind::CaretToken) < ExpressionPrecedence::Unary as u8);
    }

    #[test]
    fn test_associativity() {
        let power = expression_operator(SyntaxKind::CaretToken).unwrap();
        assert_eq!(power.assoc, Associativity::Right);
        assert_eq!(power.next_min_bp(), power.bp);

        let minus = expression_operator(SyntaxKind::MinusToken).unwrap();
        assert_eq!(minus.next_min_bp(), minus.bp + 1);

        let ternary = expression_operator(SyntaxKind::QuestionToken).unwrap();
        assert_eq!(ternary.assoc, Associativity::Right);
        assert_eq!(
            expression_operator(SyntaxKind::ButKeyword).unwrap().fixity,
            Fixity::Postfix
        );
    }

    #[test]
    fn test_non_operators() {
        assert!(expression_operator(SyntaxKind::SemicolonToken).is_none());
        assert!(expression_operator(SyntaxKind::RightArrowToken).is_none());
        assert!(type_operator(SyntaxKind::CommaToken).is_none());
    }

    #[test]
    fn test_type_suffix_order() {
        let array = type_operator(SyntaxKind::OpenBracketToken).unwrap();
        let nullable = type_operator(SyntaxKind::QuestionToken).unwrap();
        let union = type_operator(SyntaxKind::BarToken).unwrap();
        assert!(array.bp > nullable.bp && nullable.bp > union.bp);
        assert_eq!(union.node, SyntaxKind::UnionTypeName);
    }

    #[test]
    fn test_reference_dot_disambiguation() {
        use SyntaxKind::*;
        let field = reference_operator(DotToken, Identifier, SemicolonToken, true).unwrap();
        assert_eq!(field.node, FieldReference);
        let call = reference_operator(DotToken, Identifier, OpenParenToken, true).unwrap();
        assert_eq!(call.node, MethodInvocation);
        let keyword_call = reference_operator(DotToken, MapKeyword, OpenParenToken, true).unwrap();
        assert_eq!(keyword_call.node, MethodInvocation);
        assert!(reference_operator(DotToken, MapKeyword, OpenParenToken, false).is_none());
        let all = reference_operator(DotToken, AsteriskToken, SemicolonToken, true).unwrap();
        assert_eq!(all.node, FieldReference);
        assert!(reference_operator(ExclamationToken, OpenParenToken, EndOfFileToken, true).is_none());

        let index = reference_operator(OpenBracketToken, Identifier, CloseBracketToken, true).unwrap();
        assert!(reference_operator(OpenBracketToken, DecimalIntegerLiteral, DotDotToken, true).is_none());
        let attribute = reference_operator(AtToken, Identifier, EndOfFileToken, true).unwrap();
        assert!(index.bp > field.bp && field.bp > attribute.bp && attribute.bp > call.bp);
    }
}
