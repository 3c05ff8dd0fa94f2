//! Expressions and variable references.
//!
//! Both families are left-recursive and go through `climb`: references with
//! field, index, attribute and method suffixes; expressions with the binary,
//! ternary, elvis, range and `but` operators.

use super::*;
use crate::precedence::{
    climb, expression_operator, reference_operator, ExpressionPrecedence, OperatorGrammar,
    OperatorInfo, TypePrecedence,
};
use crate::utilities::*;

struct ReferenceGrammar;

impl<'a> OperatorGrammar<'a> for ReferenceGrammar {
    type Node = VariableReference<'a>;

    fn parse_primary(p: &mut Parser<'a>) -> VariableReference<'a> {
        let m = p.start();
        let kind = p.current_token();
        let is_call = p.is_any_identifier_name(kind) && p.nth_at(1, SyntaxKind::OpenParenToken);
        if kind != SyntaxKind::Identifier && !is_call {
            p.error_expected("variable reference");
            return VariableReference::Missing(p.missing_data(SyntaxKind::MissingReference));
        }
        let name = p.parse_name_reference();
        if p.at(SyntaxKind::OpenParenToken) {
            let arguments = p.parse_argument_list();
            return VariableReference::FunctionInvocation(FunctionInvocation {
                data: p.finish(m, SyntaxKind::FunctionInvocation),
                name,
                arguments,
            });
        }
        VariableReference::Simple(SimpleVariableReference {
            data: p.finish(m, SyntaxKind::SimpleVariableReference),
            name,
        })
    }

    fn operator(p: &mut Parser<'a>) -> Option<OperatorInfo> {
        let kind = p.current_token();
        let next = p.nth(1);
        let after = p.nth(2);
        reference_operator(kind, next, after, p.allow_any_identifier_names())
    }

    fn apply_postfix(
        p: &mut Parser<'a>,
        m: Marker,
        lhs: VariableReference<'a>,
        op: OperatorInfo,
    ) -> VariableReference<'a> {
        let target = p.alloc(lhs);
        match op.node {
            SyntaxKind::IndexReference => {
                let open = p.bump();
                let index = p.parse_expression();
                p.expect_closing(&open, SyntaxKind::CloseBracketToken, "index");
                VariableReference::Index(IndexReference {
                    data: p.finish(m, SyntaxKind::IndexReference),
                    target,
                    index,
                })
            }
            SyntaxKind::MethodInvocation => {
                p.bump();
                let name = p.expect_any_identifier_name();
                let arguments = p.parse_argument_list();
                VariableReference::Invocation(MethodInvocation {
                    data: p.finish(m, SyntaxKind::MethodInvocation),
                    target,
                    name,
                    arguments,
                })
            }
            SyntaxKind::XmlAttributeReference => {
                p.bump();
                let index = if p.at(SyntaxKind::OpenBracketToken) {
                    let open = p.bump();
                    let index = p.parse_expression();
                    p.expect_closing(&open, SyntaxKind::CloseBracketToken, "attribute index");
                    Some(index)
                } else {
                    None
                };
                VariableReference::XmlAttribute(XmlAttributeReference {
                    data: p.finish(m, SyntaxKind::XmlAttributeReference),
                    target,
                    index,
                })
            }
            _ => {
                let accessor = p.bump();
                let field = if p.at(SyntaxKind::AsteriskToken) {
                    FieldName::All(p.bump())
                } else {
                    FieldName::Name(p.expect_identifier())
                };
                VariableReference::Field(FieldReference {
                    data: p.finish(m, SyntaxKind::FieldReference),
                    target,
                    accessor,
                    field,
                })
            }
        }
    }

}

struct ExpressionGrammar;

impl<'a> OperatorGrammar<'a> for ExpressionGrammar {
    type Node = Expression<'a>;

    fn parse_primary(p: &mut Parser<'a>) -> Expression<'a> {
        p.parse_primary_expression()
    }

    fn operator(p: &mut Parser<'a>) -> Option<OperatorInfo> {
        match p.current_token() {
            SyntaxKind::ButKeyword if !p.nth_at(1, SyntaxKind::OpenBraceToken) => None,
            kind => expression_operator(kind),
        }
    }

    /// `subject but { T x => e, ... }`
    fn apply_postfix(p: &mut Parser<'a>, m: Marker, lhs: Expression<'a>, _op: OperatorInfo) -> Expression<'a> {
        let subject = p.alloc(lhs);
        p.bump();
        let open = p.bump();
        let clauses = p.parse_separated(SyntaxKind::CloseBraceToken, |p| {
            let cm = p.start();
            let type_name = p.parse_type_name();
            let binding = p.optional_identifier();
            p.expect_token(SyntaxKind::EqualsGreaterThanToken);
            let expression = p.parse_expression();
            MatchExpressionClause {
                data: p.finish(cm, SyntaxKind::MatchExpressionClause),
                type_name,
                binding,
                expression,
            }
        });
        let close = p.expect_closing(&open, SyntaxKind::CloseBraceToken, "match expression");
        Expression::Match(MatchExpression {
            data: p.finish_delimited(m, SyntaxKind::MatchExpression, &close),
            subject,
            clauses: p.alloc_list(clauses),
        })
    }

    fn apply_infix(
        p: &mut Parser<'a>,
        m: Marker,
        lhs: Expression<'a>,
        op: OperatorInfo,
        next_min_bp: u8,
    ) -> Expression<'a> {
        let left = p.alloc(lhs);
        if op.node == SyntaxKind::TernaryExpression {
            p.bump();
            let then_expression = p.parse_operand(ExpressionPrecedence::Lowest as u8);
            p.expect_token(SyntaxKind::ColonToken);
            let else_expression = p.parse_operand(next_min_bp);
            return Expression::Ternary(TernaryExpression {
                data: p.finish(m, SyntaxKind::TernaryExpression),
                condition: left,
                then_expression,
                else_expression,
            });
        }
        let operator = p.bump();
        let right = p.parse_operand(next_min_bp);
        let binary = BinaryExpression {
            data: p.finish(m, op.node),
            left,
            operator,
            right,
        };
        match op.node {
            SyntaxKind::IntegerRangeExpression => Expression::Range(binary),
            SyntaxKind::ElvisExpression => Expression::Elvis(binary),
            _ => Expression::Binary(binary),
        }
    }
}

impl<'a> Parser<'a> {
    pub(super) fn parse_expression(&mut self) -> &'a Expression<'a> {
        self.parse_operand(ExpressionPrecedence::Lowest as u8)
    }

    /// An expression whose operators bind at least `min_bp`.
    pub(super) fn parse_expression_at(&mut self, min_bp: u8) -> Expression<'a> {
        self.nested(
            |p| climb::<ExpressionGrammar>(p, min_bp),
            |p| Expression::Missing(p.missing_data(SyntaxKind::MissingExpression)),
        )
    }

    fn parse_operand(&mut self, min_bp: u8) -> &'a Expression<'a> {
        let expression = self.parse_expression_at(min_bp);
        self.alloc(expression)
    }

    pub(super) fn parse_variable_reference(&mut self) -> &'a VariableReference<'a> {
        let reference = self.parse_variable_reference_node();
        self.alloc(reference)
    }

    pub(super) fn parse_variable_reference_node(&mut self) -> VariableReference<'a> {
        self.nested(
            |p| climb::<ReferenceGrammar>(p, 0),
            |p| VariableReference::Missing(p.missing_data(SyntaxKind::MissingReference)),
        )
    }

    /// `name` or `pkg:name`. A reserved call name is accepted when `(` follows.
    pub(super) fn parse_name_reference(&mut self) -> NameReference {
        let m = self.start();
        let kind = self.current_token();
        let (package, name) = if self.is_qualified_name_at(0) {
            let package = self.bump_identifier();
            self.bump();
            (Some(package), self.bump_identifier())
        } else if kind != SyntaxKind::Identifier
            && self.is_any_identifier_name(kind)
            && self.nth_at(1, SyntaxKind::OpenParenToken)
        {
            (None, self.bump_identifier())
        } else {
            (None, self.expect_identifier())
        };
        NameReference {
            data: self.finish(m, SyntaxKind::NameReference),
            package,
            name,
        }
    }

    /// `pkg:name(args)`
    pub(super) fn parse_function_invocation(&mut self) -> FunctionInvocation<'a> {
        let m = self.start();
        let name = self.parse_name_reference();
        let arguments = self.parse_argument_list();
        FunctionInvocation {
            data: self.finish(m, SyntaxKind::FunctionInvocation),
            name,
            arguments,
        }
    }

    pub(super) fn parse_argument_list(&mut self) -> NodeList<'a, InvocationArgument<'a>> {
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        let arguments = if open.missing {
            Vec::new()
        } else {
            self.parse_separated(SyntaxKind::CloseParenToken, |p| p.parse_invocation_argument())
        };
        self.expect_closing(&open, SyntaxKind::CloseParenToken, "argument list");
        self.alloc_list(arguments)
    }

    fn parse_invocation_argument(&mut self) -> InvocationArgument<'a> {
        let m = self.start();
        if self.optional_token(SyntaxKind::DotDotDotToken).is_some() {
            let expression = self.parse_expression();
            return InvocationArgument::Rest(RestArgument {
                data: self.finish(m, SyntaxKind::RestArgument),
                expression,
            });
        }
        if self.at(SyntaxKind::Identifier) && self.nth_at(1, SyntaxKind::EqualsToken) {
            let name = self.bump_identifier();
            self.bump();
            let value = self.parse_expression();
            return InvocationArgument::Named(NamedArgument {
                data: self.finish(m, SyntaxKind::NamedArgument),
                name,
                value,
            });
        }
        InvocationArgument::Positional(self.parse_expression())
    }

    /// `ep -> action(` at offset `k`, with `ep` simple or qualified.
    pub(super) fn is_action_invocation_at(&mut self, k: usize) -> bool {
        if self.nth(k) != SyntaxKind::Identifier {
            return false;
        }
        let name_len = if self.is_qualified_name_at(k) { 3 } else { 1 };
        let action = self.nth(k + name_len + 1);
        self.nth_at(k + name_len, SyntaxKind::RightArrowToken)
            && self.is_any_identifier_name(action)
            && self.nth_at(k + name_len + 2, SyntaxKind::OpenParenToken)
    }

    fn parse_primary_expression(&mut self) -> Expression<'a> {
        let m = self.start();
        let kind = self.current_token();
        let is_call = self.is_any_identifier_name(kind) && self.nth_at(1, SyntaxKind::OpenParenToken);
        match kind {
            SyntaxKind::MinusToken
                if self.nth(1).is_integer_literal() || self.nth(1).is_float_literal() =>
            {
                Expression::Literal(self.parse_simple_literal())
            }
            k if is_simple_literal_start(k) => Expression::Literal(self.parse_simple_literal()),
            SyntaxKind::OpenParenToken if self.nth_at(1, SyntaxKind::CloseParenToken) => {
                Expression::Literal(self.parse_simple_literal())
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(m),
            SyntaxKind::OpenBracketToken => Expression::Array(self.parse_array_literal()),
            SyntaxKind::OpenBraceToken => Expression::Record(self.parse_record_literal()),
            SyntaxKind::TableKeyword if self.nth_at(1, SyntaxKind::OpenBraceToken) => {
                Expression::Table(self.parse_table_literal())
            }
            SyntaxKind::XmlLiteralStart => {
                let xml = self.parse_xml_literal();
                Expression::Xml(self.alloc(xml))
            }
            SyntaxKind::StringTemplateLiteralStart => {
                Expression::StringTemplate(self.parse_string_template_literal())
            }
            SyntaxKind::LessThanToken => self.parse_type_conversion(m),
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::LengthofKeyword
            | SyntaxKind::UntaintKeyword => {
                let operator = self.bump();
                let operand = self.parse_operand(ExpressionPrecedence::Unary as u8);
                Expression::Unary(UnaryExpression {
                    data: self.finish(m, SyntaxKind::UnaryExpression),
                    operator,
                    operand,
                })
            }
            SyntaxKind::AwaitKeyword => {
                self.bump();
                let expression = self.parse_operand(ExpressionPrecedence::Unary as u8);
                Expression::Await(AwaitExpression {
                    data: self.finish(m, SyntaxKind::AwaitExpression),
                    expression,
                })
            }
            SyntaxKind::CheckKeyword => {
                self.bump();
                let expression = self.parse_operand(ExpressionPrecedence::MatchSuffix as u8);
                Expression::Check(CheckedExpression {
                    data: self.finish(m, SyntaxKind::CheckedExpression),
                    expression,
                })
            }
            SyntaxKind::StartKeyword if !is_call => self.parse_start_expression(m),
            SyntaxKind::NewKeyword => self.parse_type_init(m),
            SyntaxKind::FunctionKeyword => {
                let lambda = self.parse_lambda_function(m);
                Expression::Lambda(self.alloc(lambda))
            }
            SyntaxKind::FromKeyword => {
                let query = self.parse_table_query();
                Expression::TableQuery(self.alloc(query))
            }
            k if k.is_builtin_type_keyword() && !is_call => {
                let type_name = self.parse_type_at(TypePrecedence::Array as u8);
                Expression::TypeAccess(TypeAccessExpression {
                    data: self.finish(m, SyntaxKind::TypeAccessExpression),
                    type_name: self.alloc(type_name),
                })
            }
            SyntaxKind::Identifier if self.is_action_invocation_at(0) => {
                self.parse_action_invocation(m, None)
            }
            SyntaxKind::Identifier => self.parse_reference_expression(m, None),
            _ if is_call => self.parse_reference_expression(m, None),
            _ => {
                self.error_expected("expression");
                Expression::Missing(self.missing_data(SyntaxKind::MissingExpression))
            }
        }
    }

    fn parse_reference_expression(&mut self, m: Marker, start: Option<SyntaxToken>) -> Expression<'a> {
        let reference = self.parse_variable_reference();
        Expression::VariableReference(VariableReferenceExpression {
            data: self.finish(m, SyntaxKind::VariableReferenceExpression),
            start,
            reference,
        })
    }

    /// `ep -> action(args)`; `m` includes a `start` prefix if there is one.
    fn parse_action_invocation(&mut self, m: Marker, start: Option<SyntaxToken>) -> Expression<'a> {
        let endpoint = self.parse_name_reference();
        self.bump(); // '->'
        let invocation = self.parse_function_invocation();
        Expression::ActionInvocation(ActionInvocation {
            data: self.finish(m, SyntaxKind::ActionInvocation),
            start,
            endpoint,
            invocation,
        })
    }

    /// `start f(x)`, `start obj.method()` or `start ep -> action()`.
    fn parse_start_expression(&mut self, m: Marker) -> Expression<'a> {
        let start = Some(self.bump());
        if self.is_action_invocation_at(0) {
            self.parse_action_invocation(m, start)
        } else {
            self.parse_reference_expression(m, start)
        }
    }

    /// `()`-less parenthesized expression or tuple.
    fn parse_parenthesized_expression(&mut self, m: Marker) -> Expression<'a> {
        let open = self.bump();
        let first = self.parse_expression_at(ExpressionPrecedence::Lowest as u8);
        if !self.at(SyntaxKind::CommaToken) {
            let close = self.expect_closing(&open, SyntaxKind::CloseParenToken, "parenthesized expression");
            return Expression::Braced(BracedExpression {
                data: self.finish_delimited(m, SyntaxKind::BracedExpression, &close),
                expression: self.alloc(first),
            });
        }
        let mut elements = vec![first];
        while !self.unwinding && self.optional_token(SyntaxKind::CommaToken).is_some() {
            elements.push(self.parse_expression_at(ExpressionPrecedence::Lowest as u8));
        }
        let close = self.expect_closing(&open, SyntaxKind::CloseParenToken, "tuple");
        Expression::Tuple(TupleExpression {
            data: self.finish_delimited(m, SyntaxKind::TupleExpression, &close),
            elements: self.alloc_list(elements),
        })
    }

    /// `<T>e` or `<T, conv(args)>e`
    fn parse_type_conversion(&mut self, m: Marker) -> Expression<'a> {
        self.bump();
        let target_type = self.parse_type_name();
        let conversion = if self.optional_token(SyntaxKind::CommaToken).is_some() {
            Some(self.parse_function_invocation())
        } else {
            None
        };
        self.expect_token(SyntaxKind::GreaterThanToken);
        let expression = self.parse_operand(ExpressionPrecedence::Unary as u8);
        Expression::TypeConversion(TypeConversionExpression {
            data: self.finish(m, SyntaxKind::TypeConversionExpression),
            target_type,
            conversion,
            expression,
        })
    }

    /// `new`, `new (args)`, `new T(args)`
    fn parse_type_init(&mut self, m: Marker) -> Expression<'a> {
        self.bump();
        let type_name = if self.at(SyntaxKind::Identifier) {
            let tm = self.start();
            let name = self.parse_name_reference();
            Some(UserDefinedTypeName {
                data: self.finish(tm, SyntaxKind::UserDefinedTypeName),
                name,
            })
        } else {
            None
        };
        let arguments = if self.at(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list())
        } else {
            None
        };
        Expression::TypeInit(TypeInitExpression {
            data: self.finish(m, SyntaxKind::TypeInitExpression),
            type_name,
            arguments,
        })
    }

    /// `function (params) returns T { ... }`
    fn parse_lambda_function(&mut self, m: Marker) -> LambdaFunction<'a> {
        self.bump();
        let parameters = self.parse_formal_parameter_list();
        let return_parameter = self.parse_return_parameter();
        let body = self.parse_callable_unit_body();
        LambdaFunction {
            data: self.finish(m, SyntaxKind::LambdaFunction),
            parameters,
            return_parameter,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parser_over;

    fn parse_expr<'a>(arena: &'a SyntaxArena, kinds: &[(SyntaxKind, &str)]) -> (Expression<'a>, usize) {
        let mut p = parser_over(arena, "expr.bal", kinds, 1);
        let expression = p.parse_expression_at(0);
        (expression, p.diagnostics.len())
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (expr, errors) = parse_expr(
            &arena,
            &[
                (Identifier, "a"),
                (PlusToken, "+"),
                (Identifier, "b"),
                (AsteriskToken, "*"),
                (Identifier, "c"),
            ],
        );
        assert_eq!(errors, 0);
        let Expression::Binary(sum) = expr else {
            panic!("expected a binary expression, got {:?}", expr);
        };
        assert_eq!(sum.operator.kind, PlusToken);
        assert!(matches!(sum.right, Expression::Binary(product) if product.operator.kind == AsteriskToken));
    }

    #[test]
    fn test_power_is_right_associative() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (expr, _) = parse_expr(
            &arena,
            &[
                (Identifier, "a"),
                (CaretToken, "^"),
                (Identifier, "b"),
                (CaretToken, "^"),
                (Identifier, "c"),
            ],
        );
        let Expression::Binary(outer) = expr else {
            panic!("expected a binary expression");
        };
        assert!(matches!(outer.left, Expression::VariableReference(_)));
        assert!(matches!(outer.right, Expression::Binary(_)));
    }

    #[test]
    fn test_ternary_nests_to_the_right() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (expr, errors) = parse_expr(
            &arena,
            &[
                (Identifier, "a"),
                (QuestionToken, "?"),
                (Identifier, "b"),
                (ColonToken, ":"),
                (Identifier, "c"),
                (QuestionToken, "?"),
                (Identifier, "d"),
                (ColonToken, ":"),
                (Identifier, "e"),
            ],
        );
        assert_eq!(errors, 0);
        let Expression::Ternary(ternary) = expr else {
            panic!("expected a ternary, got {:?}", expr);
        };
        assert!(matches!(ternary.else_expression, Expression::Ternary(_)));
    }

    #[test]
    fn test_negative_literal_keeps_its_sign() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (expr, errors) = parse_expr(&arena, &[(MinusToken, "-"), (DecimalIntegerLiteral, "5")]);
        assert_eq!(errors, 0);
        assert!(matches!(expr, Expression::Literal(ref lit) if lit.sign.is_some()));
    }

    #[test]
    fn test_reference_suffix_chain() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (expr, errors) = parse_expr(
            &arena,
            &[
                (Identifier, "a"),
                (DotToken, "."),
                (Identifier, "b"),
                (OpenBracketToken, "["),
                (DecimalIntegerLiteral, "0"),
                (CloseBracketToken, "]"),
                (DotToken, "."),
                (Identifier, "run"),
                (OpenParenToken, "("),
                (CloseParenToken, ")"),
            ],
        );
        assert_eq!(errors, 0);
        let Expression::VariableReference(wrapper) = expr else {
            panic!("expected a reference, got {:?}", expr);
        };
        let VariableReference::Invocation(call) = wrapper.reference else {
            panic!("expected a method invocation");
        };
        assert!(matches!(call.target, VariableReference::Index(_)));
    }

    #[test]
    fn test_action_invocation() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (expr, errors) = parse_expr(
            &arena,
            &[
                (Identifier, "client"),
                (RightArrowToken, "->"),
                (Identifier, "get"),
                (OpenParenToken, "("),
                (QuotedStringLiteral, "\"/\""),
                (CloseParenToken, ")"),
            ],
        );
        assert_eq!(errors, 0);
        assert!(matches!(expr, Expression::ActionInvocation(ref a) if a.invocation.arguments.len() == 1));
    }

    #[test]
    fn test_missing_operand_is_reported_once() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (expr, errors) = parse_expr(&arena, &[(Identifier, "a"), (PlusToken, "+")]);
        assert_eq!(errors, 1);
        assert!(expr.data().has_error());
    }
}
