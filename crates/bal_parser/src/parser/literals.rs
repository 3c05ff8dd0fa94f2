//! Simple, array, record and table literals and integer ranges.

use super::*;
use crate::precedence::ExpressionPrecedence;

fn literal_kind(kind: SyntaxKind) -> Option<LiteralKind> {
    let literal = match kind {
        k if k.is_integer_literal() => LiteralKind::Integer,
        k if k.is_float_literal() => LiteralKind::Float,
        SyntaxKind::QuotedStringLiteral => LiteralKind::String,
        SyntaxKind::Base16BlobLiteral | SyntaxKind::Base64BlobLiteral => LiteralKind::Blob,
        SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => LiteralKind::Boolean,
        SyntaxKind::NullKeyword => LiteralKind::Null,
        _ => return None,
    };
    Some(literal)
}

impl<'a> Parser<'a> {
    /// A literal token, `-` before a numeric literal, or the nil literal `()`.
    pub(super) fn parse_simple_literal(&mut self) -> SimpleLiteral {
        let m = self.start();
        if self.at(SyntaxKind::OpenParenToken) && self.nth_at(1, SyntaxKind::CloseParenToken) {
            let value = self.bump();
            self.bump();
            return SimpleLiteral {
                data: self.finish(m, SyntaxKind::SimpleLiteral),
                kind: LiteralKind::Nil,
                sign: None,
                value,
            };
        }
        let numeric_follows = self.nth(1).is_integer_literal() || self.nth(1).is_float_literal();
        let sign = if self.at(SyntaxKind::MinusToken) && numeric_follows {
            Some(self.bump())
        } else {
            None
        };
        match literal_kind(self.current_token()) {
            Some(kind) => {
                let value = self.bump();
                SimpleLiteral {
                    data: self.finish(m, SyntaxKind::SimpleLiteral),
                    kind,
                    sign,
                    value,
                }
            }
            None => {
                self.error_expected("literal");
                let value = self.missing_token(SyntaxKind::Unknown);
                let mut data = self.finish(m, SyntaxKind::SimpleLiteral);
                data.flags |= NodeFlags::MISSING;
                SimpleLiteral {
                    data,
                    kind: LiteralKind::Nil,
                    sign,
                    value,
                }
            }
        }
    }

    /// `[e1, e2, ...]`
    pub(super) fn parse_array_literal(&mut self) -> ArrayLiteral<'a> {
        let m = self.start();
        let open = self.bump();
        let elements = self.parse_separated(SyntaxKind::CloseBracketToken, |p| {
            p.parse_expression_at(ExpressionPrecedence::Lowest as u8)
        });
        let close = self.expect_closing(&open, SyntaxKind::CloseBracketToken, "array literal");
        ArrayLiteral {
            data: self.finish_delimited(m, SyntaxKind::ArrayLiteral, &close),
            elements: self.alloc_list(elements),
        }
    }

    /// `{ key: value, ... }`. A key is an identifier when `:` follows it,
    /// otherwise an expression such as a string literal.
    pub(super) fn parse_record_literal(&mut self) -> RecordLiteral<'a> {
        let m = self.start();
        let open = self.expect_token(SyntaxKind::OpenBraceToken);
        let fields = if open.missing {
            Vec::new()
        } else {
            self.parse_separated(SyntaxKind::CloseBraceToken, |p| p.parse_record_key_value())
        };
        let close = self.expect_closing(&open, SyntaxKind::CloseBraceToken, "record literal");
        RecordLiteral {
            data: self.finish_delimited(m, SyntaxKind::RecordLiteral, &close),
            fields: self.alloc_list(fields),
        }
    }

    fn parse_record_key_value(&mut self) -> RecordKeyValue<'a> {
        let m = self.start();
        let key = if self.at(SyntaxKind::Identifier) && self.nth_at(1, SyntaxKind::ColonToken) {
            RecordKey::Identifier(self.bump_identifier())
        } else {
            RecordKey::Expression(self.parse_expression())
        };
        self.expect_token(SyntaxKind::ColonToken);
        let value = self.parse_expression();
        RecordKeyValue {
            data: self.finish(m, SyntaxKind::RecordKeyValue),
            key,
            value,
        }
    }

    /// `table { ... }`
    pub(super) fn parse_table_literal(&mut self) -> TableLiteral<'a> {
        let m = self.start();
        self.bump();
        let initializer = self.parse_record_literal();
        TableLiteral {
            data: self.finish(m, SyntaxKind::TableLiteral),
            initializer: self.alloc(initializer),
        }
    }

    /// `[a .. b]`, `(a .. b)`, `[a .. b)`, `(a .. b]`; the end may be left out.
    pub(super) fn parse_int_range_expression(&mut self) -> IntRangeExpression<'a> {
        let m = self.start();
        let open = self.expect_one_of(RANGE_OPEN, "'[' or '('");
        let start = self.parse_operand_at(ExpressionPrecedence::LogicalOr as u8);
        self.expect_token(SyntaxKind::DotDotToken);
        let end = if self.at_set(RANGE_CLOSE) {
            None
        } else {
            Some(self.parse_operand_at(ExpressionPrecedence::LogicalOr as u8))
        };
        let close = self.expect_one_of(RANGE_CLOSE, "']' or ')'");
        IntRangeExpression {
            data: self.finish_delimited(m, SyntaxKind::IntRangeExpression, &close),
            open,
            start,
            end,
            close,
        }
    }

    fn parse_operand_at(&mut self, min_bp: u8) -> &'a Expression<'a> {
        let expression = self.parse_expression_at(min_bp);
        self.alloc(expression)
    }
}

const RANGE_OPEN: TokenSet = TokenSet::new(&[SyntaxKind::OpenBracketToken, SyntaxKind::OpenParenToken]);
const RANGE_CLOSE: TokenSet =
    TokenSet::new(&[SyntaxKind::CloseBracketToken, SyntaxKind::CloseParenToken]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parser_over;

    fn parser<'a>(arena: &'a SyntaxArena, kinds: &[(SyntaxKind, &str)]) -> Parser<'a> {
        parser_over(arena, "literal.bal", kinds, 1)
    }

    #[test]
    fn test_literal_kinds() {
        assert_eq!(literal_kind(SyntaxKind::HexIntegerLiteral), Some(LiteralKind::Integer));
        assert_eq!(literal_kind(SyntaxKind::DecimalFloatingPointLiteral), Some(LiteralKind::Float));
        assert_eq!(literal_kind(SyntaxKind::Base64BlobLiteral), Some(LiteralKind::Blob));
        assert_eq!(literal_kind(SyntaxKind::FalseKeyword), Some(LiteralKind::Boolean));
        assert_eq!(literal_kind(SyntaxKind::Identifier), None);
    }

    #[test]
    fn test_nil_literal() {
        let arena = SyntaxArena::new();
        let mut p = parser(&arena, &[(SyntaxKind::OpenParenToken, "("), (SyntaxKind::CloseParenToken, ")")]);
        let literal = p.parse_simple_literal();
        assert_eq!(literal.kind, LiteralKind::Nil);
        assert_eq!(literal.data.tokens.len(), 2);
        assert!(p.at_end());
    }

    #[test]
    fn test_record_literal_keys() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let mut p = parser(
            &arena,
            &[
                (OpenBraceToken, "{"),
                (Identifier, "a"),
                (ColonToken, ":"),
                (DecimalIntegerLiteral, "1"),
                (CommaToken, ","),
                (QuotedStringLiteral, "\"b\""),
                (ColonToken, ":"),
                (TrueKeyword, "true"),
                (CloseBraceToken, "}"),
            ],
        );
        let record = p.parse_record_literal();
        assert_eq!(p.diagnostics.len(), 0);
        assert_eq!(record.fields.len(), 2);
        assert!(matches!(record.fields[0].key, RecordKey::Identifier(_)));
        assert!(matches!(record.fields[1].key, RecordKey::Expression(_)));
    }

    #[test]
    fn test_half_open_range_without_end() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let mut p = parser(
            &arena,
            &[
                (OpenParenToken, "("),
                (DecimalIntegerLiteral, "1"),
                (DotDotToken, ".."),
                (CloseBracketToken, "]"),
            ],
        );
        let range = p.parse_int_range_expression();
        assert_eq!(p.diagnostics.len(), 0);
        assert!(range.end.is_none());
        assert_eq!(range.open.kind, OpenParenToken);
        assert_eq!(range.close.kind, CloseBracketToken);
    }

    #[test]
    fn test_unterminated_array_unwinds() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let mut p = parser(&arena, &[(OpenBracketToken, "["), (DecimalIntegerLiteral, "1")]);
        let array = p.parse_array_literal();
        assert!(array.data.has_error());
        assert!(p.is_unwinding());
        assert_eq!(p.diagnostics.diagnostics()[0].code, messages::UNTERMINATED_0.code);
    }
}
