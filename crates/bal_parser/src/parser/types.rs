//! Type names, including object and record type bodies.

use super::*;
use crate::precedence::{climb, type_operator, OperatorGrammar, OperatorInfo, TypePrecedence};
use crate::utilities::*;

/// Where an object member skip resumes.
const OBJECT_MEMBER_SYNC: TokenSet = TokenSet::new(&[
    SyntaxKind::CloseBraceToken,
    SyntaxKind::PublicKeyword,
    SyntaxKind::PrivateKeyword,
    SyntaxKind::NativeKeyword,
    SyntaxKind::FunctionKeyword,
    SyntaxKind::NewKeyword,
    SyntaxKind::AtToken,
    SyntaxKind::DocumentationTemplateStart,
    SyntaxKind::DeprecatedTemplateStart,
]);

struct TypeGrammar;

impl<'a> OperatorGrammar<'a> for TypeGrammar {
    type Node = TypeName<'a>;

    fn parse_primary(p: &mut Parser<'a>) -> TypeName<'a> {
        p.parse_primary_type()
    }

    fn operator(p: &mut Parser<'a>) -> Option<OperatorInfo> {
        match p.current_token() {
            // `[` only opens a dimension when it is `[]` or `[N]`.
            SyntaxKind::OpenBracketToken => {
                let is_dimension = p.nth_at(1, SyntaxKind::CloseBracketToken)
                    || (p.nth(1).is_integer_literal() && p.nth_at(2, SyntaxKind::CloseBracketToken));
                if is_dimension {
                    type_operator(SyntaxKind::OpenBracketToken)
                } else {
                    None
                }
            }
            SyntaxKind::BarToken if !can_start_type(p.nth(1)) => None,
            kind => type_operator(kind),
        }
    }

    fn apply_postfix(p: &mut Parser<'a>, m: Marker, lhs: TypeName<'a>, op: OperatorInfo) -> TypeName<'a> {
        match op.node {
            SyntaxKind::ArrayTypeName => {
                let mut dimensions = Vec::new();
                while Self::operator(p).map(|op| op.node) == Some(SyntaxKind::ArrayTypeName) {
                    let dm = p.start();
                    p.bump();
                    let size = if p.current_token().is_integer_literal() {
                        Some(p.bump())
                    } else {
                        None
                    };
                    p.expect_token(SyntaxKind::CloseBracketToken);
                    dimensions.push(ArrayDimension {
                        data: p.finish(dm, SyntaxKind::ArrayDimension),
                        size,
                    });
                }
                TypeName::Array(ArrayTypeName {
                    data: p.finish(m, SyntaxKind::ArrayTypeName),
                    element: p.alloc(lhs),
                    dimensions: p.alloc_list(dimensions),
                })
            }
            SyntaxKind::NullableTypeName => {
                p.bump();
                TypeName::Nullable(NullableTypeName {
                    data: p.finish(m, SyntaxKind::NullableTypeName),
                    inner: p.alloc(lhs),
                })
            }
            _ => {
                let mut members = vec![lhs];
                while !p.is_unwinding()
                    && p.at(SyntaxKind::BarToken)
                    && can_start_type(p.nth(1))
                {
                    p.bump();
                    members.push(p.parse_type_at(TypePrecedence::Nullable as u8));
                }
                TypeName::Union(UnionTypeName {
                    data: p.finish(m, SyntaxKind::UnionTypeName),
                    members: p.alloc_list(members),
                })
            }
        }
    }
}

impl<'a> Parser<'a> {
    pub(super) fn parse_type_name(&mut self) -> &'a TypeName<'a> {
        let ty = self.parse_type_at(TypePrecedence::Lowest as u8);
        self.alloc(ty)
    }

    /// A type name whose suffixes bind at least `min_bp`; `Nullable` stops
    /// before `|`, `Array` before `?` as well.
    pub(super) fn parse_type_at(&mut self, min_bp: u8) -> TypeName<'a> {
        self.nested(
            |p| climb::<TypeGrammar>(p, min_bp),
            |p| TypeName::Missing(p.missing_data(SyntaxKind::MissingTypeName)),
        )
    }

    fn parse_primary_type(&mut self) -> TypeName<'a> {
        let m = self.start();
        let kind = self.current_token();
        match kind {
            k if k.is_constrainable_type_keyword() && self.nth_at(1, SyntaxKind::LessThanToken) => {
                self.parse_constrained_type(m)
            }
            k if k.is_builtin_type_keyword() => {
                let keyword = self.bump();
                TypeName::Builtin(BuiltinTypeName {
                    data: self.finish(m, SyntaxKind::BuiltinTypeName),
                    keyword,
                })
            }
            SyntaxKind::Identifier => {
                let name = self.parse_name_reference();
                TypeName::UserDefined(UserDefinedTypeName {
                    data: self.finish(m, SyntaxKind::UserDefinedTypeName),
                    name,
                })
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_type(m),
            SyntaxKind::FunctionKeyword => self.parse_function_type(m),
            SyntaxKind::ObjectKeyword => self.parse_object_type(m),
            SyntaxKind::RecordKeyword => self.parse_record_type(m),
            _ => {
                self.error_expected("type name");
                TypeName::Missing(self.missing_data(SyntaxKind::MissingTypeName))
            }
        }
    }

    /// `map<T>`, `stream<T>`, `xml<{"ns"}local>`
    fn parse_constrained_type(&mut self, m: Marker) -> TypeName<'a> {
        let keyword = self.bump();
        self.bump(); // '<'
        let constraint = if keyword.kind == SyntaxKind::XmlKeyword {
            let cm = self.start();
            let namespace = if self.optional_token(SyntaxKind::OpenBraceToken).is_some() {
                let uri = self.expect_token(SyntaxKind::QuotedStringLiteral);
                self.expect_token(SyntaxKind::CloseBraceToken);
                Some(uri)
            } else {
                None
            };
            let local_name = self.expect_identifier();
            TypeConstraint::XmlNamespace(XmlNamespaceConstraint {
                data: self.finish(cm, SyntaxKind::XmlNamespaceConstraint),
                namespace,
                local_name,
            })
        } else {
            TypeConstraint::Type(self.parse_type_name())
        };
        self.expect_token(SyntaxKind::GreaterThanToken);
        TypeName::Constrained(ConstrainedTypeName {
            data: self.finish(m, SyntaxKind::ConstrainedTypeName),
            keyword,
            constraint,
        })
    }

    /// `()`, `(T)` or `(T, U)`.
    fn parse_parenthesized_type(&mut self, m: Marker) -> TypeName<'a> {
        let open = self.bump();
        if self.optional_token(SyntaxKind::CloseParenToken).is_some() {
            return TypeName::Nil(NilTypeName {
                data: self.finish(m, SyntaxKind::NilTypeName),
            });
        }
        let first = self.parse_type_at(TypePrecedence::Lowest as u8);
        if !self.at(SyntaxKind::CommaToken) {
            let close = self.expect_closing(&open, SyntaxKind::CloseParenToken, "type");
            return TypeName::Group(GroupTypeName {
                data: self.finish_delimited(m, SyntaxKind::GroupTypeName, &close),
                inner: self.alloc(first),
            });
        }
        let mut members = vec![first];
        while !self.unwinding && self.optional_token(SyntaxKind::CommaToken).is_some() {
            members.push(self.parse_type_at(TypePrecedence::Lowest as u8));
        }
        let close = self.expect_closing(&open, SyntaxKind::CloseParenToken, "tuple type");
        TypeName::Tuple(TupleTypeName {
            data: self.finish_delimited(m, SyntaxKind::TupleTypeName, &close),
            members: self.alloc_list(members),
        })
    }

    /// `function (T, @a U name) returns R`
    fn parse_function_type(&mut self, m: Marker) -> TypeName<'a> {
        self.bump();
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        let parameters = if open.missing {
            Vec::new()
        } else {
            self.parse_separated(SyntaxKind::CloseParenToken, |p| {
                let pm = p.start();
                let annotations = p.parse_annotation_attachments();
                let type_name = p.parse_type_name();
                let name = p.optional_identifier();
                FunctionTypeParameter {
                    data: p.finish(pm, SyntaxKind::FunctionTypeParameter),
                    annotations,
                    type_name,
                    name,
                }
            })
        };
        self.expect_closing(&open, SyntaxKind::CloseParenToken, "parameter list");
        let return_parameter = self.parse_return_parameter();
        TypeName::Function(FunctionTypeName {
            data: self.finish(m, SyntaxKind::FunctionTypeName),
            parameters: self.alloc_list(parameters),
            return_parameter,
        })
    }

    // ------------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------------

    fn parse_object_type(&mut self, m: Marker) -> TypeName<'a> {
        self.bump();
        let open = self.expect_token(SyntaxKind::OpenBraceToken);
        let mut public_fields: Option<ObjectFieldBlock<'a>> = None;
        let mut private_fields: Option<ObjectFieldBlock<'a>> = None;
        let mut initializer: Option<&'a ObjectInitializer<'a>> = None;
        let mut functions = Vec::new();
        if !open.missing {
            self.with_recovery(OBJECT_MEMBER_SYNC, |p| {
                while !p.at_list_end(SyntaxKind::CloseBraceToken) {
                    let before = p.token_index();
                    let kind = p.current_token();
                    let is_field_block = matches!(kind, SyntaxKind::PublicKeyword | SyntaxKind::PrivateKeyword)
                        && p.nth_at(1, SyntaxKind::OpenBraceToken);
                    if is_field_block {
                        let block = p.parse_object_field_block();
                        let slot = if kind == SyntaxKind::PublicKeyword {
                            &mut public_fields
                        } else {
                            &mut private_fields
                        };
                        if slot.is_some() {
                            let what = if kind == SyntaxKind::PublicKeyword { "public" } else { "private" };
                            p.report_duplicate_block(block.data, what);
                        } else {
                            *slot = Some(block);
                        }
                    } else {
                        p.parse_object_member(&mut initializer, &mut functions);
                    }
                    if p.token_index() == before && !p.unwinding {
                        p.bump_unexpected("an object member");
                    }
                }
            });
        }
        let close = self.expect_closing(&open, SyntaxKind::CloseBraceToken, "object type");
        TypeName::Object(ObjectTypeName {
            data: self.finish_delimited(m, SyntaxKind::ObjectTypeName, &close),
            public_fields,
            private_fields,
            initializer,
            functions: self.alloc_list(functions),
        })
    }

    fn report_duplicate_block(&mut self, data: NodeData, what: &str) {
        let diagnostic = self.diagnostic_at(data.range, &messages::DUPLICATE_0_BLOCK, &[what]);
        self.report(data.tokens.start, diagnostic);
    }

    /// An initializer or a method, with its metadata and modifiers.
    fn parse_object_member(
        &mut self,
        initializer: &mut Option<&'a ObjectInitializer<'a>>,
        functions: &mut Vec<ObjectFunctionDefinition<'a>>,
    ) {
        let m = self.start();
        let metadata = self.parse_metadata();
        let mut modifiers = ModifierFlags::NONE;
        while matches!(
            self.current_token(),
            SyntaxKind::PublicKeyword | SyntaxKind::PrivateKeyword | SyntaxKind::NativeKeyword
        ) {
            let keyword = self.bump();
            modifiers |= ModifierFlags::from_keyword(keyword.kind);
        }
        match self.current_token() {
            SyntaxKind::NewKeyword => {
                let init = self.parse_object_initializer(m, metadata, modifiers);
                if initializer.is_some() {
                    self.report_duplicate_block(init.data, "initializer");
                } else {
                    *initializer = Some(self.alloc(init));
                }
            }
            SyntaxKind::FunctionKeyword => {
                self.bump();
                let signature = self.parse_callable_signature();
                let body = self.parse_optional_body();
                let mut data = self.finish(m, SyntaxKind::ObjectFunctionDefinition);
                data.modifiers = modifiers;
                functions.push(ObjectFunctionDefinition {
                    data,
                    metadata,
                    signature,
                    body,
                });
            }
            _ => {
                self.error_expected("object member");
                self.skip_until(OBJECT_MEMBER_SYNC, "an object member");
            }
        }
    }

    /// `public { fields }` or `private { fields }`
    fn parse_object_field_block(&mut self) -> ObjectFieldBlock<'a> {
        let m = self.start();
        let keyword = self.bump();
        let open = self.bump();
        let mut fields = Vec::new();
        while !self.at_list_end(SyntaxKind::CloseBraceToken) {
            let before = self.token_index();
            fields.push(self.parse_field_definition());
            if self.token_index() == before && !self.unwinding {
                self.bump_unexpected("a field");
            }
        }
        let close = self.expect_closing(&open, SyntaxKind::CloseBraceToken, "field block");
        let mut data = self.finish_delimited(m, SyntaxKind::ObjectFieldBlock, &close);
        data.modifiers = ModifierFlags::from_keyword(keyword.kind);
        ObjectFieldBlock {
            data,
            fields: self.alloc_list(fields),
        }
    }

    /// `T name = default;`
    fn parse_field_definition(&mut self) -> FieldDefinition<'a> {
        let m = self.start();
        let metadata = self.parse_metadata();
        let type_name = self.parse_type_name();
        self.finish_field_definition(m, metadata, type_name)
    }

    fn finish_field_definition(
        &mut self,
        m: Marker,
        metadata: Metadata<'a>,
        type_name: &'a TypeName<'a>,
    ) -> FieldDefinition<'a> {
        let name = self.expect_identifier();
        let default = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_expression())
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken);
        FieldDefinition {
            data: self.finish(m, SyntaxKind::FieldDefinition),
            metadata,
            type_name,
            name,
            default,
        }
    }

    /// `new (a, int b = 1) { ... }`
    fn parse_object_initializer(
        &mut self,
        m: Marker,
        metadata: Metadata<'a>,
        modifiers: ModifierFlags,
    ) -> ObjectInitializer<'a> {
        self.bump();
        let pm = self.start();
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        let parameters = if open.missing {
            Vec::new()
        } else {
            self.parse_separated(SyntaxKind::CloseParenToken, |p| p.parse_object_parameter())
        };
        let close = self.expect_closing(&open, SyntaxKind::CloseParenToken, "parameter list");
        let parameters = ObjectParameterList {
            data: self.finish_delimited(pm, SyntaxKind::ObjectParameterList, &close),
            parameters: self.alloc_list(parameters),
        };
        let body = self.parse_callable_unit_body();
        let mut data = self.finish(m, SyntaxKind::ObjectInitializer);
        data.modifiers = modifiers;
        ObjectInitializer {
            data,
            metadata,
            parameters,
            body,
        }
    }

    fn parse_object_parameter(&mut self) -> ObjectParameter<'a> {
        let m = self.start();
        let annotations = self.parse_annotation_attachments();
        let binds_field = self.at(SyntaxKind::Identifier)
            && matches!(
                self.nth(1),
                SyntaxKind::CommaToken | SyntaxKind::CloseParenToken | SyntaxKind::EqualsToken
            );
        let (type_name, rest) = if binds_field {
            (None, None)
        } else {
            let type_name = self.parse_type_name();
            (Some(type_name), self.optional_token(SyntaxKind::DotDotDotToken))
        };
        let name = self.expect_identifier();
        let default = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_expression())
        } else {
            None
        };
        ObjectParameter {
            data: self.finish(m, SyntaxKind::ObjectParameter),
            annotations,
            type_name,
            rest,
            name,
            default,
        }
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    /// `record { T a; U b = 1; R...; }`
    fn parse_record_type(&mut self, m: Marker) -> TypeName<'a> {
        self.bump();
        let open = self.expect_token(SyntaxKind::OpenBraceToken);
        let mut fields = Vec::new();
        let mut rest_field = None;
        while !open.missing && !self.at_list_end(SyntaxKind::CloseBraceToken) {
            let before = self.token_index();
            let fm = self.start();
            let metadata = self.parse_metadata();
            let type_name = self.parse_type_name();
            if self.optional_token(SyntaxKind::DotDotDotToken).is_some() {
                self.expect_token(SyntaxKind::SemicolonToken);
                let rest = RecordRestField {
                    data: self.finish(fm, SyntaxKind::RecordRestField),
                    type_name,
                };
                if rest_field.is_none() {
                    rest_field = Some(rest);
                } else {
                    self.report_duplicate_block(rest.data, "rest field");
                }
            } else {
                fields.push(self.finish_field_definition(fm, metadata, type_name));
            }
            if self.token_index() == before && !self.unwinding {
                self.bump_unexpected("a field");
            }
        }
        let close = self.expect_closing(&open, SyntaxKind::CloseBraceToken, "record type");
        TypeName::Record(RecordTypeName {
            data: self.finish_delimited(m, SyntaxKind::RecordTypeName, &close),
            fields: self.alloc_list(fields),
            rest_field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parser_over;

    fn parse_type<'a>(arena: &'a SyntaxArena, kinds: &[(SyntaxKind, &str)]) -> (TypeName<'a>, usize) {
        let mut p = parser_over(arena, "types.bal", kinds, 1);
        let ty = p.parse_type_at(0);
        (ty, p.diagnostics.len())
    }

    #[test]
    fn test_array_binds_tighter_than_union_and_nullable() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (ty, errors) = parse_type(
            &arena,
            &[
                (IntKeyword, "int"),
                (OpenBracketToken, "["),
                (CloseBracketToken, "]"),
                (BarToken, "|"),
                (StringKeyword, "string"),
                (QuestionToken, "?"),
            ],
        );
        assert_eq!(errors, 0);
        let TypeName::Union(union) = ty else {
            panic!("expected a union, got {:?}", ty);
        };
        assert_eq!(union.members.len(), 2);
        assert!(matches!(union.members[0], TypeName::Array(_)));
        assert!(matches!(union.members[1], TypeName::Nullable(_)));
    }

    #[test]
    fn test_sized_and_open_dimensions() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (ty, errors) = parse_type(
            &arena,
            &[
                (Identifier, "Person"),
                (OpenBracketToken, "["),
                (DecimalIntegerLiteral, "3"),
                (CloseBracketToken, "]"),
                (OpenBracketToken, "["),
                (CloseBracketToken, "]"),
            ],
        );
        assert_eq!(errors, 0);
        let TypeName::Array(array) = ty else {
            panic!("expected an array, got {:?}", ty);
        };
        assert_eq!(array.dimensions.len(), 2);
        assert!(array.dimensions[0].size.is_some());
        assert!(array.dimensions[1].size.is_none());
    }

    #[test]
    fn test_nil_group_and_tuple() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (nil, _) = parse_type(&arena, &[(OpenParenToken, "("), (CloseParenToken, ")")]);
        assert!(matches!(nil, TypeName::Nil(_)));

        let (tuple, errors) = parse_type(
            &arena,
            &[
                (OpenParenToken, "("),
                (IntKeyword, "int"),
                (CommaToken, ","),
                (StringKeyword, "string"),
                (CloseParenToken, ")"),
            ],
        );
        assert_eq!(errors, 0);
        assert!(matches!(tuple, TypeName::Tuple(ref t) if t.members.len() == 2));
    }

    #[test]
    fn test_constrained_xml_namespace() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (ty, errors) = parse_type(
            &arena,
            &[
                (XmlKeyword, "xml"),
                (LessThanToken, "<"),
                (OpenBraceToken, "{"),
                (QuotedStringLiteral, "\"urn:ns\""),
                (CloseBraceToken, "}"),
                (Identifier, "item"),
                (GreaterThanToken, ">"),
            ],
        );
        assert_eq!(errors, 0);
        let TypeName::Constrained(constrained) = ty else {
            panic!("expected a constrained type, got {:?}", ty);
        };
        assert!(matches!(
            constrained.constraint,
            TypeConstraint::XmlNamespace(ref ns) if ns.namespace.is_some()
        ));
    }

    #[test]
    fn test_bar_without_type_is_not_a_union() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (ty, errors) = parse_type(&arena, &[(IntKeyword, "int"), (BarToken, "|"), (SemicolonToken, ";")]);
        assert_eq!(errors, 0);
        assert!(matches!(ty, TypeName::Builtin(_)));
    }

    #[test]
    fn test_missing_type_is_a_placeholder() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (ty, errors) = parse_type(&arena, &[(SemicolonToken, ";")]);
        assert_eq!(errors, 1);
        assert!(ty.data().is_missing());
    }
}
