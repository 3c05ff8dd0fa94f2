//! Compilation unit, imports and top-level definitions.

use super::*;
use crate::precedence::TypePrecedence;
use crate::utilities::*;

/// Keywords allowed between `<` and `>` of an annotation definition.
const ATTACH_POINTS: TokenSet = TokenSet::new(&[
    SyntaxKind::ServiceKeyword,
    SyntaxKind::ResourceKeyword,
    SyntaxKind::FunctionKeyword,
    SyntaxKind::ObjectKeyword,
    SyntaxKind::TypeKeyword,
    SyntaxKind::EndpointKeyword,
    SyntaxKind::ParameterKeyword,
    SyntaxKind::AnnotationKeyword,
]);

const VERSION_VALUE: TokenSet = TokenSet::new(&[
    SyntaxKind::Identifier,
    SyntaxKind::DecimalIntegerLiteral,
    SyntaxKind::DecimalFloatingPointLiteral,
    SyntaxKind::QuotedStringLiteral,
]);

/// Where a service member skip resumes.
const SERVICE_MEMBER_SYNC: TokenSet = TokenSet::new(&[
    SyntaxKind::CloseBraceToken,
    SyntaxKind::EndpointKeyword,
    SyntaxKind::AtToken,
    SyntaxKind::DocumentationTemplateStart,
    SyntaxKind::DeprecatedTemplateStart,
]);

impl<'a> Parser<'a> {
    pub(super) fn parse_compilation_unit(&mut self) -> CompilationUnit<'a> {
        let m = self.start();
        let mut imports = Vec::new();
        let mut definitions = Vec::new();
        loop {
            if self.unwinding {
                self.resynchronize(TOP_LEVEL_START);
            }
            if self.at_end() {
                break;
            }
            let before = self.token_index();
            match self.current_token() {
                SyntaxKind::ImportKeyword => {
                    if !definitions.is_empty() {
                        self.error_here(&messages::_0_MUST_PRECEDE_DEFINITIONS, &["Import declarations"]);
                    }
                    imports.push(ImportItem::Import(self.parse_import_declaration()));
                }
                SyntaxKind::XmlnsKeyword => {
                    if !definitions.is_empty() {
                        self.error_here(
                            &messages::_0_MUST_PRECEDE_DEFINITIONS,
                            &["Namespace declarations"],
                        );
                    }
                    imports.push(ImportItem::Namespace(self.parse_namespace_declaration()));
                }
                _ => definitions.push(self.parse_definition()),
            }
            if self.token_index() == before && !self.unwinding {
                self.bump_unexpected("a definition");
            }
        }
        let end_of_file = self.bump_end_of_file();
        debug!(
            imports = imports.len(),
            definitions = definitions.len(),
            errors = self.error_count,
            "parsed compilation unit"
        );
        CompilationUnit {
            data: self.finish(m, SyntaxKind::CompilationUnit),
            imports: self.alloc_list(imports),
            definitions: self.alloc_list(definitions),
            end_of_file,
        }
    }

    /// `import org/a.b version v as alias;`
    fn parse_import_declaration(&mut self) -> ImportDeclaration<'a> {
        let m = self.start();
        self.bump();
        let org_name = if self.at(SyntaxKind::Identifier) && self.nth_at(1, SyntaxKind::SlashToken) {
            let org = self.bump_identifier();
            self.bump();
            Some(org)
        } else {
            None
        };
        let package_m = self.start();
        let mut segments = vec![self.expect_identifier()];
        while self.at(SyntaxKind::DotToken) {
            self.bump();
            segments.push(self.expect_identifier());
        }
        let version = if self.optional_token(SyntaxKind::VersionKeyword).is_some() {
            Some(self.expect_one_of(VERSION_VALUE, "version"))
        } else {
            None
        };
        let package = PackageName {
            data: self.finish(package_m, SyntaxKind::PackageName),
            segments: self.alloc_list(segments),
            version,
        };
        let alias = if self.optional_token(SyntaxKind::AsKeyword).is_some() {
            Some(self.expect_identifier())
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken);
        ImportDeclaration {
            data: self.finish(m, SyntaxKind::ImportDeclaration),
            org_name,
            package,
            alias,
        }
    }

    /// `xmlns "uri" as prefix;`, at top level or as a statement.
    pub(super) fn parse_namespace_declaration(&mut self) -> NamespaceDeclaration {
        let m = self.start();
        self.bump();
        let uri = self.expect_token(SyntaxKind::QuotedStringLiteral);
        let prefix = if self.optional_token(SyntaxKind::AsKeyword).is_some() {
            Some(self.expect_identifier())
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken);
        NamespaceDeclaration {
            data: self.finish(m, SyntaxKind::NamespaceDeclaration),
            uri,
            prefix,
        }
    }

    fn parse_modifiers(&mut self) -> ModifierFlags {
        let mut modifiers = ModifierFlags::NONE;
        while matches!(
            self.current_token(),
            SyntaxKind::PublicKeyword | SyntaxKind::PrivateKeyword | SyntaxKind::NativeKeyword
        ) {
            let keyword = self.bump();
            modifiers |= ModifierFlags::from_keyword(keyword.kind);
        }
        modifiers
    }

    fn finish_definition(&mut self, m: Marker, kind: SyntaxKind, modifiers: ModifierFlags) -> NodeData {
        let mut data = self.finish(m, kind);
        data.modifiers = modifiers;
        data
    }

    /// One top-level definition, including the metadata written before it.
    fn parse_definition(&mut self) -> Definition<'a> {
        let m = self.start();
        let metadata = self.parse_metadata();
        let modifiers = self.parse_modifiers();
        match self.current_token() {
            SyntaxKind::ServiceKeyword => {
                Definition::Service(self.parse_service_definition(m, metadata, modifiers))
            }
            SyntaxKind::FunctionKeyword if !self.nth_at(1, SyntaxKind::OpenParenToken) => {
                Definition::Function(self.parse_function_definition(m, metadata, modifiers))
            }
            SyntaxKind::TypeKeyword => {
                Definition::Type(self.parse_type_definition(m, metadata, modifiers))
            }
            SyntaxKind::AnnotationKeyword => {
                Definition::Annotation(self.parse_annotation_definition(m, metadata, modifiers))
            }
            SyntaxKind::EndpointKeyword => {
                let endpoint_m = self.start();
                let endpoint = self.parse_endpoint_declaration(endpoint_m, &[]);
                Definition::GlobalEndpoint(GlobalEndpointDefinition {
                    data: self.finish_definition(m, SyntaxKind::GlobalEndpointDefinition, modifiers),
                    metadata,
                    endpoint,
                })
            }
            kind if can_start_type(kind) => {
                Definition::GlobalVariable(self.parse_global_variable(m, metadata, modifiers))
            }
            _ => {
                self.error_no_viable_alternative("definition");
                self.skip_until(TOP_LEVEL_START, "a definition");
                let mut data = self.finish(m, SyntaxKind::MissingDefinition);
                data.flags |= NodeFlags::MISSING | NodeFlags::HAS_ERROR;
                Definition::Missing(data)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Services and resources
    // ------------------------------------------------------------------------

    /// `service<ep:Type> name bind ep { ... }`
    fn parse_service_definition(
        &mut self,
        m: Marker,
        metadata: Metadata<'a>,
        modifiers: ModifierFlags,
    ) -> ServiceDefinition<'a> {
        self.bump();
        let endpoint_type = if self.optional_token(SyntaxKind::LessThanToken).is_some() {
            let name = self.parse_name_reference();
            self.expect_token(SyntaxKind::GreaterThanToken);
            Some(name)
        } else {
            None
        };
        let name = self.expect_identifier();
        let bind = if self.at(SyntaxKind::BindKeyword) {
            Some(self.parse_service_endpoint_attachments())
        } else {
            None
        };
        let body = self.parse_service_body();
        ServiceDefinition {
            data: self.finish_definition(m, SyntaxKind::ServiceDefinition, modifiers),
            metadata,
            endpoint_type,
            name,
            bind,
            body,
        }
    }

    fn parse_service_endpoint_attachments(&mut self) -> ServiceEndpointAttachments<'a> {
        let m = self.start();
        self.bump();
        let (endpoints, record) = if self.at(SyntaxKind::OpenBraceToken) {
            let record = self.parse_record_literal();
            (Vec::new(), Some(self.alloc(record)))
        } else {
            (self.parse_comma_list(|p| p.parse_name_reference()), None)
        };
        ServiceEndpointAttachments {
            data: self.finish(m, SyntaxKind::ServiceEndpointAttachments),
            endpoints: self.alloc_list(endpoints),
            record,
        }
    }

    fn parse_service_body(&mut self) -> ServiceBody<'a> {
        let m = self.start();
        let open = self.expect_token(SyntaxKind::OpenBraceToken);
        let mut endpoints = Vec::new();
        let mut variables = Vec::new();
        let mut resources = Vec::new();
        if !open.missing {
            self.with_recovery(SERVICE_MEMBER_SYNC, |p| {
                while !p.at_list_end(SyntaxKind::CloseBraceToken) {
                    let before = p.token_index();
                    let member_m = p.start();
                    let metadata = p.parse_metadata();
                    let kind = p.current_token();
                    if kind == SyntaxKind::EndpointKeyword {
                        p.reject_documentation(&metadata, "resource definition");
                        endpoints.push(p.parse_endpoint_declaration(member_m, metadata.annotations));
                    } else if p.at(SyntaxKind::Identifier) && p.nth_at(1, SyntaxKind::OpenParenToken) {
                        resources.push(p.parse_resource_definition(member_m, metadata));
                    } else if can_start_type(kind) {
                        if !metadata.is_empty() {
                            p.error_expected("resource definition");
                        }
                        variables.push(p.parse_variable_definition());
                    } else {
                        p.error_expected("service member");
                        p.skip_until(SERVICE_MEMBER_SYNC, "a service member");
                    }
                    if p.token_index() == before && !p.unwinding {
                        p.bump_unexpected("a service member");
                    }
                }
            });
        }
        let close = self.expect_closing(&open, SyntaxKind::CloseBraceToken, "service body");
        ServiceBody {
            data: self.finish_delimited(m, SyntaxKind::ServiceBody, &close),
            endpoints: self.alloc_list(endpoints),
            variables: self.alloc_list(variables),
            resources: self.alloc_list(resources),
        }
    }

    /// Documentation only attaches to resources, functions and types.
    fn reject_documentation(&mut self, metadata: &Metadata<'a>, expected: &str) {
        if !metadata.documentation.is_empty() || !metadata.deprecated.is_empty() {
            self.error_expected(expected);
        }
    }

    fn parse_resource_definition(&mut self, m: Marker, metadata: Metadata<'a>) -> ResourceDefinition<'a> {
        let name = self.expect_identifier();
        let parameters = self.parse_resource_parameter_list();
        let body = self.parse_callable_unit_body();
        ResourceDefinition {
            data: self.finish(m, SyntaxKind::ResourceDefinition),
            metadata,
            name,
            parameters,
            body,
        }
    }

    /// `(endpoint caller, T p, ...)`
    fn parse_resource_parameter_list(&mut self) -> ResourceParameterList<'a> {
        let m = self.start();
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        let mut caller = None;
        let mut parameters = Vec::new();
        if !open.missing {
            if self.optional_token(SyntaxKind::EndpointKeyword).is_some() {
                caller = Some(self.expect_identifier());
                if self.optional_token(SyntaxKind::CommaToken).is_some() {
                    parameters = self.parse_comma_list(|p| p.parse_parameter());
                }
            } else {
                parameters = self.parse_separated(SyntaxKind::CloseParenToken, |p| p.parse_parameter());
            }
        }
        let close = self.expect_closing(&open, SyntaxKind::CloseParenToken, "parameter list");
        ResourceParameterList {
            data: self.finish_delimited(m, SyntaxKind::ResourceParameterList, &close),
            caller,
            parameters: self.alloc_list(parameters),
        }
    }

    // ------------------------------------------------------------------------
    // Callable units
    // ------------------------------------------------------------------------

    /// `{ endpoint* (statement* | worker+) }`
    pub(super) fn parse_callable_unit_body(&mut self) -> CallableUnitBody<'a> {
        self.nested(
            |p| p.parse_callable_unit_body_inner(),
            |p| CallableUnitBody {
                data: p.missing_data(SyntaxKind::CallableUnitBody),
                endpoints: &[],
                statements: &[],
                workers: &[],
            },
        )
    }

    fn parse_callable_unit_body_inner(&mut self) -> CallableUnitBody<'a> {
        let m = self.start();
        let open = self.expect_token(SyntaxKind::OpenBraceToken);
        if open.missing {
            return CallableUnitBody {
                data: self.finish(m, SyntaxKind::CallableUnitBody),
                endpoints: &[],
                statements: &[],
                workers: &[],
            };
        }
        let mut endpoints = Vec::new();
        while !self.unwinding
            && (self.at(SyntaxKind::EndpointKeyword) || self.at(SyntaxKind::AtToken))
        {
            let endpoint_m = self.start();
            let annotations = self.parse_annotation_attachments();
            endpoints.push(self.parse_endpoint_declaration(endpoint_m, annotations));
        }
        let mut workers = Vec::new();
        let statements: NodeList<'a, Statement<'a>> = if self.at(SyntaxKind::WorkerKeyword) {
            while self.at(SyntaxKind::WorkerKeyword) && !self.unwinding {
                workers.push(self.parse_worker_declaration());
            }
            &[]
        } else {
            self.parse_statements(SyntaxKind::CloseBraceToken)
        };
        let close = self.expect_closing(&open, SyntaxKind::CloseBraceToken, "function body");
        CallableUnitBody {
            data: self.finish_delimited(m, SyntaxKind::CallableUnitBody, &close),
            endpoints: self.alloc_list(endpoints),
            statements,
            workers: self.alloc_list(workers),
        }
    }

    /// `worker name { ... }`
    pub(super) fn parse_worker_declaration(&mut self) -> WorkerDeclaration<'a> {
        let m = self.start();
        self.bump();
        let name = self.expect_identifier();
        let body = self.parse_block();
        WorkerDeclaration {
            data: self.finish(m, SyntaxKind::WorkerDeclaration),
            name,
            body,
        }
    }

    fn parse_function_definition(
        &mut self,
        m: Marker,
        metadata: Metadata<'a>,
        modifiers: ModifierFlags,
    ) -> FunctionDefinition<'a> {
        self.bump();
        let receiver = if self.at(SyntaxKind::Identifier) && self.nth_at(1, SyntaxKind::ColonColonToken) {
            let receiver = self.bump_identifier();
            self.bump();
            Some(receiver)
        } else {
            None
        };
        let signature = self.parse_callable_signature();
        let body = self.parse_optional_body();
        FunctionDefinition {
            data: self.finish_definition(m, SyntaxKind::FunctionDefinition, modifiers),
            metadata,
            receiver,
            signature,
            body,
        }
    }

    /// A body, or `;` for a native or interface declaration.
    pub(super) fn parse_optional_body(&mut self) -> Option<CallableUnitBody<'a>> {
        if self.optional_token(SyntaxKind::SemicolonToken).is_some() {
            None
        } else {
            Some(self.parse_callable_unit_body())
        }
    }

    /// `name(params) returns T`
    pub(super) fn parse_callable_signature(&mut self) -> CallableUnitSignature<'a> {
        let m = self.start();
        let name = self.expect_any_identifier_name();
        let parameters = self.parse_formal_parameter_list();
        let return_parameter = self.parse_return_parameter();
        CallableUnitSignature {
            data: self.finish(m, SyntaxKind::CallableUnitSignature),
            name,
            parameters,
            return_parameter,
        }
    }

    pub(super) fn parse_formal_parameter_list(&mut self) -> FormalParameterList<'a> {
        let m = self.start();
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        let parameters = if open.missing {
            Vec::new()
        } else {
            self.parse_separated(SyntaxKind::CloseParenToken, |p| p.parse_parameter())
        };
        let close = self.expect_closing(&open, SyntaxKind::CloseParenToken, "parameter list");
        FormalParameterList {
            data: self.finish_delimited(m, SyntaxKind::FormalParameterList, &close),
            parameters: self.alloc_list(parameters),
        }
    }

    /// Simple, tuple, rest and defaultable parameters.
    pub(super) fn parse_parameter(&mut self) -> Parameter<'a> {
        let m = self.start();
        let annotations = self.parse_annotation_attachments();
        let parameter = if self.at(SyntaxKind::OpenParenToken) {
            match self.try_parse(|p| p.parse_tuple_parameter_members()) {
                Some(members) => Parameter::Tuple(TupleParameter {
                    data: self.finish(m, SyntaxKind::TupleParameter),
                    annotations,
                    members,
                }),
                None => self.parse_typed_parameter(m, annotations),
            }
        } else {
            self.parse_typed_parameter(m, annotations)
        };
        if matches!(parameter, Parameter::Rest(_)) || !self.at(SyntaxKind::EqualsToken) {
            return parameter;
        }
        self.bump();
        let default = self.parse_expression();
        Parameter::Defaultable(DefaultableParameter {
            data: self.finish(m, SyntaxKind::DefaultableParameter),
            parameter: self.alloc(parameter),
            default,
        })
    }

    fn parse_typed_parameter(
        &mut self,
        m: Marker,
        annotations: NodeList<'a, AnnotationAttachment<'a>>,
    ) -> Parameter<'a> {
        let type_name = self.parse_type_name();
        if self.optional_token(SyntaxKind::DotDotDotToken).is_some() {
            let name = self.expect_identifier();
            return Parameter::Rest(RestParameter {
                data: self.finish(m, SyntaxKind::RestParameter),
                annotations,
                type_name,
                name,
            });
        }
        let name = self.expect_identifier();
        Parameter::Simple(SimpleParameter {
            data: self.finish(m, SyntaxKind::SimpleParameter),
            annotations,
            type_name,
            name,
        })
    }

    /// `(T a, U b)`; speculative, so `None` and errors both rewind.
    fn parse_tuple_parameter_members(&mut self) -> Option<NodeList<'a, SimpleParameter<'a>>> {
        let open = self.bump();
        let members = self.parse_comma_list(|p| p.parse_simple_parameter());
        if !self.at(SyntaxKind::CloseParenToken) {
            return None;
        }
        self.expect_closing(&open, SyntaxKind::CloseParenToken, "tuple parameter");
        Some(self.alloc_list(members))
    }

    /// `T name` with no annotations.
    pub(super) fn parse_simple_parameter(&mut self) -> SimpleParameter<'a> {
        let m = self.start();
        let type_name = self.parse_type_name();
        let name = self.expect_identifier();
        SimpleParameter {
            data: self.finish(m, SyntaxKind::SimpleParameter),
            annotations: &[],
            type_name,
            name,
        }
    }

    /// `returns @a T`, if present.
    pub(super) fn parse_return_parameter(&mut self) -> Option<ReturnParameter<'a>> {
        if !self.at(SyntaxKind::ReturnsKeyword) {
            return None;
        }
        let m = self.start();
        self.bump();
        let annotations = self.parse_annotation_attachments();
        let type_name = self.parse_type_name();
        Some(ReturnParameter {
            data: self.finish(m, SyntaxKind::ReturnParameter),
            annotations,
            type_name,
        })
    }

    // ------------------------------------------------------------------------
    // Types, annotations, endpoints and globals
    // ------------------------------------------------------------------------

    /// `type Name T1 | "literal" | ...;`
    fn parse_type_definition(
        &mut self,
        m: Marker,
        metadata: Metadata<'a>,
        modifiers: ModifierFlags,
    ) -> TypeDefinition<'a> {
        self.bump();
        let name = self.expect_identifier();
        let finite_type = self.parse_finite_type();
        self.expect_token(SyntaxKind::SemicolonToken);
        TypeDefinition {
            data: self.finish_definition(m, SyntaxKind::TypeDefinition, modifiers),
            metadata,
            name,
            finite_type,
        }
    }

    fn parse_finite_type(&mut self) -> FiniteType<'a> {
        let m = self.start();
        let mut units = Vec::new();
        loop {
            let kind = self.current_token();
            let is_literal = is_simple_literal_start(kind)
                || (kind == SyntaxKind::MinusToken
                    && (self.nth(1).is_integer_literal() || self.nth(1).is_float_literal()));
            if is_literal {
                units.push(FiniteTypeUnit::Literal(self.parse_simple_literal()));
            } else {
                let ty = self.parse_type_at(TypePrecedence::Nullable as u8);
                units.push(FiniteTypeUnit::Type(self.alloc(ty)));
            }
            if self.unwinding || self.optional_token(SyntaxKind::BarToken).is_none() {
                break;
            }
        }
        FiniteType {
            data: self.finish(m, SyntaxKind::FiniteType),
            units: self.alloc_list(units),
        }
    }

    /// `annotation<service, resource> Name T;`
    fn parse_annotation_definition(
        &mut self,
        m: Marker,
        metadata: Metadata<'a>,
        modifiers: ModifierFlags,
    ) -> AnnotationDefinition<'a> {
        self.bump();
        let mut attach_points = Vec::new();
        if self.optional_token(SyntaxKind::LessThanToken).is_some() {
            attach_points = self.parse_separated(SyntaxKind::GreaterThanToken, |p| {
                p.expect_one_of(ATTACH_POINTS, "attachment point")
            });
            self.expect_token(SyntaxKind::GreaterThanToken);
        }
        let name = self.expect_identifier();
        let type_name = if can_start_type(self.current_token()) {
            Some(self.parse_type_name())
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken);
        AnnotationDefinition {
            data: self.finish_definition(m, SyntaxKind::AnnotationDefinition, modifiers),
            metadata,
            attach_points: self.alloc_list(attach_points),
            name,
            type_name,
        }
    }

    /// `endpoint T name { ... };` or `endpoint T name = ref;`. `m` marks the
    /// annotations, if any.
    pub(super) fn parse_endpoint_declaration(
        &mut self,
        m: Marker,
        annotations: NodeList<'a, AnnotationAttachment<'a>>,
    ) -> EndpointDeclaration<'a> {
        self.expect_token(SyntaxKind::EndpointKeyword);
        let endpoint_type = self.parse_name_reference();
        let name = self.expect_identifier();
        let initialization = if self.at(SyntaxKind::OpenBraceToken) {
            let record = self.parse_record_literal();
            Some(EndpointInitialization::Record(self.alloc(record)))
        } else if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            Some(EndpointInitialization::Reference(self.parse_variable_reference()))
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken);
        EndpointDeclaration {
            data: self.finish(m, SyntaxKind::EndpointDeclaration),
            annotations,
            endpoint_type,
            name,
            initialization,
        }
    }

    fn parse_global_variable(
        &mut self,
        m: Marker,
        metadata: Metadata<'a>,
        modifiers: ModifierFlags,
    ) -> GlobalVariableDefinition<'a> {
        let type_name = self.parse_type_name();
        let name = self.expect_identifier();
        let initializer = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_expression())
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken);
        GlobalVariableDefinition {
            data: self.finish_definition(m, SyntaxKind::GlobalVariableDefinition, modifiers),
            metadata,
            type_name,
            name,
            initializer,
        }
    }
}
