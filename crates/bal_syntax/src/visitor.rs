//! Parse tree traversal.
//!
//! `Visitor` has one `visit_*` hook per rule family plus a few structural
//! nodes; every hook defaults to the matching `walk_*` function, which
//! recurses into children. `enter_node` and `leave_node` fire around every
//! node that carries `NodeData`, so a visitor that only needs spans can
//! implement just those two.

use crate::node::*;

pub trait Visitor<'a> {
    fn enter_node(&mut self, _data: &NodeData) {}

    fn leave_node(&mut self, _data: &NodeData) {}

    fn visit_compilation_unit(&mut self, node: &CompilationUnit<'a>) {
        walk_compilation_unit(self, node);
    }

    fn visit_definition(&mut self, node: &Definition<'a>) {
        walk_definition(self, node);
    }

    fn visit_statement(&mut self, node: &Statement<'a>) {
        walk_statement(self, node);
    }

    fn visit_block(&mut self, node: &Block<'a>) {
        walk_block(self, node);
    }

    fn visit_expression(&mut self, node: &Expression<'a>) {
        walk_expression(self, node);
    }

    fn visit_type_name(&mut self, node: &TypeName<'a>) {
        walk_type_name(self, node);
    }

    fn visit_variable_reference(&mut self, node: &VariableReference<'a>) {
        walk_variable_reference(self, node);
    }

    fn visit_parameter(&mut self, node: &Parameter<'a>) {
        walk_parameter(self, node);
    }

    fn visit_metadata(&mut self, node: &Metadata<'a>) {
        walk_metadata(self, node);
    }

    fn visit_annotation_attachment(&mut self, node: &AnnotationAttachment<'a>) {
        walk_annotation_attachment(self, node);
    }

    fn visit_xml_element(&mut self, node: &XmlElement<'a>) {
        walk_xml_element(self, node);
    }

    fn visit_streaming_query(&mut self, node: &StreamingQueryStatement<'a>) {
        walk_streaming_query(self, node);
    }
}

#[inline]
fn scoped<'a, V, F>(v: &mut V, data: &NodeData, f: F)
where
    V: Visitor<'a> + ?Sized,
    F: FnOnce(&mut V),
{
    v.enter_node(data);
    f(v);
    v.leave_node(data);
}

#[inline]
fn leaf<'a, V: Visitor<'a> + ?Sized>(v: &mut V, data: &NodeData) {
    v.enter_node(data);
    v.leave_node(data);
}

// ============================================================================
// Compilation unit and definitions
// ============================================================================

pub fn walk_compilation_unit<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &CompilationUnit<'a>) {
    scoped(v, &node.data, |v| {
        for item in node.imports {
            match item {
                ImportItem::Import(import) => scoped(v, &import.data, |v| {
                    leaf(v, &import.package.data);
                }),
                ImportItem::Namespace(ns) => leaf(v, &ns.data),
            }
        }
        for definition in node.definitions {
            v.visit_definition(definition);
        }
    });
}

pub fn walk_definition<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &Definition<'a>) {
    match node {
        Definition::Service(n) => walk_service_definition(v, n),
        Definition::Function(n) => scoped(v, &n.data, |v| {
            v.visit_metadata(&n.metadata);
            walk_signature(v, &n.signature);
            if let Some(body) = &n.body {
                walk_callable_body(v, body);
            }
        }),
        Definition::Type(n) => scoped(v, &n.data, |v| {
            v.visit_metadata(&n.metadata);
            scoped(v, &n.finite_type.data, |v| {
                for unit in n.finite_type.units {
                    match unit {
                        FiniteTypeUnit::Literal(lit) => leaf(v, &lit.data),
                        FiniteTypeUnit::Type(ty) => v.visit_type_name(ty),
                    }
                }
            });
        }),
        Definition::Annotation(n) => scoped(v, &n.data, |v| {
            v.visit_metadata(&n.metadata);
            if let Some(ty) = n.type_name {
                v.visit_type_name(ty);
            }
        }),
        Definition::GlobalVariable(n) => scoped(v, &n.data, |v| {
            v.visit_metadata(&n.metadata);
            v.visit_type_name(n.type_name);
            if let Some(init) = n.initializer {
                v.visit_expression(init);
            }
        }),
        Definition::GlobalEndpoint(n) => scoped(v, &n.data, |v| {
            v.visit_metadata(&n.metadata);
            walk_endpoint_declaration(v, &n.endpoint);
        }),
        Definition::Missing(data) => leaf(v, data),
    }
}

pub fn walk_service_definition<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &ServiceDefinition<'a>,
) {
    scoped(v, &node.data, |v| {
        v.visit_metadata(&node.metadata);
        if let Some(endpoint_type) = &node.endpoint_type {
            leaf(v, &endpoint_type.data);
        }
        if let Some(bind) = &node.bind {
            scoped(v, &bind.data, |v| {
                for ep in bind.endpoints {
                    leaf(v, &ep.data);
                }
                if let Some(record) = bind.record {
                    walk_record_literal(v, record);
                }
            });
        }
        scoped(v, &node.body.data, |v| {
            for ep in node.body.endpoints {
                walk_endpoint_declaration(v, ep);
            }
            for var in node.body.variables {
                walk_variable_definition(v, var);
            }
            for resource in node.body.resources {
                scoped(v, &resource.data, |v| {
                    v.visit_metadata(&resource.metadata);
                    scoped(v, &resource.parameters.data, |v| {
                        for param in resource.parameters.parameters {
                            v.visit_parameter(param);
                        }
                    });
                    walk_callable_body(v, &resource.body);
                });
            }
        });
    });
}

pub fn walk_metadata<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &Metadata<'a>) {
    for doc in node.documentation {
        walk_documentation(v, doc);
    }
    for dep in node.deprecated {
        scoped(v, &dep.data, |v| {
            if let Some(text) = &dep.text {
                walk_documentation_text(v, text);
            }
        });
    }
    for annotation in node.annotations {
        v.visit_annotation_attachment(annotation);
    }
}

pub fn walk_annotation_attachment<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &AnnotationAttachment<'a>,
) {
    scoped(v, &node.data, |v| {
        leaf(v, &node.name.data);
        if let Some(record) = node.value {
            walk_record_literal(v, record);
        }
    });
}

pub fn walk_documentation<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &DocumentationAttachment<'a>,
) {
    scoped(v, &node.data, |v| {
        if let Some(text) = &node.text {
            walk_documentation_text(v, text);
        }
        for attribute in node.attributes {
            scoped(v, &attribute.data, |v| {
                if let Some(text) = &attribute.description {
                    walk_documentation_text(v, text);
                }
            });
        }
    });
}

fn walk_documentation_text<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &DocumentationText<'a>) {
    scoped(v, &node.data, |v| {
        for part in node.parts {
            if let DocumentationTextPart::InlineCode(code) = part {
                leaf(v, &code.data);
            }
        }
    });
}

pub fn walk_signature<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &CallableUnitSignature<'a>) {
    scoped(v, &node.data, |v| {
        walk_formal_parameters(v, &node.parameters);
        if let Some(ret) = &node.return_parameter {
            walk_return_parameter(v, ret);
        }
    });
}

pub fn walk_formal_parameters<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &FormalParameterList<'a>,
) {
    scoped(v, &node.data, |v| {
        for param in node.parameters {
            v.visit_parameter(param);
        }
    });
}

fn walk_return_parameter<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &ReturnParameter<'a>) {
    scoped(v, &node.data, |v| {
        for annotation in node.annotations {
            v.visit_annotation_attachment(annotation);
        }
        v.visit_type_name(node.type_name);
    });
}

pub fn walk_parameter<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &Parameter<'a>) {
    match node {
        Parameter::Simple(p) => walk_simple_parameter(v, p),
        Parameter::Tuple(p) => scoped(v, &p.data, |v| {
            for annotation in p.annotations {
                v.visit_annotation_attachment(annotation);
            }
            for member in p.members {
                walk_simple_parameter(v, member);
            }
        }),
        Parameter::Defaultable(p) => scoped(v, &p.data, |v| {
            v.visit_parameter(p.parameter);
            v.visit_expression(p.default);
        }),
        Parameter::Rest(p) => scoped(v, &p.data, |v| {
            for annotation in p.annotations {
                v.visit_annotation_attachment(annotation);
            }
            v.visit_type_name(p.type_name);
        }),
    }
}

fn walk_simple_parameter<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &SimpleParameter<'a>) {
    scoped(v, &node.data, |v| {
        for annotation in node.annotations {
            v.visit_annotation_attachment(annotation);
        }
        v.visit_type_name(node.type_name);
    });
}

pub fn walk_callable_body<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &CallableUnitBody<'a>) {
    scoped(v, &node.data, |v| {
        for ep in node.endpoints {
            walk_endpoint_declaration(v, ep);
        }
        for stmt in node.statements {
            v.visit_statement(stmt);
        }
        for worker in node.workers {
            walk_worker(v, worker);
        }
    });
}

fn walk_worker<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &WorkerDeclaration<'a>) {
    scoped(v, &node.data, |v| v.visit_block(&node.body));
}

pub fn walk_endpoint_declaration<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &EndpointDeclaration<'a>,
) {
    scoped(v, &node.data, |v| {
        for annotation in node.annotations {
            v.visit_annotation_attachment(annotation);
        }
        leaf(v, &node.endpoint_type.data);
        match &node.initialization {
            Some(EndpointInitialization::Record(record)) => walk_record_literal(v, record),
            Some(EndpointInitialization::Reference(reference)) => {
                v.visit_variable_reference(reference)
            }
            None => {}
        }
    });
}

fn walk_variable_definition<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &VariableDefinitionStatement<'a>,
) {
    scoped(v, &node.data, |v| {
        v.visit_type_name(node.type_name);
        if let Some(init) = node.initializer {
            v.visit_expression(init);
        }
    });
}

// ============================================================================
// Type names
// ============================================================================

pub fn walk_type_name<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &TypeName<'a>) {
    match node {
        TypeName::Builtin(n) => leaf(v, &n.data),
        TypeName::Constrained(n) => scoped(v, &n.data, |v| match &n.constraint {
            TypeConstraint::Type(ty) => v.visit_type_name(ty),
            TypeConstraint::XmlNamespace(ns) => leaf(v, &ns.data),
        }),
        TypeName::UserDefined(n) => scoped(v, &n.data, |v| leaf(v, &n.name.data)),
        TypeName::Function(n) => scoped(v, &n.data, |v| {
            for param in n.parameters {
                scoped(v, &param.data, |v| {
                    for annotation in param.annotations {
                        v.visit_annotation_attachment(annotation);
                    }
                    v.visit_type_name(param.type_name);
                });
            }
            if let Some(ret) = &n.return_parameter {
                walk_return_parameter(v, ret);
            }
        }),
        TypeName::Nil(n) => leaf(v, &n.data),
        TypeName::Array(n) => scoped(v, &n.data, |v| {
            v.visit_type_name(n.element);
            for dim in n.dimensions {
                leaf(v, &dim.data);
            }
        }),
        TypeName::Union(n) => scoped(v, &n.data, |v| {
            for member in n.members {
                v.visit_type_name(member);
            }
        }),
        TypeName::Nullable(n) => scoped(v, &n.data, |v| v.visit_type_name(n.inner)),
        TypeName::Group(n) => scoped(v, &n.data, |v| v.visit_type_name(n.inner)),
        TypeName::Tuple(n) => scoped(v, &n.data, |v| {
            for member in n.members {
                v.visit_type_name(member);
            }
        }),
        TypeName::Object(n) => walk_object_type(v, n),
        TypeName::Record(n) => scoped(v, &n.data, |v| {
            for field in n.fields {
                walk_field_definition(v, field);
            }
            if let Some(rest) = &n.rest_field {
                scoped(v, &rest.data, |v| v.visit_type_name(rest.type_name));
            }
        }),
        TypeName::Missing(data) => leaf(v, data),
    }
}

fn walk_object_type<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &ObjectTypeName<'a>) {
    scoped(v, &node.data, |v| {
        for block in [&node.public_fields, &node.private_fields].into_iter().flatten() {
            scoped(v, &block.data, |v| {
                for field in block.fields {
                    walk_field_definition(v, field);
                }
            });
        }
        if let Some(init) = node.initializer {
            scoped(v, &init.data, |v| {
                v.visit_metadata(&init.metadata);
                scoped(v, &init.parameters.data, |v| {
                    for param in init.parameters.parameters {
                        scoped(v, &param.data, |v| {
                            for annotation in param.annotations {
                                v.visit_annotation_attachment(annotation);
                            }
                            if let Some(ty) = param.type_name {
                                v.visit_type_name(ty);
                            }
                            if let Some(default) = param.default {
                                v.visit_expression(default);
                            }
                        });
                    }
                });
                walk_callable_body(v, &init.body);
            });
        }
        for function in node.functions {
            scoped(v, &function.data, |v| {
                v.visit_metadata(&function.metadata);
                walk_signature(v, &function.signature);
                if let Some(body) = &function.body {
                    walk_callable_body(v, body);
                }
            });
        }
    });
}

fn walk_field_definition<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &FieldDefinition<'a>) {
    scoped(v, &node.data, |v| {
        v.visit_metadata(&node.metadata);
        v.visit_type_name(node.type_name);
        if let Some(default) = node.default {
            v.visit_expression(default);
        }
    });
}

// ============================================================================
// Variable references
// ============================================================================

pub fn walk_variable_reference<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &VariableReference<'a>,
) {
    match node {
        VariableReference::Simple(n) => scoped(v, &n.data, |v| leaf(v, &n.name.data)),
        VariableReference::FunctionInvocation(n) => walk_function_invocation(v, n),
        VariableReference::Index(n) => scoped(v, &n.data, |v| {
            v.visit_variable_reference(n.target);
            v.visit_expression(n.index);
        }),
        VariableReference::Field(n) => scoped(v, &n.data, |v| v.visit_variable_reference(n.target)),
        VariableReference::XmlAttribute(n) => scoped(v, &n.data, |v| {
            v.visit_variable_reference(n.target);
            if let Some(index) = n.index {
                v.visit_expression(index);
            }
        }),
        VariableReference::Invocation(n) => scoped(v, &n.data, |v| {
            v.visit_variable_reference(n.target);
            walk_arguments(v, n.arguments);
        }),
        VariableReference::Missing(data) => leaf(v, data),
    }
}

pub fn walk_function_invocation<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &FunctionInvocation<'a>,
) {
    scoped(v, &node.data, |v| {
        leaf(v, &node.name.data);
        walk_arguments(v, node.arguments);
    });
}

fn walk_arguments<'a, V: Visitor<'a> + ?Sized>(v: &mut V, args: &[InvocationArgument<'a>]) {
    for arg in args {
        match arg {
            InvocationArgument::Positional(expr) => v.visit_expression(expr),
            InvocationArgument::Named(named) => {
                scoped(v, &named.data, |v| v.visit_expression(named.value))
            }
            InvocationArgument::Rest(rest) => {
                scoped(v, &rest.data, |v| v.visit_expression(rest.expression))
            }
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

pub fn walk_expression<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &Expression<'a>) {
    match node {
        Expression::Literal(n) => leaf(v, &n.data),
        Expression::Array(n) => scoped(v, &n.data, |v| {
            for element in n.elements {
                v.visit_expression(element);
            }
        }),
        Expression::Record(n) => walk_record_literal(v, n),
        Expression::Table(n) => scoped(v, &n.data, |v| walk_record_literal(v, n.initializer)),
        Expression::Xml(n) => scoped(v, &n.data, |v| walk_xml_item(v, &n.item)),
        Expression::StringTemplate(n) => {
            scoped(v, &n.data, |v| walk_interpolated_text(v, &n.content))
        }
        Expression::VariableReference(n) => {
            scoped(v, &n.data, |v| v.visit_variable_reference(n.reference))
        }
        Expression::ActionInvocation(n) => scoped(v, &n.data, |v| {
            leaf(v, &n.endpoint.data);
            walk_function_invocation(v, &n.invocation);
        }),
        Expression::Lambda(n) => scoped(v, &n.data, |v| {
            walk_formal_parameters(v, &n.parameters);
            if let Some(ret) = &n.return_parameter {
                walk_return_parameter(v, ret);
            }
            walk_callable_body(v, &n.body);
        }),
        Expression::TypeInit(n) => scoped(v, &n.data, |v| {
            if let Some(ty) = &n.type_name {
                scoped(v, &ty.data, |v| leaf(v, &ty.name.data));
            }
            if let Some(args) = n.arguments {
                walk_arguments(v, args);
            }
        }),
        Expression::TableQuery(n) => walk_table_query(v, n),
        Expression::TypeConversion(n) => scoped(v, &n.data, |v| {
            v.visit_type_name(n.target_type);
            if let Some(conversion) = &n.conversion {
                walk_function_invocation(v, conversion);
            }
            v.visit_expression(n.expression);
        }),
        Expression::Unary(n) => scoped(v, &n.data, |v| v.visit_expression(n.operand)),
        Expression::Braced(n) => scoped(v, &n.data, |v| v.visit_expression(n.expression)),
        Expression::Tuple(n) => scoped(v, &n.data, |v| {
            for element in n.elements {
                v.visit_expression(element);
            }
        }),
        Expression::Await(n) => scoped(v, &n.data, |v| v.visit_expression(n.expression)),
        Expression::Check(n) => scoped(v, &n.data, |v| v.visit_expression(n.expression)),
        Expression::Binary(n) | Expression::Range(n) | Expression::Elvis(n) => {
            scoped(v, &n.data, |v| {
                v.visit_expression(n.left);
                v.visit_expression(n.right);
            })
        }
        Expression::Ternary(n) => scoped(v, &n.data, |v| {
            v.visit_expression(n.condition);
            v.visit_expression(n.then_expression);
            v.visit_expression(n.else_expression);
        }),
        Expression::Match(n) => scoped(v, &n.data, |v| {
            v.visit_expression(n.subject);
            for clause in n.clauses {
                scoped(v, &clause.data, |v| {
                    v.visit_type_name(clause.type_name);
                    v.visit_expression(clause.expression);
                });
            }
        }),
        Expression::TypeAccess(n) => scoped(v, &n.data, |v| v.visit_type_name(n.type_name)),
        Expression::Missing(data) => leaf(v, data),
    }
}

pub fn walk_record_literal<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &RecordLiteral<'a>) {
    scoped(v, &node.data, |v| {
        for field in node.fields {
            scoped(v, &field.data, |v| {
                if let RecordKey::Expression(key) = &field.key {
                    v.visit_expression(key);
                }
                v.visit_expression(field.value);
            });
        }
    });
}

// ============================================================================
// XML and templates
// ============================================================================

fn walk_xml_item<'a, V: Visitor<'a> + ?Sized>(v: &mut V, item: &XmlItem<'a>) {
    match item {
        XmlItem::Element(element) => v.visit_xml_element(element),
        XmlItem::ProcessingInstruction(pi) => {
            scoped(v, &pi.data, |v| walk_interpolated_text(v, &pi.text))
        }
        XmlItem::Comment(comment) => {
            scoped(v, &comment.data, |v| walk_interpolated_text(v, &comment.text))
        }
        XmlItem::Text(text) => walk_interpolated_text(v, text),
        XmlItem::Cdata(_) => {}
    }
}

pub fn walk_xml_element<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &XmlElement<'a>) {
    scoped(v, &node.data, |v| {
        scoped(v, &node.start_tag.data, |v| {
            walk_xml_name(v, &node.start_tag.name);
            for attribute in node.start_tag.attributes {
                scoped(v, &attribute.data, |v| {
                    walk_xml_name(v, &attribute.name);
                    scoped(v, &attribute.value.data, |v| {
                        walk_interpolated_text(v, &attribute.value.text)
                    });
                });
            }
        });
        for content in node.content {
            match content {
                XmlContent::Text(text) => walk_interpolated_text(v, text),
                XmlContent::Element(element) => v.visit_xml_element(element),
                XmlContent::Cdata(_) => {}
                XmlContent::ProcessingInstruction(pi) => {
                    scoped(v, &pi.data, |v| walk_interpolated_text(v, &pi.text))
                }
                XmlContent::Comment(comment) => {
                    scoped(v, &comment.data, |v| walk_interpolated_text(v, &comment.text))
                }
            }
        }
        if let Some(close) = &node.close_tag {
            scoped(v, &close.data, |v| walk_xml_name(v, &close.name));
        }
    });
}

fn walk_xml_name<'a, V: Visitor<'a> + ?Sized>(v: &mut V, name: &XmlQualifiedName<'a>) {
    match name {
        XmlQualifiedName::Name(n) => leaf(v, &n.data),
        XmlQualifiedName::Interpolation(n) => {
            scoped(v, &n.data, |v| v.visit_expression(n.expression))
        }
    }
}

pub fn walk_interpolated_text<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &InterpolatedText<'a>,
) {
    scoped(v, &node.data, |v| {
        for segment in node.segments {
            if let TextSegment::Interpolation(hole) = segment {
                scoped(v, &hole.data, |v| v.visit_expression(hole.expression));
            }
        }
    });
}

// ============================================================================
// Statements
// ============================================================================

pub fn walk_block<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &Block<'a>) {
    scoped(v, &node.data, |v| {
        for stmt in node.statements {
            v.visit_statement(stmt);
        }
    });
}

pub fn walk_statement<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &Statement<'a>) {
    match node {
        Statement::VariableDefinition(n) => walk_variable_definition(v, n),
        Statement::Assignment(n) => scoped(v, &n.data, |v| {
            v.visit_variable_reference(n.target);
            v.visit_expression(n.value);
        }),
        Statement::CompoundAssignment(n) => scoped(v, &n.data, |v| {
            v.visit_variable_reference(n.target);
            v.visit_expression(n.value);
        }),
        Statement::TupleDestructuring(n) => scoped(v, &n.data, |v| {
            match &n.targets {
                DestructuringTargets::References(refs) => {
                    for reference in refs.iter() {
                        v.visit_variable_reference(reference);
                    }
                }
                DestructuringTargets::Parameters(params) => {
                    for param in params.iter() {
                        walk_simple_parameter(v, param);
                    }
                }
            }
            v.visit_expression(n.value);
        }),
        Statement::If(n) => scoped(v, &n.data, |v| {
            for clause in std::iter::once(&n.if_clause).chain(n.else_if_clauses.iter()) {
                scoped(v, &clause.data, |v| {
                    v.visit_expression(clause.condition);
                    v.visit_block(&clause.body);
                });
            }
            if let Some(else_clause) = &n.else_clause {
                scoped(v, &else_clause.data, |v| v.visit_block(&else_clause.body));
            }
        }),
        Statement::Match(n) => scoped(v, &n.data, |v| {
            v.visit_expression(n.subject);
            for clause in n.clauses {
                scoped(v, &clause.data, |v| {
                    v.visit_type_name(clause.type_name);
                    match &clause.body {
                        MatchClauseBody::Statement(stmt) => v.visit_statement(stmt),
                        MatchClauseBody::Block(block) => v.visit_block(block),
                    }
                });
            }
        }),
        Statement::Foreach(n) => scoped(v, &n.data, |v| {
            for var in n.variables {
                v.visit_variable_reference(var);
            }
            match &n.iterable {
                ForeachIterable::Expression(expr) => v.visit_expression(expr),
                ForeachIterable::Range(range) => walk_int_range(v, range),
            }
            v.visit_block(&n.body);
        }),
        Statement::While(n) => scoped(v, &n.data, |v| {
            v.visit_expression(n.condition);
            v.visit_block(&n.body);
        }),
        Statement::Continue(n) => leaf(v, &n.data),
        Statement::Break(n) => leaf(v, &n.data),
        Statement::ForkJoin(n) => scoped(v, &n.data, |v| {
            for worker in n.workers {
                walk_worker(v, worker);
            }
            if let Some(join) = &n.join {
                scoped(v, &join.data, |v| {
                    if let Some(conditions) = &join.conditions {
                        leaf(v, &conditions.data);
                    }
                    v.visit_type_name(join.result_type);
                    v.visit_block(&join.body);
                });
            }
            if let Some(timeout) = &n.timeout {
                scoped(v, &timeout.data, |v| {
                    v.visit_expression(timeout.duration);
                    v.visit_type_name(timeout.result_type);
                    v.visit_block(&timeout.body);
                });
            }
        }),
        Statement::TryCatch(n) => scoped(v, &n.data, |v| {
            v.visit_block(&n.body);
            for catch in n.catches {
                scoped(v, &catch.data, |v| {
                    v.visit_type_name(catch.error_type);
                    v.visit_block(&catch.body);
                });
            }
            if let Some(finally) = &n.finally {
                scoped(v, &finally.data, |v| v.visit_block(&finally.body));
            }
        }),
        Statement::Throw(n) => scoped(v, &n.data, |v| v.visit_expression(n.expression)),
        Statement::Return(n) => scoped(v, &n.data, |v| {
            if let Some(expr) = n.expression {
                v.visit_expression(expr);
            }
        }),
        Statement::WorkerSend(n) => scoped(v, &n.data, |v| {
            v.visit_expression(n.expression);
            if let Some(key) = n.key {
                v.visit_expression(key);
            }
        }),
        Statement::WorkerReceive(n) => scoped(v, &n.data, |v| {
            v.visit_expression(n.expression);
            if let Some(key) = n.key {
                v.visit_expression(key);
            }
        }),
        Statement::Expression(n) => scoped(v, &n.data, |v| v.visit_expression(n.expression)),
        Statement::Transaction(n) => scoped(v, &n.data, |v| {
            for property in n.properties {
                scoped(v, &property.data, |v| v.visit_expression(property.value));
            }
            v.visit_block(&n.body);
            if let Some(on_retry) = &n.on_retry {
                scoped(v, &on_retry.data, |v| v.visit_block(&on_retry.body));
            }
        }),
        Statement::Abort(n) => leaf(v, &n.data),
        Statement::Retry(n) => leaf(v, &n.data),
        Statement::Lock(n) => scoped(v, &n.data, |v| v.visit_block(&n.body)),
        Statement::NamespaceDeclaration(n) => leaf(v, &n.data),
        Statement::Forever(n) => scoped(v, &n.data, |v| {
            for query in n.queries {
                v.visit_streaming_query(query);
            }
        }),
        Statement::Missing(data) => leaf(v, data),
    }
}

fn walk_int_range<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &IntRangeExpression<'a>) {
    scoped(v, &node.data, |v| {
        v.visit_expression(node.start);
        if let Some(end) = node.end {
            v.visit_expression(end);
        }
    });
}

// ============================================================================
// Streaming queries
// ============================================================================

pub fn walk_table_query<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &TableQuery<'a>) {
    scoped(v, &node.data, |v| {
        walk_streaming_input(v, &node.input);
        if let Some(join) = &node.join {
            walk_join(v, join);
        }
        if let Some(select) = &node.select {
            walk_select(v, select);
        }
        if let Some(order_by) = &node.order_by {
            walk_order_by(v, order_by);
        }
        if let Some(limit) = &node.limit {
            leaf(v, &limit.data);
        }
    });
}

pub fn walk_streaming_query<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    node: &StreamingQueryStatement<'a>,
) {
    scoped(v, &node.data, |v| {
        match &node.source {
            QuerySource::Input { input, join } => {
                walk_streaming_input(v, input);
                if let Some(join) = join {
                    walk_join(v, join);
                }
            }
            QuerySource::Pattern(pattern) => scoped(v, &pattern.data, |v| {
                walk_pattern_input(v, pattern.input);
                if let Some(within) = &pattern.within {
                    leaf(v, &within.data);
                }
            }),
        }
        if let Some(select) = &node.select {
            walk_select(v, select);
        }
        if let Some(order_by) = &node.order_by {
            walk_order_by(v, order_by);
        }
        if let Some(rate) = &node.output_rate_limit {
            leaf(v, &rate.data);
        }
        scoped(v, &node.action.data, |v| {
            walk_formal_parameters(v, &node.action.parameters);
            v.visit_block(&node.action.body);
        });
    });
}

fn walk_streaming_input<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &StreamingInput<'a>) {
    scoped(v, &node.data, |v| {
        v.visit_variable_reference(node.reference);
        if let Some(filter) = &node.pre_filter {
            walk_where(v, filter);
        }
        for function in node.pre_functions {
            walk_function_invocation(v, function);
        }
        if let Some(window) = &node.window {
            scoped(v, &window.data, |v| walk_function_invocation(v, &window.invocation));
        }
        for function in node.post_functions {
            walk_function_invocation(v, function);
        }
        if let Some(filter) = &node.post_filter {
            walk_where(v, filter);
        }
    });
}

fn walk_join<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &JoinStreamingInput<'a>) {
    scoped(v, &node.data, |v| {
        leaf(v, &node.join_type.data);
        walk_streaming_input(v, &node.input);
        v.visit_expression(node.on);
    });
}

fn walk_where<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &WhereClause<'a>) {
    scoped(v, &node.data, |v| v.visit_expression(node.condition));
}

fn walk_pattern_input<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &PatternInput<'a>) {
    match node {
        PatternInput::FollowedBy(n) => scoped(v, &n.data, |v| {
            walk_pattern_edge(v, &n.left);
            walk_pattern_input(v, n.right);
        }),
        PatternInput::Grouped(n) => scoped(v, &n.data, |v| walk_pattern_input(v, n.inner)),
        PatternInput::Negation(n) => scoped(v, &n.data, |v| {
            walk_pattern_edge(v, &n.edge);
            if let Some(edge) = &n.and_edge {
                walk_pattern_edge(v, edge);
            }
            if let Some(duration) = &n.duration {
                leaf(v, &duration.data);
            }
        }),
        PatternInput::Logical(n) => scoped(v, &n.data, |v| {
            walk_pattern_edge(v, &n.left);
            walk_pattern_edge(v, &n.right);
        }),
        PatternInput::Edge(n) => walk_pattern_edge(v, n),
    }
}

fn walk_pattern_edge<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &PatternEdgeInput<'a>) {
    scoped(v, &node.data, |v| {
        v.visit_variable_reference(node.reference);
        if let Some(filter) = &node.filter {
            walk_where(v, filter);
        }
        if let Some(count) = &node.count {
            walk_int_range(v, count);
        }
    });
}

fn walk_select<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &SelectClause<'a>) {
    scoped(v, &node.data, |v| {
        for expr in node.expressions {
            scoped(v, &expr.data, |v| v.visit_expression(expr.expression));
        }
        if let Some(group_by) = &node.group_by {
            scoped(v, &group_by.data, |v| {
                for reference in group_by.references {
                    v.visit_variable_reference(reference);
                }
            });
        }
        if let Some(having) = &node.having {
            scoped(v, &having.data, |v| v.visit_expression(having.condition));
        }
    });
}

fn walk_order_by<'a, V: Visitor<'a> + ?Sized>(v: &mut V, node: &OrderByClause<'a>) {
    scoped(v, &node.data, |v| {
        for var in node.variables {
            scoped(v, &var.data, |v| v.visit_variable_reference(var.reference));
        }
    });
}
