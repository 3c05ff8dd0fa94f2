//! Expression forms as they appear in variable initializers.

mod common;

use bal_syntax::*;
use common::*;

/// Run `f` on the initializer of `T x = <expression>;` inside a function.
fn with_initializer(expression: &str, f: impl FnOnce(&ParseTree<'_>, &Expression<'_>)) {
    let body = format!("any x = {};", expression);
    with_main_body(&body, |tree, statements, diagnostics| {
        assert!(
            diagnostics.is_empty(),
            "unexpected diagnostics for {:?}: {:?}",
            expression,
            diagnostics.iter().map(|d| &d.message_text).collect::<Vec<_>>()
        );
        let Statement::VariableDefinition(definition) = &statements[0] else {
            panic!("expected a variable definition, got {:?}", statements[0]);
        };
        f(tree, definition.initializer.expect("initializer"));
    });
}

fn reference<'a>(expression: &'a Expression<'a>) -> &'a VariableReference<'a> {
    match expression {
        Expression::VariableReference(reference) => reference.reference,
        other => panic!("expected a variable reference, got {:?}", other),
    }
}

#[test]
fn test_binary_precedence_and_associativity() {
    with_initializer("a - b - c * d", |_, expr| {
        let Expression::Binary(outer) = expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(outer.operator.kind, SyntaxKind::MinusToken);
        assert!(matches!(outer.left, Expression::Binary(inner) if inner.operator.kind == SyntaxKind::MinusToken));
        assert!(matches!(outer.right, Expression::Binary(inner) if inner.operator.kind == SyntaxKind::AsteriskToken));
    });
}

#[test]
fn test_logical_operators_bind_looser_than_comparison() {
    with_initializer("a < b && c != d || e", |_, expr| {
        let Expression::Binary(or) = expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(or.operator.kind, SyntaxKind::BarBarToken);
        let Expression::Binary(and) = or.left else {
            panic!("expected a binary expression");
        };
        assert_eq!(and.operator.kind, SyntaxKind::AmpersandAmpersandToken);
        assert!(matches!(and.left, Expression::Binary(lt) if lt.operator.kind == SyntaxKind::LessThanToken));
    });
}

#[test]
fn test_ternary_and_elvis() {
    with_initializer("a > b ? a : b", |_, expr| {
        let Expression::Ternary(ternary) = expr else {
            panic!("expected a ternary expression");
        };
        assert!(matches!(ternary.condition, Expression::Binary(_)));
    });
    with_initializer("name ?: \"anonymous\"", |_, expr| {
        assert!(matches!(expr, Expression::Elvis(_)));
    });
}

#[test]
fn test_unary_operators() {
    with_initializer("!done", |_, expr| {
        assert!(matches!(expr, Expression::Unary(u) if u.operator.kind == SyntaxKind::ExclamationToken));
    });
    with_initializer("lengthof items", |_, expr| {
        assert!(matches!(expr, Expression::Unary(u) if u.operator.kind == SyntaxKind::LengthofKeyword));
    });
    with_initializer("-count", |_, expr| {
        assert!(matches!(expr, Expression::Unary(_)));
    });
}

#[test]
fn test_negative_literal_is_signed() {
    with_initializer("-42", |tree, expr| {
        let Expression::Literal(literal) = expr else {
            panic!("expected a literal");
        };
        assert_eq!(literal.kind, LiteralKind::Integer);
        assert_eq!(tree.token_text(literal.sign.as_ref().unwrap()), "-");
        assert_eq!(tree.token_text(&literal.value), "42");
    });
}

#[test]
fn test_literal_kinds() {
    let cases = [
        ("0x1F", LiteralKind::Integer),
        ("3.14", LiteralKind::Float),
        ("\"text\"", LiteralKind::String),
        ("true", LiteralKind::Boolean),
        ("null", LiteralKind::Null),
        ("()", LiteralKind::Nil),
    ];
    for (source, kind) in cases {
        with_initializer(source, |_, expr| {
            assert!(
                matches!(expr, Expression::Literal(literal) if literal.kind == kind),
                "{} should be a {:?} literal",
                source,
                kind
            );
        });
    }
}

#[test]
fn test_field_index_and_method_chain() {
    with_initializer("person.address[0].city.toUpper()", |tree, expr| {
        let VariableReference::Invocation(call) = reference(expr) else {
            panic!("expected a method invocation");
        };
        assert_eq!(tree.name(&call.name), "toUpper");
        let VariableReference::Field(city) = call.target else {
            panic!("expected a field reference");
        };
        assert!(matches!(city.target, VariableReference::Index(_)));
    });
}

#[test]
fn test_json_field_access_and_wildcard() {
    with_initializer("payload!name", |_, expr| {
        let VariableReference::Field(field) = reference(expr) else {
            panic!("expected a field reference");
        };
        assert_eq!(field.accessor.kind, SyntaxKind::ExclamationToken);
    });
    with_initializer("entry.*", |_, expr| {
        let VariableReference::Field(field) = reference(expr) else {
            panic!("expected a field reference");
        };
        assert!(matches!(field.field, FieldName::All(_)));
    });
}

#[test]
fn test_xml_attribute_reference() {
    with_initializer("doc@[\"id\"]", |_, expr| {
        let VariableReference::XmlAttribute(attribute) = reference(expr) else {
            panic!("expected an attribute reference");
        };
        assert!(attribute.index.is_some());
    });
}

#[test]
fn test_qualified_function_call_with_arguments() {
    with_initializer("io:sprintf(fmt, count = 2, ...rest)", |tree, expr| {
        let VariableReference::FunctionInvocation(call) = reference(expr) else {
            panic!("expected a function invocation");
        };
        assert_eq!(tree.name(call.name.package.as_ref().unwrap()), "io");
        assert!(matches!(call.arguments[0], InvocationArgument::Positional(_)));
        assert!(matches!(call.arguments[1], InvocationArgument::Named(_)));
        assert!(matches!(call.arguments[2], InvocationArgument::Rest(_)));
    });
}

#[test]
fn test_action_invocation() {
    with_initializer("clientEp -> get(\"/path\")", |tree, expr| {
        let Expression::ActionInvocation(action) = expr else {
            panic!("expected an action invocation");
        };
        assert!(action.start.is_none());
        assert_eq!(tree.name(&action.endpoint.name), "clientEp");
        assert_eq!(tree.name(&action.invocation.name.name), "get");
    });
}

#[test]
fn test_start_and_await() {
    with_initializer("start compute(1)", |_, expr| {
        let Expression::VariableReference(reference) = expr else {
            panic!("expected a reference expression");
        };
        assert!(reference.start.is_some());
    });
    with_initializer("await pending", |_, expr| {
        assert!(matches!(expr, Expression::Await(_)));
    });
}

#[test]
fn test_check_expression() {
    with_initializer("check readFile(path)", |_, expr| {
        let Expression::Check(check) = expr else {
            panic!("expected a checked expression");
        };
        assert!(matches!(check.expression, Expression::VariableReference(_)));
    });
}

#[test]
fn test_type_conversion_with_conversion_function() {
    with_initializer("<int>value", |_, expr| {
        let Expression::TypeConversion(conversion) = expr else {
            panic!("expected a type conversion");
        };
        assert!(conversion.conversion.is_none());
    });
    with_initializer("<Person, toPerson(mapping)>data", |_, expr| {
        let Expression::TypeConversion(conversion) = expr else {
            panic!("expected a type conversion");
        };
        assert!(conversion.conversion.is_some());
    });
}

#[test]
fn test_array_record_and_table_literals() {
    with_initializer("[1, 2, 3]", |_, expr| {
        assert!(matches!(expr, Expression::Array(array) if array.elements.len() == 3));
    });
    with_initializer("{ name: \"x\", \"key\": 1 }", |_, expr| {
        assert!(matches!(expr, Expression::Record(record) if record.fields.len() == 2));
    });
    with_initializer("table { }", |_, expr| {
        assert!(matches!(expr, Expression::Table(_)));
    });
}

#[test]
fn test_parenthesized_and_tuple() {
    with_initializer("(a + b)", |_, expr| {
        assert!(matches!(expr, Expression::Braced(_)));
    });
    with_initializer("(a, \"b\", 3)", |_, expr| {
        assert!(matches!(expr, Expression::Tuple(tuple) if tuple.elements.len() == 3));
    });
}

#[test]
fn test_type_init_forms() {
    with_initializer("new", |_, expr| {
        assert!(matches!(expr, Expression::TypeInit(init) if init.type_name.is_none() && init.arguments.is_none()));
    });
    with_initializer("new Person(\"a\", 3)", |_, expr| {
        let Expression::TypeInit(init) = expr else {
            panic!("expected a type init");
        };
        assert!(init.type_name.is_some());
        assert_eq!(init.arguments.unwrap().len(), 2);
    });
}

#[test]
fn test_lambda_function() {
    with_initializer("function (int a) returns int { return a * 2; }", |_, expr| {
        let Expression::Lambda(lambda) = expr else {
            panic!("expected a lambda");
        };
        assert_eq!(lambda.parameters.parameters.len(), 1);
        assert!(lambda.return_parameter.is_some());
        assert_eq!(lambda.body.statements.len(), 1);
    });
}

#[test]
fn test_match_expression() {
    with_initializer("result but { error e => 0, int n => n }", |_, expr| {
        let Expression::Match(matched) = expr else {
            panic!("expected a match expression");
        };
        assert_eq!(matched.clauses.len(), 2);
        assert!(matched.clauses[0].binding.is_some());
    });
}

#[test]
fn test_builtin_type_as_expression() {
    with_initializer("int", |_, expr| {
        assert!(matches!(expr, Expression::TypeAccess(_)));
    });
}

#[test]
fn test_reserved_word_call_name() {
    with_initializer("foreach(items)", |_, expr| {
        assert!(matches!(reference(expr), VariableReference::FunctionInvocation(_)));
    });
}
