//! Compilation unit structure: imports, services, functions, types,
//! annotations, endpoints and globals.

mod common;

use bal_syntax::coverage::round_trips;
use bal_syntax::*;
use common::*;

// ============================================================================
// Imports
// ============================================================================

#[test]
fn test_import_with_org_version_and_alias() {
    with_clean_source("import ballerina/http.client version 1.2 as web;", |tree| {
        assert_eq!(tree.root.imports.len(), 1);
        let ImportItem::Import(import) = &tree.root.imports[0] else {
            panic!("expected an import");
        };
        assert_eq!(tree.name(import.org_name.as_ref().unwrap()), "ballerina");
        let segments: Vec<_> = import.package.segments.iter().map(|s| tree.name(s)).collect();
        assert_eq!(segments, ["http", "client"]);
        assert_eq!(tree.token_text(import.package.version.as_ref().unwrap()), "1.2");
        assert_eq!(tree.name(import.alias.as_ref().unwrap()), "web");
        assert!(tree.root.definitions.is_empty());
        assert!(round_trips(tree));
    });
}

#[test]
fn test_namespace_declaration_at_top_level() {
    with_clean_source(r#"xmlns "http://example.com/ns" as ns;"#, |tree| {
        let ImportItem::Namespace(ns) = &tree.root.imports[0] else {
            panic!("expected a namespace declaration");
        };
        assert_eq!(tree.token_text(&ns.uri), "\"http://example.com/ns\"");
        assert_eq!(tree.name(ns.prefix.as_ref().unwrap()), "ns");
    });
}

#[test]
fn test_import_after_definition_is_reported_and_kept() {
    with_source("int x = 1; import foo;", |tree, diagnostics| {
        assert_eq!(codes(diagnostics), [1004]);
        assert_eq!(tree.root.imports.len(), 1);
        assert_eq!(tree.root.definitions.len(), 1);
    });
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_public_function_with_parameters_and_return() {
    let source = "public function add(int a, int b = 2, string... rest) returns int { return a + b; }";
    with_clean_source(source, |tree| {
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected a function");
        };
        assert!(function.data.modifiers.contains(ModifierFlags::PUBLIC));
        assert_eq!(tree.name(&function.signature.name), "add");
        let parameters = function.signature.parameters.parameters;
        assert_eq!(parameters.len(), 3);
        assert!(matches!(parameters[0], Parameter::Simple(_)));
        assert!(matches!(parameters[1], Parameter::Defaultable(_)));
        assert!(matches!(parameters[2], Parameter::Rest(_)));
        let returns = function.signature.return_parameter.as_ref().unwrap();
        assert!(matches!(returns.type_name, TypeName::Builtin(_)));
        let body = function.body.as_ref().unwrap();
        assert!(matches!(body.statements[0], Statement::Return(_)));
        assert!(round_trips(tree));
    });
}

#[test]
fn test_native_function_without_body() {
    with_clean_source("native function now() returns int;", |tree| {
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected a function");
        };
        assert!(function.data.modifiers.contains(ModifierFlags::NATIVE));
        assert!(function.body.is_none());
    });
}

#[test]
fn test_attached_function_receiver() {
    with_clean_source("function Person::greet() { }", |tree| {
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected a function");
        };
        assert_eq!(tree.name(function.receiver.as_ref().unwrap()), "Person");
        assert_eq!(tree.name(&function.signature.name), "greet");
    });
}

#[test]
fn test_function_body_with_workers() {
    let source = "function main() { worker w1 { int a = 1; } worker w2 { } }";
    with_clean_source(source, |tree| {
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected a function");
        };
        let body = function.body.as_ref().unwrap();
        assert!(body.statements.is_empty());
        assert_eq!(body.workers.len(), 2);
        assert_eq!(body.workers[0].body.statements.len(), 1);
    });
}

#[test]
fn test_tuple_parameter() {
    with_clean_source("function f((int, string) pair, (int a, string b)) { }", |tree| {
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected a function");
        };
        let parameters = function.signature.parameters.parameters;
        let Parameter::Simple(first) = &parameters[0] else {
            panic!("expected a simple parameter with a tuple type");
        };
        assert!(matches!(first.type_name, TypeName::Tuple(_)));
        let Parameter::Tuple(second) = &parameters[1] else {
            panic!("expected a tuple parameter");
        };
        assert_eq!(second.members.len(), 2);
    });
}

// ============================================================================
// Services
// ============================================================================

#[test]
fn test_service_with_endpoint_binding_and_resources() {
    let source = r#"
        service<http:Service> hello bind listener {
            endpoint http:Client backend { url: "http://localhost" };
            int counter = 0;
            sayHello(endpoint caller, http:Request req) {
                counter += 1;
            }
        }
    "#;
    with_clean_source(source, |tree| {
        let Definition::Service(service) = &tree.root.definitions[0] else {
            panic!("expected a service");
        };
        let endpoint_type = service.endpoint_type.as_ref().unwrap();
        assert_eq!(tree.name(endpoint_type.package.as_ref().unwrap()), "http");
        assert_eq!(tree.name(&endpoint_type.name), "Service");
        assert_eq!(tree.name(&service.name), "hello");
        assert_eq!(service.bind.as_ref().unwrap().endpoints.len(), 1);
        assert_eq!(service.body.endpoints.len(), 1);
        assert_eq!(service.body.variables.len(), 1);
        assert_eq!(service.body.resources.len(), 1);
        let resource = &service.body.resources[0];
        assert_eq!(tree.name(resource.parameters.caller.as_ref().unwrap()), "caller");
        assert_eq!(resource.parameters.parameters.len(), 1);
        assert!(round_trips(tree));
    });
}

#[test]
fn test_service_bind_record() {
    with_clean_source("service s bind { port: 9090 } { }", |tree| {
        let Definition::Service(service) = &tree.root.definitions[0] else {
            panic!("expected a service");
        };
        let bind = service.bind.as_ref().unwrap();
        assert!(bind.endpoints.is_empty());
        assert_eq!(bind.record.unwrap().fields.len(), 1);
    });
}

#[test]
fn test_annotated_resource_metadata() {
    let source = "service s { @http:ResourceConfig { path: \"/\" } get(endpoint c) { } }";
    with_clean_source(source, |tree| {
        let Definition::Service(service) = &tree.root.definitions[0] else {
            panic!("expected a service");
        };
        let resource = &service.body.resources[0];
        assert_eq!(resource.metadata.annotations.len(), 1);
        assert!(resource.metadata.annotations[0].value.is_some());
    });
}

// ============================================================================
// Types, annotations, endpoints and globals
// ============================================================================

#[test]
fn test_finite_type_definition() {
    with_clean_source(r#"type Mode "on" | "off" | -1 | int[];"#, |tree| {
        let Definition::Type(ty) = &tree.root.definitions[0] else {
            panic!("expected a type definition");
        };
        let units = ty.finite_type.units;
        assert_eq!(units.len(), 4);
        assert!(matches!(units[0], FiniteTypeUnit::Literal(_)));
        let FiniteTypeUnit::Literal(negative) = &units[2] else {
            panic!("expected a literal");
        };
        assert!(negative.sign.is_some());
        assert!(matches!(units[3], FiniteTypeUnit::Type(TypeName::Array(_))));
    });
}

#[test]
fn test_object_type_definition() {
    let source = r#"
        type Person object {
            public { string name; int age = 0; }
            private { int id; }
            new (name, int age = 1) { }
            function getName() returns string;
        };
    "#;
    with_clean_source(source, |tree| {
        let Definition::Type(ty) = &tree.root.definitions[0] else {
            panic!("expected a type definition");
        };
        let FiniteTypeUnit::Type(TypeName::Object(object)) = &ty.finite_type.units[0] else {
            panic!("expected an object type");
        };
        assert_eq!(object.public_fields.as_ref().unwrap().fields.len(), 2);
        assert_eq!(object.private_fields.as_ref().unwrap().fields.len(), 1);
        let initializer = object.initializer.unwrap();
        assert!(initializer.parameters.parameters[0].type_name.is_none());
        assert_eq!(object.functions.len(), 1);
        assert!(object.functions[0].body.is_none());
    });
}

#[test]
fn test_record_type_with_rest_field() {
    with_clean_source("type R record { int a; string b = \"x\"; json...; };", |tree| {
        let Definition::Type(ty) = &tree.root.definitions[0] else {
            panic!("expected a type definition");
        };
        let FiniteTypeUnit::Type(TypeName::Record(record)) = &ty.finite_type.units[0] else {
            panic!("expected a record type");
        };
        assert_eq!(record.fields.len(), 2);
        assert!(record.rest_field.is_some());
    });
}

#[test]
fn test_annotation_definition_with_attach_points() {
    with_clean_source("annotation<service, resource> Config ConfigRecord;", |tree| {
        let Definition::Annotation(annotation) = &tree.root.definitions[0] else {
            panic!("expected an annotation definition");
        };
        let points: Vec<_> = annotation.attach_points.iter().map(|t| t.kind).collect();
        assert_eq!(points, [SyntaxKind::ServiceKeyword, SyntaxKind::ResourceKeyword]);
        assert_eq!(tree.name(&annotation.name), "Config");
        assert!(annotation.type_name.is_some());
    });
}

#[test]
fn test_global_endpoint_and_variable() {
    let source = "endpoint http:Listener ep { port: 9090 }; map<string> headers;";
    with_clean_source(source, |tree| {
        let Definition::GlobalEndpoint(endpoint) = &tree.root.definitions[0] else {
            panic!("expected an endpoint");
        };
        assert!(matches!(
            endpoint.endpoint.initialization,
            Some(EndpointInitialization::Record(_))
        ));
        let Definition::GlobalVariable(variable) = &tree.root.definitions[1] else {
            panic!("expected a global variable");
        };
        assert!(matches!(variable.type_name, TypeName::Constrained(_)));
        assert!(variable.initializer.is_none());
    });
}

#[test]
fn test_union_of_array_and_nullable() {
    with_clean_source("int[]|string? value;", |tree| {
        let Definition::GlobalVariable(variable) = &tree.root.definitions[0] else {
            panic!("expected a global variable");
        };
        let TypeName::Union(union) = variable.type_name else {
            panic!("expected a union type");
        };
        assert!(matches!(union.members[0], TypeName::Array(_)));
        assert!(matches!(union.members[1], TypeName::Nullable(_)));
    });
}

#[test]
fn test_function_type_variable() {
    with_clean_source("function (int, string s) returns boolean predicate;", |tree| {
        let Definition::GlobalVariable(variable) = &tree.root.definitions[0] else {
            panic!("expected a global variable");
        };
        let TypeName::Function(function) = variable.type_name else {
            panic!("expected a function type");
        };
        assert_eq!(function.parameters.len(), 2);
        assert!(function.parameters[0].name.is_none());
        assert!(function.parameters[1].name.is_some());
        assert!(function.return_parameter.is_some());
    });
}
