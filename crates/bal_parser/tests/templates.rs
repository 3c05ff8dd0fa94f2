//! XML literals, string templates and documentation attachments. The token
//! streams for these modes are spelled out, as the tokenizer would emit them.

mod common;

use bal_syntax::coverage::round_trips;
use bal_syntax::*;
use common::*;
use SyntaxKind::*;

fn first_initializer<'t, 'a>(tree: &'t ParseTree<'a>) -> &'a Expression<'a> {
    let Definition::Function(function) = &tree.root.definitions[0] else {
        panic!("expected a function");
    };
    let body = function.body.as_ref().expect("body");
    let Statement::VariableDefinition(definition) = &body.statements[0] else {
        panic!("expected a variable definition");
    };
    definition.initializer.expect("initializer")
}

#[test]
fn test_xml_element_with_attribute_interpolation_and_empty_child() {
    let tokens = TokenBuilder::new()
        .code("function main() { xml x = ")
        .token(XmlLiteralStart, "xml `")
        .token(XmlTagOpen, "<")
        .token(XmlQName, "a")
        .token(XmlQNameSeparator, ":")
        .token(XmlQName, "root")
        .token(XmlQName, " id")
        .token(XmlTagEquals, "=")
        .token(XmlDoubleQuote, "\"")
        .token(XmlDoubleQuotedString, "1")
        .token(XmlDoubleQuoteEnd, "\"")
        .token(XmlTagClose, ">")
        .token(XmlTemplateText, "Hello {{")
        .code("name")
        .token(ExpressionEnd, "}}")
        .token(XmlTagOpen, "<")
        .token(XmlQName, "b")
        .token(XmlTagSlashClose, "/>")
        .token(XmlTagOpenSlash, "</")
        .token(XmlQName, "a")
        .token(XmlQNameSeparator, ":")
        .token(XmlQName, "root")
        .token(XmlTagClose, ">")
        .token(XmlLiteralEnd, "`")
        .code("; }")
        .build();
    with_tree(tokens, |tree, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert!(round_trips(tree));
        let Expression::Xml(xml) = first_initializer(tree) else {
            panic!("expected an XML literal");
        };
        let XmlItem::Element(root) = &xml.item else {
            panic!("expected an element");
        };
        let XmlQualifiedName::Name(name) = &root.start_tag.name else {
            panic!("expected a plain name");
        };
        assert_eq!(tree.token_text(name.prefix.as_ref().unwrap()), "a");
        assert_eq!(root.start_tag.attributes.len(), 1);
        assert_eq!(root.content.len(), 2);
        let XmlContent::Text(text) = &root.content[0] else {
            panic!("expected text");
        };
        assert!(matches!(text.segments[0], TextSegment::Interpolation(_)));
        let XmlContent::Element(child) = &root.content[1] else {
            panic!("expected a child element");
        };
        assert!(child.is_empty_element());
        assert!(root.close_tag.is_some());
    });
}

#[test]
fn test_xml_hole_keeps_expression_span_and_markers() {
    let tokens = TokenBuilder::new()
        .code("function main() { xml v = ")
        .token(XmlLiteralStart, "xml `")
        .token(XmlTagOpen, "<")
        .token(XmlQName, "a")
        .token(XmlTagClose, ">")
        .token(XmlTemplateText, "{{")
        .code("x")
        .token(ExpressionEnd, "}}")
        .token(XmlTagOpenSlash, "</")
        .token(XmlQName, "a")
        .token(XmlTagClose, ">")
        .token(XmlLiteralEnd, "`")
        .code("; }")
        .build();
    with_tree(tokens, |tree, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert!(round_trips(tree));
        let Expression::Xml(xml) = first_initializer(tree) else {
            panic!("expected an XML literal");
        };
        let XmlItem::Element(element) = &xml.item else {
            panic!("expected an element");
        };
        let XmlContent::Text(text) = &element.content[0] else {
            panic!("expected text content");
        };
        assert_eq!(text.segments.len(), 1);
        let TextSegment::Interpolation(hole) = &text.segments[0] else {
            panic!("expected an interpolation");
        };
        let x = &tree.tokens[13];
        assert_eq!(x.text, "x");
        assert_eq!(hole.expression.data().range, x.range);
        assert_eq!(hole.expression.data().range, bal_core::text::TextRange::new(36, 37));
        assert_eq!(hole.expression.data().tokens, bal_core::text::TokenRange::new(13, 14));
        assert_eq!(hole.opening.kind, XmlTemplateText);
        assert_eq!(hole.opening.index, 12);
        assert_eq!(hole.closing.kind, ExpressionEnd);
        assert_eq!(hole.closing.index, 14);
        assert!(!hole.opening.missing && !hole.closing.missing);
    });
}

#[test]
fn test_xml_comment_and_processing_instruction() {
    let tokens = TokenBuilder::new()
        .code("function main() { xml c = ")
        .token(XmlLiteralStart, "xml `")
        .token(XmlCommentStart, "<!--")
        .token(XmlCommentText, " note -->")
        .token(XmlLiteralEnd, "`")
        .code("; xml p = ")
        .token(XmlLiteralStart, "xml `")
        .token(XmlPi, "<?target")
        .token(XmlPiText, " data?>")
        .token(XmlLiteralEnd, "`")
        .code("; }")
        .build();
    with_tree(tokens, |tree, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert!(matches!(first_initializer(tree), Expression::Xml(xml) if matches!(xml.item, XmlItem::Comment(_))));
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected a function");
        };
        let Statement::VariableDefinition(second) = &function.body.as_ref().unwrap().statements[1] else {
            panic!("expected a variable definition");
        };
        let Some(Expression::Xml(xml)) = second.initializer else {
            panic!("expected an XML literal");
        };
        let XmlItem::ProcessingInstruction(pi) = &xml.item else {
            panic!("expected a processing instruction");
        };
        assert_eq!(tree.token_text(&pi.target), "<?target");
    });
}

#[test]
fn test_unterminated_xml_element_unwinds_to_next_definition() {
    let tokens = TokenBuilder::new()
        .code("function main() { xml x = ")
        .token(XmlLiteralStart, "xml `")
        .token(XmlTagOpen, "<")
        .token(XmlQName, "a")
        .token(XmlTagClose, ">")
        .token(XmlText, "text")
        .token(XmlLiteralEnd, "`")
        .code("; } function other() { }")
        .build();
    with_tree(tokens, |tree, diagnostics| {
        assert_eq!(diagnostics[0].code, 1010);
        assert!(tree.has_errors());
        assert_eq!(tree.root.definitions.len(), 2);
        let Definition::Function(other) = &tree.root.definitions[1] else {
            panic!("expected the second function to survive");
        };
        assert_eq!(tree.name(&other.signature.name), "other");
        assert!(!other.data.has_error());
    });
}

#[test]
fn test_string_template_with_interpolation() {
    let tokens = TokenBuilder::new()
        .code("function main() { string s = ")
        .token(StringTemplateLiteralStart, "string `")
        .token(StringTemplateExpressionStart, "Hello {{")
        .code("user.name")
        .token(ExpressionEnd, "}}")
        .token(StringTemplateText, "!")
        .token(StringTemplateLiteralEnd, "`")
        .code("; }")
        .build();
    with_tree(tokens, |tree, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert!(round_trips(tree));
        let Expression::StringTemplate(template) = first_initializer(tree) else {
            panic!("expected a string template");
        };
        let segments = template.content.segments;
        assert_eq!(segments.len(), 2);
        let TextSegment::Interpolation(hole) = &segments[0] else {
            panic!("expected an interpolation");
        };
        assert!(matches!(hole.expression, Expression::VariableReference(_)));
        assert!(matches!(segments[1], TextSegment::Literal(_)));
    });
}

fn documentation_block(builder: TokenBuilder) -> TokenBuilder {
    builder
        .token(DocumentationTemplateStart, "documentation {")
        .token(DocumentationTemplateText, " Adds ")
        .token(SingleBacktickInlineCodeStart, "`")
        .token(SingleBacktickInlineCode, "a")
        .token(SingleBacktickInlineCodeEnd, "`")
        .token(DocumentationTemplateAttributeStart, " P{{")
        .token(Identifier, "a")
        .token(DocumentationTemplateAttributeEnd, "}}")
        .token(DocumentationTemplateText, " the value ")
        .token(DocumentationTemplateEnd, "}")
}

#[test]
fn test_documented_and_deprecated_function() {
    let tokens = documentation_block(TokenBuilder::new())
        .token(DeprecatedTemplateStart, " deprecated {")
        .token(DeprecatedTemplateText, " use sum ")
        .token(DeprecatedTemplateEnd, "}")
        .code(" function add(int a) { }")
        .build();
    with_tree(tokens, |tree, diagnostics| {
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert!(round_trips(tree));
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected a function");
        };
        let doc = function.metadata.doc().unwrap();
        let text = doc.text.as_ref().unwrap();
        assert_eq!(text.parts.len(), 2);
        assert!(matches!(&text.parts[1], DocumentationTextPart::InlineCode(code) if code.backticks == 1));
        assert_eq!(doc.attributes.len(), 1);
        assert_eq!(tree.name(doc.attributes[0].name.as_ref().unwrap()), "a");
        assert!(function.metadata.deprecation().is_some());
    });
}

#[test]
fn test_duplicate_documentation_points_at_first() {
    let tokens = documentation_block(documentation_block(TokenBuilder::new()))
        .code(" function add(int a) { }")
        .build();
    with_tree(tokens, |tree, diagnostics| {
        assert_eq!(codes(diagnostics), [1021]);
        assert_eq!(diagnostics[0].related_information.len(), 1);
        let Definition::Function(function) = &tree.root.definitions[0] else {
            panic!("expected a function");
        };
        assert_eq!(function.metadata.documentation.len(), 2);
    });
}
