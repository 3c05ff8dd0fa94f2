//! Documentation, deprecation and annotation attachments.

use super::*;

impl<'a> Parser<'a> {
    /// Documentation, deprecation and annotations in any order.
    ///
    /// A second documentation or deprecation block is reported with a pointer
    /// to the first and kept after it.
    pub(super) fn parse_metadata(&mut self) -> Metadata<'a> {
        let mut documentation: Vec<DocumentationAttachment<'a>> = Vec::new();
        let mut deprecated: Vec<DeprecatedAttachment<'a>> = Vec::new();
        let mut annotations = Vec::new();
        loop {
            match self.current_token() {
                SyntaxKind::DocumentationTemplateStart => {
                    let doc = self.parse_documentation_attachment();
                    if let Some(first) = documentation.first() {
                        self.report_duplicate_attachment(first.data, doc.data, "documentation");
                    }
                    documentation.push(doc);
                }
                SyntaxKind::DeprecatedTemplateStart => {
                    let notice = self.parse_deprecated_attachment();
                    if let Some(first) = deprecated.first() {
                        self.report_duplicate_attachment(first.data, notice.data, "deprecation");
                    }
                    deprecated.push(notice);
                }
                SyntaxKind::AtToken => annotations.push(self.parse_annotation_attachment()),
                _ => break,
            }
            if self.unwinding {
                break;
            }
        }
        Metadata {
            documentation: self.alloc_list(documentation),
            deprecated: self.alloc_list(deprecated),
            annotations: self.alloc_list(annotations),
        }
    }

    fn report_duplicate_attachment(&mut self, first: NodeData, second: NodeData, what: &str) {
        let related = self.diagnostic_at(first.range, &messages::FIRST_0_ATTACHMENT_HERE, &[what]);
        let diagnostic = self
            .diagnostic_at(second.range, &messages::DUPLICATE_0_ATTACHMENT, &[what])
            .with_related(related);
        self.report(second.tokens.start, diagnostic);
    }

    pub(super) fn parse_annotation_attachments(&mut self) -> NodeList<'a, AnnotationAttachment<'a>> {
        let mut annotations = Vec::new();
        while self.at(SyntaxKind::AtToken) && !self.unwinding {
            annotations.push(self.parse_annotation_attachment());
        }
        self.alloc_list(annotations)
    }

    /// `@pkg:Name { ... }`
    fn parse_annotation_attachment(&mut self) -> AnnotationAttachment<'a> {
        let m = self.start();
        self.bump(); // '@'
        let name = self.parse_name_reference();
        let value = if self.at(SyntaxKind::OpenBraceToken) {
            let record = self.parse_record_literal();
            Some(self.alloc(record))
        } else {
            None
        };
        AnnotationAttachment {
            data: self.finish(m, SyntaxKind::AnnotationAttachment),
            name,
            value,
        }
    }

    fn parse_documentation_attachment(&mut self) -> DocumentationAttachment<'a> {
        let m = self.start();
        let open = self.bump();
        let text = self.parse_documentation_text();
        let mut attributes = Vec::new();
        while self.at(SyntaxKind::DocumentationTemplateAttributeStart) {
            attributes.push(self.parse_documentation_attribute());
        }
        let close = self.expect_closing(&open, SyntaxKind::DocumentationTemplateEnd, "documentation");
        DocumentationAttachment {
            data: self.finish_delimited(m, SyntaxKind::DocumentationAttachment, &close),
            text,
            attributes: self.alloc_list(attributes),
        }
    }

    /// `P{{name}} description`
    fn parse_documentation_attribute(&mut self) -> DocumentationAttribute<'a> {
        let m = self.start();
        let marker = self.bump();
        let name = self.optional_identifier();
        self.expect_token(SyntaxKind::DocumentationTemplateAttributeEnd);
        let description = self.parse_documentation_text();
        DocumentationAttribute {
            data: self.finish(m, SyntaxKind::DocumentationAttribute),
            marker,
            name,
            description,
        }
    }

    fn parse_deprecated_attachment(&mut self) -> DeprecatedAttachment<'a> {
        let m = self.start();
        let open = self.bump();
        let text = self.parse_documentation_text();
        let close = self.expect_closing(&open, SyntaxKind::DeprecatedTemplateEnd, "deprecation notice");
        DeprecatedAttachment {
            data: self.finish_delimited(m, SyntaxKind::DeprecatedAttachment, &close),
            text,
        }
    }

    /// Free text and inline code; `None` when there is neither.
    fn parse_documentation_text(&mut self) -> Option<DocumentationText<'a>> {
        let m = self.start();
        let mut parts = Vec::new();
        loop {
            let part = match self.current_token() {
                SyntaxKind::DocumentationTemplateText | SyntaxKind::DeprecatedTemplateText => {
                    DocumentationTextPart::Text(self.bump())
                }
                SyntaxKind::SingleBacktickInlineCodeStart => {
                    DocumentationTextPart::InlineCode(self.parse_inline_code(1))
                }
                SyntaxKind::DoubleBacktickInlineCodeStart => {
                    DocumentationTextPart::InlineCode(self.parse_inline_code(2))
                }
                SyntaxKind::TripleBacktickInlineCodeStart => {
                    DocumentationTextPart::InlineCode(self.parse_inline_code(3))
                }
                _ => break,
            };
            parts.push(part);
        }
        if parts.is_empty() {
            return None;
        }
        Some(DocumentationText {
            data: self.finish(m, SyntaxKind::DocumentationText),
            parts: self.alloc_list(parts),
        })
    }

    fn parse_inline_code(&mut self, backticks: u8) -> InlineCode {
        let (code_kind, end_kind) = match backticks {
            1 => (
                SyntaxKind::SingleBacktickInlineCode,
                SyntaxKind::SingleBacktickInlineCodeEnd,
            ),
            2 => (
                SyntaxKind::DoubleBacktickInlineCode,
                SyntaxKind::DoubleBacktickInlineCodeEnd,
            ),
            _ => (
                SyntaxKind::TripleBacktickInlineCode,
                SyntaxKind::TripleBacktickInlineCodeEnd,
            ),
        };
        let m = self.start();
        self.bump();
        let code = self.optional_token(code_kind);
        self.expect_token(end_kind);
        InlineCode {
            data: self.finish(m, SyntaxKind::InlineCode),
            backticks,
            code,
        }
    }
}
