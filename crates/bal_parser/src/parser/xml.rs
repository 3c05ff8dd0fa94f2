//! XML literals and string templates.
//!
//! The tokenizer runs these in their own lexical modes. Every text-bearing
//! position is an `InterpolatedText`: template-text tokens that end in an
//! interpolation opener, each followed by an expression and `ExpressionEnd`,
//! and optionally a plain text token at the end.

use super::*;

impl<'a> Parser<'a> {
    pub(super) fn parse_xml_literal(&mut self) -> XmlLiteral<'a> {
        let m = self.start();
        let open = self.bump();
        let item = self.parse_xml_item();
        let close = self.expect_closing(&open, SyntaxKind::XmlLiteralEnd, "XML literal");
        XmlLiteral {
            data: self.finish_delimited(m, SyntaxKind::XmlLiteral, &close),
            item,
        }
    }

    fn parse_xml_item(&mut self) -> XmlItem<'a> {
        match self.current_token() {
            SyntaxKind::XmlTagOpen => {
                let element = self.parse_xml_element();
                XmlItem::Element(self.alloc(element))
            }
            SyntaxKind::XmlPi => XmlItem::ProcessingInstruction(self.parse_xml_processing_instruction()),
            SyntaxKind::XmlCommentStart => XmlItem::Comment(self.parse_xml_comment()),
            SyntaxKind::XmlCdata => XmlItem::Cdata(self.bump()),
            SyntaxKind::XmlText | SyntaxKind::XmlTemplateText => XmlItem::Text(self.parse_xml_text()),
            _ => {
                self.error_expected("XML element, text, comment or processing instruction");
                XmlItem::Text(self.missing_text())
            }
        }
    }

    fn parse_xml_text(&mut self) -> InterpolatedText<'a> {
        self.parse_interpolated_text(SyntaxKind::XmlTemplateText, SyntaxKind::XmlText, false)
    }

    fn missing_text(&mut self) -> InterpolatedText<'a> {
        InterpolatedText {
            data: self.missing_data(SyntaxKind::InterpolatedText),
            segments: &[],
        }
    }

    /// `<name attrs>content</name>` or `<name attrs/>`. A close tag whose
    /// name differs from the start tag is accepted here.
    fn parse_xml_element(&mut self) -> XmlElement<'a> {
        let m = self.start();
        let tag = self.start();
        let open = self.bump();
        let name = self.parse_xml_qualified_name();
        let mut attributes = Vec::new();
        while !self.unwinding
            && matches!(
                self.current_token(),
                SyntaxKind::XmlQName | SyntaxKind::XmlTagExpressionStart
            )
        {
            attributes.push(self.parse_xml_attribute());
        }
        let attributes = self.alloc_list(attributes);

        if self.optional_token(SyntaxKind::XmlTagSlashClose).is_some() {
            let start_tag = XmlStartTag {
                data: self.finish(tag, SyntaxKind::XmlEmptyTag),
                name,
                attributes,
            };
            return XmlElement {
                data: self.finish(m, SyntaxKind::XmlElement),
                start_tag,
                content: &[],
                close_tag: None,
            };
        }

        self.expect_token(SyntaxKind::XmlTagClose);
        let start_tag = XmlStartTag {
            data: self.finish(tag, SyntaxKind::XmlStartTag),
            name,
            attributes,
        };
        let content = self.parse_xml_content();
        let close_tag = if self.at(SyntaxKind::XmlTagOpenSlash) {
            let cm = self.start();
            self.bump();
            let name = self.parse_xml_qualified_name();
            self.expect_token(SyntaxKind::XmlTagClose);
            Some(XmlCloseTag {
                data: self.finish(cm, SyntaxKind::XmlCloseTag),
                name,
            })
        } else {
            self.report_unterminated(&open, SyntaxKind::XmlTagOpenSlash, "XML element");
            None
        };
        XmlElement {
            data: self.finish(m, SyntaxKind::XmlElement),
            start_tag,
            content,
            close_tag,
        }
    }

    fn parse_xml_content(&mut self) -> NodeList<'a, XmlContent<'a>> {
        let mut content = Vec::new();
        while !self.unwinding {
            let item = match self.current_token() {
                SyntaxKind::XmlText | SyntaxKind::XmlTemplateText => XmlContent::Text(self.parse_xml_text()),
                SyntaxKind::XmlTagOpen => self.nested(
                    |p| {
                        let element = p.parse_xml_element();
                        XmlContent::Element(p.alloc(element))
                    },
                    |p| XmlContent::Text(p.missing_text()),
                ),
                SyntaxKind::XmlCdata => XmlContent::Cdata(self.bump()),
                SyntaxKind::XmlPi => XmlContent::ProcessingInstruction(self.parse_xml_processing_instruction()),
                SyntaxKind::XmlCommentStart => XmlContent::Comment(self.parse_xml_comment()),
                SyntaxKind::XmlTagOpenSlash | SyntaxKind::XmlLiteralEnd | SyntaxKind::EndOfFileToken => break,
                _ => {
                    self.bump_unexpected("XML content");
                    continue;
                }
            };
            content.push(item);
        }
        self.alloc_list(content)
    }

    /// `prefix:local`, `local` or `{expr}`.
    fn parse_xml_qualified_name(&mut self) -> XmlQualifiedName<'a> {
        let m = self.start();
        if self.optional_token(SyntaxKind::XmlTagExpressionStart).is_some() {
            let expression = self.parse_expression();
            self.expect_token(SyntaxKind::ExpressionEnd);
            return XmlQualifiedName::Interpolation(XmlNameInterpolation {
                data: self.finish(m, SyntaxKind::XmlNameInterpolation),
                expression,
            });
        }
        let prefix = if self.at(SyntaxKind::XmlQName) && self.nth_at(1, SyntaxKind::XmlQNameSeparator) {
            let prefix = self.bump();
            self.bump();
            Some(prefix)
        } else {
            None
        };
        let local = self.expect_token(SyntaxKind::XmlQName);
        XmlQualifiedName::Name(XmlName {
            data: self.finish(m, SyntaxKind::XmlQualifiedName),
            prefix,
            local,
        })
    }

    fn parse_xml_attribute(&mut self) -> XmlAttribute<'a> {
        let m = self.start();
        let name = self.parse_xml_qualified_name();
        self.expect_token(SyntaxKind::XmlTagEquals);
        let value = self.parse_xml_quoted_string();
        XmlAttribute {
            data: self.finish(m, SyntaxKind::XmlAttribute),
            name,
            value,
        }
    }

    fn parse_xml_quoted_string(&mut self) -> XmlQuotedString<'a> {
        let m = self.start();
        let (template, text, end) = match self.current_token() {
            SyntaxKind::XmlDoubleQuote => (
                SyntaxKind::XmlDoubleQuotedTemplateString,
                SyntaxKind::XmlDoubleQuotedString,
                SyntaxKind::XmlDoubleQuoteEnd,
            ),
            SyntaxKind::XmlSingleQuote => (
                SyntaxKind::XmlSingleQuotedTemplateString,
                SyntaxKind::XmlSingleQuotedString,
                SyntaxKind::XmlSingleQuoteEnd,
            ),
            _ => {
                self.error_expected("quoted attribute value");
                let text = self.missing_text();
                return XmlQuotedString {
                    data: self.finish(m, SyntaxKind::XmlQuotedString),
                    text,
                };
            }
        };
        let open = self.bump();
        let text = self.parse_interpolated_text(template, text, false);
        let close = self.expect_closing(&open, end, "attribute value");
        XmlQuotedString {
            data: self.finish_delimited(m, SyntaxKind::XmlQuotedString, &close),
            text,
        }
    }

    /// `<!-- text -->`; the comment text token carries the closing `-->`.
    fn parse_xml_comment(&mut self) -> XmlComment<'a> {
        let m = self.start();
        self.bump();
        let text = self.parse_interpolated_text(
            SyntaxKind::XmlCommentTemplateText,
            SyntaxKind::XmlCommentText,
            true,
        );
        XmlComment {
            data: self.finish(m, SyntaxKind::XmlComment),
            text,
        }
    }

    /// `<?target text?>`
    fn parse_xml_processing_instruction(&mut self) -> XmlProcessingInstruction<'a> {
        let m = self.start();
        let target = self.bump();
        let text = self.parse_interpolated_text(SyntaxKind::XmlPiTemplateText, SyntaxKind::XmlPiText, true);
        XmlProcessingInstruction {
            data: self.finish(m, SyntaxKind::XmlProcessingInstruction),
            target,
            text,
        }
    }

    /// `(template expr ExpressionEnd)* text?`, with the trailing text token
    /// mandatory when `require_text` is set.
    pub(super) fn parse_interpolated_text(
        &mut self,
        template: SyntaxKind,
        text: SyntaxKind,
        require_text: bool,
    ) -> InterpolatedText<'a> {
        let m = self.start();
        let mut segments = Vec::new();
        while self.at(template) && !self.unwinding {
            let hole = self.start();
            let opening = self.bump();
            let expression = self.parse_expression();
            let closing = self.expect_token(SyntaxKind::ExpressionEnd);
            segments.push(TextSegment::Interpolation(TemplateInterpolation {
                data: self.finish(hole, SyntaxKind::TemplateInterpolation),
                opening,
                expression,
                closing,
            }));
        }
        if self.at(text) {
            segments.push(TextSegment::Literal(self.bump()));
        } else if require_text {
            self.expect_token(text);
        }
        InterpolatedText {
            data: self.finish(m, SyntaxKind::InterpolatedText),
            segments: self.alloc_list(segments),
        }
    }

    pub(super) fn parse_string_template_literal(&mut self) -> StringTemplateLiteral<'a> {
        let m = self.start();
        let open = self.bump();
        let content = self.parse_interpolated_text(
            SyntaxKind::StringTemplateExpressionStart,
            SyntaxKind::StringTemplateText,
            false,
        );
        let close = self.expect_closing(&open, SyntaxKind::StringTemplateLiteralEnd, "string template");
        StringTemplateLiteral {
            data: self.finish_delimited(m, SyntaxKind::StringTemplateLiteral, &close),
            content,
        }
    }
}
