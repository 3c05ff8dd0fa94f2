//! bal_diagnostics: syntax error records and the message catalogue.
//!
//! The parser never fails on malformed input. Every local failure becomes a
//! `Diagnostic` carrying a code, the offending token's span, and a message
//! naming what was expected and what was found.

use bal_core::text::TextSpan;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// May contain `{0}`, `{1}`, ... placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Option<String>,
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    /// Secondary locations, e.g. the first of two duplicate attachments.
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    pub fn with_location(
        file: String,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file),
            span: Some(span),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} BAL{}: {}", self.category, self.code, self.message_text)
    }
}

/// Replace `{0}`, `{1}`, ... in `template` with `args`.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Diagnostics accumulated while parsing one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop everything recorded after the first `len` diagnostics. Used when a
    /// speculative parse is abandoned.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort by file, then by position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let file_cmp = a.file.cmp(&b.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            let a_pos = a.span.map(|s| s.start).unwrap_or(0);
            let b_pos = b.span.map(|s| s.start).unwrap_or(0);
            a_pos.cmp(&b_pos)
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Unexpected tokens (1000-1009)
    // ========================================================================
    pub const _0_EXPECTED_FOUND_1: DiagnosticMessage = diag!(1001, Error, "{0} expected, found {1}.");
    pub const UNEXPECTED_0_SKIPPED_1_TOKENS: DiagnosticMessage = diag!(1002, Error, "Unexpected {0}; skipped {1} token(s) while looking for {2}.");
    pub const NO_VIABLE_ALTERNATIVE_FOR_0_AT_1: DiagnosticMessage = diag!(1003, Error, "No viable alternative for {0} at {1}.");
    pub const _0_MUST_PRECEDE_DEFINITIONS: DiagnosticMessage = diag!(1004, Error, "{0} must precede all definitions.");

    // ========================================================================
    // Unterminated constructs (1010-1019)
    // ========================================================================
    pub const UNTERMINATED_0: DiagnosticMessage = diag!(1010, Error, "Unterminated {0}; missing closing {1}.");

    // ========================================================================
    // Structural limits and attachments (1020-1029)
    // ========================================================================
    pub const MAXIMUM_NESTING_DEPTH_0_EXCEEDED: DiagnosticMessage = diag!(1020, Error, "Maximum nesting depth of {0} exceeded.");
    pub const DUPLICATE_0_ATTACHMENT: DiagnosticMessage = diag!(1021, Error, "Duplicate {0} attachment.");
    pub const FIRST_0_ATTACHMENT_HERE: DiagnosticMessage = diag!(1022, Warning, "The first {0} attachment is here.");
    pub const TOO_MANY_DIAGNOSTICS_0: DiagnosticMessage = diag!(1023, Warning, "Too many syntax errors; stopped reporting after {0}.");
    pub const DUPLICATE_0_BLOCK: DiagnosticMessage = diag!(1024, Error, "Duplicate {0} block.");
}
