//! The Ballerina parser implementation.
//!
//! A recursive descent parser over a buffered token stream. It builds an
//! arena-allocated tree and never gives up on malformed input: each local
//! failure becomes a diagnostic, the parser resynchronizes, and the tree is
//! completed with placeholder nodes where needed.
//!
//! Grammar families live in the submodules. This file holds what they share:
//! token access, node markers, diagnostics, recovery and speculation.

mod declarations;
mod documentation;
mod expressions;
mod literals;
mod statements;
mod streaming;
mod types;
mod xml;

use bal_core::intern::StringInterner;
use bal_core::text::{TextRange, TextSpan, TokenRange};
use bal_core::SyntaxArena;
use bal_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use bal_syntax::*;
use bumpalo::Bump;
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::token_set::TokenSet;
use crate::token_source::{TokenCursor, TokenSource};

/// Allocate a Vec into the arena as a slice.
pub(crate) fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}

/// Start of a node under construction: the first token it will cover and
/// the error count when it began.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Marker {
    token_index: u32,
    error_count: u32,
}

/// Everything a speculative parse may change.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    position: usize,
    diagnostics: usize,
    error_count: u32,
    last_error_at: Option<u32>,
    unwinding: bool,
    depth: u32,
    depth_reported: bool,
}

/// Parses one compilation unit from a token source.
pub struct Parser<'a> {
    arena: &'a Bump,
    cursor: TokenCursor<'a>,
    interner: StringInterner,
    options: ParseOptions,
    file_name: String,
    diagnostics: DiagnosticCollection,
    /// Errors seen so far, including suppressed ones. Drives `HAS_ERROR`.
    error_count: u32,
    /// Sync sets of the enclosing constructs, innermost last.
    recovery: Vec<TokenSet>,
    /// Token index of the last recorded error, for cascade suppression.
    last_error_at: Option<u32>,
    /// Set after an unterminated construct; cleared by the definition loop.
    unwinding: bool,
    depth: u32,
    depth_reported: bool,
}

impl<'a> Parser<'a> {
    pub fn new(
        arena: &'a SyntaxArena,
        file_name: &str,
        source: impl TokenSource + 'a,
        options: &ParseOptions,
        interner: &StringInterner,
    ) -> Self {
        Self {
            arena: arena.bump(),
            cursor: TokenCursor::new(source),
            interner: interner.clone(),
            options: options.clone(),
            file_name: file_name.to_string(),
            diagnostics: DiagnosticCollection::new(),
            error_count: 0,
            recovery: Vec::new(),
            last_error_at: None,
            unwinding: false,
            depth: 0,
            depth_reported: false,
        }
    }

    /// Parse the whole unit.
    ///
    /// Returns the tree and its diagnostics, or the token source failure
    /// that made the token stream unusable.
    pub fn parse(mut self) -> Result<(ParseTree<'a>, Vec<Diagnostic>), ParseError> {
        let root = self.parse_compilation_unit();
        let Parser {
            cursor,
            interner,
            file_name,
            diagnostics,
            ..
        } = self;
        let tokens = cursor.into_tokens()?;
        let tree = ParseTree {
            file_name,
            root,
            tokens,
            interner,
        };
        Ok((tree, diagnostics.into_diagnostics()))
    }

    // ========================================================================
    // Token access
    // ========================================================================

    #[inline]
    pub(crate) fn current_token(&mut self) -> SyntaxKind {
        self.cursor.peek(0).kind
    }

    #[inline]
    pub(crate) fn nth(&mut self, k: usize) -> SyntaxKind {
        self.cursor.peek(k).kind
    }

    #[inline]
    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current_token() == kind
    }

    #[inline]
    pub(crate) fn nth_at(&mut self, k: usize, kind: SyntaxKind) -> bool {
        self.nth(k) == kind
    }

    #[inline]
    pub(crate) fn at_set(&mut self, set: TokenSet) -> bool {
        set.contains(self.current_token())
    }

    #[inline]
    pub(crate) fn at_end(&mut self) -> bool {
        self.at(SyntaxKind::EndOfFileToken)
    }

    /// Whether a delimited list should stop: its closer, end of input, or an
    /// unwind in progress.
    pub(crate) fn at_list_end(&mut self, close: SyntaxKind) -> bool {
        self.unwinding || self.at(close) || self.at_end()
    }

    #[inline]
    fn token_index(&self) -> u32 {
        self.cursor.position() as u32
    }

    pub(crate) fn current_range(&mut self) -> TextRange {
        self.cursor.peek(0).range
    }

    pub(crate) fn nth_range(&mut self, k: usize) -> TextRange {
        self.cursor.peek(k).range
    }

    pub(crate) fn allow_any_identifier_names(&self) -> bool {
        self.options.allow_any_identifier_names
    }

    /// An identifier, or one of the reserved words accepted as a function or
    /// method name.
    pub(crate) fn is_any_identifier_name(&self, kind: SyntaxKind) -> bool {
        kind == SyntaxKind::Identifier
            || (self.options.allow_any_identifier_names && kind.is_any_identifier_keyword())
    }

    /// `pkg:name` at offset `k`, with the colon touching both identifiers.
    pub(crate) fn is_qualified_name_at(&mut self, k: usize) -> bool {
        if self.nth(k) != SyntaxKind::Identifier
            || self.nth(k + 1) != SyntaxKind::ColonToken
            || self.nth(k + 2) != SyntaxKind::Identifier
        {
            return false;
        }
        let package = self.nth_range(k);
        let colon = self.nth_range(k + 1);
        let name = self.nth_range(k + 2);
        package.end == colon.pos && colon.end == name.pos
    }

    /// Consume the current token.
    pub(crate) fn bump(&mut self) -> SyntaxToken {
        let index = self.token_index();
        let token = self.cursor.peek(0);
        let syntax = SyntaxToken {
            kind: token.kind,
            index,
            range: token.range,
            missing: false,
        };
        self.cursor.bump();
        syntax
    }

    pub(crate) fn optional_token(&mut self, kind: SyntaxKind) -> Option<SyntaxToken> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Consume `kind` or report it missing and synthesize it.
    pub(crate) fn expect_token(&mut self, kind: SyntaxKind) -> SyntaxToken {
        if self.at(kind) {
            return self.bump();
        }
        self.error_expected(&kind.describe());
        self.missing_token(kind)
    }

    /// Consume one of `kinds`, reporting `expected` otherwise.
    pub(crate) fn expect_one_of(&mut self, kinds: TokenSet, expected: &str) -> SyntaxToken {
        if self.at_set(kinds) {
            return self.bump();
        }
        self.error_expected(expected);
        self.missing_token(SyntaxKind::Unknown)
    }

    pub(crate) fn missing_token(&mut self, kind: SyntaxKind) -> SyntaxToken {
        let pos = self.current_range().pos;
        SyntaxToken {
            kind,
            index: self.token_index(),
            range: TextRange::empty(pos),
            missing: true,
        }
    }

    fn bump_identifier(&mut self) -> Identifier {
        let name = {
            let text = &self.cursor.peek(0).text;
            self.interner.intern(text)
        };
        let mut token = self.bump();
        token.kind = SyntaxKind::Identifier;
        Identifier { token, name }
    }

    fn missing_identifier(&mut self) -> Identifier {
        let token = self.missing_token(SyntaxKind::Identifier);
        Identifier {
            token,
            name: self.interner.intern_static(""),
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Identifier {
        if self.at(SyntaxKind::Identifier) {
            return self.bump_identifier();
        }
        self.error_expected("identifier");
        self.missing_identifier()
    }

    pub(crate) fn optional_identifier(&mut self) -> Option<Identifier> {
        if self.at(SyntaxKind::Identifier) {
            Some(self.bump_identifier())
        } else {
            None
        }
    }

    /// A function or method name; see `is_any_identifier_name`.
    pub(crate) fn expect_any_identifier_name(&mut self) -> Identifier {
        let kind = self.current_token();
        if self.is_any_identifier_name(kind) {
            return self.bump_identifier();
        }
        self.error_expected("identifier");
        self.missing_identifier()
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    #[inline]
    pub(crate) fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    pub(crate) fn alloc_list<T>(&self, items: Vec<T>) -> &'a [T] {
        alloc_vec_in(self.arena, items)
    }

    pub(crate) fn start(&mut self) -> Marker {
        Marker {
            token_index: self.token_index(),
            error_count: self.error_count,
        }
    }

    /// Close a node begun at `m`: it covers every token consumed since.
    pub(crate) fn finish(&mut self, m: Marker, kind: SyntaxKind) -> NodeData {
        let end = self.token_index();
        let range = match self.cursor.range_of(m.token_index as usize, end as usize) {
            Some(range) => range,
            None => TextRange::empty(self.current_range().pos),
        };
        let mut data = NodeData::new(kind, range, TokenRange::new(m.token_index, end));
        if self.error_count > m.error_count {
            data.flags |= NodeFlags::HAS_ERROR;
        }
        data
    }

    /// `finish` for a delimited construct; flags it when `close` is missing.
    pub(crate) fn finish_delimited(
        &mut self,
        m: Marker,
        kind: SyntaxKind,
        close: &SyntaxToken,
    ) -> NodeData {
        let mut data = self.finish(m, kind);
        if close.missing {
            data.flags |= NodeFlags::UNTERMINATED;
        }
        data
    }

    /// A zero-width placeholder at the current token.
    pub(crate) fn missing_data(&mut self, kind: SyntaxKind) -> NodeData {
        let pos = self.current_range().pos;
        NodeData::missing(kind, self.token_index(), pos)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn describe_current(&mut self) -> String {
        let token = self.cursor.peek(0);
        match token.kind {
            SyntaxKind::Identifier => format!("identifier '{}'", token.text),
            kind => kind.describe(),
        }
    }

    pub(crate) fn diagnostic_at(
        &self,
        range: TextRange,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Diagnostic {
        Diagnostic::with_location(self.file_name.clone(), range.to_span(), message, args)
    }

    /// Record an error anchored at token `index`.
    ///
    /// Counts toward `HAS_ERROR` even when suppressed: during an unwind, at
    /// the same token as the previous error, or past `max_diagnostics`.
    pub(crate) fn report(&mut self, index: u32, diagnostic: Diagnostic) {
        self.error_count += 1;
        if self.unwinding || self.last_error_at == Some(index) {
            return;
        }
        self.last_error_at = Some(index);
        self.push_diagnostic(diagnostic);
    }

    fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        let limit = self.options.max_diagnostics;
        let recorded = self.diagnostics.len();
        if recorded < limit {
            self.diagnostics.add(diagnostic);
        } else if recorded == limit {
            let limit_text = limit.to_string();
            let warning = Diagnostic::with_location(
                self.file_name.clone(),
                diagnostic.span.unwrap_or_else(|| TextSpan::empty(0)),
                &messages::TOO_MANY_DIAGNOSTICS_0,
                &[&limit_text],
            );
            self.diagnostics.add(warning);
        }
    }

    /// Record a message at the current token.
    pub(crate) fn error_here(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let range = self.current_range();
        let diagnostic = self.diagnostic_at(range, message, args);
        let index = self.token_index();
        self.report(index, diagnostic);
    }

    /// "{expected} expected, found {current}."
    pub(crate) fn error_expected(&mut self, expected: &str) {
        let found = self.describe_current();
        self.error_here(&messages::_0_EXPECTED_FOUND_1, &[expected, &found]);
    }

    /// Ambiguous prefix: none of the alternatives for `construct` matched.
    pub(crate) fn error_no_viable_alternative(&mut self, construct: &str) {
        let found = self.describe_current();
        self.error_here(&messages::NO_VIABLE_ALTERNATIVE_FOR_0_AT_1, &[construct, &found]);
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    #[inline]
    pub(crate) fn is_unwinding(&self) -> bool {
        self.unwinding
    }

    fn start_unwinding(&mut self) {
        if !self.unwinding {
            debug!(at = self.token_index(), "unwinding to the next definition");
        }
        self.unwinding = true;
    }

    /// Run `f` with `set` added to the recovery sync tokens.
    pub(crate) fn with_recovery<T>(&mut self, set: TokenSet, f: impl FnOnce(&mut Self) -> T) -> T {
        self.recovery.push(set);
        let result = f(self);
        self.recovery.pop();
        result
    }

    fn recovery_set(&self) -> TokenSet {
        self.recovery
            .iter()
            .fold(TokenSet::EMPTY, |acc, set| acc.union(*set))
            .with(SyntaxKind::EndOfFileToken)
    }

    /// Skip tokens until one in `sync` or any enclosing recovery set. Reports
    /// the skipped region once and returns how many tokens were skipped.
    pub(crate) fn skip_until(&mut self, sync: TokenSet, looking_for: &str) -> u32 {
        let stop = self.recovery_set().union(sync);
        let first_index = self.token_index();
        let first_range = self.current_range();
        let first = self.describe_current();
        let mut skipped = 0u32;
        while !self.at_set(stop) {
            self.cursor.bump();
            skipped += 1;
        }
        if skipped > 0 {
            debug!(from = first_index, skipped, looking_for, "skipped tokens");
            let count = skipped.to_string();
            let diagnostic = self.diagnostic_at(
                first_range,
                &messages::UNEXPECTED_0_SKIPPED_1_TOKENS,
                &[&first, &count, looking_for],
            );
            self.report(first_index, diagnostic);
        }
        skipped
    }

    /// Skip silently to `sync`. Used after an unwind, whose cause was
    /// already reported.
    pub(crate) fn skip_silently_until(&mut self, sync: TokenSet) -> u32 {
        let stop = sync.with(SyntaxKind::EndOfFileToken);
        let mut skipped = 0u32;
        while !self.at_set(stop) {
            self.cursor.bump();
            skipped += 1;
        }
        skipped
    }

    /// Consume an unexpected token, reporting it as skipped.
    pub(crate) fn bump_unexpected(&mut self, looking_for: &str) {
        let index = self.token_index();
        let range = self.current_range();
        let found = self.describe_current();
        let diagnostic = self.diagnostic_at(
            range,
            &messages::UNEXPECTED_0_SKIPPED_1_TOKENS,
            &[&found, "1", looking_for],
        );
        self.report(index, diagnostic);
        self.cursor.bump();
    }

    /// Report `open` as never closed and unwind to the next definition.
    pub(crate) fn report_unterminated(&mut self, open: &SyntaxToken, close: SyntaxKind, construct: &str) {
        let close_text = close.describe();
        let diagnostic =
            self.diagnostic_at(open.range, &messages::UNTERMINATED_0, &[construct, &close_text]);
        self.report(open.index, diagnostic);
        self.start_unwinding();
    }

    /// Consume the closing delimiter of a construct opened by `open`.
    ///
    /// Junk before the closer is skipped and reported. If the closer is not
    /// reached before a sync token of an enclosing construct or the end of
    /// input, the construct is reported unterminated at its opening
    /// delimiter and the parser unwinds to the next definition.
    pub(crate) fn expect_closing(
        &mut self,
        open: &SyntaxToken,
        close: SyntaxKind,
        construct: &str,
    ) -> SyntaxToken {
        if self.at(close) {
            return self.bump();
        }
        if open.missing {
            return self.expect_token(close);
        }
        if self.unwinding {
            self.error_count += 1;
            return self.missing_token(close);
        }
        self.skip_until(TokenSet::new(&[close]), &close.describe());
        if self.at(close) {
            return self.bump();
        }
        self.report_unterminated(open, close, construct);
        self.missing_token(close)
    }

    /// Parse `item (, item)*`, or nothing when `close` is next.
    ///
    /// Stops at the first item not followed by a comma, so junk before the
    /// closing delimiter is left for `expect_closing` to skip and report.
    pub(crate) fn parse_separated<T>(
        &mut self,
        close: SyntaxKind,
        mut item: impl FnMut(&mut Self) -> T,
    ) -> Vec<T> {
        let mut items = Vec::new();
        if self.at_list_end(close) {
            return items;
        }
        loop {
            items.push(item(self));
            if self.unwinding || self.optional_token(SyntaxKind::CommaToken).is_none() {
                break;
            }
        }
        items
    }

    /// `item (, item)*` with no closing delimiter; at least one item.
    pub(crate) fn parse_comma_list<T>(&mut self, mut item: impl FnMut(&mut Self) -> T) -> Vec<T> {
        let mut items = vec![item(self)];
        while !self.unwinding && self.optional_token(SyntaxKind::CommaToken).is_some() {
            items.push(item(self));
        }
        items
    }

    /// Guard a recursive production against unbounded nesting.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> T,
        fallback: impl FnOnce(&mut Self) -> T,
    ) -> T {
        if self.depth >= self.options.max_nesting_depth {
            if self.depth_reported {
                self.error_count += 1;
            } else {
                self.depth_reported = true;
                let limit = self.options.max_nesting_depth.to_string();
                self.error_here(&messages::MAXIMUM_NESTING_DEPTH_0_EXCEEDED, &[&limit]);
            }
            self.start_unwinding();
            return fallback(self);
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Clear an unwind at a definition boundary and skip to the next
    /// top-level start.
    pub(crate) fn resynchronize(&mut self, sync: TokenSet) {
        self.unwinding = false;
        self.depth_reported = false;
        let skipped = self.skip_silently_until(sync);
        debug!(skipped, at = self.token_index(), "resynchronized");
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.cursor.position(),
            diagnostics: self.diagnostics.len(),
            error_count: self.error_count,
            last_error_at: self.last_error_at,
            unwinding: self.unwinding,
            depth: self.depth,
            depth_reported: self.depth_reported,
        }
    }

    fn rewind(&mut self, checkpoint: Checkpoint) {
        self.cursor.rewind(checkpoint.position);
        self.diagnostics.truncate(checkpoint.diagnostics);
        self.error_count = checkpoint.error_count;
        self.last_error_at = checkpoint.last_error_at;
        self.unwinding = checkpoint.unwinding;
        self.depth = checkpoint.depth;
        self.depth_reported = checkpoint.depth_reported;
    }

    /// Attempt a parse. Keeps the result only if `f` returns `Some` without
    /// reporting an error; otherwise the cursor and diagnostics are restored
    /// and the nodes built by the attempt are abandoned.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        match f(self) {
            Some(value) if self.error_count == checkpoint.error_count => Some(value),
            _ => {
                trace!(
                    from = checkpoint.position,
                    reached = self.cursor.position(),
                    "speculative parse rewound"
                );
                self.rewind(checkpoint);
                None
            }
        }
    }

    /// Run `f` as pure lookahead: the cursor is always restored. True when
    /// `f` accepted without errors.
    pub(crate) fn lookahead(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let checkpoint = self.checkpoint();
        let accepted = f(self) && self.error_count == checkpoint.error_count;
        trace!(from = checkpoint.position, accepted, "lookahead");
        self.rewind(checkpoint);
        accepted
    }

    /// Consume the end-of-input token; only the compilation unit does this.
    pub(crate) fn bump_end_of_file(&mut self) -> SyntaxToken {
        let index = self.token_index();
        let range = self.current_range();
        self.cursor.bump_end_of_file();
        SyntaxToken {
            kind: SyntaxKind::EndOfFileToken,
            index,
            range,
            missing: false,
        }
    }
}

/// A parser over `(kind, text)` pairs laid out `gap` bytes apart, followed by
/// end of input. Shared by the grammar unit tests.
#[cfg(test)]
pub(crate) fn parser_over<'a>(
    arena: &'a SyntaxArena,
    file_name: &str,
    kinds: &[(SyntaxKind, &str)],
    gap: u32,
) -> Parser<'a> {
    let mut pos = 0;
    let mut tokens = Vec::with_capacity(kinds.len() + 1);
    for &(kind, text) in kinds {
        let len = text.len() as u32;
        tokens.push(Token::new(kind, text, TextRange::new(pos, pos + len)));
        pos += len + gap;
    }
    tokens.push(Token::end_of_file(pos));
    Parser::new(arena, file_name, tokens.into_iter(), &ParseOptions::default(), &StringInterner::new())
}
