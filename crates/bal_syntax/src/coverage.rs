//! Token coverage checking.
//!
//! Verifies that node token ranges nest and do not overlap, and rebuilds the
//! sequence of leaf tokens: the tokens each node consumes directly, in order,
//! interleaved with the leaves of its children. A parse of well-formed input
//! round-trips when that sequence is exactly `0..tokens.len()`.

use crate::node::NodeData;
use crate::tree::ParseTree;
use crate::visitor::Visitor;
use crate::SyntaxKind;
use bal_core::text::TokenRange;
use std::fmt;

/// A structural violation found while checking coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageError {
    /// A child's token range reaches outside its parent's.
    Escapes {
        parent: SyntaxKind,
        parent_tokens: TokenRange,
        child: SyntaxKind,
        child_tokens: TokenRange,
    },
    /// Two siblings claim the same token.
    Overlap {
        first: SyntaxKind,
        first_tokens: TokenRange,
        second: SyntaxKind,
        second_tokens: TokenRange,
    },
}

impl fmt::Display for CoverageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageError::Escapes {
                parent,
                parent_tokens,
                child,
                child_tokens,
            } => write!(
                f,
                "{:?} {:?} is not inside its parent {:?} {:?}",
                child, child_tokens, parent, parent_tokens
            ),
            CoverageError::Overlap {
                first,
                first_tokens,
                second,
                second_tokens,
            } => write!(
                f,
                "siblings {:?} {:?} and {:?} {:?} overlap",
                first, first_tokens, second, second_tokens
            ),
        }
    }
}

impl std::error::Error for CoverageError {}

struct Frame {
    kind: SyntaxKind,
    tokens: TokenRange,
    /// Finished children with their leaf sequences.
    children: Vec<(SyntaxKind, TokenRange, Vec<u32>)>,
}

#[derive(Default)]
struct CoverageVisitor {
    stack: Vec<Frame>,
    result: Option<Vec<u32>>,
    error: Option<CoverageError>,
}

impl CoverageVisitor {
    fn finish(&mut self, frame: Frame) -> Vec<u32> {
        let Frame {
            kind,
            tokens,
            mut children,
        } = frame;
        // Siblings are visited in field order, which is not always source order.
        children.sort_by_key(|(_, range, _)| (range.start, range.end));

        let mut leaves = Vec::with_capacity(tokens.len() as usize);
        let mut cursor = tokens.start;
        let mut previous: Option<(SyntaxKind, TokenRange)> = None;
        for (child_kind, child_tokens, child_leaves) in children {
            if !tokens.contains_range(child_tokens) {
                self.report(CoverageError::Escapes {
                    parent: kind,
                    parent_tokens: tokens,
                    child: child_kind,
                    child_tokens,
                });
            }
            if let Some((prev_kind, prev_tokens)) = previous {
                if child_tokens.start < prev_tokens.end {
                    self.report(CoverageError::Overlap {
                        first: prev_kind,
                        first_tokens: prev_tokens,
                        second: child_kind,
                        second_tokens: child_tokens,
                    });
                }
            }
            leaves.extend(cursor..child_tokens.start.max(cursor));
            leaves.extend(child_leaves);
            cursor = cursor.max(child_tokens.end);
            previous = Some((child_kind, child_tokens));
        }
        leaves.extend(cursor..tokens.end.max(cursor));
        leaves
    }

    fn report(&mut self, error: CoverageError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl<'a> Visitor<'a> for CoverageVisitor {
    fn enter_node(&mut self, data: &NodeData) {
        self.stack.push(Frame {
            kind: data.kind,
            tokens: data.tokens,
            children: Vec::new(),
        });
    }

    fn leave_node(&mut self, _data: &NodeData) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let (kind, tokens) = (frame.kind, frame.tokens);
        let leaves = self.finish(frame);
        match self.stack.last_mut() {
            Some(parent) => parent.children.push((kind, tokens, leaves)),
            None => self.result = Some(leaves),
        }
    }
}

/// Check span nesting for the whole tree and return its leaf token indices.
pub fn check_token_coverage(tree: &ParseTree<'_>) -> Result<Vec<u32>, CoverageError> {
    let mut visitor = CoverageVisitor::default();
    visitor.visit_compilation_unit(&tree.root);
    if let Some(error) = visitor.error {
        return Err(error);
    }
    Ok(visitor.result.unwrap_or_default())
}

/// Whether the leaf sequence reproduces every input token exactly once.
pub fn round_trips(tree: &ParseTree<'_>) -> bool {
    match check_token_coverage(tree) {
        Ok(leaves) => leaves.iter().copied().eq(0..tree.tokens.len() as u32),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bal_core::text::TextRange;

    fn data(kind: SyntaxKind, start: u32, end: u32) -> NodeData {
        NodeData::new(kind, TextRange::default(), TokenRange::new(start, end))
    }

    #[test]
    fn test_leaves_interleave_with_children() {
        let mut v = CoverageVisitor::default();
        let block = data(SyntaxKind::Block, 0, 5);
        let first = data(SyntaxKind::BreakStatement, 1, 3);
        let second = data(SyntaxKind::ContinueStatement, 3, 4);
        v.enter_node(&block);
        // Out of order on purpose.
        v.enter_node(&second);
        v.leave_node(&second);
        v.enter_node(&first);
        v.leave_node(&first);
        v.leave_node(&block);
        assert!(v.error.is_none());
        assert_eq!(v.result, Some(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_overlap_is_reported() {
        let mut v = CoverageVisitor::default();
        let block = data(SyntaxKind::Block, 0, 6);
        let first = data(SyntaxKind::BreakStatement, 1, 4);
        let second = data(SyntaxKind::ContinueStatement, 3, 5);
        v.enter_node(&block);
        for child in [&first, &second] {
            v.enter_node(child);
            v.leave_node(child);
        }
        v.leave_node(&block);
        assert!(matches!(v.error, Some(CoverageError::Overlap { .. })));
    }

    #[test]
    fn test_escaping_child_is_reported() {
        let mut v = CoverageVisitor::default();
        let parent = data(SyntaxKind::Block, 2, 4);
        let child = data(SyntaxKind::BreakStatement, 3, 6);
        v.enter_node(&parent);
        v.enter_node(&child);
        v.leave_node(&child);
        v.leave_node(&parent);
        assert!(matches!(v.error, Some(CoverageError::Escapes { .. })));
    }
}
