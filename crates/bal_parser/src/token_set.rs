//! Fixed-size bit sets of token kinds.
//!
//! FIRST sets and recovery sets are built at compile time and combined with
//! `union` while parsing, so membership is a shift and a mask.

use bal_syntax::SyntaxKind;

const WORDS: usize = (SyntaxKind::COUNT + 63) / 64;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TokenSet([u64; WORDS]);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet([0; WORDS]);

    pub const fn new(kinds: &[SyntaxKind]) -> TokenSet {
        let mut bits = [0u64; WORDS];
        let mut i = 0;
        while i < kinds.len() {
            let k = kinds[i] as usize;
            bits[k / 64] |= 1u64 << (k % 64);
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        let mut bits = self.0;
        let mut i = 0;
        while i < WORDS {
            bits[i] |= other.0[i];
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn with(self, kind: SyntaxKind) -> TokenSet {
        let mut bits = self.0;
        let k = kind as usize;
        bits[k / 64] |= 1u64 << (k % 64);
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let k = kind as usize;
        self.0[k / 64] & (1u64 << (k % 64)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut set = f.debug_set();
        let structural = [SyntaxKind::EndOfFileToken, SyntaxKind::Identifier];
        let kinds = structural
            .iter()
            .chain(SyntaxKind::KEYWORDS)
            .chain(SyntaxKind::PUNCTUATION);
        for &kind in kinds {
            if self.contains(kind) {
                set.entry(&kind);
            }
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let set = TokenSet::new(&[SyntaxKind::SemicolonToken, SyntaxKind::AnnotationAttachment]);
        assert!(set.contains(SyntaxKind::SemicolonToken));
        assert!(set.contains(SyntaxKind::AnnotationAttachment));
        assert!(!set.contains(SyntaxKind::CloseBraceToken));
        assert!(!set.is_empty());
        assert!(TokenSet::EMPTY.is_empty());
    }

    #[test]
    fn test_union_and_with() {
        const A: TokenSet = TokenSet::new(&[SyntaxKind::IfKeyword]);
        const B: TokenSet = A.union(TokenSet::new(&[SyntaxKind::WhileKeyword]));
        let c = B.with(SyntaxKind::EndOfFileToken);
        assert!(c.contains(SyntaxKind::IfKeyword));
        assert!(c.contains(SyntaxKind::WhileKeyword));
        assert!(c.contains(SyntaxKind::EndOfFileToken));
        assert!(!A.contains(SyntaxKind::WhileKeyword));
        assert_eq!(format!("{:?}", A), "{IfKeyword}");
    }
}
