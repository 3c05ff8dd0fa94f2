//! Arena ownership for parse trees.
//!
//! A parse tree borrows every node from one bump arena. Nodes never hold
//! owned heap data, so dropping the arena releases the whole tree at once.

use bumpalo::Bump;

/// Owns the bump allocator a single compilation unit is parsed into.
///
/// One arena per unit: parallel parses each create their own, since `Bump`
/// is not `Sync`.
pub struct SyntaxArena {
    bump: Bump,
}

impl SyntaxArena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Pre-size the arena. A token count is a reasonable proxy: trees take
    /// roughly a few dozen bytes per token.
    pub fn for_token_count(tokens: usize) -> Self {
        Self {
            bump: Bump::with_capacity(tokens.saturating_mul(48)),
        }
    }

    /// The allocator handed to the parser.
    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Total bytes currently held by the arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Drop every tree allocated so far but keep the memory for the next unit.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for SyntaxArena {
    fn default() -> Self {
        Self::new()
    }
}
