//! Flag types carried by parse nodes.

bitflags::bitflags! {
    /// Structural facts about a node recorded while it was parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u16 {
        const NONE              = 0;
        /// A diagnostic was reported while this node was being parsed.
        const HAS_ERROR         = 1 << 0;
        /// Placeholder synthesized by error recovery; covers no tokens.
        const MISSING           = 1 << 1;
        /// The closing delimiter was never found.
        const UNTERMINATED      = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Modifiers written in front of a definition or member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u8 {
        const NONE              = 0;
        const PUBLIC            = 1 << 0;
        const PRIVATE           = 1 << 1;
        const NATIVE            = 1 << 2;

        const VISIBILITY = Self::PUBLIC.bits() | Self::PRIVATE.bits();
    }
}

impl ModifierFlags {
    /// Modifier flag for a modifier keyword.
    pub fn from_keyword(kind: crate::SyntaxKind) -> ModifierFlags {
        match kind {
            crate::SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            crate::SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            crate::SyntaxKind::NativeKeyword => ModifierFlags::NATIVE,
            _ => ModifierFlags::NONE,
        }
    }
}

/// Classification of a `SimpleLiteral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Integer,
    Float,
    String,
    Boolean,
    Null,
    /// `()`, the empty tuple.
    Nil,
    Blob,
}

/// Join flavour of a streaming join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Outer,
    LeftOuter,
    RightOuter,
    FullOuter,
}

/// Which workers a fork/join waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinConditionKind {
    Some,
    All,
}
