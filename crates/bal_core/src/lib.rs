//! bal_core: shared building blocks for the syntax front end.
//!
//! Source positions, token index ranges, the bump arena that owns parse
//! trees, and the string interner shared between parser invocations.

pub mod arena;
pub mod intern;
pub mod text;

pub use arena::SyntaxArena;
pub use intern::{InternedString, StringInterner};
pub use text::{TextPos, TextRange, TextSpan, TokenRange};
