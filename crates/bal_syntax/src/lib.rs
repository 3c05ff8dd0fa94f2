//! bal_syntax: parse tree definitions for the Ballerina front end.
//!
//! Defines the `SyntaxKind` enumeration shared by tokens and nodes, the input
//! `Token`, the arena-allocated typed tree, a visitor, and the token coverage
//! checker used to verify lossless parses.

pub mod coverage;
pub mod generated;
pub mod node;
pub mod syntax_kind;
pub mod token;
pub mod tree;
pub mod types;
pub mod visitor;

pub use generated::HasNodeData;
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use token::Token;
pub use tree::ParseTree;
pub use types::*;
pub use visitor::Visitor;
