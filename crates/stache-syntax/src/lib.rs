//! Concrete syntax tree for Handlebars-style templates.
//!
//! Every input token, including trivia and tokens swallowed by error
//! recovery, is part of exactly one tree; errors are ordinary nodes of kind
//! `ERROR` that carry a message.

mod builder;
mod syntax_kind;
mod syntax_set;
#[cfg(test)]
mod tests;
mod tree;

/// Incremental builder for constructing a `SyntaxTree`.
pub use builder::Builder;
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use text_size::{TextRange, TextSize};
/// Primary syntax tree API types.
pub use tree::{
    NodeOrToken, Preorder, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree, WalkEvent,
};
